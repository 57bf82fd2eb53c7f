use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    error::ApiError,
    protocol::{AnswerResult, CheckAnswerRequest, QuestionRequest, QuestionResponse},
};
use tracing::debug;
use url::Url;

use crate::error::TransportError;

const QUESTION_PATH: &str = "api/question";
const CHECK_ANSWER_PATH: &str = "api/check_answer";

/// The remote question/answer service.
#[async_trait]
pub trait QuizService: Send + Sync {
    async fn next_question(
        &self,
        request: &QuestionRequest,
    ) -> Result<QuestionResponse, TransportError>;

    async fn check_answer(
        &self,
        request: &CheckAnswerRequest,
    ) -> Result<AnswerResult, TransportError>;
}

pub struct HttpQuizService {
    http: Client,
    base_url: Url,
}

impl HttpQuizService {
    pub fn new(mut base_url: Url) -> Self {
        // Url::join replaces the last segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn parse(base_url: &str) -> Result<Self, TransportError> {
        Ok(Self::new(Url::parse(base_url)?))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, TransportError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.base_url.join(path)?;
        debug!(%url, "posting to quiz service");
        let res = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(TransportError::Network)?;

        let status = res.status();
        let bytes = res.bytes().await.map_err(TransportError::Network)?;
        if !status.is_success() {
            let detail = serde_json::from_slice::<ApiError>(&bytes)
                .map(|body| body.error)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(TransportError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_slice(&bytes).map_err(|err| TransportError::malformed(err.to_string()))
    }
}

#[async_trait]
impl QuizService for HttpQuizService {
    async fn next_question(
        &self,
        request: &QuestionRequest,
    ) -> Result<QuestionResponse, TransportError> {
        self.post_json(QUESTION_PATH, request).await
    }

    async fn check_answer(
        &self,
        request: &CheckAnswerRequest,
    ) -> Result<AnswerResult, TransportError> {
        self.post_json(CHECK_ANSWER_PATH, request).await
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
