use serde::{Deserialize, Serialize};

use crate::{
    domain::{CapitalLocation, Country},
    error::ProtocolError,
};

/// `POST /api/question` body: every country already presented this session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub asked: Vec<Country>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionResponseBody", into = "QuestionResponseBody")]
pub enum QuestionResponse {
    GameOver { message: String },
    Question { country: Country },
}

/// Flat wire shape of [`QuestionResponse`]. The service omits `game_over`
/// entirely when another question is available.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionResponseBody {
    #[serde(default)]
    pub game_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
}

impl TryFrom<QuestionResponseBody> for QuestionResponse {
    type Error = ProtocolError;

    fn try_from(body: QuestionResponseBody) -> Result<Self, Self::Error> {
        if body.game_over {
            let message = body.message.ok_or(ProtocolError::MissingMessage)?;
            return Ok(Self::GameOver { message });
        }
        let country = body.country.ok_or(ProtocolError::MissingCountry)?;
        Ok(Self::Question { country })
    }
}

impl From<QuestionResponse> for QuestionResponseBody {
    fn from(value: QuestionResponse) -> Self {
        match value {
            QuestionResponse::GameOver { message } => Self {
                game_over: true,
                message: Some(message),
                country: None,
            },
            QuestionResponse::Question { country } => Self {
                game_over: false,
                message: None,
                country: Some(country),
            },
        }
    }
}

/// `POST /api/check_answer` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAnswerRequest {
    pub answer: String,
    pub country: Country,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub correct: bool,
    pub message: String,
    pub location: CapitalLocation,
}
