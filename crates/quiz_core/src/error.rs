use thiserror::Error;

/// Every way a call to the question service can fail. The controller never
/// distinguishes between them beyond logging; each degrades to a fixed
/// user-facing message.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid service endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("service responded with status {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl TransportError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::Malformed(detail.into())
    }
}
