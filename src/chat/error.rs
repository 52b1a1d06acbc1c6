use reqwest::StatusCode;
use thiserror::Error;

/// Why an exchange produced no assistant text.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

pub type ChatResult<T> = Result<T, ChatError>;
