//! Error types for the smoke harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmokeError {
    #[error("node not found on PATH. Install Node.js and `npm install playwright`")]
    NodeNotFound,

    #[error("browser script failed: {0}")]
    Browser(String),

    #[error("could not parse probe output: {0}")]
    ProbeParse(String),

    #[error("unknown check: {0}")]
    UnknownCheck(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SmokeResult<T> = Result<T, SmokeError>;
