use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("download of {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("pdf extraction failed for {path}: {details}")]
    Extraction { path: PathBuf, details: String },

    #[error("{0}")]
    Validation(String),
}

/// Failures of a single chat-completion call. These never cross the
/// pipeline boundary: the summarizer downgrades them into degraded
/// summary text instead of propagating.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat completion returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("chat completion response had no choices")]
    EmptyResponse,
}

pub type Result<T, E = AnalyzerError> = std::result::Result<T, E>;
