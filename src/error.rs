//! Error handling for the resume matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeMatcherError>;

/// Pattern compilation failures only come from configuration data
impl From<regex::Error> for ResumeMatcherError {
    fn from(err: regex::Error) -> Self {
        ResumeMatcherError::Configuration(format!("Invalid pattern: {}", err))
    }
}

impl From<aho_corasick::BuildError> for ResumeMatcherError {
    fn from(err: aho_corasick::BuildError) -> Self {
        ResumeMatcherError::Configuration(format!("Failed to build skill matcher: {}", err))
    }
}
