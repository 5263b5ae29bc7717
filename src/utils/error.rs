use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Pattern error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("No source returned a valid digit sequence")]
    NoValidSources,

    #[error("{left} and {right} disagree at decimal place {index}: {left_digit} vs {right_digit}")]
    SourceMismatch {
        left: String,
        right: String,
        index: usize,
        left_digit: char,
        right_digit: char,
    },

    #[error("{left} and {right} disagree in length: {left_len} vs {right_len} decimal places")]
    SourceLengthMismatch {
        left: String,
        right: String,
        left_len: usize,
        right_len: usize,
    },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, VerifyError>;
