use thiserror::Error;

use crate::round::Mode;

/// Malformed numeric input. Callers treat it as a wrong answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no digits found")]
    Empty,

    #[error("signed numbers are not accepted")]
    Signed,

    #[error("unexpected character '{0}'")]
    InvalidCharacter(char),

    #[error("number exceeds the sanity ceiling")]
    TooLarge,
}

/// Upstream country listing could not be obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("malformed country listing: {0}")]
    Malformed(String),
}

/// Fallback snapshot could not be read or written.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("fallback store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fallback store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// No dataset obtainable by any path.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no country dataset available, try again later")]
pub struct Unavailable;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectError {
    #[error("dataset has no countries eligible for {0} mode")]
    NoEligibleCountry(Mode),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundError {
    #[error("round was already submitted")]
    AlreadySubmitted,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("invalid rule tables: {0}")]
    Tables(String),

    #[error("could not read {path}: {source}")]
    Io { path: String, source: std::io::Error },
}
