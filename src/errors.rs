//! Submission error types

use thiserror::Error;

use crate::constants::USER_ERROR_MESSAGE;

/// Why a submission failed.
///
/// The user always sees [`USER_ERROR_MESSAGE`]; the variant is kept so the
/// log and the tests can tell the branches apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("input is not valid JSON: {0}")]
    Parse(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("endpoint answered with status {status}")]
    Remote { status: u16 },
}

impl SubmitError {
    /// Message shown in the UI
    pub fn user_message(&self) -> &'static str {
        USER_ERROR_MESSAGE
    }

    /// Short tag for the status bar and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            SubmitError::Parse(_) => "parse",
            SubmitError::Network(_) => "network",
            SubmitError::Remote { .. } => "remote",
        }
    }
}

impl From<serde_json::Error> for SubmitError {
    fn from(err: serde_json::Error) -> Self {
        SubmitError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return SubmitError::Remote { status: status.as_u16() };
        }
        let msg = if err.is_timeout() {
            format!("timed out: {}", err)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        SubmitError::Network(msg)
    }
}
