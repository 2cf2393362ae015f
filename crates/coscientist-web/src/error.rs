use thiserror::Error;

use crate::dom::DomError;
use crate::render::RenderError;
use crate::state::Phase;
use crate::status::VALIDATION_MESSAGE;

pub const REQUEST_FAILED: &str = "Request failed";

/// Every way a submission cycle can end in the `Error` phase.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Empty query; caught before any network traffic.
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,

    /// Non-2xx response. `detail` comes from the body or falls back to "Request failed".
    #[error("{detail}")]
    Request { status: u16, detail: String },

    /// Connection failure, timeout, or an undecodable body.
    #[error("{0}")]
    Transport(String),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("invalid phase transition {from:?} -> {to:?}")]
    InvalidTransition { from: Phase, to: Phase },
}

impl From<reqwest::Error> for SubmitError {
    fn from(e: reqwest::Error) -> Self {
        SubmitError::Transport(e.to_string())
    }
}

impl SubmitError {
    /// Text shown in the status region.
    pub fn status_message(&self) -> String {
        match self {
            SubmitError::Validation => VALIDATION_MESSAGE.to_string(),
            other => format!("Error: {}", other),
        }
    }

    /// Failures not caused by user input; logged at error level.
    pub fn is_unexpected(&self) -> bool {
        !matches!(self, SubmitError::Validation | SubmitError::Request { .. })
    }
}
