//! Status controller: one visible message plus a state tag used for styling.

use tracing::warn;

use crate::dom::Document;

pub const VALIDATION_MESSAGE: &str = "Please enter a query.";
pub const LOADING_MESSAGE: &str = "Analyzing UniProt data...";
pub const READY_MESSAGE: &str = "Analysis ready.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusState {
    #[default]
    Neutral,
    Loading,
    Success,
    Error,
}

impl StatusState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusState::Neutral => "",
            StatusState::Loading => "loading",
            StatusState::Success => "success",
            StatusState::Error   => "error",
        }
    }

    /// Class attribute for the status region, e.g. `"status loading"`.
    pub fn class_name(&self) -> String {
        format!("status {}", self.as_str()).trim().to_string()
    }
}

/// The authoritative status; overwritten on every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiStatus {
    pub message: String,
    pub state: StatusState,
}

impl UiStatus {
    pub fn new(message: &str, state: StatusState) -> Self {
        Self { message: message.to_string(), state }
    }
}

/// Overwrite the status region's text and class. Never fails: a missing
/// region is logged and skipped.
pub fn set_status<D: Document + ?Sized>(doc: &mut D, status_id: &str, status: &UiStatus) {
    if let Err(e) = doc.set_text(status_id, &status.message) {
        warn!(error = %e, message = %status.message, "Status region unavailable");
        return;
    }
    if let Err(e) = doc.set_class(status_id, &status.state.class_name()) {
        warn!(error = %e, "Status class not applied");
    }
}
