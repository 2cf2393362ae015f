//! Page context and the submission phase machine.

use coscientist_common::{ElementIds, Query};

use crate::dom::{Document, DomError};
use crate::error::SubmitError;
use crate::status::{set_status, StatusState, UiStatus};

/// Lifecycle of one submission. Every submission starts again at `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Loading,
    Success,
    Error,
}

impl Phase {
    pub fn can_advance_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Idle, Phase::Validating)
                | (Phase::Validating, Phase::Loading)
                | (Phase::Validating, Phase::Error)
                | (Phase::Loading, Phase::Success)
                | (Phase::Loading, Phase::Error)
        )
    }

    pub fn advance(self, next: Phase) -> Result<Phase, SubmitError> {
        if self.can_advance_to(next) {
            Ok(next)
        } else {
            Err(SubmitError::InvalidTransition { from: self, to: next })
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Success | Phase::Error)
    }
}

/// Handles to the fixed page regions: a `Document` plus the ids the client
/// reads from and writes into. The orchestrator only touches the page through this.
#[derive(Debug)]
pub struct Page<D> {
    document: D,
    ids: ElementIds,
    status: UiStatus,
    phase: Phase,
}

impl<D: Document> Page<D> {
    pub fn new(document: D, ids: ElementIds) -> Self {
        Self {
            document,
            ids,
            status: UiStatus::default(),
            phase: Phase::Idle,
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    pub fn ids(&self) -> &ElementIds {
        &self.ids
    }

    /// Last status written, mirrored from the status region.
    pub fn status(&self) -> &UiStatus {
        &self.status
    }

    /// Phase of the most recent transition applied to this page.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn record_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn set_status(&mut self, message: &str, state: StatusState) {
        self.status = UiStatus::new(message, state);
        set_status(&mut self.document, &self.ids.status, &self.status);
    }

    /// Read and trim the three form fields.
    pub fn read_query(&self) -> Result<Query, DomError> {
        Ok(Query::from_form(
            &self.document.value(&self.ids.query)?,
            &self.document.value(&self.ids.organism)?,
            &self.document.value(&self.ids.focus)?,
        ))
    }

    /// Split borrow for renderers that need the document and the ids together.
    pub(crate) fn parts_mut(&mut self) -> (&mut D, &ElementIds) {
        (&mut self.document, &self.ids)
    }
}
