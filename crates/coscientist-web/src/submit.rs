//! Submission orchestrator: validate → loading → one network call → render or fail.
//!
//! The page lock is only held for synchronous document work, never across the
//! network await, so overlapping submissions interleave the way they would on a
//! single UI thread. What happens to a response that resolves after a newer
//! submission started is decided by `OverlapPolicy`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use coscientist_common::{AnalysisResult, ElementIds, OverlapPolicy};

use crate::cards::{create_bullet, entry_card, hypothesis_card, task_card, NO_INTERPRETATION};
use crate::dom::Document;
use crate::error::SubmitError;
use crate::render::{render_list, render_list_with, RenderError};
use crate::state::{Page, Phase};
use crate::status::{StatusState, LOADING_MESSAGE, READY_MESSAGE};
use crate::transport::AnalysisTransport;

/// How a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The cycle wrote its final phase to the page.
    Applied(Phase),
    /// A newer submission started first; nothing was written after the await.
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub id: Uuid,
    pub generation: u64,
    pub outcome: Outcome,
}

impl SubmissionReport {
    pub fn phase(&self) -> Option<Phase> {
        match self.outcome {
            Outcome::Applied(phase) => Some(phase),
            Outcome::Superseded => None,
        }
    }
}

/// Phase tracker for one cycle; mirrors each transition onto the page.
struct Cycle {
    phase: Phase,
}

impl Cycle {
    fn enter<D: Document>(&mut self, page: &mut Page<D>, next: Phase) -> Result<(), SubmitError> {
        self.phase = self.phase.advance(next)?;
        page.record_phase(next);
        Ok(())
    }
}

pub struct Orchestrator<T> {
    transport: T,
    policy: OverlapPolicy,
    latest: AtomicU64,
}

impl<T: AnalysisTransport> Orchestrator<T> {
    pub fn new(transport: T, policy: OverlapPolicy) -> Self {
        Self {
            transport,
            policy,
            latest: AtomicU64::new(0),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Run one full submission cycle against `page`.
    pub async fn submit<D: Document>(&self, page: &Mutex<Page<D>>) -> SubmissionReport {
        let id = Uuid::new_v4();
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let span = info_span!("submission", %id, generation, policy = self.policy.as_str());

        let outcome = async {
            let mut cycle = Cycle { phase: Phase::Idle };
            match self.run(&mut cycle, generation, page).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    let mut page = lock(page);
                    self.fail(&mut cycle, &mut page, err)
                }
            }
        }
        .instrument(span)
        .await;

        SubmissionReport { id, generation, outcome }
    }

    async fn run<D: Document>(
        &self,
        cycle: &mut Cycle,
        generation: u64,
        page: &Mutex<Page<D>>,
    ) -> Result<Outcome, SubmitError> {
        let query = {
            let mut page = lock(page);
            cycle.enter(&mut page, Phase::Validating)?;
            let query = page.read_query()?;
            if !query.is_valid() {
                return Err(SubmitError::Validation);
            }
            cycle.enter(&mut page, Phase::Loading)?;
            page.set_status(LOADING_MESSAGE, StatusState::Loading);
            query
        };

        debug!(query = %query.query, organism = %query.organism, focus = %query.focus, "Submitting analysis request");
        let response = self.transport.analyze(&query).await;

        let mut page = lock(page);
        if self.is_superseded(generation) {
            info!(latest = self.latest.load(Ordering::SeqCst), "Discarding stale response");
            return Ok(Outcome::Superseded);
        }

        let result = response?;
        if let Some(meta) = &result.meta {
            debug!(?meta, "Analysis metadata");
        }

        let (document, ids) = page.parts_mut();
        render_result(document, ids, &result)?;
        cycle.enter(&mut page, Phase::Success)?;
        page.set_status(READY_MESSAGE, StatusState::Success);
        info!(entries = result.entries.len(), "Analysis rendered");
        Ok(Outcome::Applied(Phase::Success))
    }

    fn fail<D: Document>(&self, cycle: &mut Cycle, page: &mut Page<D>, err: SubmitError) -> Outcome {
        match &err {
            SubmitError::Validation => info!("Rejected empty query"),
            SubmitError::Request { status, detail } => warn!(status, %detail, "Analysis failed"),
            other => error!(error = %other, "Submission failed"),
        }
        if let Err(e) = cycle.enter(page, Phase::Error) {
            error!(error = %e, "Forcing error phase");
            page.record_phase(Phase::Error);
        }
        page.set_status(&err.status_message(), StatusState::Error);
        Outcome::Applied(Phase::Error)
    }

    fn is_superseded(&self, generation: u64) -> bool {
        self.policy == OverlapPolicy::IgnoreStale
            && self.latest.load(Ordering::SeqCst) != generation
    }
}

fn lock<D>(page: &Mutex<Page<D>>) -> MutexGuard<'_, Page<D>> {
    page.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fan a successful response out into the summary and the four list regions.
pub fn render_result<D: Document + ?Sized>(
    doc: &mut D,
    ids: &ElementIds,
    result: &AnalysisResult,
) -> Result<(), RenderError> {
    doc.set_text(&ids.summary, &result.summary)?;
    render_list(doc, &ids.entries, &result.entries, |entry| Ok(entry_card(entry)))?;
    render_list(doc, &ids.hypotheses, &result.hypotheses, |h| Ok(hypothesis_card(h)))?;
    render_list(doc, &ids.tasks, &result.tasks, |task| Ok(task_card(task)))?;
    render_list_with(
        doc,
        &ids.interpretation,
        &result.interpretation,
        create_bullet(NO_INTERPRETATION),
        |line| Ok(create_bullet(line)),
    )
}
