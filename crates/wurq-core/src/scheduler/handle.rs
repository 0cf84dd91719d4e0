//! Caller-facing handle: progress reads and a write-once result slot.

use std::fmt;
use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tokio::sync::Notify;

use crate::error::JobError;
use crate::plan::SegmentPlan;
use crate::producer::ArtifactRef;

use super::progress::{ProgressSnapshot, ProgressTracker};
use super::state::JobState;
use super::JobId;

pub(crate) type Outcome = Result<ArtifactRef, JobError>;

fn terminal_state(outcome: &Outcome) -> JobState {
    match outcome {
        Ok(_) => JobState::Completed,
        Err(JobError::Cancelled) => JobState::Cancelled,
        Err(_) => JobState::Failed,
    }
}

/// State shared between a job's background task and its handles.
pub(crate) struct JobShared {
    pub(crate) id: JobId,
    pub(crate) plan: Arc<SegmentPlan>,
    pub(crate) progress: ProgressTracker,
    abort: Arc<AtomicBool>,
    outcome: OnceLock<Outcome>,
    resolved: Notify,
}

impl JobShared {
    pub(crate) fn new(id: JobId, plan: Arc<SegmentPlan>, abort: Arc<AtomicBool>) -> Self {
        let total = plan.len();
        Self {
            id,
            plan,
            progress: ProgressTracker::new(total),
            abort,
            outcome: OnceLock::new(),
            resolved: Notify::new(),
        }
    }

    pub(crate) fn abort_requested(&self) -> bool {
        self.abort.load(Ordering::Acquire)
    }

    pub(crate) fn is_resolved(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Tracker snapshot, with the state taken from the outcome once one is
    /// stored so a visible result always pairs with a terminal state.
    pub(crate) fn snapshot(&self) -> ProgressSnapshot {
        let mut snap = self.progress.snapshot();
        if let Some(outcome) = self.outcome.get() {
            snap.state = terminal_state(outcome);
        }
        snap
    }

    /// Store the terminal outcome and wake waiters. Only the first call has
    /// any effect; returns whether this call resolved the job.
    pub(crate) fn resolve(&self, outcome: Outcome) -> bool {
        let state = terminal_state(&outcome);
        if self.outcome.set(outcome).is_err() {
            return false;
        }
        self.progress.transition(state);
        self.resolved.notify_waiters();
        true
    }
}

/// Handle to a started job. Cheap to clone; every clone sees the same job.
#[derive(Clone)]
pub struct JobHandle {
    shared: Arc<JobShared>,
}

impl JobHandle {
    pub(crate) fn new(shared: Arc<JobShared>) -> Self {
        Self { shared }
    }

    pub fn id(&self) -> JobId {
        self.shared.id
    }

    pub fn plan(&self) -> &SegmentPlan {
        &self.shared.plan
    }

    /// Latest progress; available before the first segment and after resolution.
    pub fn progress(&self) -> ProgressSnapshot {
        self.shared.snapshot()
    }

    pub fn state(&self) -> JobState {
        self.shared.snapshot().state
    }

    pub fn is_finished(&self) -> bool {
        self.shared.is_resolved()
    }

    /// Terminal value without waiting: `NotYetResolved` while the job runs.
    /// Once resolved, every call returns the same value.
    pub fn try_result(&self) -> Result<ArtifactRef, JobError> {
        match self.shared.outcome.get() {
            Some(outcome) => outcome.clone(),
            None => Err(JobError::NotYetResolved(self.shared.id)),
        }
    }

    /// Wait for the terminal value.
    pub async fn result(&self) -> Result<ArtifactRef, JobError> {
        loop {
            let mut notified = pin!(self.shared.resolved.notified());
            // Register before checking so a resolve in between is not missed.
            notified.as_mut().enable();
            if let Some(outcome) = self.shared.outcome.get() {
                return outcome.clone();
            }
            notified.await;
        }
    }

    /// Request cooperative cancellation. The job stops before its next
    /// segment; a producer call already running finishes and is discarded.
    /// Returns false if the job had already resolved.
    pub fn cancel(&self) -> bool {
        if self.shared.is_resolved() {
            return false;
        }
        self.shared.abort.store(true, Ordering::Release);
        tracing::debug!(job_id = self.shared.id, "cancellation requested");
        true
    }
}

impl fmt::Debug for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobHandle")
            .field("id", &self.shared.id)
            .field("progress", &self.progress())
            .finish()
    }
}
