//! Job registry: the id-based interface for starting and polling jobs.
//!
//! Every start gets a fresh id and its own progress counter and result slot,
//! so concurrent starts never share state. A resolved job stays here (with
//! its result or error) until it is discarded.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::control::JobControl;
use crate::error::JobError;
use crate::plan::WorkoutTiming;
use crate::producer::ArtifactRef;
use crate::scheduler::{JobHandle, JobId, JobRunner, JobState, ProgressSnapshot};

pub struct JobRegistry {
    runner: JobRunner,
    control: Arc<JobControl>,
    jobs: RwLock<HashMap<JobId, JobHandle>>,
}

impl JobRegistry {
    /// Wraps `runner`; reuses its `JobControl` or attaches a new one.
    pub fn new(runner: JobRunner) -> Self {
        let control = runner
            .control()
            .cloned()
            .unwrap_or_else(|| Arc::new(JobControl::new()));
        let runner = runner.with_control(Arc::clone(&control));
        Self {
            runner,
            control,
            jobs: RwLock::new(HashMap::new()),
        }
    }

    pub fn control(&self) -> &Arc<JobControl> {
        &self.control
    }

    /// Start a job and return its id immediately.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(&self, timing: &WorkoutTiming) -> Result<JobId, JobError> {
        let handle = self.runner.start(timing)?;
        let id = handle.id();
        self.jobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, handle);
        Ok(id)
    }

    pub fn handle(&self, id: JobId) -> Result<JobHandle, JobError> {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(JobError::JobNotFound(id))
    }

    pub fn progress(&self, id: JobId) -> Result<ProgressSnapshot, JobError> {
        Ok(self.handle(id)?.progress())
    }

    /// Terminal value without waiting; `NotYetResolved` while running.
    pub fn result(&self, id: JobId) -> Result<ArtifactRef, JobError> {
        self.handle(id)?.try_result()
    }

    /// Wait until the job resolves.
    pub async fn wait(&self, id: JobId) -> Result<ArtifactRef, JobError> {
        let handle = self.handle(id)?;
        handle.result().await
    }

    /// Request cancellation. Cancelling a job that already resolved is a no-op.
    pub fn cancel(&self, id: JobId) -> Result<(), JobError> {
        let handle = self.handle(id)?;
        if !self.control.request_abort(id) {
            handle.cancel();
        }
        Ok(())
    }

    /// Cancel every unresolved job; returns how many were signalled.
    pub fn cancel_all(&self) -> usize {
        self.control.request_abort_all()
    }

    /// Remove a job from the registry, cancelling it if it is still running.
    pub fn discard(&self, id: JobId) -> Result<JobHandle, JobError> {
        let handle = self
            .jobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .ok_or(JobError::JobNotFound(id))?;
        if handle.cancel() {
            tracing::debug!(job_id = id, "discarded running job");
        }
        Ok(handle)
    }

    /// Ids of all jobs currently held, ascending.
    pub fn job_ids(&self) -> Vec<JobId> {
        let mut ids: Vec<JobId> = self
            .jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Ids of jobs that have not resolved yet.
    pub fn active_ids(&self) -> Vec<JobId> {
        let mut ids: Vec<JobId> = self
            .jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, h)| !h.state().is_terminal())
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Drop every resolved job; returns how many were removed.
    pub fn discard_finished(&self) -> usize {
        let mut jobs = self.jobs.write().unwrap_or_else(PoisonError::into_inner);
        let before = jobs.len();
        jobs.retain(|_, h| !h.is_finished());
        before - jobs.len()
    }

    pub fn len(&self) -> usize {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current state of a job.
    pub fn state(&self, id: JobId) -> Result<JobState, JobError> {
        Ok(self.handle(id)?.state())
    }
}
