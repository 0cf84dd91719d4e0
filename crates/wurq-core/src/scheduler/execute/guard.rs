//! RAII guard owned by a job's background task.

use std::sync::Arc;

use crate::control::JobControl;
use crate::error::JobError;

use super::super::budget::ActiveJobBudget;
use super::super::handle::{JobShared, Outcome};

/// Releases the job's budget slot and abort token exactly once, before the
/// outcome is published. If the task is dropped before resolving (runtime
/// shutdown), resolves the job as cancelled so no waiter hangs.
pub(in crate::scheduler) struct JobGuard {
    pub(in crate::scheduler) job: Arc<JobShared>,
    pub(in crate::scheduler) budget: Option<Arc<ActiveJobBudget>>,
    pub(in crate::scheduler) control: Option<Arc<JobControl>>,
}

impl JobGuard {
    fn release(&mut self) {
        if let Some(control) = self.control.take() {
            control.unregister(self.job.id);
        }
        if let Some(budget) = self.budget.take() {
            budget.release();
        }
    }

    /// Free the job's slot, then publish `outcome`.
    pub(in crate::scheduler) fn finish(mut self, outcome: Outcome) {
        self.release();
        self.job.resolve(outcome);
    }
}

impl Drop for JobGuard {
    fn drop(&mut self) {
        self.release();
        if self.job.resolve(Err(JobError::Cancelled)) {
            tracing::warn!(job_id = self.job.id, "job task dropped before resolving");
        }
    }
}
