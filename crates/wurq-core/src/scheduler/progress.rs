//! Progress reporting for jobs (segments done out of total).
//!
//! One writer (the job's background task) and any number of readers. The
//! completed count only moves forward; percentage is derived on every read
//! so it never drifts.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::state::{AtomicJobState, JobState};

/// Point-in-time view of one job's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Segments produced so far.
    pub completed: usize,
    /// Segments in the plan (never 0).
    pub total: usize,
    pub state: JobState,
}

impl ProgressSnapshot {
    /// `floor(100 * completed / total)` in `[0, 100]`; always 100 once completed.
    pub fn percentage(&self) -> u8 {
        if self.state == JobState::Completed {
            return 100;
        }
        let total = self.total.max(1) as u64;
        let pct = (self.completed as u64).saturating_mul(100) / total;
        pct.min(100) as u8
    }

    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.state == JobState::Completed {
            return 1.0;
        }
        (self.completed as f64 / self.total.max(1) as f64).min(1.0)
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

/// Thread-safe completed/total counter plus job state.
#[derive(Debug)]
pub struct ProgressTracker {
    completed: AtomicUsize,
    total: usize,
    state: AtomicJobState,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total: total.max(1),
            state: AtomicJobState::new(JobState::Created),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Record `completed` segments. Lower values than already recorded are
    /// ignored, and updates after a terminal state are dropped so a failed
    /// job's progress stays frozen.
    pub(crate) fn update(&self, completed: usize) {
        if self.state.load().is_terminal() {
            return;
        }
        self.completed
            .fetch_max(completed.min(self.total), Ordering::AcqRel);
    }

    pub fn state(&self) -> JobState {
        self.state.load()
    }

    pub(crate) fn transition(&self, next: JobState) -> bool {
        self.state.transition(next)
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let state = self.state.load();
        let completed = self.completed.load(Ordering::Acquire);
        ProgressSnapshot {
            completed,
            total: self.total,
            state,
        }
    }
}
