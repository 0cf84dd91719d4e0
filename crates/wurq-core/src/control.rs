//! Job control for cancellation: shared abort tokens keyed by job id.
//!
//! When the runner has a `JobControl`, each started job is registered with an
//! abort token. Anyone holding the control (the registry, a signal handler)
//! can request abort by id; the job checks the token between segments.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::scheduler::JobId;

/// Shared registry of job id -> abort token.
#[derive(Debug, Default)]
pub struct JobControl {
    jobs: RwLock<HashMap<JobId, Arc<AtomicBool>>>,
}

impl JobControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job; returns the abort token the job polls.
    pub fn register(&self, job_id: JobId) -> Arc<AtomicBool> {
        let token = Arc::new(AtomicBool::new(false));
        self.jobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(job_id, Arc::clone(&token));
        token
    }

    /// Unregister a job (called when the job resolves).
    pub fn unregister(&self, job_id: JobId) {
        self.jobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&job_id);
    }

    /// Request abort for a job. Returns false if the job is not registered
    /// (unknown or already finished).
    pub fn request_abort(&self, job_id: JobId) -> bool {
        match self
            .jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&job_id)
        {
            Some(token) => {
                token.store(true, Ordering::Release);
                true
            }
            None => false,
        }
    }

    /// Request abort for every registered job; returns how many were signalled.
    pub fn request_abort_all(&self) -> usize {
        let jobs = self.jobs.read().unwrap_or_else(PoisonError::into_inner);
        for token in jobs.values() {
            token.store(true, Ordering::Release);
        }
        jobs.len()
    }

    /// Number of registered (unresolved) jobs.
    pub fn active(&self) -> usize {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
