//! Cap on concurrently active jobs.
//!
//! Jobs are independent, but each one holds a Tokio task and keeps the
//! blocking pool busy. Starting a job reserves a slot; the slot is released
//! when the job resolves.

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
pub struct ActiveJobBudget {
    max_active: usize,
    in_use: AtomicUsize,
}

impl ActiveJobBudget {
    /// Create a budget with the given maximum active jobs (e.g. from config).
    pub fn new(max_active: usize) -> Self {
        Self {
            max_active: max_active.max(1),
            in_use: AtomicUsize::new(0),
        }
    }

    pub fn max_active(&self) -> usize {
        self.max_active
    }

    /// Number of slots currently reserved.
    pub fn in_use(&self) -> usize {
        self.in_use.load(Ordering::Relaxed)
    }

    pub fn available(&self) -> usize {
        self.max_active.saturating_sub(self.in_use())
    }

    /// Reserve one slot. Returns false when every slot is taken. Callers that
    /// get `true` must call [`release`](Self::release) exactly once.
    pub fn try_reserve(&self) -> bool {
        let mut current = self.in_use.load(Ordering::Relaxed);
        loop {
            if current >= self.max_active {
                return false;
            }
            match self.in_use.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }

    /// Release one slot reserved with `try_reserve`.
    pub fn release(&self) {
        let _ = self
            .in_use
            .fetch_update(Ordering::AcqRel, Ordering::Relaxed, |n| n.checked_sub(1));
    }
}
