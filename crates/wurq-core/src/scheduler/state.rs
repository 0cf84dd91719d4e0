//! Job state machine: `Created -> Running -> {Completed, Failed, Cancelled}`.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// High-level job state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum JobState {
    Created = 0,
    Running = 1,
    Completed = 2,
    Failed = 3,
    Cancelled = 4,
}

impl JobState {
    pub fn as_str(self) -> &'static str {
        match self {
            JobState::Created => "created",
            JobState::Running => "running",
            JobState::Completed => "completed",
            JobState::Failed => "failed",
            JobState::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobState::Completed | JobState::Failed | JobState::Cancelled
        )
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => JobState::Created,
            1 => JobState::Running,
            2 => JobState::Completed,
            3 => JobState::Failed,
            _ => JobState::Cancelled,
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State cell readable from any thread. Terminal states are sticky.
#[derive(Debug)]
pub(crate) struct AtomicJobState(AtomicU8);

impl AtomicJobState {
    pub(crate) fn new(state: JobState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    pub(crate) fn load(&self) -> JobState {
        JobState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Move to `next`. Returns false (and changes nothing) if the current
    /// state is already terminal.
    pub(crate) fn transition(&self, next: JobState) -> bool {
        let mut current = self.0.load(Ordering::Acquire);
        loop {
            if JobState::from_u8(current).is_terminal() {
                return false;
            }
            match self.0.compare_exchange_weak(
                current,
                next as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_are_sticky() {
        let s = AtomicJobState::new(JobState::Created);
        assert!(s.transition(JobState::Running));
        assert_eq!(s.load(), JobState::Running);
        assert!(s.transition(JobState::Failed));
        assert!(!s.transition(JobState::Completed));
        assert!(!s.transition(JobState::Running));
        assert_eq!(s.load(), JobState::Failed);
    }

    #[test]
    fn created_can_be_cancelled() {
        let s = AtomicJobState::new(JobState::Created);
        assert!(s.transition(JobState::Cancelled));
        assert_eq!(s.load(), JobState::Cancelled);
    }

    #[test]
    fn state_names() {
        assert_eq!(JobState::Running.to_string(), "running");
        assert!(JobState::Cancelled.is_terminal());
        assert!(!JobState::Created.is_terminal());
    }
}
