//! Job lifecycle: start, background execution, progress, and resolution.
//!
//! A job is planned synchronously in [`JobRunner::start`] so bad timings are
//! rejected before anything exists, then driven on its own Tokio task:
//! segments are produced one at a time on the blocking pool, progress is
//! published through atomics, and the terminal outcome lands in a write-once
//! slot on the [`JobHandle`].

mod budget;
mod execute;
mod handle;
mod progress;
mod runner;
mod state;

pub use budget::ActiveJobBudget;
pub use handle::JobHandle;
pub use progress::{ProgressSnapshot, ProgressTracker};
pub use runner::JobRunner;
pub use state::JobState;

/// Job identifier, unique within one registry.
pub type JobId = u64;
