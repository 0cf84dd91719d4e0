pub mod config;
pub mod logging;

pub mod control;
pub mod error;
pub mod plan;
pub mod producer;
pub mod registry;
pub mod scheduler;

pub use error::JobError;
pub use plan::{compute_plan, Segment, SegmentKind, SegmentPlan, WorkoutTiming};
pub use producer::{ArtifactRef, Assembler, ProducerError, SegmentProducer};
pub use registry::JobRegistry;
pub use scheduler::{JobHandle, JobId, JobRunner, JobState, ProgressSnapshot};
