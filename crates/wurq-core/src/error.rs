//! Job-level error taxonomy.

use thiserror::Error;

use crate::plan::PlanError;
use crate::producer::ProducerError;
use crate::scheduler::JobId;

/// Every failure a caller can observe through start, progress, or result.
///
/// `InvalidTiming` and `TooManyJobs` come back synchronously from `start`;
/// the production variants and `Cancelled` are stored on the job and
/// delivered through result reads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("invalid timing: {0}")]
    InvalidTiming(#[from] PlanError),
    #[error("segment {index} failed: {cause}")]
    SegmentProduction { index: usize, cause: ProducerError },
    #[error("assembly failed: {0}")]
    Assembly(ProducerError),
    #[error("job {0} not found")]
    JobNotFound(JobId),
    #[error("job {0} has not finished yet")]
    NotYetResolved(JobId),
    #[error("job cancelled")]
    Cancelled,
    #[error("too many active jobs (limit {limit})")]
    TooManyJobs { limit: usize },
}

impl JobError {
    /// Stable machine-readable name for the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            JobError::InvalidTiming(_) => "invalid_timing",
            JobError::SegmentProduction { .. } => "segment_production",
            JobError::Assembly(_) => "assembly",
            JobError::JobNotFound(_) => "job_not_found",
            JobError::NotYetResolved(_) => "not_yet_resolved",
            JobError::Cancelled => "cancelled",
            JobError::TooManyJobs { .. } => "too_many_jobs",
        }
    }
}
