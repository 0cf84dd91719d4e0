//! Collaborator contracts for turning segments into artifacts.
//!
//! The job runner never renders anything itself: a [`SegmentProducer`] turns
//! one segment into an artifact and an [`Assembler`] joins the ordered
//! artifacts into the final result. Both are called from the blocking pool,
//! one call at a time per job.

mod manifest;
mod placeholder;
mod retry;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::plan::Segment;

pub use manifest::ManifestAssembler;
pub use placeholder::PlaceholderProducer;
pub use retry::{run_with_retry, RetryDecision, RetryPolicy, Retrying};

/// Reference to a produced artifact (usually a file path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ArtifactRef(String);

impl ArtifactRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Path> for ArtifactRef {
    fn from(path: &Path) -> Self {
        Self(path.display().to_string())
    }
}

impl From<PathBuf> for ArtifactRef {
    fn from(path: PathBuf) -> Self {
        Self::from(path.as_path())
    }
}

/// Failure reported by a producer or assembler.
///
/// Kept as owned strings so a job's terminal error can be cloned to every
/// reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProducerError {
    /// Temporary condition (busy encoder, timeout); worth another attempt.
    #[error("transient: {0}")]
    Transient(String),
    #[error("{0}")]
    Failed(String),
    #[error("io: {0}")]
    Io(String),
    #[error("panicked: {0}")]
    Panicked(String),
}

impl ProducerError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProducerError::Transient(_))
    }
}

impl From<std::io::Error> for ProducerError {
    fn from(e: std::io::Error) -> Self {
        ProducerError::Io(e.to_string())
    }
}

/// Produces the artifact for a single segment.
pub trait SegmentProducer: Send + Sync {
    fn produce(&self, segment: &Segment) -> Result<ArtifactRef, ProducerError>;
}

/// Joins the ordered segment artifacts into the final artifact.
pub trait Assembler: Send + Sync {
    fn assemble(&self, parts: &[ArtifactRef]) -> Result<ArtifactRef, ProducerError>;
}

impl<P: SegmentProducer + ?Sized> SegmentProducer for std::sync::Arc<P> {
    fn produce(&self, segment: &Segment) -> Result<ArtifactRef, ProducerError> {
        (**self).produce(segment)
    }
}

impl<A: Assembler + ?Sized> Assembler for std::sync::Arc<A> {
    fn assemble(&self, parts: &[ArtifactRef]) -> Result<ArtifactRef, ProducerError> {
        (**self).assemble(parts)
    }
}
