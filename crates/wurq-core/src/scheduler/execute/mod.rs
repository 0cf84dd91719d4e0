//! Drive one job: produce every segment in order, assemble, resolve.

mod guard;

use std::sync::Arc;
use std::time::Instant;

use crate::error::JobError;
use crate::producer::{ArtifactRef, Assembler, ProducerError, SegmentProducer};

use super::handle::{JobShared, Outcome};
use super::state::JobState;

pub(super) use self::guard::JobGuard;

/// Background task body. Owns the guard so cleanup runs however the task ends.
pub(super) async fn execute_job(
    guard: JobGuard,
    producer: Arc<dyn SegmentProducer>,
    assembler: Arc<dyn Assembler>,
) {
    let job = Arc::clone(&guard.job);
    let started = Instant::now();

    // Cancelled before the task first ran: go straight from Created to Cancelled.
    let outcome = if job.abort_requested() || !job.progress.transition(JobState::Running) {
        Err(JobError::Cancelled)
    } else {
        drive(&job, producer, assembler).await
    };

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let done = job.progress.snapshot().completed;
    match &outcome {
        Ok(artifact) => {
            tracing::info!(job_id = job.id, elapsed_ms, "job completed: {}", artifact)
        }
        Err(JobError::Cancelled) => {
            tracing::info!(job_id = job.id, completed = done, "job cancelled")
        }
        Err(e) => tracing::warn!(job_id = job.id, completed = done, "job failed: {}", e),
    }

    guard.finish(outcome);
}

/// Runs a collaborator call on the blocking pool. A panic inside the call
/// comes back as `ProducerError::Panicked`.
async fn off_thread<T, F>(f: F) -> Result<T, ProducerError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ProducerError> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(res) => res,
        Err(e) => Err(ProducerError::Panicked(e.to_string())),
    }
}

async fn drive(
    job: &JobShared,
    producer: Arc<dyn SegmentProducer>,
    assembler: Arc<dyn Assembler>,
) -> Outcome {
    let mut artifacts: Vec<ArtifactRef> = Vec::with_capacity(job.plan.len());

    for segment in job.plan.iter().copied() {
        if job.abort_requested() {
            return Err(JobError::Cancelled);
        }

        let p = Arc::clone(&producer);
        let produced = off_thread(move || p.produce(&segment)).await;

        // The call was allowed to finish, but its output (success or error)
        // is not kept.
        if job.abort_requested() {
            return Err(JobError::Cancelled);
        }
        let artifact = produced.map_err(|cause| JobError::SegmentProduction {
            index: segment.index,
            cause,
        })?;

        artifacts.push(artifact);
        job.progress.update(artifacts.len());
        tracing::debug!(
            job_id = job.id,
            segment = segment.index,
            kind = segment.kind.as_str(),
            completed = artifacts.len(),
            total = job.plan.len(),
            "segment produced"
        );
    }

    let a = Arc::clone(&assembler);
    let assembled = off_thread(move || a.assemble(&artifacts)).await;

    if job.abort_requested() {
        return Err(JobError::Cancelled);
    }
    assembled.map_err(JobError::Assembly)
}
