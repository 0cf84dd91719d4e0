//! Starts jobs: validates timing, plans, and spawns the background task.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::WurqConfig;
use crate::control::JobControl;
use crate::error::JobError;
use crate::plan::{compute_plan, TimingLimits, WorkoutTiming};
use crate::producer::{Assembler, SegmentProducer};

use super::budget::ActiveJobBudget;
use super::execute::{execute_job, JobGuard};
use super::handle::{JobHandle, JobShared};
use super::JobId;

/// Shared entry point for starting jobs with one producer/assembler pair.
#[derive(Clone)]
pub struct JobRunner {
    producer: Arc<dyn SegmentProducer>,
    assembler: Arc<dyn Assembler>,
    limits: TimingLimits,
    budget: Option<Arc<ActiveJobBudget>>,
    control: Option<Arc<JobControl>>,
    /// Shared by clones so ids never repeat within one runner's control.
    next_id: Arc<AtomicU64>,
}

impl JobRunner {
    pub fn new<P, A>(producer: P, assembler: A) -> Self
    where
        P: SegmentProducer + 'static,
        A: Assembler + 'static,
    {
        Self {
            producer: Arc::new(producer),
            assembler: Arc::new(assembler),
            limits: TimingLimits::default(),
            budget: None,
            control: None,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Runner with the config's input limits and active-job cap applied.
    pub fn from_config<P, A>(cfg: &WurqConfig, producer: P, assembler: A) -> Self
    where
        P: SegmentProducer + 'static,
        A: Assembler + 'static,
    {
        let runner = Self::new(producer, assembler).with_job_limit(cfg.max_active_jobs);
        match &cfg.limits {
            Some(limits) => runner.with_limits(limits.clone()),
            None => runner,
        }
    }

    pub fn with_limits(mut self, limits: TimingLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Reject starts once `max_active` jobs are unresolved.
    pub fn with_job_limit(mut self, max_active: usize) -> Self {
        self.budget = Some(Arc::new(ActiveJobBudget::new(max_active)));
        self
    }

    /// Register every started job's abort token with `control`.
    pub fn with_control(mut self, control: Arc<JobControl>) -> Self {
        self.control = Some(control);
        self
    }

    pub fn control(&self) -> Option<&Arc<JobControl>> {
        self.control.as_ref()
    }

    pub fn budget(&self) -> Option<&Arc<ActiveJobBudget>> {
        self.budget.as_ref()
    }

    /// Validate `timing`, build its plan, and spawn the job on the current
    /// Tokio runtime under a fresh id. Returns immediately; invalid timing is
    /// reported here and no job is created.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(&self, timing: &WorkoutTiming) -> Result<JobHandle, JobError> {
        self.limits.check(timing)?;
        let plan = Arc::new(compute_plan(timing)?);
        let id: JobId = self.next_id.fetch_add(1, Ordering::Relaxed);

        if let Some(budget) = &self.budget {
            if !budget.try_reserve() {
                tracing::warn!(job_id = id, limit = budget.max_active(), "job rejected: too many active jobs");
                return Err(JobError::TooManyJobs {
                    limit: budget.max_active(),
                });
            }
        }

        let abort = match &self.control {
            Some(control) => control.register(id),
            None => Arc::new(AtomicBool::new(false)),
        };
        let shared = Arc::new(JobShared::new(id, Arc::clone(&plan), abort));
        let guard = JobGuard {
            job: Arc::clone(&shared),
            budget: self.budget.clone(),
            control: self.control.clone(),
        };

        tracing::info!(
            job_id = id,
            stations = plan.stations(),
            segments = plan.len(),
            estimated_secs = plan.estimated_duration_secs(),
            "job started"
        );
        tokio::spawn(execute_job(
            guard,
            Arc::clone(&self.producer),
            Arc::clone(&self.assembler),
        ));

        Ok(JobHandle::new(shared))
    }
}
