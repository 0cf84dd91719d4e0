//! Retry and backoff for segment producers.
//!
//! The job runner is fail-fast; retrying belongs to the producer. Wrap a
//! producer in [`Retrying`] to retry transient failures with exponential
//! backoff before the runner ever sees them.

use std::time::Duration;

use crate::config::RetryConfig;
use crate::plan::Segment;

use super::{ArtifactRef, ProducerError, SegmentProducer};

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Exponential backoff policy with caps.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Base delay for backoff.
    pub base_delay: Duration,
    /// Upper bound on backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        let max_delay = Duration::from_secs(cfg.max_delay_secs);
        // Out-of-range floats (inf, huge values) fall back to the cap.
        let base_delay = Duration::try_from_secs_f64(cfg.base_delay_secs.max(0.0))
            .unwrap_or(max_delay)
            .min(max_delay);
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }
}

impl RetryPolicy {
    /// `attempt` is 1-based (1 = first attempt).
    pub fn decide(&self, attempt: u32, err: &ProducerError) -> RetryDecision {
        if attempt >= self.max_attempts || !err.is_retryable() {
            return RetryDecision::NoRetry;
        }
        // base * 2^(attempt-1), capped.
        let exp = 1u32 << attempt.saturating_sub(1).min(8);
        let delay = self.base_delay.saturating_mul(exp).min(self.max_delay);
        RetryDecision::RetryAfter(delay)
    }
}

/// Runs a closure until it succeeds or the retry policy says to stop.
/// Sleeps the calling thread between attempts; call from blocking context.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut f: F) -> Result<T, ProducerError>
where
    F: FnMut() -> Result<T, ProducerError>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(attempt, &e) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(d) => {
                    tracing::debug!(attempt, delay_ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX), "retrying: {}", e);
                    std::thread::sleep(d);
                    attempt += 1;
                }
            },
        }
    }
}

/// Producer wrapper that retries transient failures.
pub struct Retrying<P> {
    inner: P,
    policy: RetryPolicy,
}

impl<P> Retrying<P> {
    pub fn new(inner: P, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<P: SegmentProducer> SegmentProducer for Retrying<P> {
    fn produce(&self, segment: &Segment) -> Result<ArtifactRef, ProducerError> {
        run_with_retry(&self.policy, || self.inner.produce(segment))
    }
}
