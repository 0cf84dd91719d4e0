//! Workout plan calculation.
//!
//! Turns timing parameters into an ordered sequence of work/rest segments.
//! The plan is computed once per job and is the only source of truth for
//! progress totals.

mod calc;
mod limits;
mod segment;
mod timing;

pub use calc::{compute_plan, PlanError, MAX_PLAN_SEGMENTS};
pub use limits::{RangeLimit, TimingLimits};
pub use segment::{Segment, SegmentKind, SegmentPlan};
pub use timing::{WorkoutTiming, DEFAULT_SETS_PER_STATION};
