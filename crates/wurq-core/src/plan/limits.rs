//! Optional input bounds (the `[limits]` config section).
//!
//! The plan math only needs positive values; these bounds keep requests
//! inside what a rendered workout can sensibly show.

use serde::{Deserialize, Serialize};

use super::calc::PlanError;
use super::timing::WorkoutTiming;

/// Inclusive `[min, max]` bound for one timing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeLimit {
    pub min: i64,
    pub max: i64,
}

impl RangeLimit {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    fn check(&self, field: &'static str, value: i64) -> Result<(), PlanError> {
        if value < self.min || value > self.max {
            return Err(PlanError::OutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Per-field bounds; a missing field is unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingLimits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_seconds: Option<RangeLimit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<RangeLimit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_change_seconds: Option<RangeLimit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration_minutes: Option<RangeLimit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets_per_station: Option<RangeLimit>,
}

impl TimingLimits {
    /// Bounds used by the desktop generator: work 10-300s, rest 5-120s,
    /// station change 5-60s, 5-180 minutes, 1-10 sets.
    pub fn recommended() -> Self {
        Self {
            work_seconds: Some(RangeLimit::new(10, 300)),
            rest_seconds: Some(RangeLimit::new(5, 120)),
            station_change_seconds: Some(RangeLimit::new(5, 60)),
            total_duration_minutes: Some(RangeLimit::new(5, 180)),
            sets_per_station: Some(RangeLimit::new(1, 10)),
        }
    }

    /// Returns the first field that falls outside its bound.
    pub fn check(&self, t: &WorkoutTiming) -> Result<(), PlanError> {
        let fields = [
            ("work_seconds", self.work_seconds, t.work_seconds),
            ("rest_seconds", self.rest_seconds, t.rest_seconds),
            (
                "station_change_seconds",
                self.station_change_seconds,
                t.station_change_seconds,
            ),
            (
                "total_duration_minutes",
                self.total_duration_minutes,
                t.total_duration_minutes,
            ),
            ("sets_per_station", self.sets_per_station, t.sets_per_station),
        ];
        for (field, limit, value) in fields {
            if let Some(limit) = limit {
                limit.check(field, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_accept_anything() {
        let limits = TimingLimits::default();
        assert!(limits.check(&WorkoutTiming::new(1, 0, 0, 1000)).is_ok());
    }

    #[test]
    fn recommended_limits_reject_short_work() {
        let limits = TimingLimits::recommended();
        assert!(limits.check(&WorkoutTiming::new(40, 20, 10, 20)).is_ok());
        assert_eq!(
            limits.check(&WorkoutTiming::new(5, 20, 10, 20)),
            Err(PlanError::OutOfRange {
                field: "work_seconds",
                value: 5,
                min: 10,
                max: 300
            })
        );
    }

    #[test]
    fn limits_cover_sets() {
        let limits = TimingLimits::recommended();
        let err = limits
            .check(&WorkoutTiming::new(40, 20, 10, 20).with_sets(12))
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::OutOfRange {
                field: "sets_per_station",
                ..
            }
        ));
    }
}
