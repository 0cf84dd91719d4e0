//! Timing parameters supplied by the caller.

use serde::{Deserialize, Serialize};

/// Sets performed at each station unless the caller overrides it.
pub const DEFAULT_SETS_PER_STATION: i64 = 3;

/// Raw timing inputs for one workout.
///
/// Fields are signed so that non-positive input can be represented and
/// rejected by [`compute_plan`](super::compute_plan) instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutTiming {
    /// Length of one work interval in seconds.
    pub work_seconds: i64,
    /// Rest between sets of the same station in seconds.
    pub rest_seconds: i64,
    /// Transition time when moving to the next station in seconds.
    pub station_change_seconds: i64,
    /// Total workout length in minutes.
    pub total_duration_minutes: i64,
    /// Sets per station (3 unless overridden).
    #[serde(default = "default_sets")]
    pub sets_per_station: i64,
}

fn default_sets() -> i64 {
    DEFAULT_SETS_PER_STATION
}

impl WorkoutTiming {
    pub fn new(
        work_seconds: i64,
        rest_seconds: i64,
        station_change_seconds: i64,
        total_duration_minutes: i64,
    ) -> Self {
        Self {
            work_seconds,
            rest_seconds,
            station_change_seconds,
            total_duration_minutes,
            sets_per_station: DEFAULT_SETS_PER_STATION,
        }
    }

    /// Override the number of sets per station.
    pub fn with_sets(mut self, sets_per_station: i64) -> Self {
        self.sets_per_station = sets_per_station;
        self
    }
}
