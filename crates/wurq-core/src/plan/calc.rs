//! Station-count math and plan construction.

use thiserror::Error;

use super::segment::{Segment, SegmentKind, SegmentPlan};
use super::timing::WorkoutTiming;

/// Upper bound on plan length; larger plans are rejected as invalid timing.
pub const MAX_PLAN_SEGMENTS: usize = 100_000;

/// Why a timing configuration cannot produce a plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: i64 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: i64 },
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("station cycle length must be positive (got {0}s)")]
    EmptyCycle(i64),
    #[error("no station fits: one station cycle takes {cycle_secs}s but the workout is {total_secs}s")]
    NoStationFits { cycle_secs: i64, total_secs: i64 },
    #[error("plan would need {count} segments (max {max})")]
    TooManySegments { count: i64, max: usize },
    #[error("timing values overflow")]
    Overflow,
}

fn positive(field: &'static str, value: i64) -> Result<(), PlanError> {
    if value <= 0 {
        return Err(PlanError::NonPositive { field, value });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: i64) -> Result<(), PlanError> {
    if value < 0 {
        return Err(PlanError::Negative { field, value });
    }
    Ok(())
}

/// Length of one station in seconds: all work sets, the rests between them,
/// and the station change.
fn station_cycle_secs(t: &WorkoutTiming) -> Result<i64, PlanError> {
    let work = t
        .work_seconds
        .checked_mul(t.sets_per_station)
        .ok_or(PlanError::Overflow)?;
    let rest = t
        .rest_seconds
        .checked_mul(t.sets_per_station - 1)
        .ok_or(PlanError::Overflow)?;
    work.checked_add(rest)
        .and_then(|v| v.checked_add(t.station_change_seconds))
        .ok_or(PlanError::Overflow)
}

/// Builds the segment plan for `timing`.
///
/// `stations = floor(total_minutes * 60 / cycle)` where
/// `cycle = work * sets + rest * (sets - 1) + station_change`. Each set yields
/// one Work and one Rest segment; the Rest closing a station lasts
/// `station_change_seconds` instead of `rest_seconds`.
pub fn compute_plan(timing: &WorkoutTiming) -> Result<SegmentPlan, PlanError> {
    positive("work_seconds", timing.work_seconds)?;
    positive("total_duration_minutes", timing.total_duration_minutes)?;
    positive("sets_per_station", timing.sets_per_station)?;
    non_negative("rest_seconds", timing.rest_seconds)?;
    non_negative("station_change_seconds", timing.station_change_seconds)?;

    let cycle_secs = station_cycle_secs(timing)?;
    if cycle_secs <= 0 {
        return Err(PlanError::EmptyCycle(cycle_secs));
    }

    let total_secs = timing
        .total_duration_minutes
        .checked_mul(60)
        .ok_or(PlanError::Overflow)?;
    let stations = total_secs / cycle_secs;
    if stations < 1 {
        return Err(PlanError::NoStationFits {
            cycle_secs,
            total_secs,
        });
    }

    let count = stations
        .checked_mul(timing.sets_per_station)
        .and_then(|v| v.checked_mul(2))
        .ok_or(PlanError::Overflow)?;
    if count > MAX_PLAN_SEGMENTS as i64 {
        return Err(PlanError::TooManySegments {
            count,
            max: MAX_PLAN_SEGMENTS,
        });
    }

    // All values below are bounded by MAX_PLAN_SEGMENTS or were checked positive.
    let stations = stations as usize;
    let sets = timing.sets_per_station as usize;
    let work_secs = timing.work_seconds as u64;
    let rest_secs = timing.rest_seconds as u64;
    let change_secs = timing.station_change_seconds as u64;

    let mut segments = Vec::with_capacity(count as usize);
    for station_index in 0..stations {
        for set_index in 0..sets {
            segments.push(Segment {
                index: segments.len(),
                kind: SegmentKind::Work,
                station_index,
                set_index,
                duration_secs: work_secs,
            });
            let closes_station = set_index + 1 == sets;
            segments.push(Segment {
                index: segments.len(),
                kind: SegmentKind::Rest,
                station_index,
                set_index,
                duration_secs: if closes_station { change_secs } else { rest_secs },
            });
        }
    }

    tracing::debug!(
        stations,
        sets_per_station = sets,
        segments = segments.len(),
        cycle_secs,
        "computed workout plan"
    );

    Ok(SegmentPlan::new(segments, stations, sets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_timing_yields_seven_stations() {
        let plan = compute_plan(&WorkoutTiming::new(40, 20, 10, 20)).unwrap();
        // cycle = 40*3 + 20*2 + 10 = 170; 1200 / 170 = 7
        assert_eq!(plan.stations(), 7);
        assert_eq!(plan.sets_per_station(), 3);
        assert_eq!(plan.len(), 42);
        assert_eq!(plan.estimated_duration_secs(), 7 * 170);
    }

    #[test]
    fn segments_alternate_work_and_rest() {
        let plan = compute_plan(&WorkoutTiming::new(40, 20, 10, 20)).unwrap();
        for (i, seg) in plan.iter().enumerate() {
            assert_eq!(seg.index, i);
            let expected = if i % 2 == 0 {
                SegmentKind::Work
            } else {
                SegmentKind::Rest
            };
            assert_eq!(seg.kind, expected);
            assert_eq!(seg.station_index, i / 6);
            assert_eq!(seg.set_index, (i / 2) % 3);
        }
    }

    #[test]
    fn station_closing_rest_uses_station_change() {
        let plan = compute_plan(&WorkoutTiming::new(40, 20, 10, 20)).unwrap();
        let durations: Vec<u64> = plan.iter().take(6).map(|s| s.duration_secs).collect();
        assert_eq!(durations, vec![40, 20, 40, 20, 40, 10]);
        assert!(plan.get(5).unwrap().is_station_change(3));
        assert!(!plan.get(3).unwrap().is_station_change(3));
    }

    #[test]
    fn duration_too_short_for_one_station() {
        // cycle = 170s, workout = 120s
        let err = compute_plan(&WorkoutTiming::new(40, 20, 10, 2)).unwrap_err();
        assert_eq!(
            err,
            PlanError::NoStationFits {
                cycle_secs: 170,
                total_secs: 120
            }
        );
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert!(matches!(
            compute_plan(&WorkoutTiming::new(0, 20, 10, 20)),
            Err(PlanError::NonPositive {
                field: "work_seconds",
                ..
            })
        ));
        assert!(matches!(
            compute_plan(&WorkoutTiming::new(40, 20, 10, 0)),
            Err(PlanError::NonPositive {
                field: "total_duration_minutes",
                ..
            })
        ));
        assert!(matches!(
            compute_plan(&WorkoutTiming::new(40, 20, 10, 20).with_sets(0)),
            Err(PlanError::NonPositive {
                field: "sets_per_station",
                ..
            })
        ));
        assert!(matches!(
            compute_plan(&WorkoutTiming::new(40, -1, 10, 20)),
            Err(PlanError::Negative {
                field: "rest_seconds",
                ..
            })
        ));
        assert!(matches!(
            compute_plan(&WorkoutTiming::new(40, 20, -5, 20)),
            Err(PlanError::Negative {
                field: "station_change_seconds",
                ..
            })
        ));
    }

    #[test]
    fn zero_rest_and_station_change_are_allowed() {
        let plan = compute_plan(&WorkoutTiming::new(30, 0, 0, 1).with_sets(1)).unwrap();
        // cycle = 30s, 60s workout -> 2 stations
        assert_eq!(plan.stations(), 2);
        assert_eq!(plan.len(), 4);
        assert_eq!(plan.get(1).unwrap().duration_secs, 0);
    }

    #[test]
    fn overflow_is_rejected() {
        let err = compute_plan(&WorkoutTiming::new(i64::MAX, 0, 0, 20)).unwrap_err();
        assert_eq!(err, PlanError::Overflow);
        let err = compute_plan(&WorkoutTiming::new(1, 0, 0, i64::MAX)).unwrap_err();
        assert_eq!(err, PlanError::Overflow);
    }

    #[test]
    fn huge_plans_are_rejected() {
        let err = compute_plan(&WorkoutTiming::new(1, 0, 0, 100_000)).unwrap_err();
        assert!(matches!(err, PlanError::TooManySegments { .. }));
    }

    #[test]
    fn total_steps_formula_holds_across_inputs() {
        for work in [10, 25, 40, 90] {
            for rest in [0, 5, 20] {
                for change in [0, 10, 30] {
                    for minutes in [5, 20, 45] {
                        for sets in [1, 3, 5] {
                            let t = WorkoutTiming::new(work, rest, change, minutes).with_sets(sets);
                            let cycle = work * sets + rest * (sets - 1) + change;
                            match compute_plan(&t) {
                                Ok(plan) => {
                                    assert!(plan.stations() >= 1);
                                    assert_eq!(plan.stations() as i64, minutes * 60 / cycle);
                                    assert_eq!(plan.len(), plan.stations() * sets as usize * 2);
                                }
                                Err(e) => {
                                    assert!(minutes * 60 < cycle, "unexpected {e} for {t:?}");
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
