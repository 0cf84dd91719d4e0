//! `wurq plan` – print the station/segment breakdown for a timing.

use anyhow::Result;
use wurq_core::config::WurqConfig;
use wurq_core::{compute_plan, SegmentPlan, WorkoutTiming};

/// `mm:ss` for a duration in seconds.
pub(crate) fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub(crate) fn summary(plan: &SegmentPlan) -> String {
    format!(
        "{} station(s) x {} set(s) = {} segments, about {} of video",
        plan.stations(),
        plan.sets_per_station(),
        plan.len(),
        format_clock(plan.estimated_duration_secs())
    )
}

/// Plan `timing` under the same limits `generate` would enforce.
pub(crate) fn checked_plan(cfg: &WurqConfig, timing: &WorkoutTiming) -> Result<SegmentPlan> {
    if let Some(limits) = &cfg.limits {
        limits.check(timing)?;
    }
    Ok(compute_plan(timing)?)
}

pub fn run_plan(cfg: &WurqConfig, timing: &WorkoutTiming, list_segments: bool) -> Result<()> {
    let plan = checked_plan(cfg, timing)?;
    println!("{}", summary(&plan));

    if list_segments {
        println!(
            "{:<6} {:<6} {:<8} {:<4} {}",
            "INDEX", "KIND", "STATION", "SET", "SECS"
        );
        for seg in &plan {
            let kind = if seg.is_station_change(plan.sets_per_station()) {
                "change"
            } else {
                seg.kind.as_str()
            };
            println!(
                "{:<6} {:<6} {:<8} {:<4} {}",
                seg.index,
                kind,
                seg.station_index + 1,
                seg.set_index + 1,
                seg.duration_secs
            );
        }
    }
    Ok(())
}
