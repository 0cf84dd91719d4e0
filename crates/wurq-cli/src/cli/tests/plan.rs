//! Tests for the plan and config subcommands.

use super::parse;
use crate::cli::CliCommand;
use clap::Parser;
use wurq_core::config::WurqConfig;

#[test]
fn cli_parse_plan() {
    match parse(&[
        "wurq", "plan", "--work", "40", "--rest", "20", "--station-change", "10", "--duration", "20",
    ]) {
        CliCommand::Plan { timing, segments } => {
            assert_eq!(timing.work, 40);
            assert_eq!(timing.rest, 20);
            assert_eq!(timing.station_change, 10);
            assert_eq!(timing.duration, 20);
            assert!(timing.sets.is_none());
            assert!(!segments);
        }
        _ => panic!("expected Plan"),
    }
}

#[test]
fn cli_parse_plan_defaults_rest_and_change_to_zero() {
    match parse(&["wurq", "plan", "--work", "30", "--duration", "5", "--segments"]) {
        CliCommand::Plan { timing, segments } => {
            assert_eq!(timing.rest, 0);
            assert_eq!(timing.station_change, 0);
            assert!(segments);
        }
        _ => panic!("expected Plan with --segments"),
    }
}

#[test]
fn cli_plan_sets_fall_back_to_config() {
    let mut cfg = WurqConfig::default();
    cfg.sets_per_station = 5;
    match parse(&["wurq", "plan", "--work", "30", "--duration", "5"]) {
        CliCommand::Plan { timing, .. } => assert_eq!(timing.to_timing(&cfg).sets_per_station, 5),
        _ => panic!("expected Plan"),
    }
    match parse(&["wurq", "plan", "--work", "30", "--duration", "5", "--sets", "2"]) {
        CliCommand::Plan { timing, .. } => assert_eq!(timing.to_timing(&cfg).sets_per_station, 2),
        _ => panic!("expected Plan with --sets"),
    }
}

#[test]
fn cli_parse_plan_requires_work_and_duration() {
    assert!(crate::cli::Cli::try_parse_from(["wurq", "plan", "--work", "30"]).is_err());
    assert!(crate::cli::Cli::try_parse_from(["wurq", "plan", "--duration", "5"]).is_err());
}

#[test]
fn cli_parse_config() {
    match parse(&["wurq", "config"]) {
        CliCommand::Config => {}
        _ => panic!("expected Config"),
    }
}
