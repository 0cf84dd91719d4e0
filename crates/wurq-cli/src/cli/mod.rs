//! CLI for the wurq workout generator.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wurq_core::config::{self, WurqConfig};
use wurq_core::WorkoutTiming;

use commands::{run_generate, run_plan, run_show_config};

/// Top-level CLI for the wurq workout generator.
#[derive(Debug, Parser)]
#[command(name = "wurq")]
#[command(about = "wurq: interval workout video generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Timing flags shared by `plan` and `generate`.
#[derive(Debug, Clone, Args)]
pub struct TimingArgs {
    /// Work interval length in seconds.
    #[arg(long, value_name = "SECS")]
    pub work: i64,
    /// Rest between sets in seconds.
    #[arg(long, value_name = "SECS", default_value = "0")]
    pub rest: i64,
    /// Station change time in seconds.
    #[arg(long, value_name = "SECS", default_value = "0")]
    pub station_change: i64,
    /// Total workout duration in minutes.
    #[arg(long, value_name = "MINUTES")]
    pub duration: i64,
    /// Sets per station (defaults to the config value, normally 3).
    #[arg(long, value_name = "N")]
    pub sets: Option<i64>,
}

impl TimingArgs {
    pub fn to_timing(&self, cfg: &WurqConfig) -> WorkoutTiming {
        WorkoutTiming::new(self.work, self.rest, self.station_change, self.duration)
            .with_sets(self.sets.unwrap_or(cfg.sets_per_station))
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show how a timing splits into stations and segments.
    Plan {
        #[command(flatten)]
        timing: TimingArgs,
        /// List every segment, not just the summary.
        #[arg(long)]
        segments: bool,
    },

    /// Generate a workout: produce every segment and assemble the result.
    Generate {
        #[command(flatten)]
        timing: TimingArgs,
        /// Directory for segments and the final list (default: config output_dir or cwd).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Print the config file path and effective values.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Plan { timing, segments } => run_plan(&cfg, &timing.to_timing(&cfg), segments)?,
            CliCommand::Generate { timing, output_dir } => {
                let output_dir = match output_dir.or_else(|| cfg.output_dir.clone()) {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_generate(&cfg, &timing.to_timing(&cfg), &output_dir).await?;
            }
            CliCommand::Config => run_show_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
