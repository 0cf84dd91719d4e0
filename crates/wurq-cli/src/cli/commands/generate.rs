//! `wurq generate` – run one generation job and poll it to completion.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use wurq_core::config::WurqConfig;
use wurq_core::producer::{ManifestAssembler, PlaceholderProducer, RetryPolicy, Retrying};
use wurq_core::{JobRegistry, JobRunner, ProgressSnapshot, WorkoutTiming};

/// Name of the concat list written into the output directory.
const MANIFEST_NAME: &str = "workout.txt";

fn progress_line(snap: &ProgressSnapshot) -> String {
    format!(
        "\r  {:>3}%  ({}/{} segments)  {}  ",
        snap.percentage(),
        snap.completed,
        snap.total,
        snap.state
    )
}

fn build_registry(cfg: &WurqConfig, output_dir: &Path) -> JobRegistry {
    let delay = Duration::from_millis(cfg.segment_delay_ms.unwrap_or(0));
    let producer = PlaceholderProducer::new(output_dir.join("segments")).with_delay(delay);
    let assembler = ManifestAssembler::new(output_dir.join(MANIFEST_NAME));
    let runner = match &cfg.retry {
        Some(retry) => JobRunner::from_config(
            cfg,
            Retrying::new(producer, RetryPolicy::from(retry)),
            assembler,
        ),
        None => JobRunner::from_config(cfg, producer, assembler),
    };
    JobRegistry::new(runner)
}

pub async fn run_generate(cfg: &WurqConfig, timing: &WorkoutTiming, output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir: {}", output_dir.display()))?;

    let registry = Arc::new(build_registry(cfg, output_dir));
    let id = registry.start(timing)?;
    let plan_len = registry.progress(id)?.total;
    println!("Started job {id}: {plan_len} segments -> {}", output_dir.display());

    let ctrl_c = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let n = registry.cancel_all();
                tracing::info!("interrupt: cancelling {} job(s)", n);
            }
        })
    };

    let interval = Duration::from_millis(cfg.poll_interval_ms.max(10));
    let mut last_pct = None;
    loop {
        let snap = registry.progress(id)?;
        if last_pct != Some(snap.percentage()) || snap.is_terminal() {
            print!("{}", progress_line(&snap));
            let _ = std::io::stdout().flush();
            last_pct = Some(snap.percentage());
        }
        if snap.is_terminal() {
            break;
        }
        tokio::time::sleep(interval).await;
    }
    println!();
    ctrl_c.abort();

    match registry.result(id) {
        Ok(artifact) => {
            println!("Workout ready: {artifact}");
            Ok(())
        }
        Err(e) => anyhow::bail!("job {id} failed ({}): {e}", e.kind()),
    }
}
