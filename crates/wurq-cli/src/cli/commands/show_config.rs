//! `wurq config` – show where the config lives and what it contains.

use anyhow::Result;
use wurq_core::config::{self, WurqConfig};

pub fn run_show_config(cfg: &WurqConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
