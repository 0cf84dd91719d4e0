//! CLI command handlers, one per file.

mod generate;
mod plan;
mod show_config;

pub use generate::run_generate;
pub use plan::run_plan;
pub use show_config::run_show_config;
