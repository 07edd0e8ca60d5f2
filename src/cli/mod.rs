//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod config;
mod logging;

pub use commands::{ListTarget, run_env_create, run_list, run_watch};
pub use config::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
