//! Frontend components
//!
//! This module contains the CLI and configuration components that form the
//! user-facing interface of typechain.

pub mod cli;
pub mod config;

pub use cli::{main as cli_main, parse_args, Cli, CliConfig};
pub use config::Config;
