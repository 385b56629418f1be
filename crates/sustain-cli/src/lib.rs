//! Sustain CLI library.
//!
//! This library provides the core functionality for the `sustain` command-line
//! interface, including argument parsing, configuration resolution, and
//! output formatting.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
