//! Command-line interface for modgen.
//!
//! - [`cli`] - argument definitions (clap derive)
//! - [`commands`] - `generate` and `init`
//! - [`error`] - CLI error type and its miette rendering
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - colored status messages

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
