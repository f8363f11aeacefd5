//! CLI error type and its conversion to miette reports.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] modgen_config::ConfigError),

    #[error(transparent)]
    Modgen(#[from] modgen::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The run finished but not every module was generated.
    #[error("{missing} module(s) not generated, {failed} failed to write")]
    Incomplete { missing: usize, failed: usize },
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Convert a [`CliError`] into a miette report with a hint where one helps.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Modgen(modgen::Error::NotAutomaticModule { path }) => miette::miette!(
            "{} is a modular JAR file and cannot be converted\n\n\
             Hint: only automatic modules can be converted; drop it from the arguments",
            path.display()
        ),
        CliError::Modgen(modgen::Error::Snapshot(e)) => miette::miette!(
            "Invalid scan snapshot: {}\n\nHint: check the JSON written by the scanner",
            e
        ),
        CliError::Incomplete { missing, failed } if failed == 0 => miette::miette!(
            "{} module(s) not generated\n\nHint: rerun with --trace-missing to see the unresolved references",
            missing
        ),
        _ => miette::miette!("{}", err),
    }
}
