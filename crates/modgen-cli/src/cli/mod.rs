//! Command-line interface definition.
//!
//! - `modgen generate` - synthesize `module-info.java` for automatic modules
//! - `modgen init` - write a default `modgen.toml`

mod commands;

use clap::Parser;

pub use commands::{Command, GenerateArgs, InitArgs};

/// Generate explicit module descriptors for automatic modules
#[derive(Parser, Debug)]
#[command(
    name = "modgen",
    version,
    about = "Generate module-info.java for automatic modules",
    long_about = "modgen reads a recorded dependency scan of a set of archives and writes\n\
                  an explicit module-info.java for every archive that can be converted\n\
                  from an automatic module."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
