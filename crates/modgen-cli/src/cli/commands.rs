//! Subcommands and their arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use modgen_config::ConfigOverrides;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write module-info.java for every convertible archive
    Generate(GenerateArgs),

    /// Write a modgen.toml with the default settings
    Init(InitArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Archives (or directories of archives) to convert
    #[arg(required = true, value_name = "ARCHIVE")]
    pub archives: Vec<PathBuf>,

    /// Recorded dependency scan (JSON)
    #[arg(long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Root directory for the generated module directories
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Module required implicitly by every module
    #[arg(long, value_name = "NAME")]
    pub base_module: Option<String>,

    /// Print the unresolved references of modules that are not generated
    #[arg(long)]
    pub trace_missing: bool,

    /// Config file to use instead of ./modgen.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    /// Settings given on the command line, layered over file and environment.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            output_dir: self.output_dir.clone(),
            base_module: self.base_module.clone(),
            trace_missing: self.trace_missing.then_some(true),
        }
    }
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write modgen.toml into
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing modgen.toml
    #[arg(long)]
    pub force: bool,
}
