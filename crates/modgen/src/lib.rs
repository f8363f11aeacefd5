//! # modgen
//!
//! Explicit module descriptors for archives loaded as automatic modules.
//!
//! An automatic module has no declared boundaries: it reads every module and
//! exports every package. This crate infers what an explicit descriptor for
//! such an archive should say, from two dependency passes run by an external
//! class scanner:
//!
//! - an **API-only** pass, whose targets become `requires public`;
//! - a **full** pass, whose remaining targets become plain `requires`.
//!
//! Every package the archive contains is exported and its declared service
//! bindings are carried over. A module with any unresolved reference is not
//! converted.
//!
//! ## Architecture
//!
//! ```text
//!  paths ──► admission ──► WorkingTable (Pending)
//!                              │
//!             scan_api_only ──►│ PublicRequires
//!             scan_full ──────►│ DependencyResult
//!                              ▼
//!                   classify + synthesize (per module)
//!                              │
//!                              ▼
//!            WorkingTable (Synthesized | Missing) ──► emit ──► RunReport
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use modgen::{BuilderOptions, ModuleInfoBuilder, ScanSnapshot};
//! use std::path::{Path, PathBuf};
//!
//! # fn main() -> modgen::Result<()> {
//! let mut snapshot = ScanSnapshot::from_path(Path::new("scan.json"))?;
//! let finder = snapshot.clone();
//!
//! let builder = ModuleInfoBuilder::new(
//!     BuilderOptions::default(),
//!     &finder,
//!     &mut snapshot,
//!     &[PathBuf::from("libs")],
//! )?;
//! let output = builder.run()?;
//!
//! for outcome in output.report().outcomes() {
//!     println!("{}: {:?}", outcome.module, outcome.outcome);
//! }
//! # Ok(())
//! # }
//! ```

mod admission;
pub mod archive;
pub mod archive_id;
pub mod builder;
pub mod descriptor;
pub mod emit;
pub mod public_deps;
pub mod reference;
pub mod report;
pub mod scanner;
pub mod snapshot;
pub mod synthesis;
pub mod table;

pub use archive::{CodeArchive, CodeArchiveBuilder, Module, automatic_module_name};
pub use archive_id::{ArchiveId, ArchiveIdError};
pub use builder::{BuilderOptions, ModuleInfoBuilder, ModuleInfoOutput};
pub use descriptor::{DescriptorBuilder, Exports, ModuleDescriptor, Provides, Requires};
pub use emit::{
    DEFAULT_BASE_MODULE, DEFAULT_FILE_NAME, EmitOptions, output_path, render_module_info,
    write_module_info,
};
pub use public_deps::PublicRequires;
pub use reference::{
    Dependence, DependencyResult, Reference, ReferenceVisitor, Target, TraceCollector, Verbosity,
};
pub use report::{ModuleOutcome, Outcome, RunReport};
pub use scanner::{DependencyScanner, ModuleFinder};
pub use snapshot::{ArchiveRecord, ScanSnapshot};
pub use synthesis::{classify, synthesize, to_explicit_module};
pub use table::{Conversion, Entry, WorkingTable};

use std::path::PathBuf;

/// Error types for modgen operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Empty input, duplicate module names or underivable names.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An input archive already declares its module boundaries.
    #[error("{} is a modular JAR file and cannot be converted", .path.display())]
    NotAutomaticModule { path: PathBuf },

    /// A module references classes that no module provides.
    #[error("Missing dependence: {module} requires {}", .targets.join(", "))]
    MissingDependency { module: String, targets: Vec<String> },

    /// A synthesis bug, e.g. a qualified export on a synthesized descriptor.
    #[error("Internal error: {0}")]
    InternalInvariantViolation(String),

    /// I/O error on a specific path.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed scan snapshot.
    #[error("Invalid scan snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error(transparent)]
    ArchiveId(#[from] ArchiveIdError),
}

/// Result type alias for modgen operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
