//! Configuration for modgen.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. built-in defaults ([`ModgenConfig::default`]);
//! 2. `modgen.toml` in the working directory, or an explicit file;
//! 3. `MODGEN_*` environment variables (`MODGEN_OUTPUT_DIR`, ...);
//! 4. command-line overrides ([`ConfigOverrides`]).

pub mod config;
pub mod discovery;
pub mod error;

pub use config::{ConfigOverrides, ModgenConfig};
pub use discovery::{CONFIG_FILE_NAME, ConfigDiscovery, ENV_PREFIX};
pub use error::{ConfigError, Result};
