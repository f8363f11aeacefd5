//! The resolved configuration and its command-line overrides.

use std::path::PathBuf;

use modgen::{BuilderOptions, DEFAULT_BASE_MODULE, DEFAULT_FILE_NAME, EmitOptions};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Fully resolved modgen settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModgenConfig {
    /// Root of the per-module output directories.
    pub output_dir: PathBuf,

    /// Module every module requires implicitly; omitted from the output.
    pub base_module: String,

    /// Name of the file written in each module directory.
    pub file_name: String,

    /// Print the unresolved references of modules that are not generated.
    pub trace_missing: bool,
}

impl Default for ModgenConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            base_module: DEFAULT_BASE_MODULE.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            trace_missing: false,
        }
    }
}

impl ModgenConfig {
    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.base_module.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "base_module must not be empty".to_string(),
            ));
        }
        if self.file_name.is_empty() || self.file_name.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue(format!(
                "file_name must be a plain file name, got {:?}",
                self.file_name
            )));
        }
        Ok(())
    }

    /// Render as a `modgen.toml` document.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            base_module: self.base_module.clone(),
            file_name: self.file_name.clone(),
        }
    }

    pub fn builder_options(&self) -> BuilderOptions {
        BuilderOptions {
            output_dir: self.output_dir.clone(),
            emit: self.emit_options(),
            trace_missing: self.trace_missing,
        }
    }
}

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_missing: Option<bool>,
}
