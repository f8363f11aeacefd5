//! File discovery and layered loading.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use tracing::debug;

use crate::config::{ConfigOverrides, ModgenConfig};
use crate::error::{ConfigError, Result};

/// Conventional config file name, looked up in the root directory.
pub const CONFIG_FILE_NAME: &str = "modgen.toml";

/// Prefix of the environment variables that override file settings.
pub const ENV_PREFIX: &str = "MODGEN_";

/// Settings read from the environment; other `MODGEN_*` variables are ignored.
const ENV_KEYS: [&str; 4] = ["output_dir", "base_module", "file_name", "trace_missing"];

/// Finds and loads modgen configuration for a directory.
///
/// # Example
///
/// ```no_run
/// use modgen_config::{ConfigDiscovery, ConfigOverrides};
///
/// let config = ConfigDiscovery::new(".")
///     .load(None, &ConfigOverrides::default())
///     .unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// `modgen.toml` in the root directory, if present.
    pub fn find(&self) -> Option<PathBuf> {
        let path = self.root.join(CONFIG_FILE_NAME);
        path.is_file().then_some(path)
    }

    /// Build the layered figment without extracting it.
    ///
    /// An explicit `config_path` must exist; the conventional file is
    /// optional.
    pub fn figment(&self, config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(ModgenConfig::default()));

        let file = match config_path {
            Some(path) if !path.is_file() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => self.find(),
        };
        if let Some(path) = file {
            debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment
            .merge(Env::prefixed(ENV_PREFIX).only(&ENV_KEYS))
            .merge(Serialized::defaults(overrides)))
    }

    /// Load, extract and validate the configuration.
    pub fn load(&self, config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<ModgenConfig> {
        let config: ModgenConfig = self
            .figment(config_path, overrides)?
            .extract()
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
