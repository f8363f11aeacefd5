//! Input admission: load candidate archives and validate them.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap as HashMap;
use tracing::debug;

use super::{Error, ModuleFinder, Result, WorkingTable};

/// Load `paths` and build the working table of automatic modules.
///
/// Fails before any analysis when a loaded module already declares its
/// boundaries, when nothing was loaded, or when two archives claim the same
/// module name.
pub(crate) fn admit(finder: &dyn ModuleFinder, paths: &[PathBuf]) -> Result<WorkingTable> {
    let modules = finder.load_all(paths)?;

    if let Some(explicit) = modules.iter().find(|module| !module.is_automatic()) {
        return Err(Error::NotAutomaticModule {
            path: explicit.path().to_path_buf(),
        });
    }

    if modules.is_empty() {
        let args: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        return Err(Error::InvalidInput(format!(
            "no archives found in [{}]",
            args.join(", ")
        )));
    }

    let mut by_name: HashMap<&str, &Path> = HashMap::default();
    for module in &modules {
        let path = module.path();
        if let Some(previous) = by_name.insert(module.name(), path) {
            return Err(Error::InvalidInput(format!(
                "module {} is defined by both {} and {}",
                module.name(),
                previous.display(),
                path.display()
            )));
        }
    }

    debug!(count = modules.len(), "admitted automatic modules");
    Ok(WorkingTable::from_modules(modules))
}
