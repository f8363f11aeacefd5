//! Canonical `module-info.java` rendering and output.
//!
//! Output is byte-for-byte deterministic for a given descriptor: requires,
//! exports, services and providers are each sorted by name before rendering.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{Error, Exports, ModuleDescriptor, Provides, Requires, Result};

/// Module required implicitly by every module; never rendered.
pub const DEFAULT_BASE_MODULE: &str = "java.base";

/// File written inside each module's output directory.
pub const DEFAULT_FILE_NAME: &str = "module-info.java";

/// Rendering and output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub base_module: String,
    pub file_name: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            base_module: DEFAULT_BASE_MODULE.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// Path of the descriptor source for `module_name` under `out_dir`.
pub fn output_path(out_dir: &Path, module_name: &str, options: &EmitOptions) -> PathBuf {
    out_dir.join(module_name).join(&options.file_name)
}

/// Render `descriptor` as canonical module declaration text.
///
/// Fails with [`Error::InternalInvariantViolation`] if the descriptor carries a
/// qualified export.
pub fn render_module_info(descriptor: &ModuleDescriptor, options: &EmitOptions) -> Result<String> {
    if let Some(export) = descriptor.exports().iter().find(|e| e.is_qualified()) {
        return Err(Error::InternalInvariantViolation(format!(
            "{} qualified exports: {}",
            descriptor.name(),
            export
        )));
    }

    let mut out = format!("module {} {{\n", descriptor.name());

    let mut requires: Vec<&Requires> = descriptor
        .requires()
        .iter()
        .filter(|req| req.name != options.base_module)
        .collect();
    requires.sort_by(|a, b| a.name.cmp(&b.name));
    for req in requires {
        out.push_str(&format!("    requires {req};\n"));
    }

    let mut exports: Vec<&Exports> = descriptor.exports().iter().collect();
    exports.sort_by(|a, b| a.source.cmp(&b.source));
    for export in exports {
        out.push_str(&format!("    exports {};\n", export.source));
    }

    let mut provides: Vec<&Provides> = descriptor.provides().collect();
    provides.sort_by(|a, b| a.service.cmp(&b.service));
    for binding in provides {
        let mut providers: Vec<&String> = binding.providers.iter().collect();
        providers.sort();
        for provider in providers {
            out.push_str(&format!(
                "    provides {} with {};\n",
                binding.service, provider
            ));
        }
    }

    out.push_str("}\n");
    Ok(out)
}

/// Render and write `descriptor` to `<out_dir>/<name>/<file_name>`.
///
/// The module directory is created when absent; an existing directory is not
/// an error.
pub fn write_module_info(
    out_dir: &Path,
    descriptor: &ModuleDescriptor,
    options: &EmitOptions,
) -> Result<PathBuf> {
    let text = render_module_info(descriptor, options)?;
    let file = output_path(out_dir, descriptor.name(), options);

    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&file, text).map_err(|source| Error::Io {
        path: file.clone(),
        source,
    })?;

    info!(module = descriptor.name(), path = %file.display(), "wrote module descriptor");
    Ok(file)
}
