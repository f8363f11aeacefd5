use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{ArchiveId, ModuleDescriptor};

/// A compiled-code archive as loaded from disk.
///
/// Immutable once built; shared through `Arc` by the module that wraps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeArchive {
    pub id: ArchiveId,
    pub name: String,
    /// Packages contained in the archive.
    pub packages: BTreeSet<String>,
    /// Service bindings declared by the archive metadata (service -> providers).
    pub provides: BTreeMap<String, Vec<String>>,
}

impl CodeArchive {
    /// Create a new archive builder with no packages and no services.
    pub fn builder(id: ArchiveId, name: impl Into<String>) -> CodeArchiveBuilder {
        CodeArchiveBuilder {
            archive: Self {
                id,
                name: name.into(),
                packages: BTreeSet::new(),
                provides: BTreeMap::new(),
            },
        }
    }

    pub fn path(&self) -> &Path {
        self.id.as_path()
    }
}

/// Builder for `CodeArchive` to avoid long argument lists in constructors.
pub struct CodeArchiveBuilder {
    archive: CodeArchive,
}

impl CodeArchiveBuilder {
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.archive.packages.insert(package.into());
        self
    }

    pub fn packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.archive
            .packages
            .extend(packages.into_iter().map(Into::into));
        self
    }

    pub fn provides<I, S>(mut self, service: impl Into<String>, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.archive
            .provides
            .entry(service.into())
            .or_default()
            .extend(providers.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> CodeArchive {
        self.archive
    }
}

/// A named unit of code: an archive plus its declared descriptor, if any.
///
/// A module without a declared descriptor is automatic and eligible for
/// conversion. Synthesized descriptors live in the working table; the module
/// itself is never mutated.
#[derive(Debug, Clone)]
pub struct Module {
    archive: Arc<CodeArchive>,
    descriptor: Option<Arc<ModuleDescriptor>>,
}

impl Module {
    /// Wrap an archive as an automatic module.
    pub fn automatic(archive: CodeArchive) -> Self {
        Self {
            archive: Arc::new(archive),
            descriptor: None,
        }
    }

    /// Wrap an archive that already declares its module boundaries.
    pub fn explicit(archive: CodeArchive, descriptor: ModuleDescriptor) -> Self {
        Self {
            archive: Arc::new(archive),
            descriptor: Some(Arc::new(descriptor)),
        }
    }

    pub fn id(&self) -> &ArchiveId {
        &self.archive.id
    }

    pub fn name(&self) -> &str {
        &self.archive.name
    }

    pub fn path(&self) -> &Path {
        self.archive.path()
    }

    pub fn archive(&self) -> &CodeArchive {
        &self.archive
    }

    /// The declared descriptor, `None` for automatic modules.
    pub fn descriptor(&self) -> Option<&ModuleDescriptor> {
        self.descriptor.as_deref()
    }

    pub fn is_automatic(&self) -> bool {
        self.descriptor.is_none()
    }
}

/// Derive an automatic module name from an archive file name.
///
/// Strips the `.jar` extension and a trailing `-<digits>...` version, maps
/// every non-alphanumeric character to `.`, collapses repeated dots and trims
/// dots at both ends. Returns `None` when nothing usable remains.
pub fn automatic_module_name(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(".jar").unwrap_or(file_name);
    let stem = &stem[..version_start(stem).unwrap_or(stem.len())];

    let mut name = String::with_capacity(stem.len());
    for ch in stem.chars() {
        if ch.is_ascii_alphanumeric() {
            name.push(ch);
        } else if !name.is_empty() && !name.ends_with('.') {
            name.push('.');
        }
    }
    while name.ends_with('.') {
        name.pop();
    }

    (!name.is_empty()).then_some(name)
}

/// Byte offset of the `-` that starts a version suffix (`-` digits then `.` or end).
fn version_start(stem: &str) -> Option<usize> {
    let bytes = stem.as_bytes();
    for (idx, byte) in bytes.iter().enumerate() {
        if *byte != b'-' {
            continue;
        }
        let digits = bytes[idx + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            continue;
        }
        match bytes.get(idx + 1 + digits) {
            None | Some(b'.') => return Some(idx),
            _ => {}
        }
    }
    None
}
