//! Recorded scan results, usable as both module finder and dependency scanner.
//!
//! A snapshot is a JSON document written by an external class scanner:
//!
//! ```json
//! {
//!   "archives": [
//!     { "path": "libs/a.jar", "packages": ["a.api"], "provides": { "S": ["a.Impl"] } },
//!     { "path": "libs/b-1.0.jar" }
//!   ],
//!   "api": {
//!     "a": [ { "origin": "a.api.Foo", "targetClass": "b.Bar", "target": { "kind": "module", "name": "b" } } ]
//!   },
//!   "full": {
//!     "a": [ { "origin": "a.Impl", "targetClass": "x.Gone", "target": { "kind": "not_found" } } ]
//!   }
//! }
//! ```
//!
//! Reference lists are keyed by module name. Archives without an explicit
//! `name` get one derived from their file name.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    ArchiveId, CodeArchive, DependencyResult, DependencyScanner, Error, Module, ModuleDescriptor,
    ModuleFinder, Reference, Result, automatic_module_name,
};

/// One archive recorded by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveRecord {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub provides: BTreeMap<String, Vec<String>>,
    /// Declared descriptor, present when the archive is already an explicit module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<ModuleDescriptor>,
}

impl ArchiveRecord {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: None,
            packages: Vec::new(),
            provides: BTreeMap::new(),
            descriptor: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages.extend(packages.into_iter().map(Into::into));
        self
    }

    pub fn provides<I, S>(mut self, service: impl Into<String>, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provides
            .entry(service.into())
            .or_default()
            .extend(providers.into_iter().map(Into::into));
        self
    }

    pub fn descriptor(mut self, descriptor: ModuleDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    /// Module name: the recorded one, or one derived from the file name.
    pub fn module_name(&self) -> Result<String> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }
        self.path
            .file_name()
            .and_then(|file| automatic_module_name(&file.to_string_lossy()))
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "cannot derive a module name from {}",
                    self.path.display()
                ))
            })
    }

    fn to_module(&self) -> Result<Module> {
        let id = ArchiveId::new(&self.path)?;
        let name = self.module_name()?;

        let mut builder = CodeArchive::builder(id, name).packages(self.packages.iter().cloned());
        for (service, providers) in &self.provides {
            builder = builder.provides(service.clone(), providers.iter().cloned());
        }
        let archive = builder.build();

        Ok(match &self.descriptor {
            Some(descriptor) => Module::explicit(archive, descriptor.clone()),
            None => Module::automatic(archive),
        })
    }
}

/// A recorded scan of a set of archives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSnapshot {
    pub archives: Vec<ArchiveRecord>,
    /// References from the exported API of each module.
    #[serde(default)]
    pub api: BTreeMap<String, Vec<Reference>>,
    /// References from every class of each module.
    #[serde(default)]
    pub full: BTreeMap<String, Vec<Reference>>,
    #[serde(skip)]
    closed: HashSet<ArchiveId>,
    #[serde(skip)]
    releases: usize,
}

impl ScanSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot document from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn archive(mut self, record: ArchiveRecord) -> Self {
        self.archives.push(record);
        self
    }

    /// Record a reference from the exported API of `module`.
    pub fn api_reference(mut self, module: impl Into<String>, reference: Reference) -> Self {
        self.api.entry(module.into()).or_default().push(reference);
        self
    }

    /// Record a reference from any class of `module`.
    pub fn reference(mut self, module: impl Into<String>, reference: Reference) -> Self {
        self.full.entry(module.into()).or_default().push(reference);
        self
    }

    /// Modules closed for further analysis.
    pub fn is_closed(&self, module: &ArchiveId) -> bool {
        self.closed.contains(module)
    }

    /// Number of times the scanner was released.
    pub fn releases(&self) -> usize {
        self.releases
    }

    fn scan(
        &self,
        references: &BTreeMap<String, Vec<Reference>>,
        modules: &[Arc<Module>],
    ) -> DependencyResult {
        let mut result = DependencyResult::new();

        for module in modules {
            if self.closed.contains(module.id()) {
                debug!(module = module.name(), "skipping closed module");
                continue;
            }
            for reference in references.get(module.name()).into_iter().flatten() {
                result.record(module.id().clone(), reference.clone());
            }
        }

        result
    }
}

impl ModuleFinder for ScanSnapshot {
    /// Each path selects the archive recorded at that path, or every archive
    /// recorded under it when it names a directory. Paths that match nothing
    /// contribute no modules.
    fn load_all(&self, paths: &[PathBuf]) -> Result<Vec<Module>> {
        let mut records: Vec<(ArchiveId, &ArchiveRecord)> = Vec::with_capacity(self.archives.len());
        for record in &self.archives {
            records.push((ArchiveId::new(&record.path)?, record));
        }

        let mut selected: HashMap<ArchiveId, &ArchiveRecord> = HashMap::default();
        for path in paths {
            let wanted = ArchiveId::new(path)?;
            let before = selected.len();
            for (id, record) in &records {
                if id == &wanted || id.as_path().starts_with(wanted.as_path()) {
                    selected.entry(id.clone()).or_insert(*record);
                }
            }
            if selected.len() == before {
                debug!(path = %path.display(), "no recorded archive at path");
            }
        }

        let mut modules = selected
            .into_values()
            .map(ArchiveRecord::to_module)
            .collect::<Result<Vec<_>>>()?;
        modules.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(modules)
    }
}

impl DependencyScanner for ScanSnapshot {
    fn scan_api_only(&mut self, modules: &[Arc<Module>]) -> Result<DependencyResult> {
        Ok(self.scan(&self.api, modules))
    }

    fn scan_full(&mut self, modules: &[Arc<Module>]) -> Result<DependencyResult> {
        Ok(self.scan(&self.full, modules))
    }

    fn close(&mut self, module: &ArchiveId) {
        self.closed.insert(module.clone());
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}
