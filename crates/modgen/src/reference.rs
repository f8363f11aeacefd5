//! Class-level references produced by a dependency pass, and their traces.
//!
//! A pass yields one [`DependencyResult`]: for every scanned archive, the list
//! of references its classes make, each resolved to a [`Target`]. Results are
//! built once and read-only afterwards; the pipeline hands them forward by
//! value between stages.

use std::fmt;

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::{Deserialize, Serialize};

use super::ArchiveId;

/// Resolution of a single reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    /// Resolved to a named module.
    Module { name: String },
    /// No module on the search path contains the referenced class.
    NotFound,
    /// The referenced class is an internal platform API that has been removed.
    RemovedInternal,
}

impl Target {
    pub fn module(name: impl Into<String>) -> Self {
        Self::Module { name: name.into() }
    }

    /// Returns true for the `NotFound` and `RemovedInternal` sentinels.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::NotFound | Self::RemovedInternal)
    }

    /// Name of the resolved module, `None` for sentinels.
    pub fn module_name(&self) -> Option<&str> {
        match self {
            Self::Module { name } => Some(name),
            Self::NotFound | Self::RemovedInternal => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module { name } => f.write_str(name),
            Self::NotFound => f.write_str("not found"),
            Self::RemovedInternal => f.write_str("JDK internal API (removed)"),
        }
    }
}

/// A reference from a class of the scanned archive to another class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Fully qualified name of the referencing class.
    pub origin: String,
    /// Fully qualified name of the referenced class.
    pub target_class: String,
    pub target: Target,
}

impl Reference {
    pub fn new(origin: impl Into<String>, target_class: impl Into<String>, target: Target) -> Self {
        Self {
            origin: origin.into(),
            target_class: target_class.into(),
            target,
        }
    }
}

/// Granularity at which references are replayed to a visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// One entry per (archive, target module) pair.
    #[default]
    Summary,
    /// One entry per (package, target package) pair.
    Package,
    /// One entry per (class, target class) pair.
    Class,
    /// Every reference, in scan order.
    Verbose,
}

/// One dependence handed to a [`ReferenceVisitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependence<'a> {
    pub origin: &'a str,
    pub origin_module: &'a str,
    pub target: &'a str,
    pub target_module: &'a Target,
}

/// Receives dependences replayed from a [`DependencyResult`].
pub trait ReferenceVisitor {
    fn visit(&mut self, dependence: Dependence<'_>);
}

impl<F> ReferenceVisitor for F
where
    F: FnMut(Dependence<'_>),
{
    fn visit(&mut self, dependence: Dependence<'_>) {
        self(dependence)
    }
}

/// Collects dependences as formatted diagnostic lines.
#[derive(Debug, Clone, Default)]
pub struct TraceCollector {
    lines: Vec<String>,
    unresolved_only: bool,
}

impl TraceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect only dependences on `NotFound` or `RemovedInternal` targets.
    pub fn unresolved() -> Self {
        Self {
            lines: Vec::new(),
            unresolved_only: true,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl ReferenceVisitor for TraceCollector {
    fn visit(&mut self, dependence: Dependence<'_>) {
        if self.unresolved_only && !dependence.target_module.is_unresolved() {
            return;
        }
        self.lines.push(format!(
            "   {:<50} -> {:<50} {}",
            dependence.origin, dependence.target, dependence.target_module
        ));
    }
}

/// Per-archive references produced by one dependency pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyResult {
    references: HashMap<ArchiveId, Vec<Reference>>,
}

impl DependencyResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reference made by `archive`.
    pub fn record(&mut self, archive: ArchiveId, reference: Reference) {
        self.references.entry(archive).or_default().push(reference);
    }

    /// Every reference made by `archive`, in scan order.
    pub fn references(&self, archive: &ArchiveId) -> &[Reference] {
        self.references
            .get(archive)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Distinct targets of `archive`, in first-occurrence order.
    pub fn targets(&self, archive: &ArchiveId) -> Vec<&Target> {
        let mut seen = HashSet::default();
        self.references(archive)
            .iter()
            .map(|reference| &reference.target)
            .filter(|target| seen.insert(*target))
            .collect()
    }

    /// Distinct resolved module names of `archive`, in first-occurrence order.
    pub fn required_modules(&self, archive: &ArchiveId) -> Vec<&str> {
        self.targets(archive)
            .into_iter()
            .filter_map(Target::module_name)
            .collect()
    }

    /// Returns true if any reference of `archive` is unresolved.
    pub fn has_unresolved(&self, archive: &ArchiveId) -> bool {
        self.references(archive)
            .iter()
            .any(|reference| reference.target.is_unresolved())
    }

    /// Distinct unresolved targets of `archive`.
    pub fn unresolved(&self, archive: &ArchiveId) -> Vec<&Target> {
        self.targets(archive)
            .into_iter()
            .filter(|target| target.is_unresolved())
            .collect()
    }

    /// Replay the references of `archive` (named `module_name`) to `visitor`.
    pub fn visit_dependences(
        &self,
        archive: &ArchiveId,
        module_name: &str,
        visitor: &mut dyn ReferenceVisitor,
        verbosity: Verbosity,
    ) {
        let mut seen: HashSet<(String, String)> = HashSet::default();

        for reference in self.references(archive) {
            let target_name = reference.target.to_string();
            let (origin, target) = match verbosity {
                Verbosity::Summary => (module_name, target_name.as_str()),
                Verbosity::Package => (
                    package_of(&reference.origin),
                    package_of(&reference.target_class),
                ),
                Verbosity::Class | Verbosity::Verbose => {
                    (reference.origin.as_str(), reference.target_class.as_str())
                }
            };

            if verbosity != Verbosity::Verbose
                && !seen.insert((origin.to_string(), format!("{target}\0{target_name}")))
            {
                continue;
            }

            visitor.visit(Dependence {
                origin,
                origin_module: module_name,
                target,
                target_module: &reference.target,
            });
        }
    }
}

/// Package portion of a fully qualified class name (empty for the unnamed package).
fn package_of(class: &str) -> &str {
    class.rsplit_once('.').map_or("", |(package, _)| package)
}
