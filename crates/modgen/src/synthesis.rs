//! Full-dependency classification and descriptor synthesis.

use indexmap::IndexMap;
use tracing::debug;

use super::{DependencyResult, Error, Module, ModuleDescriptor, Result};

/// Classify every module `module` requires as public or non-public.
///
/// Public requirements seed the map; full-pass targets are added as
/// non-public only when absent, so an API dependence is never downgraded.
/// Fails with [`Error::MissingDependency`] when any full-pass target is
/// unresolved.
pub fn classify(
    module: &Module,
    public: &[String],
    full: &DependencyResult,
) -> Result<IndexMap<String, bool>> {
    let unresolved = full.unresolved(module.id());
    if !unresolved.is_empty() {
        return Err(Error::MissingDependency {
            module: module.name().to_string(),
            targets: unresolved.iter().map(ToString::to_string).collect(),
        });
    }

    let mut requires: IndexMap<String, bool> = IndexMap::new();
    for name in public {
        requires.insert(name.clone(), true);
    }
    for name in full.required_modules(module.id()) {
        if name == module.name() {
            continue;
        }
        requires.entry(name.to_string()).or_insert(false);
    }

    Ok(requires)
}

/// Build the explicit descriptor of an automatic module.
///
/// Automatic modules export every package they contain, unqualified, and
/// keep the service bindings their metadata declares.
pub fn synthesize(module: &Module, requires: IndexMap<String, bool>) -> ModuleDescriptor {
    let archive = module.archive();

    let mut builder = ModuleDescriptor::builder(module.name()).requires_all(requires);
    for package in &archive.packages {
        builder = builder.exports(package.clone());
    }
    for (service, providers) in &archive.provides {
        builder = builder.provides(service.clone(), providers.iter().cloned());
    }

    let descriptor = builder.build();
    debug!(
        module = descriptor.name(),
        requires = descriptor.requires().len(),
        exports = descriptor.exports().len(),
        "synthesized module descriptor"
    );
    descriptor
}

/// Classify and synthesize in one step.
pub fn to_explicit_module(
    module: &Module,
    public: &[String],
    full: &DependencyResult,
) -> Result<ModuleDescriptor> {
    let requires = classify(module, public, full)?;
    Ok(synthesize(module, requires))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArchiveId, CodeArchive, Reference, Target};

    fn module_a() -> Module {
        let id = ArchiveId::new("/libs/a.jar").unwrap();
        Module::automatic(
            CodeArchive::builder(id, "a")
                .packages(["a.api", "a.impl"])
                .provides("S", ["a.impl.Impl"])
                .build(),
        )
    }

    fn full_pass(module: &Module, targets: &[Target]) -> DependencyResult {
        let mut result = DependencyResult::new();
        for (idx, target) in targets.iter().enumerate() {
            result.record(
                module.id().clone(),
                Reference::new("a.impl.Impl", format!("x.T{idx}"), target.clone()),
            );
        }
        result
    }

    #[test]
    fn test_public_never_downgraded() {
        let a = module_a();
        let full = full_pass(&a, &[Target::module("c"), Target::module("b")]);

        let requires = classify(&a, &["b".to_string()], &full).unwrap();
        assert_eq!(requires.get("b"), Some(&true));
        assert_eq!(requires.get("c"), Some(&false));
        assert_eq!(requires.len(), 2);
    }

    #[test]
    fn test_self_reference_ignored() {
        let a = module_a();
        let full = full_pass(&a, &[Target::module("a"), Target::module("java.sql")]);

        let requires = classify(&a, &[], &full).unwrap();
        assert!(!requires.contains_key("a"));
        assert_eq!(requires.get("java.sql"), Some(&false));
    }

    #[test]
    fn test_requires_limited_to_scanned_modules() {
        let a = module_a();
        let full = full_pass(
            &a,
            &[
                Target::module("c"),
                Target::module("a"),
                Target::module("d"),
                Target::module("c"),
            ],
        );
        let public = ["b".to_string()];

        let requires = classify(&a, &public, &full).unwrap();
        let names: Vec<&str> = requires.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["b", "c", "d"]);
        for name in requires.keys() {
            assert!(public.contains(name) || full.required_modules(a.id()).contains(&name.as_str()));
        }

        let descriptor = synthesize(&a, requires);
        let rendered: Vec<&str> = descriptor.requires().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(rendered, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_missing_dependency() {
        let a = module_a();
        let full = full_pass(&a, &[Target::module("b"), Target::RemovedInternal]);

        match classify(&a, &["b".to_string()], &full) {
            Err(Error::MissingDependency { module, targets }) => {
                assert_eq!(module, "a");
                assert_eq!(targets, vec!["JDK internal API (removed)".to_string()]);
            }
            other => panic!("expected missing dependency, got {other:?}"),
        }
    }

    #[test]
    fn test_synthesize_exports_all_packages_and_provides() {
        let a = module_a();
        let full = full_pass(&a, &[Target::module("b")]);

        let descriptor = to_explicit_module(&a, &[], &full).unwrap();
        assert_eq!(descriptor.name(), "a");
        assert!(!descriptor.has_qualified_exports());

        let exports: Vec<&str> = descriptor.exports().iter().map(|e| e.source.as_str()).collect();
        assert_eq!(exports, vec!["a.api", "a.impl"]);

        let provides: Vec<_> = descriptor.provides().collect();
        assert_eq!(provides[0].service, "S");
        assert_eq!(provides[0].providers, vec!["a.impl.Impl"]);
    }
}
