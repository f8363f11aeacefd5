//! Public-dependency inference from the API-only pass.

use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, trace};

use super::{ArchiveId, DependencyResult, DependencyScanner, Module, Result};

/// Modules reachable through the exported surface of each candidate.
///
/// These seed the `requires public` entries of the synthesized descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicRequires {
    by_module: HashMap<ArchiveId, Vec<String>>,
}

impl PublicRequires {
    /// Resolve an API-only pass into module names per candidate.
    ///
    /// Sentinel targets are skipped here; the full pass reports them.
    pub fn from_result(result: &DependencyResult, modules: &[Arc<Module>]) -> Self {
        let mut by_module = HashMap::default();

        for module in modules {
            let id = module.id();
            for target in result.unresolved(id) {
                trace!(module = module.name(), %target, "unresolved API dependence");
            }

            let names: Vec<String> = result
                .required_modules(id)
                .into_iter()
                .filter(|name| *name != module.name())
                .map(str::to_string)
                .collect();

            if !names.is_empty() {
                by_module.insert(id.clone(), names);
            }
        }

        Self { by_module }
    }

    /// Public requirements of `module`, in first-occurrence order.
    pub fn of(&self, module: &ArchiveId) -> &[String] {
        self.by_module
            .get(module)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Run the API-only pass over exactly the candidate set.
pub(crate) fn infer_public_requires<S>(
    scanner: &mut S,
    modules: &[Arc<Module>],
) -> Result<PublicRequires>
where
    S: DependencyScanner + ?Sized,
{
    let result = scanner.scan_api_only(modules)?;
    let public = PublicRequires::from_result(&result, modules);

    debug!(
        modules = public.by_module.len(),
        "inferred public requirements from API dependences"
    );
    Ok(public)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CodeArchive, Reference, Target};

    fn module(name: &str) -> Arc<Module> {
        let id = ArchiveId::new(format!("/libs/{name}.jar")).unwrap();
        Arc::new(Module::automatic(CodeArchive::builder(id, name).build()))
    }

    #[test]
    fn test_public_requires_skip_self_and_sentinels() {
        let a = module("a");
        let mut result = DependencyResult::new();
        result.record(a.id().clone(), Reference::new("a.Api", "b.Type", Target::module("b")));
        result.record(a.id().clone(), Reference::new("a.Api", "a.Other", Target::module("a")));
        result.record(a.id().clone(), Reference::new("a.Api", "x.Gone", Target::NotFound));
        result.record(a.id().clone(), Reference::new("a.Api", "c.Type", Target::module("c")));

        let public = PublicRequires::from_result(&result, &[a.clone()]);
        assert_eq!(public.of(a.id()), ["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_module_without_api_dependences() {
        let a = module("a");
        let public = PublicRequires::from_result(&DependencyResult::new(), &[a.clone()]);
        assert!(public.of(a.id()).is_empty());
    }
}
