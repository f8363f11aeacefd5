//! Module descriptor model: requires, exports and provides.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// A dependence on another module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Requires {
    pub name: String,
    /// Re-exported to the consumers of the requiring module.
    pub is_public: bool,
}

impl fmt::Display for Requires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_public {
            write!(f, "public {}", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// An exported package, optionally restricted to a set of consumer modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exports {
    pub source: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub targets: BTreeSet<String>,
}

impl Exports {
    /// Returns true if the export is limited to specific consumer modules.
    pub fn is_qualified(&self) -> bool {
        !self.targets.is_empty()
    }
}

impl fmt::Display for Exports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)?;
        if self.is_qualified() {
            let targets: Vec<&str> = self.targets.iter().map(String::as_str).collect();
            write!(f, " to {}", targets.join(", "))?;
        }
        Ok(())
    }
}

/// Implementations of one service interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provides {
    pub service: String,
    pub providers: Vec<String>,
}

/// Module boundary metadata: name, requires, exports and provided services.
///
/// Requires are unique by module name and kept ordered by name. Exports keep
/// declaration order; canonical ordering is applied when rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    name: String,
    requires: Vec<Requires>,
    exports: Vec<Exports>,
    provides: BTreeMap<String, Provides>,
}

impl ModuleDescriptor {
    /// Create a descriptor builder for the named module.
    pub fn builder(name: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder {
            name: name.into(),
            requires: BTreeMap::new(),
            exports: Vec::new(),
            provides: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requires(&self) -> &[Requires] {
        &self.requires
    }

    pub fn exports(&self) -> &[Exports] {
        &self.exports
    }

    /// Service bindings keyed by service interface name.
    pub fn provides(&self) -> impl Iterator<Item = &Provides> {
        self.provides.values()
    }

    /// Look up a requirement by module name.
    pub fn requirement(&self, name: &str) -> Option<&Requires> {
        self.requires.iter().find(|req| req.name == name)
    }

    /// Returns true if any export is restricted to specific consumers.
    pub fn has_qualified_exports(&self) -> bool {
        self.exports.iter().any(Exports::is_qualified)
    }
}

/// Builder for `ModuleDescriptor`.
pub struct DescriptorBuilder {
    name: String,
    requires: BTreeMap<String, bool>,
    exports: Vec<Exports>,
    provides: BTreeMap<String, Provides>,
}

impl DescriptorBuilder {
    /// Require a module. The first declaration for a name wins.
    pub fn requires(mut self, name: impl Into<String>, is_public: bool) -> Self {
        self.requires.entry(name.into()).or_insert(is_public);
        self
    }

    /// Require every `(name, is_public)` pair, first declaration wins.
    pub fn requires_all<I, S>(mut self, requires: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        for (name, is_public) in requires {
            self = self.requires(name, is_public);
        }
        self
    }

    /// Export a package to every module.
    pub fn exports(mut self, package: impl Into<String>) -> Self {
        self.exports.push(Exports {
            source: package.into(),
            targets: BTreeSet::new(),
        });
        self
    }

    /// Export a package to the listed modules only.
    pub fn exports_to<I, S>(mut self, package: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exports.push(Exports {
            source: package.into(),
            targets: targets.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Declare providers of a service. Repeated services accumulate providers.
    pub fn provides<I, S>(mut self, service: impl Into<String>, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let service = service.into();
        let entry = self
            .provides
            .entry(service.clone())
            .or_insert_with(|| Provides {
                service,
                providers: Vec::new(),
            });
        for provider in providers {
            let provider = provider.into();
            if !entry.providers.contains(&provider) {
                entry.providers.push(provider);
            }
        }
        self
    }

    pub fn build(self) -> ModuleDescriptor {
        ModuleDescriptor {
            name: self.name,
            requires: self
                .requires
                .into_iter()
                .map(|(name, is_public)| Requires { name, is_public })
                .collect(),
            exports: self.exports,
            provides: self.provides,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_unique_by_name_first_wins() {
        let descriptor = ModuleDescriptor::builder("a")
            .requires("b", true)
            .requires("b", false)
            .requires("c", false)
            .build();

        assert_eq!(descriptor.requires().len(), 2);
        assert!(descriptor.requirement("b").unwrap().is_public);
        assert!(!descriptor.requirement("c").unwrap().is_public);
    }

    #[test]
    fn test_requires_ordered_by_name() {
        let descriptor = ModuleDescriptor::builder("a")
            .requires("zeta", false)
            .requires("alpha", false)
            .build();

        let names: Vec<&str> = descriptor.requires().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_requires_display() {
        let public = Requires {
            name: "b".to_string(),
            is_public: true,
        };
        let internal = Requires {
            name: "c".to_string(),
            is_public: false,
        };
        assert_eq!(public.to_string(), "public b");
        assert_eq!(internal.to_string(), "c");
    }

    #[test]
    fn test_qualified_export_detection() {
        let descriptor = ModuleDescriptor::builder("a")
            .exports("a.api")
            .exports_to("a.internal", ["b"])
            .build();

        assert!(descriptor.has_qualified_exports());
        assert_eq!(descriptor.exports()[1].to_string(), "a.internal to b");
    }

    #[test]
    fn test_provides_accumulate_without_duplicates() {
        let descriptor = ModuleDescriptor::builder("a")
            .provides("S", ["a.Impl"])
            .provides("S", ["a.Impl", "a.Other"])
            .build();

        let provides: Vec<&Provides> = descriptor.provides().collect();
        assert_eq!(provides.len(), 1);
        assert_eq!(provides[0].providers, vec!["a.Impl", "a.Other"]);
    }
}
