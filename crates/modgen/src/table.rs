//! The working table mapping each admitted automatic module to its conversion.
//!
//! Keys are fixed at admission and ordered by module name. Every entry starts
//! `Pending` and transitions exactly once, to either `Synthesized` or
//! `Missing`.

use std::sync::Arc;

use indexmap::IndexMap;

use super::{ArchiveId, Error, Module, ModuleDescriptor, Result};

/// Conversion state of one automatic module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// Not yet classified.
    Pending,
    /// Descriptor synthesized from both dependency passes.
    Synthesized(Arc<ModuleDescriptor>),
    /// At least one dependence could not be resolved.
    Missing,
}

impl Conversion {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn descriptor(&self) -> Option<&Arc<ModuleDescriptor>> {
        match self {
            Self::Synthesized(descriptor) => Some(descriptor),
            Self::Pending | Self::Missing => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub module: Arc<Module>,
    pub state: Conversion,
}

/// Automatic module -> conversion result.
#[derive(Debug, Clone, Default)]
pub struct WorkingTable {
    entries: IndexMap<ArchiveId, Entry>,
}

impl WorkingTable {
    /// Build a table of `Pending` entries ordered by module name.
    pub(crate) fn from_modules(modules: Vec<Module>) -> Self {
        let mut modules = modules;
        modules.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));

        let entries = modules
            .into_iter()
            .map(|module| {
                (
                    module.id().clone(),
                    Entry {
                        module: Arc::new(module),
                        state: Conversion::Pending,
                    },
                )
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Admitted modules in table order.
    pub fn modules(&self) -> Vec<Arc<Module>> {
        self.entries
            .values()
            .map(|entry| Arc::clone(&entry.module))
            .collect()
    }

    pub fn get(&self, id: &ArchiveId) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn state(&self, id: &ArchiveId) -> Option<&Conversion> {
        self.entries.get(id).map(|entry| &entry.state)
    }

    /// Record the conversion result for `id`. Each entry resolves once.
    pub(crate) fn resolve(&mut self, id: &ArchiveId, state: Conversion) -> Result<()> {
        let entry = self.entries.get_mut(id).ok_or_else(|| {
            Error::InternalInvariantViolation(format!("{id} is not an admitted module"))
        })?;

        if !entry.state.is_pending() {
            return Err(Error::InternalInvariantViolation(format!(
                "{} already resolved",
                entry.module.name()
            )));
        }
        if state.is_pending() {
            return Err(Error::InternalInvariantViolation(format!(
                "{} cannot be reset to pending",
                entry.module.name()
            )));
        }

        entry.state = state;
        Ok(())
    }

    /// Synthesized descriptors in table order.
    pub fn descriptors(&self) -> impl Iterator<Item = &Arc<ModuleDescriptor>> {
        self.entries
            .values()
            .filter_map(|entry| entry.state.descriptor())
    }

    /// Modules that could not be converted, in table order.
    pub fn missing(&self) -> impl Iterator<Item = &Arc<Module>> {
        self.entries
            .values()
            .filter(|entry| entry.state == Conversion::Missing)
            .map(|entry| &entry.module)
    }
}
