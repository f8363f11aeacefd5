//! Per-module outcome of a pipeline run.
//!
//! The core never prints; callers decide how to render a [`RunReport`].

use std::path::{Path, PathBuf};

use super::Error;

/// What happened to one automatic module.
#[derive(Debug)]
pub enum Outcome {
    /// Descriptor written to the module's output path.
    Written,
    /// Not generated: at least one dependence is unresolved.
    Missing {
        /// Distinct unresolved targets (`not found`, removed internal APIs).
        unresolved: Vec<String>,
        /// Offending references, collected only when tracing is requested.
        trace: Vec<String>,
    },
    /// Synthesized but emission failed.
    Failed(Error),
}

#[derive(Debug)]
pub struct ModuleOutcome {
    pub module: String,
    /// Output path of the module's descriptor source, written or not.
    pub path: PathBuf,
    pub outcome: Outcome,
}

impl ModuleOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self.outcome, Outcome::Written)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.outcome, Outcome::Missing { .. })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Outcomes of every admitted module, in working-table order.
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<ModuleOutcome>,
}

impl RunReport {
    pub(crate) fn push(&mut self, outcome: ModuleOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[ModuleOutcome] {
        &self.outcomes
    }

    /// True when no module had a missing dependence.
    pub fn success(&self) -> bool {
        !self.outcomes.iter().any(ModuleOutcome::is_missing)
    }

    pub fn written(&self) -> impl Iterator<Item = &ModuleOutcome> {
        self.outcomes.iter().filter(|o| o.is_written())
    }

    pub fn missing(&self) -> impl Iterator<Item = &ModuleOutcome> {
        self.outcomes.iter().filter(|o| o.is_missing())
    }

    /// Modules whose emission failed (I/O or invariant violations).
    pub fn failures(&self) -> impl Iterator<Item = (&ModuleOutcome, &Error)> {
        self.outcomes.iter().filter_map(|o| match &o.outcome {
            Outcome::Failed(err) => Some((o, err)),
            Outcome::Written | Outcome::Missing { .. } => None,
        })
    }

    pub fn get(&self, module: &str) -> Option<&ModuleOutcome> {
        self.outcomes.iter().find(|o| o.module == module)
    }
}
