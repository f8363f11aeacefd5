//! The conversion pipeline: admission, public inference, classification,
//! synthesis and emission.
//!
//! [`ModuleInfoBuilder::new`] admits the input; [`ModuleInfoBuilder::run`]
//! consumes the builder and hands back a [`ModuleInfoOutput`] holding the
//! resolved working table, the full-pass result and the [`RunReport`]. The
//! dependency scanner is released exactly once, whichever way `run` exits.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use super::admission::admit;
use super::emit::{EmitOptions, output_path, write_module_info};
use super::public_deps::infer_public_requires;
use super::report::{ModuleOutcome, Outcome, RunReport};
use super::scanner::ScanSession;
use super::synthesis::to_explicit_module;
use super::{
    Conversion, DependencyResult, DependencyScanner, Error, ModuleDescriptor, ModuleFinder,
    ReferenceVisitor, Result, TraceCollector, Verbosity, WorkingTable,
};

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Root of the per-module output directories.
    pub output_dir: PathBuf,
    pub emit: EmitOptions,
    /// Collect the unresolved references of modules that are not generated.
    pub trace_missing: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            emit: EmitOptions::default(),
            trace_missing: false,
        }
    }
}

/// Converts automatic modules into explicit ones.
pub struct ModuleInfoBuilder<S: DependencyScanner> {
    options: BuilderOptions,
    scanner: S,
    table: WorkingTable,
}

impl<S: DependencyScanner> ModuleInfoBuilder<S> {
    /// Admit `paths` as candidate automatic modules.
    ///
    /// Fails with [`Error::NotAutomaticModule`] or [`Error::InvalidInput`]
    /// before any analysis; the scanner is released in that case too.
    pub fn new(
        options: BuilderOptions,
        finder: &dyn ModuleFinder,
        mut scanner: S,
        paths: &[PathBuf],
    ) -> Result<Self> {
        let table = match admit(finder, paths) {
            Ok(table) => table,
            Err(err) => {
                scanner.release();
                return Err(err);
            }
        };

        Ok(Self {
            options,
            scanner,
            table,
        })
    }

    /// The admitted modules, all `Pending`.
    pub fn table(&self) -> &WorkingTable {
        &self.table
    }

    /// Run both dependency passes, synthesize descriptors and write them.
    ///
    /// Per-module failures (missing dependences, emission errors) are
    /// recorded in the report; only scanner errors abort the run.
    pub fn run(self) -> Result<ModuleInfoOutput> {
        let Self {
            options,
            mut scanner,
            mut table,
        } = self;
        let mut session = ScanSession::new(&mut scanner);

        let modules = table.modules();

        // pass 1: API dependences
        let public = infer_public_requires(session.scanner(), &modules)?;

        // pass 2: every class dependence
        let full = session.scanner().scan_full(&modules)?;

        for module in &modules {
            session.scanner().close(module.id());

            let state = match to_explicit_module(module, public.of(module.id()), &full) {
                Ok(descriptor) => Conversion::Synthesized(Arc::new(descriptor)),
                Err(Error::MissingDependency { module: name, targets }) => {
                    warn!(module = %name, unresolved = ?targets, "missing dependence");
                    Conversion::Missing
                }
                Err(err) => return Err(err),
            };
            table.resolve(module.id(), state)?;
        }

        let report = emit_all(&table, &full, &options);
        drop(session);

        Ok(ModuleInfoOutput {
            table,
            full,
            report,
        })
    }
}

fn emit_all(table: &WorkingTable, full: &DependencyResult, options: &BuilderOptions) -> RunReport {
    let mut report = RunReport::default();

    for entry in table.iter() {
        let module = &entry.module;
        let path = output_path(&options.output_dir, module.name(), &options.emit);

        let outcome = match &entry.state {
            Conversion::Synthesized(descriptor) => {
                match write_module_info(&options.output_dir, descriptor, &options.emit) {
                    Ok(_) => Outcome::Written,
                    Err(err) => {
                        warn!(module = module.name(), error = %err, "failed to write module descriptor");
                        Outcome::Failed(err)
                    }
                }
            }
            Conversion::Missing => {
                let unresolved = full
                    .unresolved(module.id())
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                let trace = if options.trace_missing {
                    let mut collector = TraceCollector::unresolved();
                    full.visit_dependences(
                        module.id(),
                        module.name(),
                        &mut collector,
                        Verbosity::Verbose,
                    );
                    collector.into_lines()
                } else {
                    Vec::new()
                };
                Outcome::Missing { unresolved, trace }
            }
            Conversion::Pending => Outcome::Failed(Error::InternalInvariantViolation(format!(
                "{} was never classified",
                module.name()
            ))),
        };

        debug!(module = module.name(), path = %path.display(), "emission finished");
        report.push(ModuleOutcome {
            module: module.name().to_string(),
            path,
            outcome,
        });
    }

    report
}

/// Result of a completed run.
#[derive(Debug)]
pub struct ModuleInfoOutput {
    table: WorkingTable,
    full: DependencyResult,
    report: RunReport,
}

impl ModuleInfoOutput {
    pub fn report(&self) -> &RunReport {
        &self.report
    }

    pub fn into_report(self) -> RunReport {
        self.report
    }

    /// True when no module had a missing dependence.
    pub fn success(&self) -> bool {
        self.report.success()
    }

    pub fn table(&self) -> &WorkingTable {
        &self.table
    }

    /// Synthesized descriptors, ordered by module name.
    pub fn descriptors(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.table.descriptors().map(|descriptor| &**descriptor)
    }

    /// Replay the class-level references of every module that could not be
    /// converted.
    pub fn visit_missing_deps(&self, visitor: &mut dyn ReferenceVisitor) {
        for module in self.table.missing() {
            self.full
                .visit_dependences(module.id(), module.name(), visitor, Verbosity::Verbose);
        }
    }
}
