//! `modgen generate`: convert automatic modules recorded in a scan snapshot.

use modgen::{ModuleInfoBuilder, Outcome, RunReport, ScanSnapshot};
use modgen_config::ConfigDiscovery;
use tracing::debug;

use crate::cli::GenerateArgs;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the generate command.
///
/// Succeeds only when every admitted module was written.
pub fn execute(args: GenerateArgs) -> Result<()> {
    let config = ConfigDiscovery::new(".").load(args.config.as_deref(), &args.overrides())?;
    debug!(?config, "resolved configuration");

    let mut snapshot = ScanSnapshot::from_path(&args.snapshot)?;
    let finder = snapshot.clone();

    let builder = ModuleInfoBuilder::new(
        config.builder_options(),
        &finder,
        &mut snapshot,
        &args.archives,
    )?;
    ui::info(&format!(
        "Converting {} automatic module(s)",
        builder.table().len()
    ));
    let report = builder.run()?.into_report();

    print_report(&report);
    check_report(&report)
}

fn print_report(report: &RunReport) {
    for outcome in report.outcomes() {
        match &outcome.outcome {
            Outcome::Written => println!("writing to {}", outcome.path.display()),
            Outcome::Missing { trace, .. } => {
                ui::warning(&format!(
                    "Missing dependence: {} not generated",
                    outcome.path.display()
                ));
                for line in trace {
                    eprintln!("{line}");
                }
            }
            Outcome::Failed(err) => ui::error(&format!("{}: {err}", outcome.module)),
        }
    }
}

fn check_report(report: &RunReport) -> Result<()> {
    let missing = report.missing().count();
    let failed = report.failures().count();
    if missing == 0 && failed == 0 {
        let written = report.written().count();
        ui::success(&format!("Generated {written} module descriptor(s)"));
        Ok(())
    } else {
        Err(CliError::Incomplete { missing, failed })
    }
}
