use crate::cli::GenerateArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::progress::CliProgressHandler;
use tracing::{info, warn};
use turbocoord::engine::progress::ProgressReporter;
use turbocoord::workflows::generate;

pub fn run(args: GenerateArgs) -> Result<()> {
    info!("Resolving configuration...");
    let config = config::resolve(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting conformer generation...");
    info!("Invoking the core generation workflow...");

    let report = generate::run(&config, &reporter)?;

    info!(
        written = report.written.len(),
        "Workflow finished, received generation report."
    );

    if report.written.is_empty() && report.failures.is_empty() {
        warn!("Workflow completed but produced no conformers.");
        println!(
            "Warning: no conformer survived filtering ({} of {} points clashed, {} conformers screened out).",
            report.rejected_points, report.sampled, report.rejected_conformers
        );
        return Ok(());
    }

    println!(
        "✓ Wrote {} conformer(s) to {} ({} of {} points clashed, {} conformers screened out).",
        report.written.len(),
        config.output.directory.display(),
        report.rejected_points,
        report.sampled,
        report.rejected_conformers
    );

    if !report.failures.is_empty() {
        for failure in &report.failures {
            warn!(
                index = failure.index,
                path = %failure.path.display(),
                "Conformer write failed: {}",
                failure.error
            );
            eprintln!(
                "  Failed to write conformer {}: {}",
                failure.index, failure.error
            );
        }
        let attempted = report.written.len() + report.failures.len();
        return Err(CliError::PartialWrite {
            failed: report.failures.len(),
            attempted,
        });
    }

    Ok(())
}
