use crate::cli::PreviewArgs;
use crate::error::Result;
use tracing::info;
use turbocoord::engine::config::SamplingParams;
use turbocoord::workflows::generate;

pub fn run(args: PreviewArgs) -> Result<()> {
    let sampling = SamplingParams {
        samples: args.samples,
        radius: args.radius,
        site_cutoff: args.site_cutoff,
        contact_cutoff: None,
    };

    info!(
        substrate = %args.substrate.display(),
        samples = sampling.samples,
        "Writing sample-sphere preview."
    );

    let report = generate::preview(&args.substrate, &sampling, &args.output)?;

    println!(
        "✓ Preview written to {} ({} valid point(s), {} rejected).",
        report.path.display(),
        report.valid_points,
        report.invalid_points
    );
    Ok(())
}
