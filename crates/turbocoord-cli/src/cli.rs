use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use turbocoord::engine::config::FreezeMode;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Wesley Laderer",
    version,
    about = "TurboCoord CLI - Enumerates candidate ligand-binding poses around a coordination complex for downstream DFT optimization.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel conformer generation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one candidate conformer file per clash-free sample point.
    Generate(GenerateArgs),
    /// Write the sample-sphere lattice as dummy atoms for visual inspection.
    Preview(PreviewArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    // --- Core Arguments ---
    /// Path to the substrate structure file (.xyz), first atom at the binding center.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub substrate: PathBuf,

    /// Path to the ligand template structure file (.xyz).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub ligand: PathBuf,

    /// Directory to write the conformer files into.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Sampling Overrides ---
    /// Override the number of sphere sample points from the config file.
    #[arg(short = 'n', long, value_name = "INT")]
    pub samples: Option<usize>,

    /// Override the sampling sphere radius in Angstroms.
    #[arg(short, long, value_name = "FLOAT")]
    pub radius: Option<f64>,

    /// Override the minimum point-to-substrate distance in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub site_cutoff: Option<f64>,

    /// Override the minimum substrate-ligand contact distance for assembled
    /// conformers; omit everywhere to skip the contact screen.
    #[arg(long, value_name = "FLOAT")]
    pub contact_cutoff: Option<f64>,

    // --- Output Overrides ---
    /// Override the output filename prefix.
    #[arg(short, long, value_name = "NAME")]
    pub prefix: Option<String>,

    /// Override which side of the complex is tagged frozen in the output.
    #[arg(short = 'f', long, value_name = "MODE")]
    pub freeze: Option<FreezeArg>,
}

/// Arguments for the `preview` subcommand.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Path to the substrate structure file (.xyz).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub substrate: PathBuf,

    /// Path of the preview file to write.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Number of sphere sample points.
    #[arg(short = 'n', long, value_name = "INT", default_value_t = 100)]
    pub samples: usize,

    /// Sampling sphere radius in Angstroms.
    #[arg(short, long, value_name = "FLOAT", default_value_t = 2.5)]
    pub radius: f64,

    /// Minimum point-to-substrate distance in Angstroms.
    #[arg(long, value_name = "FLOAT", default_value_t = 1.5)]
    pub site_cutoff: f64,
}

/// CLI spelling of the core freeze modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FreezeArg {
    /// No mobility column.
    None,
    /// Freeze the substrate, relax the ligand.
    Substrate,
    /// Freeze the ligand, relax the substrate.
    Ligand,
}

impl From<FreezeArg> for FreezeMode {
    fn from(arg: FreezeArg) -> Self {
        match arg {
            FreezeArg::None => FreezeMode::None,
            FreezeArg::Substrate => FreezeMode::FreezeSubstrate,
            FreezeArg::Ligand => FreezeMode::FreezeLigand,
        }
    }
}
