use crate::cli::GenerateArgs;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use turbocoord::core::models::structure::AxisSpec;
use turbocoord::engine::config::{FreezeMode, GenerateConfig, GenerateConfigBuilder};

const DEFAULT_SAMPLES: usize = 100;
const DEFAULT_SITE_CUTOFF: f64 = 1.5;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialGenerateConfig {
    pub sampling: Option<SamplingSection>,
    pub axis: Option<AxisSpec>,
    pub output: Option<OutputSection>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct SamplingSection {
    pub samples: Option<usize>,
    pub radius: Option<f64>,
    pub site_cutoff: Option<f64>,
    pub contact_cutoff: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct OutputSection {
    pub prefix: Option<String>,
    pub freeze: Option<FreezeMode>,
}

impl PartialGenerateConfig {
    /// Reads a partial configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let config = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        debug!(path = %path.display(), "Loaded configuration file.");
        Ok(config)
    }

    /// Resolves the final engine configuration: CLI arguments win over config
    /// file values, which win over built-in defaults.
    pub fn merge_with_cli(self, args: &GenerateArgs) -> Result<GenerateConfig> {
        let sampling = self.sampling.unwrap_or_default();
        let output = self.output.unwrap_or_default();

        let radius = args
            .radius
            .or(sampling.radius)
            .ok_or_else(|| CliError::Config("a sphere radius is required (set --radius or [sampling].radius)".to_string()))?;

        let mut builder = GenerateConfigBuilder::new()
            .substrate_path(args.substrate.clone())
            .ligand_path(args.ligand.clone())
            .output_dir(args.output_dir.clone())
            .samples(args.samples.or(sampling.samples).unwrap_or(DEFAULT_SAMPLES))
            .radius(radius)
            .site_cutoff(
                args.site_cutoff
                    .or(sampling.site_cutoff)
                    .unwrap_or(DEFAULT_SITE_CUTOFF),
            )
            .contact_cutoff(args.contact_cutoff.or(sampling.contact_cutoff));

        if let Some(axis) = self.axis {
            builder = builder.axis(axis);
        }
        if let Some(prefix) = args.prefix.clone().or(output.prefix) {
            builder = builder.prefix(prefix);
        }
        if let Some(freeze) = args.freeze.map(FreezeMode::from).or(output.freeze) {
            builder = builder.freeze(freeze);
        }

        builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}

/// Loads the config file if one was named, otherwise starts from an empty
/// partial config.
pub fn resolve(args: &GenerateArgs) -> Result<GenerateConfig> {
    let partial = match &args.config {
        Some(path) => PartialGenerateConfig::from_file(path)?,
        None => PartialGenerateConfig::default(),
    };
    partial.merge_with_cli(args)
}
