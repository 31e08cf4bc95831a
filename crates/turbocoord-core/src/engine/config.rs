use crate::core::models::atom::Mobility;
use crate::core::models::structure::AxisSpec;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Controls the optional per-atom mobility column of the output files.
///
/// Freezing one side lets the downstream optimizer relax only the other: freeze
/// the substrate to refine the ligand pose, or freeze the ligand to relax the
/// substrate around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FreezeMode {
    /// Plain output, no mobility column.
    #[default]
    None,
    /// Substrate atoms tagged frozen, ligand atoms free.
    FreezeSubstrate,
    /// Ligand atoms tagged frozen, substrate atoms free.
    FreezeLigand,
}

impl FreezeMode {
    /// Expands the mode into one tag per atom of the substrate-then-ligand
    /// concatenation, or `None` for untagged output.
    pub fn tags(&self, substrate_len: usize, ligand_len: usize) -> Option<Vec<Mobility>> {
        let (substrate_tag, ligand_tag) = match self {
            FreezeMode::None => return None,
            FreezeMode::FreezeSubstrate => (Mobility::Frozen, Mobility::Free),
            FreezeMode::FreezeLigand => (Mobility::Free, Mobility::Frozen),
        };
        let mut tags = vec![substrate_tag; substrate_len];
        tags.extend(std::iter::repeat_n(ligand_tag, ligand_len));
        Some(tags)
    }
}

/// Parameters of the sphere sampling stage.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    /// Number of lattice points to place on the sphere (>= 2).
    pub samples: usize,
    /// Sphere radius in Angstroms, centered on the substrate origin atom.
    pub radius: f64,
    /// Minimum allowed distance between a sample point and any substrate atom.
    pub site_cutoff: f64,
    /// Minimum allowed substrate-ligand distance in an assembled conformer;
    /// `None` skips the post-assembly screen.
    pub contact_cutoff: Option<f64>,
}

/// Parameters of the output stage.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputParams {
    /// Directory the conformer files are written into.
    pub directory: PathBuf,
    /// Filename prefix; files are named `<prefix>_<index>.xyz`.
    pub prefix: String,
    /// Mobility tagging applied to every written conformer.
    pub freeze: FreezeMode,
}

/// Fully resolved configuration for the generation workflow.
///
/// All paths and parameters are explicit: the engine keeps no process-wide
/// state and reads nothing outside what is named here.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateConfig {
    pub substrate_path: PathBuf,
    pub ligand_path: PathBuf,
    pub axis: AxisSpec,
    pub sampling: SamplingParams,
    pub output: OutputParams,
}

#[derive(Default)]
pub struct GenerateConfigBuilder {
    substrate_path: Option<PathBuf>,
    ligand_path: Option<PathBuf>,
    axis: Option<AxisSpec>,
    samples: Option<usize>,
    radius: Option<f64>,
    site_cutoff: Option<f64>,
    contact_cutoff: Option<f64>,
    output_dir: Option<PathBuf>,
    prefix: Option<String>,
    freeze: Option<FreezeMode>,
}

impl GenerateConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn substrate_path(mut self, path: PathBuf) -> Self {
        self.substrate_path = Some(path);
        self
    }
    pub fn ligand_path(mut self, path: PathBuf) -> Self {
        self.ligand_path = Some(path);
        self
    }
    pub fn axis(mut self, axis: AxisSpec) -> Self {
        self.axis = Some(axis);
        self
    }
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }
    pub fn site_cutoff(mut self, cutoff: f64) -> Self {
        self.site_cutoff = Some(cutoff);
        self
    }
    pub fn contact_cutoff(mut self, cutoff: Option<f64>) -> Self {
        self.contact_cutoff = cutoff;
        self
    }
    pub fn output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }
    pub fn prefix(mut self, prefix: String) -> Self {
        self.prefix = Some(prefix);
        self
    }
    pub fn freeze(mut self, mode: FreezeMode) -> Self {
        self.freeze = Some(mode);
        self
    }

    pub fn build(self) -> Result<GenerateConfig, ConfigError> {
        Ok(GenerateConfig {
            substrate_path: self
                .substrate_path
                .ok_or(ConfigError::MissingParameter("substrate_path"))?,
            ligand_path: self
                .ligand_path
                .ok_or(ConfigError::MissingParameter("ligand_path"))?,
            axis: self.axis.unwrap_or_default(),
            sampling: SamplingParams {
                samples: self.samples.ok_or(ConfigError::MissingParameter("samples"))?,
                radius: self.radius.ok_or(ConfigError::MissingParameter("radius"))?,
                site_cutoff: self
                    .site_cutoff
                    .ok_or(ConfigError::MissingParameter("site_cutoff"))?,
                contact_cutoff: self.contact_cutoff,
            },
            output: OutputParams {
                directory: self
                    .output_dir
                    .ok_or(ConfigError::MissingParameter("output_dir"))?,
                prefix: self.prefix.unwrap_or_else(|| "conformer".to_string()),
                freeze: self.freeze.unwrap_or_default(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> GenerateConfigBuilder {
        GenerateConfigBuilder::new()
            .substrate_path(PathBuf::from("substrate.xyz"))
            .ligand_path(PathBuf::from("ligand.xyz"))
            .samples(100)
            .radius(2.5)
            .site_cutoff(1.5)
            .output_dir(PathBuf::from("out"))
    }

    #[test]
    fn build_succeeds_with_required_fields_and_fills_defaults() {
        let config = complete_builder().build().unwrap();
        assert_eq!(config.output.prefix, "conformer");
        assert_eq!(config.output.freeze, FreezeMode::None);
        assert_eq!(config.axis, AxisSpec::default());
        assert_eq!(config.sampling.contact_cutoff, None);
    }

    #[test]
    fn build_fails_without_substrate_path() {
        let result = GenerateConfigBuilder::new()
            .ligand_path(PathBuf::from("ligand.xyz"))
            .samples(10)
            .radius(1.0)
            .site_cutoff(1.0)
            .output_dir(PathBuf::from("out"))
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("substrate_path")));
    }

    #[test]
    fn build_fails_without_sampling_parameters() {
        let result = GenerateConfigBuilder::new()
            .substrate_path(PathBuf::from("s.xyz"))
            .ligand_path(PathBuf::from("l.xyz"))
            .output_dir(PathBuf::from("out"))
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("samples")));
    }

    #[test]
    fn freeze_substrate_tags_substrate_frozen_and_ligand_free() {
        let tags = FreezeMode::FreezeSubstrate.tags(2, 3).unwrap();
        assert_eq!(
            tags,
            vec![
                Mobility::Frozen,
                Mobility::Frozen,
                Mobility::Free,
                Mobility::Free,
                Mobility::Free
            ]
        );
    }

    #[test]
    fn freeze_ligand_tags_ligand_frozen_and_substrate_free() {
        let tags = FreezeMode::FreezeLigand.tags(1, 2).unwrap();
        assert_eq!(
            tags,
            vec![Mobility::Free, Mobility::Frozen, Mobility::Frozen]
        );
    }

    #[test]
    fn freeze_none_produces_no_tags() {
        assert_eq!(FreezeMode::None.tags(3, 3), None);
    }
}
