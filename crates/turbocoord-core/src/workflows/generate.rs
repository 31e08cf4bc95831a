use crate::core::io::traits::CoordinateFile;
use crate::core::io::xyz::XyzFile;
use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::GeometryError;
use crate::engine::assembly::Conformer;
use crate::engine::clash::partition_by_clearance;
use crate::engine::config::{GenerateConfig, SamplingParams};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::sphere::fibonacci_sphere;
use nalgebra::{Point3, Vector3};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Placeholder element for preview dummy atoms; not a real element symbol.
const PREVIEW_DUMMY_ELEMENT: &str = "XX";

/// A write failure for one conformer.
///
/// Failures are collected per conformer so one bad destination never aborts its
/// siblings; the caller decides whether to retry.
#[derive(Debug)]
pub struct ConformerFailure {
    /// The sample-point index of the conformer that failed.
    pub index: usize,
    /// The path the conformer was being written to.
    pub path: PathBuf,
    pub error: EngineError,
}

/// Summary of a generation run.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Files written, in sample order.
    pub written: Vec<PathBuf>,
    /// Total points sampled on the sphere.
    pub sampled: usize,
    /// Points rejected for clashing with the substrate.
    pub rejected_points: usize,
    /// Assembled conformers rejected by the contact screen.
    pub rejected_conformers: usize,
    /// Per-conformer write failures.
    pub failures: Vec<ConformerFailure>,
}

enum PointOutcome {
    Written(PathBuf),
    Screened,
    Failed(ConformerFailure),
}

/// Runs the full generation pipeline described by `config`.
///
/// Phases: load and recenter both input structures, derive the ligand reference
/// axis, sample the placement sphere, partition the points against the substrate
/// cloud, then map every valid point to an assembled, screened, and serialized
/// conformer. The per-point stage is a pure map over immutable templates and
/// runs in parallel when the `parallel` feature is enabled; results are
/// identical either way.
///
/// # Errors
///
/// Fails fast on invalid parameters, unreadable inputs, or a degenerate
/// reference axis. Per-conformer write failures do NOT fail the run; they are
/// collected in the report.
#[instrument(skip_all, name = "generate_workflow")]
pub fn run(
    config: &GenerateConfig,
    reporter: &ProgressReporter,
) -> Result<GenerateReport, EngineError> {
    // === Phase 1: Load input templates ===
    reporter.report(Progress::PhaseStart { name: "Loading" });
    info!(
        substrate = %config.substrate_path.display(),
        ligand = %config.ligand_path.display(),
        "Loading input structures."
    );

    let substrate = load_recentered(&config.substrate_path)?;
    let ligand = load_recentered(&config.ligand_path)?;
    let axis = ligand.reference_axis(&config.axis)?;
    if axis.norm() < 1e-12 {
        return Err(GeometryError::DegenerateVector { norm: axis.norm() }.into());
    }
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Sample and filter placement points ===
    reporter.report(Progress::PhaseStart { name: "Sampling" });
    let points = fibonacci_sphere(config.sampling.samples, config.sampling.radius)?;
    let substrate_cloud = substrate.positions();
    let partition =
        partition_by_clearance(&points, &substrate_cloud, config.sampling.site_cutoff)?;
    reporter.report(Progress::PhaseFinish);

    if partition.valid.is_empty() {
        // A fully blocked sphere is an ordinary empty result, not an error.
        warn!("No sample point clears the substrate; nothing to generate.");
        return Ok(GenerateReport {
            sampled: points.len(),
            rejected_points: partition.invalid.len(),
            ..GenerateReport::default()
        });
    }

    // === Phase 3: Assemble and write conformers ===
    std::fs::create_dir_all(&config.output.directory).map_err(|e| EngineError::Write {
        path: config.output.directory.clone(),
        source: e.into(),
    })?;

    reporter.report(Progress::ConformerBatchStart {
        total_conformers: partition.valid.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = partition.valid.iter();

    #[cfg(feature = "parallel")]
    let iterator = partition.valid.par_iter();

    let outcomes: Vec<PointOutcome> = iterator
        .map(|&(index, point)| {
            let outcome = generate_one(&substrate, &ligand, &axis, index, point, config);
            reporter.report(Progress::ConformerDone);
            outcome
        })
        .collect();

    reporter.report(Progress::ConformerBatchFinish);

    let mut report = GenerateReport {
        sampled: points.len(),
        rejected_points: partition.invalid.len(),
        ..GenerateReport::default()
    };
    for outcome in outcomes {
        match outcome {
            PointOutcome::Written(path) => report.written.push(path),
            PointOutcome::Screened => report.rejected_conformers += 1,
            PointOutcome::Failed(failure) => report.failures.push(failure),
        }
    }

    info!(
        written = report.written.len(),
        rejected_points = report.rejected_points,
        rejected_conformers = report.rejected_conformers,
        failures = report.failures.len(),
        "Generation complete."
    );
    Ok(report)
}

fn generate_one(
    substrate: &Structure,
    ligand: &Structure,
    axis: &Vector3<f64>,
    index: usize,
    point: Point3<f64>,
    config: &GenerateConfig,
) -> PointOutcome {
    let path = config
        .output
        .directory
        .join(format!("{}_{}.xyz", config.output.prefix, index));

    let conformer = match Conformer::assemble(substrate, ligand, axis, point) {
        Ok(conformer) => conformer,
        Err(error) => {
            return PointOutcome::Failed(ConformerFailure { index, path, error });
        }
    };

    if let Some(cutoff) = config.sampling.contact_cutoff {
        if !conformer.clears_contact_cutoff(cutoff) {
            return PointOutcome::Screened;
        }
    }

    match write_conformer(&conformer, config, &path) {
        Ok(()) => PointOutcome::Written(path),
        Err(error) => PointOutcome::Failed(ConformerFailure { index, path, error }),
    }
}

fn write_conformer(
    conformer: &Conformer,
    config: &GenerateConfig,
    path: &Path,
) -> Result<(), EngineError> {
    let atoms = conformer.atoms();
    let tags = config
        .output
        .freeze
        .tags(conformer.substrate().len(), conformer.ligand().len());

    let mut buffer = Vec::new();
    match tags {
        Some(tags) => XyzFile::write_tagged_to(&atoms, &tags, &mut buffer),
        None => XyzFile::write_atoms_to(&atoms, &mut buffer),
    }
    .and_then(|()| std::fs::write(path, buffer).map_err(Into::into))
    .map_err(|source| EngineError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Summary of a preview dump.
#[derive(Debug)]
pub struct PreviewReport {
    pub path: PathBuf,
    pub valid_points: usize,
    pub invalid_points: usize,
}

/// Writes the substrate plus every valid sample point (as dummy `XX` atoms) into
/// a single file, for visual inspection of the lattice before a full run.
#[instrument(skip_all, name = "preview_workflow")]
pub fn preview(
    substrate_path: &Path,
    sampling: &SamplingParams,
    output_path: &Path,
) -> Result<PreviewReport, EngineError> {
    let substrate = load_recentered(substrate_path)?;
    let points = fibonacci_sphere(sampling.samples, sampling.radius)?;
    let partition = partition_by_clearance(&points, &substrate.positions(), sampling.site_cutoff)?;

    let mut atoms = substrate.atoms().to_vec();
    atoms.extend(
        partition
            .valid
            .iter()
            .map(|(_, point)| Atom::new(PREVIEW_DUMMY_ELEMENT, *point)),
    );

    let mut buffer = Vec::new();
    XyzFile::write_atoms_to(&atoms, &mut buffer)
        .and_then(|()| std::fs::write(output_path, buffer).map_err(Into::into))
        .map_err(|source| EngineError::Write {
            path: output_path.to_path_buf(),
            source,
        })?;

    info!(
        path = %output_path.display(),
        valid = partition.valid.len(),
        invalid = partition.invalid.len(),
        "Wrote sample-sphere preview."
    );
    Ok(PreviewReport {
        path: output_path.to_path_buf(),
        valid_points: partition.valid.len(),
        invalid_points: partition.invalid.len(),
    })
}

fn load_recentered(path: &Path) -> Result<Structure, EngineError> {
    let structure = XyzFile::read_from_path(path).map_err(|source| EngineError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(structure.recenter_to_first_atom())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{FreezeMode, GenerateConfigBuilder};
    use std::io::Write as _;
    use tempfile::TempDir;

    fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    // Substrate: a single oxygen. Ligand: tip atom at the local origin with two
    // base atoms behind it (raw axis +x); the default negation makes the base
    // atoms trail outward behind the tip after orientation.
    fn test_inputs(dir: &Path) -> (PathBuf, PathBuf) {
        let substrate = write_input(dir, "substrate.xyz", "1\n\nO 0.0 0.0 0.0\n");
        let ligand = write_input(
            dir,
            "ligand.xyz",
            "3\n\nO 0.0 0.0 0.0\nH -1.0 0.5 0.0\nH -1.0 -0.5 0.0\n",
        );
        (substrate, ligand)
    }

    fn base_config(dir: &Path) -> GenerateConfigBuilder {
        let (substrate, ligand) = test_inputs(dir);
        GenerateConfigBuilder::new()
            .substrate_path(substrate)
            .ligand_path(ligand)
            .samples(4)
            .radius(2.0)
            .site_cutoff(1.5)
            .output_dir(dir.join("out"))
            .prefix("test".to_string())
    }

    #[test]
    fn generates_one_file_per_valid_point() {
        let dir = TempDir::new().unwrap();
        let config = base_config(dir.path()).build().unwrap();

        let report = run(&config, &ProgressReporter::new()).unwrap();

        // A single substrate atom at the origin blocks nothing at radius 2.
        assert_eq!(report.sampled, 4);
        assert_eq!(report.rejected_points, 0);
        assert_eq!(report.written.len(), 4);
        assert!(report.failures.is_empty());
        for (i, path) in report.written.iter().enumerate() {
            assert_eq!(
                path.file_name().unwrap().to_str().unwrap(),
                format!("test_{}.xyz", i)
            );
            assert!(path.exists());
        }
    }

    #[test]
    fn written_files_contain_substrate_then_ligand() {
        let dir = TempDir::new().unwrap();
        let config = base_config(dir.path()).build().unwrap();

        let report = run(&config, &ProgressReporter::new()).unwrap();
        let content = std::fs::read_to_string(&report.written[0]).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "4");
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("O "));
        assert!(lines[3].starts_with("O "));
        assert!(lines[4].starts_with("H "));
        assert!(lines[5].starts_with("H "));
    }

    #[test]
    fn pipeline_is_idempotent_byte_for_byte() {
        let dir = TempDir::new().unwrap();
        let config = base_config(dir.path()).build().unwrap();

        let first = run(&config, &ProgressReporter::new()).unwrap();
        let first_bytes: Vec<Vec<u8>> = first
            .written
            .iter()
            .map(|p| std::fs::read(p).unwrap())
            .collect();

        let second = run(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(first.written, second.written);
        for (path, bytes) in second.written.iter().zip(first_bytes) {
            assert_eq!(std::fs::read(path).unwrap(), bytes);
        }
    }

    #[test]
    fn freeze_substrate_adds_mobility_tags() {
        let dir = TempDir::new().unwrap();
        let config = base_config(dir.path())
            .freeze(FreezeMode::FreezeSubstrate)
            .build()
            .unwrap();

        let report = run(&config, &ProgressReporter::new()).unwrap();
        let content = std::fs::read_to_string(&report.written[0]).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        // Substrate line tagged -1, ligand lines tagged 0.
        assert!(lines[2].starts_with("O  -1 "));
        assert!(lines[3].starts_with("O  0 "));
        assert!(lines[4].starts_with("H  0 "));
    }

    #[test]
    fn ligand_lands_on_the_sphere_pole() {
        let dir = TempDir::new().unwrap();
        let config = base_config(dir.path()).build().unwrap();

        let report = run(&config, &ProgressReporter::new()).unwrap();
        // Sample index 0 is the +y pole at radius 2.
        let content = std::fs::read_to_string(&report.written[0]).unwrap();
        let ligand_tip: Vec<f64> = content
            .lines()
            .nth(3)
            .unwrap()
            .split_whitespace()
            .skip(1)
            .map(|v| v.parse().unwrap())
            .collect();

        assert!(ligand_tip[0].abs() < 1e-9);
        assert!((ligand_tip[1] - 2.0).abs() < 1e-9);
        assert!(ligand_tip[2].abs() < 1e-9);
    }

    #[test]
    fn contact_screen_rejects_conformers_that_sit_too_close() {
        let dir = TempDir::new().unwrap();
        // The ligand tip lands exactly on the radius-2 sphere, so every
        // conformer's closest substrate contact is 2.0 and a 2.5 cutoff
        // rejects all of them.
        let config = base_config(dir.path())
            .contact_cutoff(Some(2.5))
            .build()
            .unwrap();

        let report = run(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(report.written.len(), 0);
        assert_eq!(report.rejected_conformers, 4);
    }

    #[test]
    fn blocked_sphere_is_an_empty_result_not_an_error() {
        let dir = TempDir::new().unwrap();
        let (substrate, ligand) = test_inputs(dir.path());
        let config = GenerateConfigBuilder::new()
            .substrate_path(substrate)
            .ligand_path(ligand)
            .samples(8)
            .radius(1.0)
            // Cutoff beyond the radius rejects every point.
            .site_cutoff(1.5)
            .output_dir(dir.path().join("out"))
            .build()
            .unwrap();

        let report = run(&config, &ProgressReporter::new()).unwrap();
        assert!(report.written.is_empty());
        assert_eq!(report.rejected_points, 8);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn malformed_substrate_fails_the_whole_load() {
        let dir = TempDir::new().unwrap();
        let substrate = write_input(dir.path(), "bad.xyz", "2\n\nO 0.0 0.0 0.0\n");
        let (_, ligand) = test_inputs(dir.path());
        let config = GenerateConfigBuilder::new()
            .substrate_path(substrate)
            .ligand_path(ligand)
            .samples(4)
            .radius(2.0)
            .site_cutoff(1.0)
            .output_dir(dir.path().join("out"))
            .build()
            .unwrap();

        let result = run(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::Load { .. })));
    }

    #[test]
    fn preview_writes_substrate_plus_dummy_points() {
        let dir = TempDir::new().unwrap();
        let (substrate, _) = test_inputs(dir.path());
        let sampling = SamplingParams {
            samples: 6,
            radius: 2.0,
            site_cutoff: 1.0,
            contact_cutoff: None,
        };
        let output = dir.path().join("preview.xyz");

        let report = preview(&substrate, &sampling, &output).unwrap();

        assert_eq!(report.valid_points, 6);
        assert_eq!(report.invalid_points, 0);
        let content = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "7");
        assert_eq!(lines.iter().filter(|l| l.starts_with("XX")).count(), 6);
    }
}
