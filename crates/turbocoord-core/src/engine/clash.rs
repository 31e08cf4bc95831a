use crate::engine::error::EngineError;
use nalgebra::Point3;
use tracing::{debug, info};

/// The outcome of screening sample points against an atom cloud.
///
/// Both partitions preserve the original sampling order, and `valid` keeps each
/// point's index in the full sampled sequence so output files stay deterministically
/// numbered even after rejection.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionedPoints {
    /// Points clear of every atom, with their original sample index.
    pub valid: Vec<(usize, Point3<f64>)>,
    /// Points within the cutoff of at least one atom.
    pub invalid: Vec<Point3<f64>>,
}

/// Returns true when `point` is strictly farther than `cutoff` from every
/// position in `cloud`.
///
/// The comparison is strict: a point at exactly the cutoff distance clashes.
pub fn clears_cloud(point: &Point3<f64>, cloud: &[Point3<f64>], cutoff: f64) -> bool {
    cloud.iter().all(|atom| (point - atom).norm() > cutoff)
}

/// Partitions sample points into those clear of the atom cloud and those that
/// clash with it.
///
/// # Errors
///
/// Fails fast on a non-positive cutoff.
pub fn partition_by_clearance(
    points: &[Point3<f64>],
    cloud: &[Point3<f64>],
    cutoff: f64,
) -> Result<PartitionedPoints, EngineError> {
    if cutoff <= 0.0 {
        return Err(EngineError::NonPositiveCutoff { value: cutoff });
    }

    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    for (index, point) in points.iter().enumerate() {
        if clears_cloud(point, cloud, cutoff) {
            valid.push((index, *point));
        } else {
            debug!(index, "Sample point clashes with the substrate.");
            invalid.push(*point);
        }
    }

    info!(
        valid = valid.len(),
        invalid = invalid.len(),
        cutoff,
        "Partitioned sample points."
    );
    Ok(PartitionedPoints { valid, invalid })
}
