use nalgebra::{DMatrix, Matrix3, Point3, Rotation3, Unit, Vector3};
use thiserror::Error;

// Below this, a vector has no usable direction.
const NORM_EPSILON: f64 = 1e-12;
// Below this, source and target are treated as (anti)parallel.
const SIN_EPSILON: f64 = 1e-10;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("Cannot align a zero-length vector (norm = {norm:e})")]
    DegenerateVector { norm: f64 },
}

/// Computes the rotation `R` with `R * normalize(source) == normalize(target)`.
///
/// Uses the Rodrigues construction `R = I + K + K^2 * (1 - c) / s^2` away from the
/// degenerate configurations, where the formula would divide by `s^2 = 0`:
/// parallel inputs yield the identity, antiparallel inputs a half-turn about an
/// axis perpendicular to `source`.
pub fn rotation_aligning(
    source: &Vector3<f64>,
    target: &Vector3<f64>,
) -> Result<Rotation3<f64>, GeometryError> {
    let source_norm = source.norm();
    if source_norm < NORM_EPSILON {
        return Err(GeometryError::DegenerateVector { norm: source_norm });
    }
    let target_norm = target.norm();
    if target_norm < NORM_EPSILON {
        return Err(GeometryError::DegenerateVector { norm: target_norm });
    }

    let a = source / source_norm;
    let b = target / target_norm;

    let v = a.cross(&b);
    let c = a.dot(&b);
    let s = v.norm();

    if s < SIN_EPSILON {
        if c > 0.0 {
            return Ok(Rotation3::identity());
        }
        return Ok(half_turn_about_perpendicular(&a));
    }

    let k = skew_symmetric(&v);
    let matrix = Matrix3::identity() + k + k * k * ((1.0 - c) / (s * s));
    Ok(Rotation3::from_matrix_unchecked(matrix))
}

// 180 degrees about any axis perpendicular to `a` maps `a` onto `-a`.
fn half_turn_about_perpendicular(a: &Vector3<f64>) -> Rotation3<f64> {
    let seed = if a.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let perpendicular = seed - a * a.dot(&seed);
    let axis = Unit::new_normalize(perpendicular);
    Rotation3::from_axis_angle(&axis, std::f64::consts::PI)
}

fn skew_symmetric(v: &Vector3<f64>) -> Matrix3<f64> {
    Matrix3::new(0.0, -v.z, v.y, v.z, 0.0, -v.x, -v.y, v.x, 0.0)
}

/// Computes the full pairwise distance matrix over a coordinate list.
pub fn distance_matrix(points: &[Point3<f64>]) -> DMatrix<f64> {
    let n = points.len();
    DMatrix::from_fn(n, n, |i, j| (points[i] - points[j]).norm())
}

/// Returns the smallest distance between any point of `a` and any point of `b`,
/// or `None` when either set is empty.
pub fn min_cross_distance(a: &[Point3<f64>], b: &[Point3<f64>]) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    let mut min = f64::INFINITY;
    for pa in a {
        for pb in b {
            let dist = (pa - pb).norm();
            if dist < min {
                min = dist;
            }
        }
    }
    Some(min)
}
