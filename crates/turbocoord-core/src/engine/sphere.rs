use crate::engine::error::EngineError;
use nalgebra::Point3;

/// Generates `samples` points on a sphere of `radius` centered at the origin,
/// distributed on a Fibonacci lattice (golden-angle spiral).
///
/// The sequence is fully deterministic: the same inputs always produce the same
/// points in the same order. Downstream output files are named by point index,
/// so `conformer_i` must denote the same geometry on every run.
///
/// # Errors
///
/// `samples < 2` is rejected (the lattice formula divides by `samples - 1`),
/// as is a non-positive radius.
pub fn fibonacci_sphere(samples: usize, radius: f64) -> Result<Vec<Point3<f64>>, EngineError> {
    if samples < 2 {
        return Err(EngineError::InsufficientSamples { requested: samples });
    }
    if radius <= 0.0 {
        return Err(EngineError::NonPositiveRadius { value: radius });
    }

    // Golden angle in radians.
    let phi = std::f64::consts::PI * (3.0 - 5.0f64.sqrt());

    let points = (0..samples)
        .map(|i| {
            // y runs from 1 down to -1.
            let y = 1.0 - (i as f64 / (samples - 1) as f64) * 2.0;
            let ring_radius = (1.0 - y * y).sqrt();
            let theta = phi * i as f64;

            let x = theta.cos() * ring_radius;
            let z = theta.sin() * ring_radius;
            Point3::new(x * radius, y * radius, z * radius)
        })
        .collect();

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn every_point_lies_on_the_sphere_surface() {
        for (samples, radius) in [(2, 1.0), (16, 2.5), (100, 0.3)] {
            let points = fibonacci_sphere(samples, radius).unwrap();
            assert_eq!(points.len(), samples);
            for point in &points {
                assert!(
                    (point.coords.norm() - radius).abs() < TOL,
                    "point {:?} is off the radius-{} sphere",
                    point,
                    radius
                );
            }
        }
    }

    #[test]
    fn sampler_is_deterministic() {
        let first = fibonacci_sphere(50, 2.0).unwrap();
        let second = fibonacci_sphere(50, 2.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn poles_sit_at_plus_and_minus_y() {
        let points = fibonacci_sphere(4, 2.0).unwrap();
        // y descends 1, 1/3, -1/3, -1 (scaled by the radius).
        let expected_y = [2.0, 2.0 / 3.0, -2.0 / 3.0, -2.0];
        for (point, expected) in points.iter().zip(expected_y) {
            assert!((point.y - expected).abs() < TOL);
        }
        // The poles have no equatorial component.
        assert!(points[0].x.abs() < TOL && points[0].z.abs() < TOL);
        assert!(points[3].x.abs() < TOL && points[3].z.abs() < TOL);
    }

    #[test]
    fn no_two_points_coincide() {
        let points = fibonacci_sphere(200, 1.0).unwrap();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                assert!(
                    (points[i] - points[j]).norm() > 1e-6,
                    "points {} and {} coincide",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn single_sample_is_rejected() {
        assert!(matches!(
            fibonacci_sphere(1, 1.0),
            Err(EngineError::InsufficientSamples { requested: 1 })
        ));
        assert!(matches!(
            fibonacci_sphere(0, 1.0),
            Err(EngineError::InsufficientSamples { requested: 0 })
        ));
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        assert!(matches!(
            fibonacci_sphere(10, 0.0),
            Err(EngineError::NonPositiveRadius { .. })
        ));
        assert!(matches!(
            fibonacci_sphere(10, -1.5),
            Err(EngineError::NonPositiveRadius { .. })
        ));
    }
}
