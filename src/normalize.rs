use rayon::prelude::*;

use crate::math::{CpuScalar, Vec3d};

/// A field sample split into its direction and display magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalized {
    pub direction: Vec3d,
    pub magnitude: CpuScalar,
    /// `log10(magnitude + epsilon)`, used for colouring.
    pub scalar: CpuScalar,
}

impl Normalized {
    #[inline]
    pub fn new(vector: &Vec3d, epsilon: CpuScalar) -> Self {
        let magnitude = vector.norm();
        Normalized {
            direction: vector / (magnitude + epsilon),
            magnitude: magnitude,
            scalar: (magnitude + epsilon).log10(),
        }
    }
}

pub fn normalize(vectors: &[Vec3d], epsilon: CpuScalar) -> Vec<Normalized> {
    vectors.par_iter().map(|vector| Normalized::new(vector, epsilon)).collect()
}

/// Closed interval spanned by a set of scalars.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalarRange {
    pub min: CpuScalar,
    pub max: CpuScalar,
}

impl ScalarRange {
    pub fn of<I>(values: I) -> Option<Self>
        where I: IntoIterator<Item = CpuScalar>
    {
        values.into_iter().fold(None, |range, value| {
            Some(match range {
                None => ScalarRange { min: value, max: value },
                Some(ScalarRange { min, max }) => {
                    ScalarRange {
                        min: min.min(value),
                        max: max.max(value),
                    }
                }
            })
        })
    }

    pub fn of_samples(samples: &[Normalized]) -> Option<Self> {
        ScalarRange::of(samples.iter().map(|sample| sample.scalar))
    }

    /// Position of `value` within the range, clamped to `[0, 1]`. A
    /// degenerate range maps everything to 0.
    pub fn fraction(&self, value: CpuScalar) -> CpuScalar {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.0
        } else {
            ((value - self.min) / span).max(0.0).min(1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{sample, DiracPotential, Gauge, MonopoleField, DEFAULT_EPSILON};
    use crate::grid::{Axis, Grid};

    #[test]
    fn test_unit_x_magnetic_sample() {
        let b = Vec3d::new(1.0 / (4.0 * ::std::f64::consts::PI), 0.0, 0.0);
        let n = Normalized::new(&b, DEFAULT_EPSILON);
        assert!((n.magnitude - 0.0796).abs() < 1e-4);
        assert!((n.direction.x - 1.0).abs() < 1e-4);
        assert_eq!(n.direction.y, 0.0);
        assert_eq!(n.direction.z, 0.0);
        assert!((n.scalar - (-1.099)).abs() < 1e-3);
        assert_eq!(n.scalar, (n.magnitude + DEFAULT_EPSILON).log10());
    }

    #[test]
    fn test_zero_vector_is_not_nan() {
        let n = Normalized::new(&Vec3d::zeros(), DEFAULT_EPSILON);
        assert_eq!(n.direction, Vec3d::zeros());
        assert_eq!(n.magnitude, 0.0);
        assert!((n.scalar - (-6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_potential_directions_are_unit() {
        let grid = Grid::new(Axis::symmetric(1.0, 10),
                             Axis::symmetric(1.0, 10),
                             Axis::symmetric(1.0, 3));
        let field = DiracPotential::new(1.0, DEFAULT_EPSILON, Gauge::Upper);
        let vectors = sample(&field, &grid);
        for n in normalize(&vectors, DEFAULT_EPSILON) {
            let norm = n.direction.norm();
            if n.magnitude == 0.0 {
                assert_eq!(norm, 0.0);
            } else {
                // v / (|v| + eps) falls short of unit length by eps / |v|.
                let tolerance = 1e-6 + DEFAULT_EPSILON / n.magnitude;
                assert!((norm - 1.0).abs() <= tolerance,
                        "norm {} at magnitude {}",
                        norm,
                        n.magnitude);
            }
        }
    }

    #[test]
    fn test_directions_bounded_everywhere() {
        let grid = Grid::cube(1.0, 7);
        let field = MonopoleField::new(1.0, DEFAULT_EPSILON);
        for n in normalize(&sample(&field, &grid), DEFAULT_EPSILON) {
            assert!(n.direction.iter().all(|c| c.is_finite()));
            assert!(n.direction.norm() <= 1.0);
            assert!(n.scalar.is_finite());
        }
    }

    #[test]
    fn test_scalar_is_monotonic_in_magnitude() {
        let magnitudes = [0.0, 1e-9, 1e-6, 1e-3, 0.0796, 1.0, 1e6];
        let scalars: Vec<f64> = magnitudes.iter()
            .map(|&m| Normalized::new(&Vec3d::new(0.0, m, 0.0), DEFAULT_EPSILON).scalar)
            .collect();
        for pair in scalars.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_normalize_preserves_order() {
        let vectors = vec![Vec3d::new(2.0, 0.0, 0.0), Vec3d::new(0.0, 0.0, -3.0)];
        let normalized = normalize(&vectors, DEFAULT_EPSILON);
        assert_eq!(normalized[0].magnitude, 2.0);
        assert_eq!(normalized[1].magnitude, 3.0);
        assert!(normalized[1].direction.z < 0.0);
    }

    #[test]
    fn test_scalar_range() {
        let range = ScalarRange::of(vec![-1.0, 2.0, 0.5]).unwrap();
        assert_eq!(range, ScalarRange { min: -1.0, max: 2.0 });
        assert_eq!(range.fraction(-1.0), 0.0);
        assert_eq!(range.fraction(2.0), 1.0);
        assert_eq!(range.fraction(0.5), 0.5);
        assert_eq!(range.fraction(10.0), 1.0);
        assert!(ScalarRange::of(Vec::new()).is_none());
        assert_eq!(ScalarRange { min: 1.0, max: 1.0 }.fraction(1.0), 0.0);
    }
}
