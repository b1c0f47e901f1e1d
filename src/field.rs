use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;

use crate::errors::{Error, ErrorKind};
use crate::grid::Grid;
use crate::math::{clamp_below, clamp_magnitude_below, CpuScalar, Point3d, Vec3d};

/// Floor applied to near-zero denominators.
pub const DEFAULT_EPSILON: CpuScalar = 1e-6;

pub trait VectorField: Sync {
    fn value_at(&self, point: &Point3d) -> Vec3d;
}

/// `g / 4π`, the prefactor shared by the potential and the field.
#[inline]
pub fn monopole_factor(charge: CpuScalar) -> CpuScalar {
    charge / (4.0 * PI)
}

/// Which half of the z axis carries the string singularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gauge {
    /// Denominator `r (r - z)`, singular for `z = r`.
    Upper,
    /// Denominator `r (r + z)`, singular for `z = -r`.
    Lower,
}

impl Gauge {
    #[inline]
    fn string_distance(self, r: CpuScalar, z: CpuScalar) -> CpuScalar {
        match self {
            Gauge::Upper => r - z,
            Gauge::Lower => r + z,
        }
    }
}

impl Default for Gauge {
    fn default() -> Self {
        Gauge::Upper
    }
}

impl FromStr for Gauge {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Error> {
        match value {
            "upper" => Ok(Gauge::Upper),
            "lower" => Ok(Gauge::Lower),
            _ => Err(ErrorKind::InvalidParameter("gauge".into(),
                                                 format!("expected 'upper' or 'lower', got \
                                                          '{}'",
                                                         value))
                .into()),
        }
    }
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Gauge::Upper => write!(f, "upper"),
            Gauge::Lower => write!(f, "lower"),
        }
    }
}

/// Vector potential of a Dirac monopole with the string along the z axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiracPotential {
    pub charge: CpuScalar,
    pub epsilon: CpuScalar,
    pub gauge: Gauge,
}

impl DiracPotential {
    pub fn new(charge: CpuScalar, epsilon: CpuScalar, gauge: Gauge) -> Self {
        DiracPotential {
            charge: charge,
            epsilon: epsilon,
            gauge: gauge,
        }
    }
}

impl VectorField for DiracPotential {
    #[inline]
    fn value_at(&self, point: &Point3d) -> Vec3d {
        let epsilon = self.epsilon;
        let r = point.coords.norm();
        // The string distance uses r before clamping. Each of r, the string
        // distance and their product is floored independently, in this order.
        let string_distance = self.gauge.string_distance(r, point.z);
        let r = clamp_below(r, epsilon);
        let string_distance = clamp_magnitude_below(string_distance, epsilon);
        let denominator = clamp_below(r * string_distance, epsilon);

        let factor = monopole_factor(self.charge);
        Vec3d::new(factor * -point.y / denominator,
                   factor * point.x / denominator,
                   0.0)
    }
}

/// Radial field of a magnetic point charge at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonopoleField {
    pub charge: CpuScalar,
    pub epsilon: CpuScalar,
}

impl MonopoleField {
    pub fn new(charge: CpuScalar, epsilon: CpuScalar) -> Self {
        MonopoleField {
            charge: charge,
            epsilon: epsilon,
        }
    }
}

impl VectorField for MonopoleField {
    #[inline]
    fn value_at(&self, point: &Point3d) -> Vec3d {
        let r = clamp_below(point.coords.norm(), self.epsilon);
        point.coords * (monopole_factor(self.charge) / (r * r * r))
    }
}

/// Evaluates `field` at every grid point. The result is in grid order.
pub fn sample<F: VectorField>(field: &F, grid: &Grid) -> Vec<Vec3d> {
    grid.points().par_iter().map(|point| field.value_at(point)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Axis, Grid};

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!((actual - expected).abs() <= tolerance,
                "{} != {} (tolerance {})",
                actual,
                expected,
                tolerance);
    }

    fn is_finite(v: &Vec3d) -> bool {
        v.iter().all(|c| c.is_finite())
    }

    fn potential() -> DiracPotential {
        DiracPotential::new(1.0, DEFAULT_EPSILON, Gauge::Upper)
    }

    fn magnetic() -> MonopoleField {
        MonopoleField::new(1.0, DEFAULT_EPSILON)
    }

    #[test]
    fn test_magnetic_on_unit_x() {
        let b = magnetic().value_at(&Point3d::new(1.0, 0.0, 0.0));
        assert_close(b.x, 1.0 / (4.0 * PI), 1e-15);
        assert_close(b.x, 0.0796, 1e-4);
        assert_eq!(b.y, 0.0);
        assert_eq!(b.z, 0.0);
    }

    #[test]
    fn test_magnetic_at_origin_is_finite_zero() {
        let b = magnetic().value_at(&Point3d::origin());
        assert!(is_finite(&b));
        assert_eq!(b, Vec3d::zeros());
    }

    #[test]
    fn test_magnetic_inside_clamp_radius() {
        let x = DEFAULT_EPSILON / 2.0;
        let b = magnetic().value_at(&Point3d::new(x, 0.0, 0.0));
        let expected = monopole_factor(1.0) * x / DEFAULT_EPSILON.powi(3);
        assert!(is_finite(&b));
        assert_close(b.x / expected, 1.0, 1e-9);
        assert!(b.x > 1e10);
    }

    #[test]
    fn test_magnetic_scales_with_charge() {
        let p = Point3d::new(0.3, -0.2, 0.7);
        let b1 = magnetic().value_at(&p);
        let b3 = MonopoleField::new(3.0, DEFAULT_EPSILON).value_at(&p);
        assert!((b3 - b1 * 3.0).norm() < 1e-12);
    }

    #[test]
    fn test_potential_on_unit_x() {
        let a = potential().value_at(&Point3d::new(1.0, 0.0, 0.0));
        assert_eq!(a.x, 0.0);
        assert_close(a.y, monopole_factor(1.0), 1e-15);
        assert_eq!(a.z, 0.0);
    }

    #[test]
    fn test_potential_on_string_axis_is_finite() {
        let field = potential();
        for &z in &[-1.0, -0.5, 0.0, 0.5, 1.0] {
            let a = field.value_at(&Point3d::new(0.0, 0.0, z));
            assert!(is_finite(&a), "non-finite at z = {}", z);
            assert_eq!(a, Vec3d::zeros());
        }
    }

    #[test]
    fn test_potential_next_to_string_is_bounded() {
        let point = Point3d::new(1e-4, 0.0, 1.0);
        let a = potential().value_at(&point);
        let r = point.coords.norm();
        // r - z underflows the floor and is replaced by epsilon.
        let expected = monopole_factor(1.0) * 1e-4 / (r * DEFAULT_EPSILON);
        assert!(is_finite(&a));
        assert_close(a.y / expected, 1.0, 1e-6);
    }

    #[test]
    fn test_potential_clamps_product_after_factors() {
        // r and r - z both clear the floor but their product does not.
        let a = potential().value_at(&Point3d::new(1e-4, 0.0, 0.0));
        let expected = monopole_factor(1.0) * 1e-4 / DEFAULT_EPSILON;
        assert_close(a.y / expected, 1.0, 1e-9);
    }

    #[test]
    fn test_lower_gauge_moves_singularity() {
        let upper = potential();
        let lower = DiracPotential::new(1.0, DEFAULT_EPSILON, Gauge::Lower);
        let p = Point3d::new(1.0, 0.0, 0.0);
        assert_eq!(upper.value_at(&p), lower.value_at(&p));

        let below = Point3d::new(1e-3, 0.0, -1.0);
        let above = Point3d::new(1e-3, 0.0, 1.0);
        assert!(lower.value_at(&below).norm() > lower.value_at(&above).norm());
        assert!(upper.value_at(&above).norm() > upper.value_at(&below).norm());
    }

    #[test]
    fn test_all_grid_samples_finite() {
        let grids = vec![Grid::cube(1.0, 8),
                         Grid::new(Axis::symmetric(1.0, 10),
                                   Axis::symmetric(1.0, 10),
                                   Axis::symmetric(1.0, 3)),
                         Grid::cube(1.0, 5)];
        for grid in &grids {
            assert!(sample(&potential(), grid).iter().all(is_finite));
            assert!(sample(&magnetic(), grid).iter().all(is_finite));
        }
    }

    #[test]
    fn test_sample_preserves_grid_order() {
        let grid = Grid::cube(1.0, 5);
        let field = magnetic();
        let parallel = sample(&field, &grid);
        let sequential: Vec<Vec3d> = grid.points().iter().map(|p| field.value_at(p)).collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_gauge_from_str() {
        assert_eq!("upper".parse::<Gauge>().unwrap(), Gauge::Upper);
        assert_eq!("lower".parse::<Gauge>().unwrap(), Gauge::Lower);
        assert!("north".parse::<Gauge>().is_err());
    }
}
