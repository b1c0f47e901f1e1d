use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::colormap::Colormap;
use crate::errors::{Error, ErrorKind, Result};
use crate::field::{self, DiracPotential, Gauge, MonopoleField, DEFAULT_EPSILON};
use crate::glyph::{build_glyphs, Glyph};
use crate::grid::{Axis, Grid};
use crate::math::{CpuScalar, GpuScalar, Point3d, Vec3d};
use crate::normalize::{normalize, Normalized, ScalarRange};

/// Which quantity is sampled and drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Dirac vector potential `A`.
    Potential,
    /// Monopole magnetic field `B`.
    Magnetic,
}

impl FieldKind {
    pub fn symbol(&self) -> &'static str {
        match *self {
            FieldKind::Potential => "A",
            FieldKind::Magnetic => "B",
        }
    }
}

impl FromStr for FieldKind {
    type Err = Error;

    fn from_str(value: &str) -> ::std::result::Result<Self, Error> {
        match value {
            "potential" | "A" => Ok(FieldKind::Potential),
            "magnetic" | "B" => Ok(FieldKind::Magnetic),
            _ => Err(ErrorKind::UnknownPreset(value.into()).into()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FieldKind::Potential => write!(f, "potential"),
            FieldKind::Magnetic => write!(f, "magnetic"),
        }
    }
}

/// Red marker for the Dirac string: a cylinder running from the origin
/// down to `z = -length`, capped by a cone pointing further down. It always
/// sits on the negative z half axis, which is where `Gauge::Lower` is
/// singular; the default `Gauge::Upper` string runs along +z.
#[derive(Clone, Debug, PartialEq)]
pub struct StringMarker {
    pub length: CpuScalar,
    pub radius: CpuScalar,
    pub opacity: GpuScalar,
    pub tip_height: CpuScalar,
    pub tip_radius: CpuScalar,
    pub tip_opacity: GpuScalar,
    pub color: [GpuScalar; 3],
}

impl Default for StringMarker {
    fn default() -> Self {
        StringMarker {
            length: 1.6,
            radius: 0.02,
            opacity: 0.6,
            tip_height: 0.2,
            tip_radius: 0.05,
            tip_opacity: 0.8,
            color: [1.0, 0.0, 0.0],
        }
    }
}

impl StringMarker {
    pub fn direction(&self) -> Vec3d {
        -Vec3d::z()
    }

    pub fn center(&self) -> Point3d {
        Point3d::new(0.0, 0.0, -self.length / 2.0)
    }

    pub fn tip_center(&self) -> Point3d {
        Point3d::new(0.0, 0.0, -self.length)
    }
}

/// Text pinned to a point in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub position: Point3d,
    pub text: String,
}

impl Label {
    pub fn new<S: Into<String>>(position: Point3d, text: S) -> Self {
        Label {
            position: position,
            text: text.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraSpec {
    /// Direction from the focal point towards the eye.
    pub view_vector: Vec3d,
    pub view_up: Vec3d,
    pub zoom: CpuScalar,
}

/// Every constant of a single render.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSpec {
    pub field: FieldKind,
    pub axes: [Axis; 3],
    pub charge: CpuScalar,
    pub epsilon: CpuScalar,
    pub gauge: Gauge,
    pub glyph_scale: CpuScalar,
    pub recenter_glyphs: bool,
    pub colormap: Colormap,
    pub string_marker: Option<StringMarker>,
    pub labels: Vec<Label>,
    pub font_size: u32,
    pub label_color: [GpuScalar; 4],
    pub show_axes: bool,
    pub camera: CameraSpec,
    pub width: u32,
    pub height: u32,
    pub background: [GpuScalar; 3],
    pub output: PathBuf,
}

impl Default for SceneSpec {
    fn default() -> Self {
        SceneSpec::potential()
    }
}

impl SceneSpec {
    /// Vector potential on a 10 x 10 x 3 grid with the string marker and
    /// z-plane labels.
    pub fn potential() -> Self {
        SceneSpec {
            field: FieldKind::Potential,
            axes: [Axis::symmetric(1.0, 10), Axis::symmetric(1.0, 10), Axis::symmetric(1.0, 3)],
            charge: 1.0,
            epsilon: DEFAULT_EPSILON,
            gauge: Gauge::Upper,
            glyph_scale: 0.2,
            recenter_glyphs: true,
            colormap: Colormap::Viridis,
            string_marker: Some(StringMarker::default()),
            labels: vec![Label::new(Point3d::new(-1.5, 0.4, -1.0), "z = –1"),
                         Label::new(Point3d::new(-1.5, 0.4, 0.0), "z = 0"),
                         Label::new(Point3d::new(-1.5, 0.4, 1.0), "z = 1")],
            font_size: 32,
            label_color: [0.0, 0.0, 0.0, 1.0],
            show_axes: true,
            camera: CameraSpec {
                view_vector: Vec3d::new(0.0, 8.0, 2.0),
                view_up: Vec3d::z(),
                zoom: 1.4,
            },
            width: 1000,
            height: 600,
            background: [1.0, 1.0, 1.0],
            output: PathBuf::from("dirac_A.png"),
        }
    }

    /// Monopole field on an 8 x 8 x 8 grid.
    pub fn magnetic() -> Self {
        SceneSpec {
            field: FieldKind::Magnetic,
            axes: [Axis::symmetric(1.0, 8); 3],
            colormap: Colormap::Plasma,
            string_marker: None,
            labels: vec![],
            camera: CameraSpec {
                view_vector: Vec3d::new(0.0, 7.0, 0.5),
                view_up: Vec3d::z(),
                zoom: 1.4,
            },
            output: PathBuf::from("dirac_B.png"),
            ..SceneSpec::potential()
        }
    }

    pub fn preset(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Potential => SceneSpec::potential(),
            FieldKind::Magnetic => SceneSpec::magnetic(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (axis, name) in self.axes.iter().zip(&["nx", "ny", "nz"]) {
            if axis.count == 0 {
                return Err(invalid(name, "at least one sample is required"));
            }
            if !(axis.start.is_finite() && axis.end.is_finite()) {
                return Err(invalid(name, "axis bounds must be finite"));
            }
        }
        if !self.charge.is_finite() {
            return Err(invalid("charge", "must be finite"));
        }
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(invalid("epsilon", "must be positive"));
        }
        if !(self.glyph_scale > 0.0 && self.glyph_scale.is_finite()) {
            return Err(invalid("glyph-scale", "must be positive"));
        }
        if !(self.camera.zoom > 0.0 && self.camera.zoom.is_finite()) {
            return Err(invalid("zoom", "must be positive"));
        }
        if self.camera.view_vector.norm_squared() == 0.0 {
            return Err(invalid("view-vector", "must be non-zero"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(invalid("width/height", "must be non-zero"));
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.axes[0], self.axes[1], self.axes[2])
    }

    pub fn sample(&self, grid: &Grid) -> Vec<Vec3d> {
        match self.field {
            FieldKind::Potential => {
                field::sample(&DiracPotential::new(self.charge, self.epsilon, self.gauge), grid)
            }
            FieldKind::Magnetic => {
                field::sample(&MonopoleField::new(self.charge, self.epsilon), grid)
            }
        }
    }

    /// Runs grid generation, field evaluation, normalisation and glyph
    /// placement.
    pub fn compute(&self) -> FieldSamples {
        let grid = self.grid();
        let vectors = self.sample(&grid);
        let normalized = normalize(&vectors, self.epsilon);
        let glyphs = build_glyphs(grid.points(),
                                  &normalized,
                                  self.glyph_scale,
                                  self.recenter_glyphs);
        let range = ScalarRange::of_samples(&normalized);
        FieldSamples {
            grid: grid,
            vectors: vectors,
            normalized: normalized,
            glyphs: glyphs,
            range: range,
        }
    }
}

fn invalid(name: &str, reason: &str) -> Error {
    ErrorKind::InvalidParameter(name.into(), reason.into()).into()
}

/// Everything computed from a grid before any rendering.
#[derive(Clone, Debug)]
pub struct FieldSamples {
    pub grid: Grid,
    pub vectors: Vec<Vec3d>,
    pub normalized: Vec<Normalized>,
    pub glyphs: Vec<Glyph>,
    pub range: Option<ScalarRange>,
}

impl FieldSamples {
    pub fn magnitude_range(&self) -> Option<(CpuScalar, CpuScalar)> {
        ScalarRange::of(self.normalized.iter().map(|sample| sample.magnitude))
            .map(|range| (range.min, range.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::VectorField;

    #[test]
    fn test_string_marker_follows_negative_z() {
        let marker = StringMarker::default();
        assert_eq!(marker.direction(), -Vec3d::z());

        let near_marker = marker.center() + Vec3d::new(1e-3, 0.0, 0.0);
        let lower = DiracPotential::new(1.0, DEFAULT_EPSILON, Gauge::Lower);
        let upper = DiracPotential::new(1.0, DEFAULT_EPSILON, Gauge::Upper);
        assert!(lower.value_at(&near_marker).norm() > 50.0);
        assert!(upper.value_at(&near_marker).norm() < 1e-3);

        // Mirrored above the origin the roles swap.
        let mirrored = Point3d::new(near_marker.x, near_marker.y, -near_marker.z);
        assert!(upper.value_at(&mirrored).norm() > 50.0);
    }

    #[test]
    fn test_potential_preset() {
        let spec = SceneSpec::potential();
        assert!(spec.validate().is_ok());
        assert_eq!(spec.grid().shape(), [10, 10, 3]);
        assert_eq!(spec.colormap, Colormap::Viridis);
        assert_eq!(spec.labels.len(), 3);
        assert_eq!(spec.output, PathBuf::from("dirac_A.png"));
        let marker = spec.string_marker.unwrap();
        assert_eq!(marker.center(), Point3d::new(0.0, 0.0, -0.8));
        assert_eq!(marker.tip_center(), Point3d::new(0.0, 0.0, -1.6));
    }

    #[test]
    fn test_magnetic_preset() {
        let spec = SceneSpec::magnetic();
        assert!(spec.validate().is_ok());
        assert_eq!(spec.grid().shape(), [8, 8, 8]);
        assert_eq!(spec.colormap, Colormap::Plasma);
        assert!(spec.string_marker.is_none());
        assert!(spec.labels.is_empty());
        assert_eq!(spec.camera.view_vector, Vec3d::new(0.0, 7.0, 0.5));
        assert_eq!((spec.width, spec.height), (1000, 600));
        assert_eq!(spec.glyph_scale, 0.2);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut spec = SceneSpec::magnetic();
        spec.epsilon = 0.0;
        assert!(spec.validate().is_err());

        let mut spec = SceneSpec::magnetic();
        spec.axes[2].count = 0;
        assert!(spec.validate().is_err());

        let mut spec = SceneSpec::potential();
        spec.camera.zoom = -1.0;
        assert!(spec.validate().is_err());

        let mut spec = SceneSpec::potential();
        spec.width = 0;
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_compute_magnetic() {
        let samples = SceneSpec::magnetic().compute();
        assert_eq!(samples.vectors.len(), 512);
        assert_eq!(samples.glyphs.len(), 512);
        assert!(samples.vectors.iter().all(|v| v.iter().all(|c| c.is_finite())));

        // The corner (1, 1, 1) points radially outwards.
        let corner = samples.normalized[511];
        let radial = Vec3d::new(1.0, 1.0, 1.0).normalize();
        assert!((corner.direction - radial).norm() < 1e-4);

        let range = samples.range.unwrap();
        assert!(range.min < range.max);
        let (min, max) = samples.magnitude_range().unwrap();
        assert!(min > 0.0 && min < max);
    }

    #[test]
    fn test_compute_potential_is_azimuthal() {
        let samples = SceneSpec::potential().compute();
        assert_eq!(samples.glyphs.len(), 300);
        for (point, vector) in samples.grid.points().iter().zip(&samples.vectors) {
            assert_eq!(vector.z, 0.0);
            // A is perpendicular to the radial direction in the xy plane.
            assert!((point.x * vector.x + point.y * vector.y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_field_kind_parse() {
        assert_eq!("potential".parse::<FieldKind>().unwrap(), FieldKind::Potential);
        assert_eq!("B".parse::<FieldKind>().unwrap(), FieldKind::Magnetic);
        assert!("electric".parse::<FieldKind>().is_err());
        assert_eq!(FieldKind::Magnetic.symbol(), "B");
    }
}
