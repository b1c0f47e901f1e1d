use nalgebra::{Similarity3, Translation3, UnitQuaternion};

use crate::math::{rotation_from_x, CpuScalar, Point3d, Vec3d};
use crate::normalize::Normalized;

/// Placement of one arrow glyph. The arrow's tail sits at `anchor` and it
/// points along `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub anchor: Point3d,
    pub direction: Vec3d,
    pub scalar: CpuScalar,
}

impl Glyph {
    /// Rotation taking +x onto the glyph direction. Zero directions keep +x.
    pub fn orientation(&self) -> UnitQuaternion<CpuScalar> {
        rotation_from_x(&self.direction)
    }

    /// Maps the unit arrow (tail at the origin, along +x) onto this glyph.
    pub fn transform(&self, glyph_scale: CpuScalar) -> Similarity3<CpuScalar> {
        Similarity3::from_parts(Translation3::from(self.anchor.coords),
                                self.orientation(),
                                glyph_scale)
    }
}

/// One glyph per sample, in sample order. With `recenter` each arrow of
/// length `glyph_scale` is shifted back by half its length so that it is
/// centred on its sample point.
pub fn build_glyphs(points: &[Point3d],
                    samples: &[Normalized],
                    glyph_scale: CpuScalar,
                    recenter: bool)
                    -> Vec<Glyph> {
    debug_assert_eq!(points.len(), samples.len());
    let shift = if recenter { 0.5 * glyph_scale } else { 0.0 };
    points.iter()
        .zip(samples.iter())
        .map(|(point, sample)| {
            Glyph {
                anchor: point - sample.direction * shift,
                direction: sample.direction,
                scalar: sample.scalar,
            }
        })
        .collect()
}
