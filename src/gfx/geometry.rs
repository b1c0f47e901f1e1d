use nalgebra::{Similarity3, Translation3};

use crate::gfx::mesh::{Mesh, MeshBatch};
use crate::math::{rotation_from_x, Aabb, CpuScalar, GpuScalar, Point3d, Vec3d};
use crate::normalize::ScalarRange;
use crate::scene::{FieldSamples, Label, SceneSpec, StringMarker};

pub const ARROW_SHAFT_RADIUS: CpuScalar = 0.03;
pub const ARROW_TIP_RADIUS: CpuScalar = 0.1;
pub const ARROW_TIP_LENGTH: CpuScalar = 0.35;
pub const ARROW_RESOLUTION: usize = 6;

const LABEL_POINT_RADIUS: CpuScalar = 0.015;
const LABEL_POINT_COLOR: [GpuScalar; 4] = [1.0, 1.0, 1.0, 1.0];

const STRING_RESOLUTION: usize = 100;
const STRING_TIP_RESOLUTION: usize = 6;

/// World geometry of one render, split by blending pass.
#[derive(Clone, Debug, Default)]
pub struct SceneGeometry {
    pub opaque: MeshBatch,
    pub translucent: MeshBatch,
    pub bounds: Option<Aabb>,
}

impl SceneGeometry {
    pub fn build(spec: &SceneSpec, samples: &FieldSamples) -> Self {
        let mut geometry = SceneGeometry::default();
        geometry.push_glyphs(spec, samples);
        if let Some(ref marker) = spec.string_marker {
            geometry.push_string_marker(marker);
        }
        geometry.push_label_points(&spec.labels);
        debug!("Scene geometry: {} opaque triangles, {} translucent triangles, bounds {:?}",
               geometry.opaque.num_triangles(),
               geometry.translucent.num_triangles(),
               geometry.bounds);
        geometry
    }

    fn push_glyphs(&mut self, spec: &SceneSpec, samples: &FieldSamples) {
        let arrow = Mesh::arrow(ARROW_SHAFT_RADIUS,
                                ARROW_TIP_RADIUS,
                                ARROW_TIP_LENGTH,
                                ARROW_RESOLUTION);
        let range = samples.range.unwrap_or(ScalarRange { min: 0.0, max: 0.0 });
        for glyph in &samples.glyphs {
            let mesh = arrow.transformed(&glyph.transform(spec.glyph_scale));
            let color = spec.colormap.rgba(range.fraction(glyph.scalar), 1.0);
            self.include(mesh.bounds());
            self.opaque.push(&mesh, color);
        }
    }

    fn push_string_marker(&mut self, marker: &StringMarker) {
        let [r, g, b] = marker.color;
        let direction = marker.direction();

        let cylinder = Mesh::cylinder(marker.radius, marker.length, STRING_RESOLUTION)
            .transformed(&placement(&marker.center(), &direction));
        self.include(cylinder.bounds());
        self.translucent.push(&cylinder, [r, g, b, marker.opacity]);

        let tip = Mesh::cone(marker.tip_radius, marker.tip_height, STRING_TIP_RESOLUTION)
            .transformed(&placement(&marker.tip_center(), &direction));
        self.include(tip.bounds());
        self.translucent.push(&tip, [r, g, b, marker.tip_opacity]);
    }

    /// Label anchors are part of the scene: they are drawn as small points
    /// and count towards the bounds the camera is fitted to.
    fn push_label_points(&mut self, labels: &[Label]) {
        let point = Mesh::octahedron(LABEL_POINT_RADIUS);
        for label in labels {
            let mesh = point.transformed(&placement(&label.position, &Vec3d::x()));
            self.include(Some(Aabb::from_point(label.position)));
            self.opaque.push(&mesh, LABEL_POINT_COLOR);
        }
    }

    fn include(&mut self, bounds: Option<Aabb>) {
        self.bounds = match (self.bounds, bounds) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (a, b) => a.or(b),
        };
    }
}

/// Moves a solid built along +x so it is centred on `center` and points
/// along `direction`.
fn placement(center: &Point3d, direction: &Vec3d) -> Similarity3<CpuScalar> {
    Similarity3::from_parts(Translation3::from(center.coords),
                            rotation_from_x(direction),
                            1.0)
}
