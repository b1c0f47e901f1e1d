use nalgebra::{Similarity3, Translation3};

use crate::gfx::mesh::{Mesh, MeshBatch};
use crate::gfx::overlay::{text_width, ScreenLabel};
use crate::gfx::Camera;
use crate::math::{rotation_from_x, Aabb, GpuScalar, Point3d, Vec3d};

const AXES: [(&str, [GpuScalar; 4]); 3] = [("x", [0.85, 0.1, 0.1, 1.0]),
                                           ("y", [0.1, 0.7, 0.1, 1.0]),
                                           ("z", [0.1, 0.2, 0.85, 1.0])];

/// Viewport in framebuffer pixels, origin bottom-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub left: u32,
    pub bottom: u32,
    pub width: u32,
    pub height: u32,
}

/// Orientation marker drawn in the lower-left corner: one arrow per world
/// axis, turned with the scene camera.
pub struct AxesTriad {
    batch: MeshBatch,
}

impl AxesTriad {
    pub fn new() -> Self {
        let arrow = Mesh::arrow(0.05, 0.15, 0.3, 12);
        let mut batch = MeshBatch::new();
        for (index, &(_, color)) in AXES.iter().enumerate() {
            let transform = Similarity3::from_parts(Translation3::identity(),
                                                    rotation_from_x(&unit(index)),
                                                    1.0);
            batch.push(&arrow.transformed(&transform), color);
        }
        AxesTriad { batch: batch }
    }

    pub fn batch(&self) -> &MeshBatch {
        &self.batch
    }

    /// Looks at the triad from the same direction as `scene`.
    pub fn camera(&self, scene: &Camera) -> Camera {
        let bounds = Aabb::new(Point3d::new(-1.0, -1.0, -1.0), Point3d::new(1.0, 1.0, 1.0));
        Camera::along(&bounds, &-scene.direction(), &scene.view_up())
    }

    pub fn viewport(width: u32, height: u32) -> Viewport {
        let size = (width.min(height) / 4).max(1);
        Viewport {
            left: 0,
            bottom: 0,
            width: size,
            height: size,
        }
    }

    /// Axis names centred just past the arrow tips, in image pixels (origin
    /// top-left).
    pub fn labels(&self,
                  scene: &Camera,
                  width: u32,
                  height: u32,
                  font_size: u32)
                  -> Vec<ScreenLabel> {
        let viewport = AxesTriad::viewport(width, height);
        let camera = self.camera(scene);
        let top = (height - viewport.bottom - viewport.height) as f64;
        AXES.iter()
            .enumerate()
            .filter_map(|(index, &(name, _))| {
                let tip = Point3d::from(unit(index) * 1.2);
                let half_width = 0.5 * text_width(name, font_size) as f64;
                camera.project(&tip, viewport.width, viewport.height).map(|[x, y]| {
                    ScreenLabel {
                        x: viewport.left as f64 + x - half_width,
                        y: top + y,
                        text: name.into(),
                    }
                })
            })
            .collect()
    }
}

fn unit(index: usize) -> Vec3d {
    let mut axis = Vec3d::zeros();
    axis[index] = 1.0;
    axis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_camera() -> Camera {
        let bounds = Aabb::new(Point3d::new(-1.0, -1.0, -1.0), Point3d::new(1.0, 1.0, 1.0));
        Camera::along(&bounds, &Vec3d::new(0.0, 8.0, 2.0), &Vec3d::z())
    }

    #[test]
    fn test_triad_has_three_colored_arrows() {
        let triad = AxesTriad::new();
        let batch = triad.batch();
        assert_eq!(batch.vertices.len() % 3, 0);
        let per_axis = batch.vertices.len() / 3;
        for (index, &(_, color)) in AXES.iter().enumerate() {
            assert_eq!(batch.vertices[index * per_axis].color, color);
        }
    }

    #[test]
    fn test_viewport_is_square_corner() {
        let viewport = AxesTriad::viewport(1000, 600);
        assert_eq!(viewport,
                   Viewport {
                       left: 0,
                       bottom: 0,
                       width: 150,
                       height: 150,
                   });
    }

    #[test]
    fn test_camera_matches_scene_direction() {
        let scene = scene_camera();
        let camera = AxesTriad::new().camera(&scene);
        assert!((camera.direction() - scene.direction()).norm() < 1e-12);
        assert_eq!(camera.focal_point(), Point3d::origin());
    }

    #[test]
    fn test_labels_sit_in_lower_left() {
        let labels = AxesTriad::new().labels(&scene_camera(), 1000, 600, 8);
        assert_eq!(labels.len(), 3);
        for label in &labels {
            assert!(label.x >= -2.5 && label.x <= 150.0);
            assert!(label.y >= 450.0 && label.y <= 600.0);
        }
        // z points up on screen.
        assert!(labels[2].y < labels[0].y);
    }

    #[test]
    fn test_labels_are_centred_on_tips() {
        let triad = AxesTriad::new();
        let small = triad.labels(&scene_camera(), 1000, 600, 8);
        let large = triad.labels(&scene_camera(), 1000, 600, 32);
        for (a, b) in small.iter().zip(&large) {
            // One glyph: 5 cells of 1 and of 4 pixels.
            assert!(((a.x - b.x) - 0.5 * (20.0 - 5.0)).abs() < 1e-9);
            assert_eq!(a.y, b.y);
        }
    }
}
