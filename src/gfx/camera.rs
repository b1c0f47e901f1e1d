use nalgebra::{Isometry3, Matrix4, Perspective3, Vector4};

use crate::math::{Aabb, CpuScalar, GpuScalar, Point3d, Vec3d};

/// Vertical field of view of a fresh camera, in degrees.
pub const DEFAULT_VIEW_ANGLE: CpuScalar = 30.0;

/// Perspective camera described by eye position, focal point and view up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    position: Point3d,
    focal_point: Point3d,
    view_up: Vec3d,
    view_angle: CpuScalar,
    clipping_range: [CpuScalar; 2],
}

impl Camera {
    pub fn new(position: Point3d, focal_point: Point3d, view_up: Vec3d) -> Self {
        let distance = (position - focal_point).norm().max(1e-3);
        Camera {
            position: position,
            focal_point: focal_point,
            view_up: view_up,
            view_angle: DEFAULT_VIEW_ANGLE,
            clipping_range: [distance * 1e-2, distance * 1e2],
        }
    }

    /// Looks at the centre of `bounds` from direction `view_vector`, then
    /// backs off until the bounding sphere fills the view.
    pub fn along(bounds: &Aabb, view_vector: &Vec3d, view_up: &Vec3d) -> Self {
        let focal_point = bounds.center();
        let mut camera = Camera::new(focal_point + view_vector, focal_point, *view_up);
        camera.reset(bounds);
        camera
    }

    /// Keeps the viewing direction and refits focal point, distance and
    /// clipping planes to `bounds`.
    pub fn reset(&mut self, bounds: &Aabb) {
        let mut radius = bounds.radius();
        if radius == 0.0 {
            radius = 1.0;
        }
        let direction = (self.position - self.focal_point)
            .try_normalize(0.0)
            .unwrap_or_else(Vec3d::z);
        let distance = radius / (0.5 * self.view_angle.to_radians()).sin();

        self.focal_point = bounds.center();
        self.position = self.focal_point + direction * distance;
        self.clipping_range = [(distance - 2.0 * radius).max(distance * 1e-3),
                               distance + 2.0 * radius];
        debug!("Camera reset: radius={} distance={} clipping={:?}",
               radius,
               distance,
               self.clipping_range);
    }

    /// Narrows the view angle by `factor`.
    pub fn zoom(&mut self, factor: CpuScalar) {
        self.view_angle /= factor;
    }

    #[inline]
    pub fn position(&self) -> Point3d {
        self.position
    }

    #[inline]
    pub fn focal_point(&self) -> Point3d {
        self.focal_point
    }

    #[inline]
    pub fn view_up(&self) -> Vec3d {
        self.view_up
    }

    #[inline]
    pub fn view_angle(&self) -> CpuScalar {
        self.view_angle
    }

    pub fn distance(&self) -> CpuScalar {
        (self.position - self.focal_point).norm()
    }

    /// Unit vector from the eye towards the focal point.
    pub fn direction(&self) -> Vec3d {
        (self.focal_point - self.position).try_normalize(0.0).unwrap_or_else(|| -Vec3d::z())
    }

    pub fn view(&self) -> Matrix4<CpuScalar> {
        Isometry3::look_at_rh(&self.position, &self.focal_point, &self.view_up).to_homogeneous()
    }

    pub fn projection(&self, aspect: CpuScalar) -> Matrix4<CpuScalar> {
        let [near, far] = self.clipping_range;
        Perspective3::new(aspect, self.view_angle.to_radians(), near, far).to_homogeneous()
    }

    pub fn view_matrix(&self) -> [[GpuScalar; 4]; 4] {
        self.view().cast::<GpuScalar>().into()
    }

    pub fn projection_matrix(&self, aspect: CpuScalar) -> [[GpuScalar; 4]; 4] {
        self.projection(aspect).cast::<GpuScalar>().into()
    }

    /// Pixel coordinates (origin top-left) of `point` in a `width` x
    /// `height` viewport, or `None` if it lies behind the eye.
    pub fn project(&self, point: &Point3d, width: u32, height: u32) -> Option<[CpuScalar; 2]> {
        let aspect = width as CpuScalar / height as CpuScalar;
        let clip = self.projection(aspect) * self.view() *
                   Vector4::new(point.x, point.y, point.z, 1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let (x, y) = (clip.x / clip.w, clip.y / clip.w);
        Some([(x + 1.0) * 0.5 * width as CpuScalar, (1.0 - y) * 0.5 * height as CpuScalar])
    }
}
