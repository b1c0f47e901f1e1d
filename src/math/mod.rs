pub mod bounds;

pub use self::bounds::Aabb;

use std::f64::consts::PI;

use nalgebra::{Point3, UnitQuaternion, Vector3};
use num::Float;

pub type CpuScalar = f64;
pub type GpuScalar = f32;

pub type Point3d = Point3<CpuScalar>;
pub type Vec3d = Vector3<CpuScalar>;

/// `count` evenly spaced samples over `[start, end]`. The last sample is
/// exactly `end` rather than the accumulated `start + step * (count - 1)`.
pub fn linspace(start: CpuScalar, end: CpuScalar, count: usize) -> Vec<CpuScalar> {
    match count {
        0 => vec![],
        1 => vec![start],
        _ => {
            let last = count - 1;
            let step = (end - start) / last as CpuScalar;
            (0..count)
                .map(|index| if index == last {
                    end
                } else {
                    start + step * index as CpuScalar
                })
                .collect()
        }
    }
}

/// Replaces values below `floor` with `floor`.
#[inline]
pub fn clamp_below<S: Float>(value: S, floor: S) -> S {
    if value < floor { floor } else { value }
}

/// Replaces values whose magnitude is below `floor` with `+floor`. Small
/// negative values therefore flip sign.
#[inline]
pub fn clamp_magnitude_below<S: Float>(value: S, floor: S) -> S {
    if value.abs() < floor { floor } else { value }
}

/// Rotation taking +x onto `direction`. A zero direction keeps +x.
pub fn rotation_from_x(direction: &Vec3d) -> UnitQuaternion<CpuScalar> {
    if direction.norm_squared() == 0.0 {
        return UnitQuaternion::identity();
    }
    UnitQuaternion::rotation_between(&Vec3d::x(), direction)
        .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI))
}

#[inline]
pub fn to_gpu(point: &Point3d) -> [GpuScalar; 3] {
    [point.x as GpuScalar, point.y as GpuScalar, point.z as GpuScalar]
}

#[inline]
pub fn vec_to_gpu(vector: &Vec3d) -> [GpuScalar; 3] {
    [vector.x as GpuScalar, vector.y as GpuScalar, vector.z as GpuScalar]
}
