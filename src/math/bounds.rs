use crate::math::{CpuScalar, Point3d, Vec3d};

/// Axis aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3d,
    pub max: Point3d,
}

impl Aabb {
    pub fn new(min: Point3d, max: Point3d) -> Self {
        Aabb { min: min.inf(&max), max: min.sup(&max) }
    }

    pub fn from_point(point: Point3d) -> Self {
        Aabb { min: point, max: point }
    }

    pub fn from_points<'a, I>(points: I) -> Option<Self>
        where I: IntoIterator<Item = &'a Point3d>
    {
        let mut points = points.into_iter();
        let mut bounds = Aabb::from_point(*points.next()?);
        for point in points {
            bounds.include(point);
        }
        Some(bounds)
    }

    pub fn include(&mut self, point: &Point3d) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb { min: self.min.inf(&other.min), max: self.max.sup(&other.max) }
    }

    pub fn center(&self) -> Point3d {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn extents(&self) -> Vec3d {
        self.max - self.min
    }

    /// Half of the diagonal.
    pub fn radius(&self) -> CpuScalar {
        0.5 * self.extents().norm()
    }
}
