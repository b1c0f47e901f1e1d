use itertools::iproduct;

use crate::math::{linspace, CpuScalar, Point3d};

/// One axis of a sampling lattice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axis {
    pub start: CpuScalar,
    pub end: CpuScalar,
    pub count: usize,
}

impl Axis {
    pub fn new(start: CpuScalar, end: CpuScalar, count: usize) -> Self {
        Axis {
            start: start,
            end: end,
            count: count,
        }
    }

    /// `count` samples over `[-bound, bound]`.
    pub fn symmetric(bound: CpuScalar, count: usize) -> Self {
        Axis::new(-bound, bound, count)
    }

    pub fn values(&self) -> Vec<CpuScalar> {
        linspace(self.start, self.end, self.count)
    }

    pub fn step(&self) -> Option<CpuScalar> {
        if self.count < 2 {
            None
        } else {
            Some((self.end - self.start) / (self.count - 1) as CpuScalar)
        }
    }
}

/// Regular lattice over an axis aligned box. Points are stored in `ij`
/// order: x varies slowest, z fastest.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    axes: [Axis; 3],
    points: Vec<Point3d>,
}

impl Grid {
    pub fn new(x: Axis, y: Axis, z: Axis) -> Self {
        let (xs, ys, zs) = (x.values(), y.values(), z.values());
        let points = iproduct!(xs.iter(), ys.iter(), zs.iter())
            .map(|(&x, &y, &z)| Point3d::new(x, y, z))
            .collect();
        Grid {
            axes: [x, y, z],
            points: points,
        }
    }

    /// `count` points per axis over `[-bound, bound]^3`.
    #[cfg(test)]
    pub fn cube(bound: CpuScalar, count: usize) -> Self {
        let axis = Axis::symmetric(bound, count);
        Grid::new(axis, axis, axis)
    }

    #[inline]
    pub fn points(&self) -> &[Point3d] {
        &self.points
    }

    #[inline]
    pub fn axes(&self) -> &[Axis; 3] {
        &self.axes
    }

    pub fn shape(&self) -> [usize; 3] {
        [self.axes[0].count, self.axes[1].count, self.axes[2].count]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
