use std::f64::consts::PI;

use itertools::iproduct;
use nalgebra::Similarity3;

use crate::math::{to_gpu, vec_to_gpu, Aabb, CpuScalar, GpuScalar, Point3d, Vec3d};

const SIGNS: [CpuScalar; 2] = [-1.0, 1.0];

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub position: [GpuScalar; 3],
    pub normal: [GpuScalar; 3],
    pub color: [GpuScalar; 4],
}

implement_vertex!(Vertex, position, normal, color);

/// Triangle mesh in world precision. Solids of revolution are built along
/// +x and moved into place with `transformed`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Point3d>,
    pub normals: Vec<Vec3d>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Mesh::default()
    }

    /// Capped cylinder centred on the origin.
    pub fn cylinder(radius: CpuScalar, height: CpuScalar, resolution: usize) -> Self {
        let (start, end) = (-height / 2.0, height / 2.0);
        let mut mesh = Mesh::new();
        mesh.push_tube(start, end, radius, radius, resolution);
        mesh.push_cap(start, radius, resolution, -1.0);
        mesh.push_cap(end, radius, resolution, 1.0);
        mesh
    }

    /// Capped cone centred on the origin with its apex at `+height / 2`.
    pub fn cone(radius: CpuScalar, height: CpuScalar, resolution: usize) -> Self {
        let (start, end) = (-height / 2.0, height / 2.0);
        let mut mesh = Mesh::new();
        mesh.push_tube(start, end, radius, 0.0, resolution);
        mesh.push_cap(start, radius, resolution, -1.0);
        mesh
    }

    /// Flat-shaded octahedron centred on the origin with its corners on the
    /// axes at distance `radius`.
    pub fn octahedron(radius: CpuScalar) -> Self {
        let mut mesh = Mesh::new();
        for (&sx, &sy, &sz) in iproduct!(SIGNS.iter(), SIGNS.iter(), SIGNS.iter()) {
            let normal = Vec3d::new(sx, sy, sz).normalize();
            let a = mesh.push_vertex(Point3d::new(sx * radius, 0.0, 0.0), normal);
            let b = mesh.push_vertex(Point3d::new(0.0, sy * radius, 0.0), normal);
            let c = mesh.push_vertex(Point3d::new(0.0, 0.0, sz * radius), normal);
            mesh.indices.extend_from_slice(&[a, b, c]);
        }
        mesh
    }

    /// Unit length arrow with its tail at the origin.
    pub fn arrow(shaft_radius: CpuScalar,
                 tip_radius: CpuScalar,
                 tip_length: CpuScalar,
                 resolution: usize)
                 -> Self {
        let shaft_length = 1.0 - tip_length;
        let mut mesh = Mesh::cylinder(shaft_radius, shaft_length, resolution)
            .transformed(&along_x(shaft_length / 2.0));
        mesh.append(&Mesh::cone(tip_radius, tip_length, resolution)
            .transformed(&along_x(1.0 - tip_length / 2.0)));
        mesh
    }

    pub fn transformed(&self, transform: &Similarity3<CpuScalar>) -> Mesh {
        let rotation = transform.isometry.rotation;
        Mesh {
            positions: self.positions.iter().map(|p| transform * p).collect(),
            normals: self.normals.iter().map(|n| rotation * n).collect(),
            indices: self.indices.clone(),
        }
    }

    pub fn append(&mut self, other: &Mesh) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|index| index + offset));
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }

    fn push_vertex(&mut self, position: Point3d, normal: Vec3d) -> u32 {
        self.positions.push(position);
        self.normals.push(normal);
        (self.positions.len() - 1) as u32
    }

    /// Side wall between the rings at `start` and `end`. A zero `end_radius`
    /// closes the wall into a cone.
    fn push_tube(&mut self,
                 start: CpuScalar,
                 end: CpuScalar,
                 start_radius: CpuScalar,
                 end_radius: CpuScalar,
                 resolution: usize) {
        let length = end - start;
        let slope = start_radius - end_radius;
        for segment in 0..resolution {
            let (a0, a1) = (angle(segment, resolution), angle(segment + 1, resolution));
            let normal_at = |theta: CpuScalar| {
                Vec3d::new(slope, length * theta.cos(), length * theta.sin()).normalize()
            };
            let s0 = self.push_vertex(ring(start, start_radius, a0), normal_at(a0));
            let s1 = self.push_vertex(ring(start, start_radius, a1), normal_at(a1));
            if end_radius > 0.0 {
                let e0 = self.push_vertex(ring(end, end_radius, a0), normal_at(a0));
                let e1 = self.push_vertex(ring(end, end_radius, a1), normal_at(a1));
                self.indices.extend_from_slice(&[s0, s1, e1, s0, e1, e0]);
            } else {
                let apex = self.push_vertex(Point3d::new(end, 0.0, 0.0),
                                            normal_at(0.5 * (a0 + a1)));
                self.indices.extend_from_slice(&[s0, s1, apex]);
            }
        }
    }

    fn push_cap(&mut self, x: CpuScalar, radius: CpuScalar, resolution: usize, side: CpuScalar) {
        let normal = Vec3d::x() * side;
        let center = self.push_vertex(Point3d::new(x, 0.0, 0.0), normal);
        for segment in 0..resolution {
            let a = self.push_vertex(ring(x, radius, angle(segment, resolution)), normal);
            let b = self.push_vertex(ring(x, radius, angle(segment + 1, resolution)), normal);
            self.indices.extend_from_slice(&[center, a, b]);
        }
    }
}

#[inline]
fn angle(segment: usize, resolution: usize) -> CpuScalar {
    2.0 * PI * segment as CpuScalar / resolution as CpuScalar
}

#[inline]
fn ring(x: CpuScalar, radius: CpuScalar, theta: CpuScalar) -> Point3d {
    Point3d::new(x, radius * theta.cos(), radius * theta.sin())
}

#[inline]
fn along_x(offset: CpuScalar) -> Similarity3<CpuScalar> {
    Similarity3::new(Vec3d::new(offset, 0.0, 0.0), Vec3d::zeros(), 1.0)
}

/// Flat vertex and index lists ready for upload, one colour per mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBatch {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshBatch {
    pub fn new() -> Self {
        MeshBatch::default()
    }

    pub fn push(&mut self, mesh: &Mesh, color: [GpuScalar; 4]) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend(mesh.positions.iter().zip(mesh.normals.iter()).map(|(p, n)| {
            Vertex {
                position: to_gpu(p),
                normal: vec_to_gpu(n),
                color: color,
            }
        }));
        self.indices.extend(mesh.indices.iter().map(|index| index + offset));
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
