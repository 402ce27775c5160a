//! Index buffers and vertex storage for tessellated surfaces.

use ::glam::DVec3;

use super::*;

/// A tessellated surface: a vertex list, a triangle list and a wireframe
/// line list that both index into the vertices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceMesh<P> {
    pub(crate) vertices: Vec<P>,
    pub(crate) triangles: Vec<[u32; 3]>,
    pub(crate) lines: Vec<[u32; 2]>,
}

impl<P: Point> SurfaceMesh<P> {
    pub fn new(vertices: Vec<P>, triangles: Vec<[u32; 3]>) -> Self {
        let lines = wireframe(&triangles);
        SurfaceMesh {
            vertices,
            triangles,
            lines,
        }
    }

    pub fn vertices(&self) -> &[P] {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut [P] {
        &mut self.vertices
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn lines(&self) -> &[[u32; 2]] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Appends `other`, offsetting its indices past the current vertices
    pub fn append(&mut self, other: &SurfaceMesh<P>) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles
            .extend(other.triangles.iter().map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]));
        self.lines
            .extend(other.lines.iter().map(|l| [l[0] + offset, l[1] + offset]));
    }

    /// Per axis (min, max) over all vertices, None for an empty mesh
    pub fn bounding_box(&self) -> Option<Vec<(NativeFloat, NativeFloat)>> {
        let first = self.vertices.first()?;
        let mut bounds: Vec<_> = (0..P::DIM).map(|d| (first.axis(d), first.axis(d))).collect();
        for v in self.vertices.iter().skip(1) {
            for (dim, bound) in bounds.iter_mut().enumerate() {
                bound.0 = bound.0.min(v.axis(dim));
                bound.1 = bound.1.max(v.axis(dim));
            }
        }
        Some(bounds)
    }
}

impl SurfaceMesh<DVec3> {
    /// Area weighted vertex normals. Vertices only touched by degenerate
    /// triangles get a zero normal.
    pub fn vertex_normals(&self) -> Vec<DVec3> {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];
        for [a, b, c] in self.triangles.iter().copied() {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let n = (self.vertices[b] - self.vertices[a]).cross(self.vertices[c] - self.vertices[a]);
            normals[a] += n;
            normals[b] += n;
            normals[c] += n;
        }
        normals.iter().map(|n| n.normalize_or_zero()).collect()
    }

    /// Face normal of triangle `index`
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let [a, b, c] = self.triangles[index];
        let (a, b, c) = (
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        );
        (b - a).cross(c - a).normalize_or_zero()
    }
}

/// Triangle indices for an n x n vertex grid stored row by row.
/// Each quad with top left corner k is split into (k, k+1, k+n) and (k+1, k+n+1, k+n).
pub fn grid_triangles(n: usize) -> Vec<[u32; 3]> {
    if n < 2 {
        return Vec::new();
    }
    let mut triangles = Vec::with_capacity((n - 1) * (n - 1) * 2);
    let n32 = n as u32;
    for row in 0..n32 - 1 {
        let i = row * n32;
        for j in 0..n32 - 1 {
            triangles.push([i + j, i + j + 1, i + n32 + j]);
            triangles.push([i + j + 1, i + n32 + j + 1, i + n32 + j]);
        }
    }
    triangles
}

/// The outline of every triangle as line pairs: a-b, b-c, c-a
pub fn wireframe(triangles: &[[u32; 3]]) -> Vec<[u32; 2]> {
    triangles
        .iter()
        .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]])
        .collect()
}
