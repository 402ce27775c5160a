use ::glam::DVec3;

use super::*;

/// Pairs of control point indices that carry a slope indicator line,
/// two per side of the patch: front, back, left, right
pub const SLOPE_EDGES: [(usize, usize); 8] = [
    (0, 1),
    (2, 3),
    (14, 15),
    (12, 13),
    (3, 7),
    (11, 15),
    (0, 4),
    (8, 12),
];

/// The four corner control points, they are interpolated by the surface
pub const CORNERS: [usize; 4] = [0, 3, 12, 15];

/// A bicubic Bezier patch defined by a 4x4 grid of control points.
/// The points are stored row by row, `index = row * 4 + col`.
/// The surface is defined by:
/// ```S(u, v) = Σ_r Σ_c B_r(v) * B_c(u) * P[r][c]```
/// i.e. `u` runs along a row (over the columns) and `v` runs across the rows.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct BezierPatch<P> {
    pub(crate) control_points: [P; 16],
}

impl<P> BezierPatch<P>
where
    P: Point,
{
    pub fn new(control_points: [P; 16]) -> Self {
        BezierPatch { control_points }
    }

    pub fn control_points(&self) -> &[P; 16] {
        &self.control_points
    }

    pub fn control_point(&self, row: usize, col: usize) -> P {
        self.control_points[row * 4 + col]
    }

    pub fn set_control_point(&mut self, index: usize, point: P) -> Result<()> {
        let slot = self
            .control_points
            .get_mut(index)
            .ok_or(Error::ControlPointIndex(index))?;
        *slot = point;
        Ok(())
    }

    /// The four control points of row `row` as a curve in u
    pub fn row(&self, row: usize) -> CubicBezier<P> {
        let c = &self.control_points[row * 4..row * 4 + 4];
        CubicBezier::new(c[0], c[1], c[2], c[3])
    }

    /// The four control points of column `col` as a curve in v
    pub fn column(&self, col: usize) -> CubicBezier<P> {
        let c = &self.control_points;
        CubicBezier::new(c[col], c[4 + col], c[8 + col], c[12 + col])
    }

    fn rows(&self) -> [[P; 4]; 4] {
        let c = &self.control_points;
        [
            [c[0], c[1], c[2], c[3]],
            [c[4], c[5], c[6], c[7]],
            [c[8], c[9], c[10], c[11]],
            [c[12], c[13], c[14], c[15]],
        ]
    }

    /// Blend every row with `u_weights`, collapsing the grid into one curve in v
    fn collapse_rows(&self, u_weights: &[NativeFloat; 4]) -> [P; 4] {
        let rows = self.rows();
        [
            blend::blend(u_weights, &rows[0]),
            blend::blend(u_weights, &rows[1]),
            blend::blend(u_weights, &rows[2]),
            blend::blend(u_weights, &rows[3]),
        ]
    }

    /// Evaluate the surface at (u, v) in two passes: every row is blended
    /// across its columns at u, then the resulting four points are blended at v
    pub fn eval(&self, u: NativeFloat, v: NativeFloat) -> P {
        let column = self.collapse_rows(&cubic_weights(u));
        blend::blend(&cubic_weights(v), &column)
    }

    /// Partial derivative dS/du at (u, v)
    pub fn partial_u(&self, u: NativeFloat, v: NativeFloat) -> P {
        let column = self.collapse_rows(&cubic_derivative_weights(u));
        blend::blend(&cubic_weights(v), &column)
    }

    /// Partial derivative dS/dv at (u, v)
    pub fn partial_v(&self, u: NativeFloat, v: NativeFloat) -> P {
        let column = self.collapse_rows(&cubic_weights(u));
        blend::blend(&cubic_derivative_weights(v), &column)
    }

    /// Slope indicator segments along the patch boundary, see SLOPE_EDGES
    pub fn slope_lines(&self) -> [LineSegment<P>; 8] {
        SLOPE_EDGES.map(|(a, b)| LineSegment::new(self.control_points[a], self.control_points[b]))
    }

    /// Evaluate the vertex grid for `table` into `vertices`, reusing its allocation.
    /// Vertex (i, j) with u = t_i and v = t_j is written to `i * n + j`.
    pub fn tessellate_into(&self, table: &BlendTable, vertices: &mut Vec<P>) {
        let n = table.len();
        vertices.clear();
        vertices.reserve(n * n);
        for u_weights in table.iter() {
            let column = self.collapse_rows(u_weights);
            for v_weights in table.iter() {
                vertices.push(blend::blend(v_weights, &column));
            }
        }
    }

    /// Tessellate the patch into a `resolution` x `resolution` vertex grid
    /// with triangle and wireframe indices
    pub fn tessellate(&self, resolution: usize) -> Result<SurfaceMesh<P>> {
        if resolution < 2 {
            return Err(Error::InvalidResolution(resolution));
        }
        let table = BlendTable::new(resolution);
        let mut vertices = Vec::new();
        self.tessellate_into(&table, &mut vertices);
        Ok(SurfaceMesh::new(vertices, mesh::grid_triangles(resolution)))
    }
}

impl BezierPatch<DVec3> {
    /// A flat unit square in the xz plane centered on the origin,
    /// columns run along +x and rows along +z in steps of a third
    pub fn flat() -> Self {
        let offset = 1.0 / 3.0;
        let base = DVec3::new(-0.5, 0.0, -0.5);
        let mut control_points = [DVec3::ZERO; 16];
        for (index, point) in control_points.iter_mut().enumerate() {
            let (row, col) = (index / 4, index % 4);
            *point = DVec3::new(base.x + offset * col as f64, base.y, base.z + offset * row as f64);
        }
        BezierPatch { control_points }
    }

    /// Unit surface normal at (u, v). Falls back to the neighbouring
    /// parameters where a collapsed edge makes the tangents parallel.
    pub fn normal(&self, u: NativeFloat, v: NativeFloat) -> DVec3 {
        let n = self.partial_v(u, v).cross(self.partial_u(u, v));
        if n.length_squared() > EPSILON {
            return n.normalize();
        }
        let h = 1e-4;
        let (u, v) = (u.clamp(h, 1.0 - h), v.clamp(h, 1.0 - h));
        self.partial_v(u, v).cross(self.partial_u(u, v)).normalize_or_zero()
    }
}
