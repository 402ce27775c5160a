use core::slice;

use tinyvec::ArrayVec;

use super::*;

/// A surface composed of bicubic patches joined at their edges, e.g. the Utah teapot.
/// Storage is a fixed capacity array of N patches.
#[derive(Debug, Clone)]
pub struct PatchSpline<P, const N: usize>
where
    P: Point,
    [BezierPatch<P>; N]: tinyvec::Array<Item = BezierPatch<P>>,
{
    patches: ArrayVec<[BezierPatch<P>; N]>,
}

impl<P, const N: usize> PatchSpline<P, N>
where
    P: Point,
    [BezierPatch<P>; N]: tinyvec::Array<Item = BezierPatch<P>>,
{
    pub fn new() -> Self {
        PatchSpline {
            patches: ArrayVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.patches.capacity()
    }

    pub fn patches(&self) -> slice::Iter<'_, BezierPatch<P>> {
        self.patches.iter()
    }

    pub fn patch(&self, index: usize) -> Option<&BezierPatch<P>> {
        self.patches.get(index)
    }

    /// Appends a patch, returns false if the spline is already full
    pub fn push(&mut self, patch: BezierPatch<P>) -> bool {
        if self.patches.len() < self.patches.capacity() {
            self.patches.push(patch);
            true
        } else {
            false
        }
    }

    /// Replaces all 16 control points of patch `index`.
    /// Addressing the slot right after the last patch appends a new one.
    pub fn set_control_points(&mut self, index: usize, control_points: [P; 16]) -> Result<()> {
        let len = self.patches.len();
        if index == len {
            if !self.push(BezierPatch::new(control_points)) {
                return Err(Error::SplineFull { capacity: N });
            }
            return Ok(());
        }
        let patch = self
            .patches
            .get_mut(index)
            .ok_or(Error::PatchIndex { index, len })?;
        patch.control_points = control_points;
        Ok(())
    }

    /// Moves a single control point of patch `index`
    pub fn set_control_point(&mut self, index: usize, point: usize, value: P) -> Result<()> {
        let len = self.patches.len();
        self.patches
            .get_mut(index)
            .ok_or(Error::PatchIndex { index, len })?
            .set_control_point(point, value)
    }

    /// Evaluate patch `index` at (u, v). Returns None for a missing patch.
    pub fn eval(&self, index: usize, u: NativeFloat, v: NativeFloat) -> Option<P> {
        self.patches.get(index).map(|patch| patch.eval(u, v))
    }

    /// Tessellate every patch and merge the results into one mesh
    pub fn tessellate(&self, resolution: usize) -> Result<SurfaceMesh<P>> {
        let mut merged = SurfaceMesh::default();
        for patch in self.patches.iter() {
            merged.append(&patch.tessellate(resolution)?);
        }
        Ok(merged)
    }

    /// Return the bounding box of the control nets of all patches. Returns None for empty splines.
    /// By the convex hull property it also bounds the surface.
    pub fn bounding_box(&self) -> Option<Vec<(NativeFloat, NativeFloat)>> {
        let first = self.patches.first()?.control_points[0];
        let mut bounds: Vec<_> = (0..P::DIM).map(|d| (first.axis(d), first.axis(d))).collect();
        for point in self.patches.iter().flat_map(|p| p.control_points.iter()) {
            for (dim, bound) in bounds.iter_mut().enumerate() {
                bound.0 = bound.0.min(point.axis(dim));
                bound.1 = bound.1.max(point.axis(dim));
            }
        }
        Some(bounds)
    }
}

impl<P, const N: usize> Default for PatchSpline<P, N>
where
    P: Point,
    [BezierPatch<P>; N]: tinyvec::Array<Item = BezierPatch<P>>,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::glam::DVec3;

    fn shifted(dx: f64) -> BezierPatch<DVec3> {
        let mut patch = BezierPatch::flat();
        for i in 0..16 {
            let p = patch.control_points()[i] + DVec3::new(dx, 0.0, 0.0);
            patch.set_control_point(i, p).unwrap();
        }
        patch
    }

    #[test]
    fn push_until_full() {
        let mut spline: PatchSpline<DVec3, 2> = PatchSpline::new();
        assert!(spline.is_empty());
        assert!(spline.push(shifted(0.0)));
        assert!(spline.push(shifted(1.0)));
        assert!(!spline.push(shifted(2.0)));
        assert_eq!(spline.len(), 2);
        assert!(matches!(
            spline.set_control_points(2, *shifted(2.0).control_points()),
            Err(Error::SplineFull { capacity: 2 })
        ));
    }

    #[test]
    fn set_control_points_appends_or_replaces() {
        let mut spline: PatchSpline<DVec3, 4> = PatchSpline::new();
        spline.set_control_points(0, *shifted(0.0).control_points()).unwrap();
        spline.set_control_points(1, *shifted(1.0).control_points()).unwrap();
        spline.set_control_points(0, *shifted(5.0).control_points()).unwrap();
        assert_eq!(spline.len(), 2);
        let p = spline.eval(0, 0.0, 0.0).unwrap();
        assert!((p - DVec3::new(4.5, 0.0, -0.5)).length() < 1e-12);
        assert!(matches!(
            spline.set_control_points(3, *shifted(0.0).control_points()),
            Err(Error::PatchIndex { index: 3, len: 2 })
        ));
        assert!(spline.eval(2, 0.5, 0.5).is_none());
    }

    #[test]
    fn merged_tessellation() {
        let mut spline: PatchSpline<DVec3, 4> = PatchSpline::new();
        spline.push(shifted(0.0));
        spline.push(shifted(1.0));
        let n = 5;
        let mesh = spline.tessellate(n).unwrap();
        assert_eq!(mesh.vertices().len(), 2 * n * n);
        assert_eq!(mesh.triangles().len(), 2 * 2 * (n - 1) * (n - 1));
        // second patch indices start past the first patch's vertices
        assert_eq!(mesh.triangles()[2 * (n - 1) * (n - 1)][0], (n * n) as u32);
        // the shared edge x = 0.5 is welded geometrically
        let right_edge_first = mesh.vertices()[(n - 1) * n];
        let left_edge_second = mesh.vertices()[n * n];
        assert!((right_edge_first - left_edge_second).length() < 1e-12);
    }

    #[test]
    fn bounds_cover_all_patches() {
        let mut spline: PatchSpline<DVec3, 4> = PatchSpline::new();
        assert!(spline.bounding_box().is_none());
        spline.push(shifted(0.0));
        spline.push(shifted(1.0));
        let bounds = spline.bounding_box().unwrap();
        assert!((bounds[0].0 + 0.5).abs() < 1e-12);
        assert!((bounds[0].1 - 1.5).abs() < 1e-12);
        assert_eq!(bounds[1], (0.0, 0.0));
    }
}
