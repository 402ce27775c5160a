//! Slope indicators: a fixed template segment placed between two control points.

use ::glam::DVec3;

use crate::transform::Transform;

/// Start of the template segment in model space
pub const TEMPLATE_START: DVec3 = DVec3::new(-1.0, -1.0, -1.0);
/// End of the template segment in model space
pub const TEMPLATE_END: DVec3 = DVec3::new(1.0, 1.0, 1.0);

pub struct SlopeIndicator;

impl SlopeIndicator {
    /// Transform that maps the template diagonal onto `start -> end`.
    /// A per axis scale of half the span is enough: the diagonal has a
    /// unit component on every axis, so no rotation is needed.
    pub fn between(start: DVec3, end: DVec3) -> Transform {
        let mut transform = Transform::default();
        Self::place(&mut transform, start, end);
        transform
    }

    /// Re-place an existing transform, keeping its parent
    pub fn place(transform: &mut Transform, start: DVec3, end: DVec3) {
        transform.position = (start + end) * 0.5;
        transform.scale = (end - start) * 0.5;
        transform.rotation = ::glam::DQuat::IDENTITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_maps_onto_endpoints() {
        let pairs = [
            (DVec3::new(-0.75, 0.0, 0.0), DVec3::new(-0.25, 0.0, 0.0)),
            (DVec3::new(0.2, -0.4, 1.0), DVec3::new(-0.3, 0.9, 0.5)),
            (DVec3::splat(1.0), DVec3::splat(1.0)),
        ];
        for (start, end) in pairs {
            let m = SlopeIndicator::between(start, end).local_matrix();
            assert!((m.transform_point3(TEMPLATE_START) - start).length() < 1e-12);
            assert!((m.transform_point3(TEMPLATE_END) - end).length() < 1e-12);
        }
    }

    #[test]
    fn place_keeps_parent() {
        let mut t = Transform::default().with_parent(crate::transform::TransformHandle(3));
        SlopeIndicator::place(&mut t, DVec3::ZERO, DVec3::X);
        assert_eq!(t.parent, Some(crate::transform::TransformHandle(3)));
        assert_eq!(t.position, DVec3::new(0.5, 0.0, 0.0));
    }
}
