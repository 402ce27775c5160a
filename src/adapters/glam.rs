//! Glam adapter implementations.
//!
//! Use `glam::DVec2` and `glam::DVec3` directly as a `Point`.
//!
//! # Example
//! ```rust
//! use glam::DVec3;
//! use bernstein::CubicBezier;
//!
//! let curve = CubicBezier::new(
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(1.0, 0.0, 0.0),
//!     DVec3::new(1.0, 1.0, 0.0),
//!     DVec3::new(1.0, 1.0, 1.0),
//! );
//!
//! let mid = curve.eval(0.5);
//! # let _ = mid;
//! ```
//!
//! Only the `f64` vectors qualify since the blending weights are `NativeFloat`.

use ::glam::{DVec2, DVec3};

use crate::point::Point;
use crate::NativeFloat;

impl Point for DVec2 {
    const DIM: usize = 2;

    fn axis(&self, index: usize) -> NativeFloat {
        self[index]
    }

    fn squared_length(&self) -> NativeFloat {
        self.length_squared()
    }

    fn dot(&self, other: &Self) -> NativeFloat {
        DVec2::dot(*self, *other)
    }
}

impl Point for DVec3 {
    const DIM: usize = 3;

    fn axis(&self, index: usize) -> NativeFloat {
        self[index]
    }

    fn squared_length(&self) -> NativeFloat {
        self.length_squared()
    }

    fn dot(&self, other: &Self) -> NativeFloat {
        DVec3::dot(*self, *other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EPSILON;

    #[test]
    fn trait_and_inherent_agree() {
        let a = DVec3::new(1.0, -2.0, 0.5);
        let b = DVec3::new(0.25, 4.0, 2.0);
        assert!((Point::dot(&a, &b) - a.dot(b)).abs() < EPSILON);
        assert!((Point::squared_length(&a) - 5.25).abs() < EPSILON);
        assert!((a.axis(1) + 2.0).abs() < EPSILON);
    }
}
