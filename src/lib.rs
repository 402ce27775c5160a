//! Cubic Bézier curves, bicubic Bézier patches and patch splines, evaluated
//! with Bernstein blending, together with the small interactive scene layer
//! used by the `bezier_curve`, `bezier_surface` and `bezier_teapot` demos.
//!
//! The geometry core is generic over the [`Point`] trait. It ships an
//! implementation for the const-generic [`PointN`] and adapters for the
//! `glam` double precision vectors used by the scene layer.
//!
//! ```
//! use bernstein::{CubicBezier, PointN};
//!
//! let curve = CubicBezier::new(
//!     PointN::new([0f64, 0f64]),
//!     PointN::new([1f64, 2f64]),
//!     PointN::new([3f64, 2f64]),
//!     PointN::new([4f64, 0f64]),
//! );
//! let mid = curve.eval(0.5);
//! assert_eq!(mid, PointN::new([2f64, 1.5f64]));
//! ```

pub mod adapters;
pub mod blend;
pub mod camera;
pub mod cli;
pub mod config;
pub mod cubic_bezier;
pub mod demo;
pub mod error;
pub mod input;
pub mod line;
pub mod mesh;
pub mod patch;
pub mod patch_spline;
pub mod point;
pub mod point_generic;
pub mod quadratic_bezier;
pub mod render;
pub mod scene;
pub mod script;
pub mod shape;
pub mod slope;
pub mod spline;
pub mod teapot;
pub mod transform;

use core::ops::{Add, Mul, Sub};

pub use blend::{cubic_derivative_weights, cubic_weights, BlendTable};
pub use cubic_bezier::CubicBezier;
pub use error::{Error, Result};
pub use line::LineSegment;
pub use mesh::SurfaceMesh;
pub use patch::BezierPatch;
pub use patch_spline::PatchSpline;
pub use point::Point;
pub use point_generic::PointN;
pub use quadratic_bezier::QuadraticBezier;
pub use spline::Spline;

/// The float type all blending weights and curve parameters are computed in
pub type NativeFloat = f64;

/// Absolute tolerance for comparisons of squared distances
pub const EPSILON: NativeFloat = 1e-10;
