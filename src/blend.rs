//! Cubic Bernstein blending.
//!
//! Every curve and patch in this crate is evaluated by weighting four control
//! points with the cubic Bernstein polynomials
//! ```text
//! B0(t) = (1 - t)³, B1(t) = 3t(1 - t)², B2(t) = 3t²(1 - t), B3(t) = t³
//! ```
//! Tessellation evaluates the same parameters over and over (once per row and
//! once per column of a patch), so the weights for a fixed sampling are
//! precomputed once in a [`BlendTable`].

use super::*;

/// Returns the four cubic Bernstein weights at `t`
pub fn cubic_weights(t: NativeFloat) -> [NativeFloat; 4] {
    let t_sqr = t * t;
    let t_inv = 1.0 - t;
    let t_inv_sqr = t_inv * t_inv;

    [
        t_inv * t_inv_sqr,
        3.0 * t * t_inv_sqr,
        3.0 * t_sqr * t_inv,
        t * t_sqr,
    ]
}

/// Returns the weights of the first derivative d/dt of the cubic Bernstein basis at `t`.
/// They sum to zero, so they blend control points into a tangent vector.
pub fn cubic_derivative_weights(t: NativeFloat) -> [NativeFloat; 4] {
    let t_sqr = t * t;
    let t_inv = 1.0 - t;
    let t_inv_sqr = t_inv * t_inv;

    [
        -3.0 * t_inv_sqr,
        3.0 * t_inv_sqr - 6.0 * t * t_inv,
        6.0 * t * t_inv - 3.0 * t_sqr,
        3.0 * t_sqr,
    ]
}

/// Blend four points with a set of weights
#[inline]
pub fn blend<P: Point>(weights: &[NativeFloat; 4], points: &[P; 4]) -> P {
    points[0] * weights[0] + points[1] * weights[1] + points[2] * weights[2] + points[3] * weights[3]
}

/// Cubic Bernstein weights precomputed for `samples` evenly spaced
/// parameters `t_i = i / (samples - 1)`, covering [0, 1] inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendTable {
    factors: Vec<[NativeFloat; 4]>,
}

impl BlendTable {
    /// A single sample sits at t = 0, zero samples yield an empty table.
    pub fn new(samples: usize) -> Self {
        let factors = (0..samples)
            .map(|i| cubic_weights(Self::parameter_of(i, samples)))
            .collect();
        BlendTable { factors }
    }

    fn parameter_of(i: usize, samples: usize) -> NativeFloat {
        if samples < 2 {
            0.0
        } else {
            i as NativeFloat / (samples - 1) as NativeFloat
        }
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// The curve parameter of sample `i`
    pub fn parameter(&self, i: usize) -> NativeFloat {
        Self::parameter_of(i, self.factors.len())
    }

    pub fn weights(&self, i: usize) -> &[NativeFloat; 4] {
        &self.factors[i]
    }

    /// Blend four control points with the weights of sample `i`
    pub fn blend<P: Point>(&self, i: usize, points: &[P; 4]) -> P {
        blend(&self.factors[i], points)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, [NativeFloat; 4]> {
        self.factors.iter()
    }
}
