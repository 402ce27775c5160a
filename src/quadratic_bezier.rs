use tinyvec::ArrayVec;

use super::*;

/// A quadratic Bezier curve defined by start point, one control point and end point.
/// Mostly encountered as the derivative (hodograph) of a cubic curve.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadraticBezier<P> {
    pub(crate) start: P,
    pub(crate) ctrl: P,
    pub(crate) end: P,
}

impl<P> QuadraticBezier<P>
where
    P: Point,
{
    pub fn new(start: P, ctrl: P, end: P) -> Self {
        QuadraticBezier { start, ctrl, end }
    }

    pub fn eval(&self, t: NativeFloat) -> P {
        let t2 = t * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;

        self.start * one_t2 + self.ctrl * (2.0 * one_t * t) + self.end * t2
    }

    /// Evaluate a QuadraticBezier curve at t using the numerically stable De Casteljau algorithm
    pub fn eval_casteljau(&self, t: NativeFloat) -> P {
        // unrolled de casteljau algorithm
        // _1ab is the first iteration from first (a) to second (b) control point and so on
        let ctrl_1ab = self.start + (self.ctrl - self.start) * t;
        let ctrl_1bc = self.ctrl + (self.end - self.ctrl) * t;
        // second iteration, final point on the curve
        ctrl_1ab + (ctrl_1bc - ctrl_1ab) * t
    }

    /// Return the derivative function.
    /// The derivative is also a bezier curve but of degree n-1 - In the case of quadratic it is just a line.
    pub fn derivative(&self) -> LineSegment<P> {
        LineSegment {
            start: (self.ctrl - self.start) * 2.0,
            end: (self.end - self.ctrl) * 2.0,
        }
    }

    /// Returns the real roots of the quadratic a*t^2 + b*t + c = 0.
    /// Degenerates to the linear case when a vanishes.
    pub(crate) fn real_roots(a: NativeFloat, b: NativeFloat, c: NativeFloat) -> ArrayVec<[NativeFloat; 2]> {
        let mut result = ArrayVec::new();
        if a.abs() < EPSILON {
            if let Some(root) = LineSegment::<P>::root(b, c) {
                result.push(root);
            }
            return result;
        }
        let delta = b * b - 4.0 * a * c;
        if delta > 0.0 {
            let sqrt_delta = delta.sqrt();
            result.push((-b - sqrt_delta) / (2.0 * a));
            result.push((-b + sqrt_delta) / (2.0 * a));
        } else if delta.abs() < EPSILON {
            result.push(-b / (2.0 * a));
        }
        result
    }

    /// Returns the parameters in (0, 1) where the curve crosses zero on `axis`
    pub fn roots_on_axis(&self, axis: usize) -> ArrayVec<[NativeFloat; 2]> {
        // expand B(t) = (1-t)^2 p0 + 2t(1-t) p1 + t^2 p2 into a*t^2 + b*t + c
        let p0 = self.start.axis(axis);
        let p1 = self.ctrl.axis(axis);
        let p2 = self.end.axis(axis);
        let a = p0 - 2.0 * p1 + p2;
        let b = 2.0 * (p1 - p0);
        let c = p0;

        let mut roots = Self::real_roots(a, b, c);
        roots.retain(|t| *t > 0.0 && *t < 1.0);
        roots
    }
}
