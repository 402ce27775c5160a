use super::*;

/// A cubic Bezier curve defined by four points: the starting point, two successive
/// control points and the ending point.
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * start + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * end```
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct CubicBezier<P> {
    pub(crate) start: P,
    pub(crate) ctrl1: P,
    pub(crate) ctrl2: P,
    pub(crate) end: P,
}

impl<P> CubicBezier<P>
where
    P: Point,
{
    pub fn new(start: P, ctrl1: P, ctrl2: P, end: P) -> Self {
        CubicBezier {
            start,
            ctrl1,
            ctrl2,
            end,
        }
    }

    pub fn from_control_points(points: [P; 4]) -> Self {
        let [start, ctrl1, ctrl2, end] = points;
        CubicBezier::new(start, ctrl1, ctrl2, end)
    }

    pub fn control_points(&self) -> [P; 4] {
        [self.start, self.ctrl1, self.ctrl2, self.end]
    }

    /// Evaluate a CubicBezier curve at t by direct evaluation of the Bernstein polynomials
    pub fn eval(&self, t: NativeFloat) -> P {
        blend::blend(&cubic_weights(t), &self.control_points())
    }

    /// Evaluate a CubicBezier curve at t using the numerically stable De Casteljau algorithm
    pub fn eval_casteljau(&self, t: NativeFloat) -> P {
        // unrolled de casteljau algorithm
        // _1ab is the first iteration from first (a) to second (b) control point and so on
        let ctrl_1ab = self.start + (self.ctrl1 - self.start) * t;
        let ctrl_1bc = self.ctrl1 + (self.ctrl2 - self.ctrl1) * t;
        let ctrl_1cd = self.ctrl2 + (self.end - self.ctrl2) * t;
        // second iteration
        let ctrl_2ab = ctrl_1ab + (ctrl_1bc - ctrl_1ab) * t;
        let ctrl_2bc = ctrl_1bc + (ctrl_1cd - ctrl_1bc) * t;
        // third iteration, final point on the curve
        ctrl_2ab + (ctrl_2bc - ctrl_2ab) * t
    }

    /// Sample the curve at `samples` evenly spaced parameters, start and end included.
    /// The result is the vertex list of a line strip.
    pub fn sample(&self, samples: usize) -> Vec<P> {
        let table = BlendTable::new(samples);
        self.sample_with(&table)
    }

    /// Same as sample() but reuses precomputed blending weights
    pub fn sample_with(&self, table: &BlendTable) -> Vec<P> {
        let points = self.control_points();
        table.iter().map(|w| blend::blend(w, &points)).collect()
    }

    /// Approximates the arc length of the curve by flattening it with straight line segments.
    /// Remember arclen also works by linear approximation, not the integral, so we have to accept error!
    pub fn arclen(&self, nsteps: usize) -> NativeFloat {
        let mut arclen = 0.0;
        let mut previous = self.start;
        for t in 1..=nsteps {
            let t = t as NativeFloat / (nsteps as NativeFloat);
            let p = self.eval_casteljau(t);
            arclen += (p - previous).squared_length().sqrt();
            previous = p;
        }
        arclen
    }

    pub fn split(&self, t: NativeFloat) -> (Self, Self) {
        let ctrl_1ab = self.start + (self.ctrl1 - self.start) * t;
        let ctrl_1bc = self.ctrl1 + (self.ctrl2 - self.ctrl1) * t;
        let ctrl_1cd = self.ctrl2 + (self.end - self.ctrl2) * t;
        let ctrl_2ab = ctrl_1ab + (ctrl_1bc - ctrl_1ab) * t;
        let ctrl_2bc = ctrl_1bc + (ctrl_1cd - ctrl_1bc) * t;
        let ctrl_3ab = ctrl_2ab + (ctrl_2bc - ctrl_2ab) * t;

        (
            CubicBezier {
                start: self.start,
                ctrl1: ctrl_1ab,
                ctrl2: ctrl_2ab,
                end: ctrl_3ab,
            },
            CubicBezier {
                start: ctrl_3ab,
                ctrl1: ctrl_2bc,
                ctrl2: ctrl_1cd,
                end: self.end,
            },
        )
    }

    /// Return the derivative function.
    /// The derivative is also a bezier curve but of degree n-1 (cubic->quadratic)
    /// Since it returns the derivative function, eval() needs to be called separately
    pub fn derivative(&self) -> QuadraticBezier<P> {
        QuadraticBezier {
            start: (self.ctrl1 - self.start) * 3.0,
            ctrl: (self.ctrl2 - self.ctrl1) * 3.0,
            end: (self.end - self.ctrl2) * 3.0,
        }
    }

    /// Tangent vector (not normalized) at t
    pub fn tangent(&self, t: NativeFloat) -> P {
        blend::blend(&cubic_derivative_weights(t), &self.control_points())
    }

    pub fn baseline(&self) -> LineSegment<P> {
        LineSegment {
            start: self.start,
            end: self.end,
        }
    }

    /// Return the bounding box of the curve as a vector of (min, max) tuples for each dimension (its index)
    pub fn bounding_box(&self) -> Vec<(NativeFloat, NativeFloat)> {
        let derivative = self.derivative();
        let mut bounds = Vec::with_capacity(P::DIM);
        for dim in 0..P::DIM {
            // the extrema lie at the end points or where the derivative vanishes
            // (Intermediate control points can't form a boundary)
            let mut lo = self.start.axis(dim).min(self.end.axis(dim));
            let mut hi = self.start.axis(dim).max(self.end.axis(dim));
            for t in derivative.roots_on_axis(dim) {
                let value = self.eval_casteljau(t).axis(dim);
                lo = lo.min(value);
                hi = hi.max(value);
            }
            bounds.push((lo, hi));
        }
        bounds
    }
}

impl<P: Point> From<LineSegment<P>> for CubicBezier<P> {
    /// Degree elevation of a line, the control points sit at a third of the way
    fn from(line: LineSegment<P>) -> Self {
        CubicBezier::new(line.start, line.eval(1.0 / 3.0), line.eval(2.0 / 3.0), line.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrants() -> [CubicBezier<PointN<f64, 2>>; 4] {
        // control points are chosen for minimum radial distance error
        // according to: http://spencermortensen.com/articles/bezier-circle/
        let c = 0.551915024494;
        [
            CubicBezier::new(
                PointN::new([0f64, 1f64]),
                PointN::new([c, 1f64]),
                PointN::new([1f64, c]),
                PointN::new([1f64, 0f64]),
            ),
            CubicBezier::new(
                PointN::new([1f64, 0f64]),
                PointN::new([1f64, -c]),
                PointN::new([c, -1f64]),
                PointN::new([0f64, -1f64]),
            ),
            CubicBezier::new(
                PointN::new([0f64, -1f64]),
                PointN::new([-c, -1f64]),
                PointN::new([-1f64, -c]),
                PointN::new([-1f64, 0f64]),
            ),
            CubicBezier::new(
                PointN::new([-1f64, 0f64]),
                PointN::new([-1f64, c]),
                PointN::new([-c, 1f64]),
                PointN::new([0f64, 1f64]),
            ),
        ]
    }

    #[test]
    fn circle_approximation_error() {
        // define closure for unit circle
        let circle = |p: PointN<f64, 2>| -> f64 { p.into_iter().map(|x| x * x).sum::<f64>().sqrt() - 1f64 };

        let max_drift_perc = 0.0197; // radial drift percent, slightly above the optimum of 0.019608
        let max_error = max_drift_perc * 0.01; // absolute max radial error

        let nsteps = 1000;
        for t in 0..=nsteps {
            let t = t as f64 * 1f64 / (nsteps as f64);
            for quadrant in quadrants().iter() {
                let contour = circle(quadrant.eval(t));
                assert!(contour.abs() <= max_error);
            }
        }
    }

    #[test]
    fn circle_circumference_approximation() {
        // given the control points above, the circumference will also be close to 2*pi
        let max_error = 1e-2;
        let nsteps = 1e3 as usize;
        let tau = core::f64::consts::TAU;

        let circumference: f64 = quadrants().iter().map(|q| q.arclen(nsteps)).sum();
        assert!(((tau + max_error) > circumference) && ((tau - max_error) < circumference));
    }

    #[test]
    fn eval_equivalence_casteljau() {
        // all eval methods should be approximately equivalent for well defined test cases
        let bezier = CubicBezier::new(
            PointN::new([0f64, 1.77f64]),
            PointN::new([1.1f64, -1f64]),
            PointN::new([4.3f64, 3f64]),
            PointN::new([3.2f64, -4f64]),
        );

        let nsteps: usize = 1000;
        for t in 0..=nsteps {
            let t = t as f64 * 1f64 / (nsteps as f64);
            let p1 = bezier.eval(t);
            let p2 = bezier.eval_casteljau(t);
            let err = p2 - p1;
            assert!(err.squared_length() < EPSILON);
        }
    }

    #[test]
    fn split_equivalence() {
        // chose some arbitrary control points and construct a cubic bezier
        let bezier = CubicBezier::new(
            PointN::new([0f64, 1.77f64]),
            PointN::new([2.9f64, 0f64]),
            PointN::new([4.3f64, 3f64]),
            PointN::new([3.2f64, -4f64]),
        );
        // split it at an arbitrary point
        let at = 0.5;
        let (left, right) = bezier.split(at);
        // compare left and right subcurves with parent curve
        // take the difference of the two points which must not exceed the absolute error
        let nsteps: usize = 1000;
        for t in 0..=nsteps {
            let t = t as f64 * 1f64 / (nsteps as f64);
            // left
            let mut err = bezier.eval(t / 2.0) - left.eval(t);
            assert!(err.squared_length() < EPSILON);
            // right
            err = bezier.eval((t * 0.5) + 0.5) - right.eval(t);
            assert!(err.squared_length() < EPSILON);
        }
    }

    #[test]
    fn tangent_matches_derivative() {
        let bezier = CubicBezier::new(
            PointN::new([0f64, 1.77f64, 0.2f64]),
            PointN::new([2.9f64, 0f64, -1f64]),
            PointN::new([4.3f64, 3f64, 0.5f64]),
            PointN::new([3.2f64, -4f64, 2f64]),
        );
        let derivative = bezier.derivative();
        let nsteps: usize = 100;
        for t in 0..=nsteps {
            let t = t as f64 / (nsteps as f64);
            let err = bezier.tangent(t) - derivative.eval(t);
            assert!(err.squared_length() < EPSILON);
        }
    }

    #[test]
    fn sample_hits_endpoints() {
        let bezier = CubicBezier::new(
            PointN::new([-0.75f64, 0f64]),
            PointN::new([-0.25f64, 0.5f64]),
            PointN::new([0.25f64, -0.5f64]),
            PointN::new([0.75f64, 0f64]),
        );
        let strip = bezier.sample(64);
        assert_eq!(strip.len(), 64);
        assert_eq!(strip[0], bezier.start);
        assert_eq!(strip[63], bezier.end);
        assert_eq!(bezier.sample(1), vec![bezier.start]);
        assert!(bezier.sample(0).is_empty());
    }

    #[test]
    fn bounding_box_contains() {
        // check if bounding box for a curve contains all points (with some approximation error)
        let bezier = CubicBezier::new(
            PointN::new([0f64, 1.77f64]),
            PointN::new([2.9f64, 0f64]),
            PointN::new([4.3f64, -3f64]),
            PointN::new([3.2f64, 4f64]),
        );

        let bounds = bezier.bounding_box();
        let max_err = 1e-9;

        let nsteps: usize = 100;
        for t in 0..=nsteps {
            let t = t as f64 * 1f64 / (nsteps as f64);
            let p = bezier.eval_casteljau(t);
            for (idx, axis) in p.into_iter().enumerate() {
                assert!((axis >= (bounds[idx].0 - max_err)) && (axis <= (bounds[idx].1 + max_err)))
            }
        }
        // x overshoots the end point towards the second control point
        assert!(bounds[0].1 > 3.2);
    }

    #[test]
    fn elevated_line_is_straight() {
        let line = LineSegment::new(PointN::new([0f64, 0f64]), PointN::new([3f64, 3f64]));
        let cubic = CubicBezier::from(line);
        let nsteps: usize = 50;
        for t in 0..=nsteps {
            let t = t as f64 / (nsteps as f64);
            assert!((cubic.eval(t) - line.eval(t)).squared_length() < EPSILON);
        }
    }
}
