use super::*;

/// LineSegment defined by a start and an endpoint, evaluatable
/// anywhere inbetween using interpolation parameter t: [0,1] in eval()
/// A LineSegment is equal to a linear Bezier curve.
/// In the demos every slope indicator is the segment between two neighbouring control points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineSegment<P> {
    pub(crate) start: P,
    pub(crate) end: P,
}

impl<P> LineSegment<P>
where
    P: Point,
{
    pub fn new(start: P, end: P) -> Self {
        LineSegment { start, end }
    }

    pub fn start(&self) -> P {
        self.start
    }

    pub fn end(&self) -> P {
        self.end
    }

    pub fn eval(&self, t: NativeFloat) -> P {
        self.start + (self.end - self.start) * t
    }

    pub fn midpoint(&self) -> P {
        (self.start + self.end) * 0.5
    }

    /// The direction vector from start to end, i.e. the derivative of the segment
    pub fn vector(&self) -> P {
        self.end - self.start
    }

    pub fn length(&self) -> NativeFloat {
        self.vector().squared_length().sqrt()
    }

    /// Return the distance from the LineSegment to Point p by calculating the projection
    pub fn distance_to_point(&self, p: P) -> NativeFloat {
        let l2 = self.vector().squared_length();
        // if start and endpoint are approx the same, return the distance to either
        if l2 < EPSILON {
            return (self.start - p).squared_length().sqrt();
        }
        let t = ((p - self.start).dot(&self.vector()) / l2).clamp(0.0, 1.0);
        let projection = self.eval(t);
        (p - projection).squared_length().sqrt()
    }

    /// Returns the root of the scalar line a*t + b = 0 if there is one
    pub(crate) fn root(a: NativeFloat, b: NativeFloat) -> Option<NativeFloat> {
        if a.abs() < EPSILON {
            return None;
        }
        Some(-b / a)
    }
}
