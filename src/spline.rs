/// spline.rs
/// Trait for common abstractions over all curve types (line, quadratic, cubic)
use super::*;

pub trait Spline<P: Point> {
    fn eval(&self, t: NativeFloat) -> P;

    /// Evenly spaced samples over [0, 1], start and end included
    fn polyline(&self, samples: usize) -> Vec<P> {
        match samples {
            0 => Vec::new(),
            1 => vec![self.eval(0.0)],
            n => (0..n)
                .map(|i| self.eval(i as NativeFloat / (n - 1) as NativeFloat))
                .collect(),
        }
    }
}

impl<P: Point> Spline<P> for LineSegment<P> {
    fn eval(&self, t: NativeFloat) -> P {
        LineSegment::eval(self, t)
    }
}

impl<P: Point> Spline<P> for QuadraticBezier<P> {
    fn eval(&self, t: NativeFloat) -> P {
        self.eval_casteljau(t)
    }
}

impl<P: Point> Spline<P> for CubicBezier<P> {
    fn eval(&self, t: NativeFloat) -> P {
        CubicBezier::eval(self, t)
    }

    fn polyline(&self, samples: usize) -> Vec<P> {
        self.sample(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths<S: Spline<PointN<f64, 2>>>(spline: &S) -> usize {
        spline.polyline(5).len()
    }

    #[test]
    fn polyline_through_trait_object() {
        let line = LineSegment::new(PointN::new([0f64, 0f64]), PointN::new([1f64, 0f64]));
        let cubic = CubicBezier::from(line);
        let quadratic = QuadraticBezier::new(
            PointN::new([0f64, 0f64]),
            PointN::new([0.5f64, 0f64]),
            PointN::new([1f64, 0f64]),
        );
        assert_eq!(lengths(&line), 5);
        assert_eq!(lengths(&cubic), 5);
        assert_eq!(lengths(&quadratic), 5);

        let curves: [&dyn Spline<PointN<f64, 2>>; 3] = [&line, &quadratic, &cubic];
        for curve in curves {
            let strip = curve.polyline(3);
            assert!((strip[1] - PointN::new([0.5f64, 0f64])).squared_length() < EPSILON);
        }
    }
}
