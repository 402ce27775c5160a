use core::fmt::Debug;

use super::*;

/// Trait defined over generic points P of any dimension.
/// Many libraries already provide Point-types and the mathematical operations
/// that we need for working with curves and patches, so that implementing the
/// trait requires mostly wrapping.
/// Keeping the trait as minimal as possible to make integration with other libraries easy
pub trait Point:
    Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<NativeFloat, Output = Self>
    + Copy
    + PartialEq
    + Default
    + Debug
{
    /// Number of coordinate axes
    const DIM: usize;

    /// Returns the component of the Point on its axis corresponding to index e.g. [0, 1, 2] -> [x, y, z]
    fn axis(&self, index: usize) -> NativeFloat;

    /// Returns the squared L2 norm of the Point interpreted as a vector
    fn squared_length(&self) -> NativeFloat {
        let mut sqr = 0.0;
        for i in 0..Self::DIM {
            sqr += self.axis(i) * self.axis(i);
        }
        sqr
    }

    fn dot(&self, other: &Self) -> NativeFloat {
        let mut dot = 0.0;
        for i in 0..Self::DIM {
            dot += self.axis(i) * other.axis(i);
        }
        dot
    }

    fn distance(&self, other: Self) -> NativeFloat {
        (*self - other).squared_length().sqrt()
    }
}
