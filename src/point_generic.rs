use num_traits::Float;

use super::*;

/// Point with dimensions of constant generic size N and of generic type T
/// (Implemented as Newtype Pattern on an array
/// see book or https://www.worthe-it.co.za/blog/2020-10-31-newtype-pattern-in-rust.html)
/// This type only interacts with the library through
/// the point trait, so you are free to use your own
/// Point/Coord/Vec structures instead by implementing the (small) trait
#[derive(Debug, Copy, Clone)]
pub struct PointN<T, const N: usize>([T; N]);

impl<T, const N: usize> PointN<T, N> {
    pub fn new(array: [T; N]) -> Self {
        PointN(array)
    }

    pub fn into_array(self) -> [T; N] {
        self.0
    }
}

impl<T: Float, const N: usize> PointN<T, N> {
    /// Euclidean length of the point interpreted as a vector
    pub fn length(&self) -> T {
        self.0
            .iter()
            .fold(T::zero(), |acc, x| acc + *x * *x)
            .sqrt()
    }

    /// Linear interpolation towards `other`
    pub fn lerp(self, other: Self, t: T) -> Self {
        let mut res = self;
        for i in 0..N {
            res.0[i] = self.0[i] + (other.0[i] - self.0[i]) * t;
        }
        res
    }
}

impl<T: Float> PointN<T, 3> {
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = other.0;
        PointN([ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx])
    }
}

/// Initialize with the Default value for the underlying type
impl<T: Default + Copy, const N: usize> Default for PointN<T, N> {
    fn default() -> Self {
        PointN([T::default(); N])
    }
}

impl<T, const N: usize> PartialEq for PointN<T, N>
where
    T: PartialOrd,
{
    fn eq(&self, other: &Self) -> bool {
        for i in 0..N {
            if self.0[i] != other.0[i] {
                return false;
            }
        }
        true
    }
}

impl<T, const N: usize> From<[T; N]> for PointN<T, N> {
    fn from(array: [T; N]) -> Self {
        PointN(array)
    }
}

impl<T, const N: usize> core::ops::Index<usize> for PointN<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T, const N: usize> Add for PointN<T, N>
where
    T: Add<Output = T> + Copy,
{
    type Output = Self;

    fn add(self, other: PointN<T, N>) -> PointN<T, N> {
        let mut res = self;
        for i in 0..N {
            res.0[i] = self.0[i] + other.0[i];
        }
        res
    }
}

impl<T, const N: usize> Sub for PointN<T, N>
where
    T: Sub<Output = T> + Copy,
{
    type Output = Self;

    fn sub(self, other: PointN<T, N>) -> PointN<T, N> {
        let mut res = self;
        for i in 0..N {
            res.0[i] = self.0[i] - other.0[i];
        }
        res
    }
}

impl<T, const N: usize, U> Mul<U> for PointN<T, N>
where
    // The mulitplication is done by mulitpling T * U => T, this
    // trait bound for T will specify this requirement as the mul operator is
    // translated to using the first operand as self and the second as rhs.
    T: Mul<U, Output = T> + Copy,
    U: Copy,
{
    type Output = PointN<T, N>;

    fn mul(self, rhs: U) -> PointN<T, N> {
        let mut res = self;
        for i in 0..N {
            res.0[i] = res.0[i] * rhs;
        }
        res
    }
}

impl<T, const N: usize> IntoIterator for PointN<T, N> {
    type Item = T;
    type IntoIter = core::array::IntoIter<Self::Item, N>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIterator::into_iter(self.0)
    }
}

impl<const N: usize> Point for PointN<NativeFloat, N> {
    const DIM: usize = N;

    fn axis(&self, index: usize) -> NativeFloat {
        self.0[index]
    }
}
