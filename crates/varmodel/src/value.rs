//! The capability required of interpolatable per-master values.

use std::ops::{Add, Mul, Sub};

/// Anything supporting elementwise scale-and-add can be interpolated.
///
/// `f64` and vector types such as `kurbo::Vec2` satisfy this out of the
/// box; composite records only need the three std ops over themselves.
pub trait MasterValue:
    Clone + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
}

impl<T> MasterValue for T where
    T: Clone + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>
{
}
