//! Scalar arithmetic abstraction for pose math.
//!
//! Geometry state, pose composition and the constraint consumers are written
//! once against [`Scalar`] and instantiated over plain `f64` or over the
//! forward-mode [`AutoDiff`](crate::AutoDiff) number. Arithmetic operators are
//! required via the standard operator traits so generic code can use `+`,
//! `-`, `*`, `/` and unary `-` directly.

use core::any::Any;
use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// Numeric type that poses are expressed in.
///
/// Implementations must be pure: every operation is a total function of its
/// inputs. Comparisons look at the value only.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Returns the additive identity (zero).
    fn zero() -> Self;

    /// Returns the multiplicative identity (one).
    fn one() -> Self;

    /// Lifts a plain value into this scalar type as a constant.
    fn from_f64(value: f64) -> Self;

    /// The plain numeric value, discarding any derivative information.
    fn value(self) -> f64;

    /// Square root.
    fn sqrt(self) -> Self;

    /// Sine of `self` (radians).
    fn sin(self) -> Self;

    /// Cosine of `self` (radians).
    fn cos(self) -> Self;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Whether the value (and any derivatives) are finite.
    fn is_finite(self) -> bool;

    /// Carries this scalar into another scalar type.
    ///
    /// When `U` is `Self` the scalar is returned unchanged, derivatives
    /// included. Otherwise only the value crosses over and the result is a
    /// constant of `U`.
    fn convert<U: Scalar>(self) -> U {
        match (&self as &dyn Any).downcast_ref::<U>() {
            Some(same) => *same,
            None => U::from_f64(self.value()),
        }
    }
}

impl Scalar for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_f64(value: f64) -> Self {
        value
    }

    fn value(self) -> f64 {
        self
    }

    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn abs(self) -> Self {
        f64::abs(self)
    }

    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hypot<T: Scalar>(a: T, b: T) -> T {
        (a * a + b * b).sqrt()
    }

    #[test]
    fn generic_code_runs_on_f64() {
        assert_eq!(hypot(3.0_f64, 4.0), 5.0);
    }

    #[test]
    fn convert_preserves_value() {
        let x: f64 = 2.5;
        let y: f64 = x.convert();
        assert_eq!(y, 2.5);
    }

    #[test]
    fn convert_keeps_gradient_within_same_type() {
        use crate::AutoDiff;

        let x = AutoDiff::<2>::new(1.5, [0.25, -1.0]);
        let same: AutoDiff<2> = x.convert();
        assert_eq!(same.derivatives(), &[0.25, -1.0]);

        let wider: AutoDiff<3> = x.convert();
        assert_eq!(wider.value(), 1.5);
        assert_eq!(wider.derivatives(), &[0.0; 3]);
    }

    #[test]
    fn non_finite_detected() {
        assert!(!Scalar::is_finite(f64::NAN));
        assert!(!Scalar::is_finite(f64::INFINITY));
        assert!(Scalar::is_finite(1.0_f64));
    }
}
