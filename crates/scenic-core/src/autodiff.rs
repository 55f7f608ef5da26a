//! Forward-mode automatic differentiation scalar.
//!
//! [`AutoDiff<N>`] carries a value together with its partial derivatives with
//! respect to `N` independent variables. Every [`Scalar`] operation applies
//! the chain rule, so any pose computation written against [`Scalar`] yields
//! derivatives for free when instantiated over `AutoDiff`.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::scalar::Scalar;

/// A value with `N` forward-mode partial derivatives.
///
/// Equality and ordering compare the value only, matching how a plain number
/// would compare.
#[derive(Clone, Copy, Debug)]
pub struct AutoDiff<const N: usize> {
    value: f64,
    derivatives: [f64; N],
}

impl<const N: usize> AutoDiff<N> {
    /// A constant: all derivatives zero.
    pub const fn constant(value: f64) -> Self {
        Self {
            value,
            derivatives: [0.0; N],
        }
    }

    /// An independent variable: derivative 1 with respect to `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    pub fn variable(value: f64, index: usize) -> Self {
        assert!(index < N, "derivative index {index} out of range for {N} variables");
        let mut derivatives = [0.0; N];
        derivatives[index] = 1.0;
        Self { value, derivatives }
    }

    /// Construct from an explicit value and gradient.
    pub const fn new(value: f64, derivatives: [f64; N]) -> Self {
        Self { value, derivatives }
    }

    /// The partial derivatives.
    pub fn derivatives(&self) -> &[f64; N] {
        &self.derivatives
    }

    /// Partial derivative with respect to variable `index`.
    pub fn derivative(&self, index: usize) -> f64 {
        self.derivatives[index]
    }

    fn map(self, value: f64, scale: f64) -> Self {
        let mut derivatives = self.derivatives;
        for d in &mut derivatives {
            *d *= scale;
        }
        Self { value, derivatives }
    }
}

impl<const N: usize> Default for AutoDiff<N> {
    fn default() -> Self {
        Self::constant(0.0)
    }
}

impl<const N: usize> PartialEq for AutoDiff<N> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<const N: usize> PartialOrd for AutoDiff<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<const N: usize> fmt::Display for AutoDiff<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.value, self.derivatives)
    }
}

impl<const N: usize> Add for AutoDiff<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut derivatives = self.derivatives;
        for (d, r) in derivatives.iter_mut().zip(rhs.derivatives) {
            *d += r;
        }
        Self {
            value: self.value + rhs.value,
            derivatives,
        }
    }
}

impl<const N: usize> Sub for AutoDiff<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut derivatives = self.derivatives;
        for (d, r) in derivatives.iter_mut().zip(rhs.derivatives) {
            *d -= r;
        }
        Self {
            value: self.value - rhs.value,
            derivatives,
        }
    }
}

impl<const N: usize> Mul for AutoDiff<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut derivatives = [0.0; N];
        for (i, d) in derivatives.iter_mut().enumerate() {
            *d = self.derivatives[i] * rhs.value + self.value * rhs.derivatives[i];
        }
        Self {
            value: self.value * rhs.value,
            derivatives,
        }
    }
}

impl<const N: usize> Div for AutoDiff<N> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let denom = rhs.value * rhs.value;
        let mut derivatives = [0.0; N];
        for (i, d) in derivatives.iter_mut().enumerate() {
            *d = (self.derivatives[i] * rhs.value - self.value * rhs.derivatives[i]) / denom;
        }
        Self {
            value: self.value / rhs.value,
            derivatives,
        }
    }
}

impl<const N: usize> Neg for AutoDiff<N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(-self.value, -1.0)
    }
}

impl<const N: usize> Scalar for AutoDiff<N> {
    fn zero() -> Self {
        Self::constant(0.0)
    }

    fn one() -> Self {
        Self::constant(1.0)
    }

    fn from_f64(value: f64) -> Self {
        Self::constant(value)
    }

    fn value(self) -> f64 {
        self.value
    }

    fn sqrt(self) -> Self {
        let root = self.value.sqrt();
        self.map(root, 0.5 / root)
    }

    fn sin(self) -> Self {
        self.map(self.value.sin(), self.value.cos())
    }

    fn cos(self) -> Self {
        self.map(self.value.cos(), -self.value.sin())
    }

    fn abs(self) -> Self {
        if self.value < 0.0 {
            -self
        } else {
            self
        }
    }

    fn is_finite(self) -> bool {
        self.value.is_finite() && self.derivatives.iter().all(|d| d.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn product_rule() {
        let x = AutoDiff::<2>::variable(3.0, 0);
        let y = AutoDiff::<2>::variable(4.0, 1);
        let z = x * y;
        assert_eq!(z.value(), 12.0);
        assert_eq!(z.derivatives(), &[4.0, 3.0]);
    }

    #[test]
    fn quotient_rule() {
        let x = AutoDiff::<1>::variable(2.0, 0);
        let z = AutoDiff::<1>::one() / x;
        assert!((z.derivative(0) + 0.25).abs() < EPS);
    }

    #[test]
    fn trig_chain_rule() {
        let theta = AutoDiff::<1>::variable(0.3, 0);
        let s = theta.sin();
        let c = theta.cos();
        assert!((s.derivative(0) - 0.3_f64.cos()).abs() < EPS);
        assert!((c.derivative(0) + 0.3_f64.sin()).abs() < EPS);
    }

    #[test]
    fn sqrt_derivative() {
        let x = AutoDiff::<1>::variable(4.0, 0);
        let r = x.sqrt();
        assert!((r.value() - 2.0).abs() < EPS);
        assert!((r.derivative(0) - 0.25).abs() < EPS);
    }

    #[test]
    fn abs_flips_gradient_for_negative_values() {
        let x = AutoDiff::<1>::variable(-2.0, 0);
        assert_eq!(x.abs().value(), 2.0);
        assert_eq!(x.abs().derivative(0), -1.0);
    }

    #[test]
    fn equality_ignores_derivatives() {
        assert_eq!(AutoDiff::<1>::variable(1.0, 0), AutoDiff::<1>::constant(1.0));
    }

    #[test]
    fn convert_to_f64_drops_gradient() {
        let x = AutoDiff::<1>::variable(1.5, 0);
        let plain: f64 = x.convert();
        assert_eq!(plain, 1.5);
        let back: AutoDiff<1> = plain.convert();
        assert_eq!(back.derivative(0), 0.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn variable_index_checked() {
        let _ = AutoDiff::<1>::variable(0.0, 1);
    }
}
