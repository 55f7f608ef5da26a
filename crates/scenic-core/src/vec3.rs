//! Three-component vector over a [`Scalar`].

use core::ops::{Add, Mul, Neg, Sub};

use crate::scalar::Scalar;

/// 3D vector used for translations and points.
///
/// Components are metres when the vector is a translation or point; the
/// calling context decides which.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3<T: Scalar> {
    data: [T; 3],
}

impl<T: Scalar> Vec3<T> {
    /// Creates a vector from components.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { data: [x, y, z] }
    }

    /// The zero vector.
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Creates a vector from plain `f64` components.
    pub fn from_f64(x: f64, y: f64, z: f64) -> Self {
        Self::new(T::from_f64(x), T::from_f64(y), T::from_f64(z))
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [T; 3] {
        self.data
    }

    /// X component.
    pub fn x(&self) -> T {
        self.data[0]
    }

    /// Y component.
    pub fn y(&self) -> T {
        self.data[1]
    }

    /// Z component.
    pub fn z(&self) -> T {
        self.data[2]
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, s: T) -> Self {
        Self::new(self.x() * s, self.y() * s, self.z() * s)
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> T {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Cross product with another vector.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        )
    }

    /// Squared Euclidean length.
    pub fn length_squared(&self) -> T {
        self.dot(self)
    }

    /// Euclidean length.
    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    /// Whether every component is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|c| c.is_finite())
    }

    /// Carries the vector into another scalar type.
    pub fn cast<U: Scalar>(&self) -> Vec3<U> {
        Vec3::new(self.x().convert(), self.y().convert(), self.z().convert())
    }
}

impl<T: Scalar> Add for Vec3<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x() + rhs.x(), self.y() + rhs.y(), self.z() + rhs.z())
    }
}

impl<T: Scalar> Sub for Vec3<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x() - rhs.x(), self.y() - rhs.y(), self.z() - rhs.z())
    }
}

impl<T: Scalar> Neg for Vec3<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z())
    }
}

impl<T: Scalar> Mul<T> for Vec3<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        self.scale(rhs)
    }
}
