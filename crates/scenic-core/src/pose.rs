//! Rigid transforms ([`Pose`]) over a [`Scalar`].
//!
//! Notation follows the usual frame convention: `X_AB` is the pose of frame
//! `B` measured and expressed in frame `A`, and `X_AC = X_AB * X_BC`.

use core::ops::Mul;

use crate::rotation::Rotation;
use crate::scalar::Scalar;
use crate::vec3::Vec3;

/// Rotation followed by translation: `p_A = R * p_B + t`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose<T: Scalar> {
    rotation: Rotation<T>,
    translation: Vec3<T>,
}

impl<T: Scalar> Pose<T> {
    /// Creates a pose from components.
    pub fn new(rotation: Rotation<T>, translation: Vec3<T>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// The identity pose.
    pub fn identity() -> Self {
        Self::new(Rotation::identity(), Vec3::zero())
    }

    /// A pure translation.
    pub fn from_translation(translation: Vec3<T>) -> Self {
        Self::new(Rotation::identity(), translation)
    }

    /// A pure rotation.
    pub fn from_rotation(rotation: Rotation<T>) -> Self {
        Self::new(rotation, Vec3::zero())
    }

    /// Rotation component.
    pub fn rotation(&self) -> Rotation<T> {
        self.rotation
    }

    /// Translation component.
    pub fn translation(&self) -> Vec3<T> {
        self.translation
    }

    /// `self * other`: the pose of `other`'s child measured in `self`'s parent.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation.multiply(&other.rotation),
            translation: self.translation + self.rotation.rotate(&other.translation),
        }
    }

    /// The inverse transform: `X_BA` from `X_AB`.
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            rotation,
            translation: -rotation.rotate(&self.translation),
        }
    }

    /// Maps a point from the child frame into the parent frame.
    pub fn transform_point(&self, p: &Vec3<T>) -> Vec3<T> {
        self.translation + self.rotation.rotate(p)
    }

    /// Whether every component is finite.
    pub fn is_finite(&self) -> bool {
        self.rotation.is_finite() && self.translation.is_finite()
    }

    /// Carries the pose into another scalar type.
    pub fn cast<U: Scalar>(&self) -> Pose<U> {
        Pose::new(self.rotation.cast(), self.translation.cast())
    }

    /// Component-wise comparison of values within `tolerance`.
    ///
    /// Quaternions `q` and `-q` describe the same rotation and compare equal.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        let t = (self.translation - other.translation).length().value();
        if t > tolerance {
            return false;
        }
        let a = self.rotation.to_array();
        let b = other.rotation.to_array();
        let same = a.iter().zip(&b).all(|(x, y)| (x.value() - y.value()).abs() <= tolerance);
        let flipped = a.iter().zip(&b).all(|(x, y)| (x.value() + y.value()).abs() <= tolerance);
        same || flipped
    }
}

impl<T: Scalar> Default for Pose<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Scalar> Mul for Pose<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}

impl<T: Scalar> Mul<&Pose<T>> for &Pose<T> {
    type Output = Pose<T>;

    fn mul(self, rhs: &Pose<T>) -> Pose<T> {
        self.compose(rhs)
    }
}
