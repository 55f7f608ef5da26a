//! Unit-quaternion rotation over a [`Scalar`].

use crate::scalar::Scalar;
use crate::vec3::Vec3;

/// Norms at or below this are treated as degenerate.
const EPSILON: f64 = 1e-12;

/// Rotation stored as a quaternion `(x, y, z, w)` with `w` the scalar part.
///
/// Constructors produce unit quaternions; [`Rotation::multiply`] of unit
/// quaternions stays unit up to rounding.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rotation<T: Scalar> {
    data: [T; 4],
}

impl<T: Scalar> Rotation<T> {
    /// Creates a rotation from raw quaternion components, normalising them.
    ///
    /// Returns the identity when the components have (near) zero norm.
    pub fn from_quaternion(x: T, y: T, z: T, w: T) -> Self {
        Self { data: [x, y, z, w] }.normalize()
    }

    /// The identity rotation.
    pub fn identity() -> Self {
        Self {
            data: [T::zero(), T::zero(), T::zero(), T::one()],
        }
    }

    /// Rotation of `angle` radians about `axis`.
    ///
    /// Returns the identity when the axis has (near) zero length.
    pub fn from_axis_angle(axis: Vec3<T>, angle: T) -> Self {
        let len = axis.length();
        if len.value() <= EPSILON {
            return Self::identity();
        }
        let half = angle * T::from_f64(0.5);
        let s = half.sin() / len;
        Self {
            data: [axis.x() * s, axis.y() * s, axis.z() * s, half.cos()],
        }
    }

    /// Quaternion components `[x, y, z, w]`.
    pub fn to_array(self) -> [T; 4] {
        self.data
    }

    fn x(&self) -> T {
        self.data[0]
    }

    fn y(&self) -> T {
        self.data[1]
    }

    fn z(&self) -> T {
        self.data[2]
    }

    fn w(&self) -> T {
        self.data[3]
    }

    /// Hamilton product `self * other`: apply `other`, then `self`.
    pub fn multiply(&self, other: &Self) -> Self {
        let (ax, ay, az, aw) = (self.x(), self.y(), self.z(), self.w());
        let (bx, by, bz, bw) = (other.x(), other.y(), other.z(), other.w());
        Self {
            data: [
                aw * bx + ax * bw + ay * bz - az * by,
                aw * by - ax * bz + ay * bw + az * bx,
                aw * bz + ax * by - ay * bx + az * bw,
                aw * bw - ax * bx - ay * by - az * bz,
            ],
        }
    }

    /// The inverse rotation (the conjugate, for unit quaternions).
    pub fn inverse(&self) -> Self {
        Self {
            data: [-self.x(), -self.y(), -self.z(), self.w()],
        }
    }

    /// Rotates a vector.
    pub fn rotate(&self, v: &Vec3<T>) -> Vec3<T> {
        let q = Vec3::new(self.x(), self.y(), self.z());
        let two = T::from_f64(2.0);
        let t = q.cross(v).scale(two);
        *v + t.scale(self.w()) + q.cross(&t)
    }

    /// Rescales to unit norm; identity when the norm is (near) zero.
    pub fn normalize(&self) -> Self {
        let norm = (self.x() * self.x()
            + self.y() * self.y()
            + self.z() * self.z()
            + self.w() * self.w())
        .sqrt();
        if norm.value() <= EPSILON {
            return Self::identity();
        }
        Self {
            data: [
                self.x() / norm,
                self.y() / norm,
                self.z() / norm,
                self.w() / norm,
            ],
        }
    }

    /// Row-major 3x3 rotation matrix.
    pub fn to_matrix(&self) -> [[T; 3]; 3] {
        let (x, y, z, w) = (self.x(), self.y(), self.z(), self.w());
        let one = T::one();
        let two = T::from_f64(2.0);
        [
            [
                one - two * (y * y + z * z),
                two * (x * y - w * z),
                two * (x * z + w * y),
            ],
            [
                two * (x * y + w * z),
                one - two * (x * x + z * z),
                two * (y * z - w * x),
            ],
            [
                two * (x * z - w * y),
                two * (y * z + w * x),
                one - two * (x * x + y * y),
            ],
        ]
    }

    /// Trace of the rotation matrix, `1 + 2 cos(angle)`.
    pub fn trace(&self) -> T {
        let m = self.to_matrix();
        m[0][0] + m[1][1] + m[2][2]
    }

    /// Rotation angle in radians, in `[0, pi]`, as a plain value.
    pub fn angle_value(&self) -> f64 {
        let v = (self.x().value().powi(2) + self.y().value().powi(2) + self.z().value().powi(2))
            .sqrt();
        2.0 * v.atan2(self.w().value().abs())
    }

    /// Whether every component is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|c| c.is_finite())
    }

    /// Carries the rotation into another scalar type.
    pub fn cast<U: Scalar>(&self) -> Rotation<U> {
        Rotation {
            data: [
                self.x().convert(),
                self.y().convert(),
                self.z().convert(),
                self.w().convert(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn close(a: &Vec3<f64>, b: &Vec3<f64>) -> bool {
        (*a - *b).length() < 1e-12
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let r = Rotation::<f64>::from_axis_angle(Vec3::from_f64(0.0, 0.0, 1.0), FRAC_PI_2);
        let v = r.rotate(&Vec3::from_f64(1.0, 0.0, 0.0));
        assert!(close(&v, &Vec3::from_f64(0.0, 1.0, 0.0)));
    }

    #[test]
    fn multiply_is_not_commutative() {
        let yaw = Rotation::<f64>::from_axis_angle(Vec3::from_f64(0.0, 1.0, 0.0), FRAC_PI_2);
        let pitch = Rotation::<f64>::from_axis_angle(Vec3::from_f64(1.0, 0.0, 0.0), FRAC_PI_2);
        assert_ne!(yaw.multiply(&pitch), pitch.multiply(&yaw));
    }

    #[test]
    fn inverse_undoes_rotation() {
        let r = Rotation::<f64>::from_axis_angle(Vec3::from_f64(1.0, 2.0, 3.0), 0.7);
        let v = Vec3::from_f64(0.3, -1.0, 2.0);
        assert!(close(&r.inverse().rotate(&r.rotate(&v)), &v));
    }

    #[test]
    fn matrix_agrees_with_rotate() {
        let r = Rotation::<f64>::from_axis_angle(Vec3::from_f64(0.2, 0.4, -0.5), 1.1);
        let v = Vec3::from_f64(1.0, -2.0, 0.5);
        let m = r.to_matrix();
        let mv = Vec3::new(
            m[0][0] * v.x() + m[0][1] * v.y() + m[0][2] * v.z(),
            m[1][0] * v.x() + m[1][1] * v.y() + m[1][2] * v.z(),
            m[2][0] * v.x() + m[2][1] * v.y() + m[2][2] * v.z(),
        );
        assert!(close(&mv, &r.rotate(&v)));
    }

    #[test]
    fn trace_encodes_angle() {
        let angle: f64 = 0.4;
        let r = Rotation::<f64>::from_axis_angle(Vec3::from_f64(0.1, 0.3, 0.2), angle);
        assert!((r.trace() - (1.0 + 2.0 * angle.cos())).abs() < 1e-12);
        assert!((r.angle_value() - angle).abs() < 1e-12);
    }

    #[test]
    fn degenerate_axis_is_identity() {
        let r = Rotation::<f64>::from_axis_angle(Vec3::<f64>::zero(), 1.0);
        assert_eq!(r, Rotation::identity());
    }
}
