//! Bound on the relative orientation of two frames.
//!
//! Frames `A` and `B` are fixed to the registered frames `Abar` and `Bbar`
//! by constant rotations `R_AbarA` and `R_BbarB`. The constraint bounds the
//! angle of `R_AB`, the rotation of `B` measured in `A`:
//!
//! ```text
//! R_AB = R_AbarA^T * R_W_Abar^T * R_W_Bbar * R_BbarB
//! angle(R_AB) <= θ   ⇔   2 cos(θ) + 1 <= trace(R_AB) <= 3
//! ```
//!
//! The trace is a smooth function of the poses, unlike the angle itself,
//! so [`OrientationConstraint::eval`] reports the trace.

use scenic_core::{FrameId, GeometryError, Rotation, Scalar};
use scenic_engine::QueryObject;
use scenic_state::SceneGraphInspector;
use tracing::debug;

use crate::error::ConstraintError;

/// Upper bound on `trace(R_AB)`, reached when `A` and `B` are aligned.
const TRACE_UPPER_BOUND: f64 = 3.0;

/// Constrains the angle between two frames to at most `angle_bound`.
#[derive(Clone, Debug)]
pub struct OrientationConstraint<T: Scalar> {
    frame_a_bar: FrameId,
    r_abar_a: Rotation<T>,
    frame_b_bar: FrameId,
    r_bbar_b: Rotation<T>,
    angle_bound: f64,
}

impl<T: Scalar> OrientationConstraint<T> {
    /// Build the constraint.
    ///
    /// `inspector` is only used to check that both frames are registered.
    /// Fails with [`ConstraintError::InvalidAngleBound`] if `angle_bound`
    /// is negative or not finite.
    pub fn new(
        inspector: &SceneGraphInspector<'_, T>,
        frame_a_bar: FrameId,
        r_abar_a: Rotation<T>,
        frame_b_bar: FrameId,
        r_bbar_b: Rotation<T>,
        angle_bound: f64,
    ) -> Result<Self, ConstraintError> {
        if !angle_bound.is_finite() || angle_bound < 0.0 {
            return Err(ConstraintError::InvalidAngleBound { value: angle_bound });
        }
        for frame in [frame_a_bar, frame_b_bar] {
            if !inspector.frame_is_registered(frame) {
                return Err(GeometryError::UnknownFrame {
                    id: frame,
                    operation: "orientation_constraint",
                }
                .into());
            }
        }
        debug!(
            frame_a_bar = frame_a_bar.get(),
            frame_b_bar = frame_b_bar.get(),
            angle_bound,
            "built orientation constraint"
        );
        Ok(Self {
            frame_a_bar,
            r_abar_a,
            frame_b_bar,
            r_bbar_b,
            angle_bound,
        })
    }

    /// The angular bound in radians.
    pub fn angle_bound(&self) -> f64 {
        self.angle_bound
    }

    /// `2 cos(angle_bound) + 1`.
    pub fn lower_bound(&self) -> f64 {
        2.0 * self.angle_bound.cos() + 1.0
    }

    /// Always 3.
    pub fn upper_bound(&self) -> f64 {
        TRACE_UPPER_BOUND
    }

    /// `R_AB` from the current world poses of `Abar` and `Bbar`.
    pub fn relative_rotation(
        &self,
        query: &QueryObject<'_, T>,
    ) -> Result<Rotation<T>, ConstraintError> {
        let r_w_abar = query.pose_in_world(self.frame_a_bar)?.rotation();
        let r_w_bbar = query.pose_in_world(self.frame_b_bar)?.rotation();
        Ok(self
            .r_abar_a
            .inverse()
            .multiply(&r_w_abar.inverse())
            .multiply(&r_w_bbar)
            .multiply(&self.r_bbar_b))
    }

    /// `trace(R_AB)`.
    pub fn eval(&self, query: &QueryObject<'_, T>) -> Result<T, ConstraintError> {
        Ok(self.relative_rotation(query)?.trace())
    }

    /// Whether `eval` lies within `[lower_bound - tolerance, upper_bound + tolerance]`.
    pub fn check_satisfied(
        &self,
        query: &QueryObject<'_, T>,
        tolerance: f64,
    ) -> Result<bool, ConstraintError> {
        let value = self.eval(query)?.value();
        Ok(value >= self.lower_bound() - tolerance && value <= self.upper_bound() + tolerance)
    }
}
