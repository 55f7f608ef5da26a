//! Constraint construction and evaluation errors.

use std::error::Error;
use std::fmt;

use scenic_core::GeometryError;

/// Errors raised while building or evaluating a constraint.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstraintError {
    /// An angular bound was negative, NaN or infinite.
    InvalidAngleBound {
        /// The rejected bound in radians.
        value: f64,
    },
    /// A scene graph lookup failed.
    Geometry(GeometryError),
}

impl fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAngleBound { value } => {
                write!(
                    f,
                    "angle bound must be finite and non-negative, got {value}"
                )
            }
            Self::Geometry(e) => write!(f, "scene graph lookup failed: {e}"),
        }
    }
}

impl Error for ConstraintError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Geometry(e) => Some(e),
            Self::InvalidAngleBound { .. } => None,
        }
    }
}

impl From<GeometryError> for ConstraintError {
    fn from(e: GeometryError) -> Self {
        Self::Geometry(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenic_core::FrameId;

    #[test]
    fn geometry_error_is_chained() {
        let inner = GeometryError::UnknownFrame {
            id: FrameId::next(),
            operation: "orientation_constraint",
        };
        let err = ConstraintError::from(inner.clone());
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source, Some(inner.to_string()));
    }

    #[test]
    fn bound_message_names_value() {
        let msg = ConstraintError::InvalidAngleBound { value: -0.5 }.to_string();
        assert!(msg.contains("-0.5"));
    }
}
