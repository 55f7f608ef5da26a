//! Scene graph configuration, validation, and error types.

use std::error::Error;
use std::fmt;

use scenic_state::StateConfig;

// ── SceneGraphConfig ───────────────────────────────────────────────

/// Configuration for a [`SceneGraph`](crate::SceneGraph).
///
/// [`validate()`](SceneGraphConfig::validate) is called by
/// [`SceneGraph::with_config`](crate::SceneGraph::with_config); every
/// context allocated from the graph inherits the state configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneGraphConfig {
    /// Configuration copied into the model and every allocated context.
    pub state: StateConfig,
    /// Capacity of the bounded channel behind
    /// [`SceneGraph::pose_ingress`](crate::SceneGraph::pose_ingress).
    /// Default: 64. Must be at least 1.
    pub ingress_capacity: usize,
}

impl SceneGraphConfig {
    /// Default pose ingress capacity.
    pub const DEFAULT_INGRESS_CAPACITY: usize = 64;

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.state.source_name_prefix.trim().is_empty() {
            return Err(ConfigError::EmptySourcePrefix);
        }
        if self.ingress_capacity == 0 {
            return Err(ConfigError::IngressCapacityZero);
        }
        Ok(())
    }
}

impl Default for SceneGraphConfig {
    fn default() -> Self {
        Self {
            state: StateConfig::default(),
            ingress_capacity: Self::DEFAULT_INGRESS_CAPACITY,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SceneGraphConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The generated source name prefix is empty or whitespace.
    EmptySourcePrefix,
    /// Pose ingress capacity is zero.
    IngressCapacityZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySourcePrefix => write!(f, "source name prefix must not be empty"),
            Self::IngressCapacityZero => write!(f, "pose ingress capacity must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SceneGraphConfig::default();
        assert_eq!(config.ingress_capacity, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_prefix_rejected() {
        let mut config = SceneGraphConfig::default();
        config.state.source_name_prefix = "  ".into();
        assert_eq!(config.validate(), Err(ConfigError::EmptySourcePrefix));
    }

    #[test]
    fn zero_capacity_rejected() {
        let config = SceneGraphConfig {
            ingress_capacity: 0,
            ..SceneGraphConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::IngressCapacityZero));
        assert_eq!(
            ConfigError::IngressCapacityZero.to_string(),
            "pose ingress capacity must be at least 1"
        );
    }
}
