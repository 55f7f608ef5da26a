//! Geometry state configuration parameters.

/// Configuration for a [`GeometryState`](crate::GeometryState).
///
/// Copied into every context allocated from a model and preserved across
/// transmogrification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateConfig {
    /// Prefix of generated names for sources registered without one.
    ///
    /// Default: `"source_"`. The source ID is appended.
    pub source_name_prefix: String,

    /// Reject pose inputs containing NaN or infinite components.
    ///
    /// Default: `true`.
    pub reject_non_finite_poses: bool,
}

impl StateConfig {
    /// Default prefix for generated source names.
    pub const DEFAULT_SOURCE_NAME_PREFIX: &'static str = "source_";

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            source_name_prefix: Self::DEFAULT_SOURCE_NAME_PREFIX.to_string(),
            reject_non_finite_poses: true,
        }
    }

    /// Generated name for a source registered without one.
    pub fn generated_source_name(&self, id: scenic_core::SourceId) -> String {
        format!("{}{}", self.source_name_prefix, id)
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenic_core::SourceId;

    #[test]
    fn default_prefix_is_source_underscore() {
        let config = StateConfig::default();
        assert_eq!(config.source_name_prefix, "source_");
        assert!(config.reject_non_finite_poses);
    }

    #[test]
    fn generated_name_appends_id() {
        let config = StateConfig {
            source_name_prefix: "robot_".into(),
            ..StateConfig::default()
        };
        let id = SourceId::next();
        assert_eq!(config.generated_source_name(id), format!("robot_{}", id.get()));
    }
}
