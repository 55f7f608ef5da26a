//! Roles and their property bundles.
//!
//! A role marks a geometry as eligible for a consumer: collision filtering and
//! distance queries look only at [`Role::Proximity`] geometries, pose-bundle
//! visualization only at [`Role::Illustration`] geometries. A geometry may
//! hold any subset of roles at once.

use std::fmt;

use indexmap::IndexMap;

/// Role kinds, used as query filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Matches every geometry regardless of assigned roles.
    Unassigned,
    /// Collision and distance queries.
    Proximity,
    /// Visualization.
    Illustration,
    /// Rendering for simulated sensors.
    Perception,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unassigned => "unassigned",
            Self::Proximity => "proximity",
            Self::Illustration => "illustration",
            Self::Perception => "perception",
        };
        f.write_str(name)
    }
}

/// A single property value.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Free text.
    Text(String),
    /// Colour as red, green, blue, alpha in `[0, 1]`.
    Rgba([f64; 4]),
}

/// Ordered `(group, name) -> value` property map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyBundle {
    values: IndexMap<(String, String), PropertyValue>,
}

impl PropertyBundle {
    /// An empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(
        mut self,
        group: impl Into<String>,
        name: impl Into<String>,
        value: PropertyValue,
    ) -> Self {
        self.set(group, name, value);
        self
    }

    /// Insert or overwrite a property.
    pub fn set(&mut self, group: impl Into<String>, name: impl Into<String>, value: PropertyValue) {
        self.values.insert((group.into(), name.into()), value);
    }

    /// Look up a property.
    pub fn get(&self, group: &str, name: &str) -> Option<&PropertyValue> {
        self.values
            .iter()
            .find(|((g, n), _)| g == group && n == name)
            .map(|(_, v)| v)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bundle holds no properties.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `((group, name), value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), &PropertyValue)> {
        self.values.iter()
    }
}

/// A role together with its property bundle, as passed to role assignment.
#[derive(Clone, Debug, PartialEq)]
pub enum RoleProperties {
    /// Collision-relevant properties.
    Proximity(PropertyBundle),
    /// Visualization properties (e.g. `("phong", "diffuse")`).
    Illustration(PropertyBundle),
    /// Sensor-rendering properties.
    Perception(PropertyBundle),
}

impl RoleProperties {
    /// Proximity role with no properties.
    pub fn proximity() -> Self {
        Self::Proximity(PropertyBundle::new())
    }

    /// Illustration role with no properties.
    pub fn illustration() -> Self {
        Self::Illustration(PropertyBundle::new())
    }

    /// Perception role with no properties.
    pub fn perception() -> Self {
        Self::Perception(PropertyBundle::new())
    }

    /// Which role this assigns.
    pub fn role(&self) -> Role {
        match self {
            Self::Proximity(_) => Role::Proximity,
            Self::Illustration(_) => Role::Illustration,
            Self::Perception(_) => Role::Perception,
        }
    }

    /// The carried properties.
    pub fn bundle(&self) -> &PropertyBundle {
        match self {
            Self::Proximity(b) | Self::Illustration(b) | Self::Perception(b) => b,
        }
    }

    /// Consume into the carried properties.
    pub fn into_bundle(self) -> PropertyBundle {
        match self {
            Self::Proximity(b) | Self::Illustration(b) | Self::Perception(b) => b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_in_place() {
        let mut b = PropertyBundle::new()
            .with("phong", "diffuse", PropertyValue::Rgba([1.0, 0.0, 0.0, 1.0]))
            .with("label", "id", PropertyValue::Int(3));
        b.set("phong", "diffuse", PropertyValue::Rgba([0.0, 1.0, 0.0, 1.0]));
        assert_eq!(b.len(), 2);
        assert_eq!(
            b.get("phong", "diffuse"),
            Some(&PropertyValue::Rgba([0.0, 1.0, 0.0, 1.0]))
        );
        assert_eq!(b.iter().next().map(|(k, _)| k.0.as_str()), Some("phong"));
    }

    #[test]
    fn role_properties_report_role() {
        assert_eq!(RoleProperties::proximity().role(), Role::Proximity);
        assert_eq!(RoleProperties::illustration().role(), Role::Illustration);
        assert!(RoleProperties::perception().bundle().is_empty());
    }
}
