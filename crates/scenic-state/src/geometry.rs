//! Geometries: the registration descriptor and the stored record.

use indexmap::IndexSet;
use scenic_core::{
    FrameId, GeometryId, Pose, PropertyBundle, Role, RoleProperties, Scalar, Shape, SourceId,
};

/// Description of a geometry to register.
///
/// Roles may be attached up front; they are assigned as part of
/// registration.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryInstance {
    pose: Pose<f64>,
    shape: Shape,
    name: String,
    roles: Vec<RoleProperties>,
}

impl GeometryInstance {
    /// A geometry with the given pose in its anchor, shape and name.
    pub fn new(pose: Pose<f64>, shape: Shape, name: impl Into<String>) -> Self {
        Self {
            pose,
            shape,
            name: name.into(),
            roles: Vec::new(),
        }
    }

    /// Attach a role to assign at registration.
    pub fn with_role(mut self, role: RoleProperties) -> Self {
        self.roles.push(role);
        self
    }

    /// Fixed pose in the anchor (frame or parent geometry).
    pub fn pose(&self) -> &Pose<f64> {
        &self.pose
    }

    /// The shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Geometry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Roles attached for registration.
    pub fn roles(&self) -> &[RoleProperties] {
        &self.roles
    }

    pub(crate) fn into_parts(self) -> (Pose<f64>, Shape, String, Vec<RoleProperties>) {
        (self.pose, self.shape, self.name, self.roles)
    }
}

/// Stored geometry record.
#[derive(Clone, Debug)]
pub(crate) struct InternalGeometry<T: Scalar> {
    pub(crate) id: GeometryId,
    pub(crate) source: SourceId,
    pub(crate) name: String,
    /// The frame this geometry resolves to through its anchor chain.
    pub(crate) frame: FrameId,
    /// Parent geometry when nested; may name a removed geometry.
    pub(crate) parent: Option<GeometryId>,
    pub(crate) child_geometries: IndexSet<GeometryId>,
    /// `X_AG`: fixed pose in the anchor.
    pub(crate) pose_in_parent: Pose<T>,
    /// `X_FG`: fixed pose in the resolved frame, composed at registration.
    pub(crate) pose_in_frame: Pose<T>,
    pub(crate) shape: Shape,
    pub(crate) proximity: Option<PropertyBundle>,
    pub(crate) illustration: Option<PropertyBundle>,
    pub(crate) perception: Option<PropertyBundle>,
}

impl<T: Scalar> InternalGeometry<T> {
    pub(crate) fn has_role(&self, role: Role) -> bool {
        match role {
            Role::Unassigned => true,
            Role::Proximity => self.proximity.is_some(),
            Role::Illustration => self.illustration.is_some(),
            Role::Perception => self.perception.is_some(),
        }
    }

    pub(crate) fn properties(&self, role: Role) -> Option<&PropertyBundle> {
        match role {
            Role::Unassigned => None,
            Role::Proximity => self.proximity.as_ref(),
            Role::Illustration => self.illustration.as_ref(),
            Role::Perception => self.perception.as_ref(),
        }
    }

    pub(crate) fn set_role(&mut self, props: RoleProperties) {
        match props {
            RoleProperties::Proximity(b) => self.proximity = Some(b),
            RoleProperties::Illustration(b) => self.illustration = Some(b),
            RoleProperties::Perception(b) => self.perception = Some(b),
        }
    }

    pub(crate) fn is_anchored(&self) -> bool {
        self.frame.is_world()
    }

    pub(crate) fn cast<U: Scalar>(&self) -> InternalGeometry<U> {
        InternalGeometry {
            id: self.id,
            source: self.source,
            name: self.name.clone(),
            frame: self.frame,
            parent: self.parent,
            child_geometries: self.child_geometries.clone(),
            pose_in_parent: self.pose_in_parent.cast(),
            pose_in_frame: self.pose_in_frame.cast(),
            shape: self.shape.clone(),
            proximity: self.proximity.clone(),
            illustration: self.illustration.clone(),
            perception: self.perception.clone(),
        }
    }
}
