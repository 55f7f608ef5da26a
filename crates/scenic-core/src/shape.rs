//! Shape descriptions attached to geometries.
//!
//! The registry never evaluates shapes; it only stores them and hands them to
//! collision and visualization consumers. Dimensions are always plain `f64`
//! regardless of the scalar type poses are expressed in.

/// Closed set of supported shape kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Sphere centred on the geometry frame origin.
    Sphere {
        /// Radius in metres.
        radius: f64,
    },
    /// Cylinder whose axis is the geometry frame's z axis.
    Cylinder {
        /// Radius in metres.
        radius: f64,
        /// Length along z in metres.
        length: f64,
    },
    /// Axis-aligned box centred on the origin.
    Box {
        /// Extent along x.
        width: f64,
        /// Extent along y.
        depth: f64,
        /// Extent along z.
        height: f64,
    },
    /// Capsule (cylinder with hemispherical caps) along z.
    Capsule {
        /// Radius in metres.
        radius: f64,
        /// Length of the cylindrical section.
        length: f64,
    },
    /// Ellipsoid with semi-axes along x, y, z.
    Ellipsoid {
        /// Semi-axis along x.
        a: f64,
        /// Semi-axis along y.
        b: f64,
        /// Semi-axis along z.
        c: f64,
    },
    /// The half space `z <= 0` of the geometry frame.
    HalfSpace,
    /// Triangle mesh loaded by the consumer.
    Mesh {
        /// Path or URI of the mesh resource.
        path: String,
        /// Uniform scale applied to the vertices.
        scale: f64,
    },
    /// Convex hull of a mesh resource.
    Convex {
        /// Path or URI of the mesh resource.
        path: String,
        /// Uniform scale applied to the vertices.
        scale: f64,
    },
}

impl Shape {
    /// Convenience constructor for a sphere.
    pub fn sphere(radius: f64) -> Self {
        Self::Sphere { radius }
    }

    /// Short lowercase name of the shape kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Cylinder { .. } => "cylinder",
            Self::Box { .. } => "box",
            Self::Capsule { .. } => "capsule",
            Self::Ellipsoid { .. } => "ellipsoid",
            Self::HalfSpace => "half_space",
            Self::Mesh { .. } => "mesh",
            Self::Convex { .. } => "convex",
        }
    }

    /// Validate the shape's dimensions.
    ///
    /// Every dimension must be finite and strictly positive; mesh paths must
    /// be non-empty.
    pub fn validate(&self) -> Result<(), String> {
        let dims: Vec<(&str, f64)> = match self {
            Self::Sphere { radius } => vec![("radius", *radius)],
            Self::Cylinder { radius, length } | Self::Capsule { radius, length } => {
                vec![("radius", *radius), ("length", *length)]
            }
            Self::Box {
                width,
                depth,
                height,
            } => vec![("width", *width), ("depth", *depth), ("height", *height)],
            Self::Ellipsoid { a, b, c } => vec![("a", *a), ("b", *b), ("c", *c)],
            Self::HalfSpace => Vec::new(),
            Self::Mesh { path, scale } | Self::Convex { path, scale } => {
                if path.is_empty() {
                    return Err(format!("{} path must not be empty", self.kind()));
                }
                vec![("scale", *scale)]
            }
        };
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!(
                    "{} {name} must be finite and positive, got {value}",
                    self.kind()
                ));
            }
        }
        Ok(())
    }
}
