//! Error types for the Scenic geometry engine.
//!
//! Every failure in the registry is a synchronous, local programming-contract
//! violation. Unknown-id variants carry the name of the operation that was
//! attempted so the rendered message names both the offending id and the
//! operation.

use std::error::Error;
use std::fmt;

use crate::id::{EntityId, FrameId, GeometryId, PosePort, SourceId};
use crate::role::Role;

/// Errors from registration, mutation, inspection and pose update of a
/// geometry state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// The source is not registered in the queried view.
    UnknownSource {
        /// The unrecognised source.
        id: SourceId,
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// A live source already uses the requested name.
    DuplicateSourceName {
        /// The conflicting name.
        name: String,
    },
    /// The frame is not registered in the queried view.
    UnknownFrame {
        /// The unrecognised frame.
        id: FrameId,
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// The geometry is not registered in the queried view (never registered,
    /// or removed).
    UnknownGeometry {
        /// The unrecognised geometry.
        id: GeometryId,
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// A geometry was registered against a frame or geometry that does not
    /// exist.
    UnknownAnchor {
        /// The missing anchor.
        anchor: EntityId,
    },
    /// The source tried to mutate (or attach to) an entity it does not own.
    NotOwner {
        /// The source performing the operation.
        source: SourceId,
        /// The entity owned by someone else.
        entity: EntityId,
    },
    /// Another geometry on the same frame already has this name.
    DuplicateGeometryName {
        /// The frame the geometries resolve to.
        frame: FrameId,
        /// The conflicting name.
        name: String,
    },
    /// A nested geometry's parent geometry was removed, so its pose can no
    /// longer be resolved.
    OrphanedGeometry {
        /// The geometry whose anchor chain is broken.
        geometry: GeometryId,
        /// The removed parent geometry.
        missing_parent: GeometryId,
    },
    /// A source with dynamic frames supplied no pose record, or a record
    /// missing some of its frames.
    MissingPoseInput {
        /// The offending source.
        source: SourceId,
        /// Frames without a pose. Empty when no record was supplied at all.
        missing: Vec<FrameId>,
    },
    /// A pose record contains a frame that is not one of the source's
    /// registered dynamic frames.
    UnexpectedPoseInput {
        /// The offending source.
        source: SourceId,
        /// The frame that should not be in the record.
        frame: FrameId,
    },
    /// More than one pose record was supplied for the same source.
    DuplicatePoseInput {
        /// The source with several records.
        source: SourceId,
    },
    /// A pose record filed under one source names a different source.
    PoseRecordMismatch {
        /// The source the record was supplied for.
        source: SourceId,
        /// The source named by the record itself.
        record_source: SourceId,
    },
    /// A pose input contains NaN or infinite components.
    NonFinitePose {
        /// The offending source.
        source: SourceId,
        /// The frame whose pose is not finite.
        frame: FrameId,
    },
    /// A name is empty or has leading/trailing whitespace.
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A shape description failed validation.
    InvalidShape {
        /// Description of the validation failure.
        reason: String,
    },
    /// No geometry with the given role has the given name on the frame.
    NoGeometryWithName {
        /// The frame searched.
        frame: FrameId,
        /// The role filter applied.
        role: Role,
        /// The name looked up.
        name: String,
    },
    /// World poses are requested before a full pose update has covered the
    /// current topology.
    PoseNotAvailable {
        /// The entity whose pose was requested.
        entity: EntityId,
    },
    /// No source in the queried view is bound to this pose port.
    UnknownPort {
        /// The unrecognised port.
        port: PosePort,
    },
    /// A pose record was written to a port bound to a different source.
    PortSourceMismatch {
        /// The port written to.
        port: PosePort,
        /// The source bound to the port.
        expected: SourceId,
        /// The source named by the record.
        actual: SourceId,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSource {
                id,
                operation: "source_pose_port",
            } => write!(f, "Can't acquire pose port for unknown source id: {id}."),
            Self::UnknownSource { id, operation } => {
                write!(f, "{operation}: unknown source id {id}")
            }
            Self::DuplicateSourceName { name } => {
                write!(f, "a source named '{name}' is already registered")
            }
            Self::UnknownFrame { id, operation } => {
                write!(f, "{operation}: referenced frame {id} has not been registered")
            }
            Self::UnknownGeometry { id, operation } => {
                write!(
                    f,
                    "{operation}: referenced geometry {id} has not been registered"
                )
            }
            Self::UnknownAnchor { anchor } => {
                write!(f, "cannot anchor geometry to unregistered {anchor}")
            }
            Self::NotOwner { source, entity } => {
                write!(f, "source {source} does not own {entity}")
            }
            Self::DuplicateGeometryName { frame, name } => {
                write!(f, "frame {frame} already has a geometry named '{name}'")
            }
            Self::OrphanedGeometry {
                geometry,
                missing_parent,
            } => {
                write!(
                    f,
                    "geometry {geometry} is orphaned: parent geometry {missing_parent} was removed"
                )
            }
            Self::MissingPoseInput { source, missing } => {
                if missing.is_empty() {
                    write!(
                        f,
                        "Source {source} has registered frames but does not provide pose values on the input port."
                    )
                } else {
                    write!(f, "Source {source} did not provide poses for frames [")?;
                    for (i, frame) in missing.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{frame}")?;
                    }
                    write!(f, "]")
                }
            }
            Self::UnexpectedPoseInput { source, frame } => {
                write!(
                    f,
                    "Source {source} provided a pose for frame {frame}, which it has not registered"
                )
            }
            Self::DuplicatePoseInput { source } => {
                write!(f, "Source {source} provided more than one pose record")
            }
            Self::PoseRecordMismatch {
                source,
                record_source,
            } => write!(
                f,
                "the pose record supplied for source {source} belongs to source {record_source}"
            ),
            Self::NonFinitePose { source, frame } => {
                write!(f, "Source {source} provided a non-finite pose for frame {frame}")
            }
            Self::InvalidName { name, reason } => {
                write!(f, "the proposed name '{name}' is invalid: {reason}")
            }
            Self::InvalidShape { reason } => write!(f, "invalid shape: {reason}"),
            Self::NoGeometryWithName { frame, role, name } => {
                write!(
                    f,
                    "frame {frame} has no geometry named '{name}' with role {role}"
                )
            }
            Self::PoseNotAvailable { entity } => {
                write!(
                    f,
                    "world pose of {entity} is not available; run a full pose update first"
                )
            }
            Self::UnknownPort { port } => write!(f, "no source is bound to pose port {port}"),
            Self::PortSourceMismatch {
                port,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "pose port {port} belongs to source {expected}, not source {actual}"
                )
            }
        }
    }
}

impl Error for GeometryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_name_operation_and_id() {
        let id = GeometryId::next();
        let msg = GeometryError::UnknownGeometry {
            id,
            operation: "get_frame_id",
        }
        .to_string();
        assert!(msg.starts_with("get_frame_id"));
        assert!(msg.contains(&format!("geometry {id}")));
    }

    #[test]
    fn missing_record_message() {
        let source = SourceId::next();
        let msg = GeometryError::MissingPoseInput {
            source,
            missing: Vec::new(),
        }
        .to_string();
        assert_eq!(
            msg,
            format!(
                "Source {source} has registered frames but does not provide pose values on the input port."
            )
        );
    }

    #[test]
    fn missing_frames_are_listed() {
        let source = SourceId::next();
        let a = FrameId::next();
        let b = FrameId::next();
        let msg = GeometryError::MissingPoseInput {
            source,
            missing: vec![a, b],
        }
        .to_string();
        assert!(msg.ends_with(&format!("[{a}, {b}]")));
    }

    #[test]
    fn pose_port_lookup_message() {
        let id = SourceId::next();
        let msg = GeometryError::UnknownSource {
            id,
            operation: "source_pose_port",
        }
        .to_string();
        assert_eq!(msg, format!("Can't acquire pose port for unknown source id: {id}."));
    }
}
