//! Bounded channel delivering pose records from producer threads.
//!
//! Producers (physics steppers, trackers, teleoperation) hold a
//! [`PoseSender`] and push [`FramePoseVector`]s at their own rate. The
//! simulation thread calls [`PoseIngress::drain_into`] before each pose
//! update; only the most recent record per source survives a drain.

use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError};
use indexmap::IndexMap;
use scenic_core::{GeometryError, PosePort, Scalar, SourceId};
use scenic_state::FramePoseVector;
use std::error::Error;
use std::fmt;
use tracing::debug;

use crate::context::GeometryContext;

/// Errors from sending on a [`PoseSender`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IngressError {
    /// The channel is at capacity.
    QueueFull,
    /// The receiving [`PoseIngress`] was dropped.
    Disconnected,
}

impl fmt::Display for IngressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull => write!(f, "pose ingress queue is full"),
            Self::Disconnected => write!(f, "pose ingress receiver was dropped"),
        }
    }
}

impl Error for IngressError {}

/// Producer handle; cheap to clone and `Send`.
#[derive(Debug)]
pub struct PoseSender<T: Scalar> {
    tx: Sender<FramePoseVector<T>>,
}

impl<T: Scalar> Clone for PoseSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Scalar> PoseSender<T> {
    /// Enqueue a record without blocking.
    pub fn try_send(&self, poses: FramePoseVector<T>) -> Result<(), IngressError> {
        self.tx.try_send(poses).map_err(|e| match e {
            TrySendError::Full(_) => IngressError::QueueFull,
            TrySendError::Disconnected(_) => IngressError::Disconnected,
        })
    }

    /// Enqueue a record, blocking while the queue is full.
    pub fn send(&self, poses: FramePoseVector<T>) -> Result<(), IngressError> {
        self.tx.send(poses).map_err(|_| IngressError::Disconnected)
    }
}

/// Receiving end of the pose channel.
#[derive(Debug)]
pub struct PoseIngress<T: Scalar> {
    tx: Sender<FramePoseVector<T>>,
    rx: Receiver<FramePoseVector<T>>,
}

impl<T: Scalar> PoseIngress<T> {
    /// A channel holding at most `capacity` undrained records.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "PoseIngress capacity must be at least 1");
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        Self { tx, rx }
    }

    /// A new producer handle.
    pub fn sender(&self) -> PoseSender<T> {
        PoseSender {
            tx: self.tx.clone(),
        }
    }

    /// Number of undrained records.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Drain every queued record into `ctx`'s pose inputs, keeping the last
    /// record received per source.
    ///
    /// All records are checked against the context's port bindings before
    /// any is applied; on error nothing is applied and the drained records
    /// are dropped. Returns the number of ports written.
    pub fn drain_into(&self, ctx: &mut GeometryContext<T>) -> Result<usize, GeometryError> {
        let mut latest: IndexMap<SourceId, FramePoseVector<T>> = IndexMap::new();
        let mut received = 0usize;
        loop {
            match self.rx.try_recv() {
                Ok(poses) => {
                    received += 1;
                    latest.insert(poses.source_id(), poses);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        let mut writes: Vec<(PosePort, FramePoseVector<T>)> = Vec::with_capacity(latest.len());
        for (source, poses) in latest {
            let port = ctx
                .source_pose_port(source)
                .map_err(|_| GeometryError::UnknownSource {
                    id: source,
                    operation: "drain_into",
                })?;
            writes.push((port, poses));
        }
        let written = writes.len();
        for (port, poses) in writes {
            ctx.set_pose_input(port, poses)?;
        }
        debug!(received, written, "drained pose ingress");
        Ok(written)
    }
}
