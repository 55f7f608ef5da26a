//! Test fixtures and mock types for Scenic development.
//!
//! Provides shape fixtures, a [`MockPoseSource`] standing in for a system
//! that owns frames and publishes their poses, and [`init_tracing`] for
//! tests that want log output.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{illustrated_sphere, proximity_sphere, sphere_instance, MockPoseSource};

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
