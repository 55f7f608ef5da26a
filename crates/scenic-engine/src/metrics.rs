//! Per-update performance metrics for a geometry context.
//!
//! [`PoseUpdateMetrics`] captures timing and counts for the most recent full
//! pose update, plus cumulative counters over the context's lifetime.

/// Timing and count metrics of a context's full pose updates.
///
/// All durations are in microseconds. The context populates these fields
/// after each update attempt; consumers read them from
/// [`GeometryContext::last_metrics`](crate::GeometryContext::last_metrics).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoseUpdateMetrics {
    /// Wall-clock time of the most recent update, in microseconds.
    pub total_us: u64,
    /// Dynamic frames updated by the most recent successful update.
    pub frames_updated: usize,
    /// Geometries updated by the most recent successful update.
    pub geometries_updated: usize,
    /// Cumulative number of successful updates.
    pub updates: u64,
    /// Cumulative number of updates rejected by input validation or an
    /// orphaned geometry.
    pub rejected_updates: u64,
}
