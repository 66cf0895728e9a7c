//! Horizontal placement.
//!
//! Two interchangeable scales: a continuous time scale (start timestamp to
//! pixels) and a discrete dependency scale (depth level to a fixed-width
//! column). Both are pure; settings are sanitized once per request before
//! these functions run.

use rungraph_core::{HorizontalMode, HorizontalSettings};

/// Linear epoch-millis to pixel scale.
///
/// The domain is fixed to one unit span starting at the graph start time
/// and the range scales with the zoom multiplier, so position is strictly
/// proportional to elapsed time for every node. Values outside the domain
/// extrapolate linearly. A degenerate (zero-span) domain maps everything to
/// the range midpoint, matching d3's `scaleTime`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain_start_ms: i64,
    domain_span_ms: f64,
    range_px: f64,
}

impl TimeScale {
    pub fn new(settings: &HorizontalSettings) -> Self {
        Self {
            domain_start_ms: settings.start_ms,
            domain_span_ms: settings.unit_span_secs * 1000.0,
            range_px: settings.unit_span_px * settings.zoom,
        }
    }

    pub fn scale(&self, t_ms: i64) -> f64 {
        if self.domain_span_ms <= 0.0 {
            return self.range_px / 2.0;
        }
        (t_ms - self.domain_start_ms) as f64 / self.domain_span_ms * self.range_px
    }
}

/// Maps a node to its horizontal pixel coordinate.
///
/// `level` is the node's dependency depth and is only consulted in
/// dependency mode; an unresolved level places the node in column zero.
pub fn position_x(settings: &HorizontalSettings, start_ms: i64, level: Option<u32>) -> f64 {
    match settings.mode {
        HorizontalMode::Time => TimeScale::new(settings).scale(start_ms),
        HorizontalMode::Dependency => level.unwrap_or(0) as f64 * settings.column_width,
    }
}
