//! Layout settings and constants.
//!
//! Defaults here are the safe fallbacks the engine assumes when a caller
//! passes partial settings; positioning functions themselves never guard.

use serde::{Deserialize, Serialize};

/// Pixel width of one dependency column.
pub const DEFAULT_COLUMN_WIDTH: f64 = 260.0;

/// Seconds covered by one unit span of the time scale.
pub const DEFAULT_UNIT_SPAN_SECS: f64 = 60.0;

/// Pixels covered by one unit span of the time scale at zoom 1.0.
pub const DEFAULT_UNIT_SPAN_PX: f64 = 240.0;

/// Horizontal clearance appended to every node extent so row neighbors
/// never visually touch.
pub const MIN_NODE_GAP: f64 = 16.0;

/// Floor for a row's or column's effective size before any contributor has
/// been measured.
pub const MIN_AXIS_SIZE: f64 = 36.0;

/// Fixed spacing inserted between consecutive rows/columns.
pub const AXIS_GAP: f64 = 8.0;

/// Horizontal placement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizontalMode {
    /// Continuous linear-in-time mapping of `start_ms`.
    #[default]
    Time,
    /// One fixed-width column per dependency depth level.
    Dependency,
}

/// Parameters for [`HorizontalMode`]. The time scale's domain is fixed to
/// one unit span for every node, so zoom is a single global multiplier on
/// the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizontalSettings {
    pub mode: HorizontalMode,
    /// Graph start timestamp; the time scale's domain origin.
    pub start_ms: i64,
    pub unit_span_secs: f64,
    pub unit_span_px: f64,
    pub zoom: f64,
    pub column_width: f64,
}

impl Default for HorizontalSettings {
    fn default() -> Self {
        Self {
            mode: HorizontalMode::Time,
            start_ms: 0,
            unit_span_secs: DEFAULT_UNIT_SPAN_SECS,
            unit_span_px: DEFAULT_UNIT_SPAN_PX,
            zoom: 1.0,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl HorizontalSettings {
    /// Replaces missing or nonsensical scale parameters with the safe
    /// defaults. The positioning functions are pure and do not guard; the
    /// engine sanitizes once per request before invoking them.
    ///
    /// A zero `unit_span_secs` is left alone: that is a degenerate domain,
    /// which the time scale resolves to the range midpoint.
    pub fn sanitized(&self) -> Self {
        fn guarded(value: f64, fallback: f64) -> f64 {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                fallback
            }
        }
        fn positive(value: f64, fallback: f64) -> f64 {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        }
        Self {
            mode: self.mode,
            start_ms: self.start_ms,
            unit_span_secs: guarded(self.unit_span_secs, DEFAULT_UNIT_SPAN_SECS),
            unit_span_px: positive(self.unit_span_px, DEFAULT_UNIT_SPAN_PX),
            zoom: positive(self.zoom, 1.0),
            column_width: positive(self.column_width, DEFAULT_COLUMN_WIDTH),
        }
    }

    pub fn time(start_ms: i64) -> Self {
        Self {
            mode: HorizontalMode::Time,
            start_ms,
            ..Default::default()
        }
    }

    pub fn dependency() -> Self {
        Self {
            mode: HorizontalMode::Dependency,
            ..Default::default()
        }
    }
}

/// Vertical placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalMode {
    /// Row = snapshot iteration order. No conflicts by construction.
    Waterfall,
    /// Row = index after a stable sort by execution duration, descending.
    DurationSorted,
    /// Collision-avoiding placement near upstream nodes.
    #[default]
    NearestParent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_round_trip_through_kebab_case() {
        let json = serde_json::to_string(&VerticalMode::NearestParent).unwrap();
        assert_eq!(json, "\"nearest-parent\"");
        let back: VerticalMode = serde_json::from_str("\"duration-sorted\"").unwrap();
        assert_eq!(back, VerticalMode::DurationSorted);
        let h: HorizontalMode = serde_json::from_str("\"dependency\"").unwrap();
        assert_eq!(h, HorizontalMode::Dependency);
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let s: HorizontalSettings = serde_json::from_str("{\"mode\":\"time\"}").unwrap();
        assert_eq!(s.unit_span_px, DEFAULT_UNIT_SPAN_PX);
        assert_eq!(s.zoom, 1.0);
    }
}
