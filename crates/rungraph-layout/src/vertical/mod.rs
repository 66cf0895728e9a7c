//! Vertical placement.
//!
//! Three interchangeable strategies assign every node an integer row
//! index. All working state lives in short-lived per-request values; no
//! placement state survives a request.

mod duration;
mod nearest_parent;
mod waterfall;

use rungraph_core::{GraphSnapshot, NodeWidths, VerticalMode};
use rustc_hash::FxHashMap;

use crate::model::LayoutWarning;

/// Row assignments for one request.
#[derive(Debug, Clone, Default)]
pub struct RowAssignment {
    pub rows: FxHashMap<String, u32>,
    pub max_row: u32,
}

/// Assigns a row to every node in the snapshot.
///
/// `xs` holds the horizontal coordinate already computed for each node;
/// only the nearest-parent strategy consults it (and `widths`) for its
/// overlap tests. `now_ms` anchors the durations of still-running nodes.
pub fn assign_rows(
    mode: VerticalMode,
    snapshot: &GraphSnapshot,
    widths: &NodeWidths,
    xs: &FxHashMap<String, f64>,
    now_ms: i64,
    warnings: &mut Vec<LayoutWarning>,
) -> RowAssignment {
    match mode {
        VerticalMode::Waterfall => waterfall::assign(snapshot),
        VerticalMode::DurationSorted => duration::assign(snapshot, now_ms),
        VerticalMode::NearestParent => nearest_parent::assign(snapshot, widths, xs, warnings),
    }
}
