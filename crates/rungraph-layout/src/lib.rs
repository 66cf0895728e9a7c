#![forbid(unsafe_code)]

//! Canvas layout engine for run-dependency graphs.
//!
//! Converts a [`GraphSnapshot`](rungraph_core::GraphSnapshot) plus the
//! measured [`NodeWidths`](rungraph_core::NodeWidths) into per-node
//! positions: a horizontal pixel coordinate (time scale or dependency
//! columns) and a vertical row index (waterfall, duration-sorted, or
//! collision-avoiding nearest-parent placement). Row/column indices become
//! pixel offsets on the caller side through an [`OffsetTable`], which
//! reacts incrementally as the rendering layer measures real sizes.
//!
//! The engine is pure and deterministic: the same snapshot, widths and
//! settings always produce the same result, and malformed input degrades
//! into [`LayoutWarning`]s rather than errors.

pub mod horizontal;
pub mod level;
pub mod model;
pub mod offsets;
pub mod vertical;

pub use horizontal::{TimeScale, position_x};
pub use level::resolve_levels;
pub use model::{LayoutPosition, LayoutResult, LayoutWarning};
pub use offsets::OffsetTable;

use rungraph_core::{GraphSnapshot, HorizontalMode, HorizontalSettings, NodeWidths, VerticalMode};
use rustc_hash::{FxHashMap, FxHashSet};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Computes one full layout.
///
/// `now_ms` anchors the durations of still-running nodes so results stay
/// reproducible; callers that do not care pass
/// [`rungraph_core::now_ms()`].
pub fn layout(
    snapshot: &GraphSnapshot,
    widths: &NodeWidths,
    horizontal_settings: &HorizontalSettings,
    vertical_mode: VerticalMode,
    now_ms: i64,
) -> LayoutResult {
    let mut warnings: Vec<LayoutWarning> = Vec::new();
    let settings = horizontal_settings.sanitized();

    let levels = match settings.mode {
        HorizontalMode::Dependency => Some(resolve_levels(snapshot, &mut warnings)),
        HorizontalMode::Time => None,
    };

    let mut xs: FxHashMap<String, f64> = FxHashMap::default();
    for node in snapshot.iter() {
        let level = levels
            .as_ref()
            .and_then(|levels| levels.get(&node.id).copied());
        xs.insert(node.id.clone(), position_x(&settings, node.start_ms, level));
    }

    let assignment = vertical::assign_rows(
        vertical_mode,
        snapshot,
        widths,
        &xs,
        now_ms,
        &mut warnings,
    );

    let mut positions: FxHashMap<String, LayoutPosition> = FxHashMap::default();
    let mut max_column = 0_u32;
    for node in snapshot.iter() {
        let level = levels
            .as_ref()
            .and_then(|levels| levels.get(&node.id).copied());
        let column = level.unwrap_or(0);
        max_column = max_column.max(column);
        positions.insert(
            node.id.clone(),
            LayoutPosition {
                x: xs.get(&node.id).copied().unwrap_or(0.0),
                row: assignment.rows.get(&node.id).copied().unwrap_or(0),
                column,
                level,
            },
        );
    }

    // The level resolver and the vertical pass can flag the same bad edge.
    let mut seen: FxHashSet<LayoutWarning> = FxHashSet::default();
    warnings.retain(|w| seen.insert(w.clone()));

    LayoutResult {
        positions,
        max_row: assignment.max_row,
        max_column,
        warnings,
    }
}
