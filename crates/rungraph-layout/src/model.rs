//! Layout result types and the warning taxonomy.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Final placement of one node.
///
/// `x` is a pixel coordinate; `row` and `column` are indices into the
/// caller's offset tables, not pixels. `level` carries the raw dependency
/// depth and is only set in dependency mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPosition {
    pub x: f64,
    pub row: u32,
    pub column: u32,
    pub level: Option<u32>,
}

/// One computed layout, consumed to position visual elements and discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub positions: FxHashMap<String, LayoutPosition>,
    pub max_row: u32,
    pub max_column: u32,
    pub warnings: Vec<LayoutWarning>,
}

impl LayoutResult {
    pub fn position(&self, id: &str) -> Option<&LayoutPosition> {
        self.positions.get(id)
    }
}

/// Conditions the engine degrades through instead of aborting a layout.
///
/// Every variant is also emitted through `tracing::warn!` at the point it
/// is detected; the structured copies here let tests and diagnostic UIs
/// inspect them without a subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum LayoutWarning {
    #[error("node `{node}` references missing parent `{parent}`; edge skipped")]
    MissingParent { node: String, parent: String },

    #[error("node `{node}` references missing child `{child}`; edge skipped")]
    MissingChild { node: String, child: String },

    #[error("root id `{id}` is not present in the snapshot")]
    MissingRoot { id: String },

    #[error("dependency cycle through `{node}`; edge from `{parent}` skipped")]
    CycleEdgeSkipped { node: String, parent: String },
}
