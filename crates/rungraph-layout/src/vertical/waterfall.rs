//! Waterfall placement: row = snapshot iteration order.

use rungraph_core::GraphSnapshot;
use rustc_hash::FxHashMap;

use super::RowAssignment;

pub(super) fn assign(snapshot: &GraphSnapshot) -> RowAssignment {
    let mut rows: FxHashMap<String, u32> = FxHashMap::default();
    for (index, node) in snapshot.iter().enumerate() {
        rows.insert(node.id.clone(), index as u32);
    }
    let max_row = snapshot.len().saturating_sub(1) as u32;
    RowAssignment { rows, max_row }
}
