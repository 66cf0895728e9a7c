//! Duration-sorted placement: longest-running nodes first.
//!
//! The sort is stable, so nodes with equal durations keep their snapshot
//! order and repeated layouts of the same snapshot agree.

use rungraph_core::GraphSnapshot;
use rustc_hash::FxHashMap;

use super::RowAssignment;

pub(super) fn assign(snapshot: &GraphSnapshot, now_ms: i64) -> RowAssignment {
    let mut ordered: Vec<(&str, i64)> = snapshot
        .iter()
        .map(|n| (n.id.as_str(), n.duration_ms(now_ms)))
        .collect();
    ordered.sort_by_key(|(_, duration)| std::cmp::Reverse(*duration));

    let mut rows: FxHashMap<String, u32> = FxHashMap::default();
    for (index, (id, _)) in ordered.iter().enumerate() {
        rows.insert((*id).to_string(), index as u32);
    }
    let max_row = snapshot.len().saturating_sub(1) as u32;
    RowAssignment { rows, max_row }
}
