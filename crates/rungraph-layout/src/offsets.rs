//! Cumulative row/column offsets from measured node sizes.
//!
//! The rendering layer measures real text and icon sizes long after the
//! row/column indices are assigned, so the table keeps every contributor's
//! latest size and derives offsets lazily: `cumulative_offset` walks the
//! preceding indices on every call instead of caching a running total,
//! which keeps it correct under continuous size mutation.

use rungraph_core::settings::{AXIS_GAP, MIN_AXIS_SIZE};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Per-axis-index size contributions for one axis (rows or columns).
///
/// The effective size of an index is the maximum contribution, never the
/// sum: several nodes may legitimately share a row or column, and the
/// slot must fit the largest of them. Indices without contributors still
/// occupy the minimum size, so offsets stay monotonic across gaps.
#[derive(Debug, Clone)]
pub struct OffsetTable {
    entries: BTreeMap<u32, FxHashMap<String, f64>>,
    min_size: f64,
    gap: f64,
}

impl Default for OffsetTable {
    fn default() -> Self {
        Self::new(MIN_AXIS_SIZE, AXIS_GAP)
    }
}

impl OffsetTable {
    pub fn new(min_size: f64, gap: f64) -> Self {
        Self {
            entries: BTreeMap::new(),
            min_size,
            gap,
        }
    }

    /// Records `contributor`'s measured size at `index`, replacing its
    /// previous contribution. Only this index's running maximum changes;
    /// other indices are untouched.
    pub fn set_size(&mut self, index: u32, contributor: impl Into<String>, size: f64) {
        self.entries
            .entry(index)
            .or_default()
            .insert(contributor.into(), size);
    }

    /// Drops one contributor's entry, e.g. when its node leaves the graph.
    pub fn remove(&mut self, index: u32, contributor: &str) {
        if let Some(sizes) = self.entries.get_mut(&index) {
            sizes.remove(contributor);
            if sizes.is_empty() {
                self.entries.remove(&index);
            }
        }
    }

    /// The largest contribution at `index`, floored at the minimum size.
    pub fn effective_size(&self, index: u32) -> f64 {
        let measured = self
            .entries
            .get(&index)
            .map(|sizes| sizes.values().fold(0.0_f64, |acc, s| acc.max(*s)))
            .unwrap_or(0.0);
        measured.max(self.min_size)
    }

    /// Pixel distance from the axis origin to the start of `index`: the sum
    /// of all preceding effective sizes plus one fixed gap per index.
    pub fn cumulative_offset(&self, index: u32) -> f64 {
        let mut total = index as f64 * self.gap;
        for i in 0..index {
            total += self.effective_size(i);
        }
        total
    }

    /// Highest index with a recorded contribution.
    pub fn max_index(&self) -> Option<u32> {
        self.entries.keys().next_back().copied()
    }

    /// Total pixel extent of the axis content, for sizing the canvas.
    pub fn total_extent(&self) -> f64 {
        match self.max_index() {
            Some(last) => self.cumulative_offset(last) + self.effective_size(last),
            None => 0.0,
        }
    }

    /// Forgets all contributions. Called when the graph is replaced or the
    /// layout mode changes.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_size_is_the_max_contribution_not_the_sum() {
        let mut t = OffsetTable::new(10.0, 0.0);
        t.set_size(0, "a", 20.0);
        t.set_size(0, "b", 35.0);
        t.set_size(0, "c", 5.0);
        assert_eq!(t.effective_size(0), 35.0);
    }

    #[test]
    fn unmeasured_indices_fall_back_to_the_minimum_size() {
        let t = OffsetTable::new(12.0, 0.0);
        assert_eq!(t.effective_size(7), 12.0);
    }

    #[test]
    fn cumulative_offset_sums_preceding_sizes_and_gaps() {
        let mut t = OffsetTable::new(10.0, 4.0);
        t.set_size(0, "a", 30.0);
        t.set_size(2, "b", 50.0);
        assert_eq!(t.cumulative_offset(0), 0.0);
        // 30 + one gap
        assert_eq!(t.cumulative_offset(1), 34.0);
        // 30 + 10 (empty index 1) + two gaps
        assert_eq!(t.cumulative_offset(2), 48.0);
        assert_eq!(t.total_extent(), 98.0);
    }

    #[test]
    fn resize_replaces_the_contribution_instead_of_accumulating() {
        let mut t = OffsetTable::new(0.0, 0.0);
        t.set_size(1, "a", 40.0);
        t.set_size(1, "a", 25.0);
        assert_eq!(t.effective_size(1), 25.0);
    }

    #[test]
    fn remove_and_clear_release_contributions() {
        let mut t = OffsetTable::new(10.0, 0.0);
        t.set_size(3, "a", 99.0);
        t.remove(3, "a");
        assert_eq!(t.effective_size(3), 10.0);
        assert_eq!(t.max_index(), None);
        t.set_size(1, "b", 20.0);
        t.clear();
        assert_eq!(t.max_index(), None);
        assert_eq!(t.total_extent(), 0.0);
    }
}
