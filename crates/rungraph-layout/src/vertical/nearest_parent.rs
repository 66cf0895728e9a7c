//! Nearest-parent placement.
//!
//! Each node is placed as close as possible (vertically) to its upstream
//! nodes while guaranteeing that no two nodes sharing a row have
//! overlapping horizontal extents. Conflicts are resolved by displacing
//! already-placed nodes: a *shove* moves a node one row aside, first
//! displacing anything it would in turn collide with, so an insertion can
//! ripple through an arbitrarily long contiguous run of neighbors.
//!
//! The shove cascade is an explicit worklist with a visited-this-shove
//! set rather than language recursion, so stack depth stays bounded and
//! the chain terminates even if cyclic data sneaks into a snapshot.

use rungraph_core::settings::MIN_NODE_GAP;
use rungraph_core::{GraphSnapshot, NodeWidths};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use super::RowAssignment;
use crate::model::LayoutWarning;

/// Horizontal span a node claims on its row, clearance included.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Extent {
    start: f64,
    end: f64,
}

impl Extent {
    fn new(x: f64, width: f64) -> Self {
        Self {
            start: x,
            end: x + width + MIN_NODE_GAP,
        }
    }

    fn overlaps(&self, other: &Extent) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Working state for one placement run. Rebuilt fresh per request and
/// passed explicitly through every placement function; nothing here
/// outlives the request.
struct PlacementContext<'a> {
    snapshot: &'a GraphSnapshot,
    extents: FxHashMap<String, Extent>,
    /// Row index -> ids occupying that row. Overlap tests only ever scan
    /// one row's occupants; global position maps are never rescanned.
    rows: FxHashMap<i64, Vec<String>>,
    placed: FxHashMap<String, i64>,
    /// Next preferred displacement direction per anchor, alternating
    /// below/above so successive children fan out instead of stacking.
    shove_pref: FxHashMap<String, i64>,
}

impl<'a> PlacementContext<'a> {
    fn new(snapshot: &'a GraphSnapshot, widths: &NodeWidths, xs: &FxHashMap<String, f64>) -> Self {
        let mut extents = FxHashMap::default();
        for node in snapshot.iter() {
            let x = xs.get(&node.id).copied().unwrap_or(0.0);
            extents.insert(node.id.clone(), Extent::new(x, widths.get(&node.id)));
        }
        Self {
            snapshot,
            extents,
            rows: FxHashMap::default(),
            placed: FxHashMap::default(),
            shove_pref: FxHashMap::default(),
        }
    }

    fn extent(&self, id: &str) -> Extent {
        self.extents
            .get(id)
            .copied()
            .unwrap_or(Extent::new(0.0, 0.0))
    }

    fn row_of(&self, id: &str) -> Option<i64> {
        self.placed.get(id).copied()
    }

    fn is_free(&self, row: i64, extent: &Extent) -> bool {
        match self.rows.get(&row) {
            Some(ids) => !ids.iter().any(|id| self.extent(id).overlaps(extent)),
            None => true,
        }
    }

    fn occupants_overlapping(&self, row: i64, extent: &Extent) -> Vec<String> {
        match self.rows.get(&row) {
            Some(ids) => ids
                .iter()
                .filter(|id| self.extent(id).overlaps(extent))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    fn commit(&mut self, id: &str, row: i64) {
        self.placed.insert(id.to_string(), row);
        self.rows.entry(row).or_default().push(id.to_string());
    }

    fn displace(&mut self, id: &str, dir: i64) {
        let Some(row) = self.row_of(id) else {
            return;
        };
        if let Some(ids) = self.rows.get_mut(&row) {
            ids.retain(|occupant| occupant != id);
        }
        let target = row + dir;
        self.placed.insert(id.to_string(), target);
        self.rows.entry(target).or_default().push(id.to_string());
    }

    fn next_shove_dir(&mut self, anchor: &str) -> i64 {
        let dir = self.shove_pref.entry(anchor.to_string()).or_insert(1);
        let current = *dir;
        *dir = -current;
        current
    }
}

pub(super) fn assign(
    snapshot: &GraphSnapshot,
    widths: &NodeWidths,
    xs: &FxHashMap<String, f64>,
    warnings: &mut Vec<LayoutWarning>,
) -> RowAssignment {
    let mut ctx = PlacementContext::new(snapshot, widths, xs);

    for node in snapshot.iter() {
        let anchors = placeable_parents(&ctx, &node.id, warnings);
        match anchors.len() {
            0 => place_scan(&mut ctx, &node.id, 0, 1),
            1 => place_near_anchor(&mut ctx, &node.id, &anchors[0]),
            _ => place_between_parents(&mut ctx, &node.id, &anchors),
        }
    }

    normalize(ctx)
}

/// Parents the node can anchor on: present in the snapshot and already
/// placed. A missing parent id is inconsistent input and downgrades the
/// node toward the zero-parent path instead of failing the layout.
fn placeable_parents(
    ctx: &PlacementContext<'_>,
    id: &str,
    warnings: &mut Vec<LayoutWarning>,
) -> Vec<String> {
    let Some(node) = ctx.snapshot.node(id) else {
        return Vec::new();
    };
    let mut anchors = Vec::new();
    for parent in &node.parent_ids {
        if !ctx.snapshot.contains(parent) {
            warn!(node = %id, parent = %parent, "parent edge points at a missing node");
            warnings.push(LayoutWarning::MissingParent {
                node: id.to_string(),
                parent: parent.clone(),
            });
            continue;
        }
        if ctx.row_of(parent).is_none() {
            // Forward reference: the parent appears later in snapshot
            // order, so there is no row to anchor on yet.
            debug!(node = %id, parent = %parent, "parent not yet placed; ignoring as anchor");
            continue;
        }
        anchors.push(parent.clone());
    }
    anchors
}

/// Scans from `start` in `dir` until a row with no overlapping occupant is
/// found, then commits. The zero-parent path scans downward from row 0.
fn place_scan(ctx: &mut PlacementContext<'_>, id: &str, start: i64, dir: i64) {
    let extent = ctx.extent(id);
    let mut row = start;
    while !ctx.is_free(row, &extent) {
        row += dir;
    }
    ctx.commit(id, row);
}

/// Single-anchor placement: try the anchor's own row first, displacing
/// unrelated occupants aside in the anchor's preferred direction. When the
/// anchor itself overlaps the node (runs concurrent in time), the node
/// settles on the nearest free row beside it instead.
fn place_near_anchor(ctx: &mut PlacementContext<'_>, id: &str, anchor: &str) {
    let dir = ctx.next_shove_dir(anchor);
    let row = ctx.row_of(anchor).unwrap_or(0);
    let extent = ctx.extent(id);

    if ctx.is_free(row, &extent) {
        ctx.commit(id, row);
        return;
    }

    let occupants = ctx.occupants_overlapping(row, &extent);
    let anchor_blocks = occupants.iter().any(|o| o == anchor);
    if anchor_blocks {
        place_scan(ctx, id, row + dir, dir);
        return;
    }
    for occupant in &occupants {
        shove(ctx, occupant, dir);
    }
    ctx.commit(id, row);
}

/// Multi-anchor placement: the candidate row is the rounded average of all
/// anchor rows. A slot occupied by one of the node's own parents, or by
/// several nodes at once, is resolved in the parents' favor: the occupiers
/// are shoved away from the parents' center of mass and the node takes the
/// vacated row. A single unrelated occupier argues for the slot instead.
fn place_between_parents(ctx: &mut PlacementContext<'_>, id: &str, anchors: &[String]) {
    let anchor_rows: Vec<i64> = anchors.iter().filter_map(|a| ctx.row_of(a)).collect();
    let mean = anchor_rows.iter().sum::<i64>() as f64 / anchor_rows.len() as f64;
    let candidate = mean.round() as i64;
    let extent = ctx.extent(id);

    if ctx.is_free(candidate, &extent) {
        ctx.commit(id, candidate);
        return;
    }

    let occupants = ctx.occupants_overlapping(candidate, &extent);
    let includes_parent = occupants.iter().any(|o| anchors.contains(o));
    if includes_parent || occupants.len() > 1 {
        let dir = if mean <= candidate as f64 { 1 } else { -1 };
        for occupant in &occupants {
            shove(ctx, occupant, dir);
        }
        ctx.commit(id, candidate);
    } else {
        argue(ctx, id, &occupants[0], candidate);
    }
}

/// Two nodes contest one slot: the incoming node and the single unrelated
/// occupier. Each party's pull is how many of its own placed parents sit
/// above versus below the candidate row; the stronger pull wins the slot
/// and the loser moves in the direction its own parents drag it. An exact
/// tie makes the incoming node yield and retry against the competitor as
/// if it were a parent.
fn argue(ctx: &mut PlacementContext<'_>, id: &str, competitor: &str, row: i64) {
    let incoming = directional_bias(ctx, id, row);
    let standing = directional_bias(ctx, competitor, row);

    if incoming.abs() > standing.abs() {
        let dir = if standing > 0 {
            -1
        } else if standing < 0 {
            1
        } else if incoming > 0 {
            1
        } else {
            -1
        };
        shove(ctx, competitor, dir);
        ctx.commit(id, row);
    } else if standing.abs() > incoming.abs() {
        let dir = if incoming > 0 { -1 } else { 1 };
        place_scan(ctx, id, row + dir, dir);
    } else {
        place_near_anchor(ctx, id, competitor);
    }
}

/// Net vertical pull on `id` at `row`: positive pulls up (toward smaller
/// row indices), negative pulls down. Counts placed parents only.
fn directional_bias(ctx: &PlacementContext<'_>, id: &str, row: i64) -> i64 {
    let Some(node) = ctx.snapshot.node(id) else {
        return 0;
    };
    let mut above = 0_i64;
    let mut below = 0_i64;
    for parent in &node.parent_ids {
        let Some(parent_row) = ctx.row_of(parent) else {
            continue;
        };
        if parent_row < row {
            above += 1;
        } else if parent_row > row {
            below += 1;
        }
    }
    above - below
}

/// Relocates `start` one row in `dir`, first collecting everything it
/// would in turn collide with at its destination. Collisions cascade, and
/// because every collected node moves by the same single row, relative
/// order inside the displaced run is preserved and no new overlap can be
/// introduced.
fn shove(ctx: &mut PlacementContext<'_>, start: &str, dir: i64) {
    let mut visited: FxHashSet<String> = FxHashSet::default();
    visited.insert(start.to_string());
    let mut stack: Vec<String> = vec![start.to_string()];
    let mut displaced: Vec<String> = Vec::new();

    while let Some(id) = stack.pop() {
        let Some(row) = ctx.row_of(&id) else {
            continue;
        };
        let target = row + dir;
        let extent = ctx.extent(&id);
        for other in ctx.occupants_overlapping(target, &extent) {
            if visited.insert(other.clone()) {
                stack.push(other);
            }
        }
        displaced.push(id);
    }

    for id in &displaced {
        ctx.displace(id, dir);
    }
}

/// Shifts all rows so the smallest index is zero when shoving pushed any
/// node above row 0.
fn normalize(ctx: PlacementContext<'_>) -> RowAssignment {
    let min_row = ctx.placed.values().min().copied().unwrap_or(0);
    let shift = if min_row < 0 { -min_row } else { 0 };

    let mut rows: FxHashMap<String, u32> = FxHashMap::default();
    let mut max_row = 0_u32;
    for (id, row) in ctx.placed {
        let normalized = (row + shift).max(0) as u32;
        max_row = max_row.max(normalized);
        rows.insert(id, normalized);
    }
    RowAssignment { rows, max_row }
}
