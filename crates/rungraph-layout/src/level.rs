//! Dependency depth resolution.
//!
//! A node's level is its distance in parent hops from a root: `0` for a
//! parentless node, otherwise `1 + max(level of all parents)`. Levels are
//! memoized, so a node reachable through several paths is resolved once.
//!
//! The walk is an explicit stack, not language recursion: an in-progress
//! mark turns a back edge into a skipped edge (with a warning) instead of
//! unbounded recursion when cyclic data sneaks into a snapshot.

use rungraph_core::GraphSnapshot;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

use crate::model::LayoutWarning;

/// Resolves the dependency depth of every node reachable from the
/// snapshot's roots (falling back to parentless nodes when the caller did
/// not record roots).
pub fn resolve_levels(
    snapshot: &GraphSnapshot,
    warnings: &mut Vec<LayoutWarning>,
) -> FxHashMap<String, u32> {
    let mut levels: FxHashMap<String, u32> = FxHashMap::default();
    if snapshot.is_empty() {
        return levels;
    }

    let roots: Vec<String> = if snapshot.roots().is_empty() {
        snapshot.sources().into_iter().map(str::to_string).collect()
    } else {
        snapshot.roots().to_vec()
    };

    // Reachable set: depth-first over child edges from the roots.
    let mut order: Vec<String> = Vec::new();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut stack: Vec<String> = Vec::new();
    for id in roots.iter().rev() {
        if snapshot.contains(id) {
            stack.push(id.clone());
        } else {
            warn!(root = %id, "layout root is not present in the snapshot");
            warnings.push(LayoutWarning::MissingRoot { id: id.clone() });
        }
    }
    while let Some(id) = stack.pop() {
        if !seen.insert(id.clone()) {
            continue;
        }
        let Some(node) = snapshot.node(&id) else {
            continue;
        };
        for child in node.child_ids.iter().rev() {
            if !snapshot.contains(child) {
                warn!(node = %id, child = %child, "child edge points at a missing node");
                warnings.push(LayoutWarning::MissingChild {
                    node: id.clone(),
                    child: child.clone(),
                });
                continue;
            }
            if !seen.contains(child) {
                stack.push(child.clone());
            }
        }
        order.push(id);
    }

    // Resolve each reachable node by walking parents with memoization.
    let mut in_progress: FxHashSet<String> = FxHashSet::default();
    for id in &order {
        if levels.contains_key(id) {
            continue;
        }
        resolve_one(id, snapshot, &mut levels, &mut in_progress, warnings);
    }

    levels
}

fn resolve_one(
    id: &str,
    snapshot: &GraphSnapshot,
    levels: &mut FxHashMap<String, u32>,
    in_progress: &mut FxHashSet<String>,
    warnings: &mut Vec<LayoutWarning>,
) {
    // (node, index of the next parent edge to consider)
    let mut frames: Vec<(String, usize)> = vec![(id.to_string(), 0)];
    in_progress.insert(id.to_string());

    while let Some((cur_id, next_parent)) = frames.last().map(|(id, i)| (id.clone(), *i)) {
        let pending = snapshot
            .node(&cur_id)
            .and_then(|n| n.parent_ids.get(next_parent).cloned());

        let Some(parent) = pending else {
            let level = snapshot
                .node(&cur_id)
                .map(|n| {
                    n.parent_ids
                        .iter()
                        .filter_map(|p| levels.get(p))
                        .max()
                        .map(|deepest| deepest + 1)
                        .unwrap_or(0)
                })
                .unwrap_or(0);
            levels.insert(cur_id.clone(), level);
            in_progress.remove(&cur_id);
            frames.pop();
            continue;
        };

        if let Some(frame) = frames.last_mut() {
            frame.1 += 1;
        }

        if levels.contains_key(&parent) {
            continue;
        }
        if !snapshot.contains(&parent) {
            warn!(node = %cur_id, parent = %parent, "parent edge points at a missing node");
            warnings.push(LayoutWarning::MissingParent {
                node: cur_id,
                parent,
            });
            continue;
        }
        if in_progress.contains(&parent) {
            warn!(node = %cur_id, parent = %parent, "dependency cycle detected; edge skipped");
            warnings.push(LayoutWarning::CycleEdgeSkipped {
                node: cur_id,
                parent,
            });
            continue;
        }
        in_progress.insert(parent.clone());
        frames.push((parent, 0));
    }
}
