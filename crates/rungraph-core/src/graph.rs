//! Graph snapshot container.
//!
//! Snapshot iteration order is insertion order. Placement strategies are
//! defined over that order, so two layout requests over the same snapshot
//! produce identical results.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One execution unit (a run) in the dependency graph.
///
/// `end_ms == None` means the run is still in flight. Edge lists hold ids
/// only; an id that does not resolve against the snapshot is tolerated by
/// the layout engine (the edge is skipped with a warning).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunNode {
    pub id: String,
    pub start_ms: i64,
    pub end_ms: Option<i64>,
    pub parent_ids: Vec<String>,
    pub child_ids: Vec<String>,
}

impl RunNode {
    pub fn new(id: impl Into<String>, start_ms: i64) -> Self {
        Self {
            id: id.into(),
            start_ms,
            end_ms: None,
            parent_ids: Vec::new(),
            child_ids: Vec::new(),
        }
    }

    pub fn with_end(mut self, end_ms: i64) -> Self {
        self.end_ms = Some(end_ms);
        self
    }

    pub fn is_running(&self) -> bool {
        self.end_ms.is_none()
    }

    /// Elapsed execution time, treating a running node as ending at `now_ms`.
    pub fn duration_ms(&self, now_ms: i64) -> i64 {
        self.end_ms.unwrap_or(now_ms).saturating_sub(self.start_ms)
    }
}

/// A full node map plus root ids, handed whole into every layout request.
///
/// The container is a builder as much as a snapshot: `set_edge` wires both
/// edge directions and creates missing endpoints with a zero start time so
/// chained construction (`set_path`) stays ergonomic in tests and callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    nodes: IndexMap<String, RunNode>,
    roots: Vec<String>,
}

impl GraphSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a node, preserving first-insertion order.
    pub fn set_node(&mut self, node: RunNode) -> &mut Self {
        match self.nodes.get_mut(&node.id) {
            Some(existing) => *existing = node,
            None => {
                self.nodes.insert(node.id.clone(), node);
            }
        }
        self
    }

    fn ensure_node(&mut self, id: &str) {
        if !self.nodes.contains_key(id) {
            self.nodes.insert(id.to_string(), RunNode::new(id, 0));
        }
    }

    /// Records a directed dependency edge `parent -> child` on both
    /// endpoints, creating endpoints that do not exist yet.
    pub fn set_edge(&mut self, parent: &str, child: &str) -> &mut Self {
        self.ensure_node(parent);
        self.ensure_node(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            if !p.child_ids.iter().any(|c| c == child) {
                p.child_ids.push(child.to_string());
            }
        }
        if let Some(c) = self.nodes.get_mut(child) {
            if !c.parent_ids.iter().any(|p| p == parent) {
                c.parent_ids.push(parent.to_string());
            }
        }
        self
    }

    /// Chains edges along a path of ids.
    pub fn set_path(&mut self, ids: &[&str]) -> &mut Self {
        for pair in ids.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn node(&self, id: &str) -> Option<&RunNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut RunNode> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RunNode> {
        self.nodes.values()
    }

    /// Root ids as supplied by the caller, or computed from parentless nodes
    /// when the caller did not set any.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn set_roots(&mut self, roots: Vec<String>) -> &mut Self {
        self.roots = roots;
        self
    }

    /// Fills `roots` with the ids of parentless nodes, in insertion order.
    pub fn compute_roots(&mut self) -> &mut Self {
        self.roots = self
            .nodes
            .values()
            .filter(|n| n.parent_ids.is_empty())
            .map(|n| n.id.clone())
            .collect();
        self
    }

    /// Ids of nodes without parents.
    pub fn sources(&self) -> Vec<&str> {
        self.nodes
            .values()
            .filter(|n| n.parent_ids.is_empty())
            .map(|n| n.id.as_str())
            .collect()
    }

    /// Ids of nodes without children.
    pub fn sinks(&self) -> Vec<&str> {
        self.nodes
            .values()
            .filter(|n| n.child_ids.is_empty())
            .map(|n| n.id.as_str())
            .collect()
    }
}

/// Measured horizontal extents, id -> pixels.
///
/// Nodes the rendering layer has not measured yet are zero-width for the
/// overlap tests but still get placed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeWidths {
    widths: FxHashMap<String, f64>,
}

impl NodeWidths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: impl Into<String>, width: f64) -> &mut Self {
        self.widths.insert(id.into(), width);
        self
    }

    /// Measured width, or `0.0` for an unmeasured node.
    pub fn get(&self, id: &str) -> f64 {
        self.widths.get(id).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}
