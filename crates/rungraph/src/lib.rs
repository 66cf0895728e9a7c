#![forbid(unsafe_code)]

//! `rungraph` positions the nodes of a run-dependency graph on a 2D
//! canvas for a separate rendering layer to draw.
//!
//! The crate is a facade over the workspace:
//!
//! - [`rungraph_core`]: the graph snapshot model and layout settings
//! - [`rungraph_layout`]: the pure layout engine and offset tables
//! - [`coordinator`]: the asynchronous worker-thread boundary
//!
//! Callers that want a layout right here, right now, call [`layout`];
//! callers driving a frame loop hand requests to a
//! [`LayoutCoordinator`](coordinator::LayoutCoordinator) and poll it.

pub use rungraph_core::{
    GraphSnapshot, HorizontalMode, HorizontalSettings, NodeWidths, RunNode, VerticalMode, now_ms,
    settings,
};
pub use rungraph_layout::{
    LayoutPosition, LayoutResult, LayoutWarning, OffsetTable, TimeScale, layout, position_x,
    resolve_levels,
};

pub mod coordinator;

pub use coordinator::{CoordinatorError, LayoutCoordinator, LayoutRequest, LayoutResponse};
