#![forbid(unsafe_code)]

//! Run-dependency graph model shared by the `rungraph` layout crates.
//!
//! A [`GraphSnapshot`] is a read-only view of one poll tick of a tracked
//! run: execution units with start/end timestamps plus parent/child edges.
//! The layout engine (`rungraph-layout`) consumes snapshots together with
//! the measured [`NodeWidths`] and the settings types defined here.

pub mod graph;
pub mod settings;
pub mod time;

pub use graph::{GraphSnapshot, NodeWidths, RunNode};
pub use settings::{HorizontalMode, HorizontalSettings, VerticalMode};
pub use time::now_ms;
