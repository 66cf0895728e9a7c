use rungraph_core::{GraphSnapshot, HorizontalSettings, NodeWidths, RunNode, VerticalMode};
use rungraph_layout::layout;

fn seconds_scale() -> HorizontalSettings {
    // x = start_ms / 1000, so test coordinates read as seconds.
    let mut settings = HorizontalSettings::time(0);
    settings.unit_span_secs = 1.0;
    settings.unit_span_px = 1.0;
    settings.zoom = 1.0;
    settings
}

#[test]
fn waterfall_rows_match_snapshot_iteration_order() {
    let mut g = GraphSnapshot::new();
    g.set_path(&["a", "b", "c"]);
    g.compute_roots();

    let result = layout(
        &g,
        &NodeWidths::new(),
        &seconds_scale(),
        VerticalMode::Waterfall,
        0,
    );
    assert_eq!(result.position("a").unwrap().row, 0);
    assert_eq!(result.position("b").unwrap().row, 1);
    assert_eq!(result.position("c").unwrap().row, 2);
    assert_eq!(result.max_row, 2);
}

#[test]
fn waterfall_ignores_edges_entirely() {
    let mut g = GraphSnapshot::new();
    // Reverse dependency order on purpose.
    g.set_node(RunNode::new("late", 900_000));
    g.set_node(RunNode::new("early", 0));
    g.set_edge("early", "late");

    let result = layout(
        &g,
        &NodeWidths::new(),
        &seconds_scale(),
        VerticalMode::Waterfall,
        0,
    );
    assert_eq!(result.position("late").unwrap().row, 0);
    assert_eq!(result.position("early").unwrap().row, 1);
}

#[test]
fn duration_sort_orders_rows_by_descending_duration() {
    let mut g = GraphSnapshot::new();
    g.set_node(RunNode::new("short", 0).with_end(100_000));
    g.set_node(RunNode::new("long", 0).with_end(300_000));
    g.set_node(RunNode::new("medium", 0).with_end(200_000));

    let result = layout(
        &g,
        &NodeWidths::new(),
        &seconds_scale(),
        VerticalMode::DurationSorted,
        0,
    );
    assert_eq!(result.position("long").unwrap().row, 0);
    assert_eq!(result.position("medium").unwrap().row, 1);
    assert_eq!(result.position("short").unwrap().row, 2);
}

#[test]
fn duration_sort_treats_running_nodes_as_ending_now() {
    let mut g = GraphSnapshot::new();
    g.set_node(RunNode::new("finished", 0).with_end(200_000));
    g.set_node(RunNode::new("running", 0));

    // At now = 500s the running node has been going for longer.
    let result = layout(
        &g,
        &NodeWidths::new(),
        &seconds_scale(),
        VerticalMode::DurationSorted,
        500_000,
    );
    assert_eq!(result.position("running").unwrap().row, 0);
    assert_eq!(result.position("finished").unwrap().row, 1);
}

#[test]
fn duration_sort_keeps_snapshot_order_on_ties() {
    let mut g = GraphSnapshot::new();
    g.set_node(RunNode::new("first", 0).with_end(100_000));
    g.set_node(RunNode::new("second", 50_000).with_end(150_000));

    let result = layout(
        &g,
        &NodeWidths::new(),
        &seconds_scale(),
        VerticalMode::DurationSorted,
        0,
    );
    assert_eq!(result.position("first").unwrap().row, 0);
    assert_eq!(result.position("second").unwrap().row, 1);
}
