use rungraph::coordinator::{LayoutCoordinator, LayoutRequest};
use rungraph::{GraphSnapshot, HorizontalSettings, NodeWidths, RunNode, VerticalMode};

fn request(start_offset_ms: i64) -> LayoutRequest {
    let mut g = GraphSnapshot::new();
    g.set_node(RunNode::new("a", start_offset_ms).with_end(start_offset_ms + 10_000));
    g.set_node(RunNode::new("b", start_offset_ms + 30_000));
    g.set_edge("a", "b");
    g.compute_roots();
    LayoutRequest::new(
        g,
        NodeWidths::new(),
        HorizontalSettings::time(0),
        VerticalMode::NearestParent,
    )
}

#[test]
fn round_trips_a_layout_through_the_worker() {
    let mut coordinator = LayoutCoordinator::start().unwrap();
    let seq = coordinator.request_layout(request(0)).unwrap();
    let response = coordinator.wait_for(seq).unwrap();
    assert_eq!(response.seq, seq);
    assert_eq!(response.result.positions.len(), 2);
    assert!(response.result.position("a").is_some());
}

#[test]
fn sequence_numbers_increase_monotonically() {
    let mut coordinator = LayoutCoordinator::start().unwrap();
    let first = coordinator.request_layout(request(0)).unwrap();
    let second = coordinator.request_layout(request(60_000)).unwrap();
    assert!(second > first);
}

#[test]
fn newest_request_supersedes_queued_ones() {
    let mut coordinator = LayoutCoordinator::start().unwrap();
    // Queue several requests back to back; the worker coalesces whatever
    // is still waiting and only the newest answer reaches the caller.
    let mut last_seq = 0;
    for i in 0..5 {
        last_seq = coordinator.request_layout(request(i * 60_000)).unwrap();
    }
    let response = coordinator.wait_for(last_seq).unwrap();
    assert_eq!(response.seq, last_seq);

    // Anything still buffered is older than what was just delivered.
    assert!(coordinator.poll().is_none());
}

#[test]
fn poll_returns_nothing_before_a_layout_finishes_arriving() {
    let mut coordinator = LayoutCoordinator::start().unwrap();
    assert!(coordinator.poll().is_none());
    let seq = coordinator.request_layout(request(0)).unwrap();
    let response = coordinator.wait_for(seq).unwrap();
    assert_eq!(response.seq, seq);
}

#[test]
fn workers_for_separate_graphs_are_independent() {
    let mut left = LayoutCoordinator::start().unwrap();
    let mut right = LayoutCoordinator::start().unwrap();
    let left_seq = left.request_layout(request(0)).unwrap();
    let right_seq = right.request_layout(request(120_000)).unwrap();
    assert!(left.wait_for(left_seq).is_ok());
    assert!(right.wait_for(right_seq).is_ok());
}

#[test]
fn shutdown_joins_the_worker() {
    let mut coordinator = LayoutCoordinator::start().unwrap();
    let seq = coordinator.request_layout(request(0)).unwrap();
    let _ = coordinator.wait_for(seq);
    coordinator.shutdown();
}

#[test]
fn dropping_the_coordinator_discards_in_flight_work() {
    let mut coordinator = LayoutCoordinator::start().unwrap();
    let _ = coordinator.request_layout(request(0)).unwrap();
    drop(coordinator);
}
