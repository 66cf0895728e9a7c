//! Asynchronous layout boundary.
//!
//! Heavy recursive placement must not run on the thread driving the
//! canvas frame loop, so layout requests go to a dedicated worker thread
//! over a channel and the caller polls for finished layouts between
//! frames. Owned copies cross the boundary in both directions; no memory
//! is shared or locked.
//!
//! # Coalescing and staleness
//!
//! - Queued requests are coalesced: when several requests are waiting,
//!   only the newest is computed. A superseding request does not cancel a
//!   computation already in flight; it outraces it.
//! - Every request carries a monotonic sequence number that the response
//!   echoes. [`LayoutCoordinator::poll`] discards responses older than the
//!   newest already delivered, so a stale in-flight response that loses
//!   the race is never observed by the caller.
//!
//! There is no cancellation primitive and no timeout: teardown drops the
//! coordinator, which sends a shutdown message and joins the worker,
//! discarding any in-flight computation.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use rungraph_core::{GraphSnapshot, HorizontalSettings, NodeWidths, VerticalMode, now_ms};
use rungraph_layout::LayoutResult;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error("layout worker disconnected")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, CoordinatorError>;

/// One layout request: a graph snapshot plus everything the engine needs
/// to place it. The snapshot and width map are owned copies; the caller
/// keeps its own.
#[derive(Debug, Clone)]
pub struct LayoutRequest {
    pub snapshot: GraphSnapshot,
    pub widths: NodeWidths,
    pub horizontal: HorizontalSettings,
    pub vertical: VerticalMode,
    /// Anchor for the durations of still-running nodes, stamped at
    /// request construction so retries and tests are reproducible.
    pub now_ms: i64,
}

impl LayoutRequest {
    pub fn new(
        snapshot: GraphSnapshot,
        widths: NodeWidths,
        horizontal: HorizontalSettings,
        vertical: VerticalMode,
    ) -> Self {
        Self {
            snapshot,
            widths,
            horizontal,
            vertical,
            now_ms: now_ms(),
        }
    }
}

/// A finished layout together with the sequence number of the request
/// that produced it.
#[derive(Debug, Clone)]
pub struct LayoutResponse {
    pub seq: u64,
    pub result: LayoutResult,
}

enum WorkerMsg {
    Compute { seq: u64, request: Box<LayoutRequest> },
    Shutdown,
}

/// Owns the worker thread for one live graph instance.
pub struct LayoutCoordinator {
    sender: mpsc::Sender<WorkerMsg>,
    responses: mpsc::Receiver<LayoutResponse>,
    handle: Option<JoinHandle<()>>,
    next_seq: u64,
    newest_delivered: u64,
}

impl LayoutCoordinator {
    pub fn start() -> std::io::Result<Self> {
        let (sender, requests) = mpsc::channel::<WorkerMsg>();
        let (response_sender, responses) = mpsc::channel::<LayoutResponse>();

        let handle = thread::Builder::new()
            .name("rungraph-layout".into())
            .spawn(move || {
                worker_loop(requests, response_sender);
            })?;

        Ok(Self {
            sender,
            responses,
            handle: Some(handle),
            next_seq: 0,
            newest_delivered: 0,
        })
    }

    /// Submits a request and returns its sequence number. Does not block;
    /// the caller keeps rendering with the previous layout until a new
    /// one arrives.
    pub fn request_layout(&mut self, request: LayoutRequest) -> Result<u64> {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.sender
            .send(WorkerMsg::Compute {
                seq,
                request: Box::new(request),
            })
            .map_err(|_| CoordinatorError::Disconnected)?;
        Ok(seq)
    }

    /// Returns the newest finished layout, if any, discarding everything
    /// staler than what the caller has already seen.
    pub fn poll(&mut self) -> Option<LayoutResponse> {
        let mut newest: Option<LayoutResponse> = None;
        while let Ok(response) = self.responses.try_recv() {
            if response.seq > self.newest_delivered {
                self.newest_delivered = response.seq;
                newest = Some(response);
            } else {
                debug!(seq = response.seq, "discarding stale layout response");
            }
        }
        newest
    }

    /// Blocks until the response for `seq` (or anything newer) arrives.
    pub fn wait_for(&mut self, seq: u64) -> Result<LayoutResponse> {
        loop {
            let response = self
                .responses
                .recv()
                .map_err(|_| CoordinatorError::Disconnected)?;
            if response.seq <= self.newest_delivered {
                debug!(seq = response.seq, "discarding stale layout response");
                continue;
            }
            self.newest_delivered = response.seq;
            if response.seq >= seq {
                return Ok(response);
            }
        }
    }

    pub fn shutdown(mut self) {
        let _ = self.sender.send(WorkerMsg::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for LayoutCoordinator {
    fn drop(&mut self) {
        let _ = self.sender.send(WorkerMsg::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn worker_loop(requests: mpsc::Receiver<WorkerMsg>, responses: mpsc::Sender<LayoutResponse>) {
    loop {
        let first = match requests.recv() {
            Ok(msg) => msg,
            Err(_) => return,
        };

        let mut latest: Option<(u64, Box<LayoutRequest>)> = None;
        let mut shutdown = false;
        absorb(first, &mut latest, &mut shutdown);
        while let Ok(msg) = requests.try_recv() {
            absorb(msg, &mut latest, &mut shutdown);
        }

        if let Some((seq, request)) = latest {
            let result = rungraph_layout::layout(
                &request.snapshot,
                &request.widths,
                &request.horizontal,
                request.vertical,
                request.now_ms,
            );
            if responses.send(LayoutResponse { seq, result }).is_err() {
                return;
            }
        }

        if shutdown {
            return;
        }
    }
}

fn absorb(msg: WorkerMsg, latest: &mut Option<(u64, Box<LayoutRequest>)>, shutdown: &mut bool) {
    match msg {
        WorkerMsg::Compute { seq, request } => {
            if latest.as_ref().map(|(s, _)| seq > *s).unwrap_or(true) {
                if latest.is_some() {
                    debug!(seq, "coalescing layout requests; superseded request skipped");
                }
                *latest = Some((seq, request));
            }
        }
        WorkerMsg::Shutdown => *shutdown = true,
    }
}
