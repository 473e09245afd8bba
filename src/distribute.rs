//! Master/worker decomposition of the pair loop.
//!
//! The work unit is one outer index `i` (all pairs `(i, j)` with `j > i`). Work per unit
//! shrinks with `i` and depends on component sizes, so units are handed out on demand:
//! a worker asks for the next `i` only after finishing the previous one.
//!
//! Protocol (every channel is a rendezvous `sync_channel(0)`, so each send blocks until the
//! other side receives it and no queue can grow):
//!
//! ```text
//! worker -> master   Ready { worker }
//! master -> worker   Vertex(i) | Stop
//! worker -> master   Finished { worker, partial, stats }   (after Stop)
//! ```
//!
//! Workers share nothing mutable: each owns its scratch space and partial vector. The master
//! sums partial vectors after they arrive, on its own thread.

use crate::accumulate::{Accumulator, PairLoop, PairStats};
use crate::components::connected_components;
use crate::graph::GraphRef;
use crate::{Error, Result};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;

/// Lifecycle of a worker.
///
/// `Idle -> Searching -> Reconstructing -> Accumulating -> (next pair: Searching | Idle)`,
/// and on `Stop`: `Idle -> SendingResult -> Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Searching,
    Reconstructing,
    Accumulating,
    SendingResult,
    Terminated,
}

/// Per-worker summary returned with the reduced vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerReport {
    pub worker: usize,
    pub stats: PairStats,
}

/// Output of [`WorkDistributor::run`].
#[derive(Debug, Clone)]
pub struct DistributedRun {
    pub gebc: Vec<f64>,
    pub reports: Vec<WorkerReport>,
}

enum Assignment {
    Vertex(usize),
    Stop,
}

enum WorkerMsg {
    Ready { worker: usize },
    Finished { worker: usize, partial: Vec<f64>, stats: PairStats },
}

/// Runs the pair loop on a fixed pool of worker threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkDistributor {
    workers: usize,
}

impl WorkDistributor {
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if `workers == 0`.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidParameter("worker count must be at least 1".into()));
        }
        Ok(Self { workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Compute the centrality vector, distributing outer indices across workers.
    ///
    /// With a single worker the loop runs on the calling thread and no channel is created.
    ///
    /// # Errors
    ///
    /// - [`Error::Spawn`] if a worker thread cannot be started.
    /// - [`Error::WorkerLost`] if a worker panics or disconnects before delivering its
    ///   partial vector; no partial result is returned.
    pub fn run<G: GraphRef + Sync>(&self, graph: &G) -> Result<DistributedRun> {
        let n = graph.node_count();
        let component = connected_components(graph);
        // Isolated vertices and the last index have no pair to contribute.
        let sources: Vec<usize> =
            (0..n.saturating_sub(1)).filter(|&i| graph.degree(i) > 0).collect();

        if self.workers == 1 {
            let mut unit = PairLoop::new(n);
            for &source in &sources {
                unit.run_source(graph, &component, source);
            }
            let (acc, stats) = unit.into_parts();
            return Ok(DistributedRun {
                gebc: acc.into_vec(),
                reports: vec![WorkerReport { worker: 0, stats }],
            });
        }

        tracing::debug!(workers = self.workers, sources = sources.len(), "distributing pair loop");
        thread::scope(|scope| -> Result<DistributedRun> {
            let (request_tx, request_rx) = mpsc::sync_channel::<WorkerMsg>(0);
            let mut assign_txs = Vec::with_capacity(self.workers);
            let mut handles = Vec::with_capacity(self.workers);
            for worker in 0..self.workers {
                let (assign_tx, assign_rx) = mpsc::sync_channel::<Assignment>(0);
                let request_tx = request_tx.clone();
                let component = component.as_slice();
                let handle = thread::Builder::new()
                    .name(format!("gebc-worker-{worker}"))
                    .spawn_scoped(scope, move || {
                        worker_loop(worker, graph, component, request_tx, assign_rx, |_| {})
                    })?;
                assign_txs.push(assign_tx);
                handles.push(handle);
            }
            // Only workers hold request senders now: if they all exit, `recv` fails.
            drop(request_tx);

            let reduced = master_loop(&sources, n, &request_rx, &assign_txs);
            drop(assign_txs);
            drop(request_rx);

            let mut lost = None;
            for (worker, handle) in handles.into_iter().enumerate() {
                if handle.join().is_err() {
                    tracing::error!(worker, "worker panicked");
                    lost.get_or_insert(worker);
                }
            }
            let (acc, reports) = reduced?;
            if let Some(worker) = lost {
                return Err(Error::WorkerLost { worker });
            }
            Ok(DistributedRun { gebc: acc.into_vec(), reports })
        })
    }
}

fn master_loop(
    sources: &[usize],
    n: usize,
    requests: &Receiver<WorkerMsg>,
    assign: &[SyncSender<Assignment>],
) -> Result<(Accumulator, Vec<WorkerReport>)> {
    let workers = assign.len();
    let mut pending = sources.iter().copied();
    let mut total = Accumulator::new(n);
    let mut reports: Vec<Option<WorkerReport>> = vec![None; workers];
    let mut finished = 0usize;

    while finished < workers {
        let Ok(msg) = requests.recv() else {
            break;
        };
        match msg {
            WorkerMsg::Ready { worker } => {
                let next = pending.next();
                let assignment = next.map_or(Assignment::Stop, Assignment::Vertex);
                if assign[worker].send(assignment).is_err() {
                    tracing::warn!(worker, vertex = ?next, "worker disconnected before taking work");
                    return Err(Error::WorkerLost { worker });
                }
            }
            WorkerMsg::Finished { worker, partial, stats } => {
                total.merge(&partial)?;
                reports[worker] = Some(WorkerReport { worker, stats });
                finished += 1;
            }
        }
    }

    let reports = reports
        .into_iter()
        .enumerate()
        .map(|(worker, r)| r.ok_or(Error::WorkerLost { worker }))
        .collect::<Result<Vec<_>>>()?;
    Ok((total, reports))
}

struct StateTracker<F> {
    worker: usize,
    state: WorkerState,
    observe: F,
}

impl<F: FnMut(WorkerState)> StateTracker<F> {
    fn new(worker: usize, mut observe: F) -> Self {
        observe(WorkerState::Idle);
        Self { worker, state: WorkerState::Idle, observe }
    }

    fn enter(&mut self, next: WorkerState) {
        if next != self.state {
            tracing::trace!(worker = self.worker, from = ?self.state, to = ?next, "worker state");
            self.state = next;
            (self.observe)(next);
        }
    }
}

/// One worker: request, run, repeat until `Stop`, then hand back the partial vector.
///
/// `observe` sees every state the worker enters, starting with `Idle`.
fn worker_loop<G, F>(
    worker: usize,
    graph: &G,
    component: &[usize],
    requests: SyncSender<WorkerMsg>,
    assignments: Receiver<Assignment>,
    observe: F,
) where
    G: GraphRef,
    F: FnMut(WorkerState),
{
    let mut unit = PairLoop::new(graph.node_count());
    let mut tracker = StateTracker::new(worker, observe);

    loop {
        if requests.send(WorkerMsg::Ready { worker }).is_err() {
            return;
        }
        match assignments.recv() {
            Ok(Assignment::Vertex(source)) => {
                unit.run_source_observed(graph, component, source, |s| tracker.enter(s));
                tracker.enter(WorkerState::Idle);
            }
            Ok(Assignment::Stop) => break,
            Err(_) => return,
        }
    }

    tracker.enter(WorkerState::SendingResult);
    let (acc, stats) = unit.into_parts();
    if requests
        .send(WorkerMsg::Finished { worker, partial: acc.into_vec(), stats })
        .is_err()
    {
        return;
    }
    tracker.enter(WorkerState::Terminated);
    tracing::debug!(worker, sources = stats.sources, pairs = stats.pairs, "worker done");
}
