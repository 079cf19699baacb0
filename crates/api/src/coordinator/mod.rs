//! In-memory job coordination: queue, worker registry, assignments, and
//! result correlation.
//!
//! All four tables live in one [`CoordinatorState`] behind a single mutex —
//! the one linearization point of the system. The dispatcher's combined
//! dequeue + mark-busy + assign step happens inside one critical section, so
//! two concurrent polls can never receive the same job and a popped job is
//! always recorded against exactly one worker. Nothing here persists across
//! restarts and nothing here retries: a failed job is reported to its caller
//! and forgotten.

pub mod sweep;

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use axum::body::Bytes;
use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::oneshot;

use slidecast_core::job::{Job, JobId, JobPayload};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Busy/idle state of a registered worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerStatus {
    Idle,
    Busy,
}

/// Registry entry for one worker agent.
#[derive(Debug)]
struct WorkerEntry {
    status: WorkerStatus,
    last_seen: Instant,
}

/// What the parked create-video caller eventually receives.
#[derive(Debug)]
pub enum RenderOutcome {
    /// The rendered video plus the suggested attachment filename.
    Video { bytes: Bytes, filename: String },
    /// The failure message reported by the worker.
    Failed { message: String },
}

/// A response parked until its job's worker reports back.
struct ParkedResponse {
    sender: oneshot::Sender<RenderOutcome>,
    /// Filename stem for the `Content-Disposition` header on success.
    slug: String,
}

/// Result of a resolve/fail delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The parked caller received the outcome.
    Delivered,
    /// No parked entry existed (caller gone, already resolved, or timed
    /// out). Logged, never escalated.
    NoRecipient,
}

/// Error from parking a response under an id that is already parked.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("a response is already parked for job {0}")]
pub struct AlreadyParked(pub JobId);

// ---------------------------------------------------------------------------
// Stats snapshot (admin surface)
// ---------------------------------------------------------------------------

/// Point-in-time view of one worker for the stats endpoint.
#[derive(Debug, Serialize)]
pub struct WorkerSnapshot {
    pub id: String,
    pub status: WorkerStatus,
    /// Seconds since the worker last polled.
    pub silent_secs: u64,
}

/// Point-in-time view of one queued job.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedJobSnapshot {
    pub job_id: JobId,
    pub title: Option<String>,
}

/// Coordinator state snapshot returned by `GET /admin/stats`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatorStats {
    pub workers: Vec<WorkerSnapshot>,
    pub queue: Vec<QueuedJobSnapshot>,
    pub completed_jobs: u64,
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Everything the coordinator mutates, guarded together.
///
/// Only [`Coordinator`] methods touch this struct, and every method locks
/// exactly once for its whole effect.
#[derive(Default)]
struct CoordinatorState {
    queue: VecDeque<Job>,
    workers: HashMap<String, WorkerEntry>,
    assignments: HashMap<JobId, String>,
    parked: HashMap<JobId, ParkedResponse>,
    completed_jobs: u64,
}

/// Shared handle over the coordinator state; cheap to clone via `Arc`.
#[derive(Default)]
pub struct Coordinator {
    state: Mutex<CoordinatorState>,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park the caller's response and enqueue the job, atomically.
    ///
    /// Parking happens under the same lock as the enqueue so no poll can
    /// dispatch a job whose response is not yet parked. Returns the
    /// receiver the caller awaits; exactly one [`RenderOutcome`] will ever
    /// be sent on it.
    pub fn submit(
        &self,
        payload: JobPayload,
        slug: String,
    ) -> Result<oneshot::Receiver<RenderOutcome>, AlreadyParked> {
        let (tx, rx) = oneshot::channel();
        let job = Job {
            id: payload.job_id,
            payload,
            created_at: Utc::now(),
        };

        let mut state = self.state.lock();
        if state.parked.contains_key(&job.id) {
            return Err(AlreadyParked(job.id));
        }
        state.parked.insert(job.id, ParkedResponse { sender: tx, slug });
        state.queue.push_back(job);
        Ok(rx)
    }

    /// Handle one worker poll: register-or-refresh the worker, then hand it
    /// the queue head if there is one.
    ///
    /// The dequeue, busy-marking, and assignment record are one atomic step
    /// relative to every other poll. An empty queue yields `None`, which is
    /// the wire-level "no job" marker, not an error. A worker still marked
    /// Busy never receives a second job: a worker id owns at most one job
    /// at a time.
    pub fn poll(&self, worker_id: &str) -> Option<JobPayload> {
        let now = Instant::now();
        let mut state = self.state.lock();

        // Touch: implicit registration on first contact; a Busy worker only
        // refreshes its timestamp, its status is preserved.
        {
            let entry = state
                .workers
                .entry(worker_id.to_string())
                .or_insert_with(|| WorkerEntry {
                    status: WorkerStatus::Idle,
                    last_seen: now,
                });
            entry.last_seen = now;
            if entry.status == WorkerStatus::Busy {
                return None;
            }
        }

        let job = state.queue.pop_front()?;
        if let Some(worker) = state.workers.get_mut(worker_id) {
            worker.status = WorkerStatus::Busy;
        }
        state.assignments.insert(job.id, worker_id.to_string());
        tracing::info!(job_id = %job.id, worker_id, "Job dispatched");
        Some(job.payload)
    }

    /// Deliver a rendered video to the parked caller and free the worker.
    pub fn resolve(&self, job_id: JobId, bytes: Bytes) -> Delivery {
        let mut state = self.state.lock();
        state.completed_jobs += 1;
        release_assignment(&mut state, job_id);

        let Some(parked) = state.parked.remove(&job_id) else {
            tracing::warn!(%job_id, "Result arrived with no parked response");
            return Delivery::NoRecipient;
        };
        let filename = format!("{}.mp4", parked.slug);
        match parked.sender.send(RenderOutcome::Video { bytes, filename }) {
            Ok(()) => Delivery::Delivered,
            Err(_) => {
                // The caller hung up between parking and now.
                tracing::warn!(%job_id, "Parked caller disconnected before delivery");
                Delivery::NoRecipient
            }
        }
    }

    /// Deliver a worker-reported failure to the parked caller and free the
    /// worker.
    pub fn fail(&self, job_id: JobId, message: String) -> Delivery {
        let mut state = self.state.lock();
        release_assignment(&mut state, job_id);

        let Some(parked) = state.parked.remove(&job_id) else {
            tracing::warn!(%job_id, "Failure report with no parked response");
            return Delivery::NoRecipient;
        };
        match parked.sender.send(RenderOutcome::Failed { message }) {
            Ok(()) => Delivery::Delivered,
            Err(_) => Delivery::NoRecipient,
        }
    }

    /// Drop the parked entry for a job whose caller has given up waiting.
    ///
    /// A later resolve/fail for the job then lands in the NoRecipient path.
    /// Returns whether an entry existed.
    pub fn discard_parked(&self, job_id: JobId) -> bool {
        self.state.lock().parked.remove(&job_id).is_some()
    }

    /// Evict every Idle worker not seen within `stale_after`.
    ///
    /// Busy workers are never evicted: a worker deep in a long render does
    /// not poll, and reaping it would orphan its job.
    pub fn sweep(&self, stale_after: Duration) {
        let now = Instant::now();
        let mut state = self.state.lock();
        let before = state.workers.len();
        state.workers.retain(|_, worker| {
            worker.status == WorkerStatus::Busy
                || now.duration_since(worker.last_seen) <= stale_after
        });
        let evicted = before - state.workers.len();
        if evicted > 0 {
            tracing::info!(evicted, "Evicted stale idle workers");
        }
    }

    /// Snapshot queue/registry state for the admin surface.
    pub fn stats(&self) -> CoordinatorStats {
        let now = Instant::now();
        let state = self.state.lock();
        CoordinatorStats {
            workers: state
                .workers
                .iter()
                .map(|(id, worker)| WorkerSnapshot {
                    id: id.clone(),
                    status: worker.status,
                    silent_secs: now.duration_since(worker.last_seen).as_secs(),
                })
                .collect(),
            queue: state
                .queue
                .iter()
                .map(|job| QueuedJobSnapshot {
                    job_id: job.id,
                    title: job.payload.title.clone(),
                })
                .collect(),
            completed_jobs: state.completed_jobs,
        }
    }

    // ---- test/introspection helpers ----

    /// Number of jobs waiting for a worker.
    pub fn queue_len(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Status of a worker, if registered.
    pub fn worker_status(&self, worker_id: &str) -> Option<WorkerStatus> {
        self.state.lock().workers.get(worker_id).map(|w| w.status)
    }

    /// Worker currently assigned to a job, if any.
    pub fn assigned_worker(&self, job_id: JobId) -> Option<String> {
        self.state.lock().assignments.get(&job_id).cloned()
    }
}

/// Remove a job's assignment and return its worker to Idle.
///
/// Shared by the resolve and fail paths; tolerates the worker having been
/// evicted or the assignment never having existed.
fn release_assignment(state: &mut CoordinatorState, job_id: JobId) {
    if let Some(worker_id) = state.assignments.remove(&job_id) {
        if let Some(worker) = state.workers.get_mut(&worker_id) {
            worker.status = WorkerStatus::Idle;
            worker.last_seen = Instant::now();
        }
    }
}
