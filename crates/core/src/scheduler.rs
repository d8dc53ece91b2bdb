//! Timer port for auto-expiring records
//!
//! Execution is single-threaded: jobs are plain `FnOnce` closures and may
//! capture `Rc` handles. Each scheduled job yields a handle that can cancel
//! it before it fires.

use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// A job scheduled for later execution
pub type Job = Box<dyn FnOnce()>;

/// Handle to a pending job
pub trait TaskHandle {
    /// Prevent the job from running. Cancelling a job that already ran is a
    /// no-op.
    fn cancel(self);
}

/// Source of the current time and of delayed execution
pub trait Scheduler {
    type Handle: TaskHandle;

    fn now(&self) -> DateTime<Utc>;

    fn schedule(&self, delay: Duration, job: Job) -> Self::Handle;
}

fn offset(now: DateTime<Utc>, delay: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(delay)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

struct PendingJob {
    due: DateTime<Utc>,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    job: Job,
}

struct ManualState {
    now: DateTime<Utc>,
    seq: u64,
    pending: Vec<PendingJob>,
}

/// Virtual clock. Time only moves when [`ManualScheduler::advance`] is
/// called, which runs due jobs in deadline order.
#[derive(Clone)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ManualState {
                now: start,
                seq: 0,
                pending: Vec::new(),
            })),
        }
    }

    /// Move the clock forward, running every job that falls due on the way.
    /// Jobs scheduled by running jobs are honoured within the same advance.
    pub fn advance(&self, by: Duration) {
        let target = offset(self.state.borrow().now, by);
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let index = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, job)| job.due <= target)
                    .min_by_key(|(_, job)| (job.due, job.seq))
                    .map(|(index, _)| index);
                index.map(|index| {
                    let job = state.pending.remove(index);
                    state.now = job.due;
                    job
                })
            };
            match next {
                Some(job) if !job.cancelled.get() => (job.job)(),
                Some(_) => {}
                None => break,
            }
        }
        self.state.borrow_mut().now = target;
    }

    /// Number of jobs that are scheduled and not cancelled
    pub fn pending(&self) -> usize {
        self.state
            .borrow()
            .pending
            .iter()
            .filter(|job| !job.cancelled.get())
            .count()
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

/// Cancellation flag for a [`ManualScheduler`] job
pub struct ManualHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle for ManualHandle {
    fn cancel(self) {
        self.cancelled.set(true);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn now(&self) -> DateTime<Utc> {
        self.state.borrow().now
    }

    fn schedule(&self, delay: Duration, job: Job) -> ManualHandle {
        let cancelled = Rc::new(Cell::new(false));
        let mut state = self.state.borrow_mut();
        let due = offset(state.now, delay);
        let seq = state.seq;
        state.seq += 1;
        state.pending.push(PendingJob {
            due,
            seq,
            cancelled: cancelled.clone(),
            job,
        });
        ManualHandle { cancelled }
    }
}

/// Scheduler backed by tokio timers. Jobs are spawned with
/// [`tokio::task::spawn_local`], so scheduling must happen inside a
/// [`tokio::task::LocalSet`].
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioScheduler;

#[cfg(not(target_arch = "wasm32"))]
pub struct TokioHandle(tokio::task::AbortHandle);

#[cfg(not(target_arch = "wasm32"))]
impl TaskHandle for TokioHandle {
    fn cancel(self) {
        self.0.abort();
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Scheduler for TokioScheduler {
    type Handle = TokioHandle;

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn schedule(&self, delay: Duration, job: Job) -> TokioHandle {
        let task = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            job();
        });
        TokioHandle(task.abort_handle())
    }
}
