//! `setTimeout` scheduler

use chrono::{DateTime, Utc};
use gloo_timers::callback::Timeout;
use mentorhub_core::scheduler::Job;
use mentorhub_core::{Scheduler, TaskHandle};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Scheduler backed by browser timers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlooScheduler;

/// Cancellation flag for a browser timer. The timer itself is left to fire;
/// a cancelled job is skipped when it does.
pub struct GlooHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle for GlooHandle {
    fn cancel(self) {
        self.cancelled.set(true);
    }
}

impl Scheduler for GlooScheduler {
    type Handle = GlooHandle;

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn schedule(&self, delay: Duration, job: Job) -> GlooHandle {
        let cancelled = Rc::new(Cell::new(false));
        let flag = cancelled.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);

        Timeout::new(millis, move || {
            if !flag.get() {
                job();
            }
        })
        .forget();

        GlooHandle { cancelled }
    }
}
