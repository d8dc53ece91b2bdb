//! Transient toast messages
//!
//! Toasts are never persisted. Each one removes itself when its duration
//! elapses; manual dismissal cancels the pending timer.

use crate::config::ToastConfig;
use crate::ids::IdGenerator;
use crate::listeners::{Listeners, Subscription};
use crate::notification::Severity;
use crate::scheduler::{Scheduler, TaskHandle};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: String,
    pub severity: Severity,
    pub message: String,
}

impl Severity {
    /// How long a toast of this severity stays up when no duration is given
    pub const fn toast_duration(self) -> Duration {
        match self {
            Self::Error => ToastConfig::ERROR_DURATION,
            Self::Warning => ToastConfig::WARNING_DURATION,
            Self::Success | Self::Info => ToastConfig::DEFAULT_DURATION,
        }
    }
}

struct Inner<H> {
    toasts: Vec<Toast>,
    timers: HashMap<String, H>,
    ids: IdGenerator,
    listeners: Listeners<Toast>,
}

fn apply<H>(inner: &Rc<RefCell<Inner<H>>>, mutation: impl FnOnce(&mut Inner<H>) -> bool) {
    let (toasts, listeners) = {
        let mut guard = inner.borrow_mut();
        if !mutation(&mut guard) {
            return;
        }
        (guard.toasts.clone(), guard.listeners.snapshot())
    };
    for listener in listeners {
        listener(&toasts);
    }
}

fn dismiss<H>(inner: &mut Inner<H>, id: &str) -> bool {
    let before = inner.toasts.len();
    inner.toasts.retain(|toast| toast.id != id);
    inner.toasts.len() != before
}

/// Toast engine. Cloning yields another handle to the same list.
pub struct ToastCenter<S: Scheduler> {
    scheduler: S,
    inner: Rc<RefCell<Inner<S::Handle>>>,
}

impl<S: Scheduler + Clone> Clone for ToastCenter<S> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<S: Scheduler> PartialEq for ToastCenter<S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S> ToastCenter<S>
where
    S: Scheduler,
    S::Handle: 'static,
{
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            inner: Rc::new(RefCell::new(Inner {
                toasts: Vec::new(),
                timers: HashMap::new(),
                ids: IdGenerator::new(),
                listeners: Listeners::default(),
            })),
        }
    }

    /// Show a toast for `duration`, or for the severity's default duration
    pub fn show(
        &self,
        message: impl Into<String>,
        severity: Severity,
        duration: Option<Duration>,
    ) -> String {
        let duration = duration.unwrap_or_else(|| severity.toast_duration());
        let id = self.inner.borrow_mut().ids.next(self.scheduler.now());

        let weak: Weak<RefCell<Inner<S::Handle>>> = Rc::downgrade(&self.inner);
        let expiring = id.clone();
        let handle = self.scheduler.schedule(
            duration,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    apply(&inner, |inner| {
                        inner.timers.remove(&expiring);
                        dismiss(inner, &expiring)
                    });
                }
            }),
        );

        let toast = Toast {
            id: id.clone(),
            severity,
            message: message.into(),
        };
        apply(&self.inner, |inner| {
            inner.timers.insert(id.clone(), handle);
            inner.toasts.push(toast);
            true
        });
        id
    }

    pub fn success(&self, message: impl Into<String>) -> String {
        self.show(message, Severity::Success, None)
    }

    pub fn error(&self, message: impl Into<String>) -> String {
        self.show(message, Severity::Error, None)
    }

    pub fn warning(&self, message: impl Into<String>) -> String {
        self.show(message, Severity::Warning, None)
    }

    pub fn info(&self, message: impl Into<String>) -> String {
        self.show(message, Severity::Info, None)
    }

    /// Dismiss a toast before its timer fires
    pub fn remove(&self, id: &str) {
        apply(&self.inner, |inner| {
            if let Some(handle) = inner.timers.remove(id) {
                handle.cancel();
            }
            dismiss(inner, id)
        });
    }

    /// Active toasts, oldest first
    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.borrow().toasts.clone()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.borrow().toasts.iter().any(|toast| toast.id == id)
    }

    pub fn subscribe(&self, listener: impl Fn(&[Toast]) + 'static) -> Subscription {
        self.inner.borrow_mut().listeners.add(Rc::new(listener))
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.inner.borrow_mut().listeners.remove(subscription);
    }
}
