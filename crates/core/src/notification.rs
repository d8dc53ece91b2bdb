//! Persisted notification center
//!
//! Records move one way: `created (unread) -> read` through acknowledgement,
//! and `created -> removed` through dismissal, bulk clearing or, for
//! success/info severities, automatic expiry a fixed delay after creation.
//! A removed record never comes back; callers add a new one with a new id.
//!
//! The whole set is written to the key/value store after every mutation and
//! read back once when the center is constructed. The unread count is always
//! derived from the records.

use crate::config::{NotificationConfig, StorageKeys};
use crate::ids::IdGenerator;
use crate::listeners::{Listeners, Subscription};
use crate::scheduler::{Scheduler, TaskHandle};
use crate::storage::SharedStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Severity tag shared by notifications and toasts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Success and info records remove themselves after a fixed delay
    pub const fn auto_expires(self) -> bool {
        matches!(self, Self::Success | Self::Info)
    }
}

/// Button attached to a notification. Only the label is persisted; the
/// trigger lives for the current page only.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct NotificationAction {
    pub label: String,
    #[serde(skip)]
    trigger: Option<Rc<dyn Fn()>>,
}

impl NotificationAction {
    pub fn new(label: impl Into<String>, trigger: impl Fn() + 'static) -> Self {
        Self {
            label: label.into(),
            trigger: Some(Rc::new(trigger)),
        }
    }

    /// Run the trigger, if it survived (rehydrated actions have none)
    pub fn invoke(&self) -> bool {
        self.trigger.as_ref().map(|trigger| trigger()).is_some()
    }
}

impl fmt::Debug for NotificationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationAction")
            .field("label", &self.label)
            .field("has_trigger", &self.trigger.is_some())
            .finish()
    }
}

impl PartialEq for NotificationAction {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

/// One user-visible notification
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<NotificationAction>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

struct Inner<H> {
    store: SharedStore,
    records: Vec<Notification>,
    expiries: HashMap<String, H>,
    ids: IdGenerator,
    listeners: Listeners<Notification>,
}

impl<H> Inner<H> {
    fn persist(&self) {
        match serde_json::to_string(&self.records) {
            Ok(serialized) => self.store.set(StorageKeys::NOTIFICATIONS, &serialized),
            Err(err) => tracing::warn!(error = %err, "failed to persist notifications"),
        }
    }
}

/// Apply a mutation; when it reports a change, persist and notify listeners
fn apply<H, F>(inner: &Rc<RefCell<Inner<H>>>, mutation: F) -> bool
where
    F: FnOnce(&mut Inner<H>) -> bool,
{
    let (records, listeners) = {
        let mut guard = inner.borrow_mut();
        if !mutation(&mut guard) {
            return false;
        }
        guard.persist();
        (guard.records.clone(), guard.listeners.snapshot())
    };
    for listener in listeners {
        listener(&records);
    }
    true
}

fn load(store: &SharedStore) -> Vec<Notification> {
    let Some(raw) = store.get(StorageKeys::NOTIFICATIONS) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<Notification>>(&raw) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(error = %err, "discarding malformed stored notifications");
            Vec::new()
        }
    }
}

/// Notification engine. Cloning yields another handle to the same state.
pub struct NotificationCenter<S: Scheduler> {
    scheduler: S,
    inner: Rc<RefCell<Inner<S::Handle>>>,
}

impl<S: Scheduler + Clone> Clone for NotificationCenter<S> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<S: Scheduler> PartialEq for NotificationCenter<S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S> NotificationCenter<S>
where
    S: Scheduler,
    S::Handle: 'static,
{
    /// Create a center, rehydrating whatever the store holds. Expiry is not
    /// rescheduled for rehydrated records.
    pub fn new(store: SharedStore, scheduler: S) -> Self {
        let records = load(&store);
        let now = scheduler.now();
        let mut ids = IdGenerator::new();
        for record in &records {
            ids.observe(&record.id, now);
        }
        tracing::debug!(count = records.len(), "rehydrated notifications");

        Self {
            scheduler,
            inner: Rc::new(RefCell::new(Inner {
                store,
                records,
                expiries: HashMap::new(),
                ids,
                listeners: Listeners::default(),
            })),
        }
    }

    /// Add a notification and return its id. Newest records come first.
    pub fn add(
        &self,
        severity: Severity,
        title: impl Into<String>,
        message: Option<String>,
        action: Option<NotificationAction>,
    ) -> String {
        let now = self.scheduler.now();
        let title = title.into();

        let id = {
            let mut guard = self.inner.borrow_mut();
            let id = guard.ids.next(now);
            guard.records.insert(
                0,
                Notification {
                    id: id.clone(),
                    severity,
                    title,
                    message,
                    action,
                    timestamp: now,
                    read: false,
                },
            );
            id
        };

        if severity.auto_expires() {
            let weak = Rc::downgrade(&self.inner);
            let expiring = id.clone();
            let handle = self.scheduler.schedule(
                NotificationConfig::AUTO_EXPIRY,
                Box::new(move || expire(&weak, &expiring)),
            );
            self.inner.borrow_mut().expiries.insert(id.clone(), handle);
        }

        apply(&self.inner, |_| true);
        tracing::debug!(%id, ?severity, "notification added");
        id
    }

    pub fn success(&self, title: impl Into<String>, message: Option<String>) -> String {
        self.add(Severity::Success, title, message, None)
    }

    pub fn error(&self, title: impl Into<String>, message: Option<String>) -> String {
        self.add(Severity::Error, title, message, None)
    }

    pub fn warning(&self, title: impl Into<String>, message: Option<String>) -> String {
        self.add(Severity::Warning, title, message, None)
    }

    pub fn info(&self, title: impl Into<String>, message: Option<String>) -> String {
        self.add(Severity::Info, title, message, None)
    }

    /// Dismiss a record, cancelling its pending expiry
    pub fn remove(&self, id: &str) {
        apply(&self.inner, |inner| {
            if let Some(handle) = inner.expiries.remove(id) {
                handle.cancel();
            }
            let before = inner.records.len();
            inner.records.retain(|record| record.id != id);
            inner.records.len() != before
        });
    }

    pub fn mark_read(&self, id: &str) {
        apply(&self.inner, |inner| {
            match inner
                .records
                .iter_mut()
                .find(|record| record.id == id && !record.read)
            {
                Some(record) => {
                    record.read = true;
                    true
                }
                None => false,
            }
        });
    }

    pub fn mark_all_read(&self) {
        apply(&self.inner, |inner| {
            let mut changed = false;
            for record in inner.records.iter_mut().filter(|record| !record.read) {
                record.read = true;
                changed = true;
            }
            changed
        });
    }

    pub fn clear_all(&self) {
        apply(&self.inner, |inner| {
            for (_, handle) in inner.expiries.drain() {
                handle.cancel();
            }
            let changed = !inner.records.is_empty();
            inner.records.clear();
            changed
        });
    }

    pub fn clear_read(&self) {
        apply(&self.inner, |inner| {
            let read: Vec<String> = inner
                .records
                .iter()
                .filter(|record| record.read)
                .map(|record| record.id.clone())
                .collect();
            for id in &read {
                if let Some(handle) = inner.expiries.remove(id) {
                    handle.cancel();
                }
            }
            inner.records.retain(|record| !record.read);
            !read.is_empty()
        });
    }

    /// Snapshot of every record, newest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.borrow().records.clone()
    }

    pub fn get(&self, id: &str) -> Option<Notification> {
        self.inner
            .borrow()
            .records
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    pub fn unread_count(&self) -> usize {
        self.inner
            .borrow()
            .records
            .iter()
            .filter(|record| !record.read)
            .count()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().records.is_empty()
    }

    /// Number of expiry timers still pending
    pub fn pending_expiries(&self) -> usize {
        self.inner.borrow().expiries.len()
    }

    /// Register a listener invoked with the full record set after each change
    pub fn subscribe(&self, listener: impl Fn(&[Notification]) + 'static) -> Subscription {
        self.inner.borrow_mut().listeners.add(Rc::new(listener))
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.inner.borrow_mut().listeners.remove(subscription);
    }
}

/// Expiry callback. The record may already be gone (dismissed, cleared) or
/// the whole center dropped; both are no-ops.
fn expire<H>(inner: &Weak<RefCell<Inner<H>>>, id: &str) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let removed = apply(&inner, |inner| {
        inner.expiries.remove(id);
        let before = inner.records.len();
        inner.records.retain(|record| record.id != id);
        inner.records.len() != before
    });
    if removed {
        tracing::debug!(%id, "notification expired");
    }
}
