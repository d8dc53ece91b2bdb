//! Change listeners for the in-memory engines

use std::rc::Rc;

/// Identifies a registered listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Listener list; callbacks receive the full record set after a change
pub struct Listeners<T> {
    next: u64,
    entries: Vec<(Subscription, Rc<dyn Fn(&[T])>)>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            next: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> Listeners<T> {
    pub fn add(&mut self, callback: Rc<dyn Fn(&[T])>) -> Subscription {
        let subscription = Subscription(self.next);
        self.next += 1;
        self.entries.push((subscription, callback));
        subscription
    }

    pub fn remove(&mut self, subscription: Subscription) {
        self.entries.retain(|(id, _)| *id != subscription);
    }

    /// Clone the callbacks so they can be invoked without holding a borrow
    /// of the owning engine
    pub fn snapshot(&self) -> Vec<Rc<dyn Fn(&[T])>> {
        self.entries.iter().map(|(_, cb)| cb.clone()).collect()
    }
}
