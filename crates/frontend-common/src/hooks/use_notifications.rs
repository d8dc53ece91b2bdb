//! Notification list that re-renders on change

use crate::context::use_app;
use crate::scheduler::GlooScheduler;
use mentorhub_core::{Notification, NotificationCenter};
use yew::prelude::*;

/// Current notifications plus the engine to act on them
pub struct NotificationsHandle {
    pub center: NotificationCenter<GlooScheduler>,
    pub notifications: Vec<Notification>,
}

impl NotificationsHandle {
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

#[hook]
pub fn use_notifications() -> NotificationsHandle {
    let center = use_app().notifications;
    let notifications = {
        let center = center.clone();
        use_state(move || center.notifications())
    };

    {
        let notifications = notifications.clone();
        use_effect_with(center.clone(), move |center| {
            // Pick up anything that changed between render and subscribe
            notifications.set(center.notifications());
            let subscription = center.subscribe(move |records| notifications.set(records.to_vec()));
            let center = center.clone();
            move || center.unsubscribe(subscription)
        });
    }

    NotificationsHandle {
        center,
        notifications: (*notifications).clone(),
    }
}
