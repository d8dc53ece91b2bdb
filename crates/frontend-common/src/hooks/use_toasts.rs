//! Visible toasts that re-render on change

use crate::context::use_app;
use crate::scheduler::GlooScheduler;
use mentorhub_core::{Toast, ToastCenter};
use yew::prelude::*;

pub struct ToastsHandle {
    pub center: ToastCenter<GlooScheduler>,
    pub toasts: Vec<Toast>,
}

#[hook]
pub fn use_toasts() -> ToastsHandle {
    let center = use_app().toasts;
    let toasts = {
        let center = center.clone();
        use_state(move || center.toasts())
    };

    {
        let toasts = toasts.clone();
        use_effect_with(center.clone(), move |center| {
            // Pick up toasts shown between render and subscribe
            toasts.set(center.toasts());
            let subscription = center.subscribe(move |current| toasts.set(current.to_vec()));
            let center = center.clone();
            move || center.unsubscribe(subscription)
        });
    }

    ToastsHandle {
        center,
        toasts: (*toasts).clone(),
    }
}
