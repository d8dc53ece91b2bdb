//! Toast stack

use crate::hooks::use_toasts;
use mentorhub_core::Severity;
use yew::prelude::*;

const fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "bg-green-50 border-green-400 text-green-800",
        Severity::Error => "bg-red-50 border-red-400 text-red-800",
        Severity::Warning => "bg-yellow-50 border-yellow-400 text-yellow-800",
        Severity::Info => "bg-blue-50 border-blue-400 text-blue-800",
    }
}

#[function_component(Toaster)]
pub fn toaster() -> Html {
    let toasts = use_toasts();

    html! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2" aria-live="polite">
            { for toasts.toasts.iter().map(|toast| {
                let center = toasts.center.clone();
                let id = toast.id.clone();
                let onclick = Callback::from(move |_: MouseEvent| center.remove(&id));
                html! {
                    <div key={toast.id.clone()}
                        class={classes!("flex", "items-start", "gap-3", "border", "rounded-lg", "px-4", "py-3", "shadow", severity_class(toast.severity))}>
                        <span class="flex-1 text-sm">{toast.message.clone()}</span>
                        <button class="text-sm opacity-60 hover:opacity-100" aria-label="Закрыть" {onclick}>{"×"}</button>
                    </div>
                }
            }) }
        </div>
    }
}
