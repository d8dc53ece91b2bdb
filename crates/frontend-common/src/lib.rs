//! Browser glue for the MentorHub client core
//!
//! Adapts the core engines to the browser (`localStorage`, `setTimeout`)
//! and exposes them to Yew components through [`AppContext`].

pub mod components;
pub mod context;
pub mod hooks;
pub mod navigation;
pub mod scheduler;
pub mod storage;

pub use components::{AuthGuard, LoadingSpinner, Toaster};
pub use context::{AppContext, AppProvider, use_app};
pub use hooks::{RequestState, use_api_request, use_notifications, use_route_policy, use_toasts};
pub use scheduler::GlooScheduler;
pub use storage::BrowserStorage;

/// Route `log` and `tracing` output to the browser console
pub fn init_logging() {
    wasm_logger::init(wasm_logger::Config::default());
}
