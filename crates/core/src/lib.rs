//! MentorHub client-side core
//!
//! Browser-agnostic state for the MentorHub frontend: the token store, the
//! notification and toast engines, cookie consent, the auth guard state
//! machine and the generated SEO documents. Persistence goes through the
//! [`KeyValueStore`] port and timers through the [`Scheduler`] port so every
//! piece can run against in-memory fakes.

pub mod cache;
pub mod config;
pub mod consent;
pub mod error;
pub mod guard;
pub mod ids;
pub mod listeners;
pub mod notification;
pub mod pagination;
pub mod scheduler;
pub mod seo;
pub mod storage;
pub mod toast;
pub mod token;

#[cfg(all(feature = "tracing-init", not(target_arch = "wasm32")))]
pub mod tracing;

#[cfg(test)]
mod tests;

pub use cache::TtlCache;
pub use config::{CacheConfig, NotificationConfig, StorageKeys, ToastConfig};
pub use consent::{ConsentCategory, ConsentRecord, ConsentStore};
pub use error::{CoreError, CoreResult};
pub use guard::{AuthGuard, GuardState, RouteDecision, RoutePolicy};
pub use notification::{Notification, NotificationAction, NotificationCenter, Severity};
pub use pagination::Paginated;
pub use scheduler::{ManualScheduler, Scheduler, TaskHandle};
pub use storage::{KeyValueStore, MemoryStore, SharedStore};
pub use toast::{Toast, ToastCenter};
pub use token::{TokenRecord, TokenStore};

#[cfg(not(target_arch = "wasm32"))]
pub use scheduler::TokioScheduler;
