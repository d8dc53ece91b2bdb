//! Custom hooks for the application

pub mod use_api_request;
pub mod use_notifications;
pub mod use_route_policy;
pub mod use_toasts;

pub use use_api_request::{RequestFailure, RequestState, use_api_request};
pub use use_notifications::{NotificationsHandle, use_notifications};
pub use use_route_policy::{route_redirect, use_route_policy};
pub use use_toasts::{ToastsHandle, use_toasts};
