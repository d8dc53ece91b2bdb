//! Shared components

pub mod auth_guard;
pub mod spinner;
pub mod toaster;

pub use auth_guard::AuthGuard;
pub use spinner::LoadingSpinner;
pub use toaster::Toaster;
