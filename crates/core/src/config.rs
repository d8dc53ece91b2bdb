//! Client-side constants

use std::time::Duration;

/// Keys used in the browser-local key/value store
pub struct StorageKeys;

impl StorageKeys {
    pub const ACCESS_TOKEN: &'static str = "access_token";
    pub const REFRESH_TOKEN: &'static str = "refresh_token";
    pub const USER_NAME: &'static str = "user_name";
    pub const USER_ROLE: &'static str = "user_role";
    pub const NOTIFICATIONS: &'static str = "notifications";
    pub const COOKIE_CONSENT: &'static str = "cookie_consent";
}

/// Notification engine configuration
pub struct NotificationConfig;

impl NotificationConfig {
    /// Delay after creation before success/info notifications are dropped
    pub const AUTO_EXPIRY: Duration = Duration::from_millis(10_000);
}

/// Toast engine configuration
pub struct ToastConfig;

impl ToastConfig {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(3_000);
    pub const WARNING_DURATION: Duration = Duration::from_millis(4_000);
    pub const ERROR_DURATION: Duration = Duration::from_millis(5_000);
}

/// Catalog read cache configuration
pub struct CacheConfig;

impl CacheConfig {
    /// How long a cached catalog response is served before refetching
    pub const TTL: Duration = Duration::from_secs(5 * 60);
}
