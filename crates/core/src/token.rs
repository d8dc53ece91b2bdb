//! Bearer token persistence

use crate::config::StorageKeys;
use crate::storage::SharedStore;
use serde::{Deserialize, Serialize};

/// Credentials written at login and removed at logout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<String>,
}

impl TokenRecord {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            display_name: None,
            role: None,
        }
    }
}

/// Reads and writes the bearer token and related session fields.
///
/// There is no client-side expiry tracking; a 401 from the backend is the
/// only signal that a stored token went stale.
#[derive(Clone)]
pub struct TokenStore {
    store: SharedStore,
}

impl TokenStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Persist a login. Optional fields that are not supplied are removed so
    /// values from a previous session cannot leak into this one.
    pub fn set(
        &self,
        token: &str,
        refresh_token: Option<&str>,
        display_name: Option<&str>,
        role: Option<&str>,
    ) {
        self.store.set(StorageKeys::ACCESS_TOKEN, token);
        self.put_optional(StorageKeys::REFRESH_TOKEN, refresh_token);
        self.put_optional(StorageKeys::USER_NAME, display_name);
        self.put_optional(StorageKeys::USER_ROLE, role);
        tracing::debug!(has_refresh = refresh_token.is_some(), "stored access token");
    }

    /// Persist a full record
    pub fn set_record(&self, record: &TokenRecord) {
        self.set(
            &record.access_token,
            record.refresh_token.as_deref(),
            record.display_name.as_deref(),
            record.role.as_deref(),
        );
    }

    /// Current access token. An empty stored value counts as absent.
    pub fn get(&self) -> Option<String> {
        self.read(StorageKeys::ACCESS_TOKEN)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(StorageKeys::REFRESH_TOKEN)
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }

    /// Everything stored for the current session
    pub fn record(&self) -> Option<TokenRecord> {
        let access_token = self.get()?;
        Some(TokenRecord {
            access_token,
            refresh_token: self.refresh_token(),
            display_name: self.read(StorageKeys::USER_NAME),
            role: self.read(StorageKeys::USER_ROLE),
        })
    }

    /// Remove every session field
    pub fn clear(&self) {
        for key in [
            StorageKeys::ACCESS_TOKEN,
            StorageKeys::REFRESH_TOKEN,
            StorageKeys::USER_NAME,
            StorageKeys::USER_ROLE,
        ] {
            self.store.remove(key);
        }
        tracing::debug!("cleared stored credentials");
    }

    fn read(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|value| !value.is_empty())
    }

    fn put_optional(&self, key: &str, value: Option<&str>) {
        match value {
            Some(value) => self.store.set(key, value),
            None => self.store.remove(key),
        }
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
