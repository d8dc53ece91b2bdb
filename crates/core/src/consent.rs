//! Cookie consent persistence

use crate::config::StorageKeys;
use crate::error::{CoreError, CoreResult};
use crate::storage::SharedStore;
use serde::{Deserialize, Serialize};

/// Cookie categories a visitor can opt into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsentCategory {
    Necessary,
    Analytics,
    Marketing,
}

/// Stored opt-ins. Fields missing from stored data (for example categories
/// added in a later release) take their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentRecord {
    pub necessary: bool,
    pub analytics: bool,
    pub marketing: bool,
}

impl Default for ConsentRecord {
    fn default() -> Self {
        Self {
            necessary: true,
            analytics: false,
            marketing: false,
        }
    }
}

impl ConsentRecord {
    /// Parse stored JSON, merging it onto the defaults. `necessary` is not
    /// user-configurable and always comes back true.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let mut record: Self = serde_json::from_str(raw)
            .map_err(|err| CoreError::validation(format!("cookie consent: {err}")))?;
        record.necessary = true;
        Ok(record)
    }

    pub const fn allows(&self, category: ConsentCategory) -> bool {
        match category {
            ConsentCategory::Necessary => true,
            ConsentCategory::Analytics => self.analytics,
            ConsentCategory::Marketing => self.marketing,
        }
    }
}

/// Loads and saves the consent record
#[derive(Clone)]
pub struct ConsentStore {
    store: SharedStore,
}

impl ConsentStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Read the persisted record. Missing or malformed data means no prior
    /// consent and yields the defaults.
    pub fn load(&self) -> ConsentRecord {
        let Some(raw) = self.store.get(StorageKeys::COOKIE_CONSENT) else {
            return ConsentRecord::default();
        };
        ConsentRecord::parse(&raw).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring stored cookie consent");
            ConsentRecord::default()
        })
    }

    /// Persist the full record and return what was written
    pub fn save(&self, record: ConsentRecord) -> ConsentRecord {
        let record = ConsentRecord {
            necessary: true,
            ..record
        };
        match serde_json::to_string(&record) {
            Ok(serialized) => self.store.set(StorageKeys::COOKIE_CONSENT, &serialized),
            Err(err) => tracing::warn!(error = %err, "failed to persist cookie consent"),
        }
        record
    }
}
