//! Read-only view of the key registry
//!
//! The console treats the registry as eventually consistent: after every
//! mutating command it fetches a fresh snapshot and re-renders from that,
//! instead of patching the previous one in place.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use keydeck_commands::{GlobalKey, KeyCommands, VaultStatistics};

use crate::eligibility::KeyEligibility;
use crate::error::ConsoleResult;

#[derive(Debug, Clone)]
pub struct VaultSnapshot {
    pub keys: Vec<GlobalKey>,
    pub stats: HashMap<String, VaultStatistics>,
    pub fetched_at: DateTime<Utc>,
}

impl VaultSnapshot {
    /// Pull a fresh snapshot from the backend
    pub async fn fetch(backend: &dyn KeyCommands) -> ConsoleResult<Self> {
        let keys = backend.list_keys().await?;
        let stats = backend.vault_statistics().await?;
        Ok(Self { keys, stats, fetched_at: Utc::now() })
    }

    pub fn key(&self, key_id: &str) -> Option<&GlobalKey> {
        self.keys.iter().find(|key| key.id == key_id)
    }

    /// Eligibility flags for a key against this snapshot, evaluated at `now`
    pub fn eligibility_at(&self, key: &GlobalKey, now: DateTime<Utc>) -> KeyEligibility {
        KeyEligibility::evaluate(key, &self.stats, now)
    }

    /// Eligibility flags for a key against this snapshot
    pub fn eligibility(&self, key: &GlobalKey) -> KeyEligibility {
        self.eligibility_at(key, Utc::now())
    }
}
