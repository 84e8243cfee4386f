//! Test helpers for driving the console against the mock backend

use std::sync::Arc;

use chrono::Utc;
use keydeck::{GlobalKey, KeyCommands, KeyLifecycleStatus, KeyState, KeyType, VaultSnapshot};
use keydeck_commands::{MockKeyBackend, VaultStatistics};

/// Seeded backend plus convenience accessors
pub struct TestHelper {
    pub backend: Arc<MockKeyBackend>,
}

impl TestHelper {
    pub async fn new(keys: Vec<GlobalKey>, stats: Vec<(&str, u32)>) -> Self {
        let backend = MockKeyBackend::with_keys(keys).await;
        backend
            .set_statistics(
                stats
                    .into_iter()
                    .map(|(vault_id, count)| VaultStatistics {
                        vault_id: vault_id.to_string(),
                        encryption_count: count,
                    })
                    .collect(),
            )
            .await;
        Self { backend: Arc::new(backend) }
    }

    pub fn commands(&self) -> Arc<dyn KeyCommands> {
        Arc::clone(&self.backend) as Arc<dyn KeyCommands>
    }

    pub async fn snapshot(&self) -> VaultSnapshot {
        VaultSnapshot::fetch(self.backend.as_ref()).await.expect("snapshot fetch")
    }

    pub async fn key(&self, key_id: &str) -> GlobalKey {
        self.backend.get_key(key_id).await.expect("seeded key")
    }
}

/// Unattached passphrase key that was never used
pub fn pre_activation_key(id: &str, label: &str) -> GlobalKey {
    GlobalKey {
        id: id.to_string(),
        label: label.to_string(),
        key_type: KeyType::Passphrase,
        lifecycle_status: KeyLifecycleStatus::PreActivation,
        deactivated_at: None,
        vault_associations: Vec::new(),
        recipient: format!("age1{id}"),
        state: Some(KeyState::Orphaned),
        created_at: Utc::now(),
        last_used: None,
    }
}

/// Active YubiKey attached to the given vaults
pub fn yubikey_key(id: &str, label: &str, serial: &str, vaults: &[&str]) -> GlobalKey {
    GlobalKey {
        id: id.to_string(),
        label: label.to_string(),
        key_type: KeyType::Yubikey { serial: serial.to_string(), slot_index: 1 },
        lifecycle_status: KeyLifecycleStatus::Active,
        deactivated_at: None,
        vault_associations: vaults.iter().map(|v| v.to_string()).collect(),
        recipient: format!("age1yubikey{id}"),
        state: Some(KeyState::Active),
        created_at: Utc::now(),
        last_used: Some(Utc::now()),
    }
}
