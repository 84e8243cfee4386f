//! Mock key registry backend for testing
//!
//! Implements the full command contract over an in-memory registry,
//! including transition validation, idempotency, and label rules, so the
//! console layer can be exercised without a real backend.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    error::{CommandError, CommandResult},
    lifecycle::KeyLifecycleStatus,
    traits::KeyCommands,
    types::*,
};

use async_trait::async_trait;

/// In-memory registry backend
pub struct MockKeyBackend {
    keys: Mutex<HashMap<String, GlobalKey>>,
    stats: Mutex<HashMap<String, VaultStatistics>>,
    /// Error returned by the next command instead of executing it
    fail_next: Mutex<Option<CommandError>>,
    /// Names of every command invoked, in order
    op_log: Mutex<Vec<String>>,
}

impl Default for MockKeyBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockKeyBackend {
    pub fn new() -> Self {
        Self {
            keys: Mutex::new(HashMap::new()),
            stats: Mutex::new(HashMap::new()),
            fail_next: Mutex::new(None),
            op_log: Mutex::new(Vec::new()),
        }
    }

    /// Create a backend seeded with the given keys
    pub async fn with_keys(keys: Vec<GlobalKey>) -> Self {
        let backend = Self::new();
        for key in keys {
            backend.insert_key(key).await;
        }
        backend
    }

    pub async fn insert_key(&self, key: GlobalKey) {
        self.keys.lock().await.insert(key.id.clone(), key);
    }

    pub async fn set_statistics(&self, stats: Vec<VaultStatistics>) {
        let mut map = self.stats.lock().await;
        map.clear();
        for entry in stats {
            map.insert(entry.vault_id.clone(), entry);
        }
    }

    /// Script the next command to fail with `error`
    pub async fn fail_next_with(&self, error: CommandError) {
        *self.fail_next.lock().await = Some(error);
    }

    /// Names of every command invoked so far, in order
    pub async fn op_log(&self) -> Vec<String> {
        self.op_log.lock().await.clone()
    }

    /// Number of invocations of the named command
    pub async fn call_count(&self, op: &str) -> usize {
        self.op_log.lock().await.iter().filter(|entry| entry.as_str() == op).count()
    }

    /// Mint an active passphrase key attached to the given vaults
    pub fn sample_key(id: &str, label: &str, vaults: &[&str]) -> GlobalKey {
        GlobalKey {
            id: id.to_string(),
            label: label.to_string(),
            key_type: KeyType::Passphrase,
            lifecycle_status: if vaults.is_empty() {
                KeyLifecycleStatus::PreActivation
            } else {
                KeyLifecycleStatus::Active
            },
            deactivated_at: None,
            vault_associations: vaults.iter().map(|v| v.to_string()).collect(),
            recipient: format!("age1{}", uuid::Uuid::new_v4().simple()),
            state: if vaults.is_empty() { Some(KeyState::Orphaned) } else { Some(KeyState::Active) },
            created_at: Utc::now(),
            last_used: None,
        }
    }

    async fn record_call(&self, op: &'static str) -> CommandResult<()> {
        self.op_log.lock().await.push(op.to_string());
        if let Some(error) = self.fail_next.lock().await.take() {
            warn!("Mock backend failing {} with scripted error: {}", op, error);
            return Err(error);
        }
        Ok(())
    }
}

#[async_trait]
impl KeyCommands for MockKeyBackend {
    async fn deactivate_key(
        &self,
        request: DeactivateKeyRequest,
    ) -> CommandResult<DeactivateKeyResponse> {
        self.record_call("deactivate_key").await?;
        debug!(
            "Deactivating key: {} (delete_immediately: {})",
            request.key_id, request.delete_immediately
        );

        if request.key_id.is_empty() {
            return Err(CommandError::InvalidInput("Key ID cannot be empty".to_string()));
        }

        let mut keys = self.keys.lock().await;
        let key = keys
            .get_mut(&request.key_id)
            .ok_or_else(|| CommandError::KeyNotFound(request.key_id.clone()))?;

        if request.delete_immediately {
            // Idempotent: destroying an already-deleted key succeeds
            if key.lifecycle_status == KeyLifecycleStatus::Deleted {
                return Ok(DeactivateKeyResponse {
                    key_id: request.key_id,
                    new_status: KeyLifecycleStatus::Deleted,
                    deactivated_at: Utc::now(),
                    deletion_scheduled_at: None,
                });
            }

            key.lifecycle_status = KeyLifecycleStatus::Deleted;
            key.deactivated_at = None;
            key.state = None;

            info!("Key destroyed immediately: {}", request.key_id);
            return Ok(DeactivateKeyResponse {
                key_id: request.key_id,
                new_status: KeyLifecycleStatus::Deleted,
                deactivated_at: Utc::now(),
                deletion_scheduled_at: None,
            });
        }

        // Idempotent: an already-deactivated key keeps its original window
        if key.lifecycle_status == KeyLifecycleStatus::Deactivated {
            if let Some(deactivated_at) = key.deactivated_at {
                return Ok(DeactivateKeyResponse {
                    key_id: request.key_id,
                    new_status: KeyLifecycleStatus::Deactivated,
                    deactivated_at,
                    deletion_scheduled_at: Some(deactivated_at + Duration::days(GRACE_PERIOD_DAYS)),
                });
            }
        }

        if !key.lifecycle_status.can_transition_to(KeyLifecycleStatus::Deactivated) {
            return Err(CommandError::InvalidKeyState(format!(
                "Key '{}' cannot be deactivated from state {:?}",
                key.label, key.lifecycle_status
            )));
        }

        let deactivated_at = Utc::now();
        key.lifecycle_status = KeyLifecycleStatus::Deactivated;
        key.deactivated_at = Some(deactivated_at);

        info!("Key deactivated with grace period: {}", request.key_id);
        Ok(DeactivateKeyResponse {
            key_id: request.key_id,
            new_status: KeyLifecycleStatus::Deactivated,
            deactivated_at,
            deletion_scheduled_at: Some(deactivated_at + Duration::days(GRACE_PERIOD_DAYS)),
        })
    }

    async fn delete_key(&self, request: DeleteKeyRequest) -> CommandResult<DeleteKeyResponse> {
        self.record_call("delete_key").await?;
        debug!("Deleting key: {}", request.key_id);

        if request.key_id.is_empty() {
            return Err(CommandError::InvalidInput("Key ID cannot be empty".to_string()));
        }

        let mut keys = self.keys.lock().await;
        let key = keys
            .get_mut(&request.key_id)
            .ok_or_else(|| CommandError::KeyNotFound(request.key_id.clone()))?;

        // Idempotent: deleting an already-deleted key succeeds
        if key.lifecycle_status != KeyLifecycleStatus::Deleted {
            key.lifecycle_status = KeyLifecycleStatus::Deleted;
            key.deactivated_at = None;
            key.state = None;
            info!("Key deleted permanently: {}", request.key_id);
        }

        Ok(DeleteKeyResponse {
            key_id: request.key_id,
            new_status: KeyLifecycleStatus::Deleted,
            deleted_at: Utc::now(),
        })
    }

    async fn update_key_label(
        &self,
        request: UpdateKeyLabelRequest,
    ) -> CommandResult<UpdateKeyLabelResponse> {
        self.record_call("update_key_label").await?;
        debug!("Updating label for key: {}", request.key_id);

        if request.key_id.is_empty() {
            return Err(CommandError::InvalidInput("Key ID cannot be empty".to_string()));
        }

        let trimmed = request.new_label.trim();
        if trimmed.is_empty() {
            return Err(CommandError::InvalidInput("New label cannot be empty".to_string()));
        }
        if trimmed.chars().count() > MAX_LABEL_CHARS {
            return Err(CommandError::InvalidInput(format!(
                "Label is too long ({} characters, maximum {})",
                trimmed.chars().count(),
                MAX_LABEL_CHARS
            )));
        }

        let mut keys = self.keys.lock().await;
        let key = keys
            .get_mut(&request.key_id)
            .ok_or_else(|| CommandError::KeyNotFound(request.key_id.clone()))?;

        // Attached keys carry their label inside vault manifests; renaming
        // them would desynchronize the registry from the manifests.
        if !key.vault_associations.is_empty() {
            return Err(CommandError::InvalidKeyState(
                "Cannot rename keys that are attached to vaults".to_string(),
            ));
        }

        if key.label != trimmed {
            key.label = trimmed.to_string();
            info!("Key label updated: {} -> {}", request.key_id, trimmed);
        }

        Ok(UpdateKeyLabelResponse {
            key_id: request.key_id,
            updated_label: trimmed.to_string(),
        })
    }

    async fn restore_key(&self, request: RestoreKeyRequest) -> CommandResult<RestoreKeyResponse> {
        self.record_call("restore_key").await?;
        debug!("Restoring key: {}", request.key_id);

        if request.key_id.is_empty() {
            return Err(CommandError::InvalidInput("Key ID cannot be empty".to_string()));
        }

        let mut keys = self.keys.lock().await;
        let key = keys
            .get_mut(&request.key_id)
            .ok_or_else(|| CommandError::KeyNotFound(request.key_id.clone()))?;

        if key.lifecycle_status != KeyLifecycleStatus::Deactivated {
            return Err(CommandError::InvalidKeyState(format!(
                "Key '{}' is not deactivated and cannot be restored. Current state: {:?}",
                key.label, key.lifecycle_status
            )));
        }

        key.lifecycle_status = KeyLifecycleStatus::Active;
        key.deactivated_at = None;

        info!("Key restored: {}", request.key_id);
        Ok(RestoreKeyResponse {
            key_id: request.key_id,
            new_status: KeyLifecycleStatus::Active,
            restored_at: Utc::now(),
        })
    }

    async fn list_keys(&self) -> CommandResult<Vec<GlobalKey>> {
        let keys = self.keys.lock().await;
        let mut list: Vec<GlobalKey> = keys.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(list)
    }

    async fn get_key(&self, key_id: &str) -> CommandResult<GlobalKey> {
        let keys = self.keys.lock().await;
        keys.get(key_id).cloned().ok_or_else(|| CommandError::KeyNotFound(key_id.to_string()))
    }

    async fn vault_statistics(&self) -> CommandResult<HashMap<String, VaultStatistics>> {
        Ok(self.stats.lock().await.clone())
    }
}
