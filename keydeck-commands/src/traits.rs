//! Command boundary trait

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    error::CommandResult,
    types::{
        DeactivateKeyRequest, DeactivateKeyResponse, DeleteKeyRequest, DeleteKeyResponse,
        GlobalKey, RestoreKeyRequest, RestoreKeyResponse, UpdateKeyLabelRequest,
        UpdateKeyLabelResponse, VaultStatistics,
    },
};

/// Contract of the external key registry backend.
///
/// Mutating operations are idempotent intents except `restore_key`. Callers
/// re-read truth through the read side after every mutation instead of
/// patching local state.
#[async_trait]
pub trait KeyCommands: Send + Sync {
    /// Deactivate a key, or destroy it immediately when
    /// `delete_immediately` is set
    async fn deactivate_key(
        &self,
        request: DeactivateKeyRequest,
    ) -> CommandResult<DeactivateKeyResponse>;

    /// Delete a key permanently
    async fn delete_key(&self, request: DeleteKeyRequest) -> CommandResult<DeleteKeyResponse>;

    /// Update the label of an unattached key
    async fn update_key_label(
        &self,
        request: UpdateKeyLabelRequest,
    ) -> CommandResult<UpdateKeyLabelResponse>;

    /// Restore a deactivated key within its grace period
    async fn restore_key(&self, request: RestoreKeyRequest) -> CommandResult<RestoreKeyResponse>;

    /// Snapshot of every key in the global registry
    async fn list_keys(&self) -> CommandResult<Vec<GlobalKey>>;

    /// Look up a single key
    async fn get_key(&self, key_id: &str) -> CommandResult<GlobalKey>;

    /// Per-vault encryption statistics, keyed by vault id
    async fn vault_statistics(&self) -> CommandResult<HashMap<String, VaultStatistics>>;
}
