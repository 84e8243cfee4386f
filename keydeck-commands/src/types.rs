//! Domain records and command payloads exchanged with the key registry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lifecycle::KeyLifecycleStatus;

/// Days between deactivation and permanent removal.
pub const GRACE_PERIOD_DAYS: i64 = 30;

/// Maximum length of a key label, in characters.
pub const MAX_LABEL_CHARS: usize = 128;

/// Type of key with type-specific data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KeyType {
    /// Passphrase-protected key file
    Passphrase,

    /// YubiKey hardware token
    Yubikey { serial: String, slot_index: u8 },

    /// Bare public-key recipient
    Recipient,
}

/// Availability of a key in relation to the current vault.
///
/// Used only for compact status-slot rendering; an absent state renders an
/// empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyState {
    /// Key is available and can be used
    Active,

    /// Key is registered but not currently available (e.g., token removed)
    Registered,

    /// Key exists but is not associated with any vault
    Orphaned,
}

/// A key record as the global registry reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalKey {
    /// Unique identifier for this key
    pub id: String,

    /// User-friendly label
    pub label: String,

    #[serde(flatten)]
    pub key_type: KeyType,

    pub lifecycle_status: KeyLifecycleStatus,

    /// Set if and only if `lifecycle_status` is `Deactivated`
    pub deactivated_at: Option<DateTime<Utc>>,

    /// Vault ids this key is attached to; empty means unattached
    pub vault_associations: Vec<String>,

    /// Public recipient string used for encryption
    pub recipient: String,

    /// Availability relation to the current vault, if known
    pub state: Option<KeyState>,

    pub created_at: DateTime<Utc>,

    pub last_used: Option<DateTime<Utc>>,
}

impl GlobalKey {
    /// Check if this key is attached to no vault
    pub fn is_unattached(&self) -> bool {
        self.vault_associations.is_empty()
    }

    /// Check if this is a passphrase key
    pub fn is_passphrase(&self) -> bool {
        matches!(self.key_type, KeyType::Passphrase)
    }

    /// Check if this is a YubiKey
    pub fn is_yubikey(&self) -> bool {
        matches!(self.key_type, KeyType::Yubikey { .. })
    }

    /// Get YubiKey serial if this is a YubiKey
    pub fn yubikey_serial(&self) -> Option<&str> {
        match &self.key_type {
            KeyType::Yubikey { serial, .. } => Some(serial),
            _ => None,
        }
    }
}

/// Per-vault encryption statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultStatistics {
    pub vault_id: String,
    pub encryption_count: u32,
}

/// Request to deactivate a key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeactivateKeyRequest {
    /// The key ID to deactivate
    pub key_id: String,
    /// Reason for deactivation (optional, for audit trail)
    pub reason: Option<String>,
    /// If true, destroy the key immediately instead of starting the
    /// 30-day grace period
    #[serde(default)]
    pub delete_immediately: bool,
}

/// Response from key deactivation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeactivateKeyResponse {
    pub key_id: String,
    pub new_status: KeyLifecycleStatus,
    pub deactivated_at: DateTime<Utc>,
    /// When the key will be permanently removed; `None` when the key was
    /// destroyed immediately
    pub deletion_scheduled_at: Option<DateTime<Utc>>,
}

/// Request to delete a key permanently
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteKeyRequest {
    /// The key ID to delete
    pub key_id: String,
    /// Reason for deletion (optional, for audit trail)
    pub reason: Option<String>,
}

/// Response from key deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteKeyResponse {
    pub key_id: String,
    pub new_status: KeyLifecycleStatus,
    pub deleted_at: DateTime<Utc>,
}

/// Request to update a key's label in the global registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateKeyLabelRequest {
    /// The key ID to update
    pub key_id: String,
    /// The new label for the key
    pub new_label: String,
}

/// Response from a label update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateKeyLabelResponse {
    pub key_id: String,
    pub updated_label: String,
}

/// Request to restore a deactivated key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreKeyRequest {
    /// The key ID to restore
    pub key_id: String,
}

/// Response from key restoration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreKeyResponse {
    pub key_id: String,
    pub new_status: KeyLifecycleStatus,
    pub restored_at: DateTime<Utc>,
}
