//! View models for the presentation layer
//!
//! Pure derivations from registry records to what the screen renders:
//! lifecycle badges, key-type variants, compact status slots, key cards,
//! and the key menu with its per-entry enabled flags. Markup and styling
//! stay in the presentation layer.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use keydeck_commands::{GlobalKey, KeyLifecycleStatus, KeyState, KeyType, VaultStatistics};

use crate::eligibility::{display_label, KeyEligibility};

/// Label budget for a key card
pub const CARD_LABEL_CHARS: usize = 24;
/// Label budget for a key menu header
pub const MENU_LABEL_CHARS: usize = 12;
/// Label budget for a status slot
pub const SLOT_LABEL_CHARS: usize = 10;
/// Label budget for the most compact slot rendering
pub const COMPACT_SLOT_LABEL_CHARS: usize = 8;

/// Color tone of a lifecycle badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Neutral,
    Positive,
    Warning,
    Danger,
}

/// Badge rendered next to a key's label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleBadge {
    pub text: &'static str,
    pub tone: BadgeTone,
}

impl LifecycleBadge {
    pub fn for_status(status: KeyLifecycleStatus) -> Self {
        match status {
            KeyLifecycleStatus::PreActivation => Self { text: "New", tone: BadgeTone::Neutral },
            KeyLifecycleStatus::Active => Self { text: "Active", tone: BadgeTone::Positive },
            KeyLifecycleStatus::Suspended => Self { text: "Suspended", tone: BadgeTone::Warning },
            KeyLifecycleStatus::Deactivated => {
                Self { text: "Deactivated", tone: BadgeTone::Warning }
            }
            KeyLifecycleStatus::Deleted => Self { text: "Deleted", tone: BadgeTone::Neutral },
            KeyLifecycleStatus::Compromised => {
                Self { text: "Compromised", tone: BadgeTone::Danger }
            }
        }
    }
}

/// Visual variant keyed by key type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTypeVariant {
    Passphrase,
    Yubikey,
    Recipient,
}

impl KeyTypeVariant {
    pub fn for_type(key_type: &KeyType) -> Self {
        match key_type {
            KeyType::Passphrase => KeyTypeVariant::Passphrase,
            KeyType::Yubikey { .. } => KeyTypeVariant::Yubikey,
            KeyType::Recipient => KeyTypeVariant::Recipient,
        }
    }
}

/// Compact status-slot indicator; unknown state renders an empty slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotIndicator {
    Active,
    Registered,
    Orphaned,
    #[default]
    Empty,
}

impl SlotIndicator {
    pub fn from_state(state: Option<KeyState>) -> Self {
        match state {
            Some(KeyState::Active) => SlotIndicator::Active,
            Some(KeyState::Registered) => SlotIndicator::Registered,
            Some(KeyState::Orphaned) => SlotIndicator::Orphaned,
            None => SlotIndicator::Empty,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            SlotIndicator::Active => "active",
            SlotIndicator::Registered => "registered",
            SlotIndicator::Orphaned => "orphaned",
            SlotIndicator::Empty => "",
        }
    }
}

/// Compact status slot for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSlotView {
    pub label: String,
    pub indicator: SlotIndicator,
}

impl StatusSlotView {
    pub fn build(key: &GlobalKey) -> Self {
        Self {
            label: display_label(&key.label, SLOT_LABEL_CHARS),
            indicator: SlotIndicator::from_state(key.state),
        }
    }

    /// Variant for the tightest slot rendering
    pub fn build_compact(key: &GlobalKey) -> Self {
        Self {
            label: display_label(&key.label, COMPACT_SLOT_LABEL_CHARS),
            indicator: SlotIndicator::from_state(key.state),
        }
    }
}

/// Everything a key card renders
#[derive(Debug, Clone)]
pub struct KeyCardView {
    pub key_id: String,
    pub label: String,
    pub full_label: String,
    pub variant: KeyTypeVariant,
    pub badge: LifecycleBadge,
    pub eligibility: KeyEligibility,
    /// Grace countdown shown on deactivated keys
    pub grace_days_remaining: Option<u32>,
}

impl KeyCardView {
    pub fn build(
        key: &GlobalKey,
        stats: &HashMap<String, VaultStatistics>,
        now: DateTime<Utc>,
    ) -> Self {
        let eligibility = KeyEligibility::evaluate(key, stats, now);
        Self {
            key_id: key.id.clone(),
            label: display_label(&key.label, CARD_LABEL_CHARS),
            full_label: key.label.clone(),
            variant: KeyTypeVariant::for_type(&key.key_type),
            badge: LifecycleBadge::for_status(key.lifecycle_status),
            eligibility,
            grace_days_remaining: eligibility.days_remaining,
        }
    }
}

/// Actions offered by the key menu bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Deactivate,
    Delete,
    EditLabel,
    Export,
    Restore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMenuEntry {
    pub action: KeyAction,
    pub enabled: bool,
}

/// Menu bar for one key; a disabled entry is refused before any dialog or
/// dispatch exists.
#[derive(Debug, Clone)]
pub struct KeyMenuView {
    pub label: String,
    pub entries: Vec<KeyMenuEntry>,
}

impl KeyMenuView {
    pub fn build(
        key: &GlobalKey,
        stats: &HashMap<String, VaultStatistics>,
        now: DateTime<Utc>,
    ) -> Self {
        let eligibility = KeyEligibility::evaluate(key, stats, now);
        let restorable = key.lifecycle_status == KeyLifecycleStatus::Deactivated
            && eligibility.days_remaining.map(|days| days > 0).unwrap_or(false);

        let entries = vec![
            KeyMenuEntry { action: KeyAction::Deactivate, enabled: eligibility.can_deactivate },
            KeyMenuEntry {
                action: KeyAction::Delete,
                enabled: key.lifecycle_status != KeyLifecycleStatus::Deleted,
            },
            KeyMenuEntry { action: KeyAction::EditLabel, enabled: eligibility.can_edit_label },
            KeyMenuEntry { action: KeyAction::Export, enabled: !key.recipient.is_empty() },
            KeyMenuEntry { action: KeyAction::Restore, enabled: restorable },
        ];

        Self { label: display_label(&key.label, MENU_LABEL_CHARS), entries }
    }

    pub fn is_enabled(&self, action: KeyAction) -> bool {
        self.entries.iter().any(|entry| entry.action == action && entry.enabled)
    }
}
