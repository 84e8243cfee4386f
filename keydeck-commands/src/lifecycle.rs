//! Key lifecycle states and transition rules
//!
//! Single source of truth for the lifecycle of every key the console can
//! see. The console never transitions a key itself; it requests the change
//! through the command layer and re-reads truth from the backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states for registry keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyLifecycleStatus {
    /// Key generated but never attached to a vault
    PreActivation,

    /// Currently attached to vault(s) and available for operations
    Active,

    /// Temporarily disabled but can be reactivated
    Suspended,

    /// Disabled with a 30-day grace period before permanent removal
    Deactivated,

    /// Permanently removed, only metadata remains
    Deleted,

    /// Security breach detected, key must not be used
    Compromised,
}

impl KeyLifecycleStatus {
    /// Check if a transition from current state to target state is valid
    pub fn can_transition_to(&self, target: KeyLifecycleStatus) -> bool {
        use KeyLifecycleStatus::*;
        match (*self, target) {
            (PreActivation, Active) => true,

            (Active, Suspended) => true,
            (Active, Deactivated) => true,
            (Active, Compromised) => true,

            (Suspended, Active) => true,
            (Suspended, Deactivated) => true,
            (Suspended, Compromised) => true,

            // Restore within the grace period
            (Deactivated, Active) => true,

            // Immediate destruction is reachable from every live state
            (Deleted, _) => false,
            (_, Deleted) => true,

            _ => false,
        }
    }

    /// User-facing badge text
    pub fn display_text(&self) -> &str {
        match self {
            KeyLifecycleStatus::PreActivation => "New",
            KeyLifecycleStatus::Active => "Active",
            KeyLifecycleStatus::Suspended => "Suspended",
            KeyLifecycleStatus::Deactivated => "Deactivated",
            KeyLifecycleStatus::Deleted => "Deleted",
            KeyLifecycleStatus::Compromised => "Compromised",
        }
    }

    /// Check if the key can be used for encryption operations
    pub fn is_operational(&self) -> bool {
        matches!(self, KeyLifecycleStatus::Active)
    }

    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, KeyLifecycleStatus::Deleted)
    }
}

impl fmt::Display for KeyLifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(KeyLifecycleStatus::PreActivation.can_transition_to(KeyLifecycleStatus::Active));
        assert!(KeyLifecycleStatus::PreActivation.can_transition_to(KeyLifecycleStatus::Deleted));

        assert!(KeyLifecycleStatus::Active.can_transition_to(KeyLifecycleStatus::Suspended));
        assert!(KeyLifecycleStatus::Active.can_transition_to(KeyLifecycleStatus::Deactivated));
        assert!(KeyLifecycleStatus::Active.can_transition_to(KeyLifecycleStatus::Compromised));
        assert!(KeyLifecycleStatus::Active.can_transition_to(KeyLifecycleStatus::Deleted));

        assert!(KeyLifecycleStatus::Suspended.can_transition_to(KeyLifecycleStatus::Active));
        assert!(KeyLifecycleStatus::Suspended.can_transition_to(KeyLifecycleStatus::Deactivated));

        // Restore path
        assert!(KeyLifecycleStatus::Deactivated.can_transition_to(KeyLifecycleStatus::Active));
        assert!(KeyLifecycleStatus::Deactivated.can_transition_to(KeyLifecycleStatus::Deleted));

        assert!(KeyLifecycleStatus::Compromised.can_transition_to(KeyLifecycleStatus::Deleted));
    }

    #[test]
    fn test_invalid_transitions() {
        // Cannot go backward
        assert!(!KeyLifecycleStatus::Active.can_transition_to(KeyLifecycleStatus::PreActivation));
        assert!(
            !KeyLifecycleStatus::Deactivated.can_transition_to(KeyLifecycleStatus::Suspended)
        );

        // Cannot skip states
        assert!(
            !KeyLifecycleStatus::PreActivation.can_transition_to(KeyLifecycleStatus::Suspended)
        );
        assert!(
            !KeyLifecycleStatus::PreActivation.can_transition_to(KeyLifecycleStatus::Deactivated)
        );

        // Deleted is final
        assert!(!KeyLifecycleStatus::Deleted.can_transition_to(KeyLifecycleStatus::Active));
        assert!(!KeyLifecycleStatus::Deleted.can_transition_to(KeyLifecycleStatus::Deleted));

        // No self-transitions
        assert!(!KeyLifecycleStatus::Active.can_transition_to(KeyLifecycleStatus::Active));
    }

    #[test]
    fn test_operational_status() {
        assert!(KeyLifecycleStatus::Active.is_operational());
        assert!(!KeyLifecycleStatus::PreActivation.is_operational());
        assert!(!KeyLifecycleStatus::Suspended.is_operational());
        assert!(!KeyLifecycleStatus::Deactivated.is_operational());
        assert!(!KeyLifecycleStatus::Compromised.is_operational());
    }

    #[test]
    fn test_terminal_states() {
        assert!(KeyLifecycleStatus::Deleted.is_terminal());
        assert!(!KeyLifecycleStatus::Deactivated.is_terminal());
        assert!(!KeyLifecycleStatus::Compromised.is_terminal());
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(KeyLifecycleStatus::Active.to_string(), "Active");
        assert_eq!(KeyLifecycleStatus::PreActivation.display_text(), "New");
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&KeyLifecycleStatus::Deleted).unwrap();
        assert_eq!(json, "\"deleted\"");
        let json = serde_json::to_string(&KeyLifecycleStatus::PreActivation).unwrap();
        assert_eq!(json, "\"pre_activation\"");
    }
}
