//! Key eligibility derivation
//!
//! Pure functions from a key record plus a vault-statistics snapshot to the
//! flags the screen renders. Nothing here is cached; every render or
//! decision point recomputes from the snapshot it was handed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use keydeck_commands::{GlobalKey, KeyLifecycleStatus, VaultStatistics, GRACE_PERIOD_DAYS};

/// Check whether any vault this key is attached to has been encrypted.
///
/// Missing statistics count as unused, so the deactivate action stays
/// available while the numbers are still loading.
pub fn is_key_used_in_envelope(
    key: &GlobalKey,
    stats: &HashMap<String, VaultStatistics>,
) -> bool {
    key.vault_associations
        .iter()
        .any(|vault_id| stats.get(vault_id).map(|s| s.encryption_count > 0).unwrap_or(false))
}

/// Check whether the deactivate action is offered for this key
pub fn can_deactivate(key: &GlobalKey, stats: &HashMap<String, VaultStatistics>) -> bool {
    key.lifecycle_status != KeyLifecycleStatus::Deactivated && !is_key_used_in_envelope(key, stats)
}

/// Only fully unattached keys may be relabeled; attached keys carry their
/// label inside vault manifests.
pub fn can_edit_label(key: &GlobalKey) -> bool {
    key.vault_associations.is_empty()
}

/// Days left in the grace period, clamped to `[0, 30]`
pub fn days_remaining(deactivated_at: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let elapsed_days = (now - deactivated_at).num_days();
    (GRACE_PERIOD_DAYS - elapsed_days).clamp(0, GRACE_PERIOD_DAYS) as u32
}

/// Truncate a label for a rendering context.
///
/// Returns the label unchanged when it fits, otherwise the first `max_len`
/// characters followed by `"..."`. Callers pick the limit per context.
pub fn display_label(label: &str, max_len: usize) -> String {
    if label.chars().count() <= max_len {
        label.to_string()
    } else {
        let mut truncated: String = label.chars().take(max_len).collect();
        truncated.push_str("...");
        truncated
    }
}

/// Derived flags for one render pass over a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEligibility {
    pub used_in_envelope: bool,
    pub can_deactivate: bool,
    pub can_edit_label: bool,
    /// Days left in the grace period; `None` unless the key is deactivated
    pub days_remaining: Option<u32>,
}

impl KeyEligibility {
    pub fn evaluate(
        key: &GlobalKey,
        stats: &HashMap<String, VaultStatistics>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            used_in_envelope: is_key_used_in_envelope(key, stats),
            can_deactivate: can_deactivate(key, stats),
            can_edit_label: can_edit_label(key),
            days_remaining: key.deactivated_at.map(|at| days_remaining(at, now)),
        }
    }
}
