//! End-to-end scenarios across the console layer and the mock backend

mod helpers;

use helpers::{pre_activation_key, yubikey_key, TestHelper};

use chrono::Utc;
use keydeck::view::KeyAction;
use keydeck::{
    CommandError, CommandOutcome, ConsoleError, DeactivateKeyDialog, DeleteKeyDialog,
    KeyLifecycleStatus, KeyMenuView, SubmitResult, VaultSnapshot,
};

#[tokio::test]
async fn test_delete_flow_for_unattached_key() {
    let helper = TestHelper::new(vec![pre_activation_key("k1", "Laptop")], vec![]).await;
    let key = helper.key("k1").await;
    assert_eq!(key.lifecycle_status, KeyLifecycleStatus::PreActivation);

    let mut dialog = DeleteKeyDialog::open(key, helper.commands());

    // Only the exact phrase arms the primary action
    dialog.set_confirmation_input("DELETE laptop");
    assert!(!dialog.can_submit());
    dialog.set_confirmation_input("DELETE Laptop");
    assert!(dialog.can_submit());

    let result = dialog.submit().await;
    let SubmitResult::Completed(CommandOutcome::Deleted(response)) = result else {
        panic!("expected a completed delete");
    };
    assert_eq!(response.new_status, KeyLifecycleStatus::Deleted);

    // The caller refreshes before closing; the fresh snapshot shows the
    // deleted key, and this dialog instance accepts no further submits.
    let snapshot = helper.snapshot().await;
    assert_eq!(
        snapshot.key("k1").unwrap().lifecycle_status,
        KeyLifecycleStatus::Deleted
    );
    assert!(matches!(dialog.submit().await, SubmitResult::NotSent));
    assert_eq!(helper.backend.call_count("delete_key").await, 1);
}

#[tokio::test]
async fn test_deactivation_blocked_by_encrypted_vault() {
    let helper =
        TestHelper::new(vec![yubikey_key("k1", "Primary", "31415926", &["V1"])], vec![("V1", 3)])
            .await;
    let snapshot = helper.snapshot().await;
    let key = snapshot.key("k1").unwrap().clone();

    // The menu entry is dark...
    let menu = KeyMenuView::build(&key, &snapshot.stats, Utc::now());
    assert!(!menu.is_enabled(KeyAction::Deactivate));

    // ...and the gate transition is refused at the evaluator level too
    let error =
        DeactivateKeyDialog::open(key, &snapshot.stats, helper.commands()).unwrap_err();
    assert!(matches!(error, ConsoleError::Ineligible(_)));
    assert_eq!(helper.backend.call_count("deactivate_key").await, 0);
}

#[tokio::test]
async fn test_backend_error_keeps_dialog_open_for_retry() {
    let helper = TestHelper::new(vec![pre_activation_key("k1", "Laptop")], vec![]).await;
    let key = helper.key("k1").await;
    let mut dialog = DeleteKeyDialog::open(key, helper.commands());

    helper.backend.fail_next_with(CommandError::KeyNotFound("key not found".to_string())).await;
    dialog.set_confirmation_input("DELETE Laptop");

    let SubmitResult::Failed(message) = dialog.submit().await else {
        panic!("expected a failed submit");
    };
    assert!(message.contains("key not found"));
    assert_eq!(dialog.error(), Some(message.as_str()));

    // No automatic retry happened; a second identical submit is permitted
    assert_eq!(helper.backend.call_count("delete_key").await, 1);
    assert!(dialog.submit().await.is_completed());
    assert_eq!(helper.backend.call_count("delete_key").await, 2);
}

#[tokio::test]
async fn test_snapshot_refresh_after_mutation() {
    let helper = TestHelper::new(
        vec![yubikey_key("k1", "Primary", "31415926", &["V1"]), pre_activation_key("k2", "Spare")],
        vec![("V1", 0)],
    )
    .await;

    let before = helper.snapshot().await;
    let key = before.key("k1").unwrap().clone();
    assert!(before.eligibility(&key).can_deactivate);

    let mut dialog = DeactivateKeyDialog::open(key, &before.stats, helper.commands()).unwrap();
    assert!(dialog.submit().await.is_completed());

    // The stale snapshot still says Active; a fresh pull is the only way to
    // observe the transition.
    assert_eq!(
        before.key("k1").unwrap().lifecycle_status,
        KeyLifecycleStatus::Active
    );
    let after = VaultSnapshot::fetch(helper.backend.as_ref()).await.unwrap();
    let refreshed = after.key("k1").unwrap();
    assert_eq!(refreshed.lifecycle_status, KeyLifecycleStatus::Deactivated);
    assert_eq!(after.eligibility(refreshed).days_remaining, Some(30));
}
