//! Key label editing dialog

use std::sync::Arc;

use keydeck_commands::{GlobalKey, KeyCommands, UpdateKeyLabelRequest, MAX_LABEL_CHARS};
use tracing::info;

use crate::dialogs::SubmitResult;
use crate::dispatch::{CommandDispatcher, KeyCommand};
use crate::eligibility;
use crate::error::{ConsoleError, ConsoleResult};
use crate::focus::{FocusTarget, FocusTrap};
use crate::gate::ConfirmationGate;

/// Controller for the edit-label modal.
///
/// Only unattached keys may be relabeled. Input is validated locally before
/// dispatch; an invalid draft never reaches the backend.
#[derive(Debug)]
pub struct EditLabelDialog {
    key: GlobalKey,
    gate: ConfirmationGate,
    focus: FocusTrap,
    dispatcher: CommandDispatcher,
    draft: String,
    validation_error: Option<String>,
}

impl EditLabelDialog {
    /// Open the dialog. Refused at the evaluator level for attached keys.
    pub fn open(key: GlobalKey, backend: Arc<dyn KeyCommands>) -> ConsoleResult<Self> {
        if !eligibility::can_edit_label(&key) {
            return Err(ConsoleError::Ineligible(format!(
                "Key '{}' is attached to a vault and cannot be renamed",
                key.label
            )));
        }

        let draft = key.label.clone();
        let mut focus = FocusTrap::new();
        focus.activate(FocusTarget::ConfirmationInput);
        Ok(Self {
            key,
            gate: ConfirmationGate::new(),
            focus,
            dispatcher: CommandDispatcher::new(backend),
            draft,
            validation_error: None,
        })
    }

    pub fn key(&self) -> &GlobalKey {
        &self.key
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn focus(&mut self) -> &mut FocusTrap {
        &mut self.focus
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.validation_error = None;
    }

    /// Inline message from either local validation or the last failed submit
    pub fn error(&self) -> Option<&str> {
        self.validation_error.as_deref().or_else(|| self.gate.error())
    }

    fn validate(&self) -> ConsoleResult<String> {
        let trimmed = self.draft.trim();
        if trimmed.is_empty() {
            return Err(ConsoleError::Validation("Label cannot be empty".to_string()));
        }
        if trimmed.chars().count() > MAX_LABEL_CHARS {
            return Err(ConsoleError::Validation(format!(
                "Label is too long (maximum {MAX_LABEL_CHARS} characters)"
            )));
        }
        Ok(trimmed.to_string())
    }

    pub async fn submit(&mut self) -> SubmitResult {
        // Local validation happens before the gate arms; nothing invalid
        // is ever dispatched.
        let new_label = match self.validate() {
            Ok(label) => label,
            Err(error) => {
                let message = error.user_message();
                self.validation_error = Some(message.clone());
                return SubmitResult::Failed(message);
            }
        };

        if !self.gate.begin_submit() {
            return SubmitResult::NotSent;
        }

        let request = UpdateKeyLabelRequest { key_id: self.key.id.clone(), new_label };
        match self.dispatcher.dispatch(KeyCommand::UpdateLabel(request)).await {
            Ok(outcome) => {
                info!("Label updated for key: {}", self.key.id);
                self.gate.complete(Ok(()));
                self.focus.release();
                SubmitResult::Completed(outcome)
            }
            Err(error) => {
                let message = error.user_message();
                self.gate.complete(Err(message.clone()));
                SubmitResult::Failed(message)
            }
        }
    }

    /// Cancel the dialog; ignored while a request is in flight
    pub fn cancel(&mut self) -> bool {
        if self.gate.cancel() {
            self.validation_error = None;
            self.focus.release();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keydeck_commands::MockKeyBackend;

    async fn dialog_for_spare() -> (Arc<MockKeyBackend>, EditLabelDialog) {
        let backend = Arc::new(
            MockKeyBackend::with_keys(vec![MockKeyBackend::sample_key("k1", "Spare", &[])]).await,
        );
        let key = backend.get_key("k1").await.unwrap();
        let dialog =
            EditLabelDialog::open(key, Arc::clone(&backend) as Arc<dyn KeyCommands>).unwrap();
        (backend, dialog)
    }

    #[tokio::test]
    async fn test_open_refused_for_attached_key() {
        let backend = Arc::new(
            MockKeyBackend::with_keys(vec![MockKeyBackend::sample_key("k1", "Primary", &["v1"])])
                .await,
        );
        let key = backend.get_key("k1").await.unwrap();

        let error = EditLabelDialog::open(key, backend as Arc<dyn KeyCommands>).unwrap_err();
        assert!(matches!(error, ConsoleError::Ineligible(_)));
    }

    #[tokio::test]
    async fn test_validation_happens_before_dispatch() {
        let (backend, mut dialog) = dialog_for_spare().await;

        dialog.set_draft("   ");
        let result = dialog.submit().await;
        assert!(matches!(result, SubmitResult::Failed(_)));
        assert_eq!(dialog.error(), Some("Label cannot be empty"));
        assert_eq!(backend.call_count("update_key_label").await, 0);

        dialog.set_draft("x".repeat(MAX_LABEL_CHARS + 1));
        let result = dialog.submit().await;
        assert!(matches!(result, SubmitResult::Failed(_)));
        assert_eq!(backend.call_count("update_key_label").await, 0);

        // Validation errors do not disable retry
        dialog.set_draft("Offsite Backup");
        assert!(dialog.error().is_none());
        assert!(dialog.submit().await.is_completed());
        assert_eq!(backend.get_key("k1").await.unwrap().label, "Offsite Backup");
    }

    #[tokio::test]
    async fn test_draft_starts_from_current_label() {
        let (_backend, dialog) = dialog_for_spare().await;
        assert_eq!(dialog.draft(), "Spare");
    }
}
