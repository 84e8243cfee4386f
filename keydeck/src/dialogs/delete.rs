//! Permanent key deletion dialog

use std::sync::Arc;

use keydeck_commands::{DeleteKeyRequest, GlobalKey, KeyCommands};
use tracing::info;

use crate::dialogs::SubmitResult;
use crate::dispatch::{CommandDispatcher, KeyCommand};
use crate::focus::{FocusTarget, FocusTrap};
use crate::gate::ConfirmationGate;

/// Controller for the delete-key modal.
///
/// Deletion is always permanent, so the gate always requires the typed
/// `"DELETE {label}"` phrase before the primary action arms.
pub struct DeleteKeyDialog {
    key: GlobalKey,
    gate: ConfirmationGate,
    focus: FocusTrap,
    dispatcher: CommandDispatcher,
    reason: Option<String>,
}

impl DeleteKeyDialog {
    pub fn open(key: GlobalKey, backend: Arc<dyn KeyCommands>) -> Self {
        let gate = ConfirmationGate::for_label(&key.label);
        let mut focus = FocusTrap::new();
        focus.activate(FocusTarget::ConfirmationInput);
        Self { key, gate, focus, dispatcher: CommandDispatcher::new(backend), reason: None }
    }

    pub fn key(&self) -> &GlobalKey {
        &self.key
    }

    pub fn gate(&self) -> &ConfirmationGate {
        &self.gate
    }

    pub fn focus(&mut self) -> &mut FocusTrap {
        &mut self.focus
    }

    pub fn set_reason(&mut self, reason: Option<String>) {
        self.reason = reason;
    }

    pub fn set_confirmation_input(&mut self, text: impl Into<String>) {
        self.gate.set_input(text);
    }

    pub fn can_submit(&self) -> bool {
        self.gate.can_submit()
    }

    pub fn error(&self) -> Option<&str> {
        self.gate.error()
    }

    pub async fn submit(&mut self) -> SubmitResult {
        if !self.gate.begin_submit() {
            return SubmitResult::NotSent;
        }

        let request =
            DeleteKeyRequest { key_id: self.key.id.clone(), reason: self.reason.clone() };
        match self.dispatcher.dispatch(KeyCommand::Delete(request)).await {
            Ok(outcome) => {
                info!("Delete confirmed for key: {}", self.key.id);
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
            self.focus.release();
            true
        } else {
            false
        }
    }
}
