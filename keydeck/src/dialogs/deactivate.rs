//! Key deactivation dialog

use std::collections::HashMap;
use std::sync::Arc;

use keydeck_commands::{DeactivateKeyRequest, GlobalKey, KeyCommands, VaultStatistics};
use tracing::info;

use crate::dialogs::SubmitResult;
use crate::dispatch::{CommandDispatcher, KeyCommand};
use crate::eligibility;
use crate::error::{ConsoleError, ConsoleResult};
use crate::focus::{FocusTarget, FocusTrap};
use crate::gate::{self, ConfirmationGate};

/// Controller for the deactivate-key modal.
///
/// Normal deactivation is reversible for 30 days and needs no typed
/// confirmation. Ticking the immediate-delete checkbox makes the action
/// permanent and arms the same `"DELETE {label}"` gate the delete dialog
/// uses.
#[derive(Debug)]
pub struct DeactivateKeyDialog {
    key: GlobalKey,
    gate: ConfirmationGate,
    focus: FocusTrap,
    dispatcher: CommandDispatcher,
    reason: Option<String>,
    delete_immediately: bool,
}

impl DeactivateKeyDialog {
    /// Open the dialog. Refused at the evaluator level, not just the view,
    /// when the key is already deactivated or committed to sealed data.
    pub fn open(
        key: GlobalKey,
        stats: &HashMap<String, VaultStatistics>,
        backend: Arc<dyn KeyCommands>,
    ) -> ConsoleResult<Self> {
        if !eligibility::can_deactivate(&key, stats) {
            return Err(ConsoleError::Ineligible(format!(
                "Key '{}' cannot be deactivated",
                key.label
            )));
        }

        let mut focus = FocusTrap::new();
        focus.activate(FocusTarget::PrimaryAction);
        Ok(Self {
            key,
            gate: ConfirmationGate::new(),
            focus,
            dispatcher: CommandDispatcher::new(backend),
            reason: None,
            delete_immediately: false,
        })
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

    pub fn delete_immediately(&self) -> bool {
        self.delete_immediately
    }

    pub fn set_reason(&mut self, reason: Option<String>) {
        self.reason = reason;
    }

    /// Toggle the immediate-delete checkbox. Arming it requires the
    /// confirmation phrase to be typed out; disarming drops the requirement.
    pub fn set_delete_immediately(&mut self, immediate: bool) {
        if self.delete_immediately == immediate {
            return;
        }
        self.delete_immediately = immediate;
        if immediate {
            self.gate.set_requirement(Some(gate::required_phrase(&self.key.label)));
            self.focus.activate(FocusTarget::ConfirmationInput);
        } else {
            self.gate.set_requirement(None);
            self.focus.activate(FocusTarget::PrimaryAction);
        }
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

        let request = DeactivateKeyRequest {
            key_id: self.key.id.clone(),
            reason: self.reason.clone(),
            delete_immediately: self.delete_immediately,
        };
        match self.dispatcher.dispatch(KeyCommand::Deactivate(request)).await {
            Ok(outcome) => {
                info!(
                    "Deactivation confirmed for key: {} (immediate: {})",
                    self.key.id, self.delete_immediately
                );
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
