//! Key restoration flow
//!
//! Restore is a single-shot action on a deactivated key's card rather than
//! a full modal: no confirmation phrase, one dispatch, and the caller
//! refreshes its snapshot on success.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use keydeck_commands::{GlobalKey, KeyCommands, KeyLifecycleStatus, RestoreKeyRequest};
use tracing::info;

use crate::dialogs::SubmitResult;
use crate::dispatch::{CommandDispatcher, KeyCommand};
use crate::eligibility;
use crate::error::{ConsoleError, ConsoleResult};

#[derive(Debug)]
pub struct RestoreKeyFlow {
    key: GlobalKey,
    dispatcher: CommandDispatcher,
    completed: bool,
    last_error: Option<String>,
}

impl RestoreKeyFlow {
    /// Start a restore. Refused unless the key is deactivated with grace
    /// time left.
    pub fn open(
        key: GlobalKey,
        now: DateTime<Utc>,
        backend: Arc<dyn KeyCommands>,
    ) -> ConsoleResult<Self> {
        let within_grace = key.lifecycle_status == KeyLifecycleStatus::Deactivated
            && key
                .deactivated_at
                .map(|at| eligibility::days_remaining(at, now) > 0)
                .unwrap_or(false);
        if !within_grace {
            return Err(ConsoleError::Ineligible(format!(
                "Key '{}' is not within its restore window",
                key.label
            )));
        }

        Ok(Self {
            key,
            dispatcher: CommandDispatcher::new(backend),
            completed: false,
            last_error: None,
        })
    }

    pub fn key(&self) -> &GlobalKey {
        &self.key
    }

    pub fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub async fn submit(&mut self) -> SubmitResult {
        if self.completed {
            return SubmitResult::NotSent;
        }

        let request = RestoreKeyRequest { key_id: self.key.id.clone() };
        match self.dispatcher.dispatch(KeyCommand::Restore(request)).await {
            Ok(outcome) => {
                info!("Key restored: {}", self.key.id);
                self.completed = true;
                self.last_error = None;
                SubmitResult::Completed(outcome)
            }
            Err(ConsoleError::Busy) => SubmitResult::NotSent,
            Err(error) => {
                let message = error.user_message();
                self.last_error = Some(message.clone());
                SubmitResult::Failed(message)
            }
        }
    }
}
