//! Single-flight command dispatch
//!
//! One dispatcher per dialog instance. It issues exactly one backend call
//! at a time, applies a timeout so a hung request cannot pin a dialog in
//! its submitting state forever, and maps every failure into something the
//! dialog can surface.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, error, info};

use keydeck_commands::{
    DeactivateKeyRequest, DeactivateKeyResponse, DeleteKeyRequest, DeleteKeyResponse, KeyCommands,
    RestoreKeyRequest, RestoreKeyResponse, UpdateKeyLabelRequest, UpdateKeyLabelResponse,
};

use crate::error::{ConsoleError, ConsoleResult};

/// Ceiling on a single backend call
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// One mutating intent against the key registry
#[derive(Debug, Clone)]
pub enum KeyCommand {
    Deactivate(DeactivateKeyRequest),
    Delete(DeleteKeyRequest),
    UpdateLabel(UpdateKeyLabelRequest),
    Restore(RestoreKeyRequest),
}

impl KeyCommand {
    pub fn name(&self) -> &'static str {
        match self {
            KeyCommand::Deactivate(_) => "deactivate_key",
            KeyCommand::Delete(_) => "delete_key",
            KeyCommand::UpdateLabel(_) => "update_key_label",
            KeyCommand::Restore(_) => "restore_key",
        }
    }

    pub fn key_id(&self) -> &str {
        match self {
            KeyCommand::Deactivate(request) => &request.key_id,
            KeyCommand::Delete(request) => &request.key_id,
            KeyCommand::UpdateLabel(request) => &request.key_id,
            KeyCommand::Restore(request) => &request.key_id,
        }
    }
}

/// Successful result of a dispatched command
#[derive(Debug, Clone)]
pub enum CommandOutcome {
    Deactivated(DeactivateKeyResponse),
    Deleted(DeleteKeyResponse),
    LabelUpdated(UpdateKeyLabelResponse),
    Restored(RestoreKeyResponse),
}

pub struct CommandDispatcher {
    backend: Arc<dyn KeyCommands>,
    timeout: Duration,
    in_flight: AtomicBool,
}

impl std::fmt::Debug for CommandDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDispatcher")
            .field("timeout", &self.timeout)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

impl CommandDispatcher {
    pub fn new(backend: Arc<dyn KeyCommands>) -> Self {
        Self::with_timeout(backend, DEFAULT_COMMAND_TIMEOUT)
    }

    pub fn with_timeout(backend: Arc<dyn KeyCommands>, timeout: Duration) -> Self {
        Self { backend, timeout, in_flight: AtomicBool::new(false) }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Issue one command. A dispatch while another call is in flight is a
    /// no-op returning `ConsoleError::Busy`; retries are always a fresh
    /// user-initiated dispatch, never automatic.
    pub async fn dispatch(&self, command: KeyCommand) -> ConsoleResult<CommandOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Ignoring re-entrant dispatch of {}", command.name());
            return Err(ConsoleError::Busy);
        }

        let result = self.execute(command).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn execute(&self, command: KeyCommand) -> ConsoleResult<CommandOutcome> {
        let name = command.name();
        info!("Dispatching {} for key: {}", name, command.key_id());

        let call = async {
            match command {
                KeyCommand::Deactivate(request) => self
                    .backend
                    .deactivate_key(request)
                    .await
                    .map(CommandOutcome::Deactivated),
                KeyCommand::Delete(request) => {
                    self.backend.delete_key(request).await.map(CommandOutcome::Deleted)
                }
                KeyCommand::UpdateLabel(request) => self
                    .backend
                    .update_key_label(request)
                    .await
                    .map(CommandOutcome::LabelUpdated),
                KeyCommand::Restore(request) => {
                    self.backend.restore_key(request).await.map(CommandOutcome::Restored)
                }
            }
        };

        match timeout(self.timeout, call).await {
            Ok(Ok(outcome)) => {
                info!("Command {} completed", name);
                Ok(outcome)
            }
            Ok(Err(err)) => {
                error!("Command {} failed: {}", name, err);
                Err(ConsoleError::Command(err))
            }
            Err(_) => {
                error!("Command {} timed out after {:?}", name, self.timeout);
                Err(ConsoleError::Timeout)
            }
        }
    }
}
