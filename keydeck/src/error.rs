//! Console error types

use keydeck_commands::CommandError;
use thiserror::Error;

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Fallback shown when a command fails for a reason the user cannot act on.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Action not available: {0}")]
    Ineligible(String),

    #[error("Another request is already in flight")]
    Busy,

    #[error("The request timed out")]
    Timeout,

    #[error(transparent)]
    Command(#[from] CommandError),
}

impl ConsoleError {
    /// Message to surface inside the owning dialog.
    ///
    /// Validation and domain errors are shown verbatim; transport-level
    /// failures collapse into one generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Validation(message) | ConsoleError::Ineligible(message) => {
                message.clone()
            }
            ConsoleError::Timeout => GENERIC_FAILURE_MESSAGE.to_string(),
            ConsoleError::Command(CommandError::Other(_)) => GENERIC_FAILURE_MESSAGE.to_string(),
            ConsoleError::Command(error) => error.to_string(),
            ConsoleError::Busy => self.to_string(),
        }
    }
}
