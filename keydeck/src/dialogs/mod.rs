//! Dialog controllers
//!
//! One controller per modal, wiring the confirmation gate, focus trap, and
//! dispatcher around a single key. Controllers expose the observable
//! contract of their dialog; rendering stays in the presentation layer.
//!
//! After a `SubmitResult::Completed`, the caller fetches a fresh snapshot
//! and only then closes the dialog, so the list never flashes stale state.

mod deactivate;
mod delete;
mod edit_label;
mod export;
mod restore;

pub use deactivate::DeactivateKeyDialog;
pub use delete::DeleteKeyDialog;
pub use edit_label::EditLabelDialog;
pub use export::ExportKeyDialog;
pub use restore::RestoreKeyFlow;

use crate::dispatch::CommandOutcome;

/// Result of driving a dialog's submit control
#[derive(Debug)]
pub enum SubmitResult {
    /// The command succeeded. Refresh the snapshot, then close the dialog;
    /// the dialog instance accepts no further submits.
    Completed(CommandOutcome),

    /// Nothing was sent: confirmation unsatisfied, a request already in
    /// flight, or the dialog already completed.
    NotSent,

    /// The submit did not go through; the message is surfaced inline and
    /// the dialog stays interactive for a fresh attempt.
    Failed(String),
}

impl SubmitResult {
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitResult::Completed(_))
    }
}
