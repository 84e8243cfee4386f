//! Confirmation gate for destructive actions
//!
//! A per-dialog state machine that requires an exact confirmation phrase
//! before a permanently destructive command may be submitted. The gate owns
//! no I/O; the dialog controller drives it around the actual dispatch.

use tracing::debug;

/// Literal prefix of the required confirmation phrase
pub const CONFIRMATION_PREFIX: &str = "DELETE ";

/// The phrase a user must type to confirm destroying the given key
pub fn required_phrase(label: &str) -> String {
    format!("{CONFIRMATION_PREFIX}{label}")
}

/// Phase of a confirmation gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatePhase {
    /// Open with no confirmation requirement
    Idle,

    /// Waiting for the exact confirmation phrase
    AwaitingConfirmation,

    /// One command call in flight
    Submitting,

    /// Last submit failed; the dialog stays interactive
    Failed(String),

    /// Submit succeeded; no further submit is possible
    Completed,
}

/// Confirmation state for one dialog instance
#[derive(Debug, Clone)]
pub struct ConfirmationGate {
    required: Option<String>,
    input: String,
    phase: GatePhase,
}

impl Default for ConfirmationGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationGate {
    /// Gate with no confirmation requirement
    pub fn new() -> Self {
        Self { required: None, input: String::new(), phase: GatePhase::Idle }
    }

    /// Gate requiring the given phrase before submit
    pub fn with_phrase(required: impl Into<String>) -> Self {
        Self {
            required: Some(required.into()),
            input: String::new(),
            phase: GatePhase::AwaitingConfirmation,
        }
    }

    /// Gate requiring `"DELETE {label}"`
    pub fn for_label(label: &str) -> Self {
        Self::with_phrase(required_phrase(label))
    }

    pub fn phase(&self) -> &GatePhase {
        &self.phase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            GatePhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        matches!(
            self.phase,
            GatePhase::Idle | GatePhase::AwaitingConfirmation | GatePhase::Failed(_)
        )
    }

    /// Add or remove the confirmation requirement (immediate-delete toggle).
    ///
    /// Any typed text is cleared; a fresh requirement must be typed out in
    /// full. Ignored while a submit is in flight or after completion.
    pub fn set_requirement(&mut self, required: Option<String>) {
        if !self.is_interactive() {
            return;
        }
        self.input.clear();
        self.phase = match required {
            Some(_) => GatePhase::AwaitingConfirmation,
            None => GatePhase::Idle,
        };
        self.required = required;
    }

    /// Update the typed confirmation text. Ignored when not interactive.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if self.is_interactive() {
            self.input = text.into();
        }
    }

    /// True when the confirmation requirement (if any) is met.
    ///
    /// Comparison is byte-exact: case-sensitive and without trimming.
    pub fn is_satisfied(&self) -> bool {
        match &self.required {
            Some(required) => self.input == *required,
            None => true,
        }
    }

    /// True when the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        self.is_interactive() && self.is_satisfied()
    }

    /// Move to `Submitting`. Returns false (and changes nothing) when the
    /// gate is unsatisfied, already submitting, or completed.
    pub fn begin_submit(&mut self) -> bool {
        if !self.can_submit() {
            debug!("Confirmation gate refused submit in phase {:?}", self.phase);
            return false;
        }
        self.phase = GatePhase::Submitting;
        true
    }

    /// Record the outcome of the in-flight command.
    ///
    /// Failure keeps the typed confirmation so the user retries without
    /// re-typing. Ignored outside `Submitting`.
    pub fn complete(&mut self, result: Result<(), String>) {
        if self.phase != GatePhase::Submitting {
            return;
        }
        self.phase = match result {
            Ok(()) => GatePhase::Completed,
            Err(message) => GatePhase::Failed(message),
        };
    }

    /// Cancel the dialog. Clears typed text and any error, returning true;
    /// ignored (returns false) while a submit is in flight or after the
    /// gate has completed.
    pub fn cancel(&mut self) -> bool {
        if self.phase == GatePhase::Submitting {
            debug!("Ignoring cancel while a request is in flight");
            return false;
        }
        if self.phase == GatePhase::Completed {
            // Completed is terminal; a close handler must not resurrect
            // the instance into a submittable state.
            return false;
        }
        self.input.clear();
        self.phase = match self.required {
            Some(_) => GatePhase::AwaitingConfirmation,
            None => GatePhase::Idle,
        };
        true
    }
}
