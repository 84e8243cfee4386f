//! Recipient export dialog
//!
//! Shows a key's public recipient string for copying. The "copied"
//! indicator reverts after a short delay; the reset is a scoped timer, so
//! closing the dialog cancels it instead of mutating state after teardown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use keydeck_commands::GlobalKey;

use crate::focus::{FocusTarget, FocusTrap};
use crate::timer::ScopedTimer;

/// How long the "copied" indicator stays lit
pub const COPY_FEEDBACK_RESET: Duration = Duration::from_secs(2);

pub struct ExportKeyDialog {
    key: GlobalKey,
    focus: FocusTrap,
    copied: Arc<AtomicBool>,
    reset_timer: Option<ScopedTimer>,
    feedback_duration: Duration,
}

impl ExportKeyDialog {
    pub fn open(key: GlobalKey) -> Self {
        let mut focus = FocusTrap::new();
        focus.activate(FocusTarget::PrimaryAction);
        Self {
            key,
            focus,
            copied: Arc::new(AtomicBool::new(false)),
            reset_timer: None,
            feedback_duration: COPY_FEEDBACK_RESET,
        }
    }

    /// Override the feedback window (tests)
    pub fn with_feedback_duration(mut self, duration: Duration) -> Self {
        self.feedback_duration = duration;
        self
    }

    pub fn key(&self) -> &GlobalKey {
        &self.key
    }

    /// The string handed to the clipboard
    pub fn recipient(&self) -> &str {
        &self.key.recipient
    }

    pub fn focus(&mut self) -> &mut FocusTrap {
        &mut self.focus
    }

    pub fn is_copied(&self) -> bool {
        self.copied.load(Ordering::SeqCst)
    }

    /// Record that the recipient was copied and arm the indicator reset.
    /// Re-copying re-arms the timer; the previous reset is cancelled.
    pub fn mark_copied(&mut self) {
        self.copied.store(true, Ordering::SeqCst);
        let copied = Arc::clone(&self.copied);
        self.reset_timer = Some(ScopedTimer::once(self.feedback_duration, move || {
            copied.store(false, Ordering::SeqCst);
        }));
    }

    /// Close the dialog, cancelling any pending indicator reset
    pub fn close(mut self) {
        self.reset_timer = None;
        self.focus.release();
    }
}
