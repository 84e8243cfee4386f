//! Dialog focus containment
//!
//! While a dialog is open, tab traversal must cycle between the dialog's
//! confirmation input and its primary action button and never leave it.
//! Expressed as an explicit state machine so it is testable without a
//! rendering surface.

/// Interactive stops inside an open dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    ConfirmationInput,
    PrimaryAction,
}

impl FocusTarget {
    fn other(self) -> Self {
        match self {
            FocusTarget::ConfirmationInput => FocusTarget::PrimaryAction,
            FocusTarget::PrimaryAction => FocusTarget::ConfirmationInput,
        }
    }
}

/// Focus state for one dialog instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FocusState {
    #[default]
    Inactive,
    Active(FocusTarget),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FocusTrap {
    state: FocusState,
}

impl FocusTrap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engage the trap with focus on `initial`
    pub fn activate(&mut self, initial: FocusTarget) {
        self.state = FocusState::Active(initial);
    }

    /// Release the trap, returning focus to the surrounding screen
    pub fn release(&mut self) {
        self.state = FocusState::Inactive;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, FocusState::Active(_))
    }

    pub fn current(&self) -> Option<FocusTarget> {
        match self.state {
            FocusState::Active(target) => Some(target),
            FocusState::Inactive => None,
        }
    }

    /// Tab forward. With two stops this lands on the other one; focus never
    /// leaves the dialog while the trap is engaged.
    pub fn tab(&mut self) -> Option<FocusTarget> {
        self.advance()
    }

    /// Tab backward. Symmetric with `tab` for a two-stop cycle.
    pub fn shift_tab(&mut self) -> Option<FocusTarget> {
        self.advance()
    }

    fn advance(&mut self) -> Option<FocusTarget> {
        match self.state {
            FocusState::Active(target) => {
                let next = target.other();
                self.state = FocusState::Active(next);
                Some(next)
            }
            FocusState::Inactive => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycles_within_dialog() {
        let mut trap = FocusTrap::new();
        trap.activate(FocusTarget::ConfirmationInput);

        assert_eq!(trap.tab(), Some(FocusTarget::PrimaryAction));
        assert_eq!(trap.tab(), Some(FocusTarget::ConfirmationInput));
        assert_eq!(trap.shift_tab(), Some(FocusTarget::PrimaryAction));
        assert_eq!(trap.current(), Some(FocusTarget::PrimaryAction));
    }

    #[test]
    fn test_focus_never_escapes_open_dialog() {
        let mut trap = FocusTrap::new();
        trap.activate(FocusTarget::PrimaryAction);
        for _ in 0..50 {
            assert!(trap.tab().is_some());
        }
        assert!(trap.is_active());
    }

    #[test]
    fn test_inactive_trap_does_nothing() {
        let mut trap = FocusTrap::new();
        assert_eq!(trap.current(), None);
        assert_eq!(trap.tab(), None);
        assert_eq!(trap.shift_tab(), None);
    }

    #[test]
    fn test_release_returns_focus_to_screen() {
        let mut trap = FocusTrap::new();
        trap.activate(FocusTarget::ConfirmationInput);
        trap.release();
        assert!(!trap.is_active());
        assert_eq!(trap.tab(), None);
    }
}
