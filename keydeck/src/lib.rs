//! Decision core for the keydeck key-management console
//!
//! This crate provides the logic layer between a key-management screen and
//! the external command backend: key eligibility derivation, confirmation
//! gating for destructive actions, single-flight command dispatch, dialog
//! controllers, and the view models the presentation layer renders.
//!
//! Presentation code stays out of this crate; everything here is testable
//! without a rendering surface.

pub mod dialogs;
pub mod dispatch;
pub mod eligibility;
pub mod error;
pub mod focus;
pub mod gate;
pub mod snapshot;
pub mod timer;
pub mod view;

pub use dialogs::{
    DeactivateKeyDialog, DeleteKeyDialog, EditLabelDialog, ExportKeyDialog, RestoreKeyFlow,
    SubmitResult,
};
pub use dispatch::{CommandDispatcher, CommandOutcome, KeyCommand, DEFAULT_COMMAND_TIMEOUT};
pub use eligibility::KeyEligibility;
pub use error::{ConsoleError, ConsoleResult, GENERIC_FAILURE_MESSAGE};
pub use focus::{FocusTarget, FocusTrap};
pub use gate::{ConfirmationGate, GatePhase};
pub use snapshot::VaultSnapshot;
pub use timer::ScopedTimer;
pub use view::{
    KeyCardView, KeyMenuView, KeyTypeVariant, LifecycleBadge, SlotIndicator, StatusSlotView,
};

// Re-export the boundary types consumers need alongside the core
pub use keydeck_commands::{
    CommandError, GlobalKey, KeyCommands, KeyLifecycleStatus, KeyState, KeyType, VaultStatistics,
};
