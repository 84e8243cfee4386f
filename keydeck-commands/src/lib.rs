//! Command boundary for the keydeck key-management console
//!
//! This crate provides the lowest layer of the keydeck architecture: the
//! request/response contract of the external key registry, the domain
//! records the console reads, and an in-memory mock backend used by tests
//! and demos.

pub mod error;
pub mod lifecycle;
#[cfg(feature = "mock")]
pub mod mock;
pub mod traits;
pub mod types;

pub use error::{CommandError, CommandResult};
pub use lifecycle::KeyLifecycleStatus;
pub use traits::KeyCommands;
pub use types::*;

// Re-export mock for testing
#[cfg(feature = "mock")]
pub use mock::MockKeyBackend;
