//! Command handlers for CLI operations
//!
//! This module contains handlers for different CLI commands,
//! separating command execution logic from parsing and validation.

pub mod check;
pub mod dispatch;
pub mod events;
pub mod normalize;

pub use check::CheckCommandHandler;
pub use dispatch::{DispatchCommandHandler, DispatchRequest};
pub use events::EventsCommandHandler;
pub use normalize::NormalizeCommandHandler;
