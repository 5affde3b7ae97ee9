//! Courier-RS Library
//!
//! Notification dispatch for customer events: per-event channel configuration,
//! push with SMS fallback and phone number normalization.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}
