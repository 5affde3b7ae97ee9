//! Multi-channel notification dispatch.
//!
//! A [`NotificationDispatcher`] resolves the channel configuration of an
//! event and walks the channels in a fixed order. Push notifications may fall
//! back to SMS through [`PushWithSmsFallback`].

mod config_resolver;
mod dispatcher;
mod fallback;
mod outcome;
mod payload;
pub mod senders;

#[cfg(test)]
mod testing;

pub use config_resolver::{ChannelConfigResolver, ChannelConfigStore, StaticConfigStore};
pub use dispatcher::{Collaborators, NotificationDispatcher, NotificationEvent};
pub use fallback::PushWithSmsFallback;
pub use outcome::{DeliveryOutcome, SkipReason};
pub use payload::PayloadAssembler;

use crate::error::{AppError, AppResult};

/// Non-blank routine name or `AppError::Configuration` naming `field`
pub(crate) fn required_routine<'a>(routine: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    routine
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| AppError::Configuration {
            key: field.to_string(),
            reason: "no routine configured for this channel".to_string(),
        })
}
