//! Domain models for notification dispatch.

mod channel;
mod interaction;
mod payload;
mod recipient;

pub use channel::{
    Channel, ChannelConfig, ChannelOptions, RoutineOptions, RoutineOverrides, SmsOptions,
    SmsOverrides,
};
pub use interaction::{Direction, InteractionKind, InteractionRecord, NewInteraction};
pub use payload::{PushPayload, SMS_MAX_LENGTH, SmsPayload};
pub use recipient::{Device, Recipient};
