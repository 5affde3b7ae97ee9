//! Channel senders.
//!
//! Each sender resolves its routine from the merged options, calls its
//! gateway and persists an interaction for every successful send. Mail and
//! messenger failures propagate untouched, push fails only when no device
//! accepted, and the SMS sender logs before it re-raises.

mod mail;
mod messenger;
mod push;
mod sms;

pub use mail::MailSender;
pub use messenger::MessengerSender;
pub use push::PushSender;
pub use sms::SmsSender;

/// Channel table resolved once at startup
#[derive(Clone)]
pub struct ChannelSenders {
    pub mail: MailSender,
    pub messenger: MessengerSender,
    pub push: PushSender,
    pub sms: SmsSender,
}
