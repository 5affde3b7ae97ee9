//! Result of a single channel attempt.

use crate::error::AppError;
use crate::models::InteractionRecord;

/// Why a channel attempt did not send anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No device with a push token or platform ARN
    NoPushDevice,
    /// SMS phone number absent or blank
    NoPhoneNumber,
    /// SMS suppressed by the "message-only restricted" mode
    MessageOnlyRestricted,
    /// Recipient cannot be reached through the messenger
    MessengerUnreachable,
    /// Messenger routine ran but reported the message as not delivered
    NotDelivered,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoPushDevice => "no_push_device",
            SkipReason::NoPhoneNumber => "no_phone_number",
            SkipReason::MessageOnlyRestricted => "message_only_restricted",
            SkipReason::MessengerUnreachable => "messenger_unreachable",
            SkipReason::NotDelivered => "not_delivered",
        }
    }
}

/// Outcome of one channel attempt; never persisted itself
#[derive(Debug)]
pub enum DeliveryOutcome {
    Sent(InteractionRecord),
    Skipped(SkipReason),
    /// Failure that was caught and logged instead of propagated
    Failed(AppError),
}

impl DeliveryOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryOutcome::Sent(_))
    }

    pub fn record(&self) -> Option<&InteractionRecord> {
        match self {
            DeliveryOutcome::Sent(record) => Some(record),
            _ => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            DeliveryOutcome::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }
}
