//! Channel payloads for push notifications and SMS.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Longest SMS content accepted by the SMS sender, in characters
pub const SMS_MAX_LENGTH: u64 = 640;

/// Push notification payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    pub recipient_id: Uuid,
    #[serde(default)]
    pub admin_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub deep_link: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
}

/// SMS payload, either supplied by the caller or derived from a push payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SmsPayload {
    pub recipient_id: Uuid,
    #[serde(default)]
    pub topic: Option<String>,
    #[validate(length(max = 640, message = "SMS content must not exceed 640 characters"))]
    pub content: String,
    /// Raw phone number; normalized by the SMS sender
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub admin_id: Option<Uuid>,
}

impl SmsPayload {
    /// Phone number if present and not blank
    pub fn phone(&self) -> Option<&str> {
        self.phone_number.as_deref().filter(|p| !p.trim().is_empty())
    }
}
