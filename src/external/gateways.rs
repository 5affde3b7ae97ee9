//! Channel gateway traits.
//!
//! Gateways report failures as opaque `anyhow::Error`s; the channel senders
//! decide whether such a failure is wrapped and propagated or absorbed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::models::Device;
use crate::utils::PhoneNumber;

/// Acknowledgement of the push gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushAck {
    pub message_id: Option<String>,
}

/// Acknowledgement of the SMS gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsAck {
    pub message_id: Option<String>,
}

#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Send one notification to one device
    async fn send(
        &self,
        device: &Device,
        title: &str,
        content: &str,
        deep_link: Option<&str>,
    ) -> anyhow::Result<PushAck>;
}

#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Publish `content` to `phone_number`; `delivery_token` identifies the message
    async fn publish(
        &self,
        phone_number: &PhoneNumber,
        content: &str,
        delivery_token: &str,
    ) -> anyhow::Result<SmsAck>;
}

/// Mail delivery request: a template routine plus its positional parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailRequest {
    pub recipient_id: Uuid,
    pub template: String,
    pub params: Vec<JsonValue>,
    pub deliver_now: bool,
}

/// What the mailer reports back after accepting a mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailReceipt {
    pub subject: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn deliver(&self, request: MailRequest) -> anyhow::Result<MailReceipt>;
}

/// Messenger delivery request: a message-builder routine plus its parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessengerRequest {
    pub recipient_id: Uuid,
    pub admin_id: Option<Uuid>,
    pub builder: String,
    pub params: Vec<JsonValue>,
    pub deliver_now: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessengerReceipt {
    /// Whether the message reached the recipient's messenger
    pub delivered: bool,
    pub content: String,
}

#[async_trait]
pub trait MessengerClient: Send + Sync {
    async fn deliver(&self, request: MessengerRequest) -> anyhow::Result<MessengerReceipt>;
}

#[async_trait]
pub trait TelephonyClient: Send + Sync {
    async fn initiate_call(&self, phone_number: &PhoneNumber, sip_identity: &str)
        -> anyhow::Result<()>;
}
