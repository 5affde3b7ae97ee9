//! Gateways that only log what would have been sent.
//!
//! Used by `courier-rs dispatch` and `courier-rs check` to exercise an event configuration
//! without touching any real channel.

use async_trait::async_trait;
use uuid::Uuid;

use super::gateways::{
    MailReceipt, MailRequest, Mailer, MessengerClient, MessengerReceipt, MessengerRequest,
    PushAck, PushGateway, SmsAck, SmsGateway, TelephonyClient,
};
use crate::models::Device;
use crate::utils::PhoneNumber;

#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunPushGateway;

#[async_trait]
impl PushGateway for DryRunPushGateway {
    async fn send(
        &self,
        device: &Device,
        title: &str,
        content: &str,
        deep_link: Option<&str>,
    ) -> anyhow::Result<PushAck> {
        tracing::info!(device_id = %device.id, title, content, deep_link, "[dry-run] push");
        Ok(PushAck {
            message_id: Some(Uuid::new_v4().to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunSmsGateway;

#[async_trait]
impl SmsGateway for DryRunSmsGateway {
    async fn publish(
        &self,
        phone_number: &PhoneNumber,
        content: &str,
        delivery_token: &str,
    ) -> anyhow::Result<SmsAck> {
        tracing::info!(phone = %phone_number, content, delivery_token, "[dry-run] sms");
        Ok(SmsAck {
            message_id: Some(delivery_token.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunMailer;

#[async_trait]
impl Mailer for DryRunMailer {
    async fn deliver(&self, request: MailRequest) -> anyhow::Result<MailReceipt> {
        tracing::info!(
            recipient_id = %request.recipient_id,
            template = %request.template,
            deliver_now = request.deliver_now,
            "[dry-run] mail"
        );
        Ok(MailReceipt {
            subject: request.template,
        })
    }
}

/// Messenger stand-in; `delivered` decides whether push and SMS get suppressed
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunMessenger {
    pub delivered: bool,
}

#[async_trait]
impl MessengerClient for DryRunMessenger {
    async fn deliver(&self, request: MessengerRequest) -> anyhow::Result<MessengerReceipt> {
        tracing::info!(
            recipient_id = %request.recipient_id,
            builder = %request.builder,
            delivered = self.delivered,
            "[dry-run] messenger"
        );
        Ok(MessengerReceipt {
            delivered: self.delivered,
            content: request.builder,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunTelephonyClient;

#[async_trait]
impl TelephonyClient for DryRunTelephonyClient {
    async fn initiate_call(&self, phone_number: &PhoneNumber, sip_identity: &str) -> anyhow::Result<()> {
        tracing::info!(phone = %phone_number, sip_identity, "[dry-run] call");
        Ok(())
    }
}
