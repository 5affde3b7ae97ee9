//! Notification dispatcher.
//!
//! Entry point for every business event that should reach a recipient. The
//! channels of one dispatch run strictly one after the other:
//! mail, messenger, then one of push-with-sms-fallback, push or sms.

use std::sync::Arc;

use uuid::Uuid;

use super::config_resolver::{ChannelConfigResolver, ChannelConfigStore};
use super::fallback::PushWithSmsFallback;
use super::payload::PayloadAssembler;
use super::senders::{ChannelSenders, MailSender, MessengerSender, PushSender, SmsSender};
use super::{DeliveryOutcome, SkipReason};
use crate::error::AppResult;
use crate::external::{
    ContentProvider, ErrorTracker, FeatureFlags, Mailer, MessengerClient, PushGateway,
    SmsGateway, UrlShortener,
};
use crate::models::{Channel, ChannelConfig, ChannelOptions, InteractionRecord, Recipient};
use crate::repositories::InteractionRepository;
use crate::utils::PhoneValidator;

/// A business event to notify a recipient about
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NotificationEvent {
    pub key: String,
    pub admin_id: Option<Uuid>,
    pub overrides: ChannelOptions,
}

impl NotificationEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_admin(mut self, admin_id: Uuid) -> Self {
        self.admin_id = Some(admin_id);
        self
    }

    pub fn with_overrides(mut self, overrides: ChannelOptions) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Everything the dispatcher talks to
#[derive(Clone)]
pub struct Collaborators {
    pub config_store: Arc<dyn ChannelConfigStore>,
    pub push_gateway: Arc<dyn PushGateway>,
    pub sms_gateway: Arc<dyn SmsGateway>,
    pub mailer: Arc<dyn Mailer>,
    pub messenger: Arc<dyn MessengerClient>,
    pub content: Arc<dyn ContentProvider>,
    pub shortener: Arc<dyn UrlShortener>,
    pub features: Arc<dyn FeatureFlags>,
    pub errors: Arc<dyn ErrorTracker>,
    pub interactions: Arc<dyn InteractionRepository>,
    pub phone: PhoneValidator,
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    resolver: ChannelConfigResolver,
    senders: ChannelSenders,
    assembler: PayloadAssembler,
    fallback: PushWithSmsFallback,
    features: Arc<dyn FeatureFlags>,
}

impl NotificationDispatcher {
    pub fn new(collaborators: Collaborators) -> Self {
        let Collaborators {
            config_store,
            push_gateway,
            sms_gateway,
            mailer,
            messenger,
            content,
            shortener,
            features,
            errors,
            interactions,
            phone,
        } = collaborators;

        let senders = ChannelSenders {
            mail: MailSender::new(mailer, interactions.clone()),
            messenger: MessengerSender::new(messenger, interactions.clone()),
            push: PushSender::new(push_gateway, interactions.clone(), errors.clone()),
            sms: SmsSender::new(sms_gateway, interactions, phone),
        };
        let assembler = PayloadAssembler::new(content, shortener);
        let fallback = PushWithSmsFallback::new(
            senders.push.clone(),
            senders.sms.clone(),
            assembler.clone(),
            features.clone(),
            errors,
        );

        Self {
            resolver: ChannelConfigResolver::new(config_store),
            senders,
            assembler,
            fallback,
            features,
        }
    }

    /// Notify `recipient` about `event` on every enabled channel.
    ///
    /// Returns the record of the last channel that actually sent something.
    ///
    /// # Errors
    /// - `AppError::Configuration` for an unknown event key or a missing routine
    /// - `AppError::Validation` for an invalid phone number or SMS content
    /// - `AppError::Gateway` from mail, messenger, standalone push or standalone sms
    #[tracing::instrument(skip_all, fields(event = %event.key, recipient_id = %recipient.id))]
    pub async fn dispatch(
        &self,
        recipient: &Recipient,
        event: NotificationEvent,
    ) -> AppResult<Option<InteractionRecord>> {
        let config = self.resolver.resolve(&event.key, &event.overrides)?;
        let mut last = None;

        if config.mail {
            let outcome = self
                .senders
                .mail
                .send(recipient, event.admin_id, &config.mail_options)
                .await?;
            settle(&mut last, Channel::Mail, outcome);
        }

        if config.messenger {
            let outcome = self
                .senders
                .messenger
                .send(recipient, event.admin_id, &config.messenger_options)
                .await?;
            let delivered = outcome.is_sent();
            settle(&mut last, Channel::Messenger, outcome);

            if delivered {
                tracing::debug!("Messenger delivered, push and sms not attempted");
                return Ok(last);
            }
        }

        if config.push_with_sms_fallback {
            let outcome = self.push_with_sms_fallback(recipient, &event, &config).await?;
            settle(&mut last, Channel::Push, outcome);
        } else if config.push {
            let payload = match &event.overrides.push_payload {
                Some(payload) => payload.clone(),
                None => {
                    self.assembler
                        .build_push_payload(recipient, event.admin_id, &config.push_options)
                        .await?
                }
            };
            let outcome = self.senders.push.send(recipient, &payload).await?;
            settle(&mut last, Channel::Push, outcome);
        } else if config.sms {
            if self.features.message_only_restricted() {
                settle(
                    &mut last,
                    Channel::Sms,
                    DeliveryOutcome::Skipped(SkipReason::MessageOnlyRestricted),
                );
            } else {
                let payload = match &event.overrides.sms_payload {
                    Some(payload) => payload.clone(),
                    None => {
                        self.assembler
                            .build_sms_payload(recipient, event.admin_id, &config.sms_options)
                            .await?
                    }
                };
                let outcome = self
                    .senders
                    .sms
                    .send(&payload, config.sms_options.validate_phone)
                    .await?;
                settle(&mut last, Channel::Sms, outcome);
            }
        }

        Ok(last)
    }

    async fn push_with_sms_fallback(
        &self,
        recipient: &Recipient,
        event: &NotificationEvent,
        config: &ChannelConfig,
    ) -> AppResult<DeliveryOutcome> {
        let push = match &event.overrides.push_payload {
            Some(payload) => payload.clone(),
            None => {
                self.assembler
                    .build_push_payload(recipient, event.admin_id, &config.push_options)
                    .await?
            }
        };

        self.fallback
            .deliver(
                recipient,
                &push,
                event.overrides.sms_payload.as_ref(),
                &config.sms_options,
            )
            .await
    }
}

fn settle(last: &mut Option<InteractionRecord>, channel: Channel, outcome: DeliveryOutcome) {
    match outcome {
        DeliveryOutcome::Sent(record) => {
            tracing::info!(%channel, interaction_id = %record.id, kind = record.kind.as_str(), "Notification sent");
            *last = Some(record);
        }
        DeliveryOutcome::Skipped(reason) => {
            tracing::debug!(%channel, reason = reason.as_str(), "Channel skipped");
        }
        DeliveryOutcome::Failed(e) => {
            tracing::debug!(%channel, error = %e, "Channel failed, error already reported");
        }
    }
}
