//! Push notification with SMS as fallback.
//!
//! Push is tried first when the recipient has at least one push-capable
//! device. Push counts as sent once any device accepted it; only when every
//! device failed is the failure reported and turned into an SMS attempt. The caller receives exactly one of: a push record, an SMS
//! record, or no record at all.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::external::{ErrorTracker, FeatureFlags};
use crate::models::{PushPayload, Recipient, SmsOptions, SmsPayload};
use crate::services::notifications::senders::{PushSender, SmsSender};
use crate::services::notifications::{DeliveryOutcome, PayloadAssembler, SkipReason};

#[derive(Clone)]
pub struct PushWithSmsFallback {
    push: PushSender,
    sms: SmsSender,
    assembler: PayloadAssembler,
    features: Arc<dyn FeatureFlags>,
    errors: Arc<dyn ErrorTracker>,
}

impl PushWithSmsFallback {
    pub fn new(
        push: PushSender,
        sms: SmsSender,
        assembler: PayloadAssembler,
        features: Arc<dyn FeatureFlags>,
        errors: Arc<dyn ErrorTracker>,
    ) -> Self {
        Self {
            push,
            sms,
            assembler,
            features,
            errors,
        }
    }

    /// Run the fallback protocol once.
    ///
    /// `sms_override` replaces the SMS payload derived from `push`.
    ///
    /// # Errors
    /// Only validation errors of the SMS attempt reach the caller; gateway
    /// failures of either channel are captured and absorbed.
    pub async fn deliver(
        &self,
        recipient: &Recipient,
        push: &PushPayload,
        sms_override: Option<&SmsPayload>,
        sms_options: &SmsOptions,
    ) -> AppResult<DeliveryOutcome> {
        if recipient.has_push_device() {
            match self.push.send(recipient, push).await {
                Ok(DeliveryOutcome::Sent(record)) => return Ok(DeliveryOutcome::Sent(record)),
                Ok(outcome) => {
                    tracing::debug!(recipient_id = %recipient.id, ?outcome, "Push not sent, falling back to sms");
                }
                Err(e) => {
                    tracing::warn!(recipient_id = %recipient.id, error = %e, "Push failed, falling back to sms");
                    self.errors.capture(&e);
                }
            }
        }

        self.attempt_sms(recipient, push, sms_override, sms_options)
            .await
    }

    async fn attempt_sms(
        &self,
        recipient: &Recipient,
        push: &PushPayload,
        sms_override: Option<&SmsPayload>,
        sms_options: &SmsOptions,
    ) -> AppResult<DeliveryOutcome> {
        if self.features.message_only_restricted() {
            self.errors.capture(&AppError::Suppressed {
                channel: "sms".to_string(),
                reason: format!(
                    "message-only restricted mode is active, recipient {} not notified",
                    recipient.id
                ),
            });
            return Ok(DeliveryOutcome::Skipped(SkipReason::MessageOnlyRestricted));
        }

        let payload = match sms_override {
            Some(payload) => payload.clone(),
            None => self.assembler.sms_from_push(recipient, push).await,
        };

        if payload.phone().is_none() {
            return Ok(DeliveryOutcome::Skipped(SkipReason::NoPhoneNumber));
        }

        match self.sms.send(&payload, sms_options.validate_phone).await {
            Ok(outcome) => Ok(outcome),
            Err(e) if e.is_gateway() => {
                self.errors.capture(&e);
                Ok(DeliveryOutcome::Failed(e))
            }
            Err(e) => Err(e),
        }
    }
}
