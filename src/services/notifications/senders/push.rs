use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::external::{ErrorTracker, PushGateway};
use crate::models::{InteractionKind, NewInteraction, PushPayload, Recipient};
use crate::repositories::InteractionRepository;
use crate::services::notifications::{DeliveryOutcome, SkipReason};

/// Sends a push notification to every push-capable device of the recipient
#[derive(Clone)]
pub struct PushSender {
    gateway: Arc<dyn PushGateway>,
    interactions: Arc<dyn InteractionRepository>,
    errors: Arc<dyn ErrorTracker>,
}

impl PushSender {
    pub fn new(
        gateway: Arc<dyn PushGateway>,
        interactions: Arc<dyn InteractionRepository>,
        errors: Arc<dyn ErrorTracker>,
    ) -> Self {
        Self {
            gateway,
            interactions,
            errors,
        }
    }

    /// Push to every capable device; one record once any device accepted.
    ///
    /// Device failures after a successful delivery go to the error tracker.
    ///
    /// # Errors
    /// `AppError::Gateway` with the first failure when no device accepted.
    pub async fn send(&self, recipient: &Recipient, payload: &PushPayload) -> AppResult<DeliveryOutcome> {
        if !recipient.has_push_device() {
            return Ok(DeliveryOutcome::Skipped(SkipReason::NoPushDevice));
        }

        let mut delivered = 0usize;
        let mut failures = Vec::new();

        for device in recipient.push_devices() {
            let sent = self
                .gateway
                .send(
                    device,
                    &payload.title,
                    &payload.content,
                    payload.deep_link.as_deref(),
                )
                .await;

            match sent {
                Ok(_) => {
                    delivered += 1;
                    tracing::debug!(device_id = %device.id, recipient_id = %recipient.id, "Push notification sent");
                }
                Err(e) => {
                    tracing::warn!(device_id = %device.id, recipient_id = %recipient.id, error = %e, "Push to device failed");
                    failures.push(AppError::gateway("push", e));
                }
            }
        }

        if delivered == 0 {
            return match failures.into_iter().next() {
                Some(first) => Err(first),
                None => Ok(DeliveryOutcome::Skipped(SkipReason::NoPushDevice)),
            };
        }
        failures.iter().for_each(|e| self.errors.capture(e));

        let record = self
            .interactions
            .create(
                NewInteraction::outgoing(
                    InteractionKind::PushNotification,
                    payload.recipient_id,
                    payload.content.clone(),
                )
                .with_admin(payload.admin_id)
                .with_topic(Some(payload.title.clone())),
            )
            .await?;

        Ok(DeliveryOutcome::Sent(record))
    }
}
