use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::{MessengerClient, MessengerRequest};
use crate::models::{InteractionKind, NewInteraction, Recipient, RoutineOptions};
use crate::repositories::InteractionRepository;
use crate::services::notifications::{DeliveryOutcome, SkipReason, required_routine};

/// Sends an in-app messenger message built by the configured routine
#[derive(Clone)]
pub struct MessengerSender {
    client: Arc<dyn MessengerClient>,
    interactions: Arc<dyn InteractionRepository>,
}

impl MessengerSender {
    pub fn new(
        client: Arc<dyn MessengerClient>,
        interactions: Arc<dyn InteractionRepository>,
    ) -> Self {
        Self {
            client,
            interactions,
        }
    }

    /// Only a `Sent` outcome means the message was delivered.
    pub async fn send(
        &self,
        recipient: &Recipient,
        admin_id: Option<Uuid>,
        options: &RoutineOptions,
    ) -> AppResult<DeliveryOutcome> {
        if !recipient.messenger_reachable {
            return Ok(DeliveryOutcome::Skipped(SkipReason::MessengerUnreachable));
        }

        let builder = required_routine(options.routine.as_deref(), "messenger_options.routine")?;

        let receipt = self
            .client
            .deliver(MessengerRequest {
                recipient_id: recipient.id,
                admin_id,
                builder: builder.to_string(),
                params: options.params.clone(),
                deliver_now: options.deliver_now,
            })
            .await
            .map_err(|e| AppError::gateway("messenger", e))?;

        if !receipt.delivered {
            return Ok(DeliveryOutcome::Skipped(SkipReason::NotDelivered));
        }

        let record = self
            .interactions
            .create(
                NewInteraction::outgoing(InteractionKind::Message, recipient.id, receipt.content)
                    .with_admin(admin_id),
            )
            .await?;

        Ok(DeliveryOutcome::Sent(record))
    }
}
