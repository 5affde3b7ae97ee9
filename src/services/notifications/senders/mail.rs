use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::{MailRequest, Mailer};
use crate::models::{InteractionKind, NewInteraction, Recipient, RoutineOptions};
use crate::repositories::InteractionRepository;
use crate::services::notifications::{DeliveryOutcome, required_routine};

/// Sends the configured mail template
#[derive(Clone)]
pub struct MailSender {
    mailer: Arc<dyn Mailer>,
    interactions: Arc<dyn InteractionRepository>,
}

impl MailSender {
    pub fn new(mailer: Arc<dyn Mailer>, interactions: Arc<dyn InteractionRepository>) -> Self {
        Self {
            mailer,
            interactions,
        }
    }

    /// # Errors
    /// Mailer failures are returned as `AppError::Gateway` and never swallowed.
    pub async fn send(
        &self,
        recipient: &Recipient,
        admin_id: Option<Uuid>,
        options: &RoutineOptions,
    ) -> AppResult<DeliveryOutcome> {
        let template = required_routine(options.routine.as_deref(), "mail_options.routine")?;

        let receipt = self
            .mailer
            .deliver(MailRequest {
                recipient_id: recipient.id,
                template: template.to_string(),
                params: options.params.clone(),
                deliver_now: options.deliver_now,
            })
            .await
            .map_err(|e| AppError::gateway("mail", e))?;

        let record = self
            .interactions
            .create(
                NewInteraction::outgoing(InteractionKind::Email, recipient.id, receipt.subject)
                    .with_admin(admin_id),
            )
            .await?;

        Ok(DeliveryOutcome::Sent(record))
    }
}
