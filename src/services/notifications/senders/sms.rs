use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::{SmsAck, SmsGateway};
use crate::models::{InteractionKind, NewInteraction, SMS_MAX_LENGTH, SmsPayload};
use crate::repositories::InteractionRepository;
use crate::services::notifications::{DeliveryOutcome, SkipReason};
use crate::utils::{PhoneNumber, PhoneValidator};

/// Sends SMS through the SMS gateway.
///
/// Phone number and content are validated before the gateway is called.
/// Gateway failures are logged and then re-raised; whether they are swallowed
/// is up to the caller.
#[derive(Clone)]
pub struct SmsSender {
    gateway: Arc<dyn SmsGateway>,
    interactions: Arc<dyn InteractionRepository>,
    phone: PhoneValidator,
}

impl SmsSender {
    pub fn new(
        gateway: Arc<dyn SmsGateway>,
        interactions: Arc<dyn InteractionRepository>,
        phone: PhoneValidator,
    ) -> Self {
        Self {
            gateway,
            interactions,
            phone,
        }
    }

    /// Send `content` to a raw phone number.
    ///
    /// # Errors
    /// - `AppError::Validation` for an invalid mobile number or content longer
    ///   than 640 characters, raised before any gateway call
    /// - `AppError::Gateway` when the gateway raises
    pub async fn deliver(
        &self,
        phone_number: &str,
        content: &str,
        delivery_token: &str,
        validate_phone: bool,
    ) -> AppResult<SmsAck> {
        let number = self.phone.mobile(phone_number, Some(validate_phone))?;
        check_content_length(content)?;
        self.publish(&number, content, delivery_token).await
    }

    /// Send a payload and record the interaction.
    ///
    /// A payload without phone number is skipped.
    pub async fn send(&self, payload: &SmsPayload, validate_phone: bool) -> AppResult<DeliveryOutcome> {
        let Some(phone) = payload.phone() else {
            return Ok(DeliveryOutcome::Skipped(SkipReason::NoPhoneNumber));
        };

        let number = self.phone.mobile(phone, Some(validate_phone))?;
        payload.validate()?;

        let delivery_token = Uuid::new_v4().to_string();
        self.publish(&number, &payload.content, &delivery_token)
            .await?;

        let record = self
            .interactions
            .create(
                NewInteraction::outgoing(InteractionKind::Sms, payload.recipient_id, payload.content.clone())
                    .with_admin(payload.admin_id)
                    .with_topic(payload.topic.clone()),
            )
            .await?;

        Ok(DeliveryOutcome::Sent(record))
    }

    async fn publish(
        &self,
        number: &PhoneNumber,
        content: &str,
        delivery_token: &str,
    ) -> AppResult<SmsAck> {
        self.gateway
            .publish(number, content, delivery_token)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Error sending sms to phone {} sms service responded with {}",
                    number,
                    e
                );
                AppError::gateway("sms", e)
            })
    }
}

fn check_content_length(content: &str) -> AppResult<()> {
    let length = content.chars().count() as u64;
    if length > SMS_MAX_LENGTH {
        return Err(AppError::validation(
            "content",
            format!(
                "SMS content must not exceed {} characters, got {}",
                SMS_MAX_LENGTH, length
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryInteractionRepository;
    use crate::services::notifications::testing::RecordingSmsGateway;
    use crate::utils::PhoneLocale;

    fn sender(gateway: Arc<RecordingSmsGateway>) -> (SmsSender, Arc<InMemoryInteractionRepository>) {
        let repo = Arc::new(InMemoryInteractionRepository::new());
        let sender = SmsSender::new(gateway, repo.clone(), PhoneValidator::new(PhoneLocale::De, true));
        (sender, repo)
    }

    fn payload(phone: Option<&str>, content: &str) -> SmsPayload {
        SmsPayload {
            recipient_id: Uuid::new_v4(),
            topic: Some("offer".to_string()),
            content: content.to_string(),
            phone_number: phone.map(str::to_string),
            admin_id: None,
        }
    }

    #[tokio::test]
    async fn test_deliver_normalizes_phone() {
        let gateway = Arc::new(RecordingSmsGateway::default());
        let (sender, _) = sender(gateway.clone());

        sender
            .deliver("0177 1912227", "hello", "token-1", true)
            .await
            .unwrap();

        assert_eq!(
            gateway.last_call(),
            Some(("+491771912227".to_string(), "hello".to_string()))
        );
    }

    #[tokio::test]
    async fn test_invalid_phone_fails_before_gateway() {
        let gateway = Arc::new(RecordingSmsGateway::default());
        let (sender, _) = sender(gateway.clone());

        let error = sender
            .deliver("+551771912228", "hello", "token-1", true)
            .await
            .unwrap_err();
        assert!(error.is_validation());
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_disabled_validation_accepts_foreign_composite() {
        let gateway = Arc::new(RecordingSmsGateway::default());
        let (sender, _) = sender(gateway.clone());

        sender
            .deliver("+551771912228", "hello", "token-1", false)
            .await
            .unwrap();
        assert_eq!(gateway.last_call().unwrap().0, "+49551771912228");
    }

    #[tokio::test]
    async fn test_long_content_fails_before_gateway() {
        let gateway = Arc::new(RecordingSmsGateway::default());
        let (sender, repo) = sender(gateway.clone());

        let error = sender
            .deliver("01771912227", &"x".repeat(641), "token-1", true)
            .await
            .unwrap_err();
        assert!(error.is_validation());

        let error = sender
            .send(&payload(Some("01771912227"), &"x".repeat(641)), true)
            .await
            .unwrap_err();
        assert!(error.is_validation());

        assert_eq!(gateway.call_count(), 0);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_gateway_error_is_reraised() {
        let gateway = Arc::new(RecordingSmsGateway::failing());
        let (sender, repo) = sender(gateway.clone());

        let error = sender
            .send(&payload(Some("01771912227"), "hello"), true)
            .await
            .unwrap_err();
        assert!(error.is_gateway());
        assert!(error.to_string().contains("Invalid parameter: PhoneNumber"));
        assert_eq!(gateway.call_count(), 1);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_send_records_interaction() {
        let gateway = Arc::new(RecordingSmsGateway::default());
        let (sender, repo) = sender(gateway);

        let outcome = sender
            .send(&payload(Some("01771912227"), "hello"), true)
            .await
            .unwrap();
        let record = outcome.record().expect("sent");
        assert_eq!(record.kind, InteractionKind::Sms);
        assert_eq!(record.topic.as_deref(), Some("offer"));
        assert!(!record.acknowledged);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_phone_is_skipped() {
        let gateway = Arc::new(RecordingSmsGateway::default());
        let (sender, _) = sender(gateway.clone());

        let outcome = sender.send(&payload(Some("  "), "hello"), true).await.unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::NoPhoneNumber));
        assert_eq!(gateway.call_count(), 0);
    }
}
