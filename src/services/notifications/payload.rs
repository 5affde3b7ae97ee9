//! Payload assembly for push and SMS.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppResult;
use crate::external::{ContentProvider, UrlShortener};
use crate::models::{PushPayload, Recipient, RoutineOptions, SmsOptions, SmsPayload};
use crate::services::notifications::required_routine;

/// Builds channel payloads from event parameters, and SMS payloads from push payloads
#[derive(Clone)]
pub struct PayloadAssembler {
    content: Arc<dyn ContentProvider>,
    shortener: Arc<dyn UrlShortener>,
}

impl PayloadAssembler {
    pub fn new(content: Arc<dyn ContentProvider>, shortener: Arc<dyn UrlShortener>) -> Self {
        Self { content, shortener }
    }

    /// Render the push payload for the content method named in `options`
    pub async fn build_push_payload(
        &self,
        recipient: &Recipient,
        admin_id: Option<Uuid>,
        options: &RoutineOptions,
    ) -> AppResult<PushPayload> {
        let method = required_routine(options.routine.as_deref(), "push_options.routine")?;
        let rendered = self
            .content
            .push_content(recipient, method, &options.params)
            .await?;

        Ok(PushPayload {
            recipient_id: recipient.id,
            admin_id,
            title: rendered.title,
            content: rendered.content,
            deep_link: rendered.deep_link,
            section: rendered.section,
        })
    }

    /// Render the SMS payload for the content method named in `options`
    pub async fn build_sms_payload(
        &self,
        recipient: &Recipient,
        admin_id: Option<Uuid>,
        options: &SmsOptions,
    ) -> AppResult<SmsPayload> {
        let method = required_routine(options.routine.as_deref(), "sms_options.routine")?;
        let rendered = self
            .content
            .sms_content(recipient, method, &options.params)
            .await?;

        Ok(SmsPayload {
            recipient_id: recipient.id,
            topic: rendered.topic,
            content: rendered.content,
            phone_number: recipient.phone.clone(),
            admin_id,
        })
    }

    /// Derive the SMS fallback of a push payload.
    ///
    /// The push content is reused with the shortened deep link appended, the
    /// phone number comes from the recipient and no topic is set.
    pub async fn sms_from_push(&self, recipient: &Recipient, push: &PushPayload) -> SmsPayload {
        let content = match push.deep_link.as_deref().filter(|l| !l.trim().is_empty()) {
            Some(link) => format!("{} {}", push.content, self.shorten(link).await),
            None => push.content.clone(),
        };

        SmsPayload {
            recipient_id: push.recipient_id,
            topic: None,
            content,
            phone_number: recipient.phone.clone(),
            admin_id: push.admin_id,
        }
    }

    async fn shorten(&self, link: &str) -> String {
        match self.shortener.shorten(link).await {
            Ok(short) => short,
            Err(e) => {
                tracing::warn!(link, error = %e, "URL shortening failed, using original link");
                link.to_string()
            }
        }
    }
}
