//! Dispatch command handler
//!
//! Builds a recipient from command-line arguments and dispatches one event
//! through logging gateways.

use uuid::Uuid;

use crate::cli::parser::ChannelArg;
use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::models::{ChannelOptions, Device, InteractionRecord, Recipient};
use crate::services::NotificationEvent;
use crate::state::{AppState, Gateways};

/// Arguments of one `courier-rs dispatch` invocation
#[derive(Debug, Clone, Default)]
pub struct DispatchRequest {
    pub event: String,
    pub recipient_id: Option<Uuid>,
    pub phone: Option<String>,
    pub push_tokens: Vec<String>,
    pub messenger_reachable: bool,
    pub messenger_delivers: bool,
    pub admin_id: Option<Uuid>,
    pub enable: Vec<ChannelArg>,
    pub disable: Vec<ChannelArg>,
    pub skip_phone_validation: bool,
}

impl DispatchRequest {
    pub fn recipient(&self) -> Recipient {
        let mut recipient = Recipient::new(self.recipient_id.unwrap_or_else(Uuid::new_v4))
            .reachable_by_messenger(self.messenger_reachable);

        if let Some(phone) = &self.phone {
            recipient = recipient.with_phone(phone.clone());
        }

        for token in &self.push_tokens {
            recipient = recipient.with_device(Device {
                id: Uuid::new_v4(),
                push_token: Some(token.clone()),
                platform_arn: None,
            });
        }

        recipient
    }

    pub fn overrides(&self) -> ChannelOptions {
        let toggles = self
            .enable
            .iter()
            .map(|c| (*c, true))
            .chain(self.disable.iter().map(|c| (*c, false)));

        let mut options = toggles.fold(ChannelOptions::new(), |options, (arg, enabled)| {
            match arg.channel() {
                Some(channel) => options.channel(channel, enabled),
                None => options.push_with_sms_fallback(enabled),
            }
        });

        if self.skip_phone_validation {
            options.sms_options.validate_phone = Some(false);
        }
        options
    }

    pub fn event(&self) -> NotificationEvent {
        let event = NotificationEvent::new(self.event.clone()).with_overrides(self.overrides());
        match self.admin_id {
            Some(admin_id) => event.with_admin(admin_id),
            None => event,
        }
    }
}

/// Handler for the dispatch command
pub struct DispatchCommandHandler {
    config: Settings,
}

impl DispatchCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Dispatch and print the interaction that was recorded, if any
    pub async fn execute(&self, request: &DispatchRequest) -> AppResult<()> {
        match self.run(request).await? {
            Some(record) => {
                println!(
                    "✓ {} sent to {}",
                    record.kind.as_str(),
                    record.recipient_id
                );
                if let Some(topic) = &record.topic {
                    println!("  topic: {}", topic);
                }
                println!("  content: {}", record.content);
            }
            None => println!("No interaction recorded for event '{}'", request.event),
        }
        Ok(())
    }

    pub async fn run(&self, request: &DispatchRequest) -> AppResult<Option<InteractionRecord>> {
        let state =
            AppState::from_settings(&self.config, Gateways::dry_run(request.messenger_delivers))?;

        state
            .services
            .notifications
            .dispatch(&request.recipient(), request.event())
            .await
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChannelConfig, InteractionKind, RoutineOptions, SmsOptions};

    fn config() -> Settings {
        let mut config = Settings::default();
        config.features.insert("sms_messaging".to_string(), true);
        config.events.insert(
            "offer_generated".to_string(),
            ChannelConfig {
                push_with_sms_fallback: true,
                push_options: RoutineOptions {
                    routine: Some("offer_generated".to_string()),
                    ..Default::default()
                },
                sms_options: SmsOptions {
                    routine: Some("offer_generated".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        config.content.insert(
            "offer_generated".to_string(),
            crate::external::ContentTemplate {
                title: "New offer".to_string(),
                body: "Your offer is ready".to_string(),
                ..Default::default()
            },
        );
        config
    }

    fn request() -> DispatchRequest {
        DispatchRequest {
            event: "offer_generated".to_string(),
            phone: Some("0171 1234567".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_request_builds_recipient() {
        let id = Uuid::new_v4();
        let request = DispatchRequest {
            recipient_id: Some(id),
            push_tokens: vec!["abc".to_string(), "def".to_string()],
            messenger_reachable: true,
            ..request()
        };

        let recipient = request.recipient();
        assert_eq!(recipient.id, id);
        assert_eq!(recipient.push_devices().count(), 2);
        assert!(recipient.messenger_reachable);
        assert_eq!(recipient.primary_phone(), Some("0171 1234567"));
    }

    #[test]
    fn test_request_overrides() {
        let request = DispatchRequest {
            enable: vec![ChannelArg::Mail],
            disable: vec![ChannelArg::PushWithSmsFallback],
            skip_phone_validation: true,
            ..request()
        };

        let overrides = request.overrides();
        assert_eq!(overrides.mail, Some(true));
        assert_eq!(overrides.push_with_sms_fallback, Some(false));
        assert_eq!(overrides.push, None);
        assert_eq!(overrides.sms_options.validate_phone, Some(false));
    }

    #[test]
    fn test_request_event_carries_admin() {
        let admin = Uuid::new_v4();
        let request = DispatchRequest {
            admin_id: Some(admin),
            ..request()
        };
        assert_eq!(request.event().admin_id, Some(admin));
    }

    #[tokio::test]
    async fn test_dispatch_push_device() {
        let request = DispatchRequest {
            push_tokens: vec!["abc".to_string()],
            ..request()
        };

        let record = DispatchCommandHandler::new(config())
            .run(&request)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.kind, InteractionKind::PushNotification);
        assert_eq!(record.topic.as_deref(), Some("New offer"));
    }

    #[tokio::test]
    async fn test_dispatch_falls_back_to_sms() {
        let record = DispatchCommandHandler::new(config())
            .run(&request())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.kind, InteractionKind::Sms);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_event() {
        let request = DispatchRequest {
            event: "missing".to_string(),
            ..request()
        };

        let result = DispatchCommandHandler::new(config()).run(&request).await;
        assert!(matches!(result, Err(e) if e.is_configuration()));
    }
}
