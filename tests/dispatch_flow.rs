//! End-to-end dispatch through the public API with recording gateways.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use courier_rs::config::Settings;
use courier_rs::external::{
    ContentTemplate, DryRunMailer, DryRunMessenger, DryRunTelephonyClient, PushAck, PushGateway,
    SmsAck, SmsGateway,
};
use courier_rs::models::{
    Channel, ChannelConfig, ChannelOptions, Device, InteractionKind, Recipient, RoutineOptions,
    SmsOptions,
};
use courier_rs::services::NotificationEvent;
use courier_rs::state::{AppState, Gateways};
use courier_rs::utils::PhoneNumber;
use uuid::Uuid;

#[derive(Default)]
struct Push {
    fail: bool,
    /// Fail every call after this many successes
    succeed_times: Option<usize>,
    sent: Mutex<Vec<String>>,
}

#[async_trait]
impl PushGateway for Push {
    async fn send(
        &self,
        _device: &Device,
        _title: &str,
        content: &str,
        _deep_link: Option<&str>,
    ) -> anyhow::Result<PushAck> {
        let mut sent = self.sent.lock().unwrap();
        if self.fail || self.succeed_times.is_some_and(|n| sent.len() >= n) {
            anyhow::bail!("endpoint disabled");
        }
        sent.push(content.to_string());
        Ok(PushAck::default())
    }
}

#[derive(Default)]
struct Sms {
    fail: bool,
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl SmsGateway for Sms {
    async fn publish(
        &self,
        phone_number: &PhoneNumber,
        content: &str,
        _delivery_token: &str,
    ) -> anyhow::Result<SmsAck> {
        if self.fail {
            anyhow::bail!("throttled");
        }
        self.sent
            .lock()
            .unwrap()
            .push((phone_number.to_string(), content.to_string()));
        Ok(SmsAck::default())
    }
}

fn settings(sms_messaging: bool) -> Settings {
    let mut settings = Settings::default();
    settings
        .features
        .insert("sms_messaging".to_string(), sms_messaging);
    settings.events.insert(
        "offer_generated".to_string(),
        ChannelConfig {
            push_with_sms_fallback: true,
            push_options: RoutineOptions {
                routine: Some("offer_generated".to_string()),
                params: vec!["A4".into()],
                ..Default::default()
            },
            sms_options: SmsOptions {
                routine: Some("offer_generated".to_string()),
                ..Default::default()
            },
            ..Default::default()
        },
    );
    settings.content.insert(
        "offer_generated".to_string(),
        ContentTemplate {
            title: "New offer".to_string(),
            body: "Your {0} offer is ready".to_string(),
            deep_link: Some("https://app.example.com/offers".to_string()),
            ..Default::default()
        },
    );
    settings
}

fn state(settings: &Settings, push: Arc<Push>, sms: Arc<Sms>) -> AppState {
    let gateways = Gateways {
        push,
        sms,
        mailer: Arc::new(DryRunMailer),
        messenger: Arc::new(DryRunMessenger { delivered: false }),
        telephony: Arc::new(DryRunTelephonyClient),
    };
    AppState::from_settings(settings, gateways).unwrap()
}

fn device() -> Device {
    Device {
        id: Uuid::new_v4(),
        push_token: Some("token".to_string()),
        platform_arn: None,
    }
}

#[tokio::test]
async fn push_is_preferred_when_a_device_exists() {
    let push = Arc::new(Push::default());
    let sms = Arc::new(Sms::default());
    let state = state(&settings(true), push.clone(), sms.clone());

    let recipient = Recipient::new(Uuid::new_v4())
        .with_phone("0171 1234567")
        .with_device(device());

    let record = state
        .services
        .notifications
        .dispatch(&recipient, NotificationEvent::new("offer_generated"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(record.kind, InteractionKind::PushNotification);
    assert_eq!(*push.sent.lock().unwrap(), vec!["Your A4 offer is ready"]);
    assert!(sms.sent.lock().unwrap().is_empty());
    assert_eq!(state.interactions.len(), 1);
}

#[tokio::test]
async fn push_reaching_one_of_two_devices_does_not_send_sms() {
    let push = Arc::new(Push {
        succeed_times: Some(1),
        ..Default::default()
    });
    let sms = Arc::new(Sms::default());
    let state = state(&settings(true), push.clone(), sms.clone());

    let recipient = Recipient::new(Uuid::new_v4())
        .with_phone("0171 1234567")
        .with_device(device())
        .with_device(device());

    let record = state
        .services
        .notifications
        .dispatch(&recipient, NotificationEvent::new("offer_generated"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(record.kind, InteractionKind::PushNotification);
    assert_eq!(push.sent.lock().unwrap().len(), 1);
    assert!(sms.sent.lock().unwrap().is_empty());
    assert_eq!(state.interactions.len(), 1);
}

#[tokio::test]
async fn failed_push_falls_back_to_sms_with_deep_link() {
    let push = Arc::new(Push {
        fail: true,
        ..Default::default()
    });
    let sms = Arc::new(Sms::default());
    let state = state(&settings(true), push, sms.clone());

    let recipient = Recipient::new(Uuid::new_v4())
        .with_phone("0171 1234567")
        .with_device(device());

    let record = state
        .services
        .notifications
        .dispatch(&recipient, NotificationEvent::new("offer_generated"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(record.kind, InteractionKind::Sms);
    let sent = sms.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "+491711234567");
    assert_eq!(
        sent[0].1,
        "Your A4 offer is ready https://app.example.com/offers"
    );
}

#[tokio::test]
async fn sms_gateway_failure_in_fallback_records_nothing() {
    let sms = Arc::new(Sms {
        fail: true,
        ..Default::default()
    });
    let state = state(&settings(true), Arc::new(Push::default()), sms);

    let recipient = Recipient::new(Uuid::new_v4()).with_phone("0171 1234567");

    let record = state
        .services
        .notifications
        .dispatch(&recipient, NotificationEvent::new("offer_generated"))
        .await
        .unwrap();

    assert!(record.is_none());
    assert!(state.interactions.is_empty());
}

#[tokio::test]
async fn restricted_mode_suppresses_sms() {
    let sms = Arc::new(Sms::default());
    let state = state(&settings(false), Arc::new(Push::default()), sms.clone());

    let recipient = Recipient::new(Uuid::new_v4()).with_phone("0171 1234567");

    let record = state
        .services
        .notifications
        .dispatch(&recipient, NotificationEvent::new("offer_generated"))
        .await
        .unwrap();

    assert!(record.is_none());
    assert!(sms.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_phone_reaches_the_caller() {
    let state = state(
        &settings(true),
        Arc::new(Push::default()),
        Arc::new(Sms::default()),
    );

    let recipient = Recipient::new(Uuid::new_v4()).with_phone("030 1234567");

    let result = state
        .services
        .notifications
        .dispatch(&recipient, NotificationEvent::new("offer_generated"))
        .await;

    assert!(matches!(result, Err(e) if e.is_validation()));
}

#[tokio::test]
async fn overrides_switch_to_plain_sms() {
    let sms = Arc::new(Sms::default());
    let push = Arc::new(Push::default());
    let state = state(&settings(true), push.clone(), sms.clone());

    let recipient = Recipient::new(Uuid::new_v4())
        .with_phone("0171 1234567")
        .with_device(device());

    let event = NotificationEvent::new("offer_generated").with_overrides(
        ChannelOptions::new()
            .push_with_sms_fallback(false)
            .channel(Channel::Sms, true),
    );

    let record = state
        .services
        .notifications
        .dispatch(&recipient, event)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(record.kind, InteractionKind::Sms);
    assert!(push.sent.lock().unwrap().is_empty());
    assert_eq!(sms.sent.lock().unwrap()[0].1, "Your {0} offer is ready");
}

#[tokio::test]
async fn unknown_event_is_a_configuration_error() {
    let state = state(
        &Settings {
            events: HashMap::new(),
            ..settings(true)
        },
        Arc::new(Push::default()),
        Arc::new(Sms::default()),
    );

    let result = state
        .services
        .notifications
        .dispatch(
            &Recipient::new(Uuid::new_v4()),
            NotificationEvent::new("offer_generated"),
        )
        .await;

    assert!(matches!(result, Err(e) if e.is_configuration()));
}
