//! Recording doubles for the channel gateways, shared by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::external::{
    ErrorTracker, MailReceipt, MailRequest, Mailer, MessengerClient, MessengerReceipt,
    MessengerRequest, PushAck, PushGateway, SmsAck, SmsGateway,
};
use crate::models::{Device, Recipient};
use crate::utils::PhoneNumber;

#[derive(Default)]
pub struct RecordingPushGateway {
    pub fail: bool,
    /// Calls from this zero-based index on fail
    pub fail_from: Option<usize>,
    pub calls: Mutex<Vec<(Uuid, String)>>,
}

impl RecordingPushGateway {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn failing_from(index: usize) -> Self {
        Self {
            fail_from: Some(index),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PushGateway for RecordingPushGateway {
    async fn send(
        &self,
        device: &Device,
        _title: &str,
        content: &str,
        _deep_link: Option<&str>,
    ) -> anyhow::Result<PushAck> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((device.id, content.to_string()));
            calls.len() - 1
        };
        if self.fail || self.fail_from.is_some_and(|from| index >= from) {
            anyhow::bail!("push endpoint disabled");
        }
        Ok(PushAck::default())
    }
}

#[derive(Default)]
pub struct RecordingSmsGateway {
    pub fail: bool,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl RecordingSmsGateway {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<(String, String)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SmsGateway for RecordingSmsGateway {
    async fn publish(
        &self,
        phone_number: &PhoneNumber,
        content: &str,
        _delivery_token: &str,
    ) -> anyhow::Result<SmsAck> {
        self.calls
            .lock()
            .unwrap()
            .push((phone_number.to_string(), content.to_string()));
        if self.fail {
            anyhow::bail!("Invalid parameter: PhoneNumber");
        }
        Ok(SmsAck::default())
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    pub fail: bool,
    pub calls: Mutex<Vec<MailRequest>>,
}

impl RecordingMailer {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn deliver(&self, request: MailRequest) -> anyhow::Result<MailReceipt> {
        let subject = request.template.clone();
        self.calls.lock().unwrap().push(request);
        if self.fail {
            anyhow::bail!("smtp unavailable");
        }
        Ok(MailReceipt { subject })
    }
}

#[derive(Default)]
pub struct RecordingMessenger {
    pub delivered: bool,
    pub fail: bool,
    pub calls: Mutex<Vec<MessengerRequest>>,
}

impl RecordingMessenger {
    pub fn delivering() -> Self {
        Self {
            delivered: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl MessengerClient for RecordingMessenger {
    async fn deliver(&self, request: MessengerRequest) -> anyhow::Result<MessengerReceipt> {
        let content = request.builder.clone();
        self.calls.lock().unwrap().push(request);
        if self.fail {
            anyhow::bail!("messenger unavailable");
        }
        Ok(MessengerReceipt {
            delivered: self.delivered,
            content,
        })
    }
}

#[derive(Default)]
pub struct RecordingErrorTracker {
    pub captured: Mutex<Vec<String>>,
}

impl RecordingErrorTracker {
    pub fn count(&self) -> usize {
        self.captured.lock().unwrap().len()
    }
}

impl ErrorTracker for RecordingErrorTracker {
    fn capture(&self, error: &AppError) {
        self.captured.lock().unwrap().push(error.to_string());
    }
}

pub fn push_device() -> Device {
    Device {
        id: Uuid::new_v4(),
        push_token: Some("fcm-token".to_string()),
        platform_arn: None,
    }
}

pub fn empty_device() -> Device {
    Device {
        id: Uuid::new_v4(),
        push_token: Some(String::new()),
        platform_arn: Some(String::new()),
    }
}

pub fn recipient_with_push() -> Recipient {
    Recipient::new(Uuid::new_v4())
        .with_phone("01771912227")
        .with_device(push_device())
}
