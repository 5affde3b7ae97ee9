//! Per-event channel configuration and call-site overrides.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::payload::{PushPayload, SmsPayload};

/// Delivery channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Mail,
    Messenger,
    Push,
    Sms,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Mail => "mail",
            Channel::Messenger => "messenger",
            Channel::Push => "push",
            Channel::Sms => "sms",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routine a channel invokes: a mail template, a messenger builder or a
/// push/SMS content method, with its static parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoutineOptions {
    #[serde(default)]
    pub routine: Option<String>,
    #[serde(default)]
    pub params: Vec<JsonValue>,
    /// Deliver immediately instead of queueing
    #[serde(default)]
    pub deliver_now: bool,
}

/// Routine options of the SMS channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsOptions {
    #[serde(default)]
    pub routine: Option<String>,
    #[serde(default)]
    pub params: Vec<JsonValue>,
    #[serde(default)]
    pub deliver_now: bool,
    /// Validate the phone number as a mobile number of the configured locale
    #[serde(default = "default_true")]
    pub validate_phone: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SmsOptions {
    fn default() -> Self {
        Self {
            routine: None,
            params: Vec::new(),
            deliver_now: false,
            validate_phone: true,
        }
    }
}

/// Stored configuration of one event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(default)]
    pub mail: bool,
    #[serde(default)]
    pub messenger: bool,
    #[serde(default)]
    pub push: bool,
    #[serde(default)]
    pub sms: bool,
    #[serde(default)]
    pub push_with_sms_fallback: bool,
    #[serde(default)]
    pub mail_options: RoutineOptions,
    #[serde(default)]
    pub messenger_options: RoutineOptions,
    #[serde(default)]
    pub push_options: RoutineOptions,
    #[serde(default)]
    pub sms_options: SmsOptions,
}

impl ChannelConfig {
    /// Enabled channels in dispatch order, the fallback pair reported as push and sms
    pub fn enabled_channels(&self) -> Vec<Channel> {
        let mut channels = Vec::new();
        if self.mail {
            channels.push(Channel::Mail);
        }
        if self.messenger {
            channels.push(Channel::Messenger);
        }
        if self.push || self.push_with_sms_fallback {
            channels.push(Channel::Push);
        }
        if self.sms || self.push_with_sms_fallback {
            channels.push(Channel::Sms);
        }
        channels
    }
}

/// Field-by-field overrides of a [`RoutineOptions`] bundle
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutineOverrides {
    pub routine: Option<String>,
    pub params: Option<Vec<JsonValue>>,
    pub deliver_now: Option<bool>,
}

impl RoutineOverrides {
    pub fn apply(&self, base: &RoutineOptions) -> RoutineOptions {
        RoutineOptions {
            routine: self.routine.clone().or_else(|| base.routine.clone()),
            params: self.params.clone().unwrap_or_else(|| base.params.clone()),
            deliver_now: self.deliver_now.unwrap_or(base.deliver_now),
        }
    }
}

/// Field-by-field overrides of [`SmsOptions`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SmsOverrides {
    pub routine: Option<String>,
    pub params: Option<Vec<JsonValue>>,
    pub deliver_now: Option<bool>,
    pub validate_phone: Option<bool>,
}

impl SmsOverrides {
    pub fn apply(&self, base: &SmsOptions) -> SmsOptions {
        SmsOptions {
            routine: self.routine.clone().or_else(|| base.routine.clone()),
            params: self.params.clone().unwrap_or_else(|| base.params.clone()),
            deliver_now: self.deliver_now.unwrap_or(base.deliver_now),
            validate_phone: self.validate_phone.unwrap_or(base.validate_phone),
        }
    }
}

/// Call-site overrides for one dispatch.
///
/// Unset fields fall back to the stored [`ChannelConfig`]. Explicit payloads
/// always win over the ones the dispatcher would assemble itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChannelOptions {
    pub mail: Option<bool>,
    pub messenger: Option<bool>,
    pub push: Option<bool>,
    pub sms: Option<bool>,
    pub push_with_sms_fallback: Option<bool>,
    pub mail_options: RoutineOverrides,
    pub messenger_options: RoutineOverrides,
    pub push_options: RoutineOverrides,
    pub sms_options: SmsOverrides,
    pub push_payload: Option<PushPayload>,
    pub sms_payload: Option<SmsPayload>,
}

impl ChannelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(mut self, channel: Channel, enabled: bool) -> Self {
        match channel {
            Channel::Mail => self.mail = Some(enabled),
            Channel::Messenger => self.messenger = Some(enabled),
            Channel::Push => self.push = Some(enabled),
            Channel::Sms => self.sms = Some(enabled),
        }
        self
    }

    pub fn push_with_sms_fallback(mut self, enabled: bool) -> Self {
        self.push_with_sms_fallback = Some(enabled);
        self
    }

    pub fn with_push_payload(mut self, payload: PushPayload) -> Self {
        self.push_payload = Some(payload);
        self
    }

    pub fn with_sms_payload(mut self, payload: SmsPayload) -> Self {
        self.sms_payload = Some(payload);
        self
    }

    /// Merge these overrides over a stored configuration
    pub fn merge_into(&self, stored: &ChannelConfig) -> ChannelConfig {
        ChannelConfig {
            mail: self.mail.unwrap_or(stored.mail),
            messenger: self.messenger.unwrap_or(stored.messenger),
            push: self.push.unwrap_or(stored.push),
            sms: self.sms.unwrap_or(stored.sms),
            push_with_sms_fallback: self
                .push_with_sms_fallback
                .unwrap_or(stored.push_with_sms_fallback),
            mail_options: self.mail_options.apply(&stored.mail_options),
            messenger_options: self.messenger_options.apply(&stored.messenger_options),
            push_options: self.push_options.apply(&stored.push_options),
            sms_options: self.sms_options.apply(&stored.sms_options),
        }
    }
}
