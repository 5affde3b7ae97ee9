//! Recipient aggregate as seen by the dispatcher.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered device of a recipient
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Device {
    pub id: Uuid,
    #[serde(default)]
    pub push_token: Option<String>,
    #[serde(default)]
    pub platform_arn: Option<String>,
}

impl Device {
    /// A device is addressable by push when it has a token or a platform ARN
    pub fn can_receive_push(&self) -> bool {
        fn present(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.trim().is_empty())
        }

        present(&self.push_token) || present(&self.platform_arn)
    }
}

/// The customer being notified
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recipient {
    pub id: Uuid,
    /// Raw, unnormalized phone number
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub messenger_reachable: bool,
}

impl Recipient {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_device(mut self, device: Device) -> Self {
        self.devices.push(device);
        self
    }

    pub fn reachable_by_messenger(mut self, reachable: bool) -> Self {
        self.messenger_reachable = reachable;
        self
    }

    /// Primary phone number, `None` when absent or blank
    pub fn primary_phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.trim().is_empty())
    }

    pub fn push_devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(|d| d.can_receive_push())
    }

    pub fn has_push_device(&self) -> bool {
        self.push_devices().next().is_some()
    }
}
