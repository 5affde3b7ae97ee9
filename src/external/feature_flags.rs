//! Feature-flag store.

use std::collections::HashMap;

/// Known feature flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Outbound SMS. Disabled or absent puts dispatch in "message-only restricted" mode.
    SmsMessaging,
}

impl Feature {
    pub fn key(&self) -> &'static str {
        match self {
            Feature::SmsMessaging => "sms_messaging",
        }
    }
}

pub trait FeatureFlags: Send + Sync {
    fn is_enabled(&self, feature: Feature) -> bool;

    /// SMS sending is forcibly suppressed while this is true
    fn message_only_restricted(&self) -> bool {
        !self.is_enabled(Feature::SmsMessaging)
    }
}

/// Flags loaded once from settings; missing keys count as disabled
#[derive(Debug, Clone, Default)]
pub struct StaticFeatureFlags {
    flags: HashMap<String, bool>,
}

impl StaticFeatureFlags {
    pub fn new(flags: HashMap<String, bool>) -> Self {
        Self { flags }
    }

    pub fn with(mut self, feature: Feature, enabled: bool) -> Self {
        self.flags.insert(feature.key().to_string(), enabled);
        self
    }
}

impl FeatureFlags for StaticFeatureFlags {
    fn is_enabled(&self, feature: Feature) -> bool {
        self.flags.get(feature.key()).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_flag_means_restricted() {
        assert!(StaticFeatureFlags::default().message_only_restricted());
    }

    #[test]
    fn test_enabled_flag_lifts_restriction() {
        let flags = StaticFeatureFlags::default().with(Feature::SmsMessaging, true);
        assert!(!flags.message_only_restricted());

        let flags = flags.with(Feature::SmsMessaging, false);
        assert!(flags.message_only_restricted());
    }
}
