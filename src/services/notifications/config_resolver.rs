//! Resolution of the channel configuration governing one dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{ChannelConfig, ChannelOptions};

/// Read-only store of per-event channel configuration
pub trait ChannelConfigStore: Send + Sync {
    fn get(&self, event_key: &str) -> AppResult<ChannelConfig>;
}

/// Configuration store loaded once from settings
#[derive(Debug, Clone, Default)]
pub struct StaticConfigStore {
    events: HashMap<String, ChannelConfig>,
}

impl StaticConfigStore {
    pub fn new(events: HashMap<String, ChannelConfig>) -> Self {
        Self { events }
    }

    pub fn with_event(mut self, key: impl Into<String>, config: ChannelConfig) -> Self {
        self.events.insert(key.into(), config);
        self
    }
}

impl ChannelConfigStore for StaticConfigStore {
    fn get(&self, event_key: &str) -> AppResult<ChannelConfig> {
        self.events
            .get(event_key)
            .cloned()
            .ok_or_else(|| AppError::unknown_event(event_key))
    }
}

/// Merges stored configuration with call-site overrides
#[derive(Clone)]
pub struct ChannelConfigResolver {
    store: Arc<dyn ChannelConfigStore>,
}

impl ChannelConfigResolver {
    pub fn new(store: Arc<dyn ChannelConfigStore>) -> Self {
        Self { store }
    }

    /// Resolve the single configuration for `event_key`.
    ///
    /// # Errors
    /// `AppError::Configuration` when the key is unknown to the store.
    pub fn resolve(&self, event_key: &str, overrides: &ChannelOptions) -> AppResult<ChannelConfig> {
        let stored = self.store.get(event_key)?;
        Ok(overrides.merge_into(&stored))
    }
}
