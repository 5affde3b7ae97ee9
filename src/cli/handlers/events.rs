//! Events command handler
//!
//! Lists configured events with the channels each one fans out to.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::models::Channel;

/// One configured event as shown by `courier-rs events`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub key: String,
    pub channels: Vec<Channel>,
    pub push_with_sms_fallback: bool,
}

impl std::fmt::Display for EventSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let channels: Vec<_> = self.channels.iter().map(Channel::as_str).collect();
        let channels = if channels.is_empty() {
            "(no channels)".to_string()
        } else {
            channels.join(", ")
        };

        write!(f, "{}: {}", self.key, channels)?;
        if self.push_with_sms_fallback {
            write!(f, " [push with sms fallback]")?;
        }
        Ok(())
    }
}

/// Handler for the events command
pub struct EventsCommandHandler {
    config: Settings,
}

impl EventsCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> AppResult<()> {
        let summaries = self.summaries();
        if summaries.is_empty() {
            println!("No events configured");
            return Ok(());
        }

        for summary in summaries {
            println!("{}", summary);
        }
        Ok(())
    }

    /// Events sorted by key
    pub fn summaries(&self) -> Vec<EventSummary> {
        let mut summaries: Vec<_> = self
            .config
            .events
            .iter()
            .map(|(key, event)| EventSummary {
                key: key.clone(),
                channels: event.enabled_channels(),
                push_with_sms_fallback: event.push_with_sms_fallback,
            })
            .collect();
        summaries.sort_by(|a, b| a.key.cmp(&b.key));
        summaries
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
