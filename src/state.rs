//! Application state.
//!
//! Wires settings and channel gateways into the services. Cloning is cheap
//! since every collaborator sits behind an `Arc`.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::AppResult;
use crate::external::{
    DryRunMailer, DryRunMessenger, DryRunPushGateway, DryRunSmsGateway, DryRunTelephonyClient,
    HttpUrlShortener, Mailer, MessengerClient, PassthroughUrlShortener, PushGateway, SmsGateway,
    StaticFeatureFlags, TelephonyClient, TemplateContentProvider, TracingErrorTracker,
    UrlShortener,
};
use crate::repositories::{InMemoryInteractionRepository, InteractionRepository};
use crate::services::notifications::StaticConfigStore;
use crate::services::{Collaborators, Services};

/// Channel gateways the services talk to
#[derive(Clone)]
pub struct Gateways {
    pub push: Arc<dyn PushGateway>,
    pub sms: Arc<dyn SmsGateway>,
    pub mailer: Arc<dyn Mailer>,
    pub messenger: Arc<dyn MessengerClient>,
    pub telephony: Arc<dyn TelephonyClient>,
}

impl Gateways {
    /// Gateways that only log; `messenger_delivers` is what the messenger reports back
    pub fn dry_run(messenger_delivers: bool) -> Self {
        Self {
            push: Arc::new(DryRunPushGateway),
            sms: Arc::new(DryRunSmsGateway),
            mailer: Arc::new(DryRunMailer),
            messenger: Arc::new(DryRunMessenger {
                delivered: messenger_delivers,
            }),
            telephony: Arc::new(DryRunTelephonyClient),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Interactions written by this process
    pub interactions: Arc<InMemoryInteractionRepository>,
}

impl AppState {
    /// Build the services from loaded settings.
    ///
    /// # Errors
    /// `AppError::Validation` when the URL shortener is enabled with an unusable endpoint.
    pub fn from_settings(settings: &Settings, gateways: Gateways) -> AppResult<Self> {
        let shortener: Arc<dyn UrlShortener> = if settings.url_shortener.enabled {
            Arc::new(HttpUrlShortener::new(
                &settings.url_shortener.endpoint,
                settings.url_shortener.timeout_seconds,
            )?)
        } else {
            Arc::new(PassthroughUrlShortener)
        };

        let interactions = Arc::new(InMemoryInteractionRepository::new());
        let repository: Arc<dyn InteractionRepository> = interactions.clone();

        let collaborators = Collaborators {
            config_store: Arc::new(StaticConfigStore::new(settings.events.clone())),
            push_gateway: gateways.push,
            sms_gateway: gateways.sms,
            mailer: gateways.mailer,
            messenger: gateways.messenger,
            content: Arc::new(TemplateContentProvider::new(settings.content.clone())),
            shortener,
            features: Arc::new(StaticFeatureFlags::new(settings.features.clone())),
            errors: Arc::new(TracingErrorTracker),
            interactions: repository,
            phone: settings.phone.validator(),
        };

        tracing::debug!(
            events = settings.events.len(),
            locale = %settings.phone.locale,
            shortener = settings.url_shortener.enabled,
            "Application state initialized"
        );

        Ok(Self {
            services: Services::new(collaborators, gateways.telephony),
            interactions,
        })
    }
}
