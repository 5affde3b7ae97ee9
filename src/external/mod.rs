//! External collaborators consumed by the dispatcher.
//!
//! Every gateway is an `#[async_trait]` object so that the dispatcher can be
//! wired with real clients in production and with recorders in tests. The
//! wire protocols of the push, SMS, mail, messenger and telephony gateways
//! live outside this crate; only the URL shortener ships an HTTP client.

pub mod client;
pub mod content;
pub mod dry_run;
pub mod error_tracking;
pub mod feature_flags;
pub mod gateways;
pub mod shortener;

pub use content::{ContentProvider, ContentTemplate, PushContent, SmsContent, TemplateContentProvider};
pub use dry_run::{
    DryRunMailer, DryRunMessenger, DryRunPushGateway, DryRunSmsGateway, DryRunTelephonyClient,
};
pub use error_tracking::{ErrorTracker, TracingErrorTracker};
pub use feature_flags::{Feature, FeatureFlags, StaticFeatureFlags};
pub use gateways::{
    MailReceipt, MailRequest, Mailer, MessengerClient, MessengerReceipt, MessengerRequest,
    PushAck, PushGateway, SmsAck, SmsGateway, TelephonyClient,
};
pub use shortener::{HttpUrlShortener, PassthroughUrlShortener, UrlShortener};
