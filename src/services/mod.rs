//! Service layer.
//!
//! Services coordinate the channel gateways, the interaction repository and
//! the configuration store.

mod call_service;
pub mod notifications;

pub use call_service::CallService;
pub use notifications::{Collaborators, NotificationDispatcher, NotificationEvent};

use std::sync::Arc;

use crate::external::TelephonyClient;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub notifications: NotificationDispatcher,
    pub calls: CallService,
}

impl Services {
    pub fn new(collaborators: Collaborators, telephony: Arc<dyn TelephonyClient>) -> Self {
        let phone = collaborators.phone;
        Self {
            notifications: NotificationDispatcher::new(collaborators),
            calls: CallService::new(telephony, phone),
        }
    }
}
