//! Phone call initiation.
//!
//! Uses the same phone validator as the SMS sender, so a number accepted
//! for SMS is accepted for calls and vice versa.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::external::TelephonyClient;
use crate::utils::{PhoneNumber, PhoneValidator};

#[derive(Clone)]
pub struct CallService {
    client: Arc<dyn TelephonyClient>,
    phone: PhoneValidator,
}

impl CallService {
    pub fn new(client: Arc<dyn TelephonyClient>, phone: PhoneValidator) -> Self {
        Self { client, phone }
    }

    /// Initiate a call from `sip_identity` to `phone_number`.
    ///
    /// # Errors
    /// - `AppError::Validation` for a malformed number or a missing SIP identity,
    ///   before the telephony client is called
    /// - `AppError::Gateway` when the telephony client raises
    pub async fn initiate_call(
        &self,
        phone_number: &str,
        sip_identity: Option<&str>,
    ) -> AppResult<PhoneNumber> {
        let number = self.phone.mobile(phone_number, None)?;
        let sip_identity = sip_identity
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::validation("sip_identity", "a SIP identity is required"))?;

        self.client
            .initiate_call(&number, sip_identity)
            .await
            .map_err(|e| AppError::gateway("telephony", e))?;

        tracing::info!(phone = %number, sip_identity, "Call initiated");
        Ok(number)
    }
}
