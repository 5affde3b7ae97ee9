//! Interaction records: persisted evidence of a successful send.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of interaction, one per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    PushNotification,
    Sms,
    Message,
    Email,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::PushNotification => "push_notification",
            InteractionKind::Sms => "sms",
            InteractionKind::Message => "message",
            InteractionKind::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Outgoing,
    Incoming,
}

/// Stored interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub id: Uuid,
    pub kind: InteractionKind,
    pub recipient_id: Uuid,
    pub admin_id: Option<Uuid>,
    pub topic: Option<String>,
    pub content: String,
    pub direction: Direction,
    pub acknowledged: bool,
    pub created_at: Timestamp,
}

/// Insert model for an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInteraction {
    pub kind: InteractionKind,
    pub recipient_id: Uuid,
    pub admin_id: Option<Uuid>,
    pub topic: Option<String>,
    pub content: String,
    pub direction: Direction,
    /// Stored as `false` when unset
    pub acknowledged: Option<bool>,
}

impl NewInteraction {
    /// Outgoing interaction without admin, topic or acknowledgement
    pub fn outgoing(kind: InteractionKind, recipient_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            kind,
            recipient_id,
            admin_id: None,
            topic: None,
            content: content.into(),
            direction: Direction::Outgoing,
            acknowledged: None,
        }
    }

    pub fn with_admin(mut self, admin_id: Option<Uuid>) -> Self {
        self.admin_id = admin_id;
        self
    }

    pub fn with_topic(mut self, topic: Option<String>) -> Self {
        self.topic = topic;
        self
    }

    /// Materialize the record with a fresh id and creation time
    pub fn into_record(self) -> InteractionRecord {
        InteractionRecord {
            id: Uuid::new_v4(),
            kind: self.kind,
            recipient_id: self.recipient_id,
            admin_id: self.admin_id,
            topic: self.topic,
            content: self.content,
            direction: self.direction,
            acknowledged: self.acknowledged.unwrap_or(false),
            created_at: Timestamp::now(),
        }
    }
}
