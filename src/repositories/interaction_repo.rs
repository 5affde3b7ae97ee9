//! Interaction repository: the delivery-record writer.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{InteractionRecord, NewInteraction};

#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Persist a new interaction and return the stored record
    async fn create(&self, new_interaction: NewInteraction) -> AppResult<InteractionRecord>;

    /// All interactions of a recipient, oldest first
    async fn find_by_recipient(&self, recipient_id: Uuid) -> AppResult<Vec<InteractionRecord>>;
}

/// Interaction store kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryInteractionRepository {
    records: DashMap<Uuid, InteractionRecord>,
}

impl InMemoryInteractionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl InteractionRepository for InMemoryInteractionRepository {
    async fn create(&self, new_interaction: NewInteraction) -> AppResult<InteractionRecord> {
        let record = new_interaction.into_record();
        self.records.insert(record.id, record.clone());

        tracing::debug!(
            interaction_id = %record.id,
            kind = record.kind.as_str(),
            recipient_id = %record.recipient_id,
            "Interaction recorded"
        );

        Ok(record)
    }

    async fn find_by_recipient(&self, recipient_id: Uuid) -> AppResult<Vec<InteractionRecord>> {
        let mut records: Vec<_> = self
            .records
            .iter()
            .filter(|entry| entry.recipient_id == recipient_id)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }
}
