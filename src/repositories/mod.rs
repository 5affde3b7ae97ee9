//! Repository layer for data access operations.

mod interaction_repo;

pub use interaction_repo::{InMemoryInteractionRepository, InteractionRepository};
