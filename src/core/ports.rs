// Ports define what the core needs from the outside world, without implementing it.
//
// Purpose
// - Describe the persistence collaborator as one trait per entity collection.
//
// Responsibilities
// - Keep aggregation independent of the backend by coding against `EntitySource`.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits in the adapters layer.
//
// Testing guidance
// - Use the in memory source for tests and local development.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    #[error("source offline: {0}")]
    Offline(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Returns every raw record of one entity kind, exactly as the backend delivers it.
#[async_trait]
pub trait EntitySource: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Value>, SourceError>;
}
