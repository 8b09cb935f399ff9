use crate::core::entity::model::EntityKind;
use crate::core::ports::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("failed to fetch {kind} records: {source}")]
    Fetch { kind: EntityKind, source: SourceError },
}

impl ApplicationError {
    pub fn kind(&self) -> EntityKind {
        match self {
            ApplicationError::Fetch { kind, .. } => *kind,
        }
    }
}
