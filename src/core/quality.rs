// Data-quality signals.
//
// Purpose
// - Name every recoverable inconsistency the normalizer, join index and period filter tolerate.
//
// Boundaries
// - These never surface as errors. They are logged with `tracing::warn!` and kept
//   on the join index for inspection.

use crate::core::entity::id::EntityId;
use crate::core::entity::model::EntityKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataQualityWarning {
    #[error("{kind} {}: unparseable date in `{field}`: {raw:?}", record_label(.id))]
    UnparseableDate {
        kind: EntityKind,
        id: Option<EntityId>,
        field: &'static str,
        raw: String,
    },

    #[error("{kind} {id}: `{field}` references missing {target} {target_id}")]
    DanglingReference {
        kind: EntityKind,
        id: EntityId,
        field: &'static str,
        target: EntityKind,
        target_id: EntityId,
    },

    #[error("{kind} {id}: duplicate identifier, keeping the first occurrence")]
    DuplicateId { kind: EntityKind, id: EntityId },

    #[error("{kind} {}: unknown `{field}` value {raw:?}, using {fallback}", record_label(.id))]
    UnknownEnumValue {
        kind: EntityKind,
        id: Option<EntityId>,
        field: &'static str,
        raw: String,
        fallback: &'static str,
    },

    #[error("{kind} {}: invalid duration {raw:?}, clamped to 0", record_label(.id))]
    InvalidDuration {
        kind: EntityKind,
        id: Option<EntityId>,
        raw: String,
    },

    #[error("{kind} {}: `{field}` given as {raw}, matched as {resolved}", record_label(.id))]
    TypeMismatchedId {
        kind: EntityKind,
        id: Option<EntityId>,
        field: &'static str,
        raw: String,
        resolved: EntityId,
    },

    #[error("task {task_id}: cached time logged {cached} differs from entries total {derived}")]
    TimeLoggedDrift {
        task_id: EntityId,
        cached: f64,
        derived: f64,
    },

    #[error("{count} time entries without a usable date were excluded from the period")]
    MissingDates { count: usize },
}

fn record_label(id: &Option<EntityId>) -> String {
    id.as_ref().map_or_else(|| String::from("?"), EntityId::to_string)
}

impl DataQualityWarning {
    pub fn report(&self) {
        tracing::warn!(warning = %self, "data quality");
    }
}
