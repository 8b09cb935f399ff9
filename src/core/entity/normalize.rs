// Entity normalizer: raw backend records to canonical structs.
//
// Purpose
// - Resolve the mixed field naming of the backend once, at ingestion.
//
// Responsibilities
// - Apply a fixed precedence per field (first present, non-null key wins).
// - Coerce identifiers, numbers, dates, lists and enums tolerantly.
// - Push a data-quality warning for every value it had to repair.
//
// Boundaries
// - Never panics and never fails. A record that cannot be linked (no primary id) yields `None`.

use crate::core::entity::id::EntityId;
use crate::core::entity::model::{
    EntityKind, Priority, Project, ProjectStatus, Task, TimeEntry, User, UserStatus, UserStory,
    WorkStatus,
};
use crate::core::entity::timestamp::Timestamp;
use crate::core::quality::DataQualityWarning;
use serde_json::{Map, Value};

const ID: &[&str] = &["Id", "id"];
const DESCRIPTION: &[&str] = &["description", "Description"];
const STATUS: &[&str] = &["status", "Status"];
const PRIORITY: &[&str] = &["priority", "Priority"];
const CREATED_AT: &[&str] = &["created_at", "createdAt", "CreatedOn"];
const UPDATED_AT: &[&str] = &["updated_at", "updatedAt", "ModifiedOn"];
const TITLE: &[&str] = &["title", "Title", "Name"];
const PROJECT_ID: &[&str] = &["project_id", "projectId", "ProjectId"];

trait Token: Copy + Default {
    fn parse_token(raw: &str) -> Option<Self>;
    fn label(&self) -> &'static str;
}

macro_rules! token_impl {
    ($($ty:ty),*) => {
        $(impl Token for $ty {
            fn parse_token(raw: &str) -> Option<Self> {
                <$ty>::parse(raw)
            }
            fn label(&self) -> &'static str {
                self.as_str()
            }
        })*
    };
}

token_impl!(ProjectStatus, WorkStatus, Priority, UserStatus);

struct Fields<'a> {
    map: &'a Map<String, Value>,
    kind: EntityKind,
    record_id: Option<EntityId>,
}

impl<'a> Fields<'a> {
    fn new(raw: &'a Value, kind: EntityKind) -> Option<Self> {
        let map = raw.as_object()?;
        Some(Self {
            map,
            kind,
            record_id: None,
        })
    }

    fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find(|value| !value.is_null())
    }

    fn id(&self, keys: &[&str]) -> Option<EntityId> {
        self.first(keys).and_then(EntityId::from_value)
    }

    /// Foreign key read. Text that resolves to a number, or a lookup object, still joins
    /// but is reported.
    fn reference(
        &self,
        keys: &[&str],
        field: &'static str,
        warnings: &mut Vec<DataQualityWarning>,
    ) -> Option<EntityId> {
        let value = self.first(keys)?;
        let resolved = EntityId::from_value(value)?;
        let mismatched = match value {
            Value::String(_) => matches!(resolved, EntityId::Numeric(_)),
            Value::Object(_) => true,
            _ => false,
        };
        if mismatched {
            warnings.push(DataQualityWarning::TypeMismatchedId {
                kind: self.kind,
                id: self.record_id.clone(),
                field,
                raw: value.to_string(),
                resolved: resolved.clone(),
            });
        }
        Some(resolved)
    }

    fn text(&self, keys: &[&str]) -> Option<String> {
        match self.first(keys)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Object(lookup) => lookup
                .get("Name")
                .or_else(|| lookup.get("name"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }

    fn text_or_empty(&self, keys: &[&str]) -> String {
        self.text(keys).unwrap_or_default()
    }

    fn non_blank(&self, keys: &[&str]) -> Option<String> {
        self.text(keys)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }

    fn list(&self, keys: &[&str]) -> Vec<String> {
        let items: Vec<String> = match self.first(keys) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(|value| match value {
                    Value::String(text) => Some(text.clone()),
                    Value::Number(number) => Some(number.to_string()),
                    _ => None,
                })
                .collect(),
            Some(Value::String(text)) => text.lines().map(str::to_string).collect(),
            _ => Vec::new(),
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// `None` when absent, `Some(Err(raw))` when present but not numeric.
    fn number(&self, keys: &[&str]) -> Option<Result<f64, String>> {
        let value = self.first(keys)?;
        let parsed = match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };
        Some(parsed.filter(|n| n.is_finite()).ok_or_else(|| value.to_string()))
    }

    fn timestamp(
        &self,
        keys: &[&str],
        field: &'static str,
        warnings: &mut Vec<DataQualityWarning>,
    ) -> Option<Timestamp> {
        let value = self.first(keys)?;
        let parsed = Timestamp::from_value(value);
        if parsed.is_none() {
            warnings.push(DataQualityWarning::UnparseableDate {
                kind: self.kind,
                id: self.record_id.clone(),
                field,
                raw: value.as_str().map_or_else(|| value.to_string(), str::to_string),
            });
        }
        parsed
    }

    fn token<T: Token>(
        &self,
        keys: &[&str],
        field: &'static str,
        warnings: &mut Vec<DataQualityWarning>,
    ) -> T {
        let Some(raw) = self.text(keys) else {
            return T::default();
        };
        match T::parse_token(&raw) {
            Some(parsed) => parsed,
            None => {
                let fallback = T::default();
                warnings.push(DataQualityWarning::UnknownEnumValue {
                    kind: self.kind,
                    id: self.record_id.clone(),
                    field,
                    raw,
                    fallback: fallback.label(),
                });
                fallback
            }
        }
    }

    fn primary_id(&mut self) -> Option<EntityId> {
        self.record_id = self.id(ID);
        if self.record_id.is_none() {
            tracing::debug!(kind = %self.kind, "record dropped: missing identifier");
        }
        self.record_id.clone()
    }
}

pub fn normalize_project(raw: &Value, warnings: &mut Vec<DataQualityWarning>) -> Option<Project> {
    let mut fields = Fields::new(raw, EntityKind::Project)?;
    let id = fields.primary_id()?;
    Some(Project {
        id,
        name: fields.text_or_empty(&["Name", "name"]),
        description: fields.text_or_empty(DESCRIPTION),
        scope: fields.text_or_empty(&["scope", "Scope"]),
        goals: fields.list(&["goals", "Goals"]),
        status: fields.token(STATUS, "status", warnings),
        created_at: fields.timestamp(CREATED_AT, "created_at", warnings),
        updated_at: fields.timestamp(UPDATED_AT, "updated_at", warnings),
    })
}

pub fn normalize_user_story(
    raw: &Value,
    warnings: &mut Vec<DataQualityWarning>,
) -> Option<UserStory> {
    let mut fields = Fields::new(raw, EntityKind::UserStory)?;
    let id = fields.primary_id()?;
    Some(UserStory {
        id,
        project_id: fields.reference(PROJECT_ID, "project_id", warnings),
        title: fields.text_or_empty(TITLE),
        description: fields.text_or_empty(DESCRIPTION),
        acceptance_criteria: fields.list(&[
            "acceptance_criteria",
            "acceptanceCriteria",
            "AcceptanceCriteria",
        ]),
        priority: fields.token(PRIORITY, "priority", warnings),
        status: fields.token(STATUS, "status", warnings),
        created_at: fields.timestamp(CREATED_AT, "created_at", warnings),
    })
}

pub fn normalize_task(raw: &Value, warnings: &mut Vec<DataQualityWarning>) -> Option<Task> {
    let mut fields = Fields::new(raw, EntityKind::Task)?;
    let id = fields.primary_id()?;
    let time_logged = match fields.number(&["time_logged", "timeLogged"]) {
        Some(Ok(hours)) => hours.max(0.0),
        _ => 0.0,
    };
    Some(Task {
        id,
        user_story_id: fields.reference(
            &["user_story_id", "userStoryId", "UserStoryId"],
            "user_story_id",
            warnings,
        ),
        project_id: fields.reference(PROJECT_ID, "project_id", warnings),
        title: fields.text_or_empty(TITLE),
        description: fields.text_or_empty(DESCRIPTION),
        assignee: fields.non_blank(&["assignee", "Assignee"]),
        owner: fields.reference(&["Owner", "owner"], "owner", warnings),
        status: fields.token(STATUS, "status", warnings),
        priority: fields.token(PRIORITY, "priority", warnings),
        deadline: fields.timestamp(&["deadline", "Deadline"], "deadline", warnings),
        time_logged,
    })
}

pub fn normalize_time_entry(
    raw: &Value,
    warnings: &mut Vec<DataQualityWarning>,
) -> Option<TimeEntry> {
    let mut fields = Fields::new(raw, EntityKind::TimeEntry)?;
    let id = fields.primary_id()?;
    let duration = match fields.number(&["duration", "Duration"]) {
        None => 0.0,
        Some(Ok(hours)) if hours >= 0.0 => hours,
        Some(Ok(hours)) => {
            warnings.push(DataQualityWarning::InvalidDuration {
                kind: EntityKind::TimeEntry,
                id: fields.record_id.clone(),
                raw: hours.to_string(),
            });
            0.0
        }
        Some(Err(raw)) => {
            warnings.push(DataQualityWarning::InvalidDuration {
                kind: EntityKind::TimeEntry,
                id: fields.record_id.clone(),
                raw,
            });
            0.0
        }
    };
    Some(TimeEntry {
        id,
        task_id: fields.reference(&["task_id", "taskId", "TaskId"], "task_id", warnings),
        user_id: fields.reference(&["user_id", "userId", "UserId"], "user_id", warnings),
        duration,
        date: fields.timestamp(&["date", "Date"], "date", warnings),
        description: fields.text_or_empty(DESCRIPTION),
    })
}

/// Users are kept even without an identifier; they still appear in team listings.
pub fn normalize_user(raw: &Value, warnings: &mut Vec<DataQualityWarning>) -> Option<User> {
    let mut fields = Fields::new(raw, EntityKind::User)?;
    fields.record_id = fields.id(ID);
    let name = fields.non_blank(&["Name", "name"]);
    Some(User {
        id: fields.record_id.clone(),
        name,
        email: fields.non_blank(&["email", "Email"]),
        role: fields.non_blank(&["role", "Role"]),
        status: fields.token(STATUS, "status", warnings),
    })
}
