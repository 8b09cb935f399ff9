// Canonical entities after normalization.
//
// Purpose
// - Strict structs the join index and aggregations work on.
//
// Notes
// - Status and priority enums parse case-insensitively and accept `_` or spaces for `-`.
// - Unknown values are the caller's concern; `parse` only reports whether the token is known.

use crate::core::entity::id::EntityId;
use crate::core::entity::timestamp::Timestamp;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    UserStory,
    Task,
    TimeEntry,
    User,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Project,
        EntityKind::UserStory,
        EntityKind::Task,
        EntityKind::TimeEntry,
        EntityKind::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::UserStory => "user_story",
            EntityKind::Task => "task",
            EntityKind::TimeEntry => "time_entry",
            EntityKind::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn token(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
    Cancelled,
}

impl ProjectStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match token(raw).as_str() {
            "active" => Some(ProjectStatus::Active),
            "completed" | "complete" | "done" => Some(ProjectStatus::Completed),
            "on-hold" | "onhold" | "paused" => Some(ProjectStatus::OnHold),
            "cancelled" | "canceled" => Some(ProjectStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
            ProjectStatus::Cancelled => "cancelled",
        }
    }
}

/// Workflow status shared by user stories and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl WorkStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match token(raw).as_str() {
            "todo" | "to-do" => Some(WorkStatus::Todo),
            "in-progress" | "inprogress" => Some(WorkStatus::InProgress),
            "completed" | "complete" | "done" => Some(WorkStatus::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::Todo => "todo",
            WorkStatus::InProgress => "in-progress",
            WorkStatus::Completed => "completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, WorkStatus::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn parse(raw: &str) -> Option<Self> {
        match token(raw).as_str() {
            "low" => Some(Priority::Low),
            "medium" | "normal" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match token(raw).as_str() {
            "active" => Some(UserStatus::Active),
            "inactive" | "disabled" => Some(UserStatus::Inactive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub scope: String,
    pub goals: Vec<String>,
    pub status: ProjectStatus,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserStory {
    pub id: EntityId,
    pub project_id: Option<EntityId>,
    pub title: String,
    pub description: String,
    pub acceptance_criteria: Vec<String>,
    pub priority: Priority,
    pub status: WorkStatus,
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: EntityId,
    pub user_story_id: Option<EntityId>,
    pub project_id: Option<EntityId>,
    pub title: String,
    pub description: String,
    pub assignee: Option<String>,
    pub owner: Option<EntityId>,
    pub status: WorkStatus,
    pub priority: Priority,
    pub deadline: Option<Timestamp>,
    pub time_logged: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    pub id: EntityId,
    pub task_id: Option<EntityId>,
    pub user_id: Option<EntityId>,
    pub duration: f64,
    pub date: Option<Timestamp>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: UserStatus,
}

#[cfg(test)]
mod entity_model_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("in-progress", WorkStatus::InProgress)]
    #[case("In Progress", WorkStatus::InProgress)]
    #[case("in_progress", WorkStatus::InProgress)]
    #[case(" TODO ", WorkStatus::Todo)]
    #[case("Completed", WorkStatus::Completed)]
    fn it_should_parse_work_status_tolerantly(#[case] raw: &str, #[case] expected: WorkStatus) {
        assert_eq!(WorkStatus::parse(raw), Some(expected));
    }

    #[rstest]
    #[case("on_hold", ProjectStatus::OnHold)]
    #[case("On Hold", ProjectStatus::OnHold)]
    #[case("canceled", ProjectStatus::Cancelled)]
    fn it_should_parse_project_status_tolerantly(
        #[case] raw: &str,
        #[case] expected: ProjectStatus,
    ) {
        assert_eq!(ProjectStatus::parse(raw), Some(expected));
    }

    #[rstest]
    fn it_should_not_recognise_unknown_tokens() {
        assert_eq!(WorkStatus::parse("blocked"), None);
        assert_eq!(Priority::parse("urgent"), None);
        assert_eq!(UserStatus::parse(""), None);
    }

    #[rstest]
    fn it_should_default_to_the_documented_values() {
        assert_eq!(WorkStatus::default(), WorkStatus::Todo);
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(ProjectStatus::default(), ProjectStatus::Active);
        assert_eq!(UserStatus::default(), UserStatus::Active);
    }

    #[rstest]
    fn it_should_serialize_statuses_in_kebab_case() {
        assert_eq!(
            serde_json::to_string(&WorkStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(WorkStatus::InProgress.as_str(), "in-progress");
    }
}
