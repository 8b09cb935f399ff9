// One consistent set of the five entity collections.
//
// Responsibilities
// - RawSnapshot holds the records exactly as the sources returned them.
// - Snapshot holds the normalized entities plus the warnings raised while normalizing.

use crate::core::entity::model::{Project, Task, TimeEntry, User, UserStory};
use crate::core::entity::normalize::{
    normalize_project, normalize_task, normalize_time_entry, normalize_user, normalize_user_story,
};
use crate::core::quality::DataQualityWarning;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSnapshot {
    pub projects: Vec<Value>,
    pub user_stories: Vec<Value>,
    pub tasks: Vec<Value>,
    pub time_entries: Vec<Value>,
    pub users: Vec<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    pub user_stories: Vec<UserStory>,
    pub tasks: Vec<Task>,
    pub time_entries: Vec<TimeEntry>,
    pub users: Vec<User>,
    pub warnings: Vec<DataQualityWarning>,
}

fn normalize_all<T>(
    records: &[Value],
    warnings: &mut Vec<DataQualityWarning>,
    normalize: fn(&Value, &mut Vec<DataQualityWarning>) -> Option<T>,
) -> Vec<T> {
    records
        .iter()
        .filter_map(|record| normalize(record, warnings))
        .collect()
}

impl RawSnapshot {
    pub fn normalize(&self) -> Snapshot {
        let mut warnings = Vec::new();
        let snapshot = Snapshot {
            projects: normalize_all(&self.projects, &mut warnings, normalize_project),
            user_stories: normalize_all(&self.user_stories, &mut warnings, normalize_user_story),
            tasks: normalize_all(&self.tasks, &mut warnings, normalize_task),
            time_entries: normalize_all(&self.time_entries, &mut warnings, normalize_time_entry),
            users: normalize_all(&self.users, &mut warnings, normalize_user),
            warnings: Vec::new(),
        };
        for warning in &warnings {
            warning.report();
        }
        tracing::debug!(
            projects = snapshot.projects.len(),
            user_stories = snapshot.user_stories.len(),
            tasks = snapshot.tasks.len(),
            time_entries = snapshot.time_entries.len(),
            users = snapshot.users.len(),
            warnings = warnings.len(),
            "snapshot normalized"
        );
        Snapshot {
            warnings,
            ..snapshot
        }
    }
}

#[cfg(test)]
mod snapshot_tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn it_should_normalize_every_collection_and_drop_unlinkable_records() {
        let raw = RawSnapshot {
            projects: vec![json!({"Id": 1, "Name": "Website"}), json!({"Name": "no id"})],
            user_stories: vec![json!({"Id": 1, "project_id": 1})],
            tasks: vec![json!({"Id": 1, "status": "weird"})],
            time_entries: vec![json!({"Id": 1, "duration": 2})],
            users: vec![json!({"Name": "Ada"})],
        };

        let snapshot = raw.normalize();

        assert_eq!(snapshot.projects.len(), 1);
        assert_eq!(snapshot.user_stories.len(), 1);
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.time_entries.len(), 1);
        assert_eq!(snapshot.users.len(), 1);
        assert_eq!(snapshot.warnings.len(), 1);
    }

    #[rstest]
    fn it_should_normalize_an_empty_snapshot() {
        let snapshot = RawSnapshot::default().normalize();
        assert!(snapshot.projects.is_empty());
        assert!(snapshot.warnings.is_empty());
    }
}
