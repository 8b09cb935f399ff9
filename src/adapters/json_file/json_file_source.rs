// JSON file entity source.
//
// Purpose
// - Serve backend exports stored on disk, one file per entity kind.
//
// Responsibilities
// - Read `<dir>/<collection>.json`.
// - Accept a bare array or the backend envelope `{ "data": [...] }`.
// - Map I/O failures to `Backend` and unexpected shapes to `Malformed`.

use crate::core::entity::model::EntityKind;
use crate::core::ports::{EntitySource, SourceError};
use serde_json::Value;
use std::path::PathBuf;

pub struct JsonFileSource {
    path: PathBuf,
}

pub fn collection_file_name(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Project => "projects.json",
        EntityKind::UserStory => "user_stories.json",
        EntityKind::Task => "tasks.json",
        EntityKind::TimeEntry => "time_entries.json",
        EntityKind::User => "users.json",
    }
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>, kind: EntityKind) -> Self {
        Self {
            path: dir.into().join(collection_file_name(kind)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

fn unwrap_records(document: Value) -> Option<Vec<Value>> {
    match document {
        Value::Array(records) => Some(records),
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(records)) => Some(records),
            Some(Value::Null) => Some(Vec::new()),
            _ => None,
        },
        _ => None,
    }
}

#[async_trait::async_trait]
impl EntitySource for JsonFileSource {
    async fn get_all(&self) -> Result<Vec<Value>, SourceError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Backend(format!("{}: {e}", self.path.display())))?;
        let document: Value = serde_json::from_str(&contents)
            .map_err(|e| SourceError::Malformed(format!("{}: {e}", self.path.display())))?;
        let records = unwrap_records(document).ok_or_else(|| {
            SourceError::Malformed(format!(
                "{}: expected an array or an object with a data array",
                self.path.display()
            ))
        })?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "records loaded");
        Ok(records)
    }
}

#[cfg(test)]
mod json_file_source_tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use std::path::Path;

    async fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "project_metrics_{}_{}",
            std::process::id(),
            name
        ));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        dir
    }

    async fn write(dir: &Path, kind: EntityKind, contents: &str) {
        tokio::fs::write(dir.join(collection_file_name(kind)), contents)
            .await
            .unwrap();
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_read_a_bare_array() {
        let dir = scratch_dir("bare").await;
        write(&dir, EntityKind::Project, r#"[{"Id": 1, "Name": "Website"}]"#).await;

        let records = JsonFileSource::new(&dir, EntityKind::Project)
            .get_all()
            .await
            .expect("JsonFileSource > get_all failed");

        assert_eq!(records, vec![json!({"Id": 1, "Name": "Website"})]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_unwrap_the_backend_envelope() {
        let dir = scratch_dir("envelope").await;
        write(&dir, EntityKind::Task, r#"{"success": true, "data": [{"Id": 7}]}"#).await;

        let records = JsonFileSource::new(&dir, EntityKind::Task).get_all().await.unwrap();

        assert_eq!(records, vec![json!({"Id": 7})]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_a_missing_file_as_a_backend_error() {
        let dir = scratch_dir("missing").await;
        let result = JsonFileSource::new(&dir, EntityKind::User).get_all().await;
        assert!(matches!(result, Err(SourceError::Backend(_))));
    }

    #[rstest]
    #[case("{not json")]
    #[case(r#"{"data": "nope"}"#)]
    #[case("42")]
    #[tokio::test]
    async fn it_should_reject_malformed_documents(#[case] contents: &str) {
        let dir = scratch_dir(&format!("malformed_{}", contents.len())).await;
        write(&dir, EntityKind::TimeEntry, contents).await;

        let result = JsonFileSource::new(&dir, EntityKind::TimeEntry).get_all().await;

        assert!(matches!(result, Err(SourceError::Malformed(_))));
    }
}
