#![allow(dead_code)]

// Shared fixtures for the black-box flows.
//
// Reuses the crate's snapshot JSON so both test layers agree on the same data.

use chrono::{DateTime, TimeZone, Utc};
use project_metrics::adapters::in_memory::in_memory_source::InMemorySource;
use project_metrics::application::snapshot_loader::SnapshotSources;
use serde_json::Value;
use std::fs;
use std::sync::Arc;

pub struct FixtureSources {
    pub projects: Arc<InMemorySource>,
    pub user_stories: Arc<InMemorySource>,
    pub tasks: Arc<InMemorySource>,
    pub time_entries: Arc<InMemorySource>,
    pub users: Arc<InMemorySource>,
}

impl FixtureSources {
    pub fn wire(&self) -> SnapshotSources {
        SnapshotSources {
            projects: self.projects.clone(),
            user_stories: self.user_stories.clone(),
            tasks: self.tasks.clone(),
            time_entries: self.time_entries.clone(),
            users: self.users.clone(),
        }
    }
}

pub fn snapshot_json() -> Value {
    let json_str = fs::read_to_string("./src/test_support/fixtures/json/snapshot.json").unwrap();
    serde_json::from_str(&json_str).unwrap()
}

pub fn collection(document: &Value, name: &str) -> Vec<Value> {
    document[name].as_array().cloned().unwrap_or_default()
}

pub fn fixture_sources() -> FixtureSources {
    let document = snapshot_json();
    let source = |name: &str| Arc::new(InMemorySource::with_records(collection(&document, name)));
    FixtureSources {
        projects: source("projects"),
        user_stories: source("user_stories"),
        tasks: source("tasks"),
        time_entries: source("time_entries"),
        users: source("users"),
    }
}

pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 13, 15, 30, 0).unwrap()
}
