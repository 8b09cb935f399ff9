// Shared test fixture for a raw snapshot.
//
// The JSON mixes the naming styles the backend delivers (snake_case, camelCase,
// capitalized system fields, lookup objects, numeric strings). Reference "now" is
// Wednesday 2024-03-13 15:30 UTC.

use crate::core::entity::snapshot::RawSnapshot;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::fs;

// JSON -> DTO (transport shape)
#[derive(Debug, Clone, Deserialize)]
pub struct RawSnapshotDto {
    pub projects: Vec<Value>,
    pub user_stories: Vec<Value>,
    pub tasks: Vec<Value>,
    pub time_entries: Vec<Value>,
    pub users: Vec<Value>,
}

pub struct SnapshotFixture {
    inner: RawSnapshot,
}

impl Default for SnapshotFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl SnapshotFixture {
    pub fn new() -> Self {
        let json_str =
            fs::read_to_string("./src/test_support/fixtures/json/snapshot.json").unwrap();
        let dto: RawSnapshotDto = serde_json::from_str(&json_str).unwrap();

        Self {
            inner: RawSnapshot {
                projects: dto.projects,
                user_stories: dto.user_stories,
                tasks: dto.tasks,
                time_entries: dto.time_entries,
                users: dto.users,
            },
        }
    }

    pub fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 13, 15, 30, 0).unwrap()
    }

    pub fn projects(mut self, v: Vec<Value>) -> Self {
        self.inner.projects = v;
        self
    }

    pub fn tasks(mut self, v: Vec<Value>) -> Self {
        self.inner.tasks = v;
        self
    }

    pub fn time_entries(mut self, v: Vec<Value>) -> Self {
        self.inner.time_entries = v;
        self
    }

    pub fn push_time_entry(mut self, v: Value) -> Self {
        self.inner.time_entries.push(v);
        self
    }

    pub fn users(mut self, v: Vec<Value>) -> Self {
        self.inner.users = v;
        self
    }

    pub fn build(self) -> RawSnapshot {
        self.inner
    }
}
