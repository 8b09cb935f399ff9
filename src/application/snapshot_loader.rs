// Snapshot loader orchestrates the read flow.
//
// Responsibilities
// - Fetch the five collections concurrently. Any failure aborts the whole load.
// - Normalize and index the records into an immutable JoinIndex.
// - Install the index unless a refresh that started later has begun meanwhile.
//
// Readers clone the current `Arc<JoinIndex>`; a refresh never mutates an installed index.

use crate::application::errors::ApplicationError;
use crate::core::entity::model::EntityKind;
use crate::core::entity::snapshot::RawSnapshot;
use crate::core::join::index::JoinIndex;
use crate::core::ports::EntitySource;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct SnapshotSources {
    pub projects: Arc<dyn EntitySource>,
    pub user_stories: Arc<dyn EntitySource>,
    pub tasks: Arc<dyn EntitySource>,
    pub time_entries: Arc<dyn EntitySource>,
    pub users: Arc<dyn EntitySource>,
}

#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    Installed {
        generation: u64,
        index: Arc<JoinIndex>,
    },
    Superseded {
        generation: u64,
    },
}

impl RefreshOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, RefreshOutcome::Installed { .. })
    }
}

pub struct SnapshotLoader {
    sources: SnapshotSources,
    generation: AtomicU64,
    current: RwLock<Option<Arc<JoinIndex>>>,
}

async fn fetch(
    source: &dyn EntitySource,
    kind: EntityKind,
) -> Result<Vec<Value>, ApplicationError> {
    source.get_all().await.map_err(|source| {
        tracing::error!(%kind, error = %source, "fetch failed");
        ApplicationError::Fetch { kind, source }
    })
}

impl SnapshotLoader {
    pub fn new(sources: SnapshotSources) -> Self {
        Self {
            sources,
            generation: AtomicU64::new(0),
            current: RwLock::new(None),
        }
    }

    pub async fn refresh(&self) -> Result<RefreshOutcome, ApplicationError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(generation, "refreshing snapshot");

        let (projects, user_stories, tasks, time_entries, users) = tokio::try_join!(
            fetch(self.sources.projects.as_ref(), EntityKind::Project),
            fetch(self.sources.user_stories.as_ref(), EntityKind::UserStory),
            fetch(self.sources.tasks.as_ref(), EntityKind::Task),
            fetch(self.sources.time_entries.as_ref(), EntityKind::TimeEntry),
            fetch(self.sources.users.as_ref(), EntityKind::User),
        )?;

        let raw = RawSnapshot {
            projects,
            user_stories,
            tasks,
            time_entries,
            users,
        };
        let index = Arc::new(JoinIndex::build(raw.normalize()));

        let mut current = self.current.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::info!(generation, "snapshot superseded by a later refresh");
            return Ok(RefreshOutcome::Superseded { generation });
        }
        *current = Some(index.clone());
        tracing::info!(
            generation,
            projects = index.projects().len(),
            tasks = index.tasks().len(),
            time_entries = index.time_entries().len(),
            "snapshot installed"
        );
        Ok(RefreshOutcome::Installed { generation, index })
    }

    pub async fn current(&self) -> Option<Arc<JoinIndex>> {
        self.current.read().await.clone()
    }
}
