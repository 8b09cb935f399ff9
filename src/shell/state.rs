use crate::adapters::json_file::json_file_source::JsonFileSource;
use crate::application::snapshot_loader::{SnapshotLoader, SnapshotSources};
use crate::core::entity::model::EntityKind;
use crate::shell::config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub loader: Arc<SnapshotLoader>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Self {
        let source = |kind| Arc::new(JsonFileSource::new(&config.data_dir, kind));
        let sources = SnapshotSources {
            projects: source(EntityKind::Project),
            user_stories: source(EntityKind::UserStory),
            tasks: source(EntityKind::Task),
            time_entries: source(EntityKind::TimeEntry),
            users: source(EntityKind::User),
        };
        Self {
            loader: Arc::new(SnapshotLoader::new(sources)),
            config,
        }
    }
}
