// Join index over one normalized snapshot.
//
// Purpose
// - Answer id lookups and parent to children queries in constant time.
//
// Responsibilities
// - Keep the first occurrence of a duplicated identifier and skip the rest.
// - Derive a task's project from its user story when the task does not name one.
// - Record dangling foreign keys and cached-hours drift as data-quality warnings.
// - Resolve display labels with sentinels for missing targets.
//
// Boundaries
// - Built once per snapshot and never mutated afterwards. A new snapshot means a new index.

use crate::core::entity::id::EntityId;
use crate::core::entity::model::{EntityKind, Project, Task, TimeEntry, User, UserStory};
use crate::core::entity::snapshot::Snapshot;
use crate::core::quality::DataQualityWarning;
use std::collections::{HashMap, HashSet};

pub const UNKNOWN_PROJECT: &str = "Unknown Project";
pub const UNKNOWN_STORY: &str = "Unknown Story";
pub const UNKNOWN_TASK: &str = "Unknown Task";

const DRIFT_TOLERANCE_HOURS: f64 = 0.01;

type Children = HashMap<EntityId, Vec<usize>>;

#[derive(Debug, Default)]
pub struct JoinIndex {
    projects: Vec<Project>,
    user_stories: Vec<UserStory>,
    tasks: Vec<Task>,
    time_entries: Vec<TimeEntry>,
    users: Vec<User>,

    project_by_id: HashMap<EntityId, usize>,
    story_by_id: HashMap<EntityId, usize>,
    task_by_id: HashMap<EntityId, usize>,
    entry_by_id: HashMap<EntityId, usize>,
    user_by_id: HashMap<EntityId, usize>,

    stories_by_project: Children,
    tasks_by_project: Children,
    tasks_by_story: Children,
    entries_by_task: Children,
    entries_by_project: Children,
    entries_by_user: Children,

    warnings: Vec<DataQualityWarning>,
}

fn dedupe<T>(
    items: Vec<T>,
    kind: EntityKind,
    id_of: fn(&T) -> &EntityId,
    warnings: &mut Vec<DataQualityWarning>,
) -> (Vec<T>, HashMap<EntityId, usize>) {
    let mut kept = Vec::with_capacity(items.len());
    let mut positions = HashMap::with_capacity(items.len());
    for item in items {
        let id = id_of(&item).clone();
        if positions.contains_key(&id) {
            warnings.push(DataQualityWarning::DuplicateId { kind, id });
            continue;
        }
        positions.insert(id, kept.len());
        kept.push(item);
    }
    (kept, positions)
}

fn push_child(children: &mut Children, parent: &EntityId, position: usize) {
    children.entry(parent.clone()).or_default().push(position);
}

impl JoinIndex {
    pub fn build(snapshot: Snapshot) -> Self {
        let Snapshot {
            projects,
            user_stories,
            tasks,
            time_entries,
            users,
            warnings: normalize_warnings,
        } = snapshot;
        let mut warnings = Vec::new();

        let (projects, project_by_id) =
            dedupe(projects, EntityKind::Project, |p| &p.id, &mut warnings);
        let (user_stories, story_by_id) =
            dedupe(user_stories, EntityKind::UserStory, |s| &s.id, &mut warnings);
        let (mut tasks, task_by_id) = dedupe(tasks, EntityKind::Task, |t| &t.id, &mut warnings);
        let (time_entries, entry_by_id) =
            dedupe(time_entries, EntityKind::TimeEntry, |e| &e.id, &mut warnings);

        let mut user_by_id = HashMap::new();
        let mut seen_user_ids = HashSet::new();
        let mut kept_users = Vec::with_capacity(users.len());
        for user in users {
            if let Some(id) = &user.id {
                if !seen_user_ids.insert(id.clone()) {
                    warnings.push(DataQualityWarning::DuplicateId {
                        kind: EntityKind::User,
                        id: id.clone(),
                    });
                    continue;
                }
                user_by_id.insert(id.clone(), kept_users.len());
            }
            kept_users.push(user);
        }

        let mut stories_by_project = Children::new();
        for (position, story) in user_stories.iter().enumerate() {
            if let Some(project_id) = &story.project_id {
                if !project_by_id.contains_key(project_id) {
                    warnings.push(DataQualityWarning::DanglingReference {
                        kind: EntityKind::UserStory,
                        id: story.id.clone(),
                        field: "project_id",
                        target: EntityKind::Project,
                        target_id: project_id.clone(),
                    });
                }
                push_child(&mut stories_by_project, project_id, position);
            }
        }

        let mut tasks_by_project = Children::new();
        let mut tasks_by_story = Children::new();
        for (position, task) in tasks.iter_mut().enumerate() {
            if let Some(story_id) = &task.user_story_id {
                match story_by_id.get(story_id) {
                    Some(&story_position) => {
                        if task.project_id.is_none() {
                            task.project_id = user_stories[story_position].project_id.clone();
                        }
                    }
                    None => warnings.push(DataQualityWarning::DanglingReference {
                        kind: EntityKind::Task,
                        id: task.id.clone(),
                        field: "user_story_id",
                        target: EntityKind::UserStory,
                        target_id: story_id.clone(),
                    }),
                }
                push_child(&mut tasks_by_story, story_id, position);
            }
            if let Some(project_id) = &task.project_id {
                if !project_by_id.contains_key(project_id) {
                    warnings.push(DataQualityWarning::DanglingReference {
                        kind: EntityKind::Task,
                        id: task.id.clone(),
                        field: "project_id",
                        target: EntityKind::Project,
                        target_id: project_id.clone(),
                    });
                }
                push_child(&mut tasks_by_project, project_id, position);
            }
        }

        let mut entries_by_task = Children::new();
        let mut entries_by_project = Children::new();
        let mut entries_by_user = Children::new();
        for (position, entry) in time_entries.iter().enumerate() {
            if let Some(task_id) = &entry.task_id {
                match task_by_id.get(task_id) {
                    Some(&task_position) => {
                        if let Some(project_id) = &tasks[task_position].project_id {
                            push_child(&mut entries_by_project, project_id, position);
                        }
                    }
                    None => warnings.push(DataQualityWarning::DanglingReference {
                        kind: EntityKind::TimeEntry,
                        id: entry.id.clone(),
                        field: "task_id",
                        target: EntityKind::Task,
                        target_id: task_id.clone(),
                    }),
                }
                push_child(&mut entries_by_task, task_id, position);
            }
            if let Some(user_id) = &entry.user_id {
                if !user_by_id.contains_key(user_id) {
                    warnings.push(DataQualityWarning::DanglingReference {
                        kind: EntityKind::TimeEntry,
                        id: entry.id.clone(),
                        field: "user_id",
                        target: EntityKind::User,
                        target_id: user_id.clone(),
                    });
                }
                push_child(&mut entries_by_user, user_id, position);
            }
        }

        for task in &tasks {
            let derived: f64 = entries_by_task
                .get(&task.id)
                .map(|positions| positions.iter().map(|&p| time_entries[p].duration).sum())
                .unwrap_or(0.0);
            if (task.time_logged - derived).abs() > DRIFT_TOLERANCE_HOURS {
                warnings.push(DataQualityWarning::TimeLoggedDrift {
                    task_id: task.id.clone(),
                    cached: task.time_logged,
                    derived,
                });
            }
        }

        for warning in &warnings {
            warning.report();
        }
        tracing::debug!(warnings = warnings.len(), "join index built");

        let mut all_warnings = normalize_warnings;
        all_warnings.extend(warnings);

        Self {
            projects,
            user_stories,
            tasks,
            time_entries,
            users: kept_users,
            project_by_id,
            story_by_id,
            task_by_id,
            entry_by_id,
            user_by_id,
            stories_by_project,
            tasks_by_project,
            tasks_by_story,
            entries_by_task,
            entries_by_project,
            entries_by_user,
            warnings: all_warnings,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn user_stories(&self) -> &[UserStory] {
        &self.user_stories
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn time_entries(&self) -> &[TimeEntry] {
        &self.time_entries
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Every warning raised while normalizing and indexing this snapshot.
    pub fn warnings(&self) -> &[DataQualityWarning] {
        &self.warnings
    }

    pub fn project(&self, id: &EntityId) -> Option<&Project> {
        self.project_by_id.get(id).map(|&p| &self.projects[p])
    }

    pub fn story(&self, id: &EntityId) -> Option<&UserStory> {
        self.story_by_id.get(id).map(|&p| &self.user_stories[p])
    }

    pub fn task(&self, id: &EntityId) -> Option<&Task> {
        self.task_by_id.get(id).map(|&p| &self.tasks[p])
    }

    pub fn time_entry(&self, id: &EntityId) -> Option<&TimeEntry> {
        self.entry_by_id.get(id).map(|&p| &self.time_entries[p])
    }

    pub fn user(&self, id: &EntityId) -> Option<&User> {
        self.user_by_id.get(id).map(|&p| &self.users[p])
    }

    pub fn stories_for_project(&self, project_id: &EntityId) -> Vec<&UserStory> {
        collect(&self.stories_by_project, project_id, &self.user_stories)
    }

    /// Includes tasks whose project was derived from their user story.
    pub fn tasks_for_project(&self, project_id: &EntityId) -> Vec<&Task> {
        collect(&self.tasks_by_project, project_id, &self.tasks)
    }

    pub fn tasks_for_story(&self, story_id: &EntityId) -> Vec<&Task> {
        collect(&self.tasks_by_story, story_id, &self.tasks)
    }

    pub fn entries_for_task(&self, task_id: &EntityId) -> Vec<&TimeEntry> {
        collect(&self.entries_by_task, task_id, &self.time_entries)
    }

    /// Entries reach a project through their task.
    pub fn entries_for_project(&self, project_id: &EntityId) -> Vec<&TimeEntry> {
        collect(&self.entries_by_project, project_id, &self.time_entries)
    }

    pub fn entries_for_user(&self, user_id: &EntityId) -> Vec<&TimeEntry> {
        collect(&self.entries_by_user, user_id, &self.time_entries)
    }

    pub fn project_name(&self, project_id: Option<&EntityId>) -> &str {
        project_id
            .and_then(|id| self.project(id))
            .map_or(UNKNOWN_PROJECT, |project| project.name.as_str())
    }

    pub fn story_title(&self, story_id: Option<&EntityId>) -> &str {
        story_id
            .and_then(|id| self.story(id))
            .map_or(UNKNOWN_STORY, |story| story.title.as_str())
    }

    pub fn task_title(&self, task_id: Option<&EntityId>) -> &str {
        task_id
            .and_then(|id| self.task(id))
            .map_or(UNKNOWN_TASK, |task| task.title.as_str())
    }

    pub fn project_name_for_task(&self, task_id: Option<&EntityId>) -> &str {
        let project_id = task_id
            .and_then(|id| self.task(id))
            .and_then(|task| task.project_id.as_ref());
        self.project_name(project_id)
    }
}

fn collect<'a, T>(children: &Children, parent: &EntityId, items: &'a [T]) -> Vec<&'a T> {
    children
        .get(parent)
        .map(|positions| positions.iter().map(|&p| &items[p]).collect())
        .unwrap_or_default()
}
