// Display strings the assemblers put into view-models.
//
// Callers override any field; `Default` is English. Templates use `{name}` placeholders.

use crate::core::entity::model::{Priority, WorkStatus};
use crate::core::metrics::period::Period;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewLabels {
    pub total_projects: String,
    pub active_projects_change: String,
    pub no_active_projects: String,
    pub active_tasks: String,
    pub completed_change: String,
    pub team_members: String,
    pub stories_in_progress_change: String,
    pub this_week: String,
    pub time_entries_change: String,

    pub task_completion_rate: String,
    pub tasks_completed_change: String,
    pub story_completion_rate: String,
    pub stories_completed_change: String,
    pub total_time_logged: String,
    pub across_entries_change: String,
    pub average_task_time: String,
    pub per_completed_task_change: String,

    pub period_total: String,
    pub period_entries: String,
    pub average_per_entry: String,

    pub todo: String,
    pub in_progress: String,
    pub completed: String,
    pub high: String,
    pub medium: String,
    pub low: String,

    pub today: String,
    pub week: String,
    pub month: String,
    pub all_time: String,
    pub custom_range: String,

    pub unknown_user: String,
    pub unnamed_project: String,
    pub no_description: String,
}

impl Default for ViewLabels {
    fn default() -> Self {
        Self {
            total_projects: "Total Projects".into(),
            active_projects_change: "{count} active".into(),
            no_active_projects: "No active projects".into(),
            active_tasks: "Active Tasks".into(),
            completed_change: "{count} completed".into(),
            team_members: "Team Members".into(),
            stories_in_progress_change: "{count} stories in progress".into(),
            this_week: "This Week".into(),
            time_entries_change: "{count} time entries".into(),

            task_completion_rate: "Task Completion Rate".into(),
            tasks_completed_change: "{done}/{total} tasks completed".into(),
            story_completion_rate: "Story Completion Rate".into(),
            stories_completed_change: "{done}/{total} stories completed".into(),
            total_time_logged: "Total Time Logged".into(),
            across_entries_change: "Across {count} entries".into(),
            average_task_time: "Avg. Task Time".into(),
            per_completed_task_change: "per completed task".into(),

            period_total: "Total Time".into(),
            period_entries: "Entries".into(),
            average_per_entry: "Avg per Entry".into(),

            todo: "To Do".into(),
            in_progress: "In Progress".into(),
            completed: "Completed".into(),
            high: "High".into(),
            medium: "Medium".into(),
            low: "Low".into(),

            today: "Today".into(),
            week: "This Week".into(),
            month: "This Month".into(),
            all_time: "All Time".into(),
            custom_range: "Custom Range".into(),

            unknown_user: "Unknown User".into(),
            unnamed_project: "Unnamed Project".into(),
            no_description: "No description available".into(),
        }
    }
}

impl ViewLabels {
    pub fn status(&self, status: WorkStatus) -> &str {
        match status {
            WorkStatus::Todo => &self.todo,
            WorkStatus::InProgress => &self.in_progress,
            WorkStatus::Completed => &self.completed,
        }
    }

    pub fn priority(&self, priority: Priority) -> &str {
        match priority {
            Priority::High => &self.high,
            Priority::Medium => &self.medium,
            Priority::Low => &self.low,
        }
    }

    pub fn period(&self, period: Period) -> &str {
        match period {
            Period::Today => &self.today,
            Period::Week => &self.week,
            Period::Month => &self.month,
            Period::All => &self.all_time,
            Period::Custom { .. } => &self.custom_range,
        }
    }
}

/// `fallback` when `text` is blank.
pub fn or_fallback(text: &str, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

/// Replaces each `{name}` placeholder in `template`.
pub fn fill(template: &str, values: &[(&str, String)]) -> String {
    values.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}
