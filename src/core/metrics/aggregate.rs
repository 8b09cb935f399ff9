// Aggregation engine.
//
// Purpose
// - Pure, total functions from entity collections to numbers the view-models display.
//
// Responsibilities
// - Counts per category in the caller's category order.
// - Completion rates as whole percentages, zero for empty input.
// - Hour totals that do not depend on input order.
// - Per-day, per-project and per-user hour buckets.
//
// Boundaries
// - No I/O, no clock. "Now" and the reference zone are always parameters.

use crate::core::entity::id::EntityId;
use crate::core::entity::model::{Priority, Task, TimeEntry, User, UserStory, WorkStatus};
use crate::core::join::index::JoinIndex;
use chrono::{DateTime, NaiveDate, TimeZone};
use std::collections::HashMap;

/// Sum of hours, kept unrounded. Round only for display.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoursTotal {
    pub raw: f64,
}

impl HoursTotal {
    pub fn rounded(&self) -> f64 {
        round_one_decimal(self.raw)
    }

    pub fn display(&self) -> String {
        format_hours(self.raw)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectHours {
    pub project_id: EntityId,
    pub name: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserUtilization {
    pub user_id: Option<EntityId>,
    pub name: Option<String>,
    pub hours_logged: f64,
    pub tasks_completed: usize,
    pub active_tasks: usize,
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn format_hours(hours: f64) -> String {
    format!("{:.1}h", round_one_decimal(hours))
}

/// Order independent sum: values are sorted, then added with Neumaier compensation.
pub fn sum_hours(mut values: Vec<f64>) -> f64 {
    values.retain(|v| v.is_finite());
    values.sort_by(f64::total_cmp);
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for value in values {
        let next = sum + value;
        if sum.abs() >= value.abs() {
            compensation += (sum - next) + value;
        } else {
            compensation += (value - next) + sum;
        }
        sum = next;
    }
    sum + compensation
}

pub fn count_by_category<'a, T: 'a, K: PartialEq>(
    items: impl IntoIterator<Item = &'a T>,
    key: impl Fn(&T) -> K,
    categories: &[K],
) -> Vec<usize> {
    let mut counts = vec![0; categories.len()];
    for item in items {
        let value = key(item);
        if let Some(position) = categories.iter().position(|category| *category == value) {
            counts[position] += 1;
        }
    }
    counts
}

pub fn count_by_status<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    statuses: &[WorkStatus],
) -> Vec<usize> {
    count_by_category(tasks, |task: &Task| task.status, statuses)
}

pub fn count_by_priority<'a>(
    stories: impl IntoIterator<Item = &'a UserStory>,
    priorities: &[Priority],
) -> Vec<usize> {
    count_by_category(stories, |story: &UserStory| story.priority, priorities)
}

pub fn completion_rate<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    is_done: impl Fn(&T) -> bool,
) -> u32 {
    let (done, total) = items.into_iter().fold((0usize, 0usize), |(done, total), item| {
        (done + usize::from(is_done(item)), total + 1)
    });
    if total == 0 {
        return 0;
    }
    (done as f64 / total as f64 * 100.0).round() as u32
}

pub fn progress_for_project(index: &JoinIndex, project_id: &EntityId) -> u32 {
    completion_rate(index.tasks_for_project(project_id), |task: &Task| {
        task.status.is_completed()
    })
}

pub fn total_hours<'a>(entries: impl IntoIterator<Item = &'a TimeEntry>) -> HoursTotal {
    HoursTotal {
        raw: sum_hours(entries.into_iter().map(|entry| entry.duration).collect()),
    }
}

pub fn average_per_unit(total: f64, units: usize) -> f64 {
    if units == 0 || !total.is_finite() {
        return 0.0;
    }
    total / units as f64
}

/// Hours per calendar day in `tz`, one value per key. Undated entries never land in a bucket.
pub fn bucket_by_day<'a, Tz: TimeZone>(
    entries: impl IntoIterator<Item = &'a TimeEntry>,
    day_keys: &[NaiveDate],
    tz: &Tz,
) -> Vec<f64> {
    let mut per_day: HashMap<NaiveDate, Vec<f64>> =
        day_keys.iter().map(|day| (*day, Vec::new())).collect();
    for entry in entries {
        let Some(date) = entry.date else { continue };
        if let Some(durations) = per_day.get_mut(&date.date_in(tz)) {
            durations.push(entry.duration);
        }
    }
    day_keys
        .iter()
        .map(|day| per_day.get(day).map_or(0.0, |durations| sum_hours(durations.clone())))
        .collect()
}

/// Projects with logged hours, most hours first. Ties keep project order.
pub fn bucket_by_project(index: &JoinIndex, top_n: usize) -> Vec<ProjectHours> {
    let mut buckets: Vec<ProjectHours> = index
        .projects()
        .iter()
        .map(|project| ProjectHours {
            project_id: project.id.clone(),
            name: project.name.clone(),
            hours: total_hours(index.entries_for_project(&project.id)).raw,
        })
        .filter(|bucket| bucket.hours > 0.0)
        .collect();
    buckets.sort_by(|a, b| b.hours.total_cmp(&a.hours));
    buckets.truncate(top_n);
    buckets
}

fn is_assigned_to(task: &Task, user: &User) -> bool {
    let by_name = matches!(
        (&task.assignee, &user.name),
        (Some(assignee), Some(name)) if assignee.trim() == name.trim()
    );
    let by_id = user.id.as_ref().is_some_and(|id| {
        task.owner.as_ref() == Some(id)
            || task.assignee.as_deref().and_then(EntityId::parse).as_ref() == Some(id)
    });
    by_name || by_id
}

pub fn team_utilization(
    users: &[User],
    entries: &[TimeEntry],
    tasks: &[Task],
) -> Vec<UserUtilization> {
    users
        .iter()
        .map(|user| {
            let hours_logged = match &user.id {
                Some(id) => sum_hours(
                    entries
                        .iter()
                        .filter(|entry| entry.user_id.as_ref() == Some(id))
                        .map(|entry| entry.duration)
                        .collect(),
                ),
                None => 0.0,
            };
            let assigned: Vec<&Task> = tasks
                .iter()
                .filter(|task| is_assigned_to(task, user))
                .collect();
            let tasks_completed = assigned.iter().filter(|task| task.status.is_completed()).count();
            UserUtilization {
                user_id: user.id.clone(),
                name: user.name.clone(),
                hours_logged,
                tasks_completed,
                active_tasks: assigned.len() - tasks_completed,
            }
        })
        .collect()
}

/// Tasks past their deadline that are not completed. Floating deadlines are read in `now`'s zone.
pub fn overdue_tasks<'a, Tz: TimeZone>(
    tasks: impl IntoIterator<Item = &'a Task>,
    now: &DateTime<Tz>,
) -> Vec<&'a Task> {
    let tz = now.timezone();
    tasks
        .into_iter()
        .filter(|task| !task.status.is_completed())
        .filter(|task| task.deadline.is_some_and(|deadline| deadline.in_zone(&tz) < *now))
        .collect()
}

pub fn is_overdue<Tz: TimeZone>(task: &Task, now: &DateTime<Tz>) -> bool {
    !overdue_tasks([task], now).is_empty()
}

/// Hours logged on a task, recomputed from its time entries instead of the cached value.
pub fn derived_time_logged(index: &JoinIndex, task_id: &EntityId) -> f64 {
    total_hours(index.entries_for_task(task_id)).raw
}
