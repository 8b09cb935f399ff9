// Dashboard view-model.
//
// Responsibilities
// - Headline cards for projects, tasks, team and this week's hours.
// - Task distribution, per-project progress, weekly timesheet and project time allocation.
// - Team overview and recent project rows.

use crate::application::view_models::labels::{ViewLabels, fill, or_fallback};
use crate::application::view_models::shapes::{
    BarSeries, DonutSeries, StatCard, StatValue, TimeSeries,
};
use crate::core::entity::id::EntityId;
use crate::core::entity::model::{ProjectStatus, Task, UserStatus, WorkStatus};
use crate::core::join::index::JoinIndex;
use crate::core::metrics::aggregate::{
    bucket_by_day, bucket_by_project, count_by_status, progress_for_project, round_one_decimal,
    team_utilization, total_hours,
};
use crate::core::metrics::period::{Period, resolve_window, week_days};
use chrono::{DateTime, TimeZone};
use serde::Serialize;

/// Task distribution categories, in display order.
pub const DISTRIBUTION_ORDER: [WorkStatus; 3] =
    [WorkStatus::Completed, WorkStatus::InProgress, WorkStatus::Todo];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub progress_projects: usize,
    pub recent_projects: usize,
    pub team_members: usize,
    pub top_projects: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            progress_projects: 6,
            recent_projects: 5,
            team_members: 6,
            top_projects: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRow {
    pub user_id: Option<EntityId>,
    pub name: String,
    pub role: Option<String>,
    pub hours_logged: f64,
    pub tasks_completed: usize,
    pub active_tasks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project_id: EntityId,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub progress_pct: u32,
    pub task_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: Vec<StatCard>,
    pub task_distribution: DonutSeries,
    pub project_progress: BarSeries,
    pub weekly_timesheet: TimeSeries,
    pub project_allocation: BarSeries,
    pub team_overview: Vec<TeamRow>,
    pub recent_projects: Vec<ProjectSummary>,
}

fn stat_cards<Tz: TimeZone>(
    index: &JoinIndex,
    now: &DateTime<Tz>,
    labels: &ViewLabels,
) -> Vec<StatCard> {
    let projects = index.projects();
    let active_projects = projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Active)
        .count();
    let projects_change = if active_projects > 0 {
        fill(&labels.active_projects_change, &[("count", active_projects.to_string())])
    } else {
        labels.no_active_projects.clone()
    };

    let tasks = index.tasks();
    let completed_tasks = tasks.iter().filter(|t| t.status.is_completed()).count();
    let tasks_change = fill(&labels.completed_change, &[("count", completed_tasks.to_string())]);

    let active_members = index
        .users()
        .iter()
        .filter(|u| u.status == UserStatus::Active)
        .count();
    let stories_in_progress = index
        .user_stories()
        .iter()
        .filter(|s| s.status == WorkStatus::InProgress)
        .count();
    let members_change = fill(
        &labels.stories_in_progress_change,
        &[("count", stories_in_progress.to_string())],
    );

    let week_entries = resolve_window(Period::Week, now).filter_entries(index.time_entries());
    let week_hours = total_hours(week_entries.iter().copied()).raw.round();
    let week_change = fill(
        &labels.time_entries_change,
        &[("count", week_entries.len().to_string())],
    );

    vec![
        StatCard::new(&labels.total_projects, StatValue::Number(projects.len()))
            .with_change_label(projects_change),
        StatCard::new(&labels.active_tasks, StatValue::Number(tasks.len() - completed_tasks))
            .with_change_label(tasks_change),
        StatCard::new(&labels.team_members, StatValue::Number(active_members))
            .with_change_label(members_change),
        StatCard::new(&labels.this_week, StatValue::Text(format!("{week_hours}h")))
            .with_change_label(week_change),
    ]
}

pub fn assemble_dashboard<Tz: TimeZone>(
    index: &JoinIndex,
    now: &DateTime<Tz>,
    options: &DashboardOptions,
    labels: &ViewLabels,
) -> DashboardView {
    let tasks: &[Task] = index.tasks();
    let task_distribution = DonutSeries {
        categories: DISTRIBUTION_ORDER
            .iter()
            .map(|s| labels.status(*s).to_string())
            .collect(),
        values: count_by_status(tasks, &DISTRIBUTION_ORDER),
        has_data: !tasks.is_empty(),
    };

    let progress_projects: Vec<_> = index
        .projects()
        .iter()
        .take(options.progress_projects)
        .collect();
    let project_progress = BarSeries {
        categories: progress_projects
            .iter()
            .map(|p| or_fallback(&p.name, &labels.unnamed_project))
            .collect(),
        values: progress_projects
            .iter()
            .map(|p| f64::from(progress_for_project(index, &p.id)))
            .collect(),
        has_data: !progress_projects.is_empty(),
    };

    let days = week_days(now);
    let hours = bucket_by_day(index.time_entries(), &days, &now.timezone())
        .into_iter()
        .map(round_one_decimal)
        .collect();
    let weekly_timesheet = TimeSeries::new(days, hours);

    let allocation = bucket_by_project(index, options.top_projects);
    let project_allocation = BarSeries {
        categories: allocation
            .iter()
            .map(|b| or_fallback(&b.name, &labels.unnamed_project))
            .collect(),
        values: allocation.iter().map(|b| round_one_decimal(b.hours)).collect(),
        has_data: !allocation.is_empty(),
    };

    let users = index.users();
    let members = &users[..users.len().min(options.team_members)];
    let team_overview = team_utilization(members, index.time_entries(), tasks)
        .into_iter()
        .zip(members)
        .map(|(usage, user)| TeamRow {
            user_id: usage.user_id,
            name: usage.name.unwrap_or_else(|| labels.unknown_user.clone()),
            role: user.role.clone(),
            hours_logged: round_one_decimal(usage.hours_logged),
            tasks_completed: usage.tasks_completed,
            active_tasks: usage.active_tasks,
        })
        .collect();

    let recent_projects = index
        .projects()
        .iter()
        .take(options.recent_projects)
        .map(|p| ProjectSummary {
            project_id: p.id.clone(),
            name: or_fallback(&p.name, &labels.unnamed_project),
            description: or_fallback(&p.description, &labels.no_description),
            status: p.status,
            progress_pct: progress_for_project(index, &p.id),
            task_count: index.tasks_for_project(&p.id).len(),
        })
        .collect();

    DashboardView {
        stats: stat_cards(index, now, labels),
        task_distribution,
        project_progress,
        weekly_timesheet,
        project_allocation,
        team_overview,
        recent_projects,
    }
}
