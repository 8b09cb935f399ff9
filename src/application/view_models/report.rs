// Report view-model.
//
// Responsibilities
// - Summary cards for task and story completion, total time and average time per completed task.
// - Task status and story priority distributions.
// - Trailing seven day time trend and hours per project.
// - One performance row per project in scope.

use crate::application::view_models::labels::{ViewLabels, fill, or_fallback};
use crate::application::view_models::shapes::{
    BarSeries, DonutSeries, PerformanceRow, StatCard, StatValue, TimeSeries,
};
use crate::core::entity::id::EntityId;
use crate::core::entity::model::{Priority, Project, Task, TimeEntry, UserStory, WorkStatus};
use crate::core::join::index::JoinIndex;
use crate::core::metrics::aggregate::{
    average_per_unit, bucket_by_day, bucket_by_project, completion_rate, count_by_priority,
    count_by_status, format_hours, progress_for_project, round_one_decimal, total_hours,
};
use crate::core::metrics::period::trailing_days;
use chrono::{DateTime, TimeZone};
use serde::Serialize;

pub const STATUS_ORDER: [WorkStatus; 3] =
    [WorkStatus::Todo, WorkStatus::InProgress, WorkStatus::Completed];
pub const PRIORITY_ORDER: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];
pub const TREND_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReportScope {
    #[default]
    All,
    Project(EntityId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub summary: Vec<StatCard>,
    pub task_status: DonutSeries,
    pub story_priority: DonutSeries,
    pub time_trend: TimeSeries,
    pub hours_by_project: BarSeries,
    pub performance: Vec<PerformanceRow>,
}

struct Scoped<'a> {
    projects: Vec<&'a Project>,
    stories: Vec<&'a UserStory>,
    tasks: Vec<&'a Task>,
    entries: Vec<&'a TimeEntry>,
}

fn scoped<'a>(index: &'a JoinIndex, scope: &ReportScope) -> Scoped<'a> {
    match scope {
        ReportScope::All => Scoped {
            projects: index.projects().iter().collect(),
            stories: index.user_stories().iter().collect(),
            tasks: index.tasks().iter().collect(),
            entries: index.time_entries().iter().collect(),
        },
        ReportScope::Project(id) => {
            if index.project(id).is_none() {
                tracing::debug!(project_id = %id, "report scoped to an unknown project");
            }
            Scoped {
                projects: index.project(id).into_iter().collect(),
                stories: index.stories_for_project(id),
                tasks: index.tasks_for_project(id),
                entries: index.entries_for_project(id),
            }
        }
    }
}

fn summary(scope: &Scoped<'_>, labels: &ViewLabels) -> Vec<StatCard> {
    let tasks_done = scope.tasks.iter().filter(|t| t.status.is_completed()).count();
    let tasks_rate =
        completion_rate(scope.tasks.iter().copied(), |t: &Task| t.status.is_completed());
    let stories_done = scope.stories.iter().filter(|s| s.status.is_completed()).count();
    let stories_rate =
        completion_rate(scope.stories.iter().copied(), |s: &UserStory| s.status.is_completed());
    let total = total_hours(scope.entries.iter().copied());

    vec![
        StatCard::new(&labels.task_completion_rate, StatValue::Text(format!("{tasks_rate}%")))
            .with_change_label(fill(
                &labels.tasks_completed_change,
                &[("done", tasks_done.to_string()), ("total", scope.tasks.len().to_string())],
            )),
        StatCard::new(&labels.story_completion_rate, StatValue::Text(format!("{stories_rate}%")))
            .with_change_label(fill(
                &labels.stories_completed_change,
                &[("done", stories_done.to_string()), ("total", scope.stories.len().to_string())],
            )),
        StatCard::new(&labels.total_time_logged, StatValue::Text(total.display()))
            .with_change_label(fill(
                &labels.across_entries_change,
                &[("count", scope.entries.len().to_string())],
            )),
        StatCard::new(
            &labels.average_task_time,
            StatValue::Text(format_hours(average_per_unit(total.raw, tasks_done))),
        )
        .with_change_label(labels.per_completed_task_change.clone()),
    ]
}

pub fn assemble_report<Tz: TimeZone>(
    index: &JoinIndex,
    scope: &ReportScope,
    now: &DateTime<Tz>,
    labels: &ViewLabels,
) -> ReportView {
    let scope = scoped(index, scope);

    let task_status = DonutSeries {
        categories: STATUS_ORDER.iter().map(|s| labels.status(*s).to_string()).collect(),
        values: count_by_status(scope.tasks.iter().copied(), &STATUS_ORDER),
        has_data: !scope.tasks.is_empty(),
    };
    let story_priority = DonutSeries {
        categories: PRIORITY_ORDER.iter().map(|p| labels.priority(*p).to_string()).collect(),
        values: count_by_priority(scope.stories.iter().copied(), &PRIORITY_ORDER),
        has_data: !scope.stories.is_empty(),
    };

    let days = trailing_days(now, TREND_DAYS);
    let trend = bucket_by_day(scope.entries.iter().copied(), &days, &now.timezone())
        .into_iter()
        .map(round_one_decimal)
        .collect();
    let time_trend = TimeSeries::new(days, trend);

    let in_scope: Vec<&EntityId> = scope.projects.iter().map(|p| &p.id).collect();
    let buckets: Vec<_> = bucket_by_project(index, usize::MAX)
        .into_iter()
        .filter(|b| in_scope.contains(&&b.project_id))
        .collect();
    let hours_by_project = BarSeries {
        categories: buckets
            .iter()
            .map(|b| or_fallback(&b.name, &labels.unnamed_project))
            .collect(),
        values: buckets.iter().map(|b| round_one_decimal(b.hours)).collect(),
        has_data: !buckets.is_empty(),
    };

    let performance = scope
        .projects
        .iter()
        .map(|project| {
            let tasks = index.tasks_for_project(&project.id);
            PerformanceRow {
                project_id: project.id.clone(),
                project_name: or_fallback(&project.name, &labels.unnamed_project),
                tasks_completed: tasks.iter().filter(|t| t.status.is_completed()).count(),
                tasks_total: tasks.len(),
                stories_count: index.stories_for_project(&project.id).len(),
                hours_logged: total_hours(index.entries_for_project(&project.id)).rounded(),
                progress_pct: progress_for_project(index, &project.id),
            }
        })
        .collect();

    ReportView {
        summary: summary(&scope, labels),
        task_status,
        story_priority,
        time_trend,
        hours_by_project,
        performance,
    }
}

#[cfg(test)]
mod report_tests {
    use super::*;
    use crate::core::entity::snapshot::RawSnapshot;
    use crate::test_support::fixtures::snapshot::SnapshotFixture;
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn now() -> DateTime<Utc> {
        SnapshotFixture::reference_now()
    }

    #[fixture]
    fn index() -> JoinIndex {
        JoinIndex::build(SnapshotFixture::new().build().normalize())
    }

    fn summary_values(view: &ReportView) -> Vec<(StatValue, Option<String>)> {
        view.summary
            .iter()
            .map(|c| (c.value.clone(), c.change_label.clone()))
            .collect()
    }

    #[rstest]
    fn it_should_summarise_every_project(index: JoinIndex, now: DateTime<Utc>) {
        let view = assemble_report(&index, &ReportScope::All, &now, &ViewLabels::default());
        assert_eq!(
            summary_values(&view),
            vec![
                (StatValue::Text("40%".into()), Some("2/5 tasks completed".into())),
                (StatValue::Text("33%".into()), Some("1/3 stories completed".into())),
                (StatValue::Text("8.0h".into()), Some("Across 6 entries".into())),
                (StatValue::Text("4.0h".into()), Some("per completed task".into())),
            ]
        );
    }

    #[rstest]
    fn it_should_narrow_the_summary_to_one_project(index: JoinIndex, now: DateTime<Utc>) {
        let scope = ReportScope::Project(EntityId::Numeric(1));
        let view = assemble_report(&index, &scope, &now, &ViewLabels::default());
        assert_eq!(
            summary_values(&view),
            vec![
                (StatValue::Text("33%".into()), Some("1/3 tasks completed".into())),
                (StatValue::Text("0%".into()), Some("0/2 stories completed".into())),
                (StatValue::Text("5.5h".into()), Some("Across 4 entries".into())),
                (StatValue::Text("5.5h".into()), Some("per completed task".into())),
            ]
        );
        assert_eq!(view.performance.len(), 1);
        assert_eq!(view.hours_by_project.categories, vec!["Website"]);
    }

    #[rstest]
    fn it_should_build_the_distributions(index: JoinIndex, now: DateTime<Utc>) {
        let view = assemble_report(&index, &ReportScope::All, &now, &ViewLabels::default());
        assert_eq!(view.task_status.categories, vec!["To Do", "In Progress", "Completed"]);
        assert_eq!(view.task_status.values, vec![2, 1, 2]);
        assert_eq!(view.story_priority.categories, vec!["High", "Medium", "Low"]);
        assert_eq!(view.story_priority.values, vec![1, 1, 1]);
    }

    #[rstest]
    fn it_should_trend_the_last_seven_days(index: JoinIndex, now: DateTime<Utc>) {
        let view = assemble_report(&index, &ReportScope::All, &now, &ViewLabels::default());
        assert_eq!(view.time_trend.buckets.len(), 7);
        assert_eq!(view.time_trend.hours, vec![0.0, 0.0, 0.0, 0.0, 1.5, 2.3, 2.0]);
    }

    #[rstest]
    fn it_should_list_performance_per_project(index: JoinIndex, now: DateTime<Utc>) {
        let view = assemble_report(&index, &ReportScope::All, &now, &ViewLabels::default());
        let website = &view.performance[0];
        assert_eq!(website.project_name, "Website");
        assert_eq!(
            (website.tasks_completed, website.tasks_total, website.stories_count),
            (1, 3, 2)
        );
        assert_eq!(website.hours_logged, 5.5);
        assert_eq!(website.progress_pct, 33);

        let unnamed = &view.performance[2];
        assert_eq!((unnamed.tasks_total, unnamed.hours_logged, unnamed.progress_pct), (0, 0.0, 0));
        assert_eq!(view.hours_by_project.values, vec![5.5, 2.0]);
    }

    #[rstest]
    fn it_should_label_unnamed_projects(now: DateTime<Utc>) {
        let index = JoinIndex::build(
            RawSnapshot {
                projects: vec![json!({"Id": 5, "Name": "  "})],
                tasks: vec![json!({"Id": 50, "project_id": 5})],
                time_entries: vec![
                    json!({"Id": 500, "task_id": 50, "duration": 1.5, "date": "2024-03-12"}),
                ],
                ..RawSnapshot::default()
            }
            .normalize(),
        );
        let view = assemble_report(&index, &ReportScope::All, &now, &ViewLabels::default());
        assert_eq!(view.hours_by_project.categories, vec!["Unnamed Project"]);
        assert_eq!(view.performance[0].project_name, "Unnamed Project");
    }

    #[rstest]
    fn it_should_report_an_unknown_project_as_empty(index: JoinIndex, now: DateTime<Utc>) {
        let scope = ReportScope::Project(EntityId::Text("missing".into()));
        let view = assemble_report(&index, &scope, &now, &ViewLabels::default());
        assert!(!view.task_status.has_data);
        assert!(!view.story_priority.has_data);
        assert!(!view.time_trend.has_data);
        assert!(!view.hours_by_project.has_data);
        assert!(view.performance.is_empty());
        assert_eq!(view.summary[0].value, StatValue::Text("0%".into()));
        assert_eq!(view.summary[3].value, StatValue::Text("0.0h".into()));
    }

    #[rstest]
    fn it_should_handle_an_empty_snapshot(now: DateTime<Utc>) {
        let index = JoinIndex::build(RawSnapshot::default().normalize());
        let view = assemble_report(&index, &ReportScope::All, &now, &ViewLabels::default());
        assert_eq!(view.task_status.values, vec![0, 0, 0]);
        assert_eq!(view.summary[2].value, StatValue::Text("0.0h".into()));
    }
}
