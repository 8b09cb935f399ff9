// Time-tracking view-model.
//
// Responsibilities
// - Cards for the selected period: total hours, entry count and average per entry.
// - Entry rows with task and project labels, newest first. Undated rows go last.

use crate::application::view_models::labels::ViewLabels;
use crate::application::view_models::shapes::{StatCard, StatValue};
use crate::core::entity::id::EntityId;
use crate::core::entity::model::TimeEntry;
use crate::core::join::index::JoinIndex;
use crate::core::metrics::aggregate::{average_per_unit, format_hours, total_hours};
use crate::core::metrics::period::{Period, resolve_window};
use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Serialize;
use std::cmp::Reverse;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryRow {
    pub entry_id: EntityId,
    pub task_id: Option<EntityId>,
    pub task_title: String,
    pub project_name: String,
    pub date: Option<NaiveDate>,
    pub duration: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrackingView {
    pub period_label: String,
    pub stats: Vec<StatCard>,
    pub entries: Vec<TimeEntryRow>,
}

pub fn assemble_time_tracking<Tz: TimeZone>(
    index: &JoinIndex,
    period: Period,
    now: &DateTime<Tz>,
    labels: &ViewLabels,
) -> TimeTrackingView {
    let tz = now.timezone();
    let mut entries: Vec<&TimeEntry> =
        resolve_window(period, now).filter_entries(index.time_entries());
    entries.sort_by_key(|entry| {
        Reverse(entry.date.map(|date| date.in_zone(&tz).timestamp_millis()))
    });

    let total = total_hours(entries.iter().copied());
    let period_label = labels.period(period).to_string();
    let stats = vec![
        StatCard::new(&labels.period_total, StatValue::Text(total.display()))
            .with_change_label(period_label.clone()),
        StatCard::new(&labels.period_entries, StatValue::Number(entries.len())),
        StatCard::new(
            &labels.average_per_entry,
            StatValue::Text(format_hours(average_per_unit(total.raw, entries.len()))),
        ),
    ];

    let rows = entries
        .into_iter()
        .map(|entry| TimeEntryRow {
            entry_id: entry.id.clone(),
            task_id: entry.task_id.clone(),
            task_title: index.task_title(entry.task_id.as_ref()).to_string(),
            project_name: index.project_name_for_task(entry.task_id.as_ref()).to_string(),
            date: entry.date.map(|date| date.date_in(&tz)),
            duration: entry.duration,
            description: entry.description.clone(),
        })
        .collect();

    TimeTrackingView {
        period_label,
        stats,
        entries: rows,
    }
}
