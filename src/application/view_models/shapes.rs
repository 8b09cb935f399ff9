// Presentation-ready shapes shared by every assembler.
//
// All shapes serialize in camelCase; a series reports `hasData = false` instead of
// an empty chart.

use crate::core::entity::id::EntityId;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(usize),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub title: String,
    pub value: StatValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_label: Option<String>,
}

impl StatCard {
    pub fn new(title: impl Into<String>, value: StatValue) -> Self {
        Self {
            title: title.into(),
            value,
            change_label: None,
        }
    }

    pub fn with_change_label(mut self, label: impl Into<String>) -> Self {
        self.change_label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonutSeries {
    pub categories: Vec<String>,
    pub values: Vec<usize>,
    pub has_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarSeries {
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    pub has_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub buckets: Vec<NaiveDate>,
    pub hours: Vec<f64>,
    pub has_data: bool,
}

impl TimeSeries {
    pub fn new(buckets: Vec<NaiveDate>, hours: Vec<f64>) -> Self {
        let has_data = hours.iter().any(|h| *h > 0.0);
        Self {
            buckets,
            hours,
            has_data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRow {
    pub project_id: EntityId,
    pub project_name: String,
    pub tasks_completed: usize,
    pub tasks_total: usize,
    pub stories_count: usize,
    pub hours_logged: f64,
    pub progress_pct: u32,
}
