// Builds every view-model for one installed snapshot, ready to print as JSON.

use crate::application::view_models::dashboard::{
    DashboardOptions, DashboardView, assemble_dashboard,
};
use crate::application::view_models::kanban::{KanbanColumn, assemble_kanban};
use crate::application::view_models::labels::ViewLabels;
use crate::application::view_models::report::{
    ReportScope, ReportView, STATUS_ORDER, assemble_report,
};
use crate::application::view_models::time_tracking::{
    TimeTrackingView, assemble_time_tracking,
};
use crate::core::join::index::JoinIndex;
use crate::shell::config::AppConfig;
use chrono::{DateTime, TimeZone};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedViews {
    pub dashboard: DashboardView,
    pub report: ReportView,
    pub time_tracking: TimeTrackingView,
    pub kanban: Vec<KanbanColumn>,
    pub data_quality_warnings: Vec<String>,
}

pub fn render_views<Tz: TimeZone>(
    index: &JoinIndex,
    now: &DateTime<Tz>,
    config: &AppConfig,
) -> RenderedViews {
    let labels = ViewLabels::default();
    let options = DashboardOptions {
        top_projects: config.top_projects,
        ..DashboardOptions::default()
    };
    RenderedViews {
        dashboard: assemble_dashboard(index, now, &options, &labels),
        report: assemble_report(index, &ReportScope::All, now, &labels),
        time_tracking: assemble_time_tracking(index, config.period, now, &labels),
        kanban: assemble_kanban(index, &STATUS_ORDER, now),
        data_quality_warnings: index.warnings().iter().map(ToString::to_string).collect(),
    }
}
