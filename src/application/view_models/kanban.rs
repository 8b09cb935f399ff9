// Kanban board view-model: one column per status, in the caller's order.

use crate::core::entity::id::EntityId;
use crate::core::entity::model::{Priority, WorkStatus};
use crate::core::join::index::JoinIndex;
use crate::core::metrics::aggregate::is_overdue;
use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanCard {
    pub task_id: EntityId,
    pub title: String,
    pub story_title: String,
    pub project_name: String,
    pub assignee: Option<String>,
    pub priority: Priority,
    pub deadline: Option<NaiveDate>,
    pub overdue: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanColumn {
    pub status: WorkStatus,
    pub count: usize,
    pub cards: Vec<KanbanCard>,
}

pub fn assemble_kanban<Tz: TimeZone>(
    index: &JoinIndex,
    columns: &[WorkStatus],
    now: &DateTime<Tz>,
) -> Vec<KanbanColumn> {
    let tz = now.timezone();
    columns
        .iter()
        .map(|status| {
            let cards: Vec<KanbanCard> = index
                .tasks()
                .iter()
                .filter(|task| task.status == *status)
                .map(|task| KanbanCard {
                    task_id: task.id.clone(),
                    title: task.title.clone(),
                    story_title: index.story_title(task.user_story_id.as_ref()).to_string(),
                    project_name: index.project_name(task.project_id.as_ref()).to_string(),
                    assignee: task.assignee.clone(),
                    priority: task.priority,
                    deadline: task.deadline.map(|deadline| deadline.date_in(&tz)),
                    overdue: is_overdue(task, now),
                })
                .collect();
            KanbanColumn {
                status: *status,
                count: cards.len(),
                cards,
            }
        })
        .collect()
}

#[cfg(test)]
mod kanban_tests {
    use super::*;
    use crate::core::join::index::{UNKNOWN_PROJECT, UNKNOWN_STORY};
    use crate::test_support::fixtures::snapshot::SnapshotFixture;
    use rstest::rstest;

    const COLUMNS: [WorkStatus; 3] = [
        WorkStatus::Todo,
        WorkStatus::InProgress,
        WorkStatus::Completed,
    ];

    fn board() -> Vec<KanbanColumn> {
        let index = JoinIndex::build(SnapshotFixture::new().build().normalize());
        assemble_kanban(&index, &COLUMNS, &SnapshotFixture::reference_now())
    }

    #[rstest]
    fn it_should_group_tasks_by_status_in_column_order() {
        let board = board();
        let counts: Vec<_> = board.iter().map(|c| (c.status, c.count)).collect();
        assert_eq!(
            counts,
            vec![
                (WorkStatus::Todo, 2),
                (WorkStatus::InProgress, 1),
                (WorkStatus::Completed, 2),
            ]
        );
    }

    #[rstest]
    fn it_should_flag_overdue_cards_that_are_not_completed() {
        let board = board();
        let in_progress = &board[1].cards[0];
        assert_eq!(in_progress.title, "Session handling");
        assert_eq!(in_progress.story_title, "Login");
        assert_eq!(in_progress.project_name, "Website");
        assert!(in_progress.overdue);

        assert!(board[2].cards.iter().all(|card| !card.overdue));
    }

    #[rstest]
    fn it_should_label_orphan_tasks_with_sentinels() {
        let board = board();
        let stray = board[0]
            .cards
            .iter()
            .find(|card| card.task_id == EntityId::Numeric(300))
            .unwrap();
        assert_eq!(stray.story_title, UNKNOWN_STORY);
        assert_eq!(stray.project_name, UNKNOWN_PROJECT);
    }

    #[rstest]
    fn it_should_return_empty_columns_for_unused_statuses() {
        let index = JoinIndex::default();
        let board = assemble_kanban(&index, &[WorkStatus::Todo], &SnapshotFixture::reference_now());
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].count, 0);
    }
}
