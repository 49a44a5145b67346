//! Aggregates shown on the dashboards, computed from an already-fetched task list.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::types::{Task, TaskStatus};

pub const UPCOMING_WINDOW_DAYS: u64 = 7;
/// Entries shown on dashboard cards before "show all".
pub const PREVIEW_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Completed share, rounded to a whole percent.
    pub progress: u8,
    pub completed_this_week: usize,
}

pub fn summarize(tasks: &[Task], today: NaiveDate) -> TaskSummary {
    let total = tasks.len();
    let completed = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    let (week_start, week_end) = week_bounds(today);
    let completed_this_week = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .filter_map(Task::completed_date)
        .filter(|d| (week_start..=week_end).contains(d))
        .count();

    TaskSummary {
        total,
        completed,
        pending: total - completed,
        progress: progress_percent(completed, total),
        completed_this_week,
    }
}

pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u8
}

/// Monday and Sunday of the week containing `today`.
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from_monday = u64::from(today.weekday().num_days_from_monday());
    let start = today - Days::new(from_monday);
    (start, start + Days::new(6))
}

/// Tasks due within `today..=today + 7 days`, soonest first.
pub fn upcoming_deadlines(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    let horizon = today + Days::new(UPCOMING_WINDOW_DAYS);
    let mut upcoming: Vec<(NaiveDate, &Task)> = tasks
        .iter()
        .filter_map(|t| t.deadline_date().map(|d| (d, t)))
        .filter(|(d, _)| (today..=horizon).contains(d))
        .collect();
    upcoming.sort_by_key(|(d, t)| (*d, t.id));
    upcoming.into_iter().map(|(_, t)| t).collect()
}

/// First [`PREVIEW_LEN`] items unless `all` is set.
pub fn preview<T>(items: &[T], all: bool) -> &[T] {
    if all {
        items
    } else {
        &items[..items.len().min(PREVIEW_LEN)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: i64, status: TaskStatus, deadline: Option<&str>, completed_at: Option<&str>) -> Task {
        Task {
            id,
            title: format!("Task {id}"),
            description: Some("details".to_string()),
            status,
            task_type: TaskType::Maintenance,
            assigned_to: None,
            assigned_to_name: None,
            created_by: Some(1),
            deadline: deadline.map(String::from),
            completed_at: completed_at.map(String::from),
        }
    }

    #[test]
    fn summary_counts_and_progress() {
        // Wednesday
        let today = date(2026, 10, 21);
        let tasks = vec![
            task(1, TaskStatus::Completed, None, Some("2026-10-19T09:00:00")),
            task(2, TaskStatus::Completed, None, Some("2026-10-12T09:00:00")),
            task(3, TaskStatus::InProgress, None, None),
        ];

        let summary = summarize(&tasks, today);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.progress, 67);
        assert_eq!(summary.completed_this_week, 1);
    }

    #[test]
    fn empty_list_has_zero_progress() {
        let summary = summarize(&[], date(2026, 10, 21));
        assert_eq!(summary.progress, 0);
        assert_eq!(summary.total, 0);
    }

    #[test]
    fn week_runs_monday_to_sunday() {
        assert_eq!(
            week_bounds(date(2026, 10, 21)),
            (date(2026, 10, 19), date(2026, 10, 25))
        );
        // Sunday belongs to the week that started six days earlier.
        assert_eq!(
            week_bounds(date(2026, 10, 25)),
            (date(2026, 10, 19), date(2026, 10, 25))
        );
    }

    #[test]
    fn upcoming_includes_today_through_seven_days() {
        let today = date(2026, 10, 19);
        let tasks = vec![
            task(1, TaskStatus::Todo, Some("2026-10-18"), None),
            task(2, TaskStatus::Todo, Some("2026-10-19"), None),
            task(3, TaskStatus::Todo, Some("2026-10-26T23:59:00"), None),
            task(4, TaskStatus::Todo, Some("2026-10-27"), None),
            task(5, TaskStatus::Todo, None, None),
            task(6, TaskStatus::Blocked, Some("2026-10-22"), None),
            task(7, TaskStatus::Todo, Some("garbage"), None),
        ];

        let ids: Vec<_> = upcoming_deadlines(&tasks, today).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 6, 3]);
    }

    #[test]
    fn preview_limits_unless_all() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(preview(&items, false), &[1, 2, 3]);
        assert_eq!(preview(&items, true).len(), 5);
        assert_eq!(preview(&items[..2], false), &[1, 2]);
    }
}
