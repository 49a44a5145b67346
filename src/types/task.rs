use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{TaskStatus, TaskType};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub task_type: TaskType,
    #[serde(default)]
    pub assigned_to: Option<i64>,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl Task {
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        self.deadline.as_deref().and_then(parse_date)
    }

    pub fn completed_date(&self) -> Option<NaiveDate> {
        self.completed_at.as_deref().and_then(parse_date)
    }
}

/// Body of create and update requests.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub assigned_to: Option<i64>,
    pub deadline: Option<String>,
}

impl TaskForm {
    /// Prefill an edit form from an existing task. Deadlines are cut to their date.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            task_type: task.task_type,
            status: task.status,
            assigned_to: task.assigned_to,
            deadline: task
                .deadline_date()
                .map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Body of `PATCH /task/update-task-status`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct StatusUpdate {
    pub id: i64,
    pub status: TaskStatus,
}

/// Parse the date part of a backend date or timestamp.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and zone-less `YYYY-MM-DDTHH:MM:SS[.f]`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": 7,
            "title": "Fix login redirect",
            "description": null,
            "status": "IN_PROGRESS",
            "taskType": "BUG",
            "assignedTo": 3,
            "assignedToName": "Ada Obi",
            "createdBy": 1,
            "deadline": "2026-10-21T00:00:00",
            "completedAt": null
        }"#
    }

    #[test]
    fn deserializes_backend_task() {
        let task: Task = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.task_type, TaskType::Bug);
        assert_eq!(task.assigned_to_name.as_deref(), Some("Ada Obi"));
        assert_eq!(task.deadline_date(), NaiveDate::from_ymd_opt(2026, 10, 21));
        assert_eq!(task.completed_date(), None);
    }

    #[test]
    fn edit_form_keeps_date_part_of_deadline() {
        let task: Task = serde_json::from_str(sample_json()).unwrap();
        let form = TaskForm::from_task(&task);
        assert_eq!(form.deadline.as_deref(), Some("2026-10-21"));
        assert_eq!(form.description, "");

        let body = serde_json::to_value(&form).unwrap();
        assert_eq!(body["taskType"], "BUG");
        assert_eq!(body["assignedTo"], 3);
    }

    #[test]
    fn parse_date_handles_backend_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 1, 5);
        assert_eq!(parse_date("2026-01-05"), expected);
        assert_eq!(parse_date("2026-01-05T10:30:00Z"), expected);
        assert_eq!(parse_date("2026-01-05T10:30:00.123"), expected);
        assert_eq!(parse_date("next tuesday"), None);
    }
}
