use serde::{Deserialize, Serialize};

/// Per-developer task total, computed server-side for a lead's team.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperTaskCount {
    pub developer_email: String,
    pub developer_name: String,
    pub task_count: i64,
}

/// Entry in the assignee dropdown.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperOption {
    pub id: i64,
    pub full_name: String,
    pub email: String,
}
