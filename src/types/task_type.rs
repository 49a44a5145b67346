use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    Bug,
    Incident,
    Maintenance,
    Feature,
}

impl TaskType {
    pub fn label(self) -> &'static str {
        match self {
            TaskType::Bug => "Bug",
            TaskType::Incident => "Incident",
            TaskType::Maintenance => "Maintenance",
            TaskType::Feature => "Feature",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
