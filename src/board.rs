//! Task board: tasks grouped into status columns, with optimistic status moves.

use std::future::Future;

use tracing::{debug, warn};

use crate::banner::{Banner, BannerSlot};
use crate::error::{Result, TaskboardError};
use crate::optimistic;
use crate::types::{StatusUpdate, Task, TaskStatus};

/// Backend call that confirms a status change.
pub trait StatusUpdater {
    fn update_task_status(&self, update: StatusUpdate) -> impl Future<Output = Result<()>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: TaskStatus, to: TaskStatus },
    /// Dropped back onto its own column; nothing was sent.
    Unchanged,
}

pub struct Board {
    tasks: Vec<Task>,
    banner: BannerSlot,
}

impl Board {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            banner: BannerSlot::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn column(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// All four columns in board order, empty ones included.
    pub fn columns(&self) -> Vec<(TaskStatus, Vec<&Task>)> {
        TaskStatus::ALL
            .iter()
            .map(|&status| (status, self.column(status)))
            .collect()
    }

    pub fn banner(&mut self) -> Option<&Banner> {
        self.banner.current()
    }

    /// Move a task to `to`, showing the change before the backend confirms it.
    ///
    /// If confirmation fails the whole task list is restored to what it was before the
    /// move and an error banner is raised.
    pub async fn move_task<U: StatusUpdater>(
        &mut self,
        updater: &U,
        task_id: i64,
        to: TaskStatus,
    ) -> Result<MoveOutcome> {
        let from = self
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.status)
            .ok_or(TaskboardError::TaskNotFound(task_id))?;

        if from == to {
            return Ok(MoveOutcome::Unchanged);
        }

        debug!(task_id, from = from.as_wire(), to = to.as_wire(), "moving task");
        let confirmation = updater.update_task_status(StatusUpdate {
            id: task_id,
            status: to,
        });
        let outcome = optimistic::apply_and_confirm(
            &mut self.tasks,
            |tasks| {
                if let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) {
                    task.status = to;
                }
            },
            confirmation,
        )
        .await;

        match outcome {
            Ok(()) => {
                self.banner.show(Banner::success(format!(
                    "Moved #{task_id} from {from} to {to}"
                )));
                Ok(MoveOutcome::Moved { from, to })
            }
            Err(e) => {
                warn!(task_id, error = %e, "status update failed, rolled back");
                self.banner
                    .show(Banner::error(format!("Failed to update task: {e}")));
                Err(e)
            }
        }
    }
}
