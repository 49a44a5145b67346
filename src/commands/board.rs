use std::collections::BTreeMap;

use colored::Colorize;

use super::tasks::TaskRow;
use super::Session;
use crate::banner::Banner;
use crate::board::{Board, MoveOutcome};
use crate::error::{Result, TaskboardError};
use crate::output;
use crate::types::TaskStatus;

pub async fn show(session: &Session) -> Result<()> {
    let board = Board::new(session.own_tasks().await?);
    print_board(&board);
    Ok(())
}

pub async fn move_task(session: &Session, id: i64, to: TaskStatus) -> Result<()> {
    let mut board = Board::new(session.own_tasks().await?);

    let result = board.move_task(&session.client, id, to).await;
    if let Some(banner) = board.banner() {
        output::print_banner(banner);
    }

    match result {
        Ok(MoveOutcome::Moved { .. }) => {
            if !output::is_json_output() {
                print_board(&board);
            }
            Ok(())
        }
        Ok(MoveOutcome::Unchanged) => {
            output::print_banner(&Banner::notice(format!("Task #{id} is already {to}")));
            Ok(())
        }
        // Nothing was applied locally, so there is nothing to roll back.
        Err(e @ TaskboardError::TaskNotFound(_)) => Err(e),
        Err(_) => {
            if !output::is_json_output() {
                print_board(&board);
            }
            Err(TaskboardError::MoveRolledBack(id))
        }
    }
}

pub fn print_board(board: &Board) {
    if output::is_json_output() {
        let columns: BTreeMap<&str, Vec<_>> = board
            .columns()
            .into_iter()
            .map(|(status, tasks)| (status.as_wire(), tasks))
            .collect();
        output::print_json(&columns);
        return;
    }

    for (status, tasks) in board.columns() {
        println!("{} ({})", status.colored(), tasks.len());
        if tasks.is_empty() {
            println!("  {}", "No tasks".bright_black());
        } else {
            let owned: Vec<_> = tasks.into_iter().cloned().collect();
            output::print_table(&owned, |t| TaskRow::from(t));
        }
        println!();
    }
}
