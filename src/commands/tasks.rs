use chrono::{Local, NaiveDate};
use dialoguer::Confirm;
use tabled::Tabled;
use tracing::info;

use super::Session;
use crate::banner::Banner;
use crate::cli::{TaskCreateArgs, TaskListArgs, TaskUpdateArgs};
use crate::dashboard;
use crate::error::{Result, TaskboardError};
use crate::output::{self, format_date_long, format_date_only, truncate};
use crate::types::{Task, TaskForm};
use crate::validation::is_blank;

#[derive(Tabled)]
pub struct TaskRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Type")]
    task_type: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: truncate(&task.title, 50),
            status: task.status.colored(),
            task_type: task.task_type.label().to_string(),
            assignee: task.assigned_to_name.clone().unwrap_or_else(|| "Unassigned".to_string()),
            deadline: task.deadline.as_deref().map(format_date_only).unwrap_or_default(),
        }
    }
}

pub async fn list(session: &Session, args: TaskListArgs) -> Result<()> {
    let tasks = session.own_tasks().await?;
    let today = Local::now().date_naive();
    let tasks = filter_tasks(tasks, &args, today);

    if tasks.is_empty() && !output::is_json_output() {
        output::print_message("No tasks found");
        return Ok(());
    }

    output::print_table(&tasks, |t| TaskRow::from(t));
    Ok(())
}

/// Apply the list filters. `--upcoming` also orders by deadline.
pub fn filter_tasks(tasks: Vec<Task>, args: &TaskListArgs, today: NaiveDate) -> Vec<Task> {
    let mut tasks: Vec<Task> = tasks
        .into_iter()
        .filter(|t| args.status.is_none_or(|s| t.status == s))
        .filter(|t| args.task_type.is_none_or(|ty| t.task_type == ty))
        .collect();

    if args.upcoming {
        tasks = dashboard::upcoming_deadlines(&tasks, today)
            .into_iter()
            .cloned()
            .collect();
    }
    tasks
}

pub async fn view(session: &Session, id: i64) -> Result<()> {
    let tasks = session.own_tasks().await?;
    let task = tasks
        .into_iter()
        .find(|t| t.id == id)
        .ok_or(TaskboardError::TaskNotFound(id))?;

    output::print_item(&task, print_details);
    Ok(())
}

fn print_details(task: &Task) {
    println!("#{} - {}", task.id, task.title);
    println!();
    match task.description.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(desc) => println!("{desc}"),
        None => println!("No description provided"),
    }
    println!();
    println!("Status:    {}", task.status.colored());
    println!("Type:      {}", task.task_type);
    println!(
        "Assignee:  {}",
        task.assigned_to_name.as_deref().unwrap_or("Unassigned")
    );
    if let Some(deadline) = &task.deadline {
        println!("Deadline:  {}", format_date_long(deadline));
    }
    if let Some(completed) = &task.completed_at {
        println!("Completed: {}", format_date_long(completed));
    }
}

pub async fn create(session: &Session, args: TaskCreateArgs) -> Result<()> {
    let form = TaskForm {
        title: args.title,
        description: args.description,
        task_type: args.task_type,
        status: args.status,
        assigned_to: args.assignee,
        deadline: args.deadline,
    };
    validate_form(&form)?;

    let task = session
        .client
        .create_task(&form)
        .await
        .map_err(|e| e.or_message("Failed to create task"))?;

    info!(task_id = task.id, "task created");
    output::print_banner(&Banner::success("Task created successfully"));
    output::print_table(std::slice::from_ref(&task), |t| TaskRow::from(t));
    Ok(())
}

pub async fn update(session: &Session, args: TaskUpdateArgs) -> Result<()> {
    let tasks = session.own_tasks().await?;
    let current = tasks
        .iter()
        .find(|t| t.id == args.id)
        .ok_or(TaskboardError::TaskNotFound(args.id))?;

    let original = TaskForm::from_task(current);
    let form = apply_updates(original.clone(), &args);
    if form == original {
        output::print_message("No updates specified");
        return Ok(());
    }
    validate_form(&form)?;

    let task = session
        .client
        .update_task(args.id, &form)
        .await
        .map_err(|e| e.or_message("Failed to update task"))?;

    info!(task_id = task.id, "task updated");
    output::print_banner(&Banner::success("Task updated successfully"));
    output::print_table(std::slice::from_ref(&task), |t| TaskRow::from(t));
    Ok(())
}

/// Overlay the fields given on the command line onto the current form.
pub fn apply_updates(mut form: TaskForm, args: &TaskUpdateArgs) -> TaskForm {
    if let Some(title) = &args.title {
        form.title = title.clone();
    }
    if let Some(description) = &args.description {
        form.description = description.clone();
    }
    if let Some(task_type) = args.task_type {
        form.task_type = task_type;
    }
    if let Some(status) = args.status {
        form.status = status;
    }
    if args.unassign {
        form.assigned_to = None;
    } else if let Some(assignee) = args.assignee {
        form.assigned_to = Some(assignee);
    }
    if let Some(deadline) = &args.deadline {
        form.deadline = Some(deadline.clone());
    }
    form
}

pub fn validate_form(form: &TaskForm) -> Result<()> {
    if is_blank(&form.title) {
        return Err(TaskboardError::Validation("Title is required".to_string()));
    }
    if let Some(deadline) = &form.deadline {
        NaiveDate::parse_from_str(deadline, "%Y-%m-%d").map_err(|_| {
            TaskboardError::Validation(format!(
                "Deadline must be a date like 2026-11-01, got '{deadline}'"
            ))
        })?;
    }
    Ok(())
}

pub async fn delete(session: &Session, id: i64, yes: bool) -> Result<()> {
    let confirm = |id: i64| if yes { Ok(true) } else { confirm_delete(id) };
    delete_confirmed(session, id, confirm).await?;
    Ok(())
}

fn confirm_delete(id: i64) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(format!("Delete task #{id}? This cannot be undone."))
        .default(false)
        .interact()?)
}

/// Delete `id` once `confirm` agrees. Returns whether anything was deleted.
pub async fn delete_confirmed(
    session: &Session,
    id: i64,
    confirm: impl FnOnce(i64) -> Result<bool>,
) -> Result<bool> {
    if !confirm(id)? {
        output::print_message("Aborted.");
        return Ok(false);
    }

    session
        .client
        .delete_task(id)
        .await
        .map_err(|e| e.or_message("Failed to delete task"))?;

    info!(task_id = id, "task deleted");
    output::print_banner(&Banner::success("Task deleted successfully"));
    Ok(true)
}
