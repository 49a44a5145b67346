use chrono::{Local, NaiveDate};
use serde::Serialize;
use tabled::Tabled;
use tracing::warn;

use super::board::print_board;
use super::Session;
use crate::board::Board;
use crate::cli::DashboardArgs;
use crate::client::TaskboardClient;
use crate::dashboard::{self, TaskSummary};
use crate::error::Result;
use crate::output::{self, format_date_only};
use crate::types::{DeveloperTaskCount, Role, Task};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDashboard {
    pub summary: TaskSummary,
    pub created_count: i64,
    pub team: Vec<DeveloperTaskCount>,
    pub upcoming: Vec<Task>,
}

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "Developer")]
    name: String,
    #[tabled(rename = "Tasks")]
    task_count: i64,
}

#[derive(Tabled)]
struct DeadlineRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Due")]
    due: String,
}

pub async fn run(session: &Session, args: DashboardArgs) -> Result<()> {
    let today = Local::now().date_naive();
    match session.user.role {
        Role::LeadDeveloper => {
            let view = fetch_lead_dashboard(&session.client, &session.user.email, today).await;
            print_lead(session, &view, args.all);
        }
        Role::Developer => {
            let tasks = session.own_tasks().await?;
            let summary = dashboard::summarize(&tasks, today);
            print_developer(session, summary, Board::new(tasks));
        }
    }
    Ok(())
}

/// Fetch the three lead collections concurrently.
///
/// Each fetch fails on its own: a failed fetch is logged and shows up as empty.
pub async fn fetch_lead_dashboard(
    client: &TaskboardClient,
    email: &str,
    today: NaiveDate,
) -> LeadDashboard {
    let (tasks, team, created) = tokio::join!(
        client.lead_tasks(email),
        client.team_developers(email),
        client.lead_task_count(email),
    );

    let tasks = tasks.unwrap_or_else(|e| {
        warn!(error = %e, "failed to fetch tasks");
        Vec::new()
    });
    let team = team.unwrap_or_else(|e| {
        warn!(error = %e, "failed to fetch developer task counts");
        Vec::new()
    });
    let created_count = created.unwrap_or_else(|e| {
        warn!(error = %e, "failed to fetch created task count");
        0
    });

    LeadDashboard {
        summary: dashboard::summarize(&tasks, today),
        created_count,
        upcoming: dashboard::upcoming_deadlines(&tasks, today)
            .into_iter()
            .cloned()
            .collect(),
        team,
    }
}

fn print_lead(session: &Session, view: &LeadDashboard, all: bool) {
    if output::is_json_output() {
        output::print_json(view);
        return;
    }

    println!("Welcome, {}", session.user.full_name);
    println!();
    print_summary(&view.summary);
    println!("Tasks created:        {}", view.created_count);
    println!();

    println!("Team Overview");
    let team = dashboard::preview(&view.team, all);
    if team.is_empty() {
        println!("  No developers on your team yet.");
    } else {
        output::print_table(team, |d| TeamRow {
            name: d.developer_name.clone(),
            task_count: d.task_count,
        });
    }
    println!();

    println!("Upcoming Deadlines");
    let upcoming = dashboard::preview(&view.upcoming, all);
    if upcoming.is_empty() {
        println!("  No upcoming deadlines in the next 7 days.");
    } else {
        output::print_table(upcoming, |t| DeadlineRow {
            id: t.id,
            title: t.title.clone(),
            due: t.deadline.as_deref().map(format_date_only).unwrap_or_default(),
        });
    }
    if !all && (view.team.len() > team.len() || view.upcoming.len() > upcoming.len()) {
        println!();
        println!("Run 'taskboard dashboard --all' to see everything.");
    }
}

fn print_developer(session: &Session, summary: TaskSummary, board: Board) {
    if output::is_json_output() {
        output::print_json(&serde_json::json!({
            "summary": summary,
            "tasks": board.tasks(),
        }));
        return;
    }

    println!("Welcome, {}", session.user.full_name);
    println!();
    print_summary(&summary);
    println!();
    print_board(&board);
}

fn print_summary(summary: &TaskSummary) {
    println!(
        "Progress:             {} of {} tasks completed ({}%)",
        summary.completed, summary.total, summary.progress
    );
    println!("Completed this week:  {}", summary.completed_this_week);
    println!("Pending:              {}", summary.pending);
}
