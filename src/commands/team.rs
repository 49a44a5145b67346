use tabled::Tabled;

use super::tasks::TaskRow;
use super::Session;
use crate::error::Result;
use crate::output;
use crate::types::DeveloperTaskCount;

#[derive(Tabled)]
struct DeveloperRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Tasks")]
    task_count: i64,
}

impl From<&DeveloperTaskCount> for DeveloperRow {
    fn from(dev: &DeveloperTaskCount) -> Self {
        Self {
            name: dev.developer_name.clone(),
            email: dev.developer_email.clone(),
            task_count: dev.task_count,
        }
    }
}

pub async fn overview(session: &Session) -> Result<()> {
    let developers = session.client.team_developers(&session.user.email).await?;

    if developers.is_empty() && !output::is_json_output() {
        output::print_message("No developers on your team yet.");
        return Ok(());
    }

    output::print_table(&developers, |d| DeveloperRow::from(d));
    Ok(())
}

pub async fn developer(session: &Session, email: &str) -> Result<()> {
    let tasks = session.client.developer_tasks(email).await?;

    if output::is_json_output() {
        output::print_json(&tasks);
        return Ok(());
    }

    println!("Tasks for {email}");
    if tasks.is_empty() {
        println!("No tasks assigned.");
    } else {
        output::print_table(&tasks, |t| TaskRow::from(t));
    }
    println!("Total: {} tasks", tasks.len());
    Ok(())
}
