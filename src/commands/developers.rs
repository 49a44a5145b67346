use tabled::Tabled;

use super::Session;
use crate::error::Result;
use crate::output;
use crate::types::DeveloperOption;

#[derive(Tabled)]
struct DeveloperOptionRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

impl From<&DeveloperOption> for DeveloperOptionRow {
    fn from(dev: &DeveloperOption) -> Self {
        Self {
            id: dev.id,
            name: dev.full_name.clone(),
            email: dev.email.clone(),
        }
    }
}

pub async fn list(session: &Session) -> Result<()> {
    let developers = session.client.developer_dropdown().await?;
    output::print_table(&developers, |d| DeveloperOptionRow::from(d));
    Ok(())
}
