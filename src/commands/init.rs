use dialoguer::{Confirm, Input};

use crate::config::{parse_backend_url, Config, DEFAULT_BACKEND_URL};
use crate::error::{Result, TaskboardError};

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let overwrite = Confirm::new()
            .with_prompt(format!(
                "Config file already exists at {}. Overwrite?",
                config_path.display()
            ))
            .default(false)
            .interact()?;

        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Taskboard CLI Configuration");
    println!("===========================\n");

    let backend_url: String = Input::new()
        .with_prompt("Backend URL")
        .default(DEFAULT_BACKEND_URL.to_string())
        .validate_with(|input: &String| {
            parse_backend_url(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| TaskboardError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    std::fs::write(&config_path, render_config(backend_url.trim())).map_err(|e| {
        TaskboardError::ConfigRead {
            path: config_path.clone(),
            source: e,
        }
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("Run 'taskboard login' to sign in.");

    Ok(())
}

fn render_config(backend_url: &str) -> String {
    let mut table = toml::Table::new();
    table.insert(
        "backend_url".to_string(),
        toml::Value::String(backend_url.to_string()),
    );
    toml::to_string(&table).unwrap_or_else(|_| format!("backend_url = {backend_url:?}\n"))
}
