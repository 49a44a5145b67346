mod banner;
mod board;
mod cli;
mod client;
mod commands;
mod config;
mod dashboard;
mod error;
mod jwt;
mod optimistic;
mod output;
mod session;
mod types;
mod validation;

#[cfg(test)]
mod test_support;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{BoardCommands, Cli, Commands, TaskCommands, TeamCommands};
use client::TaskboardClient;
use commands::Session;
use config::Config;
use error::Result;
use session::SessionStore;
use types::Role;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with table or JSON output.
fn init_tracing(verbose: bool) {
    let default = if verbose { "taskboard=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("TASKBOARD_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/session
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "taskboard", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        Commands::Whoami => {
            commands::auth::whoami(&SessionStore::open()?)?;
        }
        // Commands that talk to the backend
        command => {
            let config = Config::load()?;
            let base = config.backend_url()?;
            let store = SessionStore::open()?;
            let anonymous = || TaskboardClient::new(base.clone());

            match command {
                Commands::Register(args) => {
                    commands::auth::register(&anonymous(), args).await?;
                }
                Commands::ResendActivation { email } => {
                    commands::auth::resend_activation(&anonymous(), &email).await?;
                }
                Commands::Login(args) => {
                    commands::auth::login(&anonymous(), &store, args).await?;
                }
                Commands::Logout => {
                    commands::auth::logout(base.clone(), &store).await?;
                }
                Commands::ForgotPassword { email } => {
                    commands::auth::forgot_password(&anonymous(), &email).await?;
                }
                Commands::ResetPassword(args) => {
                    commands::auth::reset_password(&anonymous(), args).await?;
                }
                Commands::Dashboard(args) => {
                    let session = Session::open(base.clone(), &store)?;
                    commands::dashboard::run(&session, args).await?;
                }
                Commands::Board { action } => {
                    let session = Session::open(base.clone(), &store)?;
                    match action.unwrap_or(BoardCommands::Show) {
                        BoardCommands::Show => {
                            commands::board::show(&session).await?;
                        }
                        BoardCommands::Move { id, status } => {
                            commands::board::move_task(&session, id, status).await?;
                        }
                    }
                }
                Commands::Tasks(args) => {
                    let session = Session::open(base.clone(), &store)?;
                    commands::tasks::list(&session, args).await?;
                }
                Commands::Task { action } => match action {
                    TaskCommands::List(args) => {
                        let session = Session::open(base.clone(), &store)?;
                        commands::tasks::list(&session, args).await?;
                    }
                    TaskCommands::View { id } => {
                        let session = Session::open(base.clone(), &store)?;
                        commands::tasks::view(&session, id).await?;
                    }
                    TaskCommands::Create(args) => {
                        let session = Session::open_as(base.clone(), &store, Role::LeadDeveloper)?;
                        commands::tasks::create(&session, args).await?;
                    }
                    TaskCommands::Update(args) => {
                        let session = Session::open_as(base.clone(), &store, Role::LeadDeveloper)?;
                        commands::tasks::update(&session, args).await?;
                    }
                    TaskCommands::Delete { id, yes } => {
                        let session = Session::open_as(base.clone(), &store, Role::LeadDeveloper)?;
                        commands::tasks::delete(&session, id, yes).await?;
                    }
                },
                Commands::Team { action } => {
                    let session = Session::open_as(base.clone(), &store, Role::LeadDeveloper)?;
                    match action {
                        TeamCommands::Overview => {
                            commands::team::overview(&session).await?;
                        }
                        TeamCommands::Developer { email } => {
                            commands::team::developer(&session, &email).await?;
                        }
                    }
                }
                Commands::Developers => {
                    let session = Session::open(base.clone(), &store)?;
                    commands::developers::list(&session).await?;
                }
                Commands::Completions { .. } | Commands::Init | Commands::Whoami => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
