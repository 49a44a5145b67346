use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::types::{Role, TaskStatus, TaskType};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A CLI for the Taskboard task tracker", version)]
#[command(after_help = "EXAMPLES:
    taskboard login -e dev@example.com     Log in and cache the session
    taskboard dashboard                    Show your role's dashboard
    taskboard board                        Show tasks grouped by status
    taskboard board move 42 in-progress    Change a task's status
    taskboard task create -t \"Title\" --type bug   Create a task (lead only)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, compact)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show detailed error information and debug logs
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account (an activation email is sent)
    #[command(after_help = "EXAMPLES:
    taskboard register -n \"Ada Obi\" -e ada@example.com --role developer
    taskboard register -n \"Lena Park\" -e lena@example.com --role lead-developer")]
    Register(RegisterArgs),
    /// Send the account activation link again
    #[command(after_help = "EXAMPLES:
    taskboard resend-activation ada@example.com")]
    ResendActivation {
        /// Email the account was registered with
        email: String,
    },
    /// Log in and cache the session locally
    #[command(after_help = "EXAMPLES:
    taskboard login -e ada@example.com
    TASKBOARD_PASSWORD=... taskboard login -e ada@example.com")]
    Login(LoginArgs),
    /// Log out and clear the cached session
    Logout,
    /// Show the cached session
    Whoami,
    /// Request a password reset link
    #[command(after_help = "EXAMPLES:
    taskboard forgot-password ada@example.com")]
    ForgotPassword {
        /// Account email
        email: String,
    },
    /// Set a new password using the token from the reset email
    #[command(after_help = "EXAMPLES:
    taskboard reset-password --token 3f9c...")]
    ResetPassword(ResetPasswordArgs),
    /// Show the dashboard for your role
    #[command(
        alias = "d",
        after_help = "EXAMPLES:
    taskboard dashboard
    taskboard dashboard --all"
    )]
    Dashboard(DashboardArgs),
    /// Task board grouped by status
    #[command(
        alias = "b",
        after_help = "EXAMPLES:
    taskboard board
    taskboard board move 42 blocked"
    )]
    Board {
        #[command(subcommand)]
        action: Option<BoardCommands>,
    },
    /// Manage tasks
    #[command(
        alias = "t",
        after_help = "EXAMPLES:
    taskboard task list
    taskboard task view 42
    taskboard task create -t \"Fix login\" --type bug --assignee 3 --deadline 2026-11-01
    taskboard task update 42 --status completed
    taskboard task delete 42 --yes"
    )]
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// List tasks (alias for 'task list')
    Tasks(TaskListArgs),
    /// Team overview for lead developers
    #[command(after_help = "EXAMPLES:
    taskboard team overview
    taskboard team developer ada@example.com")]
    Team {
        #[command(subcommand)]
        action: TeamCommands,
    },
    /// List developers that tasks can be assigned to
    Developers,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    taskboard completions bash > ~/.bash_completion.d/taskboard
    taskboard completions zsh > ~/.zfunc/_taskboard")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Subcommand)]
pub enum BoardCommands {
    /// Show the board
    Show,
    /// Move a task to another status column
    #[command(alias = "mv")]
    Move {
        /// Task ID
        id: i64,
        /// Target status
        #[arg(value_enum)]
        status: TaskStatus,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks (a lead's created tasks, or a developer's assigned tasks)
    #[command(alias = "ls")]
    List(TaskListArgs),
    /// View task details
    #[command(alias = "v")]
    View {
        /// Task ID
        id: i64,
    },
    /// Create a new task (lead only)
    #[command(alias = "c")]
    Create(TaskCreateArgs),
    /// Update an existing task (lead only)
    #[command(alias = "u")]
    Update(TaskUpdateArgs),
    /// Delete a task (lead only)
    Delete {
        /// Task ID
        id: i64,

        /// Delete without asking for confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum TeamCommands {
    /// Developers on your team with their task counts
    #[command(alias = "ls")]
    Overview,
    /// Tasks assigned to one developer
    Developer {
        /// Developer email
        email: String,
    },
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Full name
    #[arg(long, short = 'n')]
    pub full_name: String,

    /// Email address
    #[arg(long, short)]
    pub email: String,

    /// Password (prompted when omitted; also read from TASKBOARD_PASSWORD)
    #[arg(long, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Account role
    #[arg(long, value_enum)]
    pub role: Option<Role>,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Email address
    #[arg(long, short)]
    pub email: String,

    /// Password (prompted when omitted; also read from TASKBOARD_PASSWORD)
    #[arg(long, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct ResetPasswordArgs {
    /// Token from the reset link
    #[arg(long)]
    pub token: String,

    /// New password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,

    /// Repeat of the new password (prompted when omitted)
    #[arg(long)]
    pub confirm: Option<String>,
}

#[derive(Args, Clone)]
pub struct DashboardArgs {
    /// Show every team member and upcoming deadline instead of the first three
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Clone)]
pub struct TaskListArgs {
    /// Filter by status
    #[arg(long, value_enum)]
    pub status: Option<TaskStatus>,

    /// Filter by task type
    #[arg(long = "type", value_enum)]
    pub task_type: Option<TaskType>,

    /// Only tasks due within the next 7 days
    #[arg(long)]
    pub upcoming: bool,
}

#[derive(Args)]
pub struct TaskCreateArgs {
    /// Task title
    #[arg(long, short)]
    pub title: String,

    /// Task description
    #[arg(long, short, default_value = "")]
    pub description: String,

    /// Task type
    #[arg(long = "type", value_enum)]
    pub task_type: TaskType,

    /// Initial status
    #[arg(long, value_enum, default_value = "todo")]
    pub status: TaskStatus,

    /// Developer ID to assign (see 'taskboard developers')
    #[arg(long)]
    pub assignee: Option<i64>,

    /// Deadline (YYYY-MM-DD)
    #[arg(long)]
    pub deadline: Option<String>,
}

#[derive(Args)]
pub struct TaskUpdateArgs {
    /// Task ID
    pub id: i64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New task type
    #[arg(long = "type", value_enum)]
    pub task_type: Option<TaskType>,

    /// New status
    #[arg(long, value_enum)]
    pub status: Option<TaskStatus>,

    /// Developer ID to assign
    #[arg(long, conflicts_with = "unassign")]
    pub assignee: Option<i64>,

    /// Remove the current assignee
    #[arg(long)]
    pub unassign: bool,

    /// New deadline (YYYY-MM-DD)
    #[arg(long)]
    pub deadline: Option<String>,
}
