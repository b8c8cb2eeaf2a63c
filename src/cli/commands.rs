use std::path::PathBuf;

use clap::{Parser, Subcommand};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "agencydesk",
    version = VERSION,
    about = "Task reminders, policies and dashboard KPIs for an insurance agency",
    after_help = "\
NOTE:
  Data lives in ./.agencydesk unless --home or AGENCYDESK_HOME points elsewhere.
  Run `agencydesk init` before any other command.
  Adding, completing and deleting records requires `agencydesk login <user>`.

EXIT CODES:
  0  Success
  1  Error (DB, validation, not signed in, etc.)

KPI RULES:
  overdue: due before the start of today, and not completed.
  completed this week: completed, created within the last 7 days.
  high priority open: priority high, and not completed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Data directory
    #[arg(long, global = true, env = "AGENCYDESK_HOME")]
    pub home: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the local store
    Init,

    /// Sign in as a user
    Login {
        user: String,
    },

    /// Sign out the current user
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Task reminders
    #[command(subcommand)]
    Task(TaskCommands),

    /// Insurance policies
    #[command(subcommand)]
    Policy(PolicyCommands),

    /// Show KPI cards for tasks and a policy premium summary
    Dashboard {
        /// Evaluate as of this RFC 3339 instant instead of the local clock
        #[arg(long)]
        now: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    Add {
        /// Task title
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Client the task is about
        #[arg(long)]
        client: Option<String>,
        /// low | medium | high (defaults to the configured priority)
        #[arg(long)]
        priority: Option<String>,
        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
    },
    /// List tasks
    List {
        /// Only tasks with this status tag
        #[arg(long)]
        status: Option<String>,
    },
    /// Show task details
    Show {
        /// Task ID or prefix
        id: String,
    },
    /// Mark a task in progress
    Start {
        id: String,
    },
    /// Mark a task completed
    Done {
        id: String,
    },
    /// Move a task back to pending
    Reopen {
        id: String,
    },
    /// Flip a task between completed and pending
    Toggle {
        id: String,
    },
    /// Delete a task
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum PolicyCommands {
    /// Add a policy
    Add {
        /// Policy number (unique)
        number: String,
        #[arg(long)]
        client: String,
        #[arg(long)]
        carrier: String,
        /// Line of business, e.g. "auto" or "homeowners"
        #[arg(long = "type")]
        policy_type: Option<String>,
        #[arg(long, default_value = "0")]
        premium: f64,
        /// active | pending | cancelled | expired
        #[arg(long, default_value = "active")]
        status: String,
    },
    /// List policies
    List,
    /// Show policy details
    Show {
        /// Policy number, ID or ID prefix
        reference: String,
    },
    /// Delete a policy
    Delete {
        /// Policy number, ID or ID prefix
        reference: String,
    },
}
