//! CLI argument definitions for Collabcut.

mod line;

pub use line::split_line;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Collabcut - projects, tasks, chat, documents and decisions for one session.
///
/// Every run starts from the mock seed and keeps nothing afterwards. Use
/// `collab session` to run several commands against the same session.
#[derive(Parser, Debug)]
#[command(name = "collab")]
#[command(author, version, about = "Session-scoped team collaboration from the command line", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Start from an empty store instead of the mock seed
    #[arg(long, global = true)]
    pub no_seed: bool,

    /// Act as this user id (overrides COLLAB_USER and config.kdl)
    #[arg(long = "user", global = true)]
    pub user: Option<String>,

    /// Toggle behaviour for done tasks (reset, restore)
    #[arg(long, global = true)]
    pub toggle_behavior: Option<String>,

    /// Path to config.kdl.
    /// Can also be set via COLLAB_CONFIG environment variable.
    #[arg(long = "config", global = true, env = "COLLAB_CONFIG")]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// One line of an interactive session.
#[derive(Parser, Debug)]
#[command(name = "collab", no_binary_name = true, disable_version_flag = true)]
pub struct SessionLine {
    /// Output in human-readable format for this line
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Project management commands
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Task management commands
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Decision timeline commands
    Decision {
        #[command(subcommand)]
        command: DecisionCommands,
    },

    /// Team chat commands
    Chat {
        #[command(subcommand)]
        command: ChatCommands,
    },

    /// Document commands (metadata only, no file content is stored)
    Doc {
        #[command(subcommand)]
        command: DocCommands,
    },

    /// Sign in (any well-formed credentials are accepted)
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(short, long)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,

        /// Password confirmation
        #[arg(short, long = "confirm")]
        confirm: String,

        /// Profile type (client, investor, developer)
        #[arg(short = 't', long = "profile-type")]
        profile_type: String,
    },

    /// Sign out
    Logout,

    /// Profile commands for the session user
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Show the navigation menu
    Nav {
        /// Path used to highlight the active link
        #[arg(long, default_value = "/dashboard")]
        current: String,
    },

    /// Resolve a page path against the session (e.g., /projects/1)
    Navigate {
        /// Page path
        path: String,
    },

    /// Read commands from stdin, one per line, against one session
    Session,
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects, newest first
    List,

    /// Show a project with its team, tasks, documents and decisions
    Show {
        /// Project ID (e.g., 1)
        id: String,
    },

    /// Create a new project owned by the session user
    Create {
        /// Project name (at least 3 characters)
        name: String,

        /// Description (at least 10 characters)
        #[arg(short, long)]
        description: String,

        /// Methodology (agile, waterfall, kanban, scrum)
        #[arg(short, long, default_value = "agile")]
        methodology: String,
    },

    /// Show completion progress
    Progress {
        /// Project ID
        id: String,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks, newest first
    List {
        /// Filter by project
        #[arg(long)]
        project: Option<String>,

        /// Only tasks assigned to the session user
        #[arg(long)]
        mine: bool,

        /// Filter by status (todo, inprogress, done, archived)
        #[arg(long)]
        status: Option<String>,
    },

    /// Show task details
    Show {
        /// Task ID (e.g., t1)
        id: String,
    },

    /// Create a task in a project
    Create {
        /// Project ID
        project: String,

        /// Task title (at least 3 characters)
        title: String,

        /// Assignee user IDs (repeatable, must be on the project team)
        #[arg(short, long = "assignee")]
        assignee: Vec<String>,

        /// Task description
        #[arg(short, long)]
        description: Option<String>,

        /// Due date (YYYY-MM-DD, not in the past)
        #[arg(long)]
        due: Option<String>,
    },

    /// Toggle a task between done and not done
    Toggle {
        /// Task ID
        id: String,
    },

    /// Set a task's status (todo, inprogress, done, archived)
    Status {
        /// Task ID
        id: String,

        /// New status
        status: String,
    },
}

/// Decision subcommands
#[derive(Subcommand, Debug)]
pub enum DecisionCommands {
    /// List decisions, newest first
    List {
        /// Filter by project
        #[arg(long)]
        project: Option<String>,

        /// Filter by tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Record a decision dated now
    Create {
        /// Project ID
        #[arg(short, long)]
        project: String,

        /// Title (at least 3 characters)
        #[arg(short, long)]
        title: String,

        /// Description (at least 10 characters)
        #[arg(short, long)]
        description: String,

        /// Who made the decision (at least 2 characters)
        #[arg(short = 'b', long = "made-by")]
        made_by: String,

        /// Comma-separated expected outcomes
        #[arg(long, default_value = "")]
        outcomes: String,

        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
}

/// Chat subcommands
#[derive(Subcommand, Debug)]
pub enum ChatCommands {
    /// List channels and project chats
    Channels,

    /// Show a channel's messages, grouped by sender
    History {
        /// Channel or project ID
        channel: String,
    },

    /// Send a message as the session user
    Send {
        /// Channel or project ID
        channel: String,

        /// Message content
        content: String,
    },
}

/// Document subcommands
#[derive(Subcommand, Debug)]
pub enum DocCommands {
    /// List documents, newest first
    List {
        /// Filter by project
        #[arg(long)]
        project: Option<String>,
    },

    /// Register a file as a project document (reads name and size only)
    Upload {
        /// File to upload
        path: PathBuf,

        /// Target project ID
        #[arg(short, long)]
        project: String,

        /// Override the size in bytes
        #[arg(long)]
        size: Option<u64>,

        /// Override the file type (defaults to the extension)
        #[arg(long = "type")]
        doc_type: Option<String>,
    },
}

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the session user's profile
    Show,

    /// Update the profile; omitted fields keep their current value
    Update {
        /// Full name
        #[arg(long)]
        name: Option<String>,

        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Profile type (client, investor, developer)
        #[arg(long = "profile-type")]
        profile_type: Option<String>,

        /// Short biography (at most 200 characters)
        #[arg(long)]
        bio: Option<String>,

        /// Current password
        #[arg(long, default_value = "")]
        current_password: String,

        /// New password (at least 8 characters, empty keeps the current one)
        #[arg(long, default_value = "")]
        new_password: String,

        /// New password confirmation
        #[arg(long, default_value = "")]
        confirm_new_password: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
        SessionLine::command().debug_assert();
    }

    #[test]
    fn test_parse_task_create() {
        let cli = Cli::try_parse_from([
            "collab", "-H", "task", "create", "1", "Write docs", "-a", "user3", "-a", "user2",
            "--due", "2030-01-01",
        ])
        .unwrap();
        assert!(cli.human_readable);
        match cli.command {
            Commands::Task {
                command: TaskCommands::Create { project, assignee, due, .. },
            } => {
                assert_eq!(project, "1");
                assert_eq!(assignee, vec!["user3", "user2"]);
                assert_eq!(due.as_deref(), Some("2030-01-01"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_session_line_has_no_binary_name() {
        let line = SessionLine::try_parse_from(["project", "list"]).unwrap();
        assert!(matches!(
            line.command,
            Commands::Project {
                command: ProjectCommands::List
            }
        ));
    }
}
