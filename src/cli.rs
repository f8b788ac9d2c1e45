use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taskscope", about = "Search and rank tasks, projects and comments")]
pub struct Cli {
    /// Path to the SQLite database [default: ~/.taskscope/taskscope.db]
    #[arg(long, env = "TASKSCOPE_DB", global = true)]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create database and tables (idempotent)
    Init,

    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    /// List projects
    Projects {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Owning project id
        #[arg(short, long)]
        project: i64,
        /// Task description
        #[arg(short, long)]
        desc: Option<String>,
        /// Task status (todo, inProgress, done)
        #[arg(short, long, default_value = "todo")]
        status: String,
        /// Task priority (low, medium, high)
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Assignee
        #[arg(short, long)]
        assignee: Option<String>,
        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
    },

    /// Edit a task
    Edit {
        /// Task id
        id: i64,
        /// New description
        #[arg(short, long)]
        desc: Option<String>,
        /// New status (todo, inProgress, done)
        #[arg(short, long)]
        status: Option<String>,
        /// New priority (low, medium, high)
        #[arg(long)]
        priority: Option<String>,
        /// New assignee
        #[arg(short, long, conflicts_with = "unassign")]
        assignee: Option<String>,
        /// Clear the assignee
        #[arg(long)]
        unassign: bool,
        /// New due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
    },

    /// Remove a task and its comments
    Rm {
        /// Task id
        id: i64,
    },

    /// Add a comment to a task
    Comment {
        /// Task id
        id: i64,
        /// Comment content (omit to read from stdin)
        content: Option<String>,
        /// Read content from stdin
        #[arg(long)]
        stdin: bool,
    },

    /// List tasks
    Tasks {
        /// Only tasks of this project
        #[arg(short, long)]
        project: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show task details and comments
    Show {
        /// Task id
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search tasks, projects and comments
    Search {
        /// Search text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Entity kinds to search (all, task, project)
        #[arg(short = 't', long = "type", default_value = "all")]
        kind: String,
        /// Page size [default: from config, else 50]
        #[arg(short, long)]
        limit: Option<usize>,
        /// Results to skip
        #[arg(short, long, default_value = "0")]
        offset: usize,
        /// Only tasks with this status
        #[arg(short, long)]
        status: Option<String>,
        /// Only tasks with this priority
        #[arg(long)]
        priority: Option<String>,
        /// Only tasks of this project
        #[arg(short, long)]
        project: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest tasks for partial input
    Suggest {
        /// Partial search text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Maximum suggestions [default: from config, else 8]
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recent searches, newest first
    Recent {
        /// Maximum entries [default: from config, else 10]
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Add a project
    Add {
        /// Project title
        title: String,
        /// Project description
        #[arg(short, long)]
        desc: Option<String>,
        /// Start date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        end: Option<String>,
    },
}
