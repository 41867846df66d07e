use crate::models::Partition;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rMemo
/// CLI application to keep tagged todo lists and weekly notes in SQLite
#[derive(Parser)]
#[command(
    name = "rmemo",
    version = env!("CARGO_PKG_VERSION"),
    about = "Tagged todo lists and a weekly notes planner, stored locally in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this nickname for one invocation (overrides `login`)
    #[arg(global = true, long = "user", short = 'u')]
    pub user: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Start a session as NICK
    Login {
        /// Free-text nickname; scopes every list and note
        nickname: String,
    },

    /// Forget the active nickname
    Logout,

    /// Show the active nickname and tag
    Whoami,

    /// Manage tags (one todo list per tag)
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Manage the todos of a tag
    Todo {
        /// Tag to work on (default: the active tag)
        #[arg(global = true, long = "tag", short = 't')]
        tag: Option<String>,

        #[command(subcommand)]
        action: TodoAction,
    },

    /// Weekly notes planner
    Week {
        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(global = true, long = "date")]
        date: Option<String>,

        #[command(subcommand)]
        action: Option<WeekAction>,
    },

    /// Export all data of the active nickname to a JSON file
    Export {
        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,

        /// Write the legacy flat key/value shape instead of the tag-based one
        #[arg(long)]
        legacy: bool,
    },

    /// Import a JSON file produced by `export`
    Import {
        /// Input file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Import into the active nickname instead of the one stored in the file
        #[arg(long = "as-current")]
        as_current: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum TagAction {
    /// List tags in order, marking the active one
    List,

    /// Create a tag and make it active
    Add { name: String },

    /// Make an existing tag active
    Use { name: String },

    /// Delete a tag together with its todo list
    Remove {
        name: String,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum TodoAction {
    /// Show active and done todos
    List,

    /// Add a todo at the end of the active list
    Add {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Delete a todo (id or row number from `todo list`)
    Del { reference: String },

    /// Move a todo between active and done, after confirmation
    Toggle {
        reference: String,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Replace the text of a todo
    Edit {
        reference: String,

        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Reorder a todo inside its partition (1-based positions)
    Move {
        /// Partition the todo is in
        #[arg(value_enum)]
        partition: Partition,

        /// Current position
        from: usize,

        /// New position
        to: usize,

        /// Destination partition; a different one than the source is ignored
        #[arg(long, value_enum)]
        into: Option<Partition>,
    },
}

#[derive(Subcommand)]
pub enum WeekAction {
    /// Show this week's notes (default)
    Show,

    /// Replace this week's notes
    Set {
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        text: Vec<String>,

        /// Read the notes from stdin
        #[arg(long, conflicts_with = "text")]
        stdin: bool,
    },

    /// Append a line to this week's notes
    Append {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Show the notes of every other week, newest first
    History,

    /// Print this week's notes as a shareable text block
    Summary,
}
