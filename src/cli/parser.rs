use crate::core::date::TimeFrame;
use crate::export::ExportFormat;
use crate::models::Role;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for prodlog
/// CLI application to record crew production with SQLite
#[derive(Parser)]
#[command(
    name = "prodlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record crew production (linear feet), review it and export reports using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filters shared by `list`, `report` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive match on user, crew or type
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only this crew ("all" disables the filter)
    #[arg(long)]
    pub crew: Option<String>,

    /// Only this work type ("all" disables the filter)
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// First day included (YYYY/MM/DD or YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Last day included (YYYY/MM/DD or YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database, the configuration and the default admin
    Init {
        /// Password of the default `admin` account (only used on an empty user table)
        #[arg(long = "admin-password")]
        admin_password: Option<String>,
    },

    /// Manage the configuration file (view or edit)
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        /// Report keys missing from the configuration file
        #[arg(long = "check", help = "List configuration keys missing from the file")]
        check: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL).
        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database
    Db {
        #[arg(long, help = "Run pending migrations")]
        migrate: bool,

        #[arg(long, help = "Run PRAGMA integrity_check")]
        check: bool,

        #[arg(long, help = "Compact the database file")]
        vacuum: bool,

        #[arg(long, help = "Show database statistics")]
        info: bool,
    },

    /// Log in and remember the identity for later commands
    Login {
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the logged-in identity
    Logout,

    /// Show the logged-in identity
    Whoami,

    /// Create an account and log it in
    Register {
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,

        #[arg(long, value_enum, default_value = "supervisor")]
        role: Role,

        /// Crew of a supervisor
        #[arg(long)]
        crew: Option<String>,
    },

    /// Record production for a day
    Add {
        /// Date (YYYY/MM/DD, YYYY-MM-DD, today or yesterday)
        #[arg(default_value = "today")]
        date: String,

        /// Crew (defaults to your own crew)
        #[arg(long)]
        crew: Option<String>,

        /// Work type
        #[arg(long = "type", value_name = "TYPE")]
        kind: String,

        /// Linear feet completed (> 0)
        #[arg(long)]
        feet: String,
    },

    /// List the entries you can see, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Correct an entry (missing fields keep their value)
    Edit {
        id: i64,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        crew: Option<String>,

        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,

        #[arg(long)]
        feet: Option<String>,
    },

    /// Delete an entry
    Del {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Manage crews
    Crew {
        #[command(subcommand)]
        action: ReferenceAction,
    },

    /// Manage work types
    Type {
        #[command(subcommand)]
        action: ReferenceAction,
    },

    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Production analytics over a time frame
    Report {
        /// Preset range (defaults to `default_timeframe` from the config)
        #[arg(long, value_enum)]
        timeframe: Option<TimeFrame>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Export production data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        /// Preset range; without it, only --from/--to narrow the export
        #[arg(long, value_enum)]
        timeframe: Option<TimeFrame>,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print or manage the internal log table
    Log {
        /// Print rows from the internal `log` table
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        /// Only the last N rows
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Backup the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        /// Overwrite an existing file without asking
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ReferenceAction {
    /// List all names with their colour
    List,
    /// Add a name
    Add {
        name: String,
        /// Colour as #RRGGBB
        #[arg(long, default_value = "#6B7280")]
        color: String,
    },
    /// Remove a name
    Remove { name: String },
    /// Change the colour of a name
    Color { name: String, color: String },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// List accounts
    List,
    /// Create an account
    Add {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_enum, default_value = "supervisor")]
        role: Role,
        #[arg(long)]
        crew: Option<String>,
    },
    /// Delete an account
    Remove { username: String },
    /// Assign a supervisor to a crew (omit --crew to clear it)
    Crew {
        username: String,
        #[arg(long)]
        crew: Option<String>,
    },
    /// Change a password (your own, or anyone's as admin)
    Passwd {
        /// Account to change (defaults to yourself)
        username: Option<String>,
        #[arg(long)]
        password: String,
    },
}
