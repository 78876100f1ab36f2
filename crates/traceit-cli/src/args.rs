// NOTE: Command Organization Rationale
//
// Why namespaced subcommands (not flat)?
// - Namespaces (auth, report, comment, watch) group related operations
// - Improves --help discoverability and conceptual clarity
// - Example: `report approve` vs `report delete` vs flat `approve-report`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "traceit")]
#[command(about = "Report, browse and discuss campus lost & found items", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory for config and session state
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Backend origin, overriding the configured value
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the initial configuration file
    Init {
        /// Backend origin to store in the config
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Sign in, register, or inspect the stored session
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Browse, submit and moderate reports
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },

    /// Read and post discussion comments
    Comment {
        #[command(subcommand)]
        command: CommentCommand,
    },

    /// Live-poll a report's discussion, or the item feed with --feed
    Watch {
        /// Report to watch (omit together with --feed for the item feed)
        report_id: Option<String>,

        /// Watch the item listing instead of one report's comments
        #[arg(long)]
        feed: bool,

        /// Poll period in seconds (defaults: 5 for a report, 10 for the feed)
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Role to sign in as; the backend rejects a mismatch
        #[arg(long, default_value = "student")]
        role: RoleArg,
    },
    /// Create a student account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show who is signed in
    Status,
}

#[derive(Subcommand)]
pub enum ReportCommand {
    /// List reports (approved only by default; --all needs admin)
    List {
        /// Use the unfiltered moderation listing
        #[arg(long)]
        all: bool,
        /// Client-side status filter over the fetched list
        #[arg(long)]
        status: Option<StatusArg>,
    },
    /// Submit a new report (lands as pending until approved)
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Image file to attach
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Show one report, optionally with its discussion
    Show {
        report_id: String,
        /// Render the comment thread too
        #[arg(long)]
        comments: bool,
    },
    /// Approve a pending report (admin)
    Approve { report_id: String },
    /// Delete a report (admin, irreversible)
    Delete {
        report_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum CommentCommand {
    /// Render a report's discussion thread
    List { report_id: String },
    /// Post a comment, or a reply with --reply-to
    Post {
        report_id: String,
        #[arg(long)]
        content: String,
        /// Id of the comment being replied to
        #[arg(long)]
        reply_to: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Student,
    Admin,
}

impl From<RoleArg> for traceit_types::Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Student => traceit_types::Role::Student,
            RoleArg::Admin => traceit_types::Role::Admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    Approved,
}

impl From<StatusArg> for traceit_types::ReportStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Pending => traceit_types::ReportStatus::Pending,
            StatusArg::Approved => traceit_types::ReportStatus::Approved,
        }
    }
}
