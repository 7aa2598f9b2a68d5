use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for rAttendance
/// CLI client to record attendance by scanning location QR codes
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "An attendance client: scan location QR codes to clock in, take breaks and clock out",
    long_about = None
)]
pub struct Cli {
    /// Override the API base URL
    #[arg(global = true, long = "api", value_name = "URL")]
    pub api: Option<String>,

    /// Override the session file (useful for tests or multiple accounts)
    #[arg(global = true, long = "session", value_name = "FILE")]
    pub session: Option<String>,

    /// Run in test mode (manual QR entry, demo locations)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
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

    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,

        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and store the session
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// End the session on the server and forget it locally
    Logout {
        #[arg(
            long,
            short = 'f',
            help = "Forget the local session even if the server call fails"
        )]
        force: bool,
    },

    /// Show the logged-in user's profile
    Me,

    /// Dashboard: current status and today's worked time
    Status,

    /// List today's attendance events
    Today,

    /// Show attendance history grouped by day
    History {
        #[arg(
            long,
            short,
            help = "Filter by year/month/day or a custom range (e.g. 2025-09 or 2025-09-01:2025-09-15)"
        )]
        period: Option<String>,

        #[arg(
            long = "param",
            value_name = "KEY=VALUE",
            help = "Extra query parameter forwarded to the server (repeatable)"
        )]
        params: Vec<String>,

        #[arg(long, value_enum, requires = "file", help = "Write the history to a file")]
        export: Option<ExportFormat>,

        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show the monthly summary
    Summary {
        #[arg(long, value_name = "YYYY-MM", help = "Month to summarize (default: current)")]
        month: Option<String>,
    },

    /// Download the server-side attendance export
    Export {
        #[arg(long, value_name = "FILE")]
        file: PathBuf,

        #[arg(
            long,
            short,
            help = "Filter export by year/month/day or a custom range"
        )]
        period: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// List the locations QR codes can be issued for
    Locations,

    /// Scan a location QR code and record an attendance action
    Scan {
        #[arg(long, value_name = "JSON", help = "Decoded QR text", conflicts_with_all = ["file", "manual"])]
        payload: Option<String>,

        #[arg(
            long,
            value_name = "FILE",
            help = "Read decoded QR text line by line from a file (default: stdin)",
            conflicts_with = "manual"
        )]
        file: Option<PathBuf>,

        #[arg(long, help = "Skip scanning and use the fixed test payload (test mode only)")]
        manual: bool,

        #[arg(
            long,
            short,
            help = "Action to record: clock_in, start_break, end_break, clock_out"
        )]
        action: Option<String>,
    },

    /// Generate a QR code for a location
    Qr {
        #[arg(long, short, value_name = "ID", help = "Location id (see `locations`)")]
        location: Option<String>,

        #[arg(
            long,
            value_name = "PATH",
            help = "Save the QR image as SVG (a directory gets the default file name)"
        )]
        svg: Option<PathBuf>,

        #[arg(long, help = "Print the raw payload text instead of the QR image")]
        payload: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
