use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "trainlog", version, about = "Workout log with coach sync")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Settings file (defaults to <config dir>/trainlog/settings.json)
    #[arg(global = true, long)]
    pub config: Option<PathBuf>,

    /// Print more log messages (-v: info, -vv: debug)
    #[arg(global = true, short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List workouts, most recent first
    #[command(visible_alias = "ls")]
    List {
        /// Show at most this many workouts
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a workout
    Show {
        /// Workout id or unique prefix
        id: String,
    },

    /// Record a workout
    Add(AddArgs),

    /// Set or clear the coach feedback of a workout
    Feedback {
        /// Workout id or unique prefix
        id: String,
        /// Feedback text, empty to clear
        text: String,
    },

    /// Delete a workout
    #[command(visible_alias = "rm")]
    Delete {
        /// Workout id or unique prefix
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Weekly or monthly report
    #[command(subcommand)]
    Report(ReportCmd),

    /// Summary of this week and the most recent workouts
    Dashboard {
        /// Number of recent workouts
        #[arg(short, long, default_value = "3")]
        recent: usize,
    },

    /// Common exercises by body part
    Exercises {
        /// Only list exercises of this body part
        body_part: Option<String>,
        /// Search exercise names
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Manage the sync code shared with a coach
    #[command(subcommand)]
    Sync(SyncCmd),

    /// Print the dashboard whenever synced workouts change
    Watch,

    /// Import workouts from the legacy key-value file
    Migrate {
        /// Legacy file (defaults to <data dir>/trainlog/legacy.json)
        #[arg(long)]
        legacy: Option<PathBuf>,
    },

    /// Show recent log messages
    Log,
}

#[derive(Args)]
pub struct AddArgs {
    /// Date and time (YYYY-MM-DD or "YYYY-MM-DD HH:MM", defaults to now)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Duration in minutes
    #[arg(short = 't', long, default_value = "60")]
    pub duration: u32,

    /// Exercise as NAME:PART:SETSxREPS@WEIGHT, e.g. "Squat:legs:3x5@100" (repeatable)
    ///
    /// Multiple set groups are separated by commas ("Squat:legs:1x5@80,3x5@100"). The body part
    /// may be left empty to look it up in the exercise catalog.
    #[arg(short, long = "exercise", required = true)]
    pub exercises: Vec<String>,

    /// Photo reference (repeatable)
    #[arg(short, long = "photo")]
    pub photos: Vec<String>,

    #[arg(short, long, default_value = "")]
    pub notes: String,

    /// Coach feedback
    #[arg(short, long)]
    pub feedback: Option<String>,
}

#[derive(Subcommand)]
pub enum ReportCmd {
    /// Report of the week (Monday to Sunday)
    Weekly {
        /// Any day of the week (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Report of the calendar month
    Monthly {
        /// Any day of the month (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
pub enum SyncCmd {
    /// Show the bound sync code and the sync mode
    Show,

    /// Generate and bind a new sync code
    Generate,

    /// Bind a sync code or a share link
    Bind {
        /// Sync code or link containing a syncCode parameter
        code: String,
        /// Bind a code from a link without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Return to local-only mode
    Unbind {
        /// Also remove workouts mirrored from the remote replica
        #[arg(long)]
        clear_local: bool,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Print a link that binds the current sync code when opened
    Link {
        /// Base URL of the link
        base: String,
    },
}
