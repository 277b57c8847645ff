use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::TaskCategory;
use crate::pregnancy::DuaCategory;

/// Kommandoradsgränssnitt för Bloom
#[derive(Parser, Debug)]
#[command(
    name = "bloom",
    version = env!("CARGO_PKG_VERSION"),
    about = "Bloom: pregnancy journal with gestational-age tracking, local storage and cloud sync",
    long_about = None
)]
pub struct Cli {
    /// Directory for local storage (overrides settings)
    #[arg(global = true, long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// SQLite file standing in for the cloud store (overrides settings)
    #[arg(global = true, long = "cloud-db")]
    pub cloud_db: Option<PathBuf>,

    /// Act as this signed-in user for one invocation
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Verbose logging
    #[arg(global = true, short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the pregnancy profile from LMP or due date
    Setup {
        /// First day of last menstrual period (YYYY-MM-DD)
        #[arg(long, conflicts_with = "due", required_unless_present = "due")]
        lmp: Option<String>,

        /// Known due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        #[arg(long)]
        name: Option<String>,
    },

    /// Show gestational age, countdown and this week's milestone
    Status {
        /// Compute for another date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show week milestone, baby size and trimester guidance
    Guidance {
        /// Week to show (default: current week)
        week: Option<i64>,
    },

    /// Record today's check-in (mood, energy, symptoms)
    Log {
        #[arg(long)]
        date: Option<String>,

        /// Mood 1-5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        mood: Option<u8>,

        /// Energy 1-5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        energy: Option<u8>,

        /// Symptom id, optionally with severity 1-3 (e.g. nausea:2)
        #[arg(long = "symptom", value_name = "ID[:SEVERITY]")]
        symptoms: Vec<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Show tracker statistics instead of logging
        #[arg(long, conflicts_with_all = ["mood", "energy", "symptoms", "notes"])]
        stats: bool,
    },

    /// Quick notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },

    /// Appointments
    Appointment {
        #[command(subcommand)]
        action: AppointmentAction,
    },

    /// Journal entries
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },

    /// Memory book with daily prompts
    Memory {
        #[command(subcommand)]
        action: MemoryAction,
    },

    /// Bump photos (stored on this device only)
    Photo {
        #[command(subcommand)]
        action: PhotoAction,
    },

    /// Daily care plan (requires sign-in)
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Export data to JSON
    Export {
        /// Export only check-ins in readable form
        #[arg(long)]
        tracker: bool,

        /// Output file (default: generated name in current directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Sign in; migrates the local profile on first sign-in
    Login {
        user_id: String,

        #[arg(long)]
        email: Option<String>,
    },

    /// Sign out and return to local storage
    Logout,

    /// Delete the pregnancy profile
    Reset {
        /// Also clear every local collection
        #[arg(long)]
        all: bool,
    },

    /// Reminder settings and the reminder loop
    Remind {
        #[command(subcommand)]
        action: RemindAction,
    },

    /// Today's dua, or every dua in a category
    Dua {
        #[arg(long, value_parser = parse_dua_category)]
        category: Option<DuaCategory>,
    },

    /// Show or choose favourite comfort items
    Comfort {
        /// Comfort item ids to keep as favourites
        #[arg(long = "set", num_args = 1..)]
        set: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteAction {
    Add {
        content: String,
        #[arg(long)]
        pinned: bool,
    },
    List,
    Pin {
        id: String,
    },
    Unpin {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AppointmentAction {
    Add {
        title: String,

        /// Date and time, e.g. "2024-05-01 14:30" or RFC 3339
        datetime: String,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        provider: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Upcoming appointments (use --all for past ones too)
    List {
        #[arg(long)]
        all: bool,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum JournalAction {
    Add {
        title: String,
        content: String,

        #[arg(long)]
        date: Option<String>,

        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    List,
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum MemoryAction {
    /// Write today's memory (uses today's prompt unless --prompt is given)
    Add {
        content: String,

        #[arg(long)]
        prompt: Option<String>,

        #[arg(long)]
        date: Option<String>,
    },
    List {
        /// Only memories from this gestational week
        #[arg(long)]
        week: Option<i64>,
    },
    /// Show writing prompts for today
    Prompts {
        #[arg(long, default_value_t = 3)]
        count: usize,
    },
    /// This week's recap
    Recap,
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PhotoAction {
    Add {
        image_url: String,

        #[arg(long, default_value = "")]
        caption: String,

        /// Gestational week (default: current week)
        #[arg(long)]
        week: Option<i64>,
    },
    List,
    Caption {
        id: String,
        caption: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskAction {
    List {
        #[arg(long)]
        date: Option<String>,
    },
    Toggle {
        task_id: String,

        #[arg(long)]
        date: Option<String>,
    },
    Add {
        text: String,

        #[arg(long, value_parser = parse_category, default_value = "morning")]
        category: TaskCategory,

        #[arg(long)]
        note: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RemindAction {
    Show,
    Enable,
    Disable,
    /// Set quiet hours (HH:MM), or turn them off
    Quiet {
        #[arg(required_unless_present = "off")]
        start: Option<String>,

        #[arg(required_unless_present = "off")]
        end: Option<String>,

        #[arg(long)]
        off: bool,
    },
    /// Run the reminder loop in the foreground
    Run {
        /// Stop after this many minutes
        #[arg(long)]
        minutes: Option<u64>,
    },
}

fn parse_category(s: &str) -> Result<TaskCategory, String> {
    TaskCategory::from_db_str(s).ok_or_else(|| {
        let valid: Vec<&str> = TaskCategory::all().iter().map(|c| c.as_str()).collect();
        format!("unknown category '{}', expected one of: {}", s, valid.join(", "))
    })
}

fn parse_dua_category(s: &str) -> Result<DuaCategory, String> {
    DuaCategory::from_str_opt(s).ok_or_else(|| {
        let valid: Vec<&str> = DuaCategory::all().iter().map(|c| c.as_str()).collect();
        format!("unknown category '{}', expected one of: {}", s, valid.join(", "))
    })
}
