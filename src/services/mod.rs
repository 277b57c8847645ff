//! Tjänster för Bloom
//!
//! Innehåller logiken ovanpå lagringen: val av lagring, molnet,
//! dagsplan, påminnelser, export och statistik.

pub mod cloud_store;
pub mod export;
pub mod milestones;
pub mod persistence;
pub mod query_cache;
pub mod scheduler;
pub mod stats;
pub mod tasks;

pub use cloud_store::CloudStore;
pub use export::{ExportKind, ExportResult, ExportService};
pub use milestones::check_milestone;
pub use persistence::{MigrationOutcome, PersistenceMode, PersistenceSelector, ProfileQuery};
pub use query_cache::{Collection, QueryCache};
pub use scheduler::{check_reminders, LogNotifier, NotificationScheduler, Notifier};
pub use stats::{tracker_stats, weekly_recap, StatsService, TrackerStats, WeeklyRecap};
pub use tasks::{TaskRemote, TaskService, SIGN_IN_TO_TRACK_TASKS};
