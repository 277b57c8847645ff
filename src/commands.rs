//! Körning av CLI-kommandon. Bara presentation, logiken finns i tjänsterna.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate, Utc};
use tracing::{info, warn};

use crate::cli::{
    AppointmentAction, Cli, Commands, JournalAction, MemoryAction, NoteAction, PhotoAction,
    RemindAction, TaskAction,
};
use crate::db::Database;
use crate::models::{
    is_known_comfort_item, preferred_comfort_items, AppSettings, Appointment, BumpPhoto,
    DailyLog, Identity, JournalEntry, Memory, PregnancyProfile, QuickNote, Rating, SymptomEntry,
    COMFORT_ITEMS, DAILY_TARGETS,
};
use crate::pregnancy::guidance::{find_symptom, RED_FLAG_SYMPTOMS};
use crate::pregnancy::prompts::prompts_for_date;
use crate::pregnancy::{
    daily_dua, daily_focus, duas_by_category, encouraging_message, format_gestational_age,
    get_baby_size, get_baby_size_by_week, get_today_prompt, get_trimester_guidance,
    get_week_milestone, personalized_greeting, supportive_message, weekly_affirmation, Dua,
    DuaCategory, Trimester,
};
use crate::services::{
    check_milestone, CloudStore, ExportKind, ExportService, LogNotifier, MigrationOutcome,
    NotificationScheduler, PersistenceMode, PersistenceSelector, StatsService, TaskService,
    SIGN_IN_TO_TRACK_TASKS,
};
use crate::store::LocalStore;
use crate::utils::date::{format_date, format_hhmm, parse_date, parse_datetime, parse_hhmm, today};
use crate::utils::path::display_path;
use crate::utils::AppError;

/// Inställningar och lagring för en körning
pub struct AppContext {
    pub settings: AppSettings,
    pub selector: PersistenceSelector,
}

impl AppContext {
    pub fn open(cli: &Cli) -> Result<Self> {
        let settings = AppSettings::load();

        let data_dir = cli
            .data_dir
            .clone()
            .unwrap_or_else(|| settings.local_store_path.clone());
        let cloud_path = cli
            .cloud_db
            .clone()
            .unwrap_or_else(|| settings.cloud_database_path.clone());

        let local = LocalStore::open(&data_dir).with_context(|| {
            format!("Kunde inte öppna lokal lagring i {}", display_path(&data_dir))
        })?;
        let db = Database::open(&cloud_path)
            .with_context(|| format!("Kunde inte öppna {}", display_path(&cloud_path)))?;

        let selector = PersistenceSelector::new(local, CloudStore::new(db))
            .with_default_name(settings.default_profile_name.clone())
            .with_migrated_users(settings.migrated_users.iter().cloned());

        let mut ctx = Self { settings, selector };

        let identity = match &cli.user {
            Some(user_id) => Some(Identity::new(user_id.clone(), None)),
            None => ctx.settings.session.clone(),
        };
        if identity.is_some() {
            ctx.apply_identity(identity)?;
        }

        Ok(ctx)
    }

    /// Byt användare och spara migreringsläget
    fn apply_identity(&mut self, identity: Option<Identity>) -> Result<()> {
        match self.selector.set_identity(identity) {
            Ok(MigrationOutcome::Migrated) => {
                println!("☁️  Your profile was copied to the cloud.");
            }
            Ok(MigrationOutcome::Failed) => {
                println!("Could not copy your profile to the cloud. Your local data is unchanged.");
            }
            Ok(MigrationOutcome::Skipped) => {}
            Err(e) => warn!("Molnprofilen kunde inte hämtas: {}", e),
        }

        let migrated = self.selector.migrated_users();
        if migrated != self.settings.migrated_users {
            self.settings.migrated_users = migrated;
            self.settings.save().context("Kunde inte spara inställningar")?;
        }
        Ok(())
    }

    fn require_profile(&self) -> Result<PregnancyProfile> {
        self.selector
            .get_profile()?
            .ok_or_else(|| anyhow!("Ingen profil. Kör `bloom setup --lmp YYYY-MM-DD` först."))
    }

    fn current_week(&self, date: NaiveDate) -> Result<i64> {
        Ok(self.require_profile()?.gestational_age(date).weeks)
    }
}

fn parse_day(value: Option<&str>) -> Result<NaiveDate> {
    match value {
        Some(s) => parse_date(s).ok_or_else(|| anyhow!("Ogiltigt datum: {}", s)),
        None => Ok(today()),
    }
}

/// "nausea" eller "nausea:2"
fn parse_symptom(value: &str) -> Result<SymptomEntry> {
    let (id, severity) = match value.split_once(':') {
        Some((id, sev)) => {
            let severity = sev
                .parse::<u8>()
                .map_err(|_| anyhow!("Ogiltig svårighetsgrad: {}", sev))?;
            (id, severity)
        }
        None => (value, 1),
    };
    Ok(SymptomEntry::new(id.trim(), severity))
}

/// Byt ut "inte inloggad" mot ett begripligt meddelande för dagsplanen
fn tasks_error(err: AppError) -> anyhow::Error {
    match err {
        AppError::NotAuthenticated => anyhow!(SIGN_IN_TO_TRACK_TASKS),
        other => other.into(),
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let mut ctx = AppContext::open(&cli)?;

    match cli.command {
        Commands::Setup { lmp, due, name } => cmd_setup(&mut ctx, lmp, due, name),
        Commands::Status { date } => cmd_status(&ctx, date),
        Commands::Guidance { week } => cmd_guidance(&ctx, week),
        Commands::Log {
            date,
            mood,
            energy,
            symptoms,
            notes,
            stats,
        } => {
            if stats {
                cmd_log_stats(&ctx)
            } else {
                cmd_log(&ctx, date, mood, energy, symptoms, notes)
            }
        }
        Commands::Note { action } => cmd_note(&ctx, action),
        Commands::Appointment { action } => cmd_appointment(&ctx, action),
        Commands::Journal { action } => cmd_journal(&ctx, action),
        Commands::Memory { action } => cmd_memory(&ctx, action),
        Commands::Photo { action } => cmd_photo(&ctx, action),
        Commands::Tasks { action } => cmd_tasks(&ctx, action),
        Commands::Export { tracker, output } => cmd_export(&ctx, tracker, output),
        Commands::Login { user_id, email } => cmd_login(&mut ctx, user_id, email),
        Commands::Logout => cmd_logout(&mut ctx),
        Commands::Reset { all } => cmd_reset(&mut ctx, all),
        Commands::Remind { action } => cmd_remind(&ctx, action),
        Commands::Comfort { set } => cmd_comfort(&ctx, set),
        Commands::Dua { category } => cmd_dua(category),
    }
}

// ==================== Profil ====================

fn cmd_setup(
    ctx: &mut AppContext,
    lmp: Option<String>,
    due: Option<String>,
    name: Option<String>,
) -> Result<()> {
    let profile = match (lmp, due) {
        (Some(lmp), _) => {
            let lmp = parse_day(Some(&lmp))?;
            ctx.selector.setup_profile(lmp, name.as_deref())?
        }
        (None, Some(due)) => {
            let due = parse_day(Some(&due))?;
            ctx.selector.setup_profile_with_due_date(due, name.as_deref())?
        }
        (None, None) => return Err(anyhow!("Ange --lmp eller --due")),
    };

    println!("Welcome, {}! 🌸", profile.name);
    println!("  LMP:      {}", format_date(profile.lmp()));
    println!("  Due date: {}", format_date(profile.due()));
    Ok(())
}

fn cmd_status(ctx: &AppContext, date: Option<String>) -> Result<()> {
    let day = parse_day(date.as_deref())?;
    let profile = ctx.require_profile()?;
    let ga = profile.gestational_age(day);
    let now = Local::now().time();

    println!("{}", personalized_greeting(&profile.name, day, now));
    println!("  {}", encouraging_message(day));
    println!();
    println!("{} · {}", profile.name, ga.trimester_name());
    println!("  {}", format_gestational_age(&ga));
    println!("  Progress: {:.1}%", ga.progress);
    println!("  Days to go: {}", profile.days_remaining(day));
    println!("  Due date: {}", format_date(profile.due()));
    println!();
    println!("  {}", get_week_milestone(ga.weeks));

    let size = get_baby_size_by_week(ga.weeks);
    println!("  Baby is about the size of a {} {}", size.name, size.emoji);
    println!("  {}", weekly_affirmation(ga.weeks, day));

    println!();
    println!("  💌 {}", supportive_message(day, now));
    println!("  🎯 Today's focus: {}", daily_focus(day));
    print_dua(daily_dua(day));

    // Firandet räknas bara för dagens datum
    if date.is_none() {
        if let Some(celebration) = check_milestone(ctx.selector.local(), &ga)? {
            match celebration.message {
                Some(message) => println!("\n  🎉 {}", message),
                None => println!("\n  🎉 Week {}!", ga.weeks),
            }
        }
    }

    if let Some(recap) = StatsService::new(&ctx.selector).current_week_recap(day)? {
        if recap.has_content() {
            println!();
            println!(
                "  Week {} recap: {} {}, {} memories, {} appointments",
                recap.week,
                recap.check_ins,
                recap.check_in_label(),
                recap.memories.len(),
                recap.appointments
            );
        }
    }

    let mode = match ctx.selector.mode() {
        PersistenceMode::Local => "local".to_string(),
        PersistenceMode::Cloud => format!(
            "cloud ({})",
            ctx.selector
                .identity()
                .map(|i| i.email.clone().unwrap_or_else(|| i.user_id.clone()))
                .unwrap_or_default()
        ),
    };
    info!("Lagring: {}", mode);
    Ok(())
}

fn print_dua(dua: &Dua) {
    println!();
    if let Some(arabic) = dua.arabic {
        println!("  {}", arabic);
    }
    if let Some(transliteration) = dua.transliteration {
        println!("  {}", transliteration);
    }
    println!("  \"{}\"", dua.translation);
    println!("  ({})", dua.source);
}

fn cmd_dua(category: Option<DuaCategory>) -> Result<()> {
    match category {
        Some(category) => {
            for dua in duas_by_category(category) {
                print_dua(dua);
            }
        }
        None => print_dua(daily_dua(today())),
    }
    Ok(())
}

fn cmd_guidance(ctx: &AppContext, week: Option<i64>) -> Result<()> {
    let week = match week {
        Some(w) => w,
        None => ctx.current_week(today())?,
    };
    let trimester = Trimester::from_total_days(week * 7);

    println!("Week {}: {}", week, get_week_milestone(week));

    let imperial = get_baby_size_by_week(week);
    let metric = get_baby_size(week);
    println!(
        "  {} {}: {} / {}, {} / {}",
        imperial.emoji,
        imperial.name,
        imperial.length,
        metric.length_cm,
        imperial.weight,
        metric.weight_g
    );

    let guidance = get_trimester_guidance(trimester);
    println!("\n{}", trimester.display_name());
    for (title, items) in [
        ("Do", &guidance.advice),
        ("Avoid", &guidance.avoid),
        ("Self-care", &guidance.care),
    ] {
        println!("  {}:", title);
        for item in items.iter() {
            println!("    - {}", item);
        }
    }

    println!("\nCall your provider right away if you have:");
    for flag in RED_FLAG_SYMPTOMS {
        println!("  ⚠️  {}", flag);
    }
    Ok(())
}

// ==================== Incheckningar ====================

fn cmd_log(
    ctx: &AppContext,
    date: Option<String>,
    mood: Option<u8>,
    energy: Option<u8>,
    symptoms: Vec<String>,
    notes: Option<String>,
) -> Result<()> {
    let day = parse_day(date.as_deref())?;
    let mut log = ctx
        .selector
        .get_daily_log_by_date(day)?
        .unwrap_or_else(|| DailyLog::new(day));

    if let Some(value) = mood {
        log.mood = Rating::mood(value);
    }
    if let Some(value) = energy {
        log.energy = Rating::energy(value);
    }
    if !symptoms.is_empty() {
        log.symptoms = symptoms
            .iter()
            .map(|s| parse_symptom(s))
            .collect::<Result<Vec<_>>>()?;
    }
    if notes.is_some() {
        log.notes = notes;
    }

    ctx.selector.save_daily_log(log)?;
    println!("Check-in saved for {} ✓", format_date(day));
    Ok(())
}

fn cmd_log_stats(ctx: &AppContext) -> Result<()> {
    let stats = StatsService::new(&ctx.selector).tracker_stats(today())?;

    println!("Days logged: {}", stats.total_days);
    println!("Current streak: {} day(s)", stats.streak);

    if !stats.mood_counts.is_empty() {
        println!("Moods:");
        for (label, count) in &stats.mood_counts {
            println!("  {:<12} {}", label, count);
        }
    }

    let top = stats.top_symptoms(5);
    if !top.is_empty() {
        println!("Most common symptoms:");
        for (id, count) in top {
            let label = find_symptom(id).map(|s| s.label).unwrap_or(id);
            println!("  {:<12} {}", label, count);
        }
    }
    Ok(())
}

// ==================== Anteckningar ====================

fn cmd_note(ctx: &AppContext, action: NoteAction) -> Result<()> {
    match action {
        NoteAction::Add { content, pinned } => {
            let note = QuickNote::new(content).pinned(pinned);
            let id = note.id.clone();
            ctx.selector.save_note(note)?;
            println!("Note saved ({})", id);
        }
        NoteAction::List => {
            let notes = ctx.selector.get_notes()?;
            if notes.is_empty() {
                println!("No notes yet.");
            }
            for note in notes {
                let pin = if note.pinned { "📌" } else { "  " };
                println!("{} {}  {}", pin, note.id, note.content);
            }
        }
        NoteAction::Pin { id } => set_pinned(ctx, &id, true)?,
        NoteAction::Unpin { id } => set_pinned(ctx, &id, false)?,
        NoteAction::Delete { id } => {
            ctx.selector.delete_note(&id)?;
            println!("Note deleted.");
        }
    }
    Ok(())
}

fn set_pinned(ctx: &AppContext, id: &str, pinned: bool) -> Result<()> {
    let note = ctx
        .selector
        .get_notes()?
        .into_iter()
        .find(|n| n.id == id)
        .ok_or_else(|| anyhow!("Anteckning {} hittades inte", id))?;

    ctx.selector.save_note(note.pinned(pinned))?;
    println!("{}", if pinned { "Pinned 📌" } else { "Unpinned" });
    Ok(())
}

// ==================== Tider ====================

fn cmd_appointment(ctx: &AppContext, action: AppointmentAction) -> Result<()> {
    match action {
        AppointmentAction::Add {
            title,
            datetime,
            location,
            provider,
            notes,
        } => {
            let when = parse_datetime(&datetime)
                .ok_or_else(|| anyhow!("Ogiltig tidpunkt: {}", datetime))?;
            let mut appointment = Appointment::new(title, when);
            appointment.location = location;
            appointment.provider = provider;
            appointment.notes = notes;

            ctx.selector.save_appointment(appointment)?;
            println!("Appointment saved for {}", when.format("%Y-%m-%d %H:%M"));
        }
        AppointmentAction::List { all } => {
            let appointments = if all {
                ctx.selector.get_appointments()?
            } else {
                ctx.selector.get_upcoming_appointments(Utc::now())?
            };
            if appointments.is_empty() {
                println!("No appointments.");
            }
            for a in appointments {
                println!("{}  {}  {}", a.datetime.format("%Y-%m-%d %H:%M"), a.title, a.id);
                if let Some(location) = &a.location {
                    println!("    📍 {}", location);
                }
                if let Some(provider) = &a.provider {
                    println!("    👩‍⚕️ {}", provider);
                }
            }
        }
        AppointmentAction::Delete { id } => {
            ctx.selector.delete_appointment(&id)?;
            println!("Appointment deleted.");
        }
    }
    Ok(())
}

// ==================== Dagbok ====================

fn cmd_journal(ctx: &AppContext, action: JournalAction) -> Result<()> {
    match action {
        JournalAction::Add {
            title,
            content,
            date,
            tags,
        } => {
            let day = parse_day(date.as_deref())?;
            let entry = JournalEntry::new(day, title, content).with_tags(tags);
            ctx.selector.save_journal_entry(entry)?;
            println!("Journal entry saved.");
        }
        JournalAction::List => {
            let entries = ctx.selector.get_journal_entries()?;
            if entries.is_empty() {
                println!("No journal entries yet.");
            }
            for e in entries {
                let tags = if e.tags.is_empty() {
                    String::new()
                } else {
                    format!("  #{}", e.tags.join(" #"))
                };
                println!("{}  {}{}  ({})", format_date(e.date), e.title, tags, e.id);
            }
        }
        JournalAction::Delete { id } => {
            ctx.selector.delete_journal_entry(&id)?;
            println!("Journal entry deleted.");
        }
    }
    Ok(())
}

// ==================== Minnen ====================

fn cmd_memory(ctx: &AppContext, action: MemoryAction) -> Result<()> {
    let local = ctx.selector.local();

    match action {
        MemoryAction::Add {
            content,
            prompt,
            date,
        } => {
            let day = parse_day(date.as_deref())?;
            let week = ctx.current_week(day)?;
            let prompt = prompt.unwrap_or_else(|| get_today_prompt(day).to_string());

            local.save_memory(Memory::new(day, prompt, content, week))?;
            println!("Memory saved for week {} 💕", week);
        }
        MemoryAction::List { week } => {
            let mut memories = match week {
                Some(w) => local.get_memories_for_week(w)?,
                None => local.get_memories()?,
            };
            memories.sort_by_key(|m| m.date);
            if memories.is_empty() {
                println!("No memories yet.");
            }
            for m in memories {
                println!("{}  (week {})  {}", format_date(m.date), m.week, m.prompt);
                println!("    {}", m.content);
            }
        }
        MemoryAction::Prompts { count } => {
            for prompt in prompts_for_date(today(), count) {
                println!("  ✍️  {}", prompt);
            }
        }
        MemoryAction::Recap => match StatsService::new(&ctx.selector).current_week_recap(today())? {
            Some(recap) if recap.has_content() => {
                println!("Week {} recap ({} – {})", recap.week, recap.start, recap.end);
                println!("  {} {}", recap.check_ins, recap.check_in_label());
                println!("  {} appointment(s)", recap.appointments);
                for m in &recap.memories {
                    println!("  💭 {}", m.content);
                }
            }
            Some(_) => println!("Nothing to recap this week yet."),
            None => return Err(anyhow!("Ingen profil. Kör `bloom setup` först.")),
        },
        MemoryAction::Delete { id } => {
            local.delete_memory(&id)?;
            println!("Memory deleted.");
        }
    }
    Ok(())
}

// ==================== Bilder ====================

fn cmd_photo(ctx: &AppContext, action: PhotoAction) -> Result<()> {
    let local = ctx.selector.local();

    match action {
        PhotoAction::Add {
            image_url,
            caption,
            week,
        } => {
            let week = match week {
                Some(w) => w,
                None => ctx.current_week(today())?,
            };
            local.save_bump_photo(BumpPhoto::new(image_url, caption, week))?;
            println!("Photo saved for week {} 📸", week);
        }
        PhotoAction::List => {
            let photos = ctx.selector.get_bump_photos()?;
            if photos.is_empty() {
                println!("No photos yet.");
            }
            for p in photos {
                println!("Week {:>2}  {}  {}  ({})", p.week, p.image_url, p.caption, p.id);
            }
        }
        PhotoAction::Caption { id, caption } => {
            local.update_bump_photo_caption(&id, &caption)?;
            println!("Caption updated.");
        }
        PhotoAction::Delete { id } => {
            local.delete_bump_photo(&id)?;
            println!("Photo deleted.");
        }
    }
    Ok(())
}

// ==================== Dagsplan ====================

fn cmd_tasks(ctx: &AppContext, action: TaskAction) -> Result<()> {
    let cloud = ctx.selector.cloud();

    match action {
        TaskAction::List { date } => {
            let day = parse_day(date.as_deref())?;
            let service = TaskService::load(cloud, day)?;

            println!("Daily care plan · {}", format_date(day));
            for (target, value) in DAILY_TARGETS {
                println!("  🎯 {}: {}", target, value);
            }

            for (category, items) in service.items_by_category() {
                println!("\n{}", category.display_name());
                for item in items {
                    let mark = if item.completed { "✓" } else { " " };
                    println!("  [{}] {}  ({})", mark, item.text, item.task_id);
                    if let Some(note) = &item.note {
                        println!("        {}", note);
                    }
                }
            }

            let stats = service.stats();
            println!(
                "\n{}/{} done ({}%)",
                stats.completed, stats.total, stats.percentage
            );
            if !cloud.is_authenticated() {
                println!("{}", SIGN_IN_TO_TRACK_TASKS);
            }
        }
        TaskAction::Toggle { task_id, date } => {
            let day = parse_day(date.as_deref())?;
            let mut service = TaskService::load(cloud, day)?;
            let completed = service.toggle(&task_id).map_err(tasks_error)?;
            println!("{} {}", if completed { "✓" } else { "○" }, task_id);
        }
        TaskAction::Add {
            text,
            category,
            note,
        } => {
            let mut service = TaskService::load(cloud, today())?;
            let task = service
                .add_custom_task(&text, category, note)
                .map_err(tasks_error)?;
            println!("Task added ({})", task.task_id());
        }
        TaskAction::Delete { id } => {
            let mut service = TaskService::load(cloud, today())?;
            let id = id.strip_prefix("custom-").unwrap_or(&id).to_string();
            service.delete_custom_task(&id).map_err(tasks_error)?;
            println!("Task deleted.");
        }
    }
    Ok(())
}

// ==================== Export ====================

fn cmd_export(ctx: &AppContext, tracker: bool, output: Option<PathBuf>) -> Result<()> {
    let kind = if tracker {
        ExportKind::Tracker
    } else {
        ExportKind::AllData
    };
    let path = output.unwrap_or_else(|| PathBuf::from(ExportService::generate_filename(kind)));

    let result = ExportService::new(&ctx.selector).export_to_file(kind, &path)?;
    println!("{} → {}", result.summary(), display_path(&path));
    Ok(())
}

// ==================== Inloggning ====================

fn cmd_login(ctx: &mut AppContext, user_id: String, email: Option<String>) -> Result<()> {
    let identity = Identity::new(user_id, email);
    ctx.settings.session = Some(identity.clone());
    ctx.settings.save().context("Kunde inte spara inställningar")?;

    ctx.apply_identity(Some(identity.clone()))?;
    println!(
        "Signed in as {}",
        identity.email.as_deref().unwrap_or(&identity.user_id)
    );
    Ok(())
}

fn cmd_logout(ctx: &mut AppContext) -> Result<()> {
    ctx.settings.session = None;
    ctx.settings.save().context("Kunde inte spara inställningar")?;
    ctx.apply_identity(None)?;
    println!("Signed out. Using data stored on this device.");
    Ok(())
}

fn cmd_reset(ctx: &mut AppContext, all: bool) -> Result<()> {
    ctx.selector.reset_profile()?;
    if all {
        ctx.selector.local().clear_all_data()?;
        println!("All local data cleared.");
    } else {
        println!("Profile reset.");
    }
    Ok(())
}

// ==================== Påminnelser ====================

fn cmd_remind(ctx: &AppContext, action: RemindAction) -> Result<()> {
    let local = ctx.selector.local();
    let mut prefs = local.get_notification_preferences()?;

    match action {
        RemindAction::Show => {
            println!("Reminders: {}", if prefs.enabled { "on" } else { "off" });
            if prefs.quiet_hours_enabled {
                println!(
                    "Quiet hours: {}–{}",
                    format_hhmm(prefs.quiet_hours_start),
                    format_hhmm(prefs.quiet_hours_end)
                );
            }
            for s in &prefs.schedules {
                let mark = if s.enabled { "✓" } else { " " };
                println!("  [{}] {}  {}", mark, format_hhmm(s.time), s.title);
            }
            return Ok(());
        }
        RemindAction::Enable => prefs.enabled = true,
        RemindAction::Disable => prefs.enabled = false,
        RemindAction::Quiet { start, end, off } => {
            if off {
                prefs.quiet_hours_enabled = false;
            } else {
                let parse = |v: Option<String>| -> Result<_> {
                    let v = v.ok_or_else(|| anyhow!("Start och slut krävs"))?;
                    parse_hhmm(&v).ok_or_else(|| anyhow!("Ogiltig tid: {} (HH:MM)", v))
                };
                prefs.quiet_hours_start = parse(start)?;
                prefs.quiet_hours_end = parse(end)?;
                prefs.quiet_hours_enabled = true;
            }
        }
        RemindAction::Run { minutes } => {
            if !prefs.enabled {
                println!("Reminders are off. Turn them on with `bloom remind enable`.");
            }

            let mut scheduler = NotificationScheduler::new(local.clone(), Arc::new(LogNotifier));
            scheduler.start();

            match minutes {
                Some(m) => {
                    std::thread::sleep(Duration::from_secs(m * 60));
                    scheduler.stop();
                }
                None => loop {
                    std::thread::park();
                },
            }
            return Ok(());
        }
    }

    local.save_notification_preferences(&prefs)?;
    println!("Reminder settings saved.");
    Ok(())
}

// ==================== Tröst ====================

fn cmd_comfort(ctx: &AppContext, set: Vec<String>) -> Result<()> {
    let local = ctx.selector.local();

    if !set.is_empty() {
        if let Some(unknown) = set.iter().find(|id| !is_known_comfort_item(id)) {
            let valid: Vec<&str> = COMFORT_ITEMS.iter().map(|c| c.id).collect();
            return Err(anyhow!(
                "Okänt val '{}'. Giltiga: {}",
                unknown,
                valid.join(", ")
            ));
        }
        local.save_comfort_preferences(&set)?;
    }

    let favourites = local.get_comfort_preferences()?;
    println!("Your comfort favourites:");
    for item in preferred_comfort_items(&favourites) {
        println!("  {} {}", item.emoji, item.label);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symptom() {
        let s = parse_symptom("nausea:3").unwrap();
        assert_eq!(s.symptom_id, "nausea");
        assert_eq!(s.severity, 3);

        assert_eq!(parse_symptom("fatigue").unwrap().severity, 1);
        assert!(parse_symptom("nausea:x").is_err());
    }

    #[test]
    fn test_tasks_error_message() {
        let err = tasks_error(AppError::NotAuthenticated);
        assert_eq!(err.to_string(), SIGN_IN_TO_TRACK_TASKS);
    }

    #[test]
    fn test_parse_day_defaults_to_today() {
        assert_eq!(parse_day(None).unwrap(), today());
        assert!(parse_day(Some("inte ett datum")).is_err());
    }
}
