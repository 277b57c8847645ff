//! Påminnelser enligt användarens schema.
//!
//! En bakgrundstråd kontrollerar klockan en gång per intervall (normalt
//! varje minut). Missade minuter hämtas inte igen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};
use tracing::{debug, info, warn};

use crate::store::LocalStore;
use crate::utils::AppResult;

/// Visar en notis för användaren
pub trait Notifier: Send + Sync {
    fn permission_granted(&self) -> bool;
    fn notify(&self, title: &str, body: &str) -> AppResult<()>;
}

/// Skriver påminnelser till loggen
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn permission_granted(&self) -> bool {
        true
    }

    fn notify(&self, title: &str, body: &str) -> AppResult<()> {
        info!("🔔 {} - {}", title, body);
        Ok(())
    }
}

/// Avfyra de påminnelser som matchar `now`. Returnerar antal skickade.
pub fn check_reminders(
    store: &LocalStore,
    notifier: &dyn Notifier,
    now: NaiveTime,
) -> AppResult<usize> {
    let prefs = store.get_notification_preferences()?;
    if !prefs.enabled {
        return Ok(0);
    }

    if !notifier.permission_granted() {
        debug!("Notiser saknar behörighet");
        return Ok(0);
    }

    let mut sent = 0;
    for schedule in prefs.due_schedules(now) {
        match notifier.notify(&schedule.title, &schedule.body) {
            Ok(()) => sent += 1,
            Err(e) => warn!("Kunde inte visa påminnelse {}: {}", schedule.id, e),
        }
    }
    Ok(sent)
}

/// Minut som redan är kontrollerad, så att täta intervall inte dubblerar
fn minute_key(now: NaiveDateTime) -> (chrono::NaiveDate, u32, u32) {
    (now.date(), now.hour(), now.minute())
}

pub struct NotificationScheduler {
    store: LocalStore,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
    running: Arc<AtomicBool>,
    stop_tx: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl NotificationScheduler {
    pub fn new(store: LocalStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            interval: Duration::from_secs(60),
            running: Arc::new(AtomicBool::new(false)),
            stop_tx: None,
            handle: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Starta bakgrundstråden. Första kontrollen görs direkt.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let store = self.store.clone();
        let notifier = Arc::clone(&self.notifier);
        let running = Arc::clone(&self.running);
        let interval = self.interval;

        running.store(true, Ordering::SeqCst);
        info!("Påminnelser startade (intervall {:?})", interval);

        let handle = thread::spawn(move || {
            let mut last_checked = None;

            loop {
                let now = Local::now().naive_local();
                let key = minute_key(now);

                if last_checked != Some(key) {
                    last_checked = Some(key);
                    match check_reminders(&store, notifier.as_ref(), now.time()) {
                        Ok(0) => {}
                        Ok(n) => info!("{} påminnelse(r) skickade", n),
                        Err(e) => warn!("Kontroll av påminnelser misslyckades: {}", e),
                    }
                }

                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            running.store(false, Ordering::SeqCst);
        });

        self.stop_tx = Some(stop_tx);
        self.handle = Some(handle);
    }

    /// Stoppa och vänta in tråden
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Påminnelsetråden avslutades med panik");
            }
            self.running.store(false, Ordering::SeqCst);
            info!("Påminnelser stoppade");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for NotificationScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
