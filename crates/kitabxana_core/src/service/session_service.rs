//! Reading session state and timer.
//!
//! # Responsibility
//! - Track the selected entity of one content kind and derive progress.
//! - Count active reading seconds through a cancellable ticker.
//!
//! # Invariants
//! - Progress is recomputed from (selection, catalog order) on every read.
//! - `elapsed_seconds` never decreases and only grows while active.
//! - `stop_timer` and `Drop` join the ticker thread; no tick lands afterwards.
//! - Timer operations in the wrong state are no-ops, never errors.

use crate::catalog::Catalog;
use crate::events::{ChangeFeed, StateChange};
use crate::model::content::{ContentKind, EntityId};
use crate::model::preferences::Preferences;
use crate::model::session::{SessionSnapshot, SessionState};
use crate::repo::progress_repo::ProgressRepository;
use crate::repo::RepoResult;
use log::{debug, error, info};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use uuid::Uuid;

/// One tick per second.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// How elapsed time advances while the timer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDriver {
    /// Background thread adds one second per `interval`.
    Thread { interval: Duration },
    /// The host calls [`ReadingSession::tick`] from its own clock.
    Manual,
}

impl Default for TimerDriver {
    fn default() -> Self {
        Self::Thread {
            interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

struct Ticker {
    cancel: Sender<()>,
    handle: JoinHandle<()>,
}

impl Ticker {
    fn spawn(interval: Duration, elapsed: Arc<AtomicU64>) -> std::io::Result<Self> {
        let (cancel, cancelled) = channel::<()>();
        let handle = thread::Builder::new()
            .name("kitabxana-reading-timer".to_string())
            .spawn(move || loop {
                match cancelled.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        elapsed.fetch_add(1, Ordering::SeqCst);
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;
        Ok(Self { cancel, handle })
    }

    fn cancel(self) {
        // Send fails only if the thread is already gone; join handles both.
        let _ = self.cancel.send(());
        if self.handle.join().is_err() {
            error!("event=reading_timer module=session status=error error_code=ticker_panicked");
        }
    }
}

/// Reading session over one ordered catalog kind.
pub struct ReadingSession {
    session_id: Uuid,
    catalog: Arc<Catalog>,
    kind: ContentKind,
    selected: Option<EntityId>,
    elapsed: Arc<AtomicU64>,
    driver: TimerDriver,
    running: bool,
    ticker: Option<Ticker>,
    feed: ChangeFeed,
}

impl ReadingSession {
    /// Creates an idle session ticking once per second.
    pub fn new(catalog: Arc<Catalog>, kind: ContentKind) -> Self {
        Self::with_driver(catalog, kind, TimerDriver::default())
    }

    pub fn with_driver(catalog: Arc<Catalog>, kind: ContentKind, driver: TimerDriver) -> Self {
        let session_id = Uuid::new_v4();
        debug!(
            "event=session_open module=session status=ok session_id={} kind={}",
            session_id,
            kind.as_str()
        );
        Self {
            session_id,
            catalog,
            kind,
            selected: None,
            elapsed: Arc::new(AtomicU64::new(0)),
            driver,
            running: false,
            ticker: None,
            feed: ChangeFeed::new(),
        }
    }

    /// Rebuilds a paused session from a saved snapshot.
    pub fn restore(
        catalog: Arc<Catalog>,
        kind: ContentKind,
        driver: TimerDriver,
        snapshot: SessionSnapshot,
    ) -> Self {
        let mut session = Self::with_driver(catalog, kind, driver);
        session.selected = snapshot.selected_id;
        session.elapsed.store(snapshot.elapsed_seconds, Ordering::SeqCst);
        session
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn subscribe(&mut self) -> Receiver<StateChange> {
        self.feed.subscribe()
    }

    pub fn state(&self) -> SessionState {
        match (&self.selected, self.running) {
            (None, _) => SessionState::Idle,
            (Some(_), false) => SessionState::SelectedPaused,
            (Some(_), true) => SessionState::SelectedActive,
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selects `id` and returns the recomputed progress.
    ///
    /// Unknown ids are kept as the selection; their progress is `0`.
    pub fn select(&mut self, id: impl Into<EntityId>) -> f64 {
        let id = id.into();
        self.selected = Some(id.clone());
        let progress = self.progress();
        debug!(
            "event=session_select module=session status=ok session_id={} kind={} progress={:.4}",
            self.session_id,
            self.kind.as_str(),
            progress
        );
        self.feed.publish(StateChange::SelectionChanged {
            kind: self.kind,
            id,
            progress,
        });
        progress
    }

    /// `(index + 1) / len` of the selection, or `0` when there is none or it
    /// is not in the catalog.
    pub fn progress(&self) -> f64 {
        let Some(id) = self.selected.as_deref() else {
            return 0.0;
        };
        let total = self.catalog.len(self.kind);
        match self.catalog.position(self.kind, id) {
            Some(index) if total > 0 => (index + 1) as f64 / total as f64,
            _ => 0.0,
        }
    }

    /// Starts counting. Returns whether the state changed.
    ///
    /// No-op while idle (nothing selected) or already active.
    pub fn start_timer(&mut self) -> bool {
        if self.selected.is_none() || self.running {
            return false;
        }

        if let TimerDriver::Thread { interval } = self.driver {
            match Ticker::spawn(interval, Arc::clone(&self.elapsed)) {
                Ok(ticker) => self.ticker = Some(ticker),
                Err(err) => {
                    error!(
                        "event=reading_timer module=session status=error session_id={} error_code=ticker_spawn_failed error={}",
                        self.session_id, err
                    );
                    return false;
                }
            }
        }

        self.running = true;
        info!(
            "event=reading_timer module=session status=started session_id={} elapsed_s={}",
            self.session_id,
            self.elapsed_seconds()
        );
        self.feed.publish(StateChange::TimerStarted);
        true
    }

    /// Stops counting. Returns whether the state changed.
    ///
    /// When this returns, the ticker thread has exited.
    pub fn stop_timer(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.halt_ticker();
        let elapsed_seconds = self.elapsed_seconds();
        info!(
            "event=reading_timer module=session status=stopped session_id={} elapsed_s={}",
            self.session_id, elapsed_seconds
        );
        self.feed.publish(StateChange::TimerStopped { elapsed_seconds });
        true
    }

    /// Adds one second for [`TimerDriver::Manual`] sessions while active.
    ///
    /// Returns whether the tick was counted.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.driver != TimerDriver::Manual {
            return false;
        }
        self.elapsed.fetch_add(1, Ordering::SeqCst);
        true
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.load(Ordering::SeqCst)
    }

    /// Share of the daily reading goal reached, in `[0, 1]`.
    ///
    /// A goal of `0` minutes yields `0`.
    pub fn goal_progress(&self, preferences: &Preferences) -> f64 {
        let goal_seconds = u64::from(preferences.reading_goal) * 60;
        if goal_seconds == 0 {
            return 0.0;
        }
        (self.elapsed_seconds() as f64 / goal_seconds as f64).min(1.0)
    }

    pub fn goal_reached(&self, preferences: &Preferences) -> bool {
        preferences.reading_goal > 0
            && self.elapsed_seconds() >= u64::from(preferences.reading_goal) * 60
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            selected_id: self.selected.clone(),
            elapsed_seconds: self.elapsed_seconds(),
        }
    }

    fn halt_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.running = false;
    }
}

/// Saves `session` through `repo` when `auto_save_progress` is on.
///
/// Returns whether a snapshot was written.
pub fn persist_session_if_enabled<R: ProgressRepository>(
    preferences: &Preferences,
    repo: &R,
    session: &ReadingSession,
) -> RepoResult<bool> {
    if !preferences.auto_save_progress {
        return Ok(false);
    }

    repo.save(session.kind(), &session.snapshot())?;
    debug!(
        "event=session_persist module=session status=ok session_id={} kind={}",
        session.session_id(),
        session.kind().as_str()
    );
    Ok(true)
}

/// Restores the saved session for `kind`, or a fresh idle one.
pub fn restore_session<R: ProgressRepository>(
    catalog: Arc<Catalog>,
    kind: ContentKind,
    driver: TimerDriver,
    repo: &R,
) -> RepoResult<ReadingSession> {
    Ok(match repo.load(kind)? {
        Some(snapshot) => ReadingSession::restore(catalog, kind, driver, snapshot),
        None => ReadingSession::with_driver(catalog, kind, driver),
    })
}

impl Drop for ReadingSession {
    fn drop(&mut self) {
        self.halt_ticker();
    }
}
