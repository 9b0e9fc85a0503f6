//! Preferences store.
//!
//! # Responsibility
//! - Own the live `Preferences` value for one app session.
//! - Apply edits and resets as whole-record swaps and publish them.
//! - Bridge to a `PreferencesRepository` for cross-launch persistence.
//!
//! # Invariants
//! - Readers never observe a partially applied edit or reset.
//! - `reset_all` leaves every field equal to `Preferences::default()`.

use crate::events::{ChangeFeed, StateChange};
use crate::model::preferences::Preferences;
use crate::repo::preferences_repo::PreferencesRepository;
use crate::repo::RepoResult;
use log::info;
use std::sync::mpsc::Receiver;

#[derive(Debug, Default)]
pub struct PreferencesStore {
    current: Preferences,
    feed: ChangeFeed,
}

impl PreferencesStore {
    /// Creates a store holding default preferences.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: Preferences) -> Self {
        Self {
            current: preferences,
            feed: ChangeFeed::new(),
        }
    }

    /// Loads preferences through `repo`; missing keys take their defaults.
    pub fn load_from<R: PreferencesRepository>(repo: &R) -> RepoResult<Self> {
        Ok(Self::with_preferences(repo.load()?))
    }

    pub fn save_to<R: PreferencesRepository>(&self, repo: &R) -> RepoResult<()> {
        repo.save(&self.current)
    }

    pub fn subscribe(&mut self) -> Receiver<StateChange> {
        self.feed.subscribe()
    }

    pub fn get(&self) -> &Preferences {
        &self.current
    }

    /// Applies `edit` to a copy and swaps it in. Returns whether anything changed.
    pub fn update(&mut self, edit: impl FnOnce(&mut Preferences)) -> bool {
        let mut next = self.current.clone();
        edit(&mut next);
        if next == self.current {
            return false;
        }

        self.current = next;
        self.feed.publish(StateChange::PreferencesChanged);
        true
    }

    /// Restores every option to its default in one swap.
    pub fn reset_all(&mut self) {
        self.current = Preferences::default();
        info!("event=preferences_reset module=preferences status=ok");
        self.feed.publish(StateChange::PreferencesReset);
    }
}
