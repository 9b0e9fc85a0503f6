//! State change notifications.
//!
//! # Responsibility
//! - Let the presentation layer observe store mutations without polling.
//!
//! # Invariants
//! - Publishing never blocks and never fails; dropped receivers are pruned.
//! - Events are delivered in mutation order per subscriber.

use crate::model::content::{ContentKind, EntityId};
use std::sync::mpsc::{channel, Receiver, Sender};

/// One observable mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    BookmarkToggled {
        kind: ContentKind,
        id: EntityId,
        bookmarked: bool,
    },
    BookmarkRemoved {
        kind: ContentKind,
        id: EntityId,
    },
    SelectionChanged {
        kind: ContentKind,
        id: EntityId,
        progress: f64,
    },
    TimerStarted,
    TimerStopped {
        elapsed_seconds: u64,
    },
    PreferencesChanged,
    PreferencesReset,
}

/// Fan-out of [`StateChange`] events to any number of subscribers.
#[derive(Debug, Default)]
pub struct ChangeFeed {
    subscribers: Vec<Sender<StateChange>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber. Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<StateChange> {
        let (sender, receiver) = channel();
        self.subscribers.push(sender);
        receiver
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub(crate) fn publish(&mut self, change: StateChange) {
        self.subscribers
            .retain(|subscriber| subscriber.send(change.clone()).is_ok());
    }
}
