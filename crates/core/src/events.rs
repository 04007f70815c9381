//! Application-wide prompt library events
//!
//! Every UI session subscribes to the [`EventBus`]. Actions publish
//! `onPromptLibraryChanged` after a create/edit/delete, and the session
//! lifecycle publishes `onSignIn` / `onSignOut`. Subscribers that went away
//! are dropped on the next publish.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crossbeam::channel::{unbounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::db::prompts::UserId;

/// Subscriber ID type
pub type SubscriberId = u64;

/// Global subscriber ID counter
static NEXT_SUBSCRIBER_ID: AtomicU64 = AtomicU64::new(1);

/// Event fanned out to every session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum LibraryEvent {
    /// A prompt of `user` was created, edited or deleted
    #[serde(rename = "onPromptLibraryChanged")]
    LibraryChanged { user: UserId },

    #[serde(rename = "onSignIn")]
    SignedIn { user: UserId },

    #[serde(rename = "onSignOut")]
    SignedOut { user: UserId },
}

impl LibraryEvent {
    /// User the event is about
    pub fn user(&self) -> &UserId {
        match self {
            LibraryEvent::LibraryChanged { user }
            | LibraryEvent::SignedIn { user }
            | LibraryEvent::SignedOut { user } => user,
        }
    }

    /// Wire name, as seen by the UI layer
    pub fn name(&self) -> &'static str {
        match self {
            LibraryEvent::LibraryChanged { .. } => "onPromptLibraryChanged",
            LibraryEvent::SignedIn { .. } => "onSignIn",
            LibraryEvent::SignedOut { .. } => "onSignOut",
        }
    }
}

/// Receiving end handed to a subscriber
#[derive(Debug)]
pub struct Subscription {
    pub id:   SubscriberId,
    receiver: Receiver<LibraryEvent>,
}

impl Subscription {
    /// Take every event queued so far without blocking
    pub fn drain(&self) -> Vec<LibraryEvent> {
        self.receiver.try_iter().collect()
    }
}

/// Fan-out bus for [`LibraryEvent`]s
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<HashMap<SubscriberId, Sender<LibraryEvent>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_subscriber_id() -> SubscriberId {
        NEXT_SUBSCRIBER_ID.fetch_add(1, Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SubscriberId, Sender<LibraryEvent>>> {
        // A panicked publisher cannot leave the map half-updated
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a new subscriber
    pub fn subscribe(&self) -> Subscription {
        let id = Self::next_subscriber_id();
        let (tx, rx) = unbounded();
        self.lock().insert(id, tx);
        debug!(subscriber = id, "subscribed to library events");
        Subscription { id, receiver: rx }
    }

    /// Unregister a subscriber
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.lock().remove(&id);
    }

    /// Get count of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    /// Deliver `event` to every subscriber
    ///
    /// Subscribers whose receiving end was dropped are removed.
    pub fn publish(&self, event: LibraryEvent) {
        let mut subscribers = self.lock();
        trace!(event = event.name(), user = %event.user(), "publishing");

        subscribers.retain(|id, sender| match sender.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Disconnected(_)) => {
                debug!(subscriber = *id, "dropping disconnected subscriber");
                false
            },
            Err(TrySendError::Full(_)) => true,
        });
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
