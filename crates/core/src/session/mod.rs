//! Per-UI-session state
//!
//! A [`PromptSession`] is created for each connected UI session and passed
//! explicitly to every action. It owns the signed-in user, the dropdown
//! cache, the management-panel selection and a subscription to the
//! library event bus.

pub mod cache;
pub mod selection;

use tracing::debug;

pub use cache::PromptCache;
pub use selection::{PanelVisibility, Selection, NO_SELECTION};

use crate::db::prompts::{PromptStore, UserId};
use crate::errors::Result;
use crate::events::{EventBus, LibraryEvent, Subscription};

#[derive(Debug)]
pub struct PromptSession {
    user:         Option<UserId>,
    cache:        PromptCache,
    selection:    Selection,
    subscription: Subscription,
    bus:          EventBus,
}

impl PromptSession {
    /// Anonymous session subscribed to `bus`
    pub fn new(bus: &EventBus) -> Self {
        Self {
            user:         None,
            cache:        PromptCache::new(),
            selection:    Selection::Unselected,
            subscription: bus.subscribe(),
            bus:          bus.clone(),
        }
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn cache(&self) -> &PromptCache {
        &self.cache
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Attach `user` to the session and load their prompts
    pub async fn sign_in(&mut self, store: &PromptStore, user: UserId) -> Result<()> {
        debug!(user = %user, "session signed in");
        self.user = Some(user);
        self.selection = Selection::Unselected;
        self.reload(store).await
    }

    /// Forget the user, their prompts and the selection
    pub fn sign_out(&mut self) -> Option<UserId> {
        self.cache.clear();
        self.selection = Selection::Unselected;
        self.user.take()
    }

    /// Rebuild the cache for the current user
    pub async fn reload(&mut self, store: &PromptStore) -> Result<()> {
        self.cache.reload(store, self.user.as_ref()).await?;
        Ok(())
    }

    /// Apply library events published since the last call
    ///
    /// Reloads the cache once if any event concerns this session's user.
    /// Returns whether a reload happened.
    pub async fn sync(&mut self, store: &PromptStore) -> Result<bool> {
        let events = self.subscription.drain();
        let Some(user) = self.user.as_ref() else {
            return Ok(false);
        };

        let relevant = events.iter().any(|event| event.user() == user);
        if relevant {
            self.reload(store).await?;
        }
        Ok(relevant)
    }

    /// Publish `event` to every session, this one included
    pub fn publish(&self, event: LibraryEvent) {
        self.bus.publish(event);
    }
}

impl Drop for PromptSession {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscription.id);
    }
}
