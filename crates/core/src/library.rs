//! Shared, process-wide half of the prompt library
//!
//! One [`PromptLibrary`] owns the database handle, the store and the event
//! bus. Each UI session gets its own [`PromptSession`] from
//! [`PromptLibrary::new_session`].

use tracing::info;

use crate::config::LibraryConfig;
use crate::db::prompts::PromptStore;
use crate::db::Db;
use crate::errors::Result;
use crate::events::EventBus;
use crate::session::PromptSession;

#[derive(Debug, Clone)]
pub struct PromptLibrary {
    db:    Db,
    store: PromptStore,
    bus:   EventBus,
}

impl PromptLibrary {
    /// Open the database described by `config`
    pub async fn open(config: &LibraryConfig) -> Result<Self> {
        let db = Db::connect(config).await?;
        info!(path = %config.database_path.display(), "prompt library opened");
        Ok(Self::from_db(db))
    }

    pub fn from_db(db: Db) -> Self {
        let store = PromptStore::new(&db);
        Self {
            db,
            store,
            bus: EventBus::new(),
        }
    }

    pub fn store(&self) -> &PromptStore {
        &self.store
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Fresh anonymous session subscribed to this library's events
    pub fn new_session(&self) -> PromptSession {
        PromptSession::new(&self.bus)
    }

    pub async fn close(&self) {
        self.db.close().await;
    }
}
