//! Per-session `title → text` lookup for the prompt dropdown

use std::collections::BTreeMap;

use tracing::debug;

use crate::db::prompts::{PromptStore, UserId};
use crate::errors::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptCache {
    entries: BTreeMap<String, String>,
}

impl PromptCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the map from every prompt `user` owns
    ///
    /// The previous contents are replaced wholesale. An unset user yields an
    /// empty map.
    pub async fn reload(
        &mut self,
        store: &PromptStore,
        user: Option<&UserId>,
    ) -> Result<&BTreeMap<String, String>> {
        let prompts = store.list_prompts_by_user(user).await?;
        self.entries = prompts.into_iter().map(|p| (p.title, p.text)).collect();
        debug!(entries = self.entries.len(), "prompt cache reloaded");
        Ok(&self.entries)
    }

    /// Text stored under `title`, or `fallback` if the title is empty or unknown
    pub fn resolve<'a>(&'a self, title: &str, fallback: &'a str) -> &'a str {
        if title.is_empty() {
            return fallback;
        }
        self.entries.get(title).map(String::as_str).unwrap_or(fallback)
    }

    /// Dropdown choices: an empty "no selection" entry, then titles A→Z
    pub fn choices(&self) -> Vec<String> {
        std::iter::once(String::new())
            .chain(self.entries.keys().cloned())
            .collect()
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Db;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_reload_and_resolve() -> Result<()> {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path().join("cache.db"), 2).await?;
        let store = PromptStore::new(&db);
        let user = UserId::from("alice");

        store.create(&user, "b", "y").await?;
        store.create(&user, "a", "x").await?;
        store.create(&UserId::from("bob"), "c", "z").await?;

        let mut cache = PromptCache::new();
        let map = cache.reload(&store, Some(&user)).await?;

        let expected: BTreeMap<String, String> =
            [("a".to_string(), "x".to_string()), ("b".to_string(), "y".to_string())]
                .into_iter()
                .collect();
        assert_eq!(map, &expected);

        assert_eq!(cache.resolve("a", "current input"), "x");
        assert_eq!(cache.resolve("", "current input"), "current input");
        assert_eq!(cache.resolve("missing", "current input"), "current input");
        assert_eq!(cache.choices(), vec!["", "a", "b"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_reload_replaces_previous_entries() -> Result<()> {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path().join("cache.db"), 2).await?;
        let store = PromptStore::new(&db);
        let user = UserId::from("alice");

        let prompt = store.create(&user, "old", "x").await?;
        let mut cache = PromptCache::new();
        cache.reload(&store, Some(&user)).await?;
        assert_eq!(cache.len(), 1);

        store.delete(prompt.id).await?;
        store.create(&user, "new", "y").await?;
        cache.reload(&store, Some(&user)).await?;

        assert_eq!(cache.resolve("old", ""), "");
        assert_eq!(cache.resolve("new", ""), "y");

        cache.reload(&store, None).await?;
        assert!(cache.is_empty());
        assert_eq!(cache.choices(), vec![""]);
        Ok(())
    }
}
