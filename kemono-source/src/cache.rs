//! Author cache.
//!
//! Every video carries an author link, and the listing endpoints only return
//! the creator's `service` and user id. Resolving the rest takes a profile
//! request, so resolved creators are kept here for the life of the source.
//!
//! The cache is keyed `service -> user id`. Each key holds a `OnceCell`, so
//! concurrent resolvers of the same creator share a single profile request
//! and converge on the same `Arc`. The first successful value is never
//! replaced; a failed resolve leaves the key empty for the next caller.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{OnceCell, RwLock};
use tracing::debug;

/// What the source remembers about a creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSummary {
    /// Creator id as reported by the profile.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Service namespace.
    pub service: String,
    /// Channel deep link.
    pub url: String,
    /// Icon URL.
    pub thumbnail: String,
    /// Banner URL.
    pub banner: String,
}

type Slot = Arc<OnceCell<Arc<ChannelSummary>>>;

/// Concurrency-safe `service -> user id -> summary` map.
#[derive(Debug, Default)]
pub struct AuthorCache {
    entries: RwLock<HashMap<String, HashMap<String, Slot>>>,
}

impl AuthorCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached summary, if resolved.
    pub async fn get(&self, service: &str, user_id: &str) -> Option<Arc<ChannelSummary>> {
        let entries = self.entries.read().await;
        entries
            .get(service)?
            .get(user_id)?
            .get()
            .cloned()
    }

    /// Returns the cached summary, or resolves it with `init` and caches it.
    ///
    /// Only one `init` runs per key at a time; callers that arrive while it
    /// runs wait for its result. An error is returned to the caller that ran
    /// `init` and nothing is cached.
    pub async fn get_or_try_insert_with<F, Fut, E>(
        &self,
        service: &str,
        user_id: &str,
        init: F,
    ) -> Result<Arc<ChannelSummary>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ChannelSummary, E>>,
    {
        let slot = self.slot(service, user_id).await;

        if let Some(hit) = slot.get() {
            debug!(service, user_id, "Author cache hit");
            return Ok(Arc::clone(hit));
        }

        debug!(service, user_id, "Author cache miss");
        let summary = slot
            .get_or_try_init(move || async move { init().await.map(Arc::new) })
            .await?;
        Ok(Arc::clone(summary))
    }

    /// Caches `summary` unless the key is already resolved.
    ///
    /// Returns whichever summary is cached afterwards.
    pub async fn insert(
        &self,
        service: &str,
        user_id: &str,
        summary: ChannelSummary,
    ) -> Arc<ChannelSummary> {
        let slot = self.slot(service, user_id).await;
        let summary = Arc::new(summary);
        match slot.set(Arc::clone(&summary)) {
            Ok(()) => summary,
            Err(_) => slot.get().map_or(summary, Arc::clone),
        }
    }

    /// Number of resolved creators.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries
            .values()
            .flat_map(HashMap::values)
            .filter(|slot| slot.initialized())
            .count()
    }

    /// True if no creator is resolved.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Forgets every creator.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    async fn slot(&self, service: &str, user_id: &str) -> Slot {
        {
            let entries = self.entries.read().await;
            if let Some(slot) = entries.get(service).and_then(|users| users.get(user_id)) {
                return Arc::clone(slot);
            }
        }

        let mut entries = self.entries.write().await;
        Arc::clone(
            entries
                .entry(service.to_string())
                .or_default()
                .entry(user_id.to_string())
                .or_default(),
        )
    }
}
