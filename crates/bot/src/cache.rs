//! Cache of the labels that already exist in a repository.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Labels fetched for one repository.
#[derive(Debug, Clone)]
pub struct CachedLabels {
    pub labels: Vec<String>,
    /// When the labels were fetched.
    pub fetched_at: Instant,
}

impl CachedLabels {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            fetched_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() > ttl
    }
}

/// Existing repository labels keyed by `owner/repo`.
///
/// Labels rarely change, so one listing is reused until the TTL runs out.
#[derive(Debug)]
pub struct ExistingLabelCache {
    entries: RwLock<HashMap<String, CachedLabels>>,
    ttl: Duration,
}

impl Default for ExistingLabelCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ExistingLabelCache {
    /// Cache with the default one hour TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, owner: &str, repo: &str) -> Option<Vec<String>> {
        let entries = self.entries.read().await;
        entries
            .get(&cache_key(owner, repo))
            .filter(|cached| !cached.is_expired(self.ttl))
            .map(|cached| cached.labels.clone())
    }

    pub async fn insert(&self, owner: &str, repo: &str, labels: Vec<String>) {
        let mut entries = self.entries.write().await;
        entries.insert(cache_key(owner, repo), CachedLabels::new(labels));
    }

    /// Clear expired entries from the cache.
    pub async fn evict_expired(&self) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, cached| !cached.is_expired(self.ttl));
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn cache_key(owner: &str, repo: &str) -> String {
    format!("{owner}/{repo}")
}
