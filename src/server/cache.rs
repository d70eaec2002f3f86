//! In-memory cache of rendered pages, keyed by page path.
//!
//! Entries live until the revalidation webhook invalidates their path.
//! Every invalidation bumps the path's generation, so a render that started
//! before the invalidation can be recognized and dropped instead of cached.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// A rendered page held in the cache.
#[derive(Debug, Clone)]
pub struct CachedPage {
    pub html: String,
    pub rendered_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct RenderCache {
    pages: DashMap<String, CachedPage>,
    generations: DashMap<String, u64>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<CachedPage> {
        self.pages.get(path).map(|entry| entry.value().clone())
    }

    /// Current generation of `path`. Capture it before rendering and hand
    /// it to [`RenderCache::insert_if_current`].
    pub fn generation(&self, path: &str) -> u64 {
        self.generations.get(path).map_or(0, |entry| *entry)
    }

    pub fn insert(&self, path: impl Into<String>, html: String) {
        let path = path.into();
        let generation = self.generation(&path);
        self.insert_if_current(path, html, generation);
    }

    /// Cache `html` unless `path` was invalidated since `generation` was
    /// read. Returns whether the page was stored.
    pub fn insert_if_current(&self, path: impl Into<String>, html: String, generation: u64) -> bool {
        let path = path.into();

        // The generation guard stays held across the insert so an
        // invalidation cannot slip in between the check and the write.
        let current = self.generations.entry(path.clone()).or_insert(0);
        if *current != generation {
            tracing::debug!(path = %path, "discarding render started before invalidation");
            return false;
        }

        self.pages.insert(
            path,
            CachedPage {
                html,
                rendered_at: Utc::now(),
            },
        );
        true
    }

    /// Drop the cached render for `path`. Returns whether an entry existed.
    pub fn invalidate(&self, path: &str) -> bool {
        let mut generation = self.generations.entry(path.to_string()).or_insert(0);
        *generation += 1;
        let removed = self.pages.remove(path).is_some();
        drop(generation);

        tracing::debug!(path, removed, "invalidated cached page");
        removed
    }

    pub fn contains(&self, path: &str) -> bool {
        self.pages.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
