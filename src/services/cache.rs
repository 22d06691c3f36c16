// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Path-keyed response cache.
//!
//! List responses are cached under keys that start with the logical path
//! they belong to (`/exercises?limit=10`, `/workouts/sets?user=...`).
//! Mutations call [`PathCache::revalidate`] with that path, which drops the
//! path itself and everything nested below it.
//!
//! Every revalidation bumps a generation counter. A loader records the
//! generation before reading the database and hands it to
//! [`PathCache::insert`], which refuses the value if a revalidation happened
//! in between. Entries also expire after a TTL, and the map holds at most
//! `max_entries` keys.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde_json::Value;
use tokio::time::Instant;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

struct Entry {
    value: Value,
    generation: u64,
    expires_at: Instant,
}

#[derive(Clone)]
pub struct PathCache {
    entries: Arc<DashMap<String, Entry>>,
    generation: Arc<AtomicU64>,
    ttl: Duration,
    max_entries: usize,
}

impl Default for PathCache {
    fn default() -> Self {
        Self::with_limits(DEFAULT_TTL, DEFAULT_MAX_ENTRIES)
    }
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            generation: Arc::new(AtomicU64::new(0)),
            ttl,
            max_entries,
        }
    }

    /// Current revalidation generation; read it before loading a value.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > now {
                return Some(entry.value.clone());
            }
        }
        self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        None
    }

    /// Store a value loaded at `generation`. Returns `false` when the value
    /// was not kept: a revalidation ran since it was loaded, or the cache is
    /// full.
    pub fn insert(&self, key: impl Into<String>, value: Value, generation: u64) -> bool {
        let key = key.into();
        if self.generation() != generation {
            tracing::debug!(key = %key, "Skipping cache insert, revalidated during load");
            return false;
        }
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            self.purge_expired();
            if self.entries.len() >= self.max_entries {
                tracing::debug!(key = %key, max_entries = self.max_entries, "Cache full");
                return false;
            }
        }

        self.entries.insert(
            key.clone(),
            Entry {
                value,
                generation,
                expires_at: Instant::now() + self.ttl,
            },
        );

        // A revalidation may have run between the check and the insert
        if self.generation() != generation {
            self.entries
                .remove_if(&key, |_, entry| entry.generation == generation);
            return false;
        }
        true
    }

    /// Drop every entry under `path`. Returns how many were removed.
    pub fn revalidate(&self, path: &str) -> usize {
        // Bump first so loads racing with the retain below are rejected
        self.generation.fetch_add(1, Ordering::SeqCst);
        let before = self.entries.len();
        self.entries.retain(|key, _| !is_under(key, path));
        let removed = before.saturating_sub(self.entries.len());
        tracing::debug!(path, removed, "Revalidated cached path");
        removed
    }

    fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.expires_at > now);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `key` is `path` itself, a sub-path, or `path` with a query string.
fn is_under(key: &str, path: &str) -> bool {
    match key.strip_prefix(path) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}
