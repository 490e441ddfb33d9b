// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Short-lived cache of parse results keyed by `(raw text, language)`.

use std::time::Duration;

use dashmap::DashMap;
use pantry_core::types::{Locale, ParsedItem};
use tokio::time::Instant;

#[derive(Debug)]
pub struct ParseCache {
    ttl: Duration,
    entries: DashMap<(String, Locale), (Instant, Vec<ParsedItem>)>,
}

impl ParseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    /// Returns a fresh entry; expired entries are evicted on lookup.
    pub fn get(&self, text: &str, lang: Locale) -> Option<Vec<ParsedItem>> {
        let key = (text.to_string(), lang);
        let fresh = self
            .entries
            .get(&key)
            .filter(|entry| entry.0.elapsed() < self.ttl)
            .map(|entry| entry.1.clone());
        if fresh.is_none() {
            self.entries.remove(&key);
        }
        fresh
    }

    /// Stores `items`, sweeping every expired entry first so keys that are
    /// never looked up again do not accumulate.
    pub fn insert(&self, text: &str, lang: Locale, items: Vec<ParsedItem>) {
        let ttl = self.ttl;
        self.entries.retain(|_, (stored, _)| stored.elapsed() < ttl);
        self.entries
            .insert((text.to_string(), lang), (Instant::now(), items));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
