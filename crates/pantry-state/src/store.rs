// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The state store: the only process-wide mutable structure.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use dashmap::DashMap;
use pantry_core::types::UserId;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::slot::Slot;

/// Concurrency-safe `(user, slot) -> value` map.
///
/// Each user's slots live in one shard entry, so a single call observes and
/// mutates them atomically. Values are opaque strings; see [`crate::payload`]
/// for the structured encodings. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct StateStore {
    slots: DashMap<UserId, HashMap<Slot, String>>,
    turn_locks: Arc<TurnLocks>,
}

type TurnLocks = DashMap<UserId, Arc<Mutex<()>>>;

/// Held for the duration of one user's turn.
///
/// Dropping the last guard of a user with no waiters removes that user's
/// lock entry.
pub struct TurnGuard {
    held: Option<OwnedMutexGuard<()>>,
    user: UserId,
    locks: Arc<TurnLocks>,
}

impl Drop for TurnGuard {
    fn drop(&mut self) {
        drop(self.held.take());
        // Waiters and in-flight lockers hold a clone, so a count of one means idle.
        self.locks
            .remove_if(&self.user, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes turns of the same user. Different users never contend.
    pub async fn lock_user(&self, user: UserId) -> TurnGuard {
        let lock = self
            .turn_locks
            .entry(user)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        TurnGuard {
            held: Some(lock.lock_owned().await),
            user,
            locks: Arc::clone(&self.turn_locks),
        }
    }

    /// Stores `value`; setting `viewing_list` drops `adding_item_to_list` and vice versa.
    pub fn set(&self, user: UserId, slot: Slot, value: impl Into<String>) {
        let value = value.into();
        debug!(user_id = %user, slot = %slot, "slot set");
        let mut entry = self.slots.entry(user).or_default();
        if let Some(other) = slot.exclusive_with() {
            entry.remove(&other);
        }
        entry.insert(slot, value);
    }

    pub fn get(&self, user: UserId, slot: Slot) -> Option<String> {
        self.slots
            .get(&user)
            .and_then(|slots| slots.get(&slot).cloned())
    }

    pub fn contains(&self, user: UserId, slot: Slot) -> bool {
        self.slots
            .get(&user)
            .is_some_and(|slots| slots.contains_key(&slot))
    }

    /// Removes one slot, returning its previous value.
    pub fn clear(&self, user: UserId, slot: Slot) -> Option<String> {
        let previous = self.slots.get_mut(&user)?.remove(&slot);
        if previous.is_some() {
            debug!(user_id = %user, slot = %slot, "slot cleared");
        }
        self.drop_if_empty(user);
        previous
    }

    /// Removes several slots in one atomic step.
    pub fn clear_many(&self, user: UserId, slots: &[Slot]) {
        if let Some(mut entry) = self.slots.get_mut(&user) {
            for slot in slots {
                entry.remove(slot);
            }
        }
        self.drop_if_empty(user);
    }

    pub fn clear_all(&self, user: UserId) {
        if self.slots.remove(&user).is_some() {
            debug!(user_id = %user, "all slots cleared");
        }
    }

    /// Active slots of one user, in catalogue order.
    pub fn active_slots(&self, user: UserId) -> Vec<Slot> {
        let mut active: Vec<Slot> = self
            .slots
            .get(&user)
            .map(|slots| slots.keys().copied().collect())
            .unwrap_or_default();
        active.sort();
        active
    }

    /// Copies the whole store. For diagnostics only.
    pub fn snapshot(&self) -> BTreeMap<UserId, BTreeMap<Slot, String>> {
        self.slots
            .iter()
            .map(|entry| {
                let slots = entry
                    .value()
                    .iter()
                    .map(|(slot, value)| (*slot, value.clone()))
                    .collect();
                (*entry.key(), slots)
            })
            .collect()
    }

    /// Writes `value` only if the slot still holds `expected` (`None` meaning absent).
    ///
    /// Returns `false` without writing when another turn changed the slot.
    pub fn compare_and_set(
        &self,
        user: UserId,
        slot: Slot,
        expected: Option<&str>,
        value: impl Into<String>,
    ) -> bool {
        let mut entry = self.slots.entry(user).or_default();
        if entry.get(&slot).map(String::as_str) != expected {
            debug!(user_id = %user, slot = %slot, "slot changed underneath turn");
            return false;
        }
        if let Some(other) = slot.exclusive_with() {
            entry.remove(&other);
        }
        entry.insert(slot, value.into());
        true
    }

    /// Clears the slot only if it still holds `expected`.
    pub fn clear_if(&self, user: UserId, slot: Slot, expected: &str) -> bool {
        let removed = match self.slots.get_mut(&user) {
            Some(mut entry) if entry.get(&slot).map(String::as_str) == Some(expected) => {
                entry.remove(&slot);
                true
            }
            _ => false,
        };
        self.drop_if_empty(user);
        removed
    }

    fn drop_if_empty(&self, user: UserId) {
        self.slots.remove_if(&user, |_, slots| slots.is_empty());
    }
}
