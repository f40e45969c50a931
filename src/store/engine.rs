//! Topic store engine
//!
//! This module contains the in-memory registry responsible for:
//! - assigning identifiers to new topics
//! - applying upvotes/downvotes to existing topics
//! - producing ranked snapshots of every stored topic
//!
//! Concurrency and usage notes:
//! - The store is shared as `Arc<TopicStore>`; every method takes `&self`.
//! - The topic map sits behind an `RwLock`. Creating and deleting topics take
//!   the write lock. Lookups, votes, and listings take the read lock, so votes
//!   on any topics proceed in parallel while structural changes are excluded
//!   from listings.
//! - Counters are atomics, so two concurrent votes on one topic both land.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::store::id::{IdSource, OsRandomIds};
use crate::store::topic::{Topic, TopicId, TopicRecord, VoteKind};
use crate::utils::error::StoreError;

#[derive(Debug, Default)]
struct Registry {
    topics: HashMap<TopicId, TopicRecord>,
    next_seq: u64,
}

pub struct TopicStore {
    registry: RwLock<Registry>,
    ids: Box<dyn IdSource>,
}

impl TopicStore {
    /// Number of fresh ids drawn before giving up when every one of them is
    /// already taken by a live topic.
    pub const MAX_ID_ATTEMPTS: usize = 4;

    pub fn new() -> Self {
        Self::with_id_source(OsRandomIds)
    }

    pub fn with_id_source(ids: impl IdSource + 'static) -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
            ids: Box::new(ids),
        }
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a topic with zeroed counters and returns its new id.
    ///
    /// The name is stored as given; length and emptiness checks belong to the
    /// caller.
    pub fn create_topic(&self, name: &str) -> Result<TopicId, StoreError> {
        for _ in 0..Self::MAX_ID_ATTEMPTS {
            let id = self.ids.next_id()?;

            let mut registry = self.write();
            if registry.topics.contains_key(&id) {
                warn!("Generated topic id {} already in use, drawing again", id);
                continue;
            }

            let seq = registry.next_seq;
            registry.next_seq += 1;
            registry.topics.insert(id, TopicRecord::new(id, name, seq));
            debug!("Created topic {} ({})", id, name);
            return Ok(id);
        }

        Err(StoreError::IdentifierGeneration(format!(
            "no unused id after {} attempts",
            Self::MAX_ID_ATTEMPTS
        )))
    }

    /// Returns a copy of the topic's current state.
    pub fn get_topic(&self, id: &TopicId) -> Option<Topic> {
        self.read().topics.get(id).map(TopicRecord::snapshot)
    }

    pub fn contains(&self, id: &TopicId) -> bool {
        self.read().topics.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.read().topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds one vote of the given kind and returns the topic as it stands
    /// right after the vote, or `None` if the topic does not exist.
    pub fn vote(&self, id: &TopicId, kind: VoteKind) -> Option<Topic> {
        let registry = self.read();
        let record = registry.topics.get(id)?;
        record.increment(kind);
        Some(record.snapshot())
    }

    /// Adds one vote of the given kind. Returns `false` if the topic does not exist.
    pub fn increment(&self, id: &TopicId, kind: VoteKind) -> bool {
        self.vote(id, kind).is_some()
    }

    /// Removes one vote of the given kind, never going below zero.
    /// Returns `false` if the topic does not exist.
    pub fn decrement(&self, id: &TopicId, kind: VoteKind) -> bool {
        match self.read().topics.get(id) {
            Some(record) => {
                record.decrement(kind);
                true
            }
            None => false,
        }
    }

    pub fn increment_upvote(&self, id: &TopicId) -> bool {
        self.increment(id, VoteKind::Upvotes)
    }

    pub fn increment_downvote(&self, id: &TopicId) -> bool {
        self.increment(id, VoteKind::Downvotes)
    }

    pub fn decrement_upvote(&self, id: &TopicId) -> bool {
        self.decrement(id, VoteKind::Upvotes)
    }

    pub fn decrement_downvote(&self, id: &TopicId) -> bool {
        self.decrement(id, VoteKind::Downvotes)
    }

    /// Removes the topic. Deleting an absent topic is a no-op, so this always
    /// returns `true`.
    pub fn delete_topic(&self, id: &TopicId) -> bool {
        if self.write().topics.remove(id).is_some() {
            debug!("Deleted topic {}", id);
        }
        true
    }

    /// Snapshots every topic ordered by the chosen counter, highest first.
    ///
    /// Topics with equal counts keep creation order, oldest first. The result
    /// is always the full set; paging is up to the caller.
    pub fn list_descending_by(&self, kind: VoteKind) -> Vec<Topic> {
        let mut ranked: Vec<(u64, Topic)> = {
            let registry = self.read();
            registry
                .topics
                .values()
                .map(|record| (record.seq, record.snapshot()))
                .collect()
        };

        ranked.sort_unstable_by(|(a_seq, a), (b_seq, b)| {
            b.votes(kind)
                .cmp(&a.votes(kind))
                .then_with(|| a_seq.cmp(b_seq))
        });

        ranked.into_iter().map(|(_, topic)| topic).collect()
    }

    pub fn list_descending_by_upvote(&self) -> Vec<Topic> {
        self.list_descending_by(VoteKind::Upvotes)
    }

    pub fn list_descending_by_downvote(&self) -> Vec<Topic> {
        self.list_descending_by(VoteKind::Downvotes)
    }
}

impl Default for TopicStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TopicStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicStore")
            .field("topics", &self.len())
            .field("ids", &"dyn IdSource")
            .finish()
    }
}
