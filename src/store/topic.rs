use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TopicId = Uuid;

/// Which counter a vote or a ranking refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    #[serde(alias = "upvote")]
    Upvotes,
    #[serde(alias = "downvote")]
    Downvotes,
}

/// Point-in-time copy of a topic handed out by the store.
///
/// Owning a `Topic` gives no access to the store: changing its fields has no
/// effect on the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub upvotes: u64,
    pub downvotes: u64,
    pub created_at: DateTime<Utc>,
}

impl Topic {
    pub fn votes(&self, kind: VoteKind) -> u64 {
        match kind {
            VoteKind::Upvotes => self.upvotes,
            VoteKind::Downvotes => self.downvotes,
        }
    }
}

/// Stored state of a single topic.
///
/// Identity fields never change after creation; the counters are atomics so
/// votes only need shared access to the record.
#[derive(Debug)]
pub(crate) struct TopicRecord {
    pub(crate) id: TopicId,
    pub(crate) name: String,
    pub(crate) seq: u64,
    pub(crate) created_at: DateTime<Utc>,
    upvotes: AtomicU64,
    downvotes: AtomicU64,
}

impl TopicRecord {
    pub(crate) fn new(id: TopicId, name: &str, seq: u64) -> Self {
        Self {
            id,
            name: name.to_string(),
            seq,
            created_at: Utc::now(),
            upvotes: AtomicU64::new(0),
            downvotes: AtomicU64::new(0),
        }
    }

    fn counter(&self, kind: VoteKind) -> &AtomicU64 {
        match kind {
            VoteKind::Upvotes => &self.upvotes,
            VoteKind::Downvotes => &self.downvotes,
        }
    }

    pub(crate) fn increment(&self, kind: VoteKind) {
        self.counter(kind).fetch_add(1, Ordering::AcqRel);
    }

    /// Removes one vote, stopping at zero.
    pub(crate) fn decrement(&self, kind: VoteKind) {
        // the closure never returns None, so fetch_update cannot fail
        self.counter(kind)
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                Some(n.saturating_sub(1))
            })
            .ok();
    }

    pub(crate) fn snapshot(&self) -> Topic {
        Topic {
            id: self.id,
            name: self.name.clone(),
            upvotes: self.upvotes.load(Ordering::Acquire),
            downvotes: self.downvotes.load(Ordering::Acquire),
            created_at: self.created_at,
        }
    }
}
