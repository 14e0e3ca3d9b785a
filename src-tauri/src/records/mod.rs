//! Record identity and the pure collection operations every widget shares.

use std::cmp;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod category;
pub mod engine;
pub mod models;
pub mod notes;

pub use category::{ByCategory, Category};
pub use models::{Note, NoteColor, Point, Task};

/// Opaque record identity. Derived from the creation clock but only ever
/// compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity and creation time handed to a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    pub id: RecordId,
    pub at: DateTime<Utc>,
}

/// Hands out clock-derived ids that never repeat within one collection.
///
/// Two adds inside the same millisecond (or after the wall clock steps
/// backwards) get `last + 1` instead of the clock value.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator that will never reissue any of `ids`.
    pub fn seeded<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = RecordId>,
    {
        let mut generator = Self::new();
        for id in ids {
            generator.observe(id);
        }
        generator
    }

    pub fn observe(&mut self, id: RecordId) {
        self.last = cmp::max(self.last, id.0);
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> RecordId {
        let candidate = now.timestamp_millis();
        self.last = cmp::max(candidate, self.last.saturating_add(1));
        RecordId(self.last)
    }

    pub fn stamp(&mut self, now: DateTime<Utc>) -> Stamp {
        Stamp {
            id: self.next_id(now),
            at: now,
        }
    }
}

pub trait Record {
    fn id(&self) -> RecordId;
}

/// Records created from a single line of draft text.
pub trait TextRecord: Record + Clone {
    fn from_text(text: String, stamp: Stamp) -> Self;
}

/// Records carrying a completion checkbox.
pub trait Completable: Record + Clone {
    fn is_completed(&self) -> bool;
    fn set_completed(&mut self, completed: bool);
}
