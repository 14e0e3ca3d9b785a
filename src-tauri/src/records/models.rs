use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Completable, Record, RecordId, Stamp, TextRecord};

/// Checklist entry used by the priority matrix quadrants and the task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Task {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl TextRecord for Task {
    fn from_text(text: String, stamp: Stamp) -> Self {
        Self {
            id: stamp.id,
            text,
            completed: false,
            created_at: Some(stamp.at),
        }
    }
}

impl Completable for Task {
    fn is_completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

/// One bullet of a SWOT analysis. No completion state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub id: RecordId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Point {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl TextRecord for Point {
    fn from_text(text: String, stamp: Stamp) -> Self {
        Self {
            id: stamp.id,
            text,
            created_at: Some(stamp.at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    Red,
    Yellow,
    Green,
    Blue,
    #[default]
    Purple,
}

impl NoteColor {
    pub const ALL: [NoteColor; 5] = [
        NoteColor::Red,
        NoteColor::Yellow,
        NoteColor::Green,
        NoteColor::Blue,
        NoteColor::Purple,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub color: NoteColor,
    #[serde(default)]
    pub pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Note {
    fn id(&self) -> RecordId {
        self.id
    }
}
