use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Note, NoteColor, RecordId, Stamp};

/// Title, body and color as typed in the note editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub color: NoteColor,
}

impl NoteInput {
    /// A note needs a title or a body; whitespace alone counts as neither.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }
}

/// New notes go to the front of the collection. Blank input changes nothing.
pub fn add_note(notes: &[Note], input: &NoteInput, stamp: Stamp) -> Vec<Note> {
    if input.is_blank() {
        return notes.to_vec();
    }

    let note = Note {
        id: stamp.id,
        title: input.title.trim().to_string(),
        content: input.content.trim().to_string(),
        color: input.color,
        pinned: false,
        created_at: stamp.at,
        updated_at: stamp.at,
    };

    let mut next = Vec::with_capacity(notes.len() + 1);
    next.push(note);
    next.extend_from_slice(notes);
    next
}

/// Rewrite title, content and color of note `id` and bump `updated_at`.
pub fn update_note(notes: &[Note], id: RecordId, input: &NoteInput, now: DateTime<Utc>) -> Vec<Note> {
    if input.is_blank() {
        return notes.to_vec();
    }

    notes
        .iter()
        .map(|note| {
            if note.id != id {
                return note.clone();
            }
            Note {
                title: input.title.trim().to_string(),
                content: input.content.trim().to_string(),
                color: input.color,
                updated_at: now,
                ..note.clone()
            }
        })
        .collect()
}

/// Pinning is not an edit, so `updated_at` stays put.
pub fn toggle_pinned(notes: &[Note], id: RecordId) -> Vec<Note> {
    notes
        .iter()
        .map(|note| {
            let mut note = note.clone();
            if note.id == id {
                note.pinned = !note.pinned;
            }
            note
        })
        .collect()
}

/// Case-insensitive substring match against title or content.
pub fn matches_query(note: &Note, query: &str) -> bool {
    let needle = query.to_lowercase();
    note.title.to_lowercase().contains(&needle) || note.content.to_lowercase().contains(&needle)
}

pub fn search_notes<'a>(notes: &'a [Note], query: &'a str) -> impl Iterator<Item = &'a Note> + 'a {
    notes.iter().filter(move |note| matches_query(note, query))
}

/// Pinned notes first, then most recently updated. Equal keys keep their
/// collection order.
pub fn sort_notes<'a, I>(notes: I) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut sorted: Vec<&Note> = notes.into_iter().collect();
    sorted.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
    });
    sorted
}

/// What the notes screen lists: search first, then sort.
pub fn visible_notes<'a>(notes: &'a [Note], query: &'a str) -> Vec<&'a Note> {
    sort_notes(search_notes(notes, query))
}
