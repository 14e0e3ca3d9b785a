use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::records::notes::{self, NoteInput};
use crate::records::{engine, IdGenerator, Note, Record, RecordId};
use crate::storage::{keys, StoreAdapter};
use crate::synced::Synced;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteBookSnapshot {
    pub notes: Vec<Note>,
    /// Search result, pinned first then most recently updated.
    pub visible: Vec<Note>,
    pub form: NoteInput,
    pub editing: Option<RecordId>,
    pub query: String,
}

/// Notes screen: the persisted collection plus the editor form and search
/// box, which are not persisted.
pub struct NoteBook {
    notes: Synced<Vec<Note>>,
    form: NoteInput,
    editing: Option<RecordId>,
    query: String,
    ids: IdGenerator,
}

impl NoteBook {
    pub fn new(store: StoreAdapter) -> Self {
        Self {
            notes: Synced::new(store, keys::NOTES),
            form: NoteInput::default(),
            editing: None,
            query: String::new(),
            ids: IdGenerator::new(),
        }
    }

    pub fn mount(store: StoreAdapter) -> Self {
        let mut book = Self::new(store);
        book.hydrate();
        book
    }

    pub fn hydrate(&mut self) {
        self.notes.hydrate();
        self.ids = IdGenerator::seeded(self.notes.get().iter().map(Record::id));
    }

    pub fn is_loaded(&self) -> bool {
        self.notes.is_loaded()
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.get()
    }

    pub fn form(&self) -> &NoteInput {
        &self.form
    }

    pub fn editing(&self) -> Option<RecordId> {
        self.editing
    }

    pub fn set_form(&mut self, input: NoteInput) {
        self.form = input;
    }

    /// Load note `id` into the form. Returns `false` for an unknown id.
    pub fn begin_edit(&mut self, id: RecordId) -> bool {
        let Some(note) = self.notes.get().iter().find(|n| n.id == id) else {
            return false;
        };
        self.form = NoteInput {
            title: note.title.clone(),
            content: note.content.clone(),
            color: note.color,
        };
        self.editing = Some(id);
        true
    }

    pub fn cancel_edit(&mut self) {
        self.form = NoteInput::default();
        self.editing = None;
    }

    pub fn save(&mut self) -> bool {
        self.save_at(Utc::now())
    }

    /// Create a note from the form, or update the note under edit. A blank
    /// form is rejected and left as typed.
    pub fn save_at(&mut self, now: DateTime<Utc>) -> bool {
        if self.form.is_blank() {
            return false;
        }
        let next = match self.editing {
            Some(id) => notes::update_note(self.notes.get(), id, &self.form, now),
            None => {
                let stamp = self.ids.stamp(now);
                notes::add_note(self.notes.get(), &self.form, stamp)
            }
        };
        self.notes.replace(next);
        self.cancel_edit();
        true
    }

    pub fn delete(&mut self, id: RecordId) {
        let next = engine::delete_record(self.notes.get(), id);
        self.notes.replace(next);
        if self.editing == Some(id) {
            self.cancel_edit();
        }
    }

    pub fn toggle_pin(&mut self, id: RecordId) {
        let next = notes::toggle_pinned(self.notes.get(), id);
        self.notes.replace(next);
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn visible(&self) -> Vec<&Note> {
        notes::visible_notes(self.notes.get(), &self.query)
    }

    pub fn snapshot(&self) -> NoteBookSnapshot {
        NoteBookSnapshot {
            notes: self.notes.get().clone(),
            visible: self.visible().into_iter().cloned().collect(),
            form: self.form.clone(),
            editing: self.editing,
            query: self.query.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::NoteColor;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn form(title: &str, content: &str) -> NoteInput {
        NoteInput {
            title: title.into(),
            content: content.into(),
            color: NoteColor::Green,
        }
    }

    fn book() -> (Arc<MemoryStore>, NoteBook) {
        let store = Arc::new(MemoryStore::new());
        let book = NoteBook::mount(StoreAdapter::new(store.clone()));
        (store, book)
    }

    #[test]
    fn save_creates_and_resets_the_form() {
        let (store, mut book) = book();
        book.set_form(form("Groceries", "milk"));

        assert!(book.save_at(at(1)));

        assert_eq!(book.notes().len(), 1);
        assert_eq!(book.notes()[0].color, NoteColor::Green);
        assert_eq!(book.form(), &NoteInput::default());
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn blank_form_is_rejected() {
        let (store, mut book) = book();
        book.set_form(form("  ", ""));

        assert!(!book.save());

        assert!(book.notes().is_empty());
        assert_eq!(book.form().title, "  ");
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn editing_updates_in_place() {
        let (_store, mut book) = book();
        book.set_form(form("draft", "v1"));
        book.save_at(at(1));
        let id = book.notes()[0].id;

        assert!(book.begin_edit(id));
        assert_eq!(book.form().content, "v1");
        book.set_form(form("final", "v2"));
        book.save_at(at(50));

        assert_eq!(book.notes().len(), 1);
        assert_eq!(book.notes()[0].title, "final");
        assert_eq!(book.notes()[0].updated_at, at(50));
        assert_eq!(book.notes()[0].created_at, at(1));
        assert_eq!(book.editing(), None);
    }

    #[test]
    fn begin_edit_ignores_unknown_ids() {
        let (_store, mut book) = book();
        assert!(!book.begin_edit(RecordId(42)));
        assert_eq!(book.editing(), None);
    }

    #[test]
    fn deleting_the_edited_note_resets_the_form() {
        let (_store, mut book) = book();
        book.set_form(form("a", ""));
        book.save_at(at(1));
        book.set_form(form("b", ""));
        book.save_at(at(2));
        let first = book.notes()[1].id;
        let second = book.notes()[0].id;

        book.begin_edit(first);
        book.delete(second);
        assert_eq!(book.editing(), Some(first));

        book.delete(first);
        assert_eq!(book.editing(), None);
        assert_eq!(book.form(), &NoteInput::default());
        assert!(book.notes().is_empty());
    }

    #[test]
    fn visible_searches_then_puts_pins_first() {
        let (_store, mut book) = book();
        book.set_form(form("Groceries", "milk"));
        book.save_at(at(1));
        book.set_form(form("Bread", "sourdough"));
        book.save_at(at(2));
        book.set_form(form("Milk tea", ""));
        book.save_at(at(3));
        let groceries = book.notes().iter().find(|n| n.title == "Groceries").unwrap().id;
        book.toggle_pin(groceries);

        book.set_query("MILK");
        let titles: Vec<_> = book.visible().iter().map(|n| n.title.as_str()).collect();

        assert_eq!(titles, ["Groceries", "Milk tea"]);
    }

    #[test]
    fn notes_persist_but_form_and_query_do_not() {
        let store = Arc::new(MemoryStore::new());
        let adapter = StoreAdapter::new(store);
        {
            let mut book = NoteBook::mount(adapter.clone());
            book.set_form(form("kept", ""));
            book.save();
            book.set_form(form("unsaved", ""));
            book.set_query("kept");
        }

        let book = NoteBook::mount(adapter);

        assert_eq!(book.notes()[0].title, "kept");
        assert!(book.form().is_blank());
        assert_eq!(book.snapshot().query, "");
    }
}
