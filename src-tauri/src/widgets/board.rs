use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::records::{
    engine, ByCategory, Category, Completable, IdGenerator, Record, RecordId, TextRecord,
};
use crate::storage::StoreAdapter;
use crate::synced::Synced;

/// Bounds a record type needs to sit in a persisted board.
pub trait BoardRecord: TextRecord + Serialize + DeserializeOwned + PartialEq + Send + 'static {}

impl<T> BoardRecord for T where T: TextRecord + Serialize + DeserializeOwned + PartialEq + Send + 'static {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot<C: Category, T> {
    pub records: ByCategory<C, Vec<T>>,
    pub drafts: ByCategory<C, String>,
    pub total: usize,
}

/// A widget made of fixed categories, each with a record list and a draft
/// line. The priority matrix and the SWOT analysis are both boards.
///
/// Records and drafts are two documents under two keys; each is written only
/// when it changes.
pub struct CategoryBoard<C: Category, T: BoardRecord> {
    records: Synced<ByCategory<C, Vec<T>>>,
    drafts: Synced<ByCategory<C, String>>,
    ids: IdGenerator,
}

impl<C: Category, T: BoardRecord> CategoryBoard<C, T> {
    /// Board in `Hydrating`, not yet read from storage.
    pub fn new(store: StoreAdapter) -> Self {
        Self {
            records: Synced::new(store.clone(), C::RECORDS_KEY),
            drafts: Synced::new(store, C::DRAFTS_KEY),
            ids: IdGenerator::new(),
        }
    }

    pub fn mount(store: StoreAdapter) -> Self {
        let mut board = Self::new(store);
        board.hydrate();
        board
    }

    pub fn hydrate(&mut self) {
        self.records.hydrate();
        self.drafts.hydrate();
        self.ids = IdGenerator::seeded(
            self.records
                .get()
                .iter()
                .flat_map(|(_, list)| list.iter().map(Record::id)),
        );
    }

    pub fn is_loaded(&self) -> bool {
        self.records.is_loaded() && self.drafts.is_loaded()
    }

    pub fn records(&self, category: C) -> &[T] {
        self.records.get().records(category)
    }

    pub fn draft(&self, category: C) -> &str {
        self.drafts.get().draft(category)
    }

    pub fn total(&self) -> usize {
        self.records.get().total()
    }

    /// Store the draft verbatim; trimming only happens on submit.
    pub fn set_draft(&mut self, category: C, text: impl Into<String>) {
        let text = text.into();
        self.drafts.update(|drafts| drafts.set(category, text));
    }

    /// Submit `category`'s draft. Returns `false` when the draft was blank.
    pub fn add(&mut self, category: C) -> bool {
        self.add_at(category, Utc::now())
    }

    pub fn add_at(&mut self, category: C, now: DateTime<Utc>) -> bool {
        if self.draft(category).trim().is_empty() {
            return false;
        }
        let stamp = self.ids.stamp(now);
        let (records, drafts) =
            engine::add_to_category(self.records.get(), self.drafts.get(), category, stamp);
        self.records.replace(records);
        self.drafts.replace(drafts);
        true
    }

    pub fn delete(&mut self, category: C, id: RecordId) {
        let next = engine::delete_in_category(self.records.get(), category, id);
        self.records.replace(next);
    }

    pub fn clear_category(&mut self, category: C) {
        let next = engine::clear_category(self.records.get(), category);
        self.records.replace(next);
    }

    /// Empty every category and every draft.
    pub fn clear_everything(&mut self) {
        self.records.replace(engine::clear_all());
        self.drafts.replace(engine::clear_all());
    }

    pub fn snapshot(&self) -> BoardSnapshot<C, T> {
        BoardSnapshot {
            records: self.records.get().clone(),
            drafts: self.drafts.get().clone(),
            total: self.total(),
        }
    }
}

impl<C: Category, T: BoardRecord + Completable> CategoryBoard<C, T> {
    pub fn toggle(&mut self, category: C, id: RecordId) {
        let next = engine::toggle_in_category(self.records.get(), category, id);
        self.records.replace(next);
    }
}
