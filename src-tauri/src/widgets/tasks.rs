use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::records::{engine, IdGenerator, Record, RecordId, Task};
use crate::storage::{keys, StoreAdapter};
use crate::synced::Synced;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub fn admits(self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !task.completed,
            TaskFilter::Completed => task.completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    /// Whole percent, 0 for an empty list.
    pub completion_rate: u8,
}

impl TaskStats {
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let completion_rate = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        };
        Self {
            total,
            completed,
            active: total - completed,
            completion_rate,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListSnapshot {
    pub tasks: Vec<Task>,
    pub visible: Vec<Task>,
    pub draft: String,
    pub filter: TaskFilter,
    pub stats: TaskStats,
}

/// Flat to-do list. The draft line and the filter are session state; only
/// the tasks are persisted.
pub struct TaskList {
    tasks: Synced<Vec<Task>>,
    draft: String,
    filter: TaskFilter,
    ids: IdGenerator,
}

impl TaskList {
    pub fn new(store: StoreAdapter) -> Self {
        Self {
            tasks: Synced::new(store, keys::TODO_TASKS),
            draft: String::new(),
            filter: TaskFilter::default(),
            ids: IdGenerator::new(),
        }
    }

    pub fn mount(store: StoreAdapter) -> Self {
        let mut list = Self::new(store);
        list.hydrate();
        list
    }

    pub fn hydrate(&mut self) {
        self.tasks.hydrate();
        self.ids = IdGenerator::seeded(self.tasks.get().iter().map(Record::id));
    }

    pub fn is_loaded(&self) -> bool {
        self.tasks.is_loaded()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.get()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    pub fn add(&mut self) -> bool {
        self.add_at(Utc::now())
    }

    /// Submit the draft. Returns `false` (and keeps the draft) when blank.
    pub fn add_at(&mut self, now: DateTime<Utc>) -> bool {
        if self.draft.trim().is_empty() {
            return false;
        }
        let stamp = self.ids.stamp(now);
        let (tasks, draft) = engine::add_record(self.tasks.get(), &self.draft, stamp);
        self.tasks.replace(tasks);
        self.draft = draft;
        true
    }

    pub fn delete(&mut self, id: RecordId) {
        let next = engine::delete_record(self.tasks.get(), id);
        self.tasks.replace(next);
    }

    pub fn toggle(&mut self, id: RecordId) {
        let next = engine::toggle_complete(self.tasks.get(), id);
        self.tasks.replace(next);
    }

    pub fn clear_completed(&mut self) {
        let next = engine::clear_completed(self.tasks.get());
        self.tasks.replace(next);
    }

    pub fn clear_all(&mut self) {
        self.tasks.replace(Vec::new());
    }

    pub fn visible(&self) -> Vec<&Task> {
        let filter = self.filter;
        engine::filter_records(self.tasks.get(), move |task| filter.admits(task)).collect()
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::of(self.tasks.get())
    }

    pub fn snapshot(&self) -> TaskListSnapshot {
        TaskListSnapshot {
            tasks: self.tasks.get().clone(),
            visible: self.visible().into_iter().cloned().collect(),
            draft: self.draft.clone(),
            filter: self.filter,
            stats: self.stats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use chrono::TimeZone;
    use std::sync::Arc;

    fn fixture() -> (Arc<MemoryStore>, StoreAdapter) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), StoreAdapter::new(store))
    }

    fn add(list: &mut TaskList, text: &str) -> RecordId {
        list.set_draft(text);
        assert!(list.add());
        list.tasks().last().map(|t| t.id).unwrap()
    }

    #[test]
    fn add_trims_and_clears_the_draft() {
        let (_store, adapter) = fixture();
        let mut list = TaskList::mount(adapter);

        list.set_draft("  buy milk  ");
        assert!(list.add_at(Utc.timestamp_millis_opt(10).unwrap()));

        assert_eq!(list.tasks().len(), 1);
        assert_eq!(list.tasks()[0].text, "buy milk");
        assert!(!list.tasks()[0].completed);
        assert_eq!(list.draft(), "");
    }

    #[test]
    fn blank_draft_is_rejected_without_a_write() {
        let (store, adapter) = fixture();
        let mut list = TaskList::mount(adapter);
        list.set_draft(" \t ");

        assert!(!list.add());

        assert!(list.tasks().is_empty());
        assert_eq!(list.draft(), " \t ");
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn toggle_twice_restores_the_list() {
        let (_store, adapter) = fixture();
        let mut list = TaskList::mount(adapter);
        let id = add(&mut list, "a");
        add(&mut list, "b");
        let before = list.tasks().to_vec();

        list.toggle(id);
        assert!(list.tasks()[0].completed);
        list.toggle(id);

        assert_eq!(list.tasks(), before.as_slice());
    }

    #[test]
    fn filter_and_stats_follow_completion() {
        let (_store, adapter) = fixture();
        let mut list = TaskList::mount(adapter);
        let done = add(&mut list, "done");
        add(&mut list, "open one");
        add(&mut list, "open two");
        list.toggle(done);

        list.set_filter(TaskFilter::Active);
        assert_eq!(list.visible().len(), 2);
        list.set_filter(TaskFilter::Completed);
        assert_eq!(list.visible()[0].text, "done");
        list.set_filter(TaskFilter::All);
        assert_eq!(list.visible().len(), 3);

        let stats = list.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.completion_rate, 33);
    }

    #[test]
    fn empty_list_has_zero_completion_rate() {
        assert_eq!(TaskStats::of(&[]).completion_rate, 0);
    }

    #[test]
    fn clear_completed_keeps_active_tasks() {
        let (_store, adapter) = fixture();
        let mut list = TaskList::mount(adapter.clone());
        let done = add(&mut list, "done");
        add(&mut list, "keep");
        list.toggle(done);

        list.clear_completed();

        assert_eq!(list.tasks().len(), 1);
        assert_eq!(list.tasks()[0].text, "keep");
        assert_eq!(TaskList::mount(adapter).tasks().len(), 1);
    }

    #[test]
    fn remount_restores_tasks_but_not_the_draft() {
        let (store, adapter) = fixture();
        {
            let mut list = TaskList::mount(adapter.clone());
            add(&mut list, "persisted");
            list.set_draft("unsent");
            list.set_filter(TaskFilter::Completed);
        }

        let list = TaskList::mount(adapter);

        assert_eq!(list.tasks()[0].text, "persisted");
        assert_eq!(list.draft(), "");
        assert_eq!(list.filter(), TaskFilter::All);
        assert!(store.raw(keys::TODO_TASKS).is_some());
    }

    #[test]
    fn stored_tasks_survive_a_premature_clear() {
        let (store, adapter) = fixture();
        store
            .set(keys::TODO_TASKS, r#"[{"id":3,"text":"saved","completed":true}]"#)
            .unwrap();

        let mut list = TaskList::new(adapter);
        list.clear_all();
        list.hydrate();

        assert_eq!(list.tasks()[0].text, "saved");
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let (_store, adapter) = fixture();
        let mut list = TaskList::mount(adapter);
        add(&mut list, "one");

        let json = serde_json::to_value(list.snapshot()).unwrap();

        assert_eq!(json["stats"]["completionRate"], 0);
        assert_eq!(json["filter"], "all");
        assert_eq!(json["visible"][0]["text"], "one");
    }
}
