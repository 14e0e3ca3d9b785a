//! Pure collection transforms. Nothing here touches storage or the clock:
//! new records get their identity from the `Stamp` the caller passes in.

use super::{ByCategory, Category, Completable, Record, RecordId, Stamp, TextRecord};

/// Append a record built from `draft`, returning the new records and the new
/// draft. A blank draft leaves both exactly as they were.
pub fn add_record<T: TextRecord>(records: &[T], draft: &str, stamp: Stamp) -> (Vec<T>, String) {
    let text = draft.trim();
    if text.is_empty() {
        return (records.to_vec(), draft.to_string());
    }

    let mut next = Vec::with_capacity(records.len() + 1);
    next.extend_from_slice(records);
    next.push(T::from_text(text.to_string(), stamp));
    (next, String::new())
}

/// Drop the record with `id`. Unknown ids are not an error.
pub fn delete_record<T: Record + Clone>(records: &[T], id: RecordId) -> Vec<T> {
    records.iter().filter(|r| r.id() != id).cloned().collect()
}

/// Flip the completion flag of the record with `id`, if present.
pub fn toggle_complete<T: Completable>(records: &[T], id: RecordId) -> Vec<T> {
    records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if record.id() == id {
                let completed = record.is_completed();
                record.set_completed(!completed);
            }
            record
        })
        .collect()
}

pub fn clear_completed<T: Completable>(records: &[T]) -> Vec<T> {
    records.iter().filter(|r| !r.is_completed()).cloned().collect()
}

/// Lazy view over `records`; the collection itself is untouched.
pub fn filter_records<'a, T, P>(records: &'a [T], predicate: P) -> impl Iterator<Item = &'a T> + 'a
where
    P: Fn(&T) -> bool + 'a,
{
    records.iter().filter(move |record| predicate(*record))
}

/// Categorized variant of [`add_record`]. Only `category`'s list and draft
/// can change.
pub fn add_to_category<C, T>(
    records: &ByCategory<C, Vec<T>>,
    drafts: &ByCategory<C, String>,
    category: C,
    stamp: Stamp,
) -> (ByCategory<C, Vec<T>>, ByCategory<C, String>)
where
    C: Category,
    T: TextRecord,
{
    let (list, draft) = add_record(records.records(category), drafts.draft(category), stamp);

    let mut next_records = records.clone();
    let mut next_drafts = drafts.clone();
    if list.len() != records.records(category).len() {
        next_records.set(category, list);
        next_drafts.set(category, draft);
    }
    (next_records, next_drafts)
}

pub fn delete_in_category<C, T>(
    records: &ByCategory<C, Vec<T>>,
    category: C,
    id: RecordId,
) -> ByCategory<C, Vec<T>>
where
    C: Category,
    T: Record + Clone,
{
    let mut next = records.clone();
    if records.records(category).iter().any(|r| r.id() == id) {
        next.set(category, delete_record(records.records(category), id));
    }
    next
}

pub fn toggle_in_category<C, T>(
    records: &ByCategory<C, Vec<T>>,
    category: C,
    id: RecordId,
) -> ByCategory<C, Vec<T>>
where
    C: Category,
    T: Completable,
{
    let mut next = records.clone();
    if records.records(category).iter().any(|r| r.id() == id) {
        next.set(category, toggle_complete(records.records(category), id));
    }
    next
}

pub fn clear_category<C, T>(records: &ByCategory<C, Vec<T>>, category: C) -> ByCategory<C, Vec<T>>
where
    C: Category,
    T: Clone,
{
    let mut next = records.clone();
    next.set(category, Vec::new());
    next
}

/// Every category emptied.
pub fn clear_all<C: Category, V: Default>() -> ByCategory<C, V> {
    ByCategory::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::category::tests::Shelf;
    use crate::records::{Point, Task};
    use chrono::{TimeZone, Utc};

    fn stamp(id: i64) -> Stamp {
        Stamp {
            id: RecordId(id),
            at: Utc.timestamp_millis_opt(id).unwrap(),
        }
    }

    fn tasks(texts: &[&str]) -> Vec<Task> {
        let mut list = Vec::new();
        for (i, text) in texts.iter().enumerate() {
            list = add_record(&list, text, stamp(i as i64 + 1)).0;
        }
        list
    }

    #[test]
    fn add_appends_trimmed_text_and_clears_draft() {
        let (list, draft) = add_record::<Task>(&[], "  buy milk ", stamp(10));

        assert_eq!(draft, "");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].text, "buy milk");
        assert_eq!(list[0].id, RecordId(10));
        assert!(!list[0].completed);
    }

    #[test]
    fn blank_draft_changes_nothing() {
        let existing = tasks(&["a"]);
        for draft in ["", "   ", "\t\n"] {
            let (list, next_draft) = add_record(&existing, draft, stamp(99));
            assert_eq!(list, existing);
            assert_eq!(next_draft, draft);
        }
    }

    #[test]
    fn add_preserves_insertion_order() {
        let list = tasks(&["first", "second", "third"]);
        let texts: Vec<_> = list.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[test]
    fn delete_is_idempotent() {
        let list = tasks(&["a", "b"]);
        let once = delete_record(&list, RecordId(1));
        let twice = delete_record(&once, RecordId(1));

        assert_eq!(once.len(), 1);
        assert_eq!(once, twice);
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let list = tasks(&["a"]);
        assert_eq!(delete_record(&list, RecordId(404)), list);
    }

    #[test]
    fn toggle_twice_is_identity() {
        let list = tasks(&["a", "b"]);
        let toggled = toggle_complete(&list, RecordId(2));
        assert!(toggled[1].completed);
        assert!(!toggled[0].completed);

        assert_eq!(toggle_complete(&toggled, RecordId(2)), list);
    }

    #[test]
    fn clear_completed_keeps_open_tasks() {
        let list = toggle_complete(&tasks(&["a", "b", "c"]), RecordId(2));
        let remaining = clear_completed(&list);
        let texts: Vec<_> = remaining.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "c"]);
    }

    #[test]
    fn filter_is_a_view() {
        let list = toggle_complete(&tasks(&["a", "b"]), RecordId(1));
        let done: Vec<_> = filter_records(&list, |t: &Task| t.completed).collect();

        assert_eq!(done.len(), 1);
        assert_eq!(done[0].text, "a");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn categorized_add_touches_only_its_category() {
        let records: ByCategory<Shelf, Vec<Point>> = ByCategory::default();
        let mut drafts: ByCategory<Shelf, String> = ByCategory::default();
        drafts.set(Shelf::Top, "strong brand".into());
        drafts.set(Shelf::Bottom, "half typed".into());

        let (records, drafts) = add_to_category(&records, &drafts, Shelf::Top, stamp(7));

        assert_eq!(records.records(Shelf::Top).len(), 1);
        assert_eq!(records.records(Shelf::Top)[0].text, "strong brand");
        assert!(records.records(Shelf::Bottom).is_empty());
        assert_eq!(drafts.draft(Shelf::Top), "");
        assert_eq!(drafts.draft(Shelf::Bottom), "half typed");
    }

    #[test]
    fn categorized_add_with_blank_draft_is_a_no_op() {
        let records: ByCategory<Shelf, Vec<Task>> = ByCategory::default();
        let mut drafts: ByCategory<Shelf, String> = ByCategory::default();
        drafts.set(Shelf::Top, "  ".into());

        let (next_records, next_drafts) = add_to_category(&records, &drafts, Shelf::Top, stamp(1));

        assert_eq!(next_records, records);
        assert_eq!(next_drafts, drafts);
    }

    #[test]
    fn categorized_delete_toggle_and_clear() {
        let records: ByCategory<Shelf, Vec<Task>> = ByCategory::default();
        let mut drafts: ByCategory<Shelf, String> = ByCategory::default();
        drafts.set(Shelf::Top, "one".into());
        let (records, _) = add_to_category(&records, &drafts, Shelf::Top, stamp(1));
        drafts.set(Shelf::Bottom, "two".into());
        let (records, _) = add_to_category(&records, &drafts, Shelf::Bottom, stamp(2));

        // Id 1 lives in Top; asking Bottom for it changes nothing.
        assert_eq!(toggle_in_category(&records, Shelf::Bottom, RecordId(1)), records);
        let toggled = toggle_in_category(&records, Shelf::Top, RecordId(1));
        assert!(toggled.records(Shelf::Top)[0].completed);

        let deleted = delete_in_category(&toggled, Shelf::Bottom, RecordId(2));
        assert!(deleted.records(Shelf::Bottom).is_empty());
        assert_eq!(deleted.records(Shelf::Top).len(), 1);

        let cleared = clear_category(&deleted, Shelf::Top);
        assert_eq!(cleared.total(), 0);

        let empty: ByCategory<Shelf, Vec<Task>> = clear_all();
        assert_eq!(empty, ByCategory::default());
    }
}
