//! Close-and-reopen scenarios against a real database file.

use std::sync::Arc;
use std::time::Duration;

use focuskit_lib::config::AppConfig;
use focuskit_lib::navigation::Screen;
use focuskit_lib::preferences::{Language, SystemPreferences, TextDirection};
use focuskit_lib::records::notes::NoteInput;
use focuskit_lib::records::NoteColor;
use focuskit_lib::shell::Shell;
use focuskit_lib::storage::{keys, KeyValueStore, SqliteStore, StoreAdapter};
use focuskit_lib::timer::{FocusPhase, FocusTimer};
use focuskit_lib::widgets::{AnalysisBoard, MatrixBoard, Quadrant, SwotCategory, TaskList};
use focuskit_lib::open_store;
use tempfile::TempDir;

fn adapter(dir: &TempDir) -> StoreAdapter {
    let store = SqliteStore::open(dir.path().join("focuskit.sqlite3")).unwrap();
    StoreAdapter::new(Arc::new(store))
}

fn config() -> AppConfig {
    AppConfig::from_lookup(|_| None)
}

#[test]
fn matrix_survives_an_app_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut board = MatrixBoard::mount(adapter(&dir));
        board.set_draft(Quadrant::DoFirst, "renew passport");
        board.add(Quadrant::DoFirst);
        board.set_draft(Quadrant::Delegate, "half typed");
    }

    let board = MatrixBoard::mount(adapter(&dir));

    assert_eq!(board.records(Quadrant::DoFirst)[0].text, "renew passport");
    assert_eq!(board.draft(Quadrant::Delegate), "half typed");
    assert_eq!(board.total(), 1);
}

#[test]
fn premature_default_state_never_reaches_disk() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut list = TaskList::mount(adapter(&dir));
        list.set_draft("keep me");
        list.add();
    }

    let mut list = TaskList::new(adapter(&dir));
    list.clear_all();
    drop(list);

    let list = TaskList::mount(adapter(&dir));
    assert_eq!(list.tasks()[0].text, "keep me");
}

#[test]
fn widgets_use_separate_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(dir.path().join("focuskit.sqlite3")).unwrap();
    let adapter = StoreAdapter::new(Arc::new(store.clone()));

    let mut swot = AnalysisBoard::mount(adapter.clone());
    swot.set_draft(SwotCategory::Threats, "churn");
    swot.add(SwotCategory::Threats);
    let mut matrix = MatrixBoard::mount(adapter);
    matrix.clear_everything();

    assert!(store.get(keys::SWOT_POINTS).unwrap().is_some());
    assert!(store.get(keys::MATRIX_TASKS).unwrap().is_none());
    assert!(store.get(keys::TODO_TASKS).unwrap().is_none());
}

#[test]
fn shell_restores_preferences_and_notes() {
    let dir = tempfile::tempdir().unwrap();
    let system = SystemPreferences {
        language: Some(Language::En),
        dark_mode: None,
    };
    {
        let mut shell = Shell::new(adapter(&dir), config(), system);
        shell.toggle_language();
        shell.toggle_theme();
        shell.navigate(Screen::Notes);
        let book = shell.notes().unwrap();
        book.set_form(NoteInput {
            title: "Groceries".into(),
            content: "milk".into(),
            color: NoteColor::Yellow,
        });
        book.save();
    }

    let mut shell = Shell::new(adapter(&dir), config(), system);
    let ui = shell.ui();
    assert_eq!(ui.language, Language::Ar);
    assert_eq!(ui.direction, TextDirection::Rtl);
    assert!(ui.dark_mode);

    // Navigation is not persisted.
    assert_eq!(shell.screen(), Screen::Home);
    shell.navigate(Screen::Notes);
    let book = shell.notes().unwrap();
    book.set_query("MILK");
    assert_eq!(book.visible()[0].title, "Groceries");
    assert_eq!(book.visible()[0].color, NoteColor::Yellow);
}

#[tokio::test]
async fn timer_progress_is_restored_paused() {
    let dir = tempfile::tempdir().unwrap();
    {
        let timer = FocusTimer::mount(adapter(&dir), Duration::from_secs(1));
        timer.set_work_minutes(30).await;
        timer.skip().await;
        timer.start().await;
    }

    let timer = FocusTimer::mount(adapter(&dir), Duration::from_secs(1));
    let snapshot = timer.snapshot().await;

    assert_eq!(snapshot.phase, FocusPhase::OnBreak);
    assert_eq!(snapshot.session.work_minutes, 30);
    assert_eq!(snapshot.session.remaining_seconds, 300);
    assert!(!snapshot.running);
}

#[test]
fn unusable_database_path_falls_back_to_memory() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the database file should be.
    let blocked = dir.path().join("occupied");
    std::fs::create_dir(&blocked).unwrap();

    let adapter = open_store(&config(), blocked);
    let mut list = TaskList::mount(adapter);
    list.set_draft("still works");

    assert!(list.add());
    assert_eq!(list.tasks().len(), 1);
}
