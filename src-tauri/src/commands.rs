//! Tauri commands. Every mutation answers with the new snapshot and also
//! broadcasts it, so other listeners in the webview stay in step.

use serde::Serialize;
use tauri::{AppHandle, Emitter, State};

use crate::navigation::Screen;
use crate::records::{notes::NoteInput, Point, RecordId, Task};
use crate::shell::{Shell, ShellError, ShellSnapshot, WidgetSnapshot};
use crate::timer::FocusSnapshot;
use crate::widgets::{
    BoardSnapshot, NoteBookSnapshot, Quadrant, SwotCategory, TaskFilter, TaskListSnapshot,
};
use crate::AppState;

pub const SHELL_CHANGED: &str = "shell-changed";
pub const WIDGET_CHANGED: &str = "widget-changed";
pub const FOCUS_TIMER_CHANGED: &str = "focus-timer-changed";

pub(crate) fn emit<T: Serialize + Clone>(app: &AppHandle, event: &str, payload: T) {
    if let Err(err) = app.emit(event, payload) {
        log::warn!("failed to emit {event}: {err}");
    }
}

/// Run a synchronous widget mutation, then broadcast the widget snapshot.
async fn mutate<R, F>(state: &State<'_, AppState>, app: &AppHandle, f: F) -> Result<R, String>
where
    F: FnOnce(&mut Shell) -> Result<R, ShellError>,
{
    let mut shell = state.shell.lock().await;
    let result = f(&mut shell).map_err(|e| e.to_string())?;
    emit(app, WIDGET_CHANGED, shell.widget_snapshot().await);
    Ok(result)
}

// Shell

#[tauri::command]
pub async fn get_shell_state(state: State<'_, AppState>) -> Result<ShellSnapshot, String> {
    Ok(state.shell.lock().await.snapshot())
}

#[tauri::command]
pub async fn navigate(
    state: State<'_, AppState>,
    app: AppHandle,
    screen: Screen,
) -> Result<ShellSnapshot, String> {
    let mut shell = state.shell.lock().await;
    let snapshot = shell.navigate(screen);
    emit(&app, SHELL_CHANGED, snapshot);
    emit(&app, WIDGET_CHANGED, shell.widget_snapshot().await);
    Ok(snapshot)
}

#[tauri::command]
pub async fn toggle_language(
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<ShellSnapshot, String> {
    let snapshot = state.shell.lock().await.toggle_language();
    emit(&app, SHELL_CHANGED, snapshot);
    Ok(snapshot)
}

#[tauri::command]
pub async fn toggle_theme(
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<ShellSnapshot, String> {
    let snapshot = state.shell.lock().await.toggle_theme();
    emit(&app, SHELL_CHANGED, snapshot);
    Ok(snapshot)
}

#[tauri::command]
pub async fn get_widget_state(state: State<'_, AppState>) -> Result<WidgetSnapshot, String> {
    Ok(state.shell.lock().await.widget_snapshot().await)
}

// Priority matrix

#[tauri::command]
pub async fn matrix_set_draft(
    state: State<'_, AppState>,
    app: AppHandle,
    quadrant: Quadrant,
    text: String,
) -> Result<BoardSnapshot<Quadrant, Task>, String> {
    mutate(&state, &app, |shell| {
        let board = shell.matrix()?;
        board.set_draft(quadrant, text);
        Ok(board.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn matrix_add(
    state: State<'_, AppState>,
    app: AppHandle,
    quadrant: Quadrant,
) -> Result<BoardSnapshot<Quadrant, Task>, String> {
    mutate(&state, &app, |shell| {
        let board = shell.matrix()?;
        board.add(quadrant);
        Ok(board.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn matrix_toggle(
    state: State<'_, AppState>,
    app: AppHandle,
    quadrant: Quadrant,
    id: RecordId,
) -> Result<BoardSnapshot<Quadrant, Task>, String> {
    mutate(&state, &app, |shell| {
        let board = shell.matrix()?;
        board.toggle(quadrant, id);
        Ok(board.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn matrix_delete(
    state: State<'_, AppState>,
    app: AppHandle,
    quadrant: Quadrant,
    id: RecordId,
) -> Result<BoardSnapshot<Quadrant, Task>, String> {
    mutate(&state, &app, |shell| {
        let board = shell.matrix()?;
        board.delete(quadrant, id);
        Ok(board.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn matrix_clear_quadrant(
    state: State<'_, AppState>,
    app: AppHandle,
    quadrant: Quadrant,
) -> Result<BoardSnapshot<Quadrant, Task>, String> {
    mutate(&state, &app, |shell| {
        let board = shell.matrix()?;
        board.clear_category(quadrant);
        Ok(board.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn matrix_clear_all(
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<BoardSnapshot<Quadrant, Task>, String> {
    mutate(&state, &app, |shell| {
        let board = shell.matrix()?;
        board.clear_everything();
        Ok(board.snapshot())
    })
    .await
}

// SWOT analysis

#[tauri::command]
pub async fn swot_set_draft(
    state: State<'_, AppState>,
    app: AppHandle,
    category: SwotCategory,
    text: String,
) -> Result<BoardSnapshot<SwotCategory, Point>, String> {
    mutate(&state, &app, |shell| {
        let board = shell.analysis()?;
        board.set_draft(category, text);
        Ok(board.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn swot_add(
    state: State<'_, AppState>,
    app: AppHandle,
    category: SwotCategory,
) -> Result<BoardSnapshot<SwotCategory, Point>, String> {
    mutate(&state, &app, |shell| {
        let board = shell.analysis()?;
        board.add(category);
        Ok(board.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn swot_delete(
    state: State<'_, AppState>,
    app: AppHandle,
    category: SwotCategory,
    id: RecordId,
) -> Result<BoardSnapshot<SwotCategory, Point>, String> {
    mutate(&state, &app, |shell| {
        let board = shell.analysis()?;
        board.delete(category, id);
        Ok(board.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn swot_clear_category(
    state: State<'_, AppState>,
    app: AppHandle,
    category: SwotCategory,
) -> Result<BoardSnapshot<SwotCategory, Point>, String> {
    mutate(&state, &app, |shell| {
        let board = shell.analysis()?;
        board.clear_category(category);
        Ok(board.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn swot_clear_all(
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<BoardSnapshot<SwotCategory, Point>, String> {
    mutate(&state, &app, |shell| {
        let board = shell.analysis()?;
        board.clear_everything();
        Ok(board.snapshot())
    })
    .await
}

// Task list

#[tauri::command]
pub async fn todo_set_draft(
    state: State<'_, AppState>,
    app: AppHandle,
    text: String,
) -> Result<TaskListSnapshot, String> {
    mutate(&state, &app, |shell| {
        let list = shell.tasks()?;
        list.set_draft(text);
        Ok(list.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn todo_add(state: State<'_, AppState>, app: AppHandle) -> Result<TaskListSnapshot, String> {
    mutate(&state, &app, |shell| {
        let list = shell.tasks()?;
        list.add();
        Ok(list.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn todo_toggle(
    state: State<'_, AppState>,
    app: AppHandle,
    id: RecordId,
) -> Result<TaskListSnapshot, String> {
    mutate(&state, &app, |shell| {
        let list = shell.tasks()?;
        list.toggle(id);
        Ok(list.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn todo_delete(
    state: State<'_, AppState>,
    app: AppHandle,
    id: RecordId,
) -> Result<TaskListSnapshot, String> {
    mutate(&state, &app, |shell| {
        let list = shell.tasks()?;
        list.delete(id);
        Ok(list.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn todo_set_filter(
    state: State<'_, AppState>,
    app: AppHandle,
    filter: TaskFilter,
) -> Result<TaskListSnapshot, String> {
    mutate(&state, &app, |shell| {
        let list = shell.tasks()?;
        list.set_filter(filter);
        Ok(list.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn todo_clear_completed(
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<TaskListSnapshot, String> {
    mutate(&state, &app, |shell| {
        let list = shell.tasks()?;
        list.clear_completed();
        Ok(list.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn todo_clear_all(
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<TaskListSnapshot, String> {
    mutate(&state, &app, |shell| {
        let list = shell.tasks()?;
        list.clear_all();
        Ok(list.snapshot())
    })
    .await
}

// Notes

#[tauri::command]
pub async fn notes_set_form(
    state: State<'_, AppState>,
    app: AppHandle,
    input: NoteInput,
) -> Result<NoteBookSnapshot, String> {
    mutate(&state, &app, |shell| {
        let book = shell.notes()?;
        book.set_form(input);
        Ok(book.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn notes_begin_edit(
    state: State<'_, AppState>,
    app: AppHandle,
    id: RecordId,
) -> Result<NoteBookSnapshot, String> {
    mutate(&state, &app, |shell| {
        let book = shell.notes()?;
        book.begin_edit(id);
        Ok(book.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn notes_cancel_edit(
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<NoteBookSnapshot, String> {
    mutate(&state, &app, |shell| {
        let book = shell.notes()?;
        book.cancel_edit();
        Ok(book.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn notes_save(state: State<'_, AppState>, app: AppHandle) -> Result<NoteBookSnapshot, String> {
    mutate(&state, &app, |shell| {
        let book = shell.notes()?;
        book.save();
        Ok(book.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn notes_delete(
    state: State<'_, AppState>,
    app: AppHandle,
    id: RecordId,
) -> Result<NoteBookSnapshot, String> {
    mutate(&state, &app, |shell| {
        let book = shell.notes()?;
        book.delete(id);
        Ok(book.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn notes_toggle_pin(
    state: State<'_, AppState>,
    app: AppHandle,
    id: RecordId,
) -> Result<NoteBookSnapshot, String> {
    mutate(&state, &app, |shell| {
        let book = shell.notes()?;
        book.toggle_pin(id);
        Ok(book.snapshot())
    })
    .await
}

#[tauri::command]
pub async fn notes_set_query(
    state: State<'_, AppState>,
    app: AppHandle,
    query: String,
) -> Result<NoteBookSnapshot, String> {
    mutate(&state, &app, |shell| {
        let book = shell.notes()?;
        book.set_query(query);
        Ok(book.snapshot())
    })
    .await
}

// Focus timer. Changes, ticks included, reach the webview through the
// `focus-timer-changed` listener installed at startup.

#[derive(Debug, Clone, Copy, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerAction {
    Start,
    Pause,
    Toggle,
    Reset,
    Skip,
    Clear,
}

#[tauri::command]
pub async fn timer_action(
    state: State<'_, AppState>,
    action: TimerAction,
) -> Result<FocusSnapshot, String> {
    let mut shell = state.shell.lock().await;
    let timer = shell.timer().map_err(|e| e.to_string())?;
    let snapshot = match action {
        TimerAction::Start => timer.start().await,
        TimerAction::Pause => timer.pause().await,
        TimerAction::Toggle => timer.toggle().await,
        TimerAction::Reset => timer.reset().await,
        TimerAction::Skip => timer.skip().await,
        TimerAction::Clear => timer.clear().await,
    };
    Ok(snapshot)
}

#[tauri::command]
pub async fn timer_set_work_minutes(
    state: State<'_, AppState>,
    minutes: i64,
) -> Result<FocusSnapshot, String> {
    let mut shell = state.shell.lock().await;
    let timer = shell.timer().map_err(|e| e.to_string())?;
    Ok(timer.set_work_minutes(minutes).await)
}

#[tauri::command]
pub async fn timer_set_break_minutes(
    state: State<'_, AppState>,
    minutes: i64,
) -> Result<FocusSnapshot, String> {
    let mut shell = state.shell.lock().await;
    let timer = shell.timer().map_err(|e| e.to_string())?;
    Ok(timer.set_break_minutes(minutes).await)
}
