pub mod config;
pub mod navigation;
pub mod preferences;
pub mod records;
pub mod shell;
pub mod storage;
pub mod synced;
pub mod timer;
pub mod utils;
pub mod widgets;

#[cfg(feature = "desktop")]
mod commands;

use std::sync::Arc;

use config::AppConfig;
use storage::{KeyValueStore, MemoryStore, SqliteStore, StoreAdapter};

pub use shell::Shell;

#[cfg(feature = "desktop")]
pub(crate) struct AppState {
    pub(crate) shell: tokio::sync::Mutex<Shell>,
}

/// Open the database at `db_path`, or fall back to a session-only store so
/// the app stays usable without persistence.
pub fn open_store(config: &AppConfig, db_path: std::path::PathBuf) -> StoreAdapter {
    let backend: Arc<dyn KeyValueStore> = match SqliteStore::open(db_path) {
        Ok(store) => {
            log::info!("Using database at {}", store.path().display());
            Arc::new(store)
        }
        Err(err) => {
            log::error!("Failed to open database, changes will not be saved: {err:#}");
            Arc::new(MemoryStore::new())
        }
    };
    StoreAdapter::with_quota(backend, config.quota_bytes)
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::*;
    use preferences::SystemPreferences;
    use tauri::Manager;
    use timer::FocusSnapshot;

    let config = AppConfig::from_env();
    utils::init_logging(&config);

    log::info!("focuskit starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(move |app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = match &config.data_dir {
                    Some(dir) => dir.clone(),
                    None => app
                        .path()
                        .app_data_dir()
                        .map_err(|err| anyhow::anyhow!(err))?,
                };
                std::fs::create_dir_all(&app_data_dir)?;

                let store = open_store(&config, config.db_path(app_data_dir));

                let dark_mode = app
                    .get_webview_window("main")
                    .and_then(|window| window.theme().ok())
                    .map(|theme| theme == tauri::Theme::Dark);
                let system = SystemPreferences::detect().with_dark_mode(dark_mode);

                let mut shell = Shell::new(store, config.clone(), system);
                let handle = app.handle().clone();
                shell.on_timer_change(move |session| {
                    emit(&handle, FOCUS_TIMER_CHANGED, FocusSnapshot::from(session));
                });

                app.manage(AppState {
                    shell: tokio::sync::Mutex::new(shell),
                });
                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            get_shell_state,
            navigate,
            toggle_language,
            toggle_theme,
            get_widget_state,
            matrix_set_draft,
            matrix_add,
            matrix_toggle,
            matrix_delete,
            matrix_clear_quadrant,
            matrix_clear_all,
            swot_set_draft,
            swot_add,
            swot_delete,
            swot_clear_category,
            swot_clear_all,
            todo_set_draft,
            todo_add,
            todo_toggle,
            todo_delete,
            todo_set_filter,
            todo_clear_completed,
            todo_clear_all,
            notes_set_form,
            notes_begin_edit,
            notes_cancel_edit,
            notes_save,
            notes_delete,
            notes_toggle_pin,
            notes_set_query,
            timer_action,
            timer_set_work_minutes,
            timer_set_break_minutes,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
