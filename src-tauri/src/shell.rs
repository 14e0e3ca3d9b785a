//! The application shell: preferences, the current screen, and the one
//! widget mounted for it.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::config::AppConfig;
use crate::navigation::Screen;
use crate::preferences::{Preferences, SystemPreferences, UiContext};
use crate::records::{Point, Task};
use crate::storage::StoreAdapter;
use crate::synced::Listener;
use crate::timer::{FocusSession, FocusSnapshot, FocusTimer};
use crate::widgets::{
    AnalysisBoard, BoardSnapshot, MatrixBoard, NoteBook, NoteBookSnapshot, Quadrant,
    SwotCategory, TaskList, TaskListSnapshot,
};
use crate::{log_debug, log_info};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("{expected:?} widget is not mounted (current screen: {current:?})")]
    NotMounted { expected: Screen, current: Screen },
}

pub enum ActiveWidget {
    None,
    Matrix(MatrixBoard),
    Timer(FocusTimer),
    Tasks(TaskList),
    Notes(NoteBook),
    Analysis(AnalysisBoard),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellSnapshot {
    pub screen: Screen,
    pub ui: UiContext,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "widget", content = "state", rename_all = "camelCase")]
pub enum WidgetSnapshot {
    None,
    Eisenhower(BoardSnapshot<Quadrant, Task>),
    Pomodoro(FocusSnapshot),
    Todo(TaskListSnapshot),
    Notes(NoteBookSnapshot),
    Swot(BoardSnapshot<SwotCategory, Point>),
}

pub struct Shell {
    store: StoreAdapter,
    config: AppConfig,
    preferences: Preferences,
    screen: Screen,
    widget: ActiveWidget,
    timer_listeners: Vec<Listener<FocusSession>>,
}

macro_rules! widget_accessor {
    ($name:ident, $variant:ident, $ty:ty, $screen:expr) => {
        pub fn $name(&mut self) -> Result<&mut $ty, ShellError> {
            let current = self.screen;
            match &mut self.widget {
                ActiveWidget::$variant(widget) => Ok(widget),
                _ => Err(ShellError::NotMounted {
                    expected: $screen,
                    current,
                }),
            }
        }
    };
}

impl Shell {
    pub fn new(store: StoreAdapter, config: AppConfig, system: SystemPreferences) -> Self {
        let preferences = Preferences::mount(store.clone(), system);
        Self {
            store,
            config,
            preferences,
            screen: Screen::default(),
            widget: ActiveWidget::None,
            timer_listeners: Vec::new(),
        }
    }

    /// Attach a listener to every focus timer this shell mounts from now on.
    pub fn on_timer_change<F>(&mut self, listener: F)
    where
        F: Fn(&FocusSession) + Send + Sync + 'static,
    {
        self.timer_listeners.push(Arc::new(listener));
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn ui(&self) -> UiContext {
        self.preferences.context()
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            screen: self.screen,
            ui: self.ui(),
        }
    }

    pub fn toggle_language(&mut self) -> ShellSnapshot {
        self.preferences.toggle_language();
        self.snapshot()
    }

    pub fn toggle_theme(&mut self) -> ShellSnapshot {
        self.preferences.toggle_theme();
        self.snapshot()
    }

    /// Unmount the current widget and mount the one for `screen`, which
    /// re-reads its documents from storage. Navigating to the current screen
    /// keeps the mounted widget.
    pub fn navigate(&mut self, screen: Screen) -> ShellSnapshot {
        if screen == self.screen {
            return self.snapshot();
        }

        // Drop first so a running ticker stops before the next widget reads.
        self.widget = ActiveWidget::None;
        log_debug!("unmounted {:?}", self.screen);

        self.widget = self.mount(screen);
        self.screen = screen;
        log_info!("navigated to {:?}", screen);
        self.snapshot()
    }

    fn mount(&self, screen: Screen) -> ActiveWidget {
        let store = self.store.clone();
        match screen {
            Screen::Home | Screen::Schedule => ActiveWidget::None,
            Screen::Eisenhower => ActiveWidget::Matrix(MatrixBoard::mount(store)),
            Screen::Pomodoro => ActiveWidget::Timer(FocusTimer::mount_with(
                store,
                self.config.tick_interval,
                self.timer_listeners.clone(),
            )),
            Screen::Todo => ActiveWidget::Tasks(TaskList::mount(store)),
            Screen::Notes => ActiveWidget::Notes(NoteBook::mount(store)),
            Screen::Swot => ActiveWidget::Analysis(AnalysisBoard::mount(store)),
        }
    }

    widget_accessor!(matrix, Matrix, MatrixBoard, Screen::Eisenhower);
    widget_accessor!(timer, Timer, FocusTimer, Screen::Pomodoro);
    widget_accessor!(tasks, Tasks, TaskList, Screen::Todo);
    widget_accessor!(notes, Notes, NoteBook, Screen::Notes);
    widget_accessor!(analysis, Analysis, AnalysisBoard, Screen::Swot);

    pub async fn widget_snapshot(&self) -> WidgetSnapshot {
        match &self.widget {
            ActiveWidget::None => WidgetSnapshot::None,
            ActiveWidget::Matrix(board) => WidgetSnapshot::Eisenhower(board.snapshot()),
            ActiveWidget::Timer(timer) => WidgetSnapshot::Pomodoro(timer.snapshot().await),
            ActiveWidget::Tasks(list) => WidgetSnapshot::Todo(list.snapshot()),
            ActiveWidget::Notes(book) => WidgetSnapshot::Notes(book.snapshot()),
            ActiveWidget::Analysis(board) => WidgetSnapshot::Swot(board.snapshot()),
        }
    }
}
