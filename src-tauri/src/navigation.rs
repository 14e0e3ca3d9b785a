use serde::{Deserialize, Serialize};

/// Screens reachable from the shell. Kept in memory only; every launch
/// starts at `Home`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    #[default]
    Home,
    Eisenhower,
    Pomodoro,
    Todo,
    /// Placeholder with no state of its own.
    Schedule,
    Notes,
    Swot,
}

impl Screen {
    pub const ALL: [Screen; 7] = [
        Screen::Home,
        Screen::Eisenhower,
        Screen::Pomodoro,
        Screen::Todo,
        Screen::Schedule,
        Screen::Notes,
        Screen::Swot,
    ];

    pub fn has_widget(self) -> bool {
        !matches!(self, Screen::Home | Screen::Schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_the_webview_routes() {
        let names: Vec<_> = Screen::ALL
            .iter()
            .map(|s| serde_json::to_value(s).unwrap())
            .collect();
        assert_eq!(
            names,
            ["home", "eisenhower", "pomodoro", "todo", "schedule", "notes", "swot"]
        );
        assert_eq!(Screen::default(), Screen::Home);
    }

    #[test]
    fn home_and_schedule_mount_nothing() {
        let with_widgets: Vec<_> = Screen::ALL.into_iter().filter(|s| s.has_widget()).collect();
        assert_eq!(with_widgets.len(), 5);
        assert!(!Screen::Schedule.has_widget());
    }
}
