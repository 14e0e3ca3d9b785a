use serde::{Deserialize, Serialize};

use crate::storage::{keys, StoreAdapter};
use crate::synced::{Document, Synced};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Rtl,
    Ltr,
}

impl Language {
    pub fn direction(self) -> TextDirection {
        match self {
            Language::Ar => TextDirection::Rtl,
            Language::En => TextDirection::Ltr,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::Ar => Language::En,
            Language::En => Language::Ar,
        }
    }

    /// Language of a POSIX locale string such as `en_US.UTF-8` or `ar_EG`.
    pub fn from_locale(locale: &str) -> Option<Self> {
        let code = locale
            .split(['_', '.', '@', '-'])
            .next()?
            .to_ascii_lowercase();
        match code.as_str() {
            "ar" => Some(Language::Ar),
            "en" => Some(Language::En),
            _ => None,
        }
    }
}

/// What the host platform prefers, used until the user picks something.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemPreferences {
    pub language: Option<Language>,
    pub dark_mode: Option<bool>,
}

impl SystemPreferences {
    pub fn detect() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// First non-empty of `LC_ALL`, `LC_MESSAGES`, `LANG` decides the language.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let language = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.is_empty())
            .and_then(|locale| Language::from_locale(&locale));
        Self {
            language,
            dark_mode: None,
        }
    }

    pub fn with_dark_mode(mut self, dark_mode: Option<bool>) -> Self {
        self.dark_mode = dark_mode;
        self
    }
}

/// Stored choices. A `None` field follows the system preference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
}

impl Document for StoredPreferences {}

/// Language, direction and theme, handed to every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiContext {
    pub language: Language,
    pub direction: TextDirection,
    pub dark_mode: bool,
}

pub struct Preferences {
    stored: Synced<StoredPreferences>,
    system: SystemPreferences,
}

impl Preferences {
    pub fn mount(store: StoreAdapter, system: SystemPreferences) -> Self {
        Self {
            stored: Synced::mount(store, keys::PREFERENCES),
            system,
        }
    }

    pub fn language(&self) -> Language {
        self.stored
            .get()
            .language
            .or(self.system.language)
            .unwrap_or_default()
    }

    pub fn dark_mode(&self) -> bool {
        self.stored
            .get()
            .dark_mode
            .or(self.system.dark_mode)
            .unwrap_or(false)
    }

    pub fn context(&self) -> UiContext {
        let language = self.language();
        UiContext {
            language,
            direction: language.direction(),
            dark_mode: self.dark_mode(),
        }
    }

    pub fn set_language(&mut self, language: Language) -> UiContext {
        self.stored.update(|prefs| prefs.language = Some(language));
        self.context()
    }

    pub fn toggle_language(&mut self) -> UiContext {
        let next = self.language().toggled();
        self.set_language(next)
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) -> UiContext {
        self.stored.update(|prefs| prefs.dark_mode = Some(dark_mode));
        self.context()
    }

    pub fn toggle_theme(&mut self) -> UiContext {
        let next = !self.dark_mode();
        self.set_dark_mode(next)
    }
}
