use super::{DARK_MODE_KEY, KeyValueStore};
use crate::error::StorageError;

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Theme {
    /// True for [`Theme::Dark`]
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Label for the toggle control
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "☀️ Light Mode",
            Theme::Light => "🌙 Dark Mode",
        }
    }
}

/// Persisted display preferences, independent of history
#[derive(Debug, Clone)]
pub struct Preferences<S> {
    storage: S,
}

impl<S: KeyValueStore> Preferences<S> {
    /// Preferences persisted in `storage`
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stored theme; anything but `"true"` reads as light
    pub fn theme(&self) -> Theme {
        match self.storage.get(DARK_MODE_KEY) {
            Ok(Some(value)) if value.trim() == "true" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Persist `theme`
    pub fn set_theme(&self, theme: Theme) -> Result<(), StorageError> {
        let flag = if theme.is_dark() { "true" } else { "false" };
        self.storage.set(DARK_MODE_KEY, flag)
    }

    /// Flip and persist the theme, returning the new one
    pub fn toggle_dark_mode(&self) -> Result<Theme, StorageError> {
        let next = match self.theme() {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        self.set_theme(next)?;
        Ok(next)
    }
}
