//! Theme preference and persistence.
//!
//! Two states, `light` and `dark`, stored under the `theme` key.

use crate::storage::{LocalStorage, StorageResult, THEME_KEY};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown theme '{0}', expected light or dark")]
pub struct ThemeParseError(pub String);

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeParseError(other.to_string())),
        }
    }
}

/// Reads and writes the persisted theme
pub struct ThemeStore {
    storage: Box<dyn LocalStorage>,
    current: Theme,
}

impl ThemeStore {
    /// Load the saved theme, falling back to light
    pub fn load(storage: Box<dyn LocalStorage>) -> Self {
        let current = storage
            .get_item(THEME_KEY)
            .and_then(|raw| match raw.parse() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring stored theme");
                    None
                }
            })
            .unwrap_or_default();

        Self { storage, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Persist and apply a theme
    pub fn set(&mut self, theme: Theme) -> StorageResult<()> {
        self.storage.set_item(THEME_KEY, theme.as_str())?;
        self.current = theme;
        tracing::debug!(theme = %theme, "Theme changed");
        Ok(())
    }

    /// Flip between light and dark
    pub fn toggle(&mut self) -> StorageResult<Theme> {
        let next = self.current.toggled();
        self.set(next)?;
        Ok(next)
    }
}
