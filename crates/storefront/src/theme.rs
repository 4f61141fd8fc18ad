//! Theme preference store.
//!
//! A two-state toggle persisted under [`keys::THEME`]. Hydration tolerates
//! anything: an unknown or missing stored value falls back to the light
//! default rather than failing startup.

use serde::{Deserialize, Serialize};

use crate::storage::{keys, lock, SharedStore, StorageError};

/// Visual theme for the storefront.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The stored string form, `"light"` or `"dark"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything other than `"dark"` is treated as
    /// light, so stale or corrupted values degrade gracefully.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == "dark" { Self::Dark } else { Self::Light }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Theme store backed by the local key-value store.
#[derive(Debug)]
pub struct ThemeStore {
    theme: Theme,
    storage: SharedStore,
}

impl ThemeStore {
    /// Create a store from persisted state, defaulting to light.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store lock is poisoned.
    pub fn hydrate(storage: SharedStore) -> Result<Self, StorageError> {
        let theme = lock(&storage)?
            .get(keys::THEME)
            .map_or(Theme::Light, |value| Theme::parse(value));
        Ok(Self { theme, storage })
    }

    /// The current theme.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch to the other theme and persist the choice.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting the preference fails.
    pub fn toggle(&mut self) -> Result<Theme, StorageError> {
        self.set(self.theme.toggled())?;
        Ok(self.theme)
    }

    /// Set the theme explicitly and persist the choice.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting the preference fails.
    pub fn set(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.theme = theme;
        lock(&self.storage)?.set(keys::THEME, theme.as_str())?;
        tracing::debug!(theme = theme.as_str(), "theme updated");
        Ok(())
    }
}
