//! Where the chosen language is remembered between sessions.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Failed to read preferences from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write preferences to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid preferences file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistent storage for the user's language choice.
pub trait PreferenceStore {
    fn load(&self) -> impl Future<Output = Result<Option<String>, PreferenceError>> + Send;

    fn save(&self, locale: &str) -> impl Future<Output = Result<(), PreferenceError>> + Send;
}

/// On-disk form: `{"lang": "en"}`.
#[derive(Debug, Serialize, Deserialize)]
struct StoredPreferences {
    lang: Option<String>,
}

/// Preferences kept in a small JSON file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    async fn load(&self) -> Result<Option<String>, PreferenceError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(PreferenceError::Read { path: self.path.clone(), source }),
        };

        let stored: StoredPreferences = serde_json::from_str(&text)
            .map_err(|source| PreferenceError::Parse { path: self.path.clone(), source })?;

        Ok(stored.lang.filter(|lang| !lang.is_empty()))
    }

    async fn save(&self, locale: &str) -> Result<(), PreferenceError> {
        let write_error = |source| PreferenceError::Write { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        let stored = StoredPreferences { lang: Some(locale.to_string()) };
        let text = serde_json::to_string_pretty(&stored)
            .map_err(|source| PreferenceError::Parse { path: self.path.clone(), source })?;

        tokio::fs::write(&self.path, text + "\n").await.map_err(write_error)
    }
}

/// Preferences that live as long as the process.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    locale: RwLock<Option<String>>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self { locale: RwLock::new(Some(locale.into())) }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    async fn load(&self) -> Result<Option<String>, PreferenceError> {
        Ok(self.locale.read().await.clone())
    }

    async fn save(&self, locale: &str) -> Result<(), PreferenceError> {
        *self.locale.write().await = Some(locale.to_string());
        Ok(())
    }
}
