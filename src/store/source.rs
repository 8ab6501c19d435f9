//! Where language files come from.

use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::RetrievalError;

/// Fetches the raw JSON text of a locale's language file.
pub trait TranslationSource {
    fn fetch(&self, locale: &str) -> impl Future<Output = Result<String, RetrievalError>> + Send;
}

/// Reads `<directory>/<locale>.json` from disk.
#[derive(Debug, Clone)]
pub struct FsTranslationSource {
    directory: PathBuf,
}

impl FsTranslationSource {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    #[must_use]
    pub fn path_for(&self, locale: &str) -> PathBuf {
        self.directory.join(format!("{locale}.json"))
    }
}

impl TranslationSource for FsTranslationSource {
    async fn fetch(&self, locale: &str) -> Result<String, RetrievalError> {
        let path = self.path_for(locale);
        tracing::debug!(locale, path = %path.display(), "Fetching language file");

        tokio::fs::read_to_string(&path).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                RetrievalError::NotFound { locale: locale.to_string() }
            } else {
                RetrievalError::Read { locale: locale.to_string(), path, source }
            }
        })
    }
}

/// Language files held in memory, keyed by locale.
#[derive(Debug, Clone, Default)]
pub struct MemoryTranslationSource {
    files: HashMap<String, String>,
}

impl MemoryTranslationSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(locale.into(), text.into());
        self
    }
}

impl TranslationSource for MemoryTranslationSource {
    async fn fetch(&self, locale: &str) -> Result<String, RetrievalError> {
        self.files
            .get(locale)
            .cloned()
            .ok_or_else(|| RetrievalError::NotFound { locale: locale.to_string() })
    }
}
