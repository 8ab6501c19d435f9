use std::path::PathBuf;

use thiserror::Error;

use crate::keys::LanguageFileError;

/// A language file could not be fetched or parsed.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// The source has nothing for this locale.
    #[error("No translation file for locale '{locale}'")]
    NotFound { locale: String },

    /// Reading the file failed.
    #[error("Failed to read translation file for '{locale}' ({}): {source}", .path.display())]
    Read {
        locale: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a usable translation tree.
    #[error("Invalid translation file for '{locale}': {source}")]
    Parse {
        locale: String,
        #[source]
        source: LanguageFileError,
    },
}

impl RetrievalError {
    /// Locale the failed retrieval was for.
    #[must_use]
    pub fn locale(&self) -> &str {
        match self {
            Self::NotFound { locale } | Self::Read { locale, .. } | Self::Parse { locale, .. } => {
                locale
            }
        }
    }
}
