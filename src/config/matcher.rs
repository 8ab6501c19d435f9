//! File pattern matcher for translation files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::I18nSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid translation file pattern '{pattern}': {source}")]
    InvalidTranslationPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches files in the translation directory against the configured patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    translation_dir: PathBuf,
    translation_set: GlobSet,
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// Creates a new matcher from settings.
    pub fn new(translation_dir: PathBuf, settings: &I18nSettings) -> Result<Self, MatcherError> {
        let pattern = &settings.translation_files.file_pattern;
        let translation_set = Self::build_glob_set(std::slice::from_ref(pattern), |pattern, source| {
            MatcherError::InvalidTranslationPattern { pattern, source }
        })?;

        let exclude_set =
            Self::build_glob_set(&settings.translation_files.exclude_patterns, |pattern, source| {
                MatcherError::InvalidExcludePattern { pattern, source }
            })?;

        Ok(Self { translation_dir, translation_set, exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Returns true if the path matches `translationFiles.filePattern`
    /// but not `translationFiles.excludePatterns`.
    ///
    /// The path must be absolute and under the translation directory.
    #[must_use]
    pub fn is_translation_file(&self, absolute_path: &Path) -> bool {
        let Some(relative_path) = absolute_path.strip_prefix(&self.translation_dir).ok() else {
            return false;
        };

        self.is_translation_file_relative(relative_path)
    }

    /// Same as [`Self::is_translation_file`] for a path relative to the translation directory.
    #[must_use]
    pub fn is_translation_file_relative(&self, relative_path: &Path) -> bool {
        self.translation_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}
