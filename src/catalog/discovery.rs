//! Finding the locale files of a project.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use thiserror::Error;

use crate::config::{
    FileMatcher,
    I18nSettings,
    MatcherError,
};

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Translation directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

/// Locale code of a translation file: its file stem (`lang/en.json` is `en`).
#[must_use]
pub fn locale_from_path(path: &Path) -> Option<String> {
    path.file_stem().and_then(|stem| stem.to_str()).map(ToString::to_string)
}

/// Lists `(locale, path)` pairs for every locale of the project, sorted by locale.
///
/// With `languages` configured each locale maps to `<dir>/<locale>.json`, whether
/// or not the file exists. Otherwise every file directly inside `dir` matching
/// `filePattern` (and no exclude pattern) is a locale.
pub fn discover_locale_files(
    dir: &Path,
    settings: &I18nSettings,
) -> Result<Vec<(String, PathBuf)>, DiscoveryError> {
    if let Some(languages) = &settings.languages {
        let mut files: Vec<_> = languages
            .iter()
            .map(|locale| (locale.clone(), dir.join(format!("{locale}.json"))))
            .collect();
        files.sort();
        files.dedup_by(|a, b| a.0 == b.0);
        return Ok(files);
    }

    if !dir.is_dir() {
        return Err(DiscoveryError::MissingDirectory(dir.to_path_buf()));
    }

    let matcher = FileMatcher::new(dir.to_path_buf(), settings)?;
    let mut files = Vec::new();

    for result in WalkBuilder::new(dir)
        .max_depth(Some(1))
        .hidden(false)
        .git_ignore(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if !matcher.is_translation_file(path) {
            continue;
        }

        if let Some(locale) = locale_from_path(path) {
            files.push((locale, path.to_path_buf()));
        }
    }

    files.sort();
    tracing::debug!(count = files.len(), dir = %dir.display(), "Discovered locale files");

    Ok(files)
}
