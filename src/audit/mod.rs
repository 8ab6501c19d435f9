//! 翻訳ファイルの同期チェック
//!
//! Compares every locale file with the baseline locale, reports missing and
//! extra keys, and in fix mode fills the missing ones with draft values.
//! Extra keys are only ever reported.

mod compare;
mod fix;
mod report;

use std::path::{
    Path,
    PathBuf,
};

pub use compare::BaselineComparison;
pub use fix::{
    FixError,
    FixOutcome,
    insert_missing_keys,
};
use futures::future::join_all;
pub use report::write_report;
use thiserror::Error;

use crate::catalog::{
    DiscoveryError,
    LocaleFile,
    discover_locale_files,
    load_locale_file,
};
use crate::config::I18nSettings;
use crate::keys::KeyLayout;
use crate::store::RetrievalError;
use crate::types::SourcePosition;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("Baseline locale '{locale}' has no translation file in {}", .directory.display())]
    MissingBaseline { locale: String, directory: PathBuf },

    #[error("Cannot read baseline: {0}")]
    Baseline(#[source] RetrievalError),
}

/// What was done to one locale file.
#[derive(Debug, Clone)]
pub struct LocaleAudit {
    pub file_name: String,
    pub path: PathBuf,
    pub key_count: usize,
    pub comparison: BaselineComparison,
    /// Where each extra key sits in the file.
    pub extra_locations: Vec<(String, Option<SourcePosition>)>,
    /// Set in fix mode when the file had missing keys.
    pub fix: Option<LocaleFix>,
}

/// Fix mode result for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleFix {
    Written { inserted: Vec<String>, skipped: Vec<String> },
    Failed { message: String },
}

impl LocaleAudit {
    /// Missing keys still absent after this run.
    #[must_use]
    pub fn remaining_missing(&self) -> Vec<&str> {
        let inserted: &[String] = match &self.fix {
            Some(LocaleFix::Written { inserted, .. }) => inserted,
            _ => &[],
        };
        self.comparison
            .missing
            .iter()
            .filter(|key| !inserted.contains(key))
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn has_differences(&self) -> bool {
        !self.comparison.extra.is_empty() || !self.remaining_missing().is_empty()
    }
}

/// Outcome of a whole audit run.
#[derive(Debug)]
pub struct AuditSummary {
    pub baseline_locale: String,
    pub baseline_file: String,
    pub baseline_key_count: usize,
    pub fix_mode: bool,
    pub draft_prefix: String,
    pub locales: Vec<LocaleAudit>,
    /// Locale files that could not be read or parsed.
    pub failures: Vec<RetrievalError>,
}

impl AuditSummary {
    /// Locales whose keys differ from the baseline after this run.
    pub fn out_of_sync(&self) -> impl Iterator<Item = &LocaleAudit> {
        self.locales.iter().filter(|locale| locale.has_differences())
    }

    #[must_use]
    pub fn is_in_sync(&self) -> bool {
        self.failures.is_empty() && self.out_of_sync().next().is_none()
    }

    /// Whether this run wrote at least one draft value.
    #[must_use]
    pub fn drafts_written(&self) -> bool {
        self.locales.iter().any(|locale| {
            matches!(&locale.fix, Some(LocaleFix::Written { inserted, .. }) if !inserted.is_empty())
        })
    }

    /// `0` normally; `1` when `strict` and differences remain; `2` when a file
    /// could not be audited.
    #[must_use]
    pub fn exit_code(&self, strict: bool) -> u8 {
        let fix_failed =
            self.locales.iter().any(|locale| matches!(locale.fix, Some(LocaleFix::Failed { .. })));
        if !self.failures.is_empty() || fix_failed {
            2
        } else if strict && !self.is_in_sync() {
            1
        } else {
            0
        }
    }
}

/// Audits every locale in `translation_dir` against the baseline locale.
///
/// With `fix`, missing keys of non-baseline files get `draftPrefix` + baseline
/// value and the files are written back.
///
/// # Errors
/// - the locale files cannot be listed
/// - the baseline file is missing or unreadable
pub async fn run_audit(
    settings: &I18nSettings,
    translation_dir: &Path,
    fix: bool,
) -> Result<AuditSummary, AuditError> {
    let separator = settings.key_separator.as_str();
    let files = discover_locale_files(translation_dir, settings)?;

    if !files.iter().any(|(locale, _)| *locale == settings.baseline_language) {
        return Err(AuditError::MissingBaseline {
            locale: settings.baseline_language.clone(),
            directory: translation_dir.to_path_buf(),
        });
    }

    let loaded =
        join_all(files.iter().map(|(locale, path)| load_locale_file(path, locale, separator))).await;

    let mut baseline = None;
    let mut targets = Vec::new();
    let mut failures = Vec::new();
    for result in loaded {
        match result {
            Ok(file) if file.locale == settings.baseline_language => baseline = Some(file),
            Ok(file) => targets.push(file),
            Err(error) if error.locale() == settings.baseline_language => {
                return Err(AuditError::Baseline(error));
            }
            Err(error) => {
                tracing::warn!(%error, "Skipping unreadable locale file");
                failures.push(error);
            }
        }
    }
    let Some(baseline) = baseline else {
        return Err(AuditError::MissingBaseline {
            locale: settings.baseline_language.clone(),
            directory: translation_dir.to_path_buf(),
        });
    };

    let mut locales = Vec::with_capacity(targets.len());
    for target in &targets {
        locales.push(audit_locale(&baseline, target, settings, fix).await);
    }

    Ok(AuditSummary {
        baseline_locale: baseline.locale.clone(),
        baseline_file: baseline.display_name(),
        baseline_key_count: baseline.keys.len(),
        fix_mode: fix,
        draft_prefix: settings.draft_prefix.clone(),
        locales,
        failures,
    })
}

async fn audit_locale(
    baseline: &LocaleFile,
    target: &LocaleFile,
    settings: &I18nSettings,
    fix: bool,
) -> LocaleAudit {
    let comparison = BaselineComparison::compute(&target.locale, &baseline.keys, &target.keys);
    tracing::debug!(
        locale = %target.locale,
        missing = comparison.missing.len(),
        extra = comparison.extra.len(),
        "Compared with baseline"
    );

    let extra_locations = comparison
        .extra
        .iter()
        .map(|key| (key.clone(), target.key_ranges.get(key).map(|range| range.start)))
        .collect();

    let fix = if fix && !comparison.missing.is_empty() {
        Some(fix_locale(baseline, target, &comparison, settings).await)
    } else {
        None
    };

    LocaleAudit {
        file_name: target.display_name(),
        path: target.path.clone(),
        key_count: target.keys.len(),
        comparison,
        extra_locations,
        fix,
    }
}

async fn fix_locale(
    baseline: &LocaleFile,
    target: &LocaleFile,
    comparison: &BaselineComparison,
    settings: &I18nSettings,
) -> LocaleFix {
    let separator = settings.key_separator.as_str();
    let layout = target
        .tree
        .layout(separator)
        .or_else(|| baseline.tree.layout(separator))
        .unwrap_or(KeyLayout::Nested);

    let drafts = comparison.missing.iter().map(|key| {
        let baseline_value = baseline.keys.get(key).unwrap_or_default();
        (key.as_str(), format!("{}{baseline_value}", settings.draft_prefix))
    });

    let outcome = match insert_missing_keys(&target.text, &target.keys, drafts, layout, separator) {
        Ok(outcome) => outcome,
        Err(error) => return LocaleFix::Failed { message: error.to_string() },
    };

    if let Err(error) = tokio::fs::write(&target.path, &outcome.text).await {
        tracing::error!(%error, path = %target.path.display(), "Failed to write fixed file");
        return LocaleFix::Failed { message: error.to_string() };
    }

    tracing::debug!(locale = %target.locale, inserted = outcome.inserted.len(), "Fixed locale file");
    LocaleFix::Written { inserted: outcome.inserted, skipped: outcome.skipped }
}
