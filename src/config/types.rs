use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "translationFiles.excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    pub translation_files: TranslationFilesConfig,

    pub key_separator: String,

    /// Locale every other locale is compared against.
    pub baseline_language: String,

    /// Supported locales.
    ///
    /// - `None`: every file in the translation directory is a locale (default)
    /// - `Some([...])`: only these locales, read from `<directory>/<locale>.json`
    pub languages: Option<Vec<String>>,

    /// Locale used when neither a saved preference nor the environment gives one.
    pub default_language: String,

    /// Prepended to the baseline value when fix mode fills a missing key.
    pub draft_prefix: String,

    /// Exit non-zero when the audit leaves differences behind.
    pub fail_on_mismatch: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    /// Directory holding one JSON file per locale, relative to the project root.
    pub directory: String,
    pub file_pattern: String,
    pub exclude_patterns: Vec<String>,
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self {
            directory: "lang".to_string(),
            file_pattern: "*.json".to_string(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            translation_files: TranslationFilesConfig::default(),
            key_separator: ".".to_string(),
            baseline_language: "fr".to_string(),
            languages: None,
            default_language: "fr".to_string(),
            draft_prefix: "(TODO) ".to_string(),
            fail_on_mismatch: false,
        }
    }
}

impl I18nSettings {
    /// Whether `locale` is one of the configured languages.
    ///
    /// Always true when `languages` is unset.
    #[must_use]
    pub fn is_supported(&self, locale: &str) -> bool {
        self.languages.as_ref().is_none_or(|languages| languages.iter().any(|l| l == locale))
    }

    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Baseline or default language missing from `languages`
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.translation_files.directory.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.directory",
                "The directory cannot be empty. Example: \"lang\"",
            ));
        }

        if self.translation_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                "The pattern cannot be empty. Example: \"*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.translation_files.file_pattern) {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.translation_files.file_pattern),
            ));
        }

        for (index, pattern) in self.translation_files.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("translationFiles.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.draft_prefix.is_empty() {
            errors.push(ValidationError::new(
                "draftPrefix",
                "The prefix cannot be empty, drafts must be told apart from real translations. Example: \"(TODO) \"",
            ));
        }

        for (field, locale) in
            [("baselineLanguage", &self.baseline_language), ("defaultLanguage", &self.default_language)]
        {
            if locale.is_empty() {
                errors.push(ValidationError::new(field, "The language cannot be empty. Example: \"fr\""));
            } else if !self.is_supported(locale) {
                errors.push(ValidationError::new(
                    field,
                    format!("'{locale}' is not listed in 'languages'"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
