//! 翻訳ストア
//!
//! Holds one locale's translations and answers lookups with a graceful miss:
//! an unknown key resolves to the key itself.

mod error;
mod interpolate;
mod source;

use std::collections::HashMap;

pub use error::RetrievalError;
pub use interpolate::{
    interpolate,
    parse_vars,
};
pub use source::{
    FsTranslationSource,
    MemoryTranslationSource,
    TranslationSource,
};

use crate::keys::{
    DEFAULT_SEPARATOR,
    LanguageFile,
    LanguageFileError,
};

/// The loaded translations of one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationStore {
    locale: String,
    tree: LanguageFile,
    separator: String,
}

impl TranslationStore {
    /// Wraps an already parsed tree. Flat-form keys are nested first.
    pub fn new(
        locale: impl Into<String>,
        tree: &LanguageFile,
        separator: impl Into<String>,
    ) -> Result<Self, LanguageFileError> {
        let separator = separator.into();
        let tree = tree.normalized(&separator)?;
        Ok(Self { locale: locale.into(), tree, separator })
    }

    /// A store with no translations: every key resolves to itself.
    #[must_use]
    pub fn empty(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            tree: LanguageFile::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Fetches and parses the language file of `locale`.
    ///
    /// # Errors
    /// `RetrievalError` when the source cannot provide the file or its content
    /// is not a translation tree.
    pub async fn load<S: TranslationSource>(
        source: &S,
        locale: &str,
        separator: &str,
    ) -> Result<Self, RetrievalError> {
        let text = source.fetch(locale).await?;
        let parse_error = |source| RetrievalError::Parse { locale: locale.to_string(), source };

        let tree = LanguageFile::parse(&text).map_err(parse_error)?;
        let store = Self::new(locale, &tree, separator).map_err(parse_error)?;

        tracing::debug!(locale, "Loaded translations");
        Ok(store)
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The leaf at `path`, if any.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.tree.lookup(path, &self.separator)
    }

    /// Resolves `path`, falling back to `path` itself when there is no leaf.
    ///
    /// With `vars`, every `{name}` in the resolved text is substituted.
    #[must_use]
    pub fn resolve(&self, path: &str, vars: Option<&HashMap<String, String>>) -> String {
        let text = self.lookup(path).unwrap_or(path);
        match vars {
            Some(vars) => interpolate(text, vars).into_owned(),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    fn store(json: &str) -> TranslationStore {
        TranslationStore::new("en", &LanguageFile::parse(json).unwrap(), ".").unwrap()
    }

    #[rstest]
    #[case(r#"{"nav": {"home": "Home"}}"#, "nav.home", "Home")]
    #[case(r#"{"nav.home": "Home"}"#, "nav.home", "Home")]
    #[case(r#"{"nav": {"home": "Home"}}"#, "nonexistent.path", "nonexistent.path")]
    #[case(r#"{"nav": {"home": "Home"}}"#, "nav", "nav")]
    #[case(r#"{"nav": {"home": "Home"}}"#, "nav.home.extra", "nav.home.extra")]
    #[case(r#"{"empty": ""}"#, "empty", "")]
    #[case(r#"{"count": 3}"#, "count", "3")]
    fn resolve_cases(#[case] json: &str, #[case] path: &str, #[case] expected: &str) {
        assert_eq!(store(json).resolve(path, None), expected);
    }

    #[googletest::test]
    fn resolve_substitutes_vars() {
        let store = store(r#"{"welcome": "Welcome {name}"}"#);
        let vars = HashMap::from([("name".to_string(), "Alice".to_string())]);

        expect_that!(store.resolve("welcome", Some(&vars)), eq("Welcome Alice"));
        expect_that!(store.resolve("welcome", None), eq("Welcome {name}"));
    }

    #[googletest::test]
    fn resolve_missing_key_is_interpolated_too() {
        let store = TranslationStore::empty("en");
        let vars = HashMap::from([("n".to_string(), "2".to_string())]);

        expect_that!(store.resolve("{n} items", Some(&vars)), eq("2 items"));
    }

    #[tokio::test]
    async fn load_from_memory_source() {
        let source = MemoryTranslationSource::new().with("fr", r#"{"greet": "Salut"}"#);

        let store = TranslationStore::load(&source, "fr", ".").await.unwrap();

        assert_eq!(store.locale(), "fr");
        assert_eq!(store.lookup("greet"), Some("Salut"));
    }

    #[tokio::test]
    async fn load_surfaces_retrieval_errors() {
        let source = MemoryTranslationSource::new()
            .with("de", "not json")
            .with("it", "[]")
            .with("es", r#"{"a": "x", "a.b": "y"}"#);

        for locale in ["de", "it", "es", "pt"] {
            let result = TranslationStore::load(&source, locale, ".").await;
            let error = result.unwrap_err();
            assert_eq!(error.locale(), locale);
        }
    }
}
