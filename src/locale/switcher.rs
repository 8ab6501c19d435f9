//! Language switching.
//!
//! Every switch takes a generation number before it starts loading. Once the load
//! completes the switch only renders if no newer switch has started meanwhile, so
//! a slow load can never overwrite the result of a later one.

use std::collections::HashMap;
use std::sync::atomic::{
    AtomicU64,
    Ordering,
};

use thiserror::Error;
use tokio::sync::{
    Mutex,
    MutexGuard,
    RwLock,
};

use super::detect::initial_locale;
use super::preference::PreferenceStore;
use crate::keys::DEFAULT_SEPARATOR;
use crate::render::{
    Document,
    apply,
};
use crate::store::{
    RetrievalError,
    TranslationSource,
    TranslationStore,
};

#[derive(Error, Debug)]
pub enum SwitchError {
    #[error("Unsupported locale '{locale}'")]
    Unsupported { locale: String },

    #[error(transparent)]
    Load(#[from] RetrievalError),
}

/// How a switch that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The locale was loaded, rendered and remembered.
    Applied,
    /// A newer switch started while this one was loading; its result was dropped.
    Superseded,
}

/// Owns the active locale of a session and the document rendered in it.
///
/// Lock order is `active`, then `document`. Preferences are written while
/// `active` is held so the remembered choice follows the rendered one.
#[derive(Debug)]
pub struct LanguageSwitcher<S, P, D> {
    source: S,
    preferences: P,
    document: Mutex<D>,
    active: RwLock<Option<TranslationStore>>,
    generation: AtomicU64,
    supported: Vec<String>,
    default_locale: String,
    separator: String,
}

impl<S, P, D> LanguageSwitcher<S, P, D>
where
    S: TranslationSource,
    P: PreferenceStore,
    D: Document,
{
    #[must_use]
    pub fn new(
        source: S,
        preferences: P,
        document: D,
        supported: Vec<String>,
        default_locale: impl Into<String>,
    ) -> Self {
        Self {
            source,
            preferences,
            document: Mutex::new(document),
            active: RwLock::new(None),
            generation: AtomicU64::new(0),
            supported,
            default_locale: default_locale.into(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Starts the session in the persisted, reported or default locale.
    ///
    /// When the chosen locale fails to load, the default locale is tried once.
    pub async fn start(&self, reported_language: Option<&str>) -> Result<SwitchOutcome, SwitchError> {
        let persisted = match self.preferences.load().await {
            Ok(persisted) => persisted,
            Err(error) => {
                tracing::warn!(%error, "Ignoring unreadable language preference");
                None
            }
        };

        let locale = initial_locale(
            persisted.as_deref(),
            reported_language,
            &self.supported,
            &self.default_locale,
        );
        tracing::debug!(%locale, "Starting session");

        match self.switch_to(&locale).await {
            Err(error) if locale != self.default_locale => {
                tracing::warn!(%error, fallback = %self.default_locale, "Falling back to default locale");
                self.switch_to(&self.default_locale).await
            }
            result => result,
        }
    }

    /// Loads `locale`, renders it into the document, syncs the language
    /// selectors and remembers the choice.
    ///
    /// On failure nothing changes: the document keeps the previous rendering.
    pub async fn switch_to(&self, locale: &str) -> Result<SwitchOutcome, SwitchError> {
        if !self.supported.iter().any(|s| s == locale) {
            return Err(SwitchError::Unsupported { locale: locale.to_string() });
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(locale, generation, "Switching language");

        let store = match TranslationStore::load(&self.source, locale, &self.separator).await {
            Ok(store) => store,
            Err(error) => {
                tracing::warn!(%error, locale, "Failed to load language");
                return Err(error.into());
            }
        };

        let mut active = self.active.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(locale, generation, "Discarding stale language load");
            return Ok(SwitchOutcome::Superseded);
        }

        {
            let mut document = self.document.lock().await;
            apply(&mut *document, &store);
            document.sync_language_selectors(locale);
        }
        *active = Some(store);

        if let Err(error) = self.preferences.save(locale).await {
            tracing::warn!(%error, locale, "Failed to persist language preference");
        }

        Ok(SwitchOutcome::Applied)
    }

    /// Locale currently rendered, if any switch has succeeded yet.
    pub async fn active_locale(&self) -> Option<String> {
        self.active.read().await.as_ref().map(|store| store.locale().to_string())
    }

    /// Resolves `key` against the active locale, or returns it unchanged when
    /// nothing is loaded.
    pub async fn resolve(&self, key: &str, vars: Option<&HashMap<String, String>>) -> String {
        match self.active.read().await.as_ref() {
            Some(store) => store.resolve(key, vars),
            None => TranslationStore::empty(&self.default_locale).resolve(key, vars),
        }
    }

    /// Exclusive access to the rendered document.
    pub async fn document(&self) -> MutexGuard<'_, D> {
        self.document.lock().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::locale::MemoryPreferenceStore;
    use crate::render::{
        LANGUAGE_SELECTOR_ID,
        MarkupDocument,
        MarkupElement,
    };
    use crate::store::MemoryTranslationSource;

    type TestSwitcher =
        LanguageSwitcher<MemoryTranslationSource, MemoryPreferenceStore, MarkupDocument>;

    fn document() -> MarkupDocument {
        [
            MarkupElement::new("h1").with_attribute("data-i18n", "title"),
            MarkupElement::new("select").with_attribute("id", LANGUAGE_SELECTOR_ID),
        ]
        .into_iter()
        .collect()
    }

    fn switcher(preferences: MemoryPreferenceStore) -> TestSwitcher {
        let source = MemoryTranslationSource::new()
            .with("fr", r#"{"title": "Mes médailles"}"#)
            .with("en", r#"{"title": "My medals"}"#)
            .with("de", "{ broken");
        let supported = ["fr", "en", "de"].map(String::from).to_vec();
        LanguageSwitcher::new(source, preferences, document(), supported, "fr")
    }

    #[tokio::test]
    async fn switch_to_renders_syncs_and_persists() {
        let switcher = switcher(MemoryPreferenceStore::new());

        let outcome = switcher.switch_to("en").await.unwrap();

        assert_eq!(outcome, SwitchOutcome::Applied);
        let document = switcher.document().await;
        assert_eq!(document.elements()[0].text, "My medals");
        assert_eq!(document.elements()[1].value.as_deref(), Some("en"));
        drop(document);
        assert_eq!(switcher.active_locale().await.as_deref(), Some("en"));
        assert_eq!(switcher.preferences.load().await.unwrap().as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn failed_switch_keeps_previous_rendering() {
        let switcher = switcher(MemoryPreferenceStore::new());
        switcher.switch_to("en").await.unwrap();

        let result = switcher.switch_to("de").await;

        assert!(matches!(result, Err(SwitchError::Load(RetrievalError::Parse { .. }))));
        assert_eq!(switcher.document().await.elements()[0].text, "My medals");
        assert_eq!(switcher.active_locale().await.as_deref(), Some("en"));
        assert_eq!(switcher.preferences.load().await.unwrap().as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn switch_to_unsupported_locale() {
        let switcher = switcher(MemoryPreferenceStore::new());

        let result = switcher.switch_to("ja").await;

        assert!(matches!(result, Err(SwitchError::Unsupported { locale }) if locale == "ja"));
        assert_eq!(switcher.active_locale().await, None);
    }

    #[tokio::test]
    async fn start_prefers_persisted_choice() {
        let switcher = switcher(MemoryPreferenceStore::with_locale("en"));

        switcher.start(Some("fr-FR")).await.unwrap();

        assert_eq!(switcher.active_locale().await.as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn start_falls_back_to_default_when_load_fails() {
        let switcher = switcher(MemoryPreferenceStore::new());

        let outcome = switcher.start(Some("de-AT")).await.unwrap();

        assert_eq!(outcome, SwitchOutcome::Applied);
        assert_eq!(switcher.active_locale().await.as_deref(), Some("fr"));
    }

    #[tokio::test]
    async fn resolve_before_any_switch_returns_key() {
        let switcher = switcher(MemoryPreferenceStore::new());

        assert_eq!(switcher.resolve("title", None).await, "title");

        switcher.switch_to("fr").await.unwrap();
        assert_eq!(switcher.resolve("title", None).await, "Mes médailles");
    }
}
