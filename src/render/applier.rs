//! Writes resolved translations into a document.

use std::collections::HashMap;

use super::document::{
    Document,
    TranslatableElement,
    TranslationTarget,
    VARS_ATTRIBUTE,
};
use crate::store::{
    TranslationStore,
    parse_vars,
};

/// Resolves every translation key attribute in `document` and writes the result
/// into the matching property.
///
/// Keys stay on the elements, so applying again (with the same store or another
/// one) starts from the keys, never from previously rendered text.
pub fn apply<D: Document>(document: &mut D, store: &TranslationStore) {
    for element in document.elements_mut() {
        let vars = element.attribute(VARS_ATTRIBUTE).and_then(element_vars);

        for target in TranslationTarget::ALL {
            let Some(key) = element.attribute(target.attribute()) else {
                continue;
            };
            let value = store.resolve(key, vars.as_ref());
            element.set_property(target, value);
        }
    }
}

/// Reads a `data-i18n-vars` attribute.
fn element_vars(raw: &str) -> Option<HashMap<String, String>> {
    match parse_vars(raw) {
        Ok(vars) => Some(vars),
        Err(error) => {
            tracing::warn!(%error, raw, "Ignoring invalid {VARS_ATTRIBUTE} attribute");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::keys::LanguageFile;
    use crate::render::{
        MarkupDocument,
        MarkupElement,
    };

    fn store(json: &str) -> TranslationStore {
        TranslationStore::new("en", &LanguageFile::parse(json).unwrap(), ".").unwrap()
    }

    fn page() -> MarkupDocument {
        [
            MarkupElement::new("h1").with_attribute("data-i18n", "title"),
            MarkupElement::new("input")
                .with_attribute("data-i18n-placeholder", "search.placeholder")
                .with_attribute("data-i18n-title", "search.hint"),
            MarkupElement::new("p")
                .with_attribute("data-i18n", "welcome")
                .with_attribute(VARS_ATTRIBUTE, r#"{"name": "Alice", "count": 3}"#),
            MarkupElement::new("span").with_attribute("data-i18n", "missing.key"),
            MarkupElement::new("div").with_text("untouched"),
        ]
        .into_iter()
        .collect()
    }

    const EN: &str = r#"{
        "title": "My medals",
        "search": {"placeholder": "Search…", "hint": "Filter by {field}"},
        "welcome": "Welcome {name}, {count} medals"
    }"#;

    #[googletest::test]
    fn apply_writes_every_kind() {
        let mut document = page();

        apply(&mut document, &store(EN));

        let elements = document.elements();
        expect_that!(elements[0].text, eq("My medals"));
        expect_that!(elements[1].placeholder.as_deref(), some(eq("Search…")));
        expect_that!(elements[1].title.as_deref(), some(eq("Filter by {field}")));
        expect_that!(elements[2].text, eq("Welcome Alice, 3 medals"));
        expect_that!(elements[3].text, eq("missing.key"));
        expect_that!(elements[4].text, eq("untouched"));
    }

    #[googletest::test]
    fn apply_is_idempotent() {
        let store = store(EN);
        let mut once = page();
        apply(&mut once, &store);

        let mut twice = once.clone();
        apply(&mut twice, &store);

        assert_eq!(once, twice);
    }

    #[googletest::test]
    fn apply_after_switching_replaces_previous_text() {
        let mut document = page();
        apply(&mut document, &store(EN));

        apply(&mut document, &store(r#"{"title": "Mes médailles"}"#));

        expect_that!(document.elements()[0].text, eq("Mes médailles"));
        expect_that!(document.elements()[2].text, eq("welcome"));
    }

    #[googletest::test]
    fn apply_writes_empty_values() {
        let mut document: MarkupDocument =
            [MarkupElement::new("p").with_attribute("data-i18n", "blank").with_text("before")]
                .into_iter()
                .collect();

        apply(&mut document, &store(r#"{"blank": ""}"#));

        expect_that!(document.elements()[0].text, eq(""));
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"["a"]"#)]
    fn apply_ignores_invalid_vars(#[case] raw: &str) {
        let mut document: MarkupDocument = [MarkupElement::new("p")
            .with_attribute("data-i18n", "welcome")
            .with_attribute(VARS_ATTRIBUTE, raw)]
        .into_iter()
        .collect();

        apply(&mut document, &store(EN));

        assert_eq!(document.elements()[0].text, "Welcome {name}, {count} medals");
    }
}
