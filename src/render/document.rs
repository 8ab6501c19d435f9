//! The markup the applier writes into.

use std::collections::BTreeMap;

/// Id of language selector elements.
pub const LANGUAGE_SELECTOR_ID: &str = "langSwitcher";

/// Attribute carrying a JSON object of placeholder values.
pub const VARS_ATTRIBUTE: &str = "data-i18n-vars";

/// Element property a translation key attribute writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationTarget {
    /// `data-i18n`: the body text.
    Text,
    /// `data-i18n-placeholder`: an input's placeholder.
    Placeholder,
    /// `data-i18n-title`: the tooltip.
    Title,
}

impl TranslationTarget {
    pub const ALL: [Self; 3] = [Self::Text, Self::Placeholder, Self::Title];

    /// Attribute holding the translation key for this target.
    #[must_use]
    pub const fn attribute(self) -> &'static str {
        match self {
            Self::Text => "data-i18n",
            Self::Placeholder => "data-i18n-placeholder",
            Self::Title => "data-i18n-title",
        }
    }
}

pub trait TranslatableElement {
    fn attribute(&self, name: &str) -> Option<&str>;

    fn set_property(&mut self, target: TranslationTarget, value: String);
}

/// A rendered page: elements the applier can visit, and language selectors.
pub trait Document {
    type Element: TranslatableElement;

    /// Every element of the document, in document order.
    fn elements_mut(&mut self) -> impl Iterator<Item = &mut Self::Element>;

    /// Shows `locale` as selected in every language selector.
    fn sync_language_selectors(&mut self, locale: &str);
}

/// A plain in-memory element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupElement {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub placeholder: Option<String>,
    pub title: Option<String>,
    /// Current value of form controls (`<select>`).
    pub value: Option<String>,
}

impl MarkupElement {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    fn is_language_selector(&self) -> bool {
        self.attribute("id") == Some(LANGUAGE_SELECTOR_ID)
    }
}

impl TranslatableElement for MarkupElement {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn set_property(&mut self, target: TranslationTarget, value: String) {
        match target {
            TranslationTarget::Text => self.text = value,
            TranslationTarget::Placeholder => self.placeholder = Some(value),
            TranslationTarget::Title => self.title = Some(value),
        }
    }
}

/// A flat list of elements standing in for a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupDocument {
    elements: Vec<MarkupElement>,
}

impl MarkupDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: MarkupElement) {
        self.elements.push(element);
    }

    #[must_use]
    pub fn elements(&self) -> &[MarkupElement] {
        &self.elements
    }
}

impl FromIterator<MarkupElement> for MarkupDocument {
    fn from_iter<I: IntoIterator<Item = MarkupElement>>(iter: I) -> Self {
        Self { elements: iter.into_iter().collect() }
    }
}

impl Document for MarkupDocument {
    type Element = MarkupElement;

    fn elements_mut(&mut self) -> impl Iterator<Item = &mut Self::Element> {
        self.elements.iter_mut()
    }

    fn sync_language_selectors(&mut self, locale: &str) {
        for selector in self.elements.iter_mut().filter(|element| element.is_language_selector()) {
            selector.value = Some(locale.to_string());
        }
    }
}
