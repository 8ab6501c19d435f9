//! DOM 反映
//!
//! Elements name their translation through `data-i18n`, `data-i18n-placeholder`
//! and `data-i18n-title`; [`apply`] writes the resolved text into them.

mod applier;
mod document;

pub use applier::apply;
pub use document::{
    Document,
    LANGUAGE_SELECTOR_ID,
    MarkupDocument,
    MarkupElement,
    TranslatableElement,
    TranslationTarget,
    VARS_ATTRIBUTE,
};
