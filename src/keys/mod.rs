//! Translation key trees and their dot-joined flat view.
//!
//! A locale file is a tree of string leaves. Diffing two locales, or two files of
//! different nesting (`{"a": {"b": "x"}}` vs `{"a.b": "x"}`), works on the flat
//! view where every leaf is addressed by its joined path.

mod flat;
mod key_match;
mod tree;

pub use flat::{
    FlatKeySet,
    flatten,
    unflatten,
};
pub use key_match::{
    ancestor_keys,
    is_child_key,
};
pub use tree::{
    KeyLayout,
    LanguageFile,
    LanguageFileError,
    TranslationNode,
};

/// Default separator between path segments.
pub const DEFAULT_SEPARATOR: &str = ".";
