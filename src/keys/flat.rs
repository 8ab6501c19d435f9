//! Flatten a translation tree into dot-joined paths and back.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::tree::{
    LanguageFile,
    LanguageFileError,
    TranslationNode,
};

/// Leaf values of a translation tree keyed by their joined path.
///
/// # Examples
/// ```
/// use medal_i18n::keys::{LanguageFile, flatten};
///
/// let file = LanguageFile::parse(r#"{"a": {"b": "hello", "c": "world"}}"#).unwrap();
/// let flat = flatten(&file, ".");
///
/// assert_eq!(flat.get("a.b"), Some("hello"));
/// assert_eq!(flat.get("a.c"), Some("world"));
/// assert_eq!(flat.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlatKeySet {
    entries: BTreeMap<String, String>,
}

impl FlatKeySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatKeySet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect() }
    }
}

/// Flattens `tree` into one entry per leaf, joining ancestor keys with `separator`.
///
/// Empty subtrees have no leaves and therefore produce no entry.
#[must_use]
pub fn flatten(tree: &LanguageFile, separator: &str) -> FlatKeySet {
    let mut result = FlatKeySet::new();
    flatten_into(tree, separator, None, &mut result);
    result
}

fn flatten_into(tree: &LanguageFile, separator: &str, prefix: Option<&str>, result: &mut FlatKeySet) {
    for (key, node) in tree.entries() {
        let full_key = prefix.map_or_else(|| key.to_string(), |p| format!("{p}{separator}{key}"));
        match node {
            TranslationNode::Leaf(value) => {
                result.entries.insert(full_key, value.clone());
            }
            TranslationNode::Branch(child) => {
                flatten_into(child, separator, Some(&full_key), result);
            }
        }
    }
}

/// Rebuilds the nested tree from its flat view.
///
/// Every key is split on `separator`; a literal separator inside an original key
/// cannot be told apart from nesting and becomes a nesting level.
///
/// # Errors
/// `LanguageFileError::KeyConflict` when one key is both a leaf and the parent of
/// another key (`"a"` and `"a.b"`).
pub fn unflatten(flat: &FlatKeySet, separator: &str) -> Result<LanguageFile, LanguageFileError> {
    let mut root = LanguageFile::new();
    for (key, value) in flat.iter() {
        let segments: Vec<&str> = key.split(separator).collect();
        insert_path(&mut root, &segments, key, value)?;
    }
    Ok(root)
}

fn insert_path(
    root: &mut LanguageFile,
    segments: &[&str],
    key: &str,
    value: &str,
) -> Result<(), LanguageFileError> {
    let conflict = || LanguageFileError::KeyConflict { key: key.to_string() };
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };

    let mut current = root;
    for segment in parents {
        let node = current
            .entries_mut()
            .entry((*segment).to_string())
            .or_insert_with(|| TranslationNode::Branch(LanguageFile::new()));
        current = match node {
            TranslationNode::Branch(child) => child,
            TranslationNode::Leaf(_) => return Err(conflict()),
        };
    }

    match current.entries_mut().entry((*last).to_string()) {
        Entry::Occupied(_) => Err(conflict()),
        Entry::Vacant(slot) => {
            slot.insert(TranslationNode::Leaf(value.to_string()));
            Ok(())
        }
    }
}
