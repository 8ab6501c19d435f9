//! Nested translation tree.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// Errors raised while building a translation tree.
#[derive(Error, Debug)]
pub enum LanguageFileError {
    /// The text is not valid JSON.
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document root is not an object.
    #[error("Translation file root must be an object, found {found}")]
    NotAnObject { found: &'static str },
    /// A path is both a leaf and the parent of another leaf.
    #[error("Key '{key}' is both a value and a parent of other keys")]
    KeyConflict { key: String },
}

/// One node of a translation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    Leaf(String),
    Branch(LanguageFile),
}

/// How a file spells nested keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLayout {
    /// `{"a": {"b": "x"}}`
    Nested,
    /// `{"a.b": "x"}`
    Flat,
}

/// A locale's translations as a tree of string leaves.
///
/// Entries are kept sorted so that two structurally equal trees compare equal
/// regardless of the key order in their source files.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LanguageFile {
    entries: BTreeMap<String, TranslationNode>,
}

/// Human readable JSON type name for error messages.
const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl LanguageFile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses JSON text into a tree.
    pub fn parse(text: &str) -> Result<Self, LanguageFileError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Builds a tree from a JSON document whose root is an object.
    ///
    /// Non-string scalars become leaves holding their JSON text, arrays become
    /// subtrees keyed by element index.
    pub fn from_value(value: &Value) -> Result<Self, LanguageFileError> {
        match value {
            Value::Object(map) => Ok(Self {
                entries: map.iter().map(|(key, child)| (key.clone(), node_from_value(child))).collect(),
            }),
            other => Err(LanguageFileError::NotAnObject { found: json_type_name(other) }),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TranslationNode> {
        self.entries.get(key)
    }

    /// Inserts a direct child, returning the previous node under `key`.
    pub fn insert(&mut self, key: impl Into<String>, node: TranslationNode) -> Option<TranslationNode> {
        self.entries.insert(key.into(), node)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &TranslationNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Mutable access used by `unflatten` to grow the tree in place.
    pub(super) const fn entries_mut(&mut self) -> &mut BTreeMap<String, TranslationNode> {
        &mut self.entries
    }

    /// Walks `path` segment by segment and returns the leaf it names.
    ///
    /// Returns `None` when a segment is missing, when the walk hits a leaf before
    /// the path ends, or when the path names a subtree.
    #[must_use]
    pub fn lookup(&self, path: &str, separator: &str) -> Option<&str> {
        let mut segments = path.split(separator);
        let mut node = self.entries.get(segments.next()?)?;
        for segment in segments {
            node = match node {
                TranslationNode::Branch(child) => child.entries.get(segment)?,
                TranslationNode::Leaf(_) => return None,
            };
        }
        match node {
            TranslationNode::Leaf(text) => Some(text),
            TranslationNode::Branch(_) => None,
        }
    }

    /// Detects how this file spells nested keys.
    ///
    /// Returns `None` when the file gives no evidence either way (no subtree and
    /// no key containing the separator).
    #[must_use]
    pub fn layout(&self, separator: &str) -> Option<KeyLayout> {
        if self.entries.values().any(|node| matches!(node, TranslationNode::Branch(_))) {
            return Some(KeyLayout::Nested);
        }
        if self.entries.keys().any(|key| key.contains(separator)) {
            return Some(KeyLayout::Flat);
        }
        None
    }

    /// Rewrites flat-form keys into nested form.
    pub fn normalized(&self, separator: &str) -> Result<Self, LanguageFileError> {
        super::unflatten(&super::flatten(self, separator), separator)
    }
}

fn node_from_value(value: &Value) -> TranslationNode {
    match value {
        Value::Object(map) => TranslationNode::Branch(LanguageFile {
            entries: map.iter().map(|(key, child)| (key.clone(), node_from_value(child))).collect(),
        }),
        Value::Array(items) => TranslationNode::Branch(LanguageFile {
            entries: items
                .iter()
                .enumerate()
                .map(|(index, child)| (index.to_string(), node_from_value(child)))
                .collect(),
        }),
        Value::String(text) => TranslationNode::Leaf(text.clone()),
        other => TranslationNode::Leaf(other.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[googletest::test]
    fn parse_nested_file() {
        let file = LanguageFile::parse(r#"{"nav": {"home": "Accueil"}, "title": "Médailles"}"#).unwrap();

        expect_that!(file.len(), eq(2));
        expect_that!(file.lookup("nav.home", "."), some(eq("Accueil")));
        expect_that!(file.lookup("title", "."), some(eq("Médailles")));
    }

    #[rstest]
    #[case::array(json!(["a"]), "array")]
    #[case::string(json!("a"), "string")]
    #[case::null(json!(null), "null")]
    fn from_value_rejects_non_object_root(#[case] value: Value, #[case] found: &str) {
        let result = LanguageFile::from_value(&value);

        assert!(matches!(
            result,
            Err(LanguageFileError::NotAnObject { found: f }) if f == found
        ));
    }

    #[googletest::test]
    fn from_value_stringifies_scalars_and_indexes_arrays() {
        let file = LanguageFile::from_value(&json!({
            "count": 3,
            "enabled": false,
            "none": null,
            "states": ["Neuf", "Bon"]
        }))
        .unwrap();

        expect_that!(file.lookup("count", "."), some(eq("3")));
        expect_that!(file.lookup("enabled", "."), some(eq("false")));
        expect_that!(file.lookup("none", "."), some(eq("null")));
        expect_that!(file.lookup("states.0", "."), some(eq("Neuf")));
        expect_that!(file.lookup("states.1", "."), some(eq("Bon")));
    }

    #[rstest]
    #[case::missing_segment("nav.missing")]
    #[case::past_a_leaf("title.extra")]
    #[case::names_a_subtree("nav")]
    #[case::empty_path("")]
    fn lookup_misses(#[case] path: &str) {
        let file = LanguageFile::from_value(&json!({"nav": {"home": "Home"}, "title": "T"})).unwrap();

        assert_that!(file.lookup(path, "."), none());
    }

    #[rstest]
    #[case::nested(json!({"a": {"b": "x"}}), Some(KeyLayout::Nested))]
    #[case::flat(json!({"a.b": "x", "c": "y"}), Some(KeyLayout::Flat))]
    #[case::undecided(json!({"a": "x"}), None)]
    #[case::empty(json!({}), None)]
    fn layout_detection(#[case] value: Value, #[case] expected: Option<KeyLayout>) {
        let file = LanguageFile::from_value(&value).unwrap();

        assert_that!(file.layout("."), eq(expected));
    }

    #[googletest::test]
    fn normalized_turns_flat_keys_into_subtrees() {
        let flat = LanguageFile::from_value(&json!({"a.b": "x", "a.c": "y"})).unwrap();
        let nested = LanguageFile::from_value(&json!({"a": {"b": "x", "c": "y"}})).unwrap();

        assert_eq!(flat.normalized(".").unwrap(), nested);
    }
}
