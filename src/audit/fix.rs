//! Fix mode: inserting draft values for missing keys.
//!
//! Edits go through a CST so that everything already in the file (key order,
//! indentation, comments) stays as it was.

use jsonc_parser::ParseOptions;
use jsonc_parser::cst::{
    CstInputValue,
    CstObject,
    CstRootNode,
};
use thiserror::Error;

use crate::keys::{
    FlatKeySet,
    KeyLayout,
    ancestor_keys,
    is_child_key,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FixError {
    #[error("Failed to parse JSON for editing: {0}")]
    Parse(String),
}

/// Result of inserting keys into one file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FixOutcome {
    pub text: String,
    pub inserted: Vec<String>,
    /// Keys left out because an existing key occupies their path.
    pub skipped: Vec<String>,
}

/// Inserts each `(key, value)` into `json_text`, spelling keys per `layout`.
///
/// Existing keys are never touched. A key whose path is already taken, by a leaf
/// on the way down or by anything at the key itself, is skipped.
pub fn insert_missing_keys<'a>(
    json_text: &str,
    existing: &FlatKeySet,
    entries: impl IntoIterator<Item = (&'a str, String)>,
    layout: KeyLayout,
    separator: &str,
) -> Result<FixOutcome, FixError> {
    let root = CstRootNode::parse(json_text, &ParseOptions::default())
        .map_err(|e| FixError::Parse(e.to_string()))?;
    let root_obj = root.object_value_or_set();

    let mut outcome = FixOutcome::default();

    for (key, value) in entries {
        let blocked = existing.contains_key(key)
            || ancestor_keys(key, separator).any(|ancestor| existing.contains_key(ancestor))
            || existing.keys().any(|other| is_child_key(other, key, separator));

        let inserted = !blocked
            && match layout {
                KeyLayout::Flat => insert_flat(&root_obj, key, value),
                KeyLayout::Nested => insert_nested(&root_obj, key, value, separator),
            };

        if inserted {
            outcome.inserted.push(key.to_string());
        } else {
            tracing::debug!(key, "Skipping key whose path is taken");
            outcome.skipped.push(key.to_string());
        }
    }

    outcome.text = root.to_string();
    Ok(outcome)
}

fn insert_flat(root_obj: &CstObject, key: &str, value: String) -> bool {
    if root_obj.get(key).is_some() {
        return false;
    }
    root_obj.append(key, CstInputValue::String(value));
    true
}

/// Walks down the object path of `key`, creating objects as needed.
///
/// Returns false without editing when a non-object value sits on the path.
fn insert_nested(root_obj: &CstObject, key: &str, value: String, separator: &str) -> bool {
    let parts: Vec<&str> = key.split(separator).collect();
    let Some((last, parents)) = parts.split_last() else {
        return false;
    };

    // Check the whole path first so a blocked key leaves no empty objects behind.
    let mut current = Some(root_obj.clone());
    for part in parents {
        let Some(obj) = current else { break };
        current = match obj.object_value(part) {
            Some(child) => Some(child),
            None if obj.get(part).is_some() => return false,
            None => None,
        };
    }
    if current.as_ref().is_some_and(|obj| obj.get(last).is_some()) {
        return false;
    }

    let mut current = root_obj.clone();
    for part in parents {
        current = current.object_value_or_set(part);
    }
    current.append(last, CstInputValue::String(value));
    true
}
