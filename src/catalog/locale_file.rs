//! One locale file as read from disk.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use crate::keys::{
    FlatKeySet,
    LanguageFile,
    flatten,
};
use crate::store::RetrievalError;
use crate::types::SourceRange;

/// A locale file with everything the audit needs.
#[derive(Debug, Clone)]
pub struct LocaleFile {
    pub locale: String,
    pub path: PathBuf,

    /// Raw file text, edited in place by fix mode.
    pub text: String,

    pub tree: LanguageFile,

    /// Flattened translation key map (e.g., "nav.home" -> "Accueil").
    pub keys: FlatKeySet,

    /// Key to source range mapping for reports.
    pub key_ranges: HashMap<String, SourceRange>,
}

impl LocaleFile {
    /// Builds a locale file from already-read text.
    pub fn from_text(
        locale: impl Into<String>,
        path: impl Into<PathBuf>,
        text: String,
        separator: &str,
    ) -> Result<Self, RetrievalError> {
        let locale = locale.into();
        let tree = LanguageFile::parse(&text)
            .map_err(|source| RetrievalError::Parse { locale: locale.clone(), source })?;
        let keys = flatten(&tree, separator);
        let key_ranges = extract_key_ranges(&text, separator);

        Ok(Self { locale, path: path.into(), text, tree, keys, key_ranges })
    }

    /// File name shown in reports (`en.json`).
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |name| name.to_string_lossy().to_string())
    }
}

/// Reads and parses the locale file at `path`.
pub async fn load_locale_file(
    path: &Path,
    locale: &str,
    separator: &str,
) -> Result<LocaleFile, RetrievalError> {
    tracing::debug!(locale, path = %path.display(), "Loading locale file");

    let text = tokio::fs::read_to_string(path).await.map_err(|source| RetrievalError::Read {
        locale: locale.to_string(),
        path: path.to_path_buf(),
        source,
    })?;

    LocaleFile::from_text(locale, path, text, separator)
}

/// Extract key source ranges from JSON text using tree-sitter.
///
/// Keys are joined exactly as `flatten` joins them, array elements included
/// (`states.0`), so every flat key can be located. Subtree keys get a range too.
#[must_use]
pub fn extract_key_ranges(json_text: &str, separator: &str) -> HashMap<String, SourceRange> {
    let mut key_ranges = HashMap::new();

    let mut parser = tree_sitter::Parser::new();
    let Ok(()) = parser.set_language(&tree_sitter_json::LANGUAGE.into()) else {
        tracing::warn!("Failed to set tree-sitter-json language");
        return key_ranges;
    };

    let Some(tree) = parser.parse(json_text, None) else {
        tracing::warn!("Failed to parse JSON with tree-sitter");
        return key_ranges;
    };

    collect_key_ranges(tree.root_node(), json_text.as_bytes(), separator, None, &mut key_ranges);

    key_ranges
}

fn join_key(prefix: Option<&str>, separator: &str, key: &str) -> String {
    prefix.map_or_else(|| key.to_string(), |p| format!("{p}{separator}{key}"))
}

/// Decodes a JSON string literal so range keys match the parsed tree's keys.
fn unescape_key(key_text: &str) -> String {
    serde_json::from_str::<String>(key_text).unwrap_or_else(|error| {
        tracing::debug!(%error, key_text, "Key is not a JSON string literal");
        key_text.trim_matches('"').to_string()
    })
}

fn collect_key_ranges(
    node: tree_sitter::Node<'_>,
    source: &[u8],
    separator: &str,
    prefix: Option<&str>,
    key_ranges: &mut HashMap<String, SourceRange>,
) {
    match node.kind() {
        "document" | "object" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_key_ranges(child, source, separator, prefix, key_ranges);
            }
        }
        "array" => {
            let mut cursor = node.walk();
            let elements = node.named_children(&mut cursor).filter(|child| child.kind() != "comment");
            for (index, element) in elements.enumerate() {
                let full_key = join_key(prefix, separator, &index.to_string());
                key_ranges.insert(full_key.clone(), SourceRange::from_node(&element));
                collect_key_ranges(element, source, separator, Some(&full_key), key_ranges);
            }
        }
        "pair" => {
            let Some(key_node) = node.child_by_field_name("key") else {
                return;
            };
            let Ok(key_text) = key_node.utf8_text(source) else {
                tracing::warn!("Failed to get key text from node");
                return;
            };
            let key = unescape_key(key_text);
            let full_key = join_key(prefix, separator, &key);
            key_ranges.insert(full_key.clone(), SourceRange::from_node(&key_node));

            if let Some(value_node) = node.child_by_field_name("value") {
                collect_key_ranges(value_node, source, separator, Some(&full_key), key_ranges);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;

    #[googletest::test]
    fn extract_key_ranges_simple() {
        let json_text = r#"{
  "hello": "Bonjour",
  "goodbye": "Au revoir"
}"#;

        let key_ranges = extract_key_ranges(json_text, ".");

        expect_that!(key_ranges.len(), eq(2));
        let hello = key_ranges.get("hello");
        expect_that!(hello, some(anything()));
        if let Some(range) = hello {
            expect_that!(range.start.line, eq(1));
            expect_that!(range.start.character, eq(2));
        }
    }

    #[googletest::test]
    fn extract_key_ranges_nested() {
        let json_text = r#"{
  "nav": {
    "home": "Accueil",
    "logout": "Déconnexion"
  }
}"#;

        let key_ranges = extract_key_ranges(json_text, ".");

        expect_that!(key_ranges.contains_key("nav"), eq(true));
        expect_that!(key_ranges.contains_key("nav.home"), eq(true));
        expect_that!(key_ranges.contains_key("nav.logout"), eq(true));
        expect_that!(key_ranges.get("nav.logout").map(|r| r.start.line), some(eq(3)));
    }

    #[googletest::test]
    fn extract_key_ranges_arrays_use_separator_indices() {
        let json_text = r#"{
  "states": ["Neuf", "Bon"],
  "people": [{ "name": "Alice" }]
}"#;

        let key_ranges = extract_key_ranges(json_text, ".");

        expect_that!(key_ranges.contains_key("states.0"), eq(true));
        expect_that!(key_ranges.contains_key("states.1"), eq(true));
        expect_that!(key_ranges.contains_key("people.0.name"), eq(true));
    }

    #[googletest::test]
    fn extract_key_ranges_covers_every_flat_key() {
        let json_text = r#"{"a": {"b": "x", "c": ["y", {"d": "z"}]}, "e.f": "w"}"#;
        let file = LocaleFile::from_text("en", "en.json", json_text.to_string(), ".").unwrap();

        for key in file.keys.keys() {
            assert!(file.key_ranges.contains_key(key), "missing range for {key}");
        }
    }

    #[googletest::test]
    fn extract_key_ranges_unescapes_keys() {
        let json_text = r#"{"say \"hi\"": "x", "\u00e9t\u00e9": {"back\\slash": "y"}}"#;
        let file = LocaleFile::from_text("fr", "fr.json", json_text.to_string(), ".").unwrap();

        expect_that!(file.key_ranges.contains_key("say \"hi\""), eq(true));
        expect_that!(file.key_ranges.contains_key("été.back\\slash"), eq(true));
        for key in file.keys.keys() {
            assert!(file.key_ranges.contains_key(key), "missing range for {key}");
        }
    }

    #[googletest::test]
    fn from_text_rejects_invalid_json() {
        let result = LocaleFile::from_text("de", "de.json", "{ invalid".to_string(), ".");

        assert!(matches!(result, Err(RetrievalError::Parse { locale, .. }) if locale == "de"));
    }

    #[tokio::test]
    async fn load_locale_file_reads_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("en.json");
        std::fs::write(&path, r#"{"greet": "hi"}"#).unwrap();

        let file = load_locale_file(&path, "en", ".").await.unwrap();

        assert_eq!(file.locale, "en");
        assert_eq!(file.keys.get("greet"), Some("hi"));
        assert_eq!(file.display_name(), "en.json");
    }

    #[tokio::test]
    async fn load_locale_file_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_locale_file(&temp_dir.path().join("xx.json"), "xx", ".").await;

        assert!(matches!(result, Err(RetrievalError::Read { .. })));
    }
}
