//! Key-set comparison against the baseline locale.

use std::collections::BTreeSet;

use crate::keys::FlatKeySet;

/// How one locale's keys differ from the baseline's.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BaselineComparison {
    pub locale: String,
    /// In the baseline, not in the target.
    pub missing: BTreeSet<String>,
    /// In the target, not in the baseline.
    pub extra: BTreeSet<String>,
}

impl BaselineComparison {
    #[must_use]
    pub fn compute(locale: impl Into<String>, baseline: &FlatKeySet, target: &FlatKeySet) -> Self {
        let missing = baseline.keys().filter(|key| !target.contains_key(key)).map(String::from).collect();
        let extra = target.keys().filter(|key| !baseline.contains_key(key)).map(String::from).collect();

        Self { locale: locale.into(), missing, extra }
    }

    #[must_use]
    pub fn is_in_sync(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::keys::{
        LanguageFile,
        flatten,
    };

    fn keys(json: &str) -> FlatKeySet {
        flatten(&LanguageFile::parse(json).unwrap(), ".")
    }

    #[googletest::test]
    fn missing_key_in_empty_target() {
        let comparison = BaselineComparison::compute("en", &keys(r#"{"greet": "hi"}"#), &keys("{}"));

        assert_eq!(comparison.missing, BTreeSet::from(["greet".to_string()]));
        expect_that!(comparison.extra.is_empty(), eq(true));
        expect_that!(comparison.is_in_sync(), eq(false));
    }

    #[googletest::test]
    fn nested_and_flat_files_compare_equal() {
        let comparison = BaselineComparison::compute(
            "en",
            &keys(r#"{"nav": {"home": "Accueil", "logout": "Sortir"}}"#),
            &keys(r#"{"nav.home": "Home", "nav.logout": "Logout"}"#),
        );

        expect_that!(comparison.is_in_sync(), eq(true));
    }

    #[googletest::test]
    fn reports_both_directions() {
        let comparison = BaselineComparison::compute(
            "de",
            &keys(r#"{"a": {"b": "1", "c": "2"}, "d": "3"}"#),
            &keys(r#"{"a": {"b": "1", "x": "9"}, "old": "4"}"#),
        );

        assert_eq!(comparison.missing, BTreeSet::from(["a.c".to_string(), "d".to_string()]));
        assert_eq!(comparison.extra, BTreeSet::from(["a.x".to_string(), "old".to_string()]));
    }
}
