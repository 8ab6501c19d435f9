//! Initial locale selection.

/// Environment variables consulted for the user's language, most specific first.
const LANGUAGE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// The user's reported language from the process environment (`en_US.UTF-8`).
#[must_use]
pub fn environment_language() -> Option<String> {
    LANGUAGE_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
}

/// Picks the locale a session starts in.
///
/// A persisted choice wins when it is still supported. Otherwise the first two
/// letters of the reported language are used when supported, and `default_locale`
/// when nothing else applies.
#[must_use]
pub fn initial_locale(
    persisted: Option<&str>,
    reported: Option<&str>,
    supported: &[String],
    default_locale: &str,
) -> String {
    let is_supported = |locale: &str| supported.iter().any(|s| s == locale);

    if let Some(locale) = persisted.filter(|locale| is_supported(locale)) {
        return locale.to_string();
    }

    if let Some(locale) = reported
        .and_then(|language| language.get(..2))
        .map(str::to_ascii_lowercase)
        .filter(|locale| is_supported(locale))
    {
        return locale;
    }

    default_locale.to_string()
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    fn supported() -> Vec<String> {
        vec!["fr".to_string(), "en".to_string(), "de".to_string()]
    }

    #[rstest]
    #[case(Some("en"), Some("de-DE"), "en")]
    #[case(None, Some("de-DE"), "de")]
    #[case(None, Some("en_US.UTF-8"), "en")]
    #[case(None, Some("EN-gb"), "en")]
    #[case(None, Some("ja-JP"), "fr")]
    #[case(None, None, "fr")]
    #[case(Some("it"), Some("en-US"), "en")]
    #[case(None, Some("e"), "fr")]
    fn initial_locale_cases(
        #[case] persisted: Option<&str>,
        #[case] reported: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_that!(initial_locale(persisted, reported, &supported(), "fr"), eq(expected));
    }
}
