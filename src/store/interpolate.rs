//! `{name}` placeholder substitution.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{
    Captures,
    Regex,
};
use serde_json::Value;

#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").expect("placeholder pattern is valid"));

/// Replaces every `{name}` in `template` whose name is in `vars`.
///
/// Runs in a single pass, so a substituted value containing `{other}` is not
/// expanded again. Unknown placeholders stay verbatim.
#[must_use]
pub fn interpolate<'a>(template: &'a str, vars: &HashMap<String, String>) -> Cow<'a, str> {
    if vars.is_empty() {
        return Cow::Borrowed(template);
    }

    PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        let name = caps.get(1).map_or("", |m| m.as_str());
        match vars.get(name) {
            Some(value) => value.clone(),
            None => caps.get(0).map_or_else(String::new, |m| m.as_str().to_string()),
        }
    })
}

/// Parses a JSON object of placeholder values (`{"name": "Alice", "count": 3}`).
///
/// Non-string values are used as their JSON text.
pub fn parse_vars(raw: &str) -> Result<HashMap<String, String>, serde_json::Error> {
    let map: HashMap<String, Value> = serde_json::from_str(raw)?;
    Ok(map
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(text) => (name, text),
            other => (name, other.to_string()),
        })
        .collect())
}
