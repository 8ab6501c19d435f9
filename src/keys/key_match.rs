//! Translation key matching utilities.

/// Checks if `child_key` lies under `parent_key` (e.g. `nav.home` under `nav`).
#[must_use]
pub fn is_child_key(child_key: &str, parent_key: &str, separator: &str) -> bool {
    let Some(remainder) = child_key.strip_prefix(parent_key) else {
        return false;
    };

    remainder.len() > separator.len() && remainder.starts_with(separator)
}

/// Proper ancestors of `key`, outermost first (`a.b.c` yields `a`, `a.b`).
pub fn ancestor_keys<'a>(key: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> {
    key.match_indices(separator).filter_map(move |(index, _)| key.get(..index))
}
