//! Core types used throughout the project.

use std::fmt;

/// A range in a locale file (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

/// A position in a locale file (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

impl From<tree_sitter::Point> for SourcePosition {
    #[allow(clippy::cast_possible_truncation)]
    fn from(point: tree_sitter::Point) -> Self {
        Self { line: point.row as u32, character: point.column as u32 }
    }
}

/// Renders as the 1-indexed `line:column` pair editors and terminals expect.
impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

impl SourceRange {
    #[must_use]
    pub fn from_node(node: &tree_sitter::Node<'_>) -> Self {
        Self { start: node.start_position().into(), end: node.end_position().into() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    const fn pos(line: u32, character: u32) -> SourcePosition {
        SourcePosition { line, character }
    }

    #[rstest]
    #[case(pos(0, 0), "1:1")]
    #[case(pos(11, 2), "12:3")]
    fn test_display_is_one_indexed(#[case] position: SourcePosition, #[case] expected: &str) {
        assert_that!(position.to_string(), eq(expected));
    }
}
