//! Tree-text grammar constants and line helpers shared by the parser and dumper.

/// Connector for every sibling except the last.
pub const BRANCH: &str = "├── ";
/// Connector for the last sibling.
pub const LAST_BRANCH: &str = "└── ";
/// Child prefix under a non-last parent.
pub const PIPE_PREFIX: &str = "│   ";
/// Child prefix under the last parent.
pub const BLANK_PREFIX: &str = "    ";

/// One nesting level, in columns.
pub const INDENT_WIDTH: usize = 4;
/// Indentation unit for content lines relative to their file's prefix.
pub const INDENT_UNIT: &str = "    ";

pub const CONTENT_START: &str = ">>>";
pub const CONTENT_END: &str = "<<<";
pub const COMMENT_MARKER: char = '#';

const GLYPH_BRANCH: char = '├';
const GLYPH_LAST: char = '└';
const GLYPH_HORIZONTAL: char = '─';
const GLYPH_VERTICAL: char = '│';

/// Depth of a structural line: `column / 4 + 1` for the first connector glyph,
/// 0 when the line has none (the root line).
///
/// Columns are counted in characters, not bytes.
pub fn line_depth(line: &str) -> usize {
    connector_column(line)
        .map(|column| column / INDENT_WIDTH + 1)
        .unwrap_or(0)
}

/// Character column of the first `├` or `└`.
pub fn connector_column(line: &str) -> Option<usize> {
    line.chars()
        .position(|c| c == GLYPH_BRANCH || c == GLYPH_LAST)
}

/// Name text following the connector glyph run, trimmed. Lines without a
/// connector yield the whole trimmed line.
pub fn entry_name(line: &str) -> &str {
    match line.char_indices().find(|(_, c)| *c == GLYPH_BRANCH || *c == GLYPH_LAST) {
        Some((idx, glyph)) => line[idx + glyph.len_utf8()..]
            .trim_start_matches(GLYPH_HORIZONTAL)
            .trim(),
        None => line.trim(),
    }
}

/// Drop a trailing `# comment`.
pub fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_MARKER) {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Whether `c` may appear in the prefix in front of a content line.
pub fn is_prefix_char(c: char) -> bool {
    c.is_whitespace() || c == GLYPH_VERTICAL
}
