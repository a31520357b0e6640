//! Tree-text parser
//!
//! Reads the line-oriented tree format back into root-relative path entries
//! plus the contents of any inlined `>>>`/`<<<` blocks.
//!
//! Depth comes only from the column of the connector glyph (`├` or `└`):
//! `depth = column / 4 + 1`. The ancestor stack is truncated to `depth - 1`
//! before each entry is appended, so no recursion is needed.
//!
//! A content block that is never closed is dropped without error. That
//! leniency is part of the format contract.

use crate::error::TreeError;
use crate::tree::content::ContentMap;
use crate::tree::format::{self, CONTENT_END, CONTENT_START};
use crate::tree::path::{EntryKind, PathEntry, SEPARATOR};
use std::fs;
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Result of parsing tree-text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTree {
    /// Name on the root line, without its trailing separator.
    pub root: Option<String>,
    /// Entries in document order.
    pub entries: Vec<PathEntry>,
    /// Inlined file contents.
    pub contents: ContentMap,
}

impl ParsedTree {
    pub fn directories(&self) -> impl Iterator<Item = &PathEntry> {
        self.entries.iter().filter(|e| e.is_dir())
    }

    pub fn files(&self) -> impl Iterator<Item = &PathEntry> {
        self.entries.iter().filter(|e| e.is_file())
    }
}

/// Read and parse a tree-text file. A file that cannot be read is fatal.
#[instrument(skip_all, fields(input = %path.display()))]
pub fn parse_tree_file(path: &Path) -> Result<ParsedTree, TreeError> {
    let text = fs::read_to_string(path).map_err(|source| TreeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_tree_text(&text);
    debug!(
        entries = parsed.entries.len(),
        contents = parsed.contents.len(),
        "Parsed tree-text file"
    );
    Ok(parsed)
}

/// Parse tree-text held in memory.
pub fn parse_tree_text(text: &str) -> ParsedTree {
    let mut parser = TreeTextParser::default();
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

/// Lines collected between the sentinels.
struct ContentBlock {
    target: Option<PathEntry>,
    /// Character width of the prefix in front of the opening sentinel.
    indent: usize,
    lines: Vec<String>,
}

impl ContentBlock {
    fn push(&mut self, raw: &str) {
        self.lines
            .push(strip_content_indent(raw, self.indent).to_string());
    }

    fn into_content(self) -> String {
        let needs_newline = self.lines.last().is_some_and(|l| !l.ends_with('\n'));
        let mut content = self.lines.join("\n");
        if needs_newline {
            content.push('\n');
        }
        content
    }
}

#[derive(Default)]
struct TreeTextParser {
    root: Option<String>,
    entries: Vec<PathEntry>,
    contents: ContentMap,
    /// Ancestor directory names; its length is the current nesting depth.
    stack: Vec<String>,
    last_file: Option<PathEntry>,
    block: Option<ContentBlock>,
}

impl TreeTextParser {
    fn feed_line(&mut self, line: &str) {
        let trimmed = line.trim();

        // Inside a block only the end sentinel is special.
        if let Some(block) = self.block.as_mut() {
            if trimmed == CONTENT_END {
                self.close_block();
            } else {
                block.push(line);
            }
            return;
        }

        if trimmed == CONTENT_START {
            self.open_block(line);
            return;
        }
        if trimmed == CONTENT_END {
            debug!("Ignoring end sentinel outside a content block");
            self.last_file = None;
            return;
        }

        let structural = format::strip_comment(line);
        if structural.trim().is_empty() {
            return;
        }

        let depth = format::line_depth(structural);
        let name = format::entry_name(structural);
        if depth == 0 {
            self.top_level_line(name);
        } else {
            self.stack.truncate(depth - 1);
            self.entry_line(name);
        }
    }

    /// The first connector-less line names the root; later ones are plain
    /// top-level paths.
    fn top_level_line(&mut self, name: &str) {
        self.stack.clear();
        self.last_file = None;
        if self.root.is_none() && self.entries.is_empty() {
            self.root = Some(name.trim_end_matches(SEPARATOR).to_string());
            return;
        }
        if let Some(entry) = PathEntry::parse(name) {
            if entry.is_file() {
                self.last_file = Some(entry.clone());
            }
            self.entries.push(entry);
        }
    }

    fn entry_line(&mut self, name: &str) {
        if name.ends_with(SEPARATOR) {
            self.last_file = None;
            let part = name.trim_end_matches(SEPARATOR);
            if !part.is_empty() {
                self.stack.push(part.to_string());
            }
            // An empty name re-emits the enclosing directory. At the top level
            // that is the root, which is kept in `root` rather than as an
            // entry, so nothing is emitted.
            if let Some(entry) = PathEntry::from_segments(&self.stack, EntryKind::Directory) {
                self.entries.push(entry);
            }
        } else if !name.is_empty() {
            let mut segments: Vec<&str> = self.stack.iter().map(String::as_str).collect();
            segments.push(name);
            if let Some(entry) = PathEntry::from_segments(&segments, EntryKind::File) {
                self.last_file = Some(entry.clone());
                self.entries.push(entry);
            }
        }
    }

    fn open_block(&mut self, line: &str) {
        let indent = line
            .find(CONTENT_START)
            .map(|idx| line[..idx].chars().count())
            .unwrap_or(0);
        if self.last_file.is_none() {
            debug!("Content block has no preceding file entry; it will be discarded");
        }
        self.block = Some(ContentBlock {
            target: self.last_file.clone(),
            indent,
            lines: Vec::new(),
        });
    }

    fn close_block(&mut self) {
        if let Some(mut block) = self.block.take() {
            if let Some(target) = block.target.take() {
                self.contents.insert(&target, block.into_content());
            }
        }
        self.last_file = None;
    }

    fn finish(self) -> ParsedTree {
        if let Some(block) = self.block {
            warn!(
                file = block.target.as_ref().map(PathEntry::as_str).unwrap_or("<none>"),
                lines = block.lines.len(),
                "Content block has no closing sentinel; discarding it"
            );
        }
        ParsedTree {
            root: self.root,
            entries: self.entries,
            contents: self.contents,
        }
    }
}

/// Remove `indent` prefix characters (whitespace or `│`) from a content line.
/// Lines that are not indented that far lose all leading whitespace instead.
fn strip_content_indent(raw: &str, indent: usize) -> &str {
    let mut offset = 0;
    for (taken, c) in raw.chars().enumerate() {
        if taken == indent {
            break;
        }
        if !format::is_prefix_char(c) {
            return raw.trim_start();
        }
        offset += c.len_utf8();
    }
    &raw[offset..]
}
