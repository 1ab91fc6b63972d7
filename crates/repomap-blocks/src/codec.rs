//! Map block encoding and in-place replacement.
//!
//! A block spans from the `<start> Repository Map:` line through the first
//! following `<continuation> File: ...` line, plus the closing marker line
//! when the style has one. Detection is purely textual; file content is
//! never interpreted as any language.

use std::ops::Range;

use regex::Regex;

use crate::error::Result;
use crate::style::CommentStyle;

/// Literal text following the start marker on the first block line.
pub const MAP_HEADER: &str = "Repository Map:";

/// Literal label of the last block line, followed by the file name.
pub const FILE_LABEL: &str = "File:";

/// Result of applying a map block to file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// The full new file content
    pub content: String,
    /// Whether `content` differs from the input
    pub changed: bool,
}

/// Encoder and locator for map blocks of one comment style.
///
/// The detection pattern is compiled once per style, so callers that process
/// many files should keep one codec per style around.
#[derive(Debug, Clone)]
pub struct MapBlockCodec {
    style: CommentStyle,
    pattern: Regex,
}

impl MapBlockCodec {
    /// Build a codec for `style`.
    ///
    /// # Errors
    /// Returns `Error::Pattern` if the detection pattern fails to compile.
    pub fn new(style: CommentStyle) -> Result<Self> {
        let mut pattern = format!(
            r"(?s){} {}.*?{} {}[^\n]*\n?",
            regex::escape(style.start),
            regex::escape(MAP_HEADER),
            regex::escape(style.continuation),
            regex::escape(FILE_LABEL),
        );
        if style.has_end() {
            pattern.push_str(&format!(r"(?:{}\n?)?", regex::escape(style.end)));
        }

        Ok(Self {
            style,
            pattern: Regex::new(&pattern)?,
        })
    }

    pub fn style(&self) -> CommentStyle {
        self.style
    }

    /// Render the canonical block for `tree` in a file named `filename`.
    pub fn encode(&self, tree: &str, filename: &str) -> String {
        let style = self.style;
        let mut block = format!("{} {}\n", style.start, MAP_HEADER);
        for line in tree.split('\n') {
            block.push_str(&format!("{} {}\n", style.continuation, line));
        }
        block.push_str(&format!("{} {} {}\n", style.continuation, FILE_LABEL, filename));
        if style.has_end() {
            block.push_str(style.end);
            block.push('\n');
        }
        block
    }

    /// Byte range of the first existing block in `content`, if any.
    pub fn find(&self, content: &str) -> Option<Range<usize>> {
        self.pattern.find(content).map(|m| m.range())
    }

    /// Insert or refresh the block in `content`.
    ///
    /// An existing block is replaced in place and every byte around it is kept;
    /// otherwise the block is prepended. Re-applying the same tree is a no-op
    /// reported as `changed == false`.
    pub fn apply(&self, content: &str, tree: &str, filename: &str) -> Applied {
        let block = self.encode(tree, filename);

        let updated = match self.find(content) {
            Some(range) => {
                if content[range.clone()] == block {
                    return Applied {
                        content: content.to_string(),
                        changed: false,
                    };
                }
                tracing::debug!(filename, start = range.start, end = range.end, "Replacing existing map block");
                let mut updated = String::with_capacity(content.len() - range.len() + block.len());
                updated.push_str(&content[..range.start]);
                updated.push_str(&block);
                updated.push_str(&content[range.end..]);
                updated
            }
            None => {
                tracing::debug!(filename, "Prepending new map block");
                let mut updated = block;
                updated.push_str(content);
                updated
            }
        };

        let changed = updated != content;
        Applied {
            content: updated,
            changed,
        }
    }
}

/// Render the canonical block for `tree` in the given style.
pub fn encode(tree: &str, style: CommentStyle, filename: &str) -> Result<String> {
    Ok(MapBlockCodec::new(style)?.encode(tree, filename))
}

/// Insert or refresh the block for `tree` in `content`.
pub fn apply(content: &str, tree: &str, style: CommentStyle, filename: &str) -> Result<Applied> {
    Ok(MapBlockCodec::new(style)?.apply(content, tree, filename))
}
