//! Comment marker styles keyed by file extension

/// The markers used to wrap a map block in a given file type.
///
/// `end` is empty for line-comment languages, which have no closing delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentStyle {
    /// Marker on the `Repository Map:` line
    pub start: &'static str,
    /// Marker on every tree line and on the `File:` line
    pub continuation: &'static str,
    /// Closing marker on its own line, or empty
    pub end: &'static str,
}

impl CommentStyle {
    pub const fn new(start: &'static str, continuation: &'static str, end: &'static str) -> Self {
        Self {
            start,
            continuation,
            end,
        }
    }

    /// Whether the style emits a closing marker line.
    pub fn has_end(&self) -> bool {
        !self.end.is_empty()
    }
}

/// Style used for unknown or missing extensions.
pub const DEFAULT_STYLE: CommentStyle = CommentStyle::new("#", "#", "");

const HASH: CommentStyle = CommentStyle::new("#", "#", "");
const SLASH: CommentStyle = CommentStyle::new("//", "//", "");
const SEMICOLON: CommentStyle = CommentStyle::new(";", ";", "");
const DASH: CommentStyle = CommentStyle::new("--", "--", "");
const MARKUP: CommentStyle = CommentStyle::new("<!--", " *", "-->");
const BLOCK: CommentStyle = CommentStyle::new("/*", " *", "*/");

/// Look up the comment style for a file extension.
///
/// A leading dot is ignored. Keys are matched case-sensitively, so `PY`
/// falls back to [`DEFAULT_STYLE`] just like any unknown extension.
pub fn style_for(extension: &str) -> CommentStyle {
    match extension.trim_start_matches('.') {
        "py" | "rb" | "pl" | "sh" | "bash" | "zsh" | "yaml" | "yml" | "toml" | "conf" => HASH,
        "js" | "java" | "c" | "cpp" | "cs" | "go" | "rs" | "swift" | "kt" | "scala" => SLASH,
        "ini" | "cfg" => SEMICOLON,
        "sql" | "lua" | "hs" => DASH,
        "md" | "html" | "htm" | "xml" => MARKUP,
        "css" | "scss" | "less" | "php" | "jsx" | "tsx" => BLOCK,
        _ => DEFAULT_STYLE,
    }
}
