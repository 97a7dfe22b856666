//! Tag classification.
//!
//! Every node is classified once per layout pass, so lookups are binary
//! searches over sorted, lowercase tables compared case-insensitively.

use std::cmp::Ordering;

use strum_macros::{AsRefStr, Display};

/// Block-level tags (sorted, lowercase).
const BLOCK_TAGS: &[&str] = &[
    "article", "aside", "blockquote", "dd", "details", "dialog", "div", "dl", "dt",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table", "tbody", "td",
    "tfoot", "th", "thead", "tr", "ul",
];

/// Inline-level tags (sorted, lowercase). `#text` is the text-leaf sentinel.
const INLINE_TAGS: &[&str] = &[
    "#text", "a", "abbr", "b", "big", "br", "cite", "code", "em", "i", "img", "kbd", "label",
    "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var",
];

/// Tags whose whole subtree is never laid out (sorted, lowercase).
const EXCLUDED_TAGS: &[&str] = &[
    "base", "head", "link", "meta", "script", "style", "template", "title",
];

/// Structural containers that get a wireframe border hint.
const STRUCTURAL_TAGS: &[&str] = &[
    "article", "aside", "div", "footer", "form", "header", "main", "nav", "section", "table",
];

/// How a tag participates in flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TagClass {
    /// Stacks vertically and owns a box spanning its container.
    Block,
    /// Flows along the current line; only text leaves own a box.
    Inline,
    /// No box of its own; children flow as if the tag were absent.
    Transparent,
}

/// Compare `a` and `b` as if both were lowercase ASCII.
fn cmp_ignore_ascii_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

fn in_table(tag: &str, table: &[&str]) -> bool {
    table
        .binary_search_by(|probe| cmp_ignore_ascii_case(probe, tag))
        .is_ok()
}

/// Classify `tag` as block, inline or transparent (case-insensitive).
///
/// A tag absent from both tables is [`TagClass::Transparent`]; that is the
/// normal outcome for `html`, `body` and unknown elements, not an error.
#[must_use]
pub fn classify(tag: &str) -> TagClass {
    if in_table(tag, BLOCK_TAGS) {
        TagClass::Block
    } else if in_table(tag, INLINE_TAGS) {
        TagClass::Inline
    } else {
        TagClass::Transparent
    }
}

/// True for tags that, with their whole subtree, produce no boxes at all.
#[must_use]
pub fn is_excluded(tag: &str) -> bool {
    in_table(tag, EXCLUDED_TAGS)
}

/// True for generic containers that renderers outline.
#[must_use]
pub fn is_structural(tag: &str) -> bool {
    in_table(tag, STRUCTURAL_TAGS)
}

/// The specific behaviour a tag triggers beyond its [`TagClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagRole {
    /// `h1`-`h6`, with the level.
    Heading(u8),
    /// `p`
    Paragraph,
    /// `ul`
    UnorderedList,
    /// `ol`
    OrderedList,
    /// `li`
    ListItem,
    /// `blockquote`
    Blockquote,
    /// `pre`
    Preformatted,
    /// `br`
    LineBreak,
    /// `hr`
    HorizontalRule,
    /// `b`, `strong`
    Strong,
    /// `em`, `i`
    Emphasis,
    /// `code`
    Code,
    /// `small`
    Small,
    /// Everything else.
    Other,
}

impl TagRole {
    /// Look up the role of `tag` (case-insensitive).
    #[must_use]
    pub fn of(tag: &str) -> Self {
        if let [b'h' | b'H', level @ b'1'..=b'6'] = tag.as_bytes() {
            return Self::Heading(level - b'0');
        }
        match tag.to_ascii_lowercase().as_str() {
            "p" => Self::Paragraph,
            "ul" => Self::UnorderedList,
            "ol" => Self::OrderedList,
            "li" => Self::ListItem,
            "blockquote" => Self::Blockquote,
            "pre" => Self::Preformatted,
            "br" => Self::LineBreak,
            "hr" => Self::HorizontalRule,
            "b" | "strong" => Self::Strong,
            "em" | "i" => Self::Emphasis,
            "code" => Self::Code,
            "small" => Self::Small,
            _ => Self::Other,
        }
    }

    /// Heading level 1-6, or 0 for anything that is not a heading.
    #[must_use]
    pub const fn heading_level(self) -> u8 {
        match self {
            Self::Heading(level) => level,
            _ => 0,
        }
    }
}
