//! Output boxes.

use serde::Serialize;
use sprig_dom::NodeId;

/// Rendering hints carried by every box.
///
/// Layout decides geometry; these flags tell the renderer how to paint the
/// rectangle (font, decorations, list markers) without re-walking the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Hints {
    /// Font size in effect for the box.
    pub font_size: i32,
    /// 1-6 for heading blocks, 0 otherwise.
    pub heading_level: u8,
    /// Bold text (inside `b`/`strong`, or a heading).
    pub is_bold: bool,
    /// Italic text (inside `em`/`i`).
    pub is_italic: bool,
    /// Inside a hyperlink.
    pub is_link: bool,
    /// A list marker box.
    pub is_list_item: bool,
    /// 1-based ordinal for ordered list markers, 0 for bullets.
    pub list_index: u32,
    /// A horizontal rule.
    pub is_rule: bool,
    /// Structural container that renderers outline.
    pub show_border: bool,
    /// A `pre` block.
    pub is_preformatted: bool,
    /// A `blockquote` block.
    pub is_blockquote: bool,
}

/// One positioned, sized rectangle.
///
/// Boxes are immutable once emitted, except that block boxes are emitted
/// with height 0 and fixed up once their content is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutBox {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Never negative.
    pub width: i32,
    /// Never negative.
    pub height: i32,
    /// The node this box was generated for.
    pub node: NodeId,
    /// Hyperlink target in effect, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Rendering hints.
    pub hints: Hints,
}

impl LayoutBox {
    /// Right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// True if the point lies inside the box. Left and top edges are
    /// inclusive, right and bottom exclusive.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, width: i32, height: i32) -> LayoutBox {
        LayoutBox {
            x,
            y,
            width,
            height,
            node: NodeId::ROOT,
            href: None,
            hints: Hints::default(),
        }
    }

    #[test]
    fn test_contains_edges() {
        let b = rect(10, 20, 30, 5);
        assert!(b.contains(10, 20));
        assert!(b.contains(39, 24));
        assert!(!b.contains(40, 24));
        assert!(!b.contains(10, 25));
        assert!(!b.contains(9, 20));
    }

    #[test]
    fn test_empty_box_contains_nothing() {
        assert!(!rect(0, 0, 0, 10).contains(0, 0));
        assert!(!rect(0, 0, 10, 0).contains(0, 0));
    }

    #[test]
    fn test_edges() {
        let b = rect(10, 20, 30, 5);
        assert_eq!(b.right(), 40);
        assert_eq!(b.bottom(), 25);
    }
}
