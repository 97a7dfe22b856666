//! The outcome of one layout pass.

use sprig_dom::NodeId;

use crate::error::LayoutError;
use crate::layout_box::LayoutBox;

/// Boxes in emission order, plus what a renderer and input layer need
/// to use them.
///
/// The tree the boxes refer to is owned by the caller; the result only
/// keeps the id of the root it was laid out from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutResult {
    pub(crate) boxes: Vec<LayoutBox>,
    pub(crate) root: NodeId,
    pub(crate) window_width: i32,
    pub(crate) truncation: Option<LayoutError>,
}

impl LayoutResult {
    /// All boxes, in pre-order emission order.
    #[must_use]
    pub fn boxes(&self) -> &[LayoutBox] {
        &self.boxes
    }

    /// The node layout started from.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Window width actually used (after replacing a non-positive request).
    #[must_use]
    pub const fn window_width(&self) -> i32 {
        self.window_width
    }

    /// Why layout stopped early, if it did.
    #[must_use]
    pub const fn truncation(&self) -> Option<&LayoutError> {
        self.truncation.as_ref()
    }

    /// True if some boxes were never emitted.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }

    /// Take ownership of the boxes.
    #[must_use]
    pub fn into_boxes(self) -> Vec<LayoutBox> {
        self.boxes
    }

    /// Bottom edge of the lowest box; the scrollable document height.
    #[must_use]
    pub fn content_height(&self) -> i32 {
        self.boxes.iter().map(LayoutBox::bottom).max().unwrap_or(0)
    }

    /// The topmost box under a point. Boxes emitted later paint over
    /// earlier ones, so the last match wins.
    #[must_use]
    pub fn hit_test(&self, x: i32, y: i32) -> Option<&LayoutBox> {
        self.boxes.iter().rev().find(|b| b.contains(x, y))
    }

    /// The hyperlink target under a point, if any.
    #[must_use]
    pub fn link_at(&self, x: i32, y: i32) -> Option<&str> {
        self.boxes
            .iter()
            .rev()
            .filter(|b| b.contains(x, y))
            .find_map(|b| b.href.as_deref())
    }
}
