//! The attribute record threaded through layout.
//!
//! A [`LayoutContext`] is a plain `Copy` value. A container derives its
//! children's context by copying its own and overriding fields, so nothing
//! a child does can write through to the parent. When the child subtree is
//! done, the parent explicitly adopts the resulting cursor with
//! [`LayoutContext::adopt_flow`].

use crate::config::LayoutConfig;

/// Kind of the nearest enclosing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListKind {
    /// Not inside a list.
    #[default]
    None,
    /// Inside `ul`: items get bullets (index 0).
    Unordered,
    /// Inside `ol`: items get 1-based ordinals.
    Ordered,
}

/// Inherited attributes plus the live cursor of one flow container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutContext<'a> {
    /// Left edge of the current flow container.
    pub base_x: i32,
    /// Usable width of the current flow container. Never negative.
    pub avail_w: i32,
    /// Vertical write cursor.
    pub cur_y: i32,
    /// Horizontal cursor of the current line.
    pub cur_inline_x: i32,
    /// Active font size.
    pub font_size: i32,
    /// Inside `b`/`strong` or a heading.
    pub is_bold: bool,
    /// Inside `em`/`i`.
    pub is_italic: bool,
    /// Kind of the nearest enclosing list.
    pub list_kind: ListKind,
    /// Items numbered so far in the nearest enclosing ordered list.
    pub list_counter: u32,
    /// Nearest enclosing hyperlink target.
    pub active_href: Option<&'a str>,
}

impl<'a> LayoutContext<'a> {
    /// The context layout starts from.
    ///
    /// A non-positive `window_width` is replaced by the configured default.
    #[must_use]
    pub fn root(config: &LayoutConfig, window_width: i32) -> Self {
        let window_width = if window_width > 0 {
            window_width
        } else {
            config.default_window_width
        };
        let base_x = config.page_margin;
        Self {
            base_x,
            avail_w: window_width
                .saturating_sub(config.page_margin.saturating_mul(2))
                .max(0),
            cur_y: config.top_margin,
            cur_inline_x: base_x,
            font_size: config.fonts.body,
            is_bold: false,
            is_italic: false,
            list_kind: ListKind::None,
            list_counter: 0,
            active_href: None,
        }
    }

    /// True once something has been placed on the current line.
    #[must_use]
    pub const fn is_mid_line(&self) -> bool {
        self.cur_inline_x != self.base_x
    }

    /// Move to the start of the next line.
    pub const fn break_line(&mut self, line_height: i32) {
        self.cur_y = self.cur_y.saturating_add(line_height);
        self.cur_inline_x = self.base_x;
    }

    /// Shift the flow container right by `amount`, shrinking its width to match.
    pub fn indent(&mut self, amount: i32) {
        self.base_x = self.base_x.saturating_add(amount);
        self.avail_w = self.avail_w.saturating_sub(amount).max(0);
        self.cur_inline_x = self.base_x;
    }

    /// Start a fresh list of `kind`, indenting its content.
    pub fn enter_list(&mut self, kind: ListKind, indent: i32) {
        self.list_kind = kind;
        self.list_counter = 0;
        self.indent(indent);
    }

    /// Take over the cursor and list counter a child subtree ended with.
    ///
    /// Used when closing inline wrappers and transparent nodes, which leave
    /// every inherited attribute of their parent untouched.
    pub const fn adopt_flow(&mut self, child: &Self) {
        self.cur_y = child.cur_y;
        self.cur_inline_x = child.cur_inline_x;
        self.list_counter = child.list_counter;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_context() {
        let ctx = LayoutContext::root(&LayoutConfig::default(), 800);
        assert_eq!(ctx.base_x, 30);
        assert_eq!(ctx.avail_w, 740);
        assert_eq!(ctx.cur_y, 10);
        assert_eq!(ctx.font_size, 16);
        assert!(!ctx.is_mid_line());
    }

    #[test]
    fn test_root_context_bad_window_width() {
        let config = LayoutConfig::default();
        assert_eq!(LayoutContext::root(&config, 0).avail_w, 740);
        assert_eq!(LayoutContext::root(&config, -20).avail_w, 740);
        assert_eq!(LayoutContext::root(&config, 40).avail_w, 0);
    }

    #[test]
    fn test_copy_does_not_alias() {
        let parent = LayoutContext::root(&LayoutConfig::default(), 800);
        let mut child = parent;
        child.enter_list(ListKind::Ordered, 25);
        child.list_counter = 3;
        child.break_line(22);

        assert_eq!(parent.base_x, 30);
        assert_eq!(parent.cur_y, 10);
        assert_eq!(child.base_x, 55);
        assert_eq!(child.avail_w, 715);
        assert_eq!(child.cur_y, 32);
    }

    #[test]
    fn test_indent_clamps_width() {
        let mut ctx = LayoutContext::root(&LayoutConfig::default(), 100);
        ctx.indent(60);
        assert_eq!(ctx.avail_w, 0);
        assert_eq!(ctx.cur_inline_x, 90);
    }

    #[test]
    fn test_adopt_flow() {
        let mut parent = LayoutContext::root(&LayoutConfig::default(), 800);
        let mut child = parent;
        child.is_bold = true;
        child.cur_inline_x += 40;
        child.cur_y += 22;
        child.list_counter = 2;

        parent.adopt_flow(&child);
        assert_eq!(parent.cur_inline_x, 70);
        assert_eq!(parent.cur_y, 32);
        assert_eq!(parent.list_counter, 2);
        assert!(!parent.is_bold);
    }
}
