//! The layout pass.
//!
//! Layout is a single pre-order walk that threads a [`LayoutContext`] down
//! the tree and hands the final cursor of each subtree back up to its
//! parent. Block boxes are emitted on the way down with a placeholder
//! height and fixed up on the way back up.
//!
//! The walk keeps its own stack of frames instead of recursing, so the
//! call stack stays flat no matter how deeply the document nests. A frame
//! is pushed when a container opens and popped when its last child has
//! been visited; popping runs the container's close step against the
//! parent frame's context.

use sprig_common::warning::warn_once;
use sprig_dom::{DomTree, NodeId};

use crate::buffer::{BoxBuffer, BoxIndex};
use crate::config::LayoutConfig;
use crate::context::{LayoutContext, ListKind};
use crate::error::LayoutError;
use crate::layout_box::{Hints, LayoutBox};
use crate::length::StyleAccessor;
use crate::measure::TextMeasurer;
use crate::result::LayoutResult;
use crate::tags::{TagClass, TagRole, classify, is_excluded, is_structural};

/// Lays out documents with one fixed [`LayoutConfig`].
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine using `config`.
    #[must_use]
    pub const fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine lays out with.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out the subtree at `root` for a window `window_width` pixels wide.
    ///
    /// A non-positive `window_width` is replaced by the configured default.
    /// Layout never fails: if the box buffer refuses a box, the boxes
    /// produced so far are returned and [`LayoutResult::truncation`] says why.
    #[must_use]
    pub fn layout(
        &self,
        tree: &DomTree,
        root: NodeId,
        measurer: &dyn TextMeasurer,
        window_width: i32,
    ) -> LayoutResult {
        let window_width = if window_width > 0 {
            window_width
        } else {
            self.config.default_window_width
        };

        let mut pass = Pass {
            config: &self.config,
            tree,
            measurer,
            buffer: BoxBuffer::with_limit(self.config.max_boxes),
            truncation: None,
            frames: Vec::new(),
        };
        pass.run(root, LayoutContext::root(&self.config, window_width));

        LayoutResult {
            boxes: pass.buffer.into_vec(),
            root,
            window_width,
            truncation: pass.truncation,
        }
    }
}

/// Lay out `root` with the default configuration.
///
/// See [`LayoutEngine::layout`].
#[must_use]
pub fn layout(
    tree: &DomTree,
    root: NodeId,
    measurer: &dyn TextMeasurer,
    window_width: i32,
) -> LayoutResult {
    LayoutEngine::default().layout(tree, root, measurer, window_width)
}

/// An open container whose children are still being visited.
struct Frame<'a> {
    /// Context the children are laid out in. Each visited child's final
    /// cursor is written back here.
    ctx: LayoutContext<'a>,
    children: &'a [NodeId],
    next_child: usize,
    close: Close,
}

/// What to do once every child of a frame has been visited.
enum Close {
    /// Inline wrappers and transparent nodes: the parent adopts the cursor.
    Flow,
    /// Block containers: fix up the height and apply trailing margins.
    Block(BlockClose),
}

struct BlockClose {
    box_index: Option<BoxIndex>,
    start_y: i32,
    heading_level: u8,
    is_paragraph: bool,
    is_list_item: bool,
    has_children: bool,
}

/// State of one layout run.
struct Pass<'a> {
    config: &'a LayoutConfig,
    tree: &'a DomTree,
    measurer: &'a dyn TextMeasurer,
    buffer: BoxBuffer,
    /// Set by the first refused box. No node is visited after that, but
    /// open frames still close so emitted blocks get their heights. A
    /// refused text run does not advance the cursor, so those heights
    /// only cover what was emitted.
    truncation: Option<LayoutError>,
    frames: Vec<Frame<'a>>,
}

impl<'a> Pass<'a> {
    fn run(&mut self, root: NodeId, mut base: LayoutContext<'a>) {
        self.visit(root, &mut base);

        while let Some(index) = self.frames.len().checked_sub(1) {
            let frame = &mut self.frames[index];
            let next = if self.truncation.is_none() {
                frame.children.get(frame.next_child).copied()
            } else {
                None
            };

            if let Some(child) = next {
                frame.next_child += 1;
                let mut ctx = frame.ctx;
                self.visit(child, &mut ctx);
                // `visit` may have pushed a frame for `child` above `index`.
                self.frames[index].ctx = ctx;
                continue;
            }

            let Some(finished) = self.frames.pop() else {
                break;
            };
            let mut parent = self.frames.last().map_or(base, |f| f.ctx);
            self.close(finished, &mut parent);
            if let Some(f) = self.frames.last_mut() {
                f.ctx = parent;
            }
        }

        #[cfg(feature = "layout-trace")]
        eprintln!("[LAYOUT DONE] boxes={}", self.buffer.len());
    }

    /// Handle one node in the flow described by `ctx`.
    ///
    /// Leaves (text runs, `br`, `hr`) are finished here. Containers emit
    /// their own box if they have one and push a frame for their children.
    fn visit(&mut self, id: NodeId, ctx: &mut LayoutContext<'a>) {
        let tree = self.tree;
        let Some(tag) = tree.tag_name(id) else {
            return;
        };
        if is_excluded(tag) {
            return;
        }

        let href = tree.href(id).or(ctx.active_href);
        let style = StyleAccessor::of(tree, id);
        let role = TagRole::of(tag);

        match role {
            TagRole::LineBreak => {
                ctx.break_line(self.config.line_height(ctx.font_size));
                return;
            }
            TagRole::HorizontalRule => {
                self.rule(id, ctx);
                return;
            }
            _ => {}
        }

        match classify(tag) {
            TagClass::Block => self.open_block(id, tag, role, style, href, ctx),
            TagClass::Inline => match tree.as_text(id) {
                Some(text) => self.text_run(id, text, style.font_size(), href, ctx),
                None => self.open_inline(id, role, style.font_size(), href, ctx),
            },
            TagClass::Transparent => {
                let mut child = *ctx;
                child.active_href = href;
                if let Some(font_size) = style.font_size() {
                    child.font_size = font_size;
                }
                self.push_frame(id, child, Close::Flow);
            }
        }
    }

    fn text_run(
        &mut self,
        id: NodeId,
        text: &str,
        font_override: Option<i32>,
        href: Option<&'a str>,
        ctx: &mut LayoutContext<'a>,
    ) {
        if text.trim_ascii().is_empty() {
            return;
        }

        let font_size = font_override.unwrap_or(ctx.font_size);
        let width = self.measurer.text_width(text, font_size).max(0);
        let line_height = self.config.line_height(font_size);

        let overflows =
            ctx.cur_inline_x.saturating_add(width) > ctx.base_x.saturating_add(ctx.avail_w);
        if overflows && ctx.is_mid_line() {
            ctx.break_line(line_height);
        }

        let hints = Hints {
            font_size,
            is_bold: ctx.is_bold,
            is_italic: ctx.is_italic,
            is_link: href.is_some(),
            ..Hints::default()
        };
        // A refused run takes up no room on the line.
        if self
            .emit(ctx.cur_inline_x, ctx.cur_y, width, line_height, id, href, hints)
            .is_none()
        {
            return;
        }

        ctx.cur_inline_x = ctx
            .cur_inline_x
            .saturating_add(width)
            .saturating_add(self.config.inline_gap);
    }

    fn rule(&mut self, id: NodeId, ctx: &mut LayoutContext<'a>) {
        ctx.cur_inline_x = ctx.base_x;
        let spacing = self.config.block_spacing;
        let thickness = self.config.rule_thickness;

        ctx.cur_y = ctx.cur_y.saturating_add(spacing);
        let hints = Hints {
            font_size: ctx.font_size,
            is_rule: true,
            ..Hints::default()
        };
        let _ = self.emit(ctx.base_x, ctx.cur_y, ctx.avail_w, thickness, id, None, hints);
        ctx.cur_y = ctx
            .cur_y
            .saturating_add(thickness)
            .saturating_add(spacing);
    }

    fn open_block(
        &mut self,
        id: NodeId,
        tag: &str,
        role: TagRole,
        style: StyleAccessor<'_>,
        href: Option<&'a str>,
        ctx: &mut LayoutContext<'a>,
    ) {
        let config = self.config;
        if ctx.is_mid_line() {
            ctx.break_line(config.line_height(ctx.font_size));
        }

        let heading_level = role.heading_level();
        let mut child = *ctx;
        if let Some(font_size) = style.font_size() {
            child.font_size = font_size;
        } else if heading_level > 0 {
            child.font_size = config.fonts.heading(heading_level);
        } else if role == TagRole::Preformatted {
            child.font_size = config.fonts.code;
        }

        match role {
            TagRole::Heading(_) => {
                ctx.cur_y = ctx.cur_y.saturating_add(config.heading_margin_top);
            }
            TagRole::Paragraph => {
                ctx.cur_y = ctx.cur_y.saturating_add(config.paragraph_spacing / 2);
            }
            TagRole::UnorderedList => child.enter_list(ListKind::Unordered, config.list_indent),
            TagRole::OrderedList => child.enter_list(ListKind::Ordered, config.list_indent),
            TagRole::Blockquote => child.indent(config.blockquote_indent),
            TagRole::ListItem => {
                let list_index = if ctx.list_kind == ListKind::Ordered {
                    ctx.list_counter = ctx.list_counter.saturating_add(1);
                    ctx.list_counter
                } else {
                    0
                };
                child.list_counter = ctx.list_counter;

                let hints = Hints {
                    font_size: child.font_size,
                    is_bold: child.is_bold,
                    is_link: href.is_some(),
                    is_list_item: true,
                    list_index,
                    ..Hints::default()
                };
                let _ = self.emit(
                    ctx.base_x.saturating_sub(config.list_indent),
                    ctx.cur_y,
                    config.list_indent,
                    config.line_height(child.font_size),
                    id,
                    href,
                    hints,
                );
            }
            _ => {}
        }

        let mut width = child.avail_w.max(0);
        if let Some(styled) = style.width()
            && styled < width
        {
            width = styled;
        }

        let start_y = ctx.cur_y;
        let hints = Hints {
            font_size: child.font_size,
            heading_level,
            is_bold: child.is_bold || heading_level > 0,
            is_italic: child.is_italic,
            is_link: href.is_some(),
            show_border: is_structural(tag),
            is_preformatted: role == TagRole::Preformatted,
            is_blockquote: role == TagRole::Blockquote,
            ..Hints::default()
        };
        let box_index = self.emit(ctx.base_x, start_y, width, 0, id, href, hints);

        if heading_level > 0 {
            child.is_bold = true;
        }
        child.cur_y = start_y;
        child.cur_inline_x = child.base_x;
        child.active_href = href;

        let close = Close::Block(BlockClose {
            box_index,
            start_y,
            heading_level,
            is_paragraph: role == TagRole::Paragraph,
            is_list_item: role == TagRole::ListItem,
            has_children: !self.tree.children(id).is_empty(),
        });
        self.push_frame(id, child, close);
    }

    fn open_inline(
        &mut self,
        id: NodeId,
        role: TagRole,
        font_override: Option<i32>,
        href: Option<&'a str>,
        ctx: &LayoutContext<'a>,
    ) {
        let mut child = *ctx;
        child.active_href = href;
        match role {
            TagRole::Strong => child.is_bold = true,
            TagRole::Emphasis => child.is_italic = true,
            TagRole::Code if font_override.is_none() => child.font_size = self.config.fonts.code,
            TagRole::Small if font_override.is_none() => {
                child.font_size = self.config.fonts.small;
            }
            _ => {}
        }
        if let Some(font_size) = font_override {
            child.font_size = font_size;
        }
        self.push_frame(id, child, Close::Flow);
    }

    fn close(&mut self, frame: Frame<'a>, parent: &mut LayoutContext<'a>) {
        let child = frame.ctx;
        let block = match frame.close {
            Close::Flow => {
                parent.adopt_flow(&child);
                return;
            }
            Close::Block(block) => block,
        };

        let config = self.config;
        let line_height = config.line_height(child.font_size);
        let mut end_y = child.cur_y;
        if child.is_mid_line() {
            end_y = end_y.saturating_add(line_height);
        }
        let height = if block.has_children {
            end_y.saturating_sub(block.start_y).max(0)
        } else {
            line_height
        };
        if let Some(index) = block.box_index {
            self.buffer.fix_height(index, height);
        }

        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[LAYOUT CLOSE] depth={} start_y={} height={height}",
            self.frames.len(),
            block.start_y
        );

        let mut cur_y = block.start_y.saturating_add(height);
        if block.heading_level > 0 {
            cur_y = cur_y.saturating_add(config.heading_margin_bottom);
        }
        if block.is_paragraph {
            cur_y = cur_y.saturating_add(config.paragraph_spacing / 2);
        }
        parent.cur_y = cur_y.saturating_add(config.block_spacing);
        parent.cur_inline_x = parent.base_x;

        if block.is_list_item {
            parent.list_counter = child.list_counter;
        }
    }

    fn push_frame(&mut self, id: NodeId, ctx: LayoutContext<'a>, close: Close) {
        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[LAYOUT OPEN] depth={} node={} tag={:?} y={} base_x={} avail_w={}",
            self.frames.len(),
            id.0,
            self.tree.tag_name(id),
            ctx.cur_y,
            ctx.base_x,
            ctx.avail_w
        );

        self.frames.push(Frame {
            ctx,
            children: self.tree.children(id),
            next_child: 0,
            close,
        });
    }

    /// Append a box, recording the first refusal as the pass's truncation.
    #[allow(clippy::too_many_arguments)]
    fn emit(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        node: NodeId,
        href: Option<&str>,
        hints: Hints,
    ) -> Option<BoxIndex> {
        if self.truncation.is_some() {
            return None;
        }
        let layout_box = LayoutBox {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
            node,
            href: href.map(str::to_string),
            hints,
        };
        match self.buffer.push(layout_box) {
            Ok(index) => Some(index),
            Err(err) => {
                warn_once("Layout", &format!("layout truncated: {err}"));
                self.truncation = Some(err);
                None
            }
        }
    }
}
