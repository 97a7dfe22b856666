//! Layout tunables.
//!
//! Every spacing, indent and font size the engine uses lives in one
//! [`LayoutConfig`] passed into [`LayoutEngine`](crate::LayoutEngine). The
//! defaults give a Kindle-like reading page.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Font sizes (in pt, used 1:1 as px) for the text roles layout knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    /// `h1` through `h6`, in order.
    pub headings: [i32; 6],
    /// Body text and the root default.
    pub body: i32,
    /// `code` and `pre`.
    pub code: i32,
    /// `small`.
    pub small: i32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            headings: [28, 24, 20, 18, 16, 15],
            body: 16,
            code: 14,
            small: 13,
        }
    }
}

impl FontSizes {
    /// Default font size for heading `level` (1-6). Anything else is body text.
    #[must_use]
    pub fn heading(&self, level: u8) -> i32 {
        match level {
            1..=6 => self.headings[usize::from(level - 1)],
            _ => self.body,
        }
    }
}

/// All layout tunables in one place.
///
/// Missing fields deserialize to their defaults, so a JSON file only needs
/// to name the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Left and right page margin.
    pub page_margin: i32,
    /// Vertical position of the first line.
    pub top_margin: i32,
    /// Window width used when the caller passes zero or a negative width.
    pub default_window_width: i32,
    /// Paragraphs get half of this before and half after.
    pub paragraph_spacing: i32,
    /// Space above a heading.
    pub heading_margin_top: i32,
    /// Space below a heading.
    pub heading_margin_bottom: i32,
    /// Indent of list content; also the width of a list marker box.
    pub list_indent: i32,
    /// Indent of blockquote content.
    pub blockquote_indent: i32,
    /// Space after every block.
    pub block_spacing: i32,
    /// Horizontal gap after each text run.
    pub inline_gap: i32,
    /// Height of a horizontal rule box.
    pub rule_thickness: i32,
    /// Line height as a multiple of font size.
    pub line_height_ratio: f32,
    /// Fallback advance width of one character at body size.
    pub fallback_glyph_width: i32,
    /// Font sizes per text role.
    pub fonts: FontSizes,
    /// Stop emitting boxes after this many; the result is marked truncated.
    pub max_boxes: Option<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_margin: 30,
            top_margin: 10,
            default_window_width: 800,
            paragraph_spacing: 16,
            heading_margin_top: 24,
            heading_margin_bottom: 12,
            list_indent: 25,
            blockquote_indent: 30,
            block_spacing: 10,
            inline_gap: 4,
            rule_thickness: 4,
            line_height_ratio: 1.4,
            fallback_glyph_width: 7,
            fonts: FontSizes::default(),
            max_boxes: None,
        }
    }
}

impl LayoutConfig {
    /// Line height for text at `font_size`: `font_size * line_height_ratio`, rounded.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn line_height(&self, font_size: i32) -> i32 {
        let height = (font_size as f32 * self.line_height_ratio).round();
        if height.is_finite() && height > 0.0 {
            height as i32
        } else {
            0
        }
    }

    /// Reject values that would make geometry negative or meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let spacings = [
            ("page_margin", self.page_margin),
            ("top_margin", self.top_margin),
            ("paragraph_spacing", self.paragraph_spacing),
            ("heading_margin_top", self.heading_margin_top),
            ("heading_margin_bottom", self.heading_margin_bottom),
            ("list_indent", self.list_indent),
            ("blockquote_indent", self.blockquote_indent),
            ("block_spacing", self.block_spacing),
            ("inline_gap", self.inline_gap),
            ("rule_thickness", self.rule_thickness),
            ("fallback_glyph_width", self.fallback_glyph_width),
        ];
        if let Some((name, value)) = spacings.iter().find(|(_, v)| *v < 0) {
            return Err(LayoutError::InvalidConfig(format!(
                "{name} must not be negative, got {value}"
            )));
        }

        if !self.line_height_ratio.is_finite() || self.line_height_ratio <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "line_height_ratio must be a positive number, got {}",
                self.line_height_ratio
            )));
        }

        let fonts = &self.fonts;
        let sizes = fonts
            .headings
            .iter()
            .chain([&fonts.body, &fonts.code, &fonts.small]);
        if let Some(size) = sizes.copied().find(|&s| s <= 0) {
            return Err(LayoutError::InvalidConfig(format!(
                "font sizes must be positive, got {size}"
            )));
        }

        Ok(())
    }
}
