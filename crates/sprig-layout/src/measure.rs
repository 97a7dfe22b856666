//! Text measurement.
//!
//! Layout needs one thing from fonts: how wide a run of text is at a given
//! size. Real metrics are supplied by the caller; [`FallbackMeasurer`] keeps
//! geometry reproducible when none are available (headless runs, tests).

use crate::config::LayoutConfig;

/// Measures the advance width of a text run.
///
/// Implementations must be synchronous, pure and deterministic. Negative
/// widths are treated as zero by the engine.
pub trait TextMeasurer {
    /// Width in pixels of `text` set at `font_size`.
    fn text_width(&self, text: &str, font_size: i32) -> i32;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, i32) -> i32,
{
    fn text_width(&self, text: &str, font_size: i32) -> i32 {
        self(text, font_size)
    }
}

/// Fixed-advance estimate: `chars * glyph_width * font_size / base_font_size`.
///
/// Every character, including spaces, advances by the same amount. With the
/// defaults a five letter word at 16pt is 35px wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackMeasurer {
    /// Advance of one character at `base_font_size`.
    pub glyph_width: i32,
    /// Size at which `glyph_width` applies.
    pub base_font_size: i32,
}

impl Default for FallbackMeasurer {
    fn default() -> Self {
        Self {
            glyph_width: 7,
            base_font_size: 16,
        }
    }
}

impl FallbackMeasurer {
    /// Use the glyph width and body size from `config`.
    #[must_use]
    pub const fn from_config(config: &LayoutConfig) -> Self {
        Self {
            glyph_width: config.fallback_glyph_width,
            base_font_size: config.fonts.body,
        }
    }
}

impl TextMeasurer for FallbackMeasurer {
    fn text_width(&self, text: &str, font_size: i32) -> i32 {
        if self.base_font_size <= 0 {
            return 0;
        }
        let chars = i64::try_from(text.chars().count()).unwrap_or(i64::MAX);
        let width = chars
            .saturating_mul(i64::from(self.glyph_width))
            .saturating_mul(i64::from(font_size))
            / i64::from(self.base_font_size);
        i32::try_from(width.max(0)).unwrap_or(i32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_scales_with_font_size() {
        let m = FallbackMeasurer::default();
        assert_eq!(m.text_width("hello", 16), 35);
        assert_eq!(m.text_width("hello", 32), 70);
        assert_eq!(m.text_width("hello", 14), 30);
        assert_eq!(m.text_width("", 16), 0);
    }

    #[test]
    fn test_fallback_counts_characters_not_bytes() {
        let m = FallbackMeasurer::default();
        assert_eq!(m.text_width("héllo", 16), 35);
    }

    #[test]
    fn test_fallback_degenerate_base() {
        let m = FallbackMeasurer {
            glyph_width: 7,
            base_font_size: 0,
        };
        assert_eq!(m.text_width("hello", 16), 0);
    }

    #[test]
    fn test_closure_is_a_measurer() {
        let fixed = |text: &str, _size: i32| i32::try_from(text.len()).unwrap_or(0) * 10;
        assert_eq!(fixed.text_width("abc", 16), 30);
    }
}
