//! Text measurement backed by fontdue glyph metrics.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use fontdue::{Font, FontSettings};
use sprig_common::warning::warn_once;
use sprig_layout::TextMeasurer;

/// Common system font paths to search for a default (regular) font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNS.ttf",
    "/Library/Fonts/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// Measures text with a real font's advance widths.
///
/// Only `Font::metrics()` is queried; nothing is rasterized.
pub struct FontdueMeasurer {
    font: Font,
}

impl FontdueMeasurer {
    /// Load the font file at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a font fontdue understands.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data =
            std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| anyhow!("parsing font {}: {e}", path.display()))?;
        Ok(Self { font })
    }

    /// Load the first usable font from the usual system locations.
    ///
    /// Returns `None` (and warns once) if none is found, in which case the
    /// caller falls back to fixed-width estimates.
    #[must_use]
    pub fn system() -> Option<Self> {
        let font = FONT_SEARCH_PATHS.iter().find_map(|path| {
            let data = std::fs::read(path).ok()?;
            Font::from_bytes(data, FontSettings::default()).ok()
        });
        if font.is_none() {
            warn_once(
                "Fonts",
                "no system font found, using fixed-width text measurement",
            );
        }
        font.map(|font| Self { font })
    }
}

impl TextMeasurer for FontdueMeasurer {
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn text_width(&self, text: &str, font_size: i32) -> i32 {
        let px = font_size.max(0) as f32;
        let width: f32 = text
            .chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.font.metrics(ch, px).advance_width)
            .sum();
        width.round() as i32
    }
}
