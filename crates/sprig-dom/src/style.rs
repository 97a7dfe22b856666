//! Resolved style record attached to elements by the styling pass.

use serde::Serialize;

/// Style values already resolved for one node, kept as unparsed strings.
///
/// Layout reads `width`, `height` and `font_size` (bare integers or `Npx`).
/// `background` and `text_align` are for the renderer; layout carries them
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedStyle {
    /// e.g. `"600px"`
    pub width: Option<String>,
    /// e.g. `"30px"`
    pub height: Option<String>,
    /// e.g. `"24px"`
    pub font_size: Option<String>,
    /// e.g. `"#FFCC00"`
    pub background: Option<String>,
    /// `"left"`, `"center"` or `"right"`
    pub text_align: Option<String>,
}

impl ResolvedStyle {
    /// Build a record from an inline declaration list such as the value of a
    /// `style` attribute: `"width: 120px; font-size: 20px"`.
    ///
    /// Declarations are applied in order, so the last one for a property
    /// wins. Unknown properties and declarations without a `:` are ignored.
    #[must_use]
    pub fn parse_inline(declarations: &str) -> Self {
        let mut style = Self::default();
        for declaration in declarations.split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let slot = match property.trim().to_ascii_lowercase().as_str() {
                "width" => &mut style.width,
                "height" => &mut style.height,
                "font-size" => &mut style.font_size,
                "background" | "background-color" => &mut style.background,
                "text-align" => &mut style.text_align,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        style
    }

    /// True if no property is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.font_size.is_none()
            && self.background.is_none()
            && self.text_align.is_none()
    }
}
