//! Resolved style lookups and length parsing.
//!
//! Styles arrive already resolved but unparsed. Layout understands exactly
//! one length syntax: a non-negative integer, optionally followed by `px`.

use sprig_common::warning::warn_once;
use sprig_dom::{DomTree, NodeId, ResolvedStyle};

/// Parse a length such as `"120"` or `" 120PX "` into pixels.
///
/// Missing, empty, negative, overflowing or otherwise malformed values
/// yield `default`. A number followed by any unit other than `px` also
/// yields `default` and is reported once through
/// [`warn_once`](sprig_common::warning::warn_once).
///
/// ```
/// use sprig_layout::parse_dimension;
///
/// assert_eq!(parse_dimension(Some("120px"), 0), 120);
/// assert_eq!(parse_dimension(Some("-4"), 7), 7);
/// assert_eq!(parse_dimension(None, 7), 7);
/// ```
#[must_use]
pub fn parse_dimension(value: Option<&str>, default: i32) -> i32 {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return default;
    };

    let digits_end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(digits_end);
    let Ok(px) = digits.parse::<i32>() else {
        return default;
    };

    if unit.is_empty() || unit.eq_ignore_ascii_case("px") {
        px
    } else {
        if unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%') {
            warn_once("Layout", &format!("unsupported unit '{unit}' in '{value}'"));
        }
        default
    }
}

/// Read-only view of the layout-relevant part of a node's resolved style.
///
/// Each accessor yields `Some` only for a well-formed, strictly positive
/// length, so callers can treat `None` as "inherit" or "no override".
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleAccessor<'a> {
    style: Option<&'a ResolvedStyle>,
}

impl<'a> StyleAccessor<'a> {
    /// Wrap an optional style record.
    #[must_use]
    pub const fn new(style: Option<&'a ResolvedStyle>) -> Self {
        Self { style }
    }

    /// The style attached to `id` in `tree`, if any.
    #[must_use]
    pub fn of(tree: &'a DomTree, id: NodeId) -> Self {
        Self::new(tree.style(id))
    }

    fn positive(value: Option<&String>) -> Option<i32> {
        let px = parse_dimension(value.map(String::as_str), 0);
        (px > 0).then_some(px)
    }

    /// Explicit width override.
    #[must_use]
    pub fn width(&self) -> Option<i32> {
        Self::positive(self.style.and_then(|s| s.width.as_ref()))
    }

    /// Explicit height. Exposed for renderers; block heights always come
    /// from content.
    #[must_use]
    pub fn height(&self) -> Option<i32> {
        Self::positive(self.style.and_then(|s| s.height.as_ref()))
    }

    /// Explicit font-size override.
    #[must_use]
    pub fn font_size(&self) -> Option<i32> {
        Self::positive(self.style.and_then(|s| s.font_size.as_ref()))
    }
}
