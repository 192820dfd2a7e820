//! Box geometry sampling
//!
//! Resolves an element's current rectangle from its resolved style, falling
//! back to layout-box metrics (offset plus padding and border) for any
//! property whose value is unset or not a pixel length, e.g. `auto`.

use crate::host::ElementHost;
use crate::math::{Rect, TransformMatrix};
use crate::types::ElementId;

/// Parse a pixel length (`"320px"` or a bare `"320"`)
///
/// Any other unit is rejected so the caller can take the layout-box path.
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    value
        .strip_suffix("px")
        .unwrap_or(value)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Resolved pixel value of `property`, or `0` when it does not parse
fn px_or_zero(host: &dyn ElementHost, id: ElementId, property: &str) -> f64 {
    host.computed_style(id, property)
        .as_deref()
        .and_then(parse_px)
        .unwrap_or(0.0)
}

fn resolved_px(host: &dyn ElementHost, id: ElementId, property: &str) -> Option<f64> {
    host.computed_style(id, property).as_deref().and_then(parse_px)
}

/// Current rectangle of an element
///
/// Returns `None` only when the handle is unbound. Pure read.
pub fn sample_rect(host: &dyn ElementHost, id: ElementId) -> Option<Rect> {
    let layout = host.layout_box(id)?;

    let width = resolved_px(host, id, "width").unwrap_or_else(|| {
        layout.offset_width
            + px_or_zero(host, id, "padding-left")
            + px_or_zero(host, id, "padding-right")
            + px_or_zero(host, id, "border-left-width")
            + px_or_zero(host, id, "border-right-width")
    });
    let height = resolved_px(host, id, "height").unwrap_or_else(|| {
        layout.offset_height
            + px_or_zero(host, id, "padding-top")
            + px_or_zero(host, id, "padding-bottom")
            + px_or_zero(host, id, "border-top-width")
            + px_or_zero(host, id, "border-bottom-width")
    });
    let left = resolved_px(host, id, "left").unwrap_or(layout.offset_left);
    let top = resolved_px(host, id, "top").unwrap_or(layout.offset_top);

    Some(Rect::new(left, top, width, height))
}

/// Transform currently applied to an element
///
/// Unbound handles and unparseable values both read as identity.
pub fn sample_transform(host: &dyn ElementHost, id: ElementId) -> TransformMatrix {
    host.computed_style(id, "transform")
        .map(|value| TransformMatrix::parse(&value))
        .unwrap_or(TransformMatrix::IDENTITY)
}
