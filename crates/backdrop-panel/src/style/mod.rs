//! Style writing
//!
//! Declarations for one element are collected into an ordered set and
//! serialized into a single style attribute write per frame, so a frame
//! never causes more than one style invalidation per element.
//!
//! Two shapes of write are produced:
//! - **Commit**: explicit `height/left/top/width`, written at mount and at
//!   the end of a gesture
//! - **Live**: the start rectangle held fixed plus a `transform`
//!   (`translateX/translateY` for drag, `scale` for resize), so continuous
//!   updates never touch layout-affecting properties

mod declarations;

pub use declarations::{format_number, format_ratio, StyleDeclarations, TransformList};

use tracing::warn;

use crate::host::ElementHost;
use crate::math::{Rect, Vec2};
use crate::types::ElementId;

/// Serialize and write declarations in one style attribute write
///
/// Returns `false` when the element is unbound; nothing is written.
pub fn write_declarations(
    host: &mut dyn ElementHost,
    id: ElementId,
    declarations: &StyleDeclarations,
) -> bool {
    let written = host.write_style(id, &declarations.to_css_text());
    if !written {
        warn!(element = id.0, "style write skipped: element not bound");
    }
    written
}

/// Explicit layout coordinates, rounded to whole pixels
pub fn commit_declarations(rect: &Rect) -> StyleDeclarations {
    let rect = rect.rounded();
    let mut decls = StyleDeclarations::new();
    decls.set_px("height", rect.height);
    decls.set_px("left", rect.left);
    decls.set_px("top", rect.top);
    decls.set_px("width", rect.width);
    decls
}

/// Start rectangle held in place with a translation layered on top
pub fn live_drag_declarations(start: &Rect, translate: Vec2) -> StyleDeclarations {
    let mut decls = held_rect_declarations(start);
    let mut transform = TransformList::new();
    transform.set("translateX", Some(format!("{}px", format_number(translate.x))));
    transform.set("translateY", Some(format!("{}px", format_number(translate.y))));
    decls.set("transform", transform.to_css_value());
    decls
}

/// Start rectangle held in place and scaled from its top-left corner
pub fn live_resize_declarations(start: &Rect, scale_x: f64, scale_y: f64) -> StyleDeclarations {
    let mut decls = held_rect_declarations(start);
    decls.set("transform-origin", Some("0 0".to_string()));
    decls.set("transform", Some(scale_value(scale_x, scale_y)));
    decls
}

/// Overlay made visible at `opacity`, with an optional preview scale
pub fn overlay_declarations(opacity: f64, scale: Option<(f64, f64)>) -> StyleDeclarations {
    let mut decls = StyleDeclarations::new();
    decls.set("display", Some("block".to_string()));
    decls.set("opacity", Some(format_number(opacity)));
    decls.set("transform-origin", Some("0 0".to_string()));
    decls.set("transform", scale.map(|(x, y)| scale_value(x, y)));
    decls
}

fn held_rect_declarations(start: &Rect) -> StyleDeclarations {
    let mut decls = StyleDeclarations::new();
    decls.set_px("height", start.height);
    decls.set_px("left", start.left);
    decls.set_px("top", start.top);
    decls.set_px("width", start.width);
    decls
}

fn scale_value(scale_x: f64, scale_y: f64) -> String {
    let mut transform = TransformList::new();
    transform.set(
        "scale",
        Some(format!("{}, {}", format_ratio(scale_x), format_ratio(scale_y))),
    );
    transform.to_css_value().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    #[test]
    fn test_commit_declarations_round() {
        let decls = commit_declarations(&Rect::new(200.4, 149.6, 320.0, 240.0));
        assert_eq!(
            decls.to_css_text(),
            "height: 240px; left: 200px; top: 150px; width: 320px"
        );
    }

    #[test]
    fn test_live_drag_declarations() {
        let decls = live_drag_declarations(
            &Rect::new(100.0, 100.0, 320.0, 240.0),
            Vec2::new(100.0, 50.5),
        );
        assert_eq!(
            decls.to_css_text(),
            "height: 240px; left: 100px; top: 100px; width: 320px; \
             transform: translateX(100px) translateY(50.5px)"
        );
    }

    #[test]
    fn test_live_resize_declarations() {
        let decls = live_resize_declarations(&Rect::new(0.0, 0.0, 320.0, 240.0), 2.0, 1.5);
        assert_eq!(decls.get("transform"), Some("scale(2, 1.5)"));
        assert_eq!(decls.get("transform-origin"), Some("0 0"));
    }

    #[test]
    fn test_overlay_declarations_without_scale_omit_transform() {
        let decls = overlay_declarations(0.4, None);
        assert_eq!(
            decls.to_css_text(),
            "display: block; opacity: 0.4; transform-origin: 0 0"
        );
    }

    #[test]
    fn test_write_declarations_single_write() {
        let mut host = MemoryHost::default();
        let id = host.create_element();
        let decls = commit_declarations(&Rect::default());

        assert!(write_declarations(&mut host, id, &decls));
        assert_eq!(host.write_count(id), 1);
        assert_eq!(host.inline_property(id, "width"), Some("320px"));

        host.remove_element(id);
        assert!(!write_declarations(&mut host, id, &decls));
    }
}
