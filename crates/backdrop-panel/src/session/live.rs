//! Live geometry for an in-flight session
//!
//! Drag is a translation layered on the start rectangle; resize is a scale
//! applied to it from the top-left corner. Neither touches layout until
//! the session commits.

use super::state::{Session, SessionKind};
use crate::math::{clamp_to_viewport, Rect, Size, Vec2};

/// Transform to layer on the start rectangle for one pointer sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LiveGeometry {
    /// Offset from the start origin
    Translate(Vec2),
    /// Per-axis size factor
    Scale { x: f64, y: f64 },
}

impl LiveGeometry {
    /// Rectangle this transform produces visually
    pub fn apply(&self, start: &Rect) -> Rect {
        match *self {
            LiveGeometry::Translate(delta) => start.translated(delta),
            LiveGeometry::Scale { x, y } => start.scaled(x, y),
        }
    }
}

/// Compute the live transform for `pointer`
///
/// Drag is clamped to `viewport` when the session restricts bounds.
/// Resize is never clamped.
pub fn live_geometry(session: &Session, pointer: Vec2, viewport: Size) -> LiveGeometry {
    let start = session.start_rect();
    let offset = session.pointer_offset();

    match session.kind() {
        SessionKind::Drag => {
            let delta = pointer - offset - start.origin();
            if !session.restrict_bounds() {
                return LiveGeometry::Translate(delta);
            }
            let proposed = start.origin() + delta;
            let clamped = clamp_to_viewport(
                proposed.x,
                proposed.y,
                start.width,
                start.height,
                viewport.width,
                viewport.height,
            );
            LiveGeometry::Translate(clamped - start.origin())
        }
        SessionKind::Resize => LiveGeometry::Scale {
            x: scale_factor(pointer.x - offset.x, start.width),
            y: scale_factor(pointer.y - offset.y, start.height),
        },
    }
}

/// `(delta + len) / len`, floored at 0 so dragging the grip past the
/// origin collapses the preview instead of mirroring it. A zero-length
/// axis cannot scale and stays at 1.
fn scale_factor(delta: f64, len: f64) -> f64 {
    if len == 0.0 {
        return 1.0;
    }
    ((delta + len) / len).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Quality;
    use crate::types::ElementId;

    const VIEWPORT: Size = Size::new(1024.0, 768.0);

    fn session(kind: SessionKind, pointer: Vec2, restrict: bool) -> Session {
        Session::new(
            kind,
            Rect::new(100.0, 100.0, 320.0, 240.0),
            pointer,
            1,
            ElementId(1),
            Quality::Balanced,
            restrict,
            false,
        )
    }

    #[test]
    fn test_drag_translation_is_relative_to_start() {
        let s = session(SessionKind::Drag, Vec2::new(110.0, 110.0), true);
        assert_eq!(s.pointer_offset(), Vec2::new(10.0, 10.0));

        let live = live_geometry(&s, Vec2::new(210.0, 160.0), VIEWPORT);
        assert_eq!(live, LiveGeometry::Translate(Vec2::new(100.0, 50.0)));
        assert_eq!(
            live.apply(&s.start_rect()),
            Rect::new(200.0, 150.0, 320.0, 240.0)
        );
    }

    #[test]
    fn test_drag_clamped_to_viewport() {
        let s = session(SessionKind::Drag, Vec2::new(110.0, 110.0), true);
        let live = live_geometry(&s, Vec2::new(-200.0, 2000.0), VIEWPORT);
        // Left pins at 0, top pins at 768 - 240
        assert_eq!(live, LiveGeometry::Translate(Vec2::new(-100.0, 428.0)));
    }

    #[test]
    fn test_drag_unrestricted() {
        let s = session(SessionKind::Drag, Vec2::new(110.0, 110.0), false);
        let live = live_geometry(&s, Vec2::new(-200.0, 2000.0), VIEWPORT);
        assert_eq!(live, LiveGeometry::Translate(Vec2::new(-310.0, 1890.0)));
    }

    #[test]
    fn test_resize_scale_formula() {
        let s = session(SessionKind::Resize, Vec2::new(100.0, 100.0), true);
        assert_eq!(s.pointer_offset(), Vec2::new(100.0, 100.0));

        // No movement is the identity scale
        assert_eq!(
            live_geometry(&s, Vec2::new(100.0, 100.0), VIEWPORT),
            LiveGeometry::Scale { x: 1.0, y: 1.0 }
        );

        let live = live_geometry(&s, Vec2::new(420.0, 340.0), VIEWPORT);
        let LiveGeometry::Scale { x, y } = live else {
            panic!("expected scale");
        };
        assert!((x - (420.0 - 100.0 + 320.0) / 320.0).abs() < 1e-9);
        assert!((y - (340.0 - 100.0 + 240.0) / 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_resize_is_not_clamped() {
        let s = session(SessionKind::Resize, Vec2::new(100.0, 100.0), true);
        let live = live_geometry(&s, Vec2::new(5000.0, 5000.0), VIEWPORT);
        let rect = live.apply(&s.start_rect());
        assert!(rect.width > VIEWPORT.width);
    }

    #[test]
    fn test_resize_past_origin_collapses_instead_of_mirroring() {
        let s = session(SessionKind::Resize, Vec2::new(420.0, 340.0), true);
        // Grip dragged 420px left and 340px up of a 320x240 box
        let live = live_geometry(&s, Vec2::new(0.0, 0.0), VIEWPORT);
        assert_eq!(live, LiveGeometry::Scale { x: 0.0, y: 0.0 });
        assert_eq!(
            live.apply(&s.start_rect()),
            Rect::new(100.0, 100.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_zero_size_axis_does_not_divide_by_zero() {
        assert_eq!(scale_factor(50.0, 0.0), 1.0);
    }
}
