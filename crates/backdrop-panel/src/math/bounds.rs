//! Viewport clamping for dragged panels

use super::Vec2;

/// Restrict a proposed panel origin so the panel stays inside the viewport
///
/// Each axis is clamped independently to `[0, viewport - box]`. When the
/// box is larger than the viewport on an axis, that axis pins to `0` and
/// the panel overflows to the right/bottom instead of going negative.
pub fn clamp_to_viewport(
    proposed_left: f64,
    proposed_top: f64,
    box_width: f64,
    box_height: f64,
    viewport_width: f64,
    viewport_height: f64,
) -> Vec2 {
    Vec2::new(
        clamp_axis(proposed_left, box_width, viewport_width),
        clamp_axis(proposed_top, box_height, viewport_height),
    )
}

fn clamp_axis(proposed: f64, box_len: f64, viewport_len: f64) -> f64 {
    let max = (viewport_len - box_len).max(0.0);
    proposed.clamp(0.0, max)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Clamped origin always lies in [0, max(0, viewport - box)]
        #[test]
        fn clamp_stays_in_range(
            left in -5000.0f64..5000.0,
            top in -5000.0f64..5000.0,
            w in 0.0f64..3000.0,
            h in 0.0f64..3000.0,
            vw in 1.0f64..3000.0,
            vh in 1.0f64..3000.0,
        ) {
            let p = clamp_to_viewport(left, top, w, h, vw, vh);
            prop_assert!(p.x >= 0.0 && p.x <= (vw - w).max(0.0));
            prop_assert!(p.y >= 0.0 && p.y <= (vh - h).max(0.0));
        }

        /// Origins already inside the viewport are untouched
        #[test]
        fn clamp_is_identity_inside(
            w in 0.0f64..500.0,
            h in 0.0f64..500.0,
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let (vw, vh) = (1024.0, 768.0);
            let left = fx * (vw - w);
            let top = fy * (vh - h);
            let p = clamp_to_viewport(left, top, w, h, vw, vh);
            prop_assert_eq!(p, Vec2::new(left, top));
        }
    }
}
