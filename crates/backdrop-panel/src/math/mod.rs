//! Core geometry types for panel interaction
//!
//! Plain 2D values for pointer offsets, panel rectangles and CSS transforms,
//! plus the viewport clamp applied to drag.

mod bounds;
mod rect;
mod transform;

pub use bounds::clamp_to_viewport;
pub use rect::{Rect, Size, Vec2};
pub use transform::TransformMatrix;
