//! Core type definitions for the panel engine
//!
//! Element handles and pointer samples shared by every module.

use serde::{Deserialize, Serialize};

/// Opaque element handle
///
/// Elements are never referenced directly by the engine. A handle is
/// resolved through the [`ElementHost`](crate::ElementHost) lookup table on
/// every access, so a panel that unmounts mid-gesture simply stops resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pointer identifier as reported by DOM `PointerEvent.pointerId`
pub type PointerId = i32;

/// A pointer-down/move/up sample in viewport (client) coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub x: f64,
    pub y: f64,
    pub pointer_id: PointerId,
    /// Event timestamp in ms (DOM `Event.timeStamp`)
    #[serde(default)]
    pub time_ms: f64,
}

impl PointerInput {
    pub const fn new(x: f64, y: f64, pointer_id: PointerId) -> Self {
        Self {
            x,
            y,
            pointer_id,
            time_ms: 0.0,
        }
    }

    /// Same sample stamped with an event time
    pub const fn at(self, time_ms: f64) -> Self {
        Self { time_ms, ..self }
    }
}
