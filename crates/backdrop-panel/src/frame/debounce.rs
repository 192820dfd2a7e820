//! Debounced committed coordinates
//!
//! Consumers that persist layout or re-render on coordinate changes only
//! want the value once the panel has settled. The debouncer keeps the most
//! recent rectangle and releases it after `delay_ms` without a newer one.

use crate::math::Rect;

#[derive(Clone, Debug)]
pub struct CoordsDebouncer {
    delay_ms: f64,
    latest: Option<(Rect, f64)>,
}

impl CoordsDebouncer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            latest: None,
        }
    }

    /// Record a new value at `now_ms`, restarting the quiet period
    pub fn push(&mut self, rect: Rect, now_ms: f64) {
        self.latest = Some((rect, now_ms));
    }

    /// Release the held value once it has been quiet for the delay
    pub fn poll(&mut self, now_ms: f64) -> Option<Rect> {
        match self.latest {
            Some((rect, at)) if now_ms - at >= self.delay_ms => {
                self.latest = None;
                Some(rect)
            }
            _ => None,
        }
    }

    /// Whether a value is waiting to be released
    pub fn is_pending(&self) -> bool {
        self.latest.is_some()
    }
}
