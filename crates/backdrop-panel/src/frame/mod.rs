//! Per-refresh scheduling
//!
//! - [`FrameScheduler`]: single-slot pending frame with cancel and an economy cap
//! - [`CoordsDebouncer`]: releases committed coordinates after a quiet period

mod debounce;
mod scheduler;

pub use debounce::CoordsDebouncer;
pub use scheduler::{FrameHandle, FrameScheduler, ECO_FRAME_INTERVAL_MS};
