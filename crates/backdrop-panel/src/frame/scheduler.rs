//! Frame scheduler
//!
//! Models "run this on the next display refresh" as a single-slot queue.
//! The host requests a refresh callback whenever [`FrameScheduler::schedule`]
//! hands out a handle, then calls [`FrameScheduler::tick`] from that
//! callback with the refresh timestamp. At most one frame is pending at a
//! time; a pending frame runs at most once.

use tracing::trace;

use crate::config::Quality;

/// Minimum spacing between executed ticks under [`Quality::Eco`] (~30 Hz)
pub const ECO_FRAME_INTERVAL_MS: f64 = 33.0;

/// Opaque handle to a scheduled frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Raw value, for hosts that key their own refresh requests by it
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Single-flight frame scheduler
#[derive(Debug)]
pub struct FrameScheduler<W> {
    pending: Option<(FrameHandle, W)>,
    next_handle: u64,
    last_executed_ms: Option<f64>,
    quality: Quality,
}

impl<W> Default for FrameScheduler<W> {
    fn default() -> Self {
        Self::new(Quality::default())
    }
}

impl<W> FrameScheduler<W> {
    /// Create a scheduler with the given throttling policy
    pub fn new(quality: Quality) -> Self {
        Self {
            pending: None,
            next_handle: 1,
            last_executed_ms: None,
            quality,
        }
    }

    /// Change the throttling policy
    pub fn set_quality(&mut self, quality: Quality) {
        self.quality = quality;
    }

    /// Current throttling policy
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Handle of the pending frame, if any
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending.as_ref().map(|(handle, _)| *handle)
    }

    /// Check if a frame is waiting for the next refresh
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Register `work` for the next refresh
    ///
    /// Returns `None` without registering anything when a frame is
    /// already pending.
    pub fn schedule(&mut self, work: W) -> Option<FrameHandle> {
        if self.pending.is_some() {
            return None;
        }
        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;
        self.pending = Some((handle, work));
        trace!(handle = handle.0, "frame scheduled");
        Some(handle)
    }

    /// Replace the work of the pending frame, keeping its handle
    ///
    /// Returns `false` when nothing is pending.
    pub fn coalesce(&mut self, work: W) -> bool {
        match self.pending.as_mut() {
            Some((handle, slot)) => {
                *slot = work;
                trace!(handle = handle.0, "frame coalesced");
                true
            }
            None => false,
        }
    }

    /// Cancel a frame by handle
    ///
    /// Idempotent: `None`, already-fired and superseded handles are ignored.
    pub fn cancel(&mut self, handle: Option<FrameHandle>) -> bool {
        match (handle, self.pending()) {
            (Some(handle), Some(pending)) if handle == pending => {
                self.pending = None;
                trace!(handle = handle.0, "frame cancelled");
                true
            }
            _ => false,
        }
    }

    /// Cancel whatever frame is pending
    pub fn cancel_pending(&mut self) -> Option<FrameHandle> {
        let handle = self.pending();
        self.cancel(handle);
        handle
    }

    /// Display refresh callback
    ///
    /// Takes the pending work out of the slot and returns it for execution.
    /// Under [`Quality::Eco`] a tick arriving less than
    /// [`ECO_FRAME_INTERVAL_MS`] after the previous executed tick is
    /// dropped: the work is discarded and the slot is cleared so a later
    /// pointer move can schedule again.
    pub fn tick(&mut self, now_ms: f64) -> Option<W> {
        let (handle, work) = self.pending.take()?;

        if self.quality.is_throttled() {
            if let Some(last) = self.last_executed_ms {
                if now_ms - last < ECO_FRAME_INTERVAL_MS {
                    trace!(handle = handle.0, elapsed_ms = now_ms - last, "frame dropped");
                    return None;
                }
            }
        }

        self.last_executed_ms = Some(now_ms);
        Some(work)
    }

    /// Timestamp of the last executed tick
    pub fn last_executed_ms(&self) -> Option<f64> {
        self.last_executed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_is_single_flight() {
        let mut scheduler = FrameScheduler::new(Quality::Balanced);
        let handle = scheduler.schedule(1);
        assert!(handle.is_some());
        assert_eq!(scheduler.schedule(2), None);
        assert_eq!(scheduler.pending(), handle);

        assert_eq!(scheduler.tick(16.0), Some(1));
        assert_eq!(scheduler.tick(32.0), None);
    }

    #[test]
    fn test_coalesce_replaces_pending_work() {
        let mut scheduler = FrameScheduler::new(Quality::Balanced);
        assert!(!scheduler.coalesce(0));

        let handle = scheduler.schedule(1);
        assert!(scheduler.coalesce(2));
        assert!(scheduler.coalesce(3));
        assert_eq!(scheduler.pending(), handle);
        assert_eq!(scheduler.tick(16.0), Some(3));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut scheduler = FrameScheduler::new(Quality::Balanced);
        assert!(!scheduler.cancel(None));

        let handle = scheduler.schedule(1);
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert_eq!(scheduler.tick(16.0), None);
    }

    #[test]
    fn test_cancel_stale_handle_keeps_new_frame() {
        let mut scheduler = FrameScheduler::new(Quality::Balanced);
        let first = scheduler.schedule(1);
        assert_eq!(scheduler.tick(16.0), Some(1));

        let second = scheduler.schedule(2);
        assert!(!scheduler.cancel(first));
        assert_eq!(scheduler.pending(), second);
    }

    #[test]
    fn test_eco_drops_fast_ticks() {
        let mut scheduler = FrameScheduler::new(Quality::Eco);

        scheduler.schedule(1);
        assert_eq!(scheduler.tick(100.0), Some(1));

        // 16ms later: dropped, but the slot is free again
        scheduler.schedule(2);
        assert_eq!(scheduler.tick(116.0), None);
        assert!(!scheduler.is_pending());

        scheduler.schedule(3);
        assert_eq!(scheduler.tick(133.0), Some(3));
    }

    #[test]
    fn test_balanced_has_no_floor() {
        let mut scheduler = FrameScheduler::new(Quality::Balanced);
        scheduler.schedule(1);
        assert_eq!(scheduler.tick(100.0), Some(1));
        scheduler.schedule(2);
        assert_eq!(scheduler.tick(101.0), Some(2));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Each registered frame yields its work at most once, and under Eco
        /// executed ticks are never closer than the economy interval
        #[test]
        fn eco_never_exceeds_cap(deltas in proptest::collection::vec(0.0f64..50.0, 1..200)) {
            let mut scheduler = FrameScheduler::new(Quality::Eco);
            let mut now = 0.0;
            let mut executed: Vec<f64> = Vec::new();

            for (i, delta) in deltas.iter().enumerate() {
                now += delta;
                scheduler.schedule(i);
                let ran = scheduler.tick(now);
                prop_assert_eq!(scheduler.tick(now), None);
                if let Some(work) = ran {
                    prop_assert_eq!(work, i);
                    executed.push(now);
                }
            }

            for pair in executed.windows(2) {
                prop_assert!(pair[1] - pair[0] >= ECO_FRAME_INTERVAL_MS);
            }
        }
    }
}
