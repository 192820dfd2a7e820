//! Session state types

use serde::{Deserialize, Serialize};

use crate::config::Quality;
use crate::frame::FrameHandle;
use crate::math::{Rect, Vec2};
use crate::types::{ElementId, PointerId};

/// Kind of gesture a session tracks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Drag,
    Resize,
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionKind::Drag => f.write_str("drag"),
            SessionKind::Resize => f.write_str("resize"),
        }
    }
}

/// Live state of one in-progress drag or resize
///
/// `kind`, `start_rect` and `pointer_offset` are fixed at begin; updates
/// only read them.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    kind: SessionKind,
    start_rect: Rect,
    pointer_offset: Vec2,
    pointer_id: PointerId,
    handle: ElementId,
    quality: Quality,
    restrict_bounds: bool,
    preview_on_overlay: bool,
    pub(crate) last_pointer: Vec2,
}

impl Session {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        kind: SessionKind,
        start_rect: Rect,
        pointer: Vec2,
        pointer_id: PointerId,
        handle: ElementId,
        quality: Quality,
        restrict_bounds: bool,
        has_overlay: bool,
    ) -> Self {
        // Resize deltas are measured from the raw pointer-down point
        let pointer_offset = match kind {
            SessionKind::Drag => pointer - start_rect.origin(),
            SessionKind::Resize => pointer,
        };
        Self {
            kind,
            start_rect,
            pointer_offset,
            pointer_id,
            handle,
            quality,
            restrict_bounds,
            preview_on_overlay: kind == SessionKind::Resize
                && has_overlay
                && quality.hides_content_on_resize(),
            last_pointer: pointer,
        }
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn start_rect(&self) -> Rect {
        self.start_rect
    }

    pub fn pointer_offset(&self) -> Vec2 {
        self.pointer_offset
    }

    pub fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }

    /// Element holding pointer capture for this session
    pub fn handle(&self) -> ElementId {
        self.handle
    }

    /// Quality copied from configuration at begin
    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn restrict_bounds(&self) -> bool {
        self.restrict_bounds
    }

    /// Whether live resize writes go to the overlay instead of the target
    pub fn preview_on_overlay(&self) -> bool {
        self.preview_on_overlay
    }

    /// Most recent pointer position seen by this session
    pub fn last_pointer(&self) -> Vec2 {
        self.last_pointer
    }
}

/// Result of feeding a pointer move to a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No active session, or the move came from another pointer
    Ignored,
    /// A new frame was scheduled; the host should request a refresh callback
    Scheduled(FrameHandle),
    /// A frame was already pending; its pointer sample was replaced
    Coalesced(FrameHandle),
}

impl UpdateOutcome {
    /// Frame the host must request a refresh for, if any
    pub fn scheduled(self) -> Option<FrameHandle> {
        match self {
            UpdateOutcome::Scheduled(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Final geometry of a finished session
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub kind: SessionKind,
    pub rect: Rect,
}
