//! Drag/resize interaction session
//!
//! A per-panel state machine with two states:
//!
//! ```text
//!   Idle ──begin(Drag)──▶ Active(Drag) ──end──▶ Idle
//!   Idle ──begin(Resize)─▶ Active(Resize) ─end─▶ Idle
//! ```
//!
//! `begin` while active is ignored. `update` schedules (or coalesces into)
//! a single pending frame; `run_frame` writes the live transform; `end`
//! cancels the pending frame, commits the resolved rectangle back into
//! layout properties and returns to idle.
//!
//! ## Render targets
//!
//! Live writes go to the target element, except for resize under a quality
//! below [`Quality::Quality`] with an overlay present: the overlay is
//! revealed at low opacity and carries the scale instead, so panel content
//! is not repainted on every frame.

mod live;
mod state;

pub use live::{live_geometry, LiveGeometry};
pub use state::{Commit, Session, SessionKind, UpdateOutcome};

use tracing::debug;

use crate::config::{PanelConfig, Quality};
use crate::frame::FrameScheduler;
use crate::geometry::{sample_rect, sample_transform};
use crate::host::ElementHost;
use crate::math::{Rect, Vec2};
use crate::style::{
    commit_declarations, live_drag_declarations, live_resize_declarations, overlay_declarations,
    write_declarations, StyleDeclarations,
};
use crate::types::{ElementId, PointerId, PointerInput};

/// Session owner for one panel
#[derive(Debug)]
pub struct InteractionSession {
    target: ElementId,
    overlay: Option<ElementId>,
    active: Option<Session>,
    frames: FrameScheduler<Vec2>,
    set_styles: bool,
    overlay_opacity: f64,
}

impl InteractionSession {
    /// Create an idle session for `target`, with an optional resize overlay
    pub fn new(target: ElementId, overlay: Option<ElementId>, config: &PanelConfig) -> Self {
        Self {
            target,
            overlay,
            active: None,
            frames: FrameScheduler::new(config.quality),
            set_styles: config.set_styles,
            overlay_opacity: config.overlay_opacity,
        }
    }

    /// Active session, if any
    pub fn session(&self) -> Option<&Session> {
        self.active.as_ref()
    }

    /// Check if a drag or resize is in progress
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Frame scheduler driving live writes
    pub fn frames(&self) -> &FrameScheduler<Vec2> {
        &self.frames
    }

    /// Start a gesture
    ///
    /// Ignored (returns `false`) while another session is active, and when
    /// the target no longer resolves.
    pub fn begin(
        &mut self,
        host: &mut dyn ElementHost,
        event: PointerInput,
        handle: ElementId,
        kind: SessionKind,
        quality: Quality,
        restrict_bounds: bool,
    ) -> bool {
        if let Some(active) = &self.active {
            debug!(
                requested = %kind,
                active = %active.kind(),
                pointer_id = event.pointer_id,
                "begin ignored: session already active"
            );
            return false;
        }

        self.frames.cancel_pending();

        let Some(start_rect) = sample_rect(host, self.target) else {
            debug!(element = self.target.0, "begin skipped: target not bound");
            return false;
        };

        host.set_pointer_capture(handle, event.pointer_id);
        self.frames.set_quality(quality);

        let session = Session::new(
            kind,
            start_rect,
            Vec2::new(event.x, event.y),
            event.pointer_id,
            handle,
            quality,
            restrict_bounds,
            self.overlay.is_some(),
        );

        if self.set_styles {
            write_declarations(host, self.target, &commit_declarations(&start_rect));
            if let (true, Some(overlay)) = (session.preview_on_overlay(), self.overlay) {
                write_declarations(
                    host,
                    overlay,
                    &overlay_declarations(self.overlay_opacity, None),
                );
            }
        }

        debug!(
            kind = %kind,
            quality = %quality,
            left = start_rect.left,
            top = start_rect.top,
            width = start_rect.width,
            height = start_rect.height,
            "session started"
        );
        self.active = Some(session);
        true
    }

    /// Feed a pointer move
    ///
    /// At most one frame is pending at a time. Moves arriving while a frame
    /// is pending replace its pointer sample, so the frame renders the
    /// latest position.
    pub fn update(&mut self, event: PointerInput) -> UpdateOutcome {
        let Some(session) = self.active.as_mut() else {
            return UpdateOutcome::Ignored;
        };
        if session.pointer_id() != event.pointer_id {
            return UpdateOutcome::Ignored;
        }

        let pointer = Vec2::new(event.x, event.y);
        session.last_pointer = pointer;

        if self.frames.coalesce(pointer) {
            return self
                .frames
                .pending()
                .map_or(UpdateOutcome::Ignored, UpdateOutcome::Coalesced);
        }
        self.frames
            .schedule(pointer)
            .map_or(UpdateOutcome::Ignored, UpdateOutcome::Scheduled)
    }

    /// Display refresh callback; returns whether a live write happened
    pub fn run_frame(&mut self, host: &mut dyn ElementHost, now_ms: f64) -> bool {
        let Some(pointer) = self.frames.tick(now_ms) else {
            return false;
        };
        let Some(session) = self.active.as_ref() else {
            return false;
        };
        let live = live_geometry(session, pointer, host.viewport());
        self.write_live(host, session, live)
    }

    /// Finish the gesture with a pointer-up from the session's pointer
    pub fn end(&mut self, host: &mut dyn ElementHost, event: PointerInput) -> Option<Commit> {
        match &self.active {
            Some(session) if session.pointer_id() == event.pointer_id => {}
            _ => return None,
        }
        self.finish(host, Vec2::new(event.x, event.y))
    }

    /// Finish the gesture after the handle lost pointer capture
    ///
    /// Commits at the last pointer position the session saw.
    pub fn lost_pointer_capture(
        &mut self,
        host: &mut dyn ElementHost,
        pointer_id: PointerId,
    ) -> Option<Commit> {
        let last = match &self.active {
            Some(session) if session.pointer_id() == pointer_id => session.last_pointer(),
            _ => return None,
        };
        self.finish(host, last)
    }

    fn finish(&mut self, host: &mut dyn ElementHost, pointer: Vec2) -> Option<Commit> {
        let session = self.active.take()?;

        host.release_pointer_capture(session.handle(), session.pointer_id());
        self.frames.cancel_pending();

        // Render the final position synchronously so the commit reflects
        // it even when the last move's frame never ran.
        let live = live_geometry(&session, pointer, host.viewport());
        let rendered = self.write_live(host, &session, live);

        let rect = if rendered {
            self.resolve_rendered(host, &session)
        } else {
            live.apply(&session.start_rect())
        }
        .rounded();

        if self.set_styles {
            write_declarations(host, self.target, &commit_declarations(&rect));
            if let (true, Some(overlay)) = (session.preview_on_overlay(), self.overlay) {
                write_declarations(host, overlay, &StyleDeclarations::new());
            }
        }

        debug!(
            kind = %session.kind(),
            left = rect.left,
            top = rect.top,
            width = rect.width,
            height = rect.height,
            "session committed"
        );
        Some(Commit {
            kind: session.kind(),
            rect,
        })
    }

    /// Re-sample the rendered result: layout rectangle plus residual transform
    fn resolve_rendered(&self, host: &dyn ElementHost, session: &Session) -> Rect {
        let base = sample_rect(host, self.target).unwrap_or(session.start_rect());
        match session.kind() {
            SessionKind::Drag => {
                let m = sample_transform(host, self.target);
                base.translated(Vec2::new(m.translate_x, m.translate_y))
            }
            SessionKind::Resize => {
                let carrier = match (session.preview_on_overlay(), self.overlay) {
                    (true, Some(overlay)) => overlay,
                    _ => self.target,
                };
                let m = sample_transform(host, carrier);
                base.scaled(m.scale_x, m.scale_y)
            }
        }
    }

    fn write_live(&self, host: &mut dyn ElementHost, session: &Session, live: LiveGeometry) -> bool {
        if !self.set_styles {
            return false;
        }
        let start = session.start_rect();
        match (live, session.preview_on_overlay(), self.overlay) {
            (LiveGeometry::Translate(delta), _, _) => {
                write_declarations(host, self.target, &live_drag_declarations(&start, delta))
            }
            (LiveGeometry::Scale { x, y }, true, Some(overlay)) => write_declarations(
                host,
                overlay,
                &overlay_declarations(self.overlay_opacity, Some((x, y))),
            ),
            (LiveGeometry::Scale { x, y }, _, _) => {
                write_declarations(host, self.target, &live_resize_declarations(&start, x, y))
            }
        }
    }
}
