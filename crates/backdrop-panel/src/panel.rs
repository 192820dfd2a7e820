//! Host panel
//!
//! A [`Panel`] is one movable, resizable window surface. It owns its
//! configuration, its named drag/resize handles and its
//! [`InteractionSession`]; nothing is shared between panels.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{PanelConfig, Quality};
use crate::error::{PanelError, PanelResult};
use crate::frame::CoordsDebouncer;
use crate::host::ElementHost;
use crate::math::Rect;
use crate::session::{Commit, InteractionSession, Session, SessionKind, UpdateOutcome};
use crate::style::{commit_declarations, write_declarations};
use crate::types::{ElementId, PointerId, PointerInput};

/// Movable, resizable window panel
#[derive(Debug)]
pub struct Panel {
    target: ElementId,
    overlay: Option<ElementId>,
    config: PanelConfig,
    drag_handles: BTreeMap<String, ElementId>,
    resize_handles: BTreeMap<String, ElementId>,
    session: InteractionSession,
    coords: Rect,
    settled: CoordsDebouncer,
}

impl Panel {
    /// Create a panel rendering into `target`, with an optional resize overlay
    pub fn new(target: ElementId, overlay: Option<ElementId>, config: PanelConfig) -> Self {
        Self {
            target,
            overlay,
            session: InteractionSession::new(target, overlay, &config),
            coords: config.initial_coords,
            settled: CoordsDebouncer::new(config.debounce_ms),
            drag_handles: BTreeMap::new(),
            resize_handles: BTreeMap::new(),
            config,
        }
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn overlay(&self) -> Option<ElementId> {
        self.overlay
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Last committed coordinates
    pub fn coords(&self) -> Rect {
        self.coords
    }

    /// Active session, if any
    pub fn session(&self) -> Option<&Session> {
        self.session.session()
    }

    /// Check if a drag or resize is in progress
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Change quality for future sessions
    ///
    /// A session already in progress keeps the quality it started with.
    pub fn set_quality(&mut self, quality: Quality) {
        self.config.quality = quality;
    }

    /// Register a named drag handle
    pub fn add_drag_handle(&mut self, name: &str, id: ElementId) -> PanelResult<()> {
        insert_handle(&mut self.drag_handles, name, id)
    }

    /// Register a named resize handle
    pub fn add_resize_handle(&mut self, name: &str, id: ElementId) -> PanelResult<()> {
        insert_handle(&mut self.resize_handles, name, id)
    }

    /// Remove a named handle; returns the element it pointed at
    pub fn remove_handle(&mut self, kind: SessionKind, name: &str) -> Option<ElementId> {
        self.handles_mut(kind).remove(name)
    }

    /// Resolve a handle name
    pub fn handle(&self, kind: SessionKind, name: &str) -> Option<ElementId> {
        let handles = match kind {
            SessionKind::Drag => &self.drag_handles,
            SessionKind::Resize => &self.resize_handles,
        };
        handles.get(name).copied()
    }

    /// Handle names registered for `kind`, in name order
    pub fn handle_names(&self, kind: SessionKind) -> Vec<&str> {
        let handles = match kind {
            SessionKind::Drag => &self.drag_handles,
            SessionKind::Resize => &self.resize_handles,
        };
        handles.keys().map(String::as_str).collect()
    }

    /// Write the initial coordinates and seed committed state
    ///
    /// Fails with [`PanelError::ElementNotBound`] when the target does not
    /// resolve on `host`.
    pub fn mount(&mut self, host: &mut dyn ElementHost) -> PanelResult<()> {
        if !host.is_bound(self.target) {
            return Err(PanelError::ElementNotBound(self.target));
        }
        self.coords = self.config.initial_coords;
        if self.config.set_styles {
            write_declarations(host, self.target, &commit_declarations(&self.coords));
        }
        debug!(element = self.target.0, "panel mounted");
        Ok(())
    }

    /// Pointer-down on a named handle
    ///
    /// `Ok(false)` when the press was ignored because a session is already
    /// running or the panel's element is gone.
    pub fn pointer_down(
        &mut self,
        host: &mut dyn ElementHost,
        kind: SessionKind,
        name: &str,
        event: PointerInput,
    ) -> PanelResult<bool> {
        let handle = self
            .handle(kind, name)
            .ok_or_else(|| PanelError::UnknownHandle(name.to_string()))?;
        Ok(self.session.begin(
            host,
            event,
            handle,
            kind,
            self.config.quality,
            self.config.restrict_bounds,
        ))
    }

    /// Pointer-move anywhere while a session is active
    pub fn pointer_move(&mut self, event: PointerInput) -> UpdateOutcome {
        self.session.update(event)
    }

    /// Display refresh callback with the refresh timestamp
    pub fn run_frame(&mut self, host: &mut dyn ElementHost, now_ms: f64) -> bool {
        self.session.run_frame(host, now_ms)
    }

    /// Pointer-up; returns the committed geometry when a session ended
    pub fn pointer_up(&mut self, host: &mut dyn ElementHost, event: PointerInput) -> Option<Commit> {
        let commit = self.session.end(host, event)?;
        self.record(commit, event.time_ms);
        Some(commit)
    }

    /// Pointer capture was lost (e.g. the handle unmounted or the browser
    /// cancelled the pointer); ends the session at its last position
    pub fn lost_pointer_capture(
        &mut self,
        host: &mut dyn ElementHost,
        pointer_id: PointerId,
        now_ms: f64,
    ) -> Option<Commit> {
        let commit = self.session.lost_pointer_capture(host, pointer_id)?;
        self.record(commit, now_ms);
        Some(commit)
    }

    /// Committed coordinates once they have been stable for `debounce_ms`
    pub fn poll_settled(&mut self, now_ms: f64) -> Option<Rect> {
        self.settled.poll(now_ms)
    }

    fn record(&mut self, commit: Commit, now_ms: f64) {
        self.coords = commit.rect;
        self.settled.push(commit.rect, now_ms);
    }

    fn handles_mut(&mut self, kind: SessionKind) -> &mut BTreeMap<String, ElementId> {
        match kind {
            SessionKind::Drag => &mut self.drag_handles,
            SessionKind::Resize => &mut self.resize_handles,
        }
    }
}

fn insert_handle(
    handles: &mut BTreeMap<String, ElementId>,
    name: &str,
    id: ElementId,
) -> PanelResult<()> {
    if handles.contains_key(name) {
        return Err(PanelError::DuplicateHandle(name.to_string()));
    }
    handles.insert(name.to_string(), id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn panel_with_handles(host: &mut MemoryHost, config: PanelConfig) -> Panel {
        let target = host.create_element();
        let overlay = host.create_element();
        let title = host.create_element();
        let grip = host.create_element();
        let mut panel = Panel::new(target, Some(overlay), config);
        panel.add_drag_handle("main", title).unwrap();
        panel.add_resize_handle("main", grip).unwrap();
        panel.mount(host).unwrap();
        panel
    }

    #[test]
    fn test_mount_writes_initial_coords() {
        let mut host = MemoryHost::default();
        let panel = panel_with_handles(&mut host, PanelConfig::default());

        assert_eq!(
            host.inline_style(panel.target()),
            Some("height: 240px; left: 100px; top: 100px; width: 320px")
        );
        assert_eq!(panel.coords(), Rect::new(100.0, 100.0, 320.0, 240.0));
    }

    #[test]
    fn test_mount_unbound_target_fails() {
        let mut host = MemoryHost::default();
        let target = host.create_element();
        host.remove_element(target);

        let mut panel = Panel::new(target, None, PanelConfig::default());
        assert_eq!(
            panel.mount(&mut host),
            Err(PanelError::ElementNotBound(target))
        );
        assert_eq!(host.write_count(target), 0);
    }

    #[test]
    fn test_duplicate_handle_rejected_per_kind() {
        let mut host = MemoryHost::default();
        let mut panel = panel_with_handles(&mut host, PanelConfig::default());
        let extra = host.create_element();

        assert_eq!(
            panel.add_drag_handle("main", extra),
            Err(PanelError::DuplicateHandle("main".to_string()))
        );
        panel.add_drag_handle("title", extra).unwrap();
        assert_eq!(panel.handle_names(SessionKind::Drag), vec!["main", "title"]);
        assert_eq!(panel.remove_handle(SessionKind::Drag, "title"), Some(extra));
    }

    #[test]
    fn test_unknown_handle() {
        let mut host = MemoryHost::default();
        let mut panel = panel_with_handles(&mut host, PanelConfig::default());

        let err = panel
            .pointer_down(
                &mut host,
                SessionKind::Drag,
                "missing",
                PointerInput::new(0.0, 0.0, 1),
            )
            .unwrap_err();
        assert_eq!(err, PanelError::UnknownHandle("missing".to_string()));
    }

    #[test]
    fn test_quality_change_does_not_affect_active_session() {
        let mut host = MemoryHost::default();
        let mut panel = panel_with_handles(&mut host, PanelConfig::default());

        panel
            .pointer_down(
                &mut host,
                SessionKind::Resize,
                "main",
                PointerInput::new(100.0, 100.0, 1),
            )
            .unwrap();
        panel.set_quality(Quality::Quality);

        let session = panel.session().unwrap();
        assert_eq!(session.quality(), Quality::Balanced);
        assert!(session.preview_on_overlay());
        assert_eq!(panel.config().quality, Quality::Quality);
    }

    #[test]
    fn test_commit_updates_coords_and_settles() {
        let mut host = MemoryHost::default();
        let mut panel = panel_with_handles(&mut host, PanelConfig::default());

        panel
            .pointer_down(
                &mut host,
                SessionKind::Drag,
                "main",
                PointerInput::new(110.0, 110.0, 1),
            )
            .unwrap();
        panel.pointer_move(PointerInput::new(160.0, 120.0, 1));
        let commit = panel
            .pointer_up(&mut host, PointerInput::new(160.0, 120.0, 1).at(1_000.0))
            .unwrap();

        assert_eq!(commit.rect, Rect::new(150.0, 110.0, 320.0, 240.0));
        assert_eq!(panel.coords(), commit.rect);
        assert_eq!(panel.poll_settled(1_050.0), None);
        assert_eq!(panel.poll_settled(1_100.0), Some(commit.rect));
    }
}
