//! JavaScript-facing panel
//!
//! [`WindowPanel`] owns a [`Panel`] together with its [`DomHost`] and turns
//! the engine's frame requests into `requestAnimationFrame` callbacks.
//! Committed geometry is reported to an optional `on_commit` callback, and
//! the debounced coordinates to an optional `on_settle` callback.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use backdrop_panel::{
    Panel, PanelConfig, PanelError, PointerInput, Quality, SessionKind, UpdateOutcome,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, PointerEvent};

use crate::dom::DomHost;
use crate::log;

fn to_js_error(err: PanelError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

fn parse_kind(kind: &str) -> Result<SessionKind, JsValue> {
    match kind {
        "drag" => Ok(SessionKind::Drag),
        "resize" => Ok(SessionKind::Resize),
        other => Err(JsValue::from_str(&format!("unknown session kind: {}", other))),
    }
}

fn pointer_input(event: &PointerEvent) -> PointerInput {
    PointerInput::new(
        f64::from(event.client_x()),
        f64::from(event.client_y()),
        event.pointer_id(),
    )
    .at(event.time_stamp())
}

struct PanelState {
    host: DomHost,
    panel: Panel,
    animation_frame: Option<i32>,
    settle_timer: Option<i32>,
    frame_callback: Option<Closure<dyn FnMut(f64)>>,
    settle_callback: Option<Closure<dyn FnMut()>>,
    on_commit: Option<js_sys::Function>,
    on_settle: Option<js_sys::Function>,
}

impl PanelState {
    fn now_ms(&self) -> f64 {
        self.host
            .window()
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn request_frame(&mut self) {
        if self.animation_frame.is_some() {
            return;
        }
        let Some(callback) = self.frame_callback.as_ref() else {
            return;
        };
        self.animation_frame = self
            .host
            .window()
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok();
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.animation_frame.take() {
            let _ = self.host.window().cancel_animation_frame(id);
        }
    }

    fn on_animation_frame(&mut self, now_ms: f64) {
        self.animation_frame = None;
        self.panel.run_frame(&mut self.host, now_ms);
    }

    fn arm_settle_timer(&mut self) {
        self.clear_settle_timer();
        let Some(callback) = self.settle_callback.as_ref() else {
            return;
        };
        // One extra millisecond so the quiet period has fully elapsed when
        // the timer fires.
        let delay = self.panel.config().debounce_ms.max(0.0).ceil() as i32 + 1;
        self.settle_timer = self
            .host
            .window()
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay,
            )
            .ok();
    }

    fn clear_settle_timer(&mut self) {
        if let Some(id) = self.settle_timer.take() {
            self.host.window().clear_timeout_with_handle(id);
        }
    }
}

impl Drop for PanelState {
    fn drop(&mut self) {
        self.cancel_frame();
        self.clear_settle_timer();
    }
}

/// A draggable, resizable panel bound to DOM elements
#[wasm_bindgen]
pub struct WindowPanel {
    inner: Rc<RefCell<PanelState>>,
}

#[wasm_bindgen]
impl WindowPanel {
    /// Create a panel for `container`, optionally previewing resizes on
    /// `overlay`. `options` is a JSON object of panel settings.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        overlay: Option<HtmlElement>,
        options: Option<String>,
    ) -> Result<WindowPanel, JsValue> {
        let config = match options.as_deref() {
            Some(json) if !json.trim().is_empty() => {
                PanelConfig::from_json(json).map_err(to_js_error)?
            }
            _ => PanelConfig::default(),
        };

        let mut host =
            DomHost::new().ok_or_else(|| JsValue::from_str("no window available"))?;
        let target = host.register(container);
        let overlay = overlay.map(|element| host.register(element));

        log(&format!(
            "[panel] created target={} overlay={} quality={}",
            target,
            overlay.is_some(),
            config.quality
        ));

        let inner = Rc::new(RefCell::new(PanelState {
            host,
            panel: Panel::new(target, overlay, config),
            animation_frame: None,
            settle_timer: None,
            frame_callback: None,
            settle_callback: None,
            on_commit: None,
            on_settle: None,
        }));

        let frame_callback = frame_closure(Rc::downgrade(&inner));
        let settle_callback = settle_closure(Rc::downgrade(&inner));
        {
            let mut state = inner.borrow_mut();
            state.frame_callback = Some(frame_callback);
            state.settle_callback = Some(settle_callback);
        }

        Ok(WindowPanel { inner })
    }

    /// Write the initial coordinates to the container
    #[wasm_bindgen]
    pub fn mount(&self) -> Result<(), JsValue> {
        let mut state = self.inner.borrow_mut();
        let state = &mut *state;
        state.panel.mount(&mut state.host).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn add_drag_handle(&self, name: &str, element: HtmlElement) -> Result<(), JsValue> {
        self.add_handle(SessionKind::Drag, name, element)
    }

    #[wasm_bindgen]
    pub fn add_resize_handle(&self, name: &str, element: HtmlElement) -> Result<(), JsValue> {
        self.add_handle(SessionKind::Resize, name, element)
    }

    /// Forget a handle; `kind` is `"drag"` or `"resize"`
    #[wasm_bindgen]
    pub fn remove_handle(&self, kind: &str, name: &str) -> Result<bool, JsValue> {
        let kind = parse_kind(kind)?;
        let mut state = self.inner.borrow_mut();
        let Some(id) = state.panel.remove_handle(kind, name) else {
            return Ok(false);
        };
        Ok(state.host.unregister(id))
    }

    /// Pointer-down on a handle; `kind` is `"drag"` or `"resize"`
    #[wasm_bindgen]
    pub fn pointer_down(
        &self,
        kind: &str,
        name: &str,
        event: &PointerEvent,
    ) -> Result<bool, JsValue> {
        let kind = parse_kind(kind)?;
        let mut state = self.inner.borrow_mut();
        let state = &mut *state;
        let began = state
            .panel
            .pointer_down(&mut state.host, kind, name, pointer_input(event))
            .map_err(to_js_error)?;
        if began {
            state.cancel_frame();
            log(&format!("[panel] {} started on handle '{}'", kind, name));
        }
        Ok(began)
    }

    #[wasm_bindgen]
    pub fn drag_start(&self, name: &str, event: &PointerEvent) -> Result<bool, JsValue> {
        self.pointer_down("drag", name, event)
    }

    #[wasm_bindgen]
    pub fn resize_start(&self, name: &str, event: &PointerEvent) -> Result<bool, JsValue> {
        self.pointer_down("resize", name, event)
    }

    /// Pointer-move anywhere on the page
    #[wasm_bindgen]
    pub fn pointer_move(&self, event: &PointerEvent) {
        let mut state = self.inner.borrow_mut();
        if let UpdateOutcome::Scheduled(_) = state.panel.pointer_move(pointer_input(event)) {
            state.request_frame();
        }
    }

    /// Pointer-up; returns the committed rectangle or `null`
    #[wasm_bindgen]
    pub fn pointer_up(&self, event: &PointerEvent) -> Result<JsValue, JsValue> {
        let commit = {
            let mut state = self.inner.borrow_mut();
            let state = &mut *state;
            let commit = state.panel.pointer_up(&mut state.host, pointer_input(event));
            if commit.is_some() {
                state.cancel_frame();
                state.arm_settle_timer();
            }
            commit.map(|commit| (commit, state.on_commit.clone()))
        };
        self.report(commit)
    }

    /// `lostpointercapture` from the active handle
    #[wasm_bindgen]
    pub fn lost_pointer_capture(&self, event: &PointerEvent) -> Result<JsValue, JsValue> {
        let commit = {
            let mut state = self.inner.borrow_mut();
            let state = &mut *state;
            let commit = state.panel.lost_pointer_capture(
                &mut state.host,
                event.pointer_id(),
                event.time_stamp(),
            );
            if commit.is_some() {
                state.cancel_frame();
                state.arm_settle_timer();
            }
            commit.map(|commit| (commit, state.on_commit.clone()))
        };
        self.report(commit)
    }

    /// Called with `{kind, rect}` after every finished session
    #[wasm_bindgen]
    pub fn set_on_commit(&self, callback: Option<js_sys::Function>) {
        self.inner.borrow_mut().on_commit = callback;
    }

    /// Called with the rectangle once it has been stable for `debounceMs`
    #[wasm_bindgen]
    pub fn set_on_settle(&self, callback: Option<js_sys::Function>) {
        self.inner.borrow_mut().on_settle = callback;
    }

    /// `"eco"`, `"balanced"`, `"quality"` or `"0"`..`"2"`; applies to the
    /// next session
    #[wasm_bindgen]
    pub fn set_quality(&self, quality: &str) -> Result<(), JsValue> {
        let quality: Quality = quality.parse().map_err(to_js_error)?;
        self.inner.borrow_mut().panel.set_quality(quality);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn quality(&self) -> String {
        self.inner.borrow().panel.config().quality.to_string()
    }

    /// Last committed rectangle as `{left, top, width, height}`
    #[wasm_bindgen]
    pub fn coords(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.borrow().panel.coords())
    }

    #[wasm_bindgen]
    pub fn is_active(&self) -> bool {
        self.inner.borrow().panel.is_active()
    }
}

impl WindowPanel {
    fn add_handle(&self, kind: SessionKind, name: &str, element: HtmlElement) -> Result<(), JsValue> {
        let mut state = self.inner.borrow_mut();
        let id = state.host.register(element);
        let added = match kind {
            SessionKind::Drag => state.panel.add_drag_handle(name, id),
            SessionKind::Resize => state.panel.add_resize_handle(name, id),
        };
        if let Err(err) = added {
            state.host.unregister(id);
            return Err(to_js_error(err));
        }
        Ok(())
    }

    /// Convert a commit for JS and hand it to the commit callback. Runs
    /// with the state borrow released so the callback may call back in.
    fn report(
        &self,
        commit: Option<(backdrop_panel::Commit, Option<js_sys::Function>)>,
    ) -> Result<JsValue, JsValue> {
        let Some((commit, callback)) = commit else {
            return Ok(JsValue::NULL);
        };
        log(&format!(
            "[panel] {} committed at ({}, {}) {}x{}",
            commit.kind, commit.rect.left, commit.rect.top, commit.rect.width, commit.rect.height
        ));
        let value = to_js(&commit)?;
        if let Some(callback) = callback {
            callback.call1(&JsValue::NULL, &value)?;
        }
        Ok(value)
    }
}

fn frame_closure(state: Weak<RefCell<PanelState>>) -> Closure<dyn FnMut(f64)> {
    Closure::wrap(Box::new(move |now_ms: f64| {
        if let Some(state) = state.upgrade() {
            state.borrow_mut().on_animation_frame(now_ms);
        }
    }) as Box<dyn FnMut(f64)>)
}

fn settle_closure(state: Weak<RefCell<PanelState>>) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        let Some(state) = state.upgrade() else {
            return;
        };
        let settled = {
            let mut state = state.borrow_mut();
            state.settle_timer = None;
            let now = state.now_ms();
            state
                .panel
                .poll_settled(now)
                .map(|rect| (rect, state.on_settle.clone()))
        };
        if let Some((rect, Some(callback))) = settled {
            if let Ok(value) = to_js(&rect) {
                let _ = callback.call1(&JsValue::NULL, &value);
            }
        }
    }) as Box<dyn FnMut()>)
}
