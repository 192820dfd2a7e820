//! DOM-backed element host
//!
//! Elements are registered once and addressed by [`ElementId`] afterwards.
//! Unregistering an element (e.g. when its component unmounts) turns every
//! later access into the "unbound" path of [`ElementHost`].

use std::collections::HashMap;

use backdrop_panel::{ElementHost, ElementId, LayoutBox, PointerId, Size};
use tracing::debug;
use web_sys::{HtmlElement, Window};

/// [`ElementHost`] backed by live DOM elements
pub struct DomHost {
    window: Window,
    elements: HashMap<ElementId, HtmlElement>,
    next_id: u32,
}

impl DomHost {
    /// Host bound to the current browsing context; `None` outside a window
    pub fn new() -> Option<Self> {
        Some(Self::with_window(web_sys::window()?))
    }

    pub fn with_window(window: Window) -> Self {
        Self {
            window,
            elements: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Register an element and return its handle
    pub fn register(&mut self, element: HtmlElement) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, element);
        debug!(element = id.0, "element registered");
        id
    }

    /// Drop an element; returns whether it was registered
    pub fn unregister(&mut self, id: ElementId) -> bool {
        let removed = self.elements.remove(&id).is_some();
        if removed {
            debug!(element = id.0, "element unregistered");
        }
        removed
    }

    pub fn element(&self, id: ElementId) -> Option<&HtmlElement> {
        self.elements.get(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl ElementHost for DomHost {
    fn computed_style(&self, id: ElementId, property: &str) -> Option<String> {
        let element = self.elements.get(&id)?;
        // A detached element has no computed style; report it as empty so
        // the sampler falls back to layout metrics.
        let value = self
            .window
            .get_computed_style(element)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value(property).ok())
            .unwrap_or_default();
        Some(value)
    }

    fn layout_box(&self, id: ElementId) -> Option<LayoutBox> {
        let element = self.elements.get(&id)?;
        Some(LayoutBox {
            offset_left: f64::from(element.offset_left()),
            offset_top: f64::from(element.offset_top()),
            offset_width: f64::from(element.offset_width()),
            offset_height: f64::from(element.offset_height()),
        })
    }

    fn write_style(&mut self, id: ElementId, css_text: &str) -> bool {
        match self.elements.get(&id) {
            Some(element) => element.set_attribute("style", css_text).is_ok(),
            None => false,
        }
    }

    fn set_pointer_capture(&mut self, id: ElementId, pointer_id: PointerId) {
        if let Some(element) = self.elements.get(&id) {
            // Fails for pointers that are no longer active; nothing to do then.
            let _ = element.set_pointer_capture(pointer_id);
        }
    }

    fn release_pointer_capture(&mut self, id: ElementId, pointer_id: PointerId) {
        if let Some(element) = self.elements.get(&id) {
            let _ = element.release_pointer_capture(pointer_id);
        }
    }

    fn viewport(&self) -> Size {
        let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Size::new(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }
}
