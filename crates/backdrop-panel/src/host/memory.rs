//! In-memory element host
//!
//! Emulates the parts of the browser cascade the engine relies on: a
//! per-element stylesheet, an inline style attribute that overrides it,
//! layout-box metrics and pointer capture. Used by tests and by callers
//! that run panels headless.

use std::collections::{HashMap, HashSet};

use super::{ElementHost, LayoutBox};
use crate::math::Size;
use crate::types::{ElementId, PointerId};

/// Initial stylesheet for every element created by [`MemoryHost`]
const BASE_STYLESHEET: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("left", "auto"),
    ("top", "auto"),
    ("width", "auto"),
    ("height", "auto"),
    ("padding-left", "0px"),
    ("padding-right", "0px"),
    ("padding-top", "0px"),
    ("padding-bottom", "0px"),
    ("border-left-width", "0px"),
    ("border-right-width", "0px"),
    ("border-top-width", "0px"),
    ("border-bottom-width", "0px"),
    ("transform", "none"),
];

#[derive(Clone, Debug, Default)]
struct MemoryElement {
    stylesheet: HashMap<String, String>,
    inline: Vec<(String, String)>,
    inline_text: String,
    layout: LayoutBox,
    captures: HashSet<PointerId>,
    writes: usize,
}

impl MemoryElement {
    fn new() -> Self {
        Self {
            stylesheet: BASE_STYLESHEET
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        }
    }
}

/// Element host backed by plain maps
#[derive(Clone, Debug)]
pub struct MemoryHost {
    elements: HashMap<ElementId, MemoryElement>,
    next_id: u32,
    viewport: Size,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}

impl MemoryHost {
    /// Create an empty host with the given viewport size
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            elements: HashMap::new(),
            next_id: 1,
            viewport: Size::new(viewport_width, viewport_height),
        }
    }

    /// Register a new element and return its handle
    pub fn create_element(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, MemoryElement::new());
        id
    }

    /// Drop an element; its handle stops resolving
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        self.elements.remove(&id).is_some()
    }

    /// Set a stylesheet (non-inline) property
    pub fn set_stylesheet(&mut self, id: ElementId, property: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(&id) {
            element
                .stylesheet
                .insert(property.to_string(), value.to_string());
        }
    }

    /// Set layout-box metrics
    pub fn set_layout_box(&mut self, id: ElementId, layout: LayoutBox) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.layout = layout;
        }
    }

    /// Change the viewport size
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
    }

    /// Raw style attribute as last written
    pub fn inline_style(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).map(|e| e.inline_text.as_str())
    }

    /// Single inline declaration, if present
    pub fn inline_property(&self, id: ElementId, property: &str) -> Option<&str> {
        self.elements.get(&id).and_then(|e| {
            e.inline
                .iter()
                .find(|(k, _)| k == property)
                .map(|(_, v)| v.as_str())
        })
    }

    /// Number of style attribute writes to this element
    pub fn write_count(&self, id: ElementId) -> usize {
        self.elements.get(&id).map_or(0, |e| e.writes)
    }

    /// Whether `pointer_id` is captured by this element
    pub fn has_pointer_capture(&self, id: ElementId, pointer_id: PointerId) -> bool {
        self.elements
            .get(&id)
            .is_some_and(|e| e.captures.contains(&pointer_id))
    }
}

/// Split `a: b; c: d` into ordered pairs, skipping malformed entries
fn parse_css_text(css_text: &str) -> Vec<(String, String)> {
    css_text
        .split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim();
            let value = value.trim();
            (!property.is_empty() && !value.is_empty())
                .then(|| (property.to_string(), value.to_string()))
        })
        .collect()
}

impl ElementHost for MemoryHost {
    fn computed_style(&self, id: ElementId, property: &str) -> Option<String> {
        let element = self.elements.get(&id)?;
        let inline = element
            .inline
            .iter()
            .rev()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.clone());
        Some(
            inline
                .or_else(|| element.stylesheet.get(property).cloned())
                .unwrap_or_default(),
        )
    }

    fn layout_box(&self, id: ElementId) -> Option<LayoutBox> {
        self.elements.get(&id).map(|e| e.layout)
    }

    fn write_style(&mut self, id: ElementId, css_text: &str) -> bool {
        match self.elements.get_mut(&id) {
            Some(element) => {
                element.inline = parse_css_text(css_text);
                element.inline_text = css_text.to_string();
                element.writes += 1;
                true
            }
            None => false,
        }
    }

    fn set_pointer_capture(&mut self, id: ElementId, pointer_id: PointerId) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.captures.insert(pointer_id);
        }
    }

    fn release_pointer_capture(&mut self, id: ElementId, pointer_id: PointerId) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.captures.remove(&pointer_id);
        }
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}
