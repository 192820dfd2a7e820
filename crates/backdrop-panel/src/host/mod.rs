//! Rendering host abstraction
//!
//! The engine never touches a DOM node. Everything it reads or writes goes
//! through an [`ElementHost`], keyed by opaque [`ElementId`]s that the host
//! resolves through its own lookup table on every call.

mod memory;

pub use memory::MemoryHost;

use crate::math::Size;
use crate::types::{ElementId, PointerId};

/// Layout-box metrics of an element (DOM `offsetLeft/Top/Width/Height`)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutBox {
    pub offset_left: f64,
    pub offset_top: f64,
    pub offset_width: f64,
    pub offset_height: f64,
}

/// Element access needed by a panel
///
/// Every method tolerates an unbound handle: reads return `None`, writes
/// return `false`, capture calls do nothing.
pub trait ElementHost {
    /// Resolved value of a CSS property, e.g. `"320px"`, `"auto"`, `"none"`
    fn computed_style(&self, id: ElementId, property: &str) -> Option<String>;

    /// Layout-box metrics
    fn layout_box(&self, id: ElementId) -> Option<LayoutBox>;

    /// Replace the element's style attribute in a single write
    fn write_style(&mut self, id: ElementId, css_text: &str) -> bool;

    /// Route subsequent events for `pointer_id` to this element
    fn set_pointer_capture(&mut self, id: ElementId, pointer_id: PointerId);

    /// Stop routing events for `pointer_id` to this element
    fn release_pointer_capture(&mut self, id: ElementId, pointer_id: PointerId);

    /// Inner size of the window hosting the panels
    fn viewport(&self) -> Size;

    /// Whether the handle currently resolves to an element
    fn is_bound(&self, id: ElementId) -> bool {
        self.layout_box(id).is_some()
    }
}
