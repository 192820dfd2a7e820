//! Browser bindings for Backdrop desktop panels
//!
//! Wires the pure [`backdrop_panel`] engine to a real page:
//!
//! - [`DomHost`]: `ElementHost` over `web-sys` DOM calls
//! - [`WindowPanel`]: JavaScript-facing panel class that owns a
//!   `requestAnimationFrame` loop and forwards pointer events
//!
//! ## Usage from JavaScript
//!
//! ```text
//! const panel = new WindowPanel(container, overlay, '{"quality":"eco"}');
//! panel.add_drag_handle("main", titleBar);
//! panel.add_resize_handle("main", corner);
//! panel.mount();
//!
//! titleBar.onpointerdown = (e) => panel.drag_start("main", e);
//! corner.onpointerdown   = (e) => panel.resize_start("main", e);
//! window.onpointermove   = (e) => panel.pointer_move(e);
//! window.onpointerup     = (e) => panel.pointer_up(e);
//! ```

use wasm_bindgen::prelude::*;

mod dom;
mod panel;

pub use dom::DomHost;
pub use panel::WindowPanel;

/// Mirror a message to the browser console
pub(crate) fn log(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    log("[panel] backdrop-web loaded");
}
