//! DOM host tests; run with `wasm-pack test --headless --firefox`

use backdrop_panel::{
    sample_rect, sample_transform, ElementHost, ElementId, Panel, PanelConfig, PointerInput,
    Rect, SessionKind,
};
use backdrop_web::DomHost;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Positioned element attached to the body, so offset metrics and computed
/// `left/top` resolve the way they do for a real panel.
fn positioned_div() -> HtmlElement {
    let document = document();
    if document.get_element_by_id("backdrop-test-sheet").is_none() {
        let sheet = document.create_element("style").unwrap();
        sheet.set_id("backdrop-test-sheet");
        sheet.set_text_content(Some(
            ".backdrop-test { position: absolute; margin: 0; padding: 0; border: 0; }",
        ));
        document.body().unwrap().append_child(&sheet).unwrap();
    }

    let element = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    element.set_class_name("backdrop-test");
    document.body().unwrap().append_child(&element).unwrap();
    element
}

#[wasm_bindgen_test]
fn test_sample_rect_from_inline_style() {
    let mut host = DomHost::new().unwrap();
    let element = positioned_div();
    let id = host.register(element);

    assert!(host.write_style(id, "left: 10px; top: 20px; width: 300px; height: 200px"));
    let rect = sample_rect(&host, id).unwrap();
    assert_eq!(rect, Rect::new(10.0, 20.0, 300.0, 200.0));
}

#[wasm_bindgen_test]
fn test_sample_transform_reads_computed_matrix() {
    let mut host = DomHost::new().unwrap();
    let id = host.register(positioned_div());

    host.write_style(id, "left: 0px; top: 0px; transform: translateX(30px) translateY(-12px)");
    let matrix = sample_transform(&host, id);
    assert!((matrix.translate_x - 30.0).abs() < 0.001);
    assert!((matrix.translate_y + 12.0).abs() < 0.001);
}

#[wasm_bindgen_test]
fn test_write_style_replaces_attribute() {
    let mut host = DomHost::new().unwrap();
    let element = positioned_div();
    let id = host.register(element.clone());

    host.write_style(id, "left: 1px; opacity: 0.5");
    host.write_style(id, "left: 2px");
    assert_eq!(element.get_attribute("style").as_deref(), Some("left: 2px"));
}

#[wasm_bindgen_test]
fn test_unregistered_element_is_unbound() {
    let mut host = DomHost::new().unwrap();
    let id = host.register(positioned_div());
    assert!(host.unregister(id));

    assert!(!host.is_bound(id));
    assert!(host.computed_style(id, "left").is_none());
    assert!(!host.write_style(id, "left: 0px"));
    assert!(sample_rect(&host, id).is_none());
    assert!(!host.is_bound(ElementId(999)));
}

#[wasm_bindgen_test]
fn test_viewport_matches_window() {
    let host = DomHost::new().unwrap();
    let window = web_sys::window().unwrap();
    let size = host.viewport();
    assert_eq!(size.width, window.inner_width().unwrap().as_f64().unwrap());
    assert_eq!(size.height, window.inner_height().unwrap().as_f64().unwrap());
}

#[wasm_bindgen_test]
fn test_drag_commits_to_dom() {
    let mut host = DomHost::new().unwrap();
    let container = positioned_div();
    let title_bar = positioned_div();
    let target = host.register(container.clone());
    let handle = host.register(title_bar);

    let config = PanelConfig::default().with_restrict_bounds(false);
    let mut panel = Panel::new(target, None, config);
    panel.add_drag_handle("main", handle).unwrap();
    panel.mount(&mut host).unwrap();

    let began = panel
        .pointer_down(&mut host, SessionKind::Drag, "main", PointerInput::new(110.0, 110.0, 1))
        .unwrap();
    assert!(began);

    panel.pointer_move(PointerInput::new(200.0, 150.0, 1));
    assert!(panel.run_frame(&mut host, 16.0));

    let commit = panel
        .pointer_up(&mut host, PointerInput::new(200.0, 150.0, 1))
        .unwrap();
    assert_eq!(commit.rect, Rect::new(190.0, 140.0, 320.0, 240.0));
    assert_eq!(
        container.get_attribute("style").as_deref(),
        Some("height: 240px; left: 190px; top: 140px; width: 320px")
    );
}
