pub mod pointer;
pub mod wheel;

use crate::bridge::Shared;
use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Attach every DOM listener the viewer needs.
pub fn wire_input_handlers(shared: Shared) {
    pointer::wire_pointer_handlers(&shared);
    wheel::wire_wheel(&shared);
    wire_resize(&shared);
}

fn wire_resize(shared: &Shared) {
    let shared = shared.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&shared.canvas);
        let surface = dom::surface_rect(&shared.canvas);
        log::trace!("[resize] {}x{}", surface.width, surface.height);
        shared.with_viewer(|v| v.resize(surface));
    }) as Box<dyn FnMut()>);
    // Scrolling moves the canvas under the pointer just like a resize does.
    if let Some(window) = web::window() {
        for name in ["resize", "scroll"] {
            _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
    closure.forget();
}
