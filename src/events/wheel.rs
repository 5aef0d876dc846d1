use crate::bridge::Shared;
use crate::input::{classify_wheel, RawWheel};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Zoom on the wheel. Browsers with the standard `wheel` event get only that;
/// older engines get `mousewheel` and `DOMMouseScroll`, whose deltas use other
/// signs and units.
pub fn wire_wheel(shared: &Shared) {
    let canvas: web::EventTarget = shared.canvas.clone().into();
    let standard = web::window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("onwheel")).unwrap_or(false))
        .unwrap_or(true);
    let names: &[&str] = if standard {
        &["wheel"]
    } else {
        &["mousewheel", "DOMMouseScroll"]
    };
    log::debug!("[wheel] listening for {:?}", names);

    let shared = shared.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        let raw = read_raw_wheel(&ev);
        let Some(input) = classify_wheel(&raw) else {
            return;
        };
        ev.prevent_default();
        shared.with_viewer(|v| v.wheel(input));
    }) as Box<dyn FnMut(_)>);
    for name in names {
        _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn read_raw_wheel(ev: &web::Event) -> RawWheel {
    if let Some(wheel) = ev.dyn_ref::<web::WheelEvent>() {
        return RawWheel {
            delta_y: Some(wheel.delta_y()),
            delta_mode: wheel.delta_mode(),
            ..RawWheel::default()
        };
    }
    let field = |name: &str| {
        js_sys::Reflect::get(ev, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_f64())
    };
    RawWheel {
        wheel_delta_y: field("wheelDeltaY"),
        wheel_delta: field("wheelDelta"),
        detail: field("detail"),
        ..RawWheel::default()
    }
}
