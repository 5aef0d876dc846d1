use crate::bridge::Shared;
use crate::dom;
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer_handlers(shared: &Shared) {
    let Some(window) = web::window() else {
        log::error!("[input] no window; pointer input disabled");
        return;
    };
    // Listeners sit on the window so drags keep tracking outside the canvas;
    // each handler checks whether the event actually hit the canvas.
    let target: &web::EventTarget = window.as_ref();

    listen(target, "mousedown", shared, |s, ev| {
        let on_surface = dom::targets_canvas(ev, &s.canvas);
        s.with_viewer(|v| v.pointer_down(client_pos(ev), on_surface));
        if on_surface {
            ev.prevent_default();
        }
    });

    listen(target, "mousemove", shared, |s, ev| {
        s.with_viewer(|v| v.pointer_move(client_pos(ev)));
    });

    listen(target, "mouseup", shared, |s, ev| {
        s.with_viewer(|v| v.pointer_up(client_pos(ev)));
    });

    listen(target, "click", shared, |s, ev| {
        let on_surface = dom::targets_canvas(ev, &s.canvas);
        s.with_viewer(|v| v.click(on_surface));
    });

    listen(target, "dblclick", shared, |s, ev| {
        let on_surface = dom::targets_canvas(ev, &s.canvas);
        s.with_viewer(|v| v.double_click(on_surface));
    });
}

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

fn listen(
    target: &web::EventTarget,
    name: &str,
    shared: &Shared,
    handler: impl Fn(&Shared, &web::MouseEvent) + 'static,
) {
    let shared = shared.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        handler(&shared, &ev);
    }) as Box<dyn FnMut(_)>);
    if let Err(e) = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
        log::error!("[input] cannot listen for {}: {:?}", name, e);
    }
    closure.forget();
}
