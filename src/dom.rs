use crate::constants::MAX_DEVICE_PIXEL_RATIO;
use crate::input;
use pano_core::SurfaceRect;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn find_canvas(canvas_id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let el = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", canvas_id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{} is not a canvas: {:?}", canvas_id, e)))
}

/// Keep the canvas backing store at CSS size * devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let rect = canvas.get_bounding_client_rect();
        let (w_px, h_px) = input::backing_size(
            rect.width(),
            rect.height(),
            w.device_pixel_ratio(),
            MAX_DEVICE_PIXEL_RATIO,
        );
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
}

/// Canvas bounds in client coordinates, as the pointer tracker expects them.
pub fn surface_rect(canvas: &web::HtmlCanvasElement) -> SurfaceRect {
    let rect = canvas.get_bounding_client_rect();
    input::surface_from_rect(rect.left(), rect.top(), rect.width(), rect.height())
}

/// Effective pixel ratio between the backing store and CSS pixels.
pub fn pixel_ratio(canvas: &web::HtmlCanvasElement) -> f32 {
    let css_w = canvas.client_width().max(1) as f32;
    (canvas.width() as f32 / css_w).max(0.1)
}

pub fn set_cursor(canvas: &web::HtmlCanvasElement, css: &str) {
    if let Err(e) = canvas.style().set_property("cursor", css) {
        log::warn!("[dom] set cursor failed: {:?}", e);
    }
}

/// Whether a DOM event was dispatched on the canvas itself.
pub fn targets_canvas(ev: &web::Event, canvas: &web::HtmlCanvasElement) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::HtmlCanvasElement>().ok())
        .is_some_and(|c| &c == canvas)
}
