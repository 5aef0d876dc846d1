#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod bridge;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;
mod scene;

pub use bridge::PanoramaViewer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pano-web starting");
    Ok(())
}

/// Canvas id used by hosts that do not pass their own.
#[wasm_bindgen(js_name = defaultCanvasId)]
pub fn default_canvas_id() -> String {
    constants::DEFAULT_CANVAS_ID.to_string()
}
