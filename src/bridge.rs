//! Host API exposed to JavaScript.
//!
//! Commands arrive as plain JS objects and are decoded through JSON into the
//! core's serde types. Events are queued while the viewer is borrowed and
//! delivered to the registered callback afterwards, so a callback may call
//! straight back into the viewer.

use crate::scene::WebScene;
use crate::{dom, events, frame};
use pano_core::{Panorama, Permissions, PointOfInterest, Viewer, ViewerConfig, ViewerEvent};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// State shared between the host API, DOM listeners and the frame loop.
#[derive(Clone)]
pub struct Shared {
    pub viewer: Rc<RefCell<Viewer<WebScene>>>,
    pub canvas: web_sys::HtmlCanvasElement,
    outbox: Rc<RefCell<VecDeque<ViewerEvent>>>,
    listener: Rc<RefCell<Option<js_sys::Function>>>,
}

impl Shared {
    fn new(viewer: Viewer<WebScene>, canvas: web_sys::HtmlCanvasElement) -> Self {
        let shared = Self {
            viewer: Rc::new(RefCell::new(viewer)),
            canvas,
            outbox: Rc::new(RefCell::new(VecDeque::new())),
            listener: Rc::new(RefCell::new(None)),
        };
        let outbox = shared.outbox.clone();
        shared
            .viewer
            .borrow_mut()
            .subscribe(move |ev| outbox.borrow_mut().push_back(ev.clone()));
        shared
    }

    /// Run `f` against the viewer, then deliver whatever it emitted.
    pub fn with_viewer<R>(&self, f: impl FnOnce(&mut Viewer<WebScene>) -> R) -> R {
        let out = {
            let mut viewer = self.viewer.borrow_mut();
            f(&mut viewer)
        };
        self.flush();
        out
    }

    /// Deliver queued events in emission order. No viewer borrow is held
    /// while the callback runs.
    pub fn flush(&self) {
        loop {
            let Some(event) = self.outbox.borrow_mut().pop_front() else {
                break;
            };
            let Some(callback) = self.listener.borrow().clone() else {
                continue;
            };
            let payload = match to_js(&event) {
                Ok(v) => v,
                Err(e) => {
                    log::error!("[bridge] cannot encode {}: {:?}", event.name(), e);
                    continue;
                }
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &payload) {
                log::error!("[bridge] {} handler threw: {:?}", event.name(), e);
            }
        }
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&text)
}

fn from_js<T: DeserializeOwned>(value: &JsValue, what: &str) -> Result<T, JsValue> {
    let text: String = js_sys::JSON::stringify(value)?.into();
    serde_json::from_str(&text)
        .map_err(|e| JsValue::from_str(&format!("invalid {}: {}", what, e)))
}

fn js_err(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

#[wasm_bindgen]
pub struct PanoramaViewer {
    shared: Shared,
    frame: Rc<RefCell<frame::FrameContext<'static>>>,
    animating: Cell<bool>,
}

#[wasm_bindgen]
impl PanoramaViewer {
    /// Attach to a canvas, bring up WebGPU and show the first panorama.
    /// `config` may be omitted or carry only the fields to override.
    pub async fn create(
        canvas_id: String,
        panorama: JsValue,
        permissions: JsValue,
        config: JsValue,
    ) -> Result<PanoramaViewer, JsValue> {
        let panorama: Panorama = from_js(&panorama, "panorama")?;
        let permissions: Permissions = if permissions.is_undefined() || permissions.is_null() {
            Permissions::default()
        } else {
            from_js(&permissions, "permissions")?
        };
        let config: ViewerConfig = if config.is_undefined() || config.is_null() {
            ViewerConfig::default()
        } else {
            from_js(&config, "config")?
        };

        let canvas = dom::find_canvas(&canvas_id).map_err(js_err)?;
        dom::sync_canvas_backing_size(&canvas);
        let gpu = frame::init_gpu(&canvas).await;

        let scene = WebScene::new(canvas.clone(), config.marker_size_normal);
        let mut viewer = Viewer::new(scene, config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        viewer.resize(dom::surface_rect(&canvas));
        let initial_pois = panorama.points_of_interest.clone();
        viewer.init(panorama, permissions);
        if let Err(e) = viewer.refresh_points_of_interest(&initial_pois) {
            log::error!("[bridge] initial points of interest: {}", e);
        }

        let shared = Shared::new(viewer, canvas);
        events::wire_input_handlers(shared.clone());
        let frame = Rc::new(RefCell::new(frame::FrameContext::new(shared.clone(), gpu)));
        log::info!("[bridge] viewer attached to #{}", canvas_id);

        Ok(PanoramaViewer {
            shared,
            frame,
            animating: Cell::new(false),
        })
    }

    /// Start the continuous frame loop. Calling it again does nothing.
    pub fn animate(&self) {
        if self.animating.replace(true) {
            return;
        }
        frame::start_loop(self.frame.clone());
    }

    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: Option<js_sys::Function>) {
        *self.shared.listener.borrow_mut() = callback;
    }

    #[wasm_bindgen(js_name = loadPanorama)]
    pub fn load_panorama(&self, panorama: JsValue) -> Result<(), JsValue> {
        let panorama: Panorama = from_js(&panorama, "panorama")?;
        self.shared.with_viewer(|v| v.load_panorama(panorama));
        Ok(())
    }

    /// Returns the slot the marker was written to.
    #[wasm_bindgen(js_name = addPointOfInterest)]
    pub fn add_point_of_interest(&self, poi: JsValue, index: Option<u32>) -> Result<u32, JsValue> {
        let poi: PointOfInterest = from_js(&poi, "point of interest")?;
        let slot = self
            .shared
            .with_viewer(|v| v.add_point_of_interest(&poi, index.map(|i| i as usize)));
        Ok(slot as u32)
    }

    /// `shrink` defaults to `true`, closing the gap left by the marker.
    #[wasm_bindgen(js_name = removePointOfInterest)]
    pub fn remove_point_of_interest(&self, index: u32, shrink: Option<bool>) {
        self.shared
            .with_viewer(|v| v.remove_point_of_interest(index as usize, shrink.unwrap_or(true)));
    }

    #[wasm_bindgen(js_name = refreshPointsOfInterest)]
    pub fn refresh_points_of_interest(&self, pois: JsValue) -> Result<(), JsValue> {
        let pois: Vec<PointOfInterest> = from_js(&pois, "points of interest")?;
        self.shared
            .with_viewer(|v| v.refresh_points_of_interest(&pois))
            .map(|report| {
                log::debug!("[bridge] refresh: {} marker ops", report.operations());
            })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = setPermissions)]
    pub fn set_permissions(&self, permissions: JsValue) -> Result<(), JsValue> {
        let permissions: Permissions = from_js(&permissions, "permissions")?;
        self.shared.with_viewer(|v| v.set_permissions(permissions));
        Ok(())
    }

    /// Slot of the hovered marker, or -1.
    #[wasm_bindgen(js_name = hoveredIndex)]
    pub fn hovered_index(&self) -> i32 {
        pano_core::slot_index(self.shared.viewer.borrow().hovered_slot()) as i32
    }

    /// Slot of the selected marker, or -1.
    #[wasm_bindgen(js_name = selectedIndex)]
    pub fn selected_index(&self) -> i32 {
        pano_core::slot_index(self.shared.viewer.borrow().selected_slot()) as i32
    }
}
