use crate::bridge::Shared;
use crate::dom;
use crate::render::{self, FrameData, MarkerInstance};
use instant::Instant;
use pano_core::FrameTicker;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    shared: Shared,
    gpu: Option<render::GpuState<'a>>,
    ticker: FrameTicker,
    last_instant: Instant,
    instances: Vec<MarkerInstance>,
}

impl<'a> FrameContext<'a> {
    pub fn new(shared: Shared, gpu: Option<render::GpuState<'a>>) -> Self {
        let ticker = {
            let viewer = shared.viewer.borrow();
            let config = viewer.config();
            FrameTicker::new(config.tick_hz, config.max_catch_up_ticks)
        };
        Self {
            shared,
            gpu,
            ticker,
            last_instant: Instant::now(),
            instances: Vec::new(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        // Hover polls at a fixed rate, independent of the display refresh.
        let ticks = self.ticker.advance(dt);
        let pending_image;
        let view_proj;
        {
            let mut viewer = self.shared.viewer.borrow_mut();
            for _ in 0..ticks {
                viewer.tick();
            }
            view_proj = viewer.camera().view_projection();

            let scene = viewer.scene();
            pending_image = scene.take_pending_image();
            self.instances.clear();
            self.instances.extend(scene.markers().map(|m| MarkerInstance {
                position: m.position.to_array(),
                size_px: m.size,
                active: if scene.is_active(m) { 1.0 } else { 0.0 },
            }));
        }
        self.shared.flush();

        if let Some(g) = &mut self.gpu {
            if let Some(image) = pending_image {
                g.upload_panorama(&image);
            }
            g.resize_if_needed(self.shared.canvas.width(), self.shared.canvas.height());
            let data = FrameData {
                view_proj,
                pixel_ratio: dom::pixel_ratio(&self.shared.canvas),
                markers: &self.instances,
            };
            if let Err(e) = g.render(&data) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
    log::info!("[frame] loop started");
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
