use crate::dom;
use fnv::FnvHashMap;
use glam::Vec3;
use pano_core::{Cursor, MarkerId, Scene};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug)]
pub struct MarkerSprite {
    pub position: Vec3,
    pub size: f32,
}

/// Browser-side `Scene`: remembers what to draw and leaves the drawing to the
/// frame loop. Texture loads complete asynchronously into `pending_image`.
pub struct WebScene {
    canvas: web::HtmlCanvasElement,
    markers: FnvHashMap<MarkerId, MarkerSprite>,
    normal_size: f32,
    pending_image: Rc<RefCell<Option<web::HtmlImageElement>>>,
    load_generation: Rc<Cell<u64>>,
    cursor: Cursor,
}

impl WebScene {
    pub fn new(canvas: web::HtmlCanvasElement, normal_size: f32) -> Self {
        Self {
            canvas,
            markers: FnvHashMap::default(),
            normal_size,
            pending_image: Rc::new(RefCell::new(None)),
            load_generation: Rc::new(Cell::new(0)),
            cursor: Cursor::Default,
        }
    }

    pub fn markers(&self) -> impl Iterator<Item = &MarkerSprite> + '_ {
        self.markers.values()
    }

    /// Markers drawn larger than their resting size.
    #[inline]
    pub fn is_active(&self, sprite: &MarkerSprite) -> bool {
        sprite.size > self.normal_size
    }

    /// A decoded panorama image waiting for upload, if one arrived.
    pub fn take_pending_image(&self) -> Option<web::HtmlImageElement> {
        self.pending_image.borrow_mut().take()
    }
}

impl Scene for WebScene {
    fn add_marker(&mut self, id: MarkerId, position: Vec3, size: f32) {
        self.markers.insert(id, MarkerSprite { position, size });
    }

    fn remove_marker(&mut self, id: MarkerId) {
        if self.markers.remove(&id).is_none() {
            log::warn!("[scene] remove of unknown marker {:?}", id);
        }
    }

    fn set_marker_size(&mut self, id: MarkerId, size: f32) {
        if let Some(sprite) = self.markers.get_mut(&id) {
            sprite.size = size;
        }
    }

    fn load_texture(&mut self, uri: &str) {
        let img = match web::HtmlImageElement::new() {
            Ok(img) => img,
            Err(e) => {
                log::error!("[texture] cannot create image element: {:?}", e);
                return;
            }
        };
        // Only the most recent request may replace the background; the old
        // image stays up until it does.
        let generation = self.load_generation.get() + 1;
        self.load_generation.set(generation);

        let pending = self.pending_image.clone();
        let latest = self.load_generation.clone();
        let loaded = img.clone();
        let src = uri.to_string();
        let onload = Closure::wrap(Box::new(move || {
            if latest.get() != generation {
                log::debug!("[texture] dropping stale load {}", src);
                return;
            }
            log::info!(
                "[texture] loaded {} ({}x{})",
                src,
                loaded.natural_width(),
                loaded.natural_height()
            );
            *pending.borrow_mut() = Some(loaded.clone());
        }) as Box<dyn FnMut()>);

        let failed_src = uri.to_string();
        let onerror = Closure::wrap(Box::new(move || {
            log::error!("[texture] failed to load {}", failed_src);
        }) as Box<dyn FnMut()>);

        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();

        img.set_cross_origin(Some("anonymous"));
        img.set_src(uri);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        if cursor != self.cursor {
            self.cursor = cursor;
            dom::set_cursor(&self.canvas, cursor.as_css());
        }
    }
}
