//! The viewer context: one panorama, its markers and the interaction state.
//!
//! All state that a single viewer instance needs lives here and every
//! operation goes through `&mut self`, so several viewers can coexist and
//! tests need no global fixtures. Host commands and pointer input are applied
//! synchronously; `tick` runs the per-frame hover poll.

use crate::camera::PanoramaCamera;
use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};
use crate::events::{EventBus, SubscriptionId, ViewerEvent};
use crate::gesture::{GestureInterpreter, WheelInput};
use crate::hover::{HoverTransition, InteractionState, SelectOutcome};
use crate::model::{Panorama, Permissions, PointOfInterest};
use crate::pointer::{PointerTracker, SurfaceRect};
use crate::ray::Ray;
use crate::reconcile::{reconcile, ReconcileReport};
use crate::registry::{MarkerId, MarkerRegistry};
use crate::scene::{Cursor, Scene};
use glam::{Vec2, Vec3};

pub struct Viewer<S: Scene> {
    scene: S,
    config: ViewerConfig,
    camera: PanoramaCamera,
    pointer: PointerTracker,
    registry: MarkerRegistry,
    interaction: InteractionState,
    gestures: GestureInterpreter,
    permissions: Permissions,
    panorama: Option<Panorama>,
    events: EventBus,
    ticks: u64,
}

impl<S: Scene> Viewer<S> {
    pub fn new(scene: S, config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scene,
            camera: PanoramaCamera::new(&config, 1.0),
            pointer: PointerTracker::default(),
            registry: MarkerRegistry::new(config.marker_size_normal),
            interaction: InteractionState::default(),
            gestures: GestureInterpreter::default(),
            permissions: Permissions::default(),
            panorama: None,
            events: EventBus::new(),
            ticks: 0,
            config,
        })
    }

    /// Show the first panorama with the host's gesture permissions.
    pub fn init(&mut self, panorama: Panorama, permissions: Permissions) {
        self.set_permissions(permissions);
        self.load_panorama(panorama);
    }

    // ---------------- accessors ----------------

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn camera(&self) -> &PanoramaCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PanoramaCamera {
        &mut self.camera
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    pub fn current_panorama(&self) -> Option<&Panorama> {
        self.panorama.as_ref()
    }

    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    pub fn hovered_slot(&self) -> Option<usize> {
        self.interaction
            .hovered()
            .and_then(|id| self.registry.slot_of(id))
    }

    pub fn selected_slot(&self) -> Option<usize> {
        self.interaction
            .selected()
            .and_then(|id| self.registry.slot_of(id))
    }

    /// Frames polled since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    pub fn pointer_ndc(&self) -> Vec2 {
        self.pointer.ndc()
    }

    // ---------------- host commands ----------------

    pub fn subscribe(&mut self, f: impl FnMut(&ViewerEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn set_permissions(&mut self, permissions: Permissions) {
        log::info!(
            "[permissions] select={} create={} remove={}",
            permissions.select,
            permissions.create,
            permissions.remove
        );
        self.permissions = permissions;
    }

    /// Switch panoramas: drop every marker and start loading the new image.
    /// The host follows up with `refresh_points_of_interest`.
    pub fn load_panorama(&mut self, panorama: Panorama) {
        log::info!("[panorama] load id={} src={}", panorama.id, panorama.image_source);
        self.registry.clear_all(&mut self.scene);
        self.forget_missing_markers();
        self.scene.load_texture(&panorama.image_source);
        self.panorama = Some(panorama);
    }

    /// Write one POI's marker into `index`, or append when no index is given.
    /// An existing marker in that slot is replaced. Returns the slot used.
    pub fn add_point_of_interest(&mut self, poi: &PointOfInterest, index: Option<usize>) -> usize {
        let slot = index.unwrap_or(self.registry.len());
        if self.registry.get(slot).is_some() {
            self.registry.remove_marker(&mut self.scene, slot, false);
            self.forget_missing_markers();
        }
        self.registry.create_marker(&mut self.scene, poi, slot);
        slot
    }

    /// Remove one marker. `shrink` splices the slot out; otherwise it is left
    /// as a tombstone.
    pub fn remove_point_of_interest(&mut self, index: usize, shrink: bool) {
        if self.registry.remove_marker(&mut self.scene, index, shrink).is_some() {
            self.forget_missing_markers();
        }
    }

    /// Converge the markers on the host's full list.
    pub fn refresh_points_of_interest(
        &mut self,
        pois: &[PointOfInterest],
    ) -> Result<ReconcileReport> {
        let report = reconcile(&mut self.registry, &mut self.scene, pois);
        if self.registry.len() != pois.len() || self.registry.tombstones() != 0 {
            return Err(ViewerError::Alignment {
                registry: self.registry.len(),
                expected: pois.len(),
            });
        }
        if !report.removed.is_empty() {
            self.forget_missing_markers();
        }
        Ok(report)
    }

    pub fn resize(&mut self, surface: SurfaceRect) {
        self.pointer.set_surface(surface);
        if let Some(aspect) = surface.aspect() {
            self.camera.set_aspect(aspect);
        }
    }

    // ---------------- frame ----------------

    /// One hover poll against the current pointer ray. Runs every frame
    /// because camera motion changes what sits under a still pointer.
    pub fn tick(&mut self) {
        self.ticks += 1;
        let hit = self.pick_marker(&self.pointer_ray());
        for transition in self.interaction.poll(hit) {
            match transition {
                HoverTransition::Exit(id) => {
                    self.events.emit(ViewerEvent::HoverExit);
                    self.restyle(id);
                    self.scene.set_cursor(Cursor::Default);
                }
                HoverTransition::Enter(id) => {
                    if let Some(slot) = self.registry.slot_of(id) {
                        self.events.emit(ViewerEvent::HoverEnter { slot });
                    }
                    self.restyle(id);
                    self.scene.set_cursor(Cursor::Pointer);
                }
            }
        }
    }

    // ---------------- pointer input ----------------

    /// Pointer moved anywhere on the page; updates the hover ray and pans
    /// while a drag is active.
    pub fn pointer_move(&mut self, client: Vec2) {
        self.pointer.track(client);
        self.gestures
            .drag_to(client, &mut self.camera, &self.config);
    }

    /// Set the hover ray directly in normalized device coordinates.
    pub fn set_pointer_ndc(&mut self, ndc: Vec2) {
        self.pointer.set_ndc(ndc);
    }

    pub fn pointer_down(&mut self, client: Vec2, on_surface: bool) {
        self.gestures.press(client, on_surface, &self.camera);
    }

    pub fn pointer_up(&mut self, client: Vec2) {
        self.gestures.release(client, &self.config);
    }

    pub fn wheel(&mut self, input: WheelInput) {
        let delta = input.fov_delta(&self.config);
        self.camera.zoom_by(delta);
        log::trace!("[wheel] delta={:.2} fov={:.1}", delta, self.camera.fov());
    }

    /// Single click: toggle selection of the hovered marker.
    pub fn click(&mut self, on_surface: bool) {
        if !self.gestures.accept_click() || !on_surface || !self.permissions.select {
            return;
        }
        match self.interaction.click() {
            Some(SelectOutcome::Selected { previous, current }) => {
                if let Some(prev) = previous {
                    self.restyle(prev);
                }
                self.restyle(current);
                let slot = self.registry.slot_of(current);
                log::info!("[click] select slot {:?}", slot);
                self.events.emit(ViewerEvent::Select { slot });
            }
            Some(SelectOutcome::Deselected(id)) => {
                self.restyle(id);
                log::info!("[click] deselect");
                self.events.emit(ViewerEvent::Select { slot: None });
            }
            None => {}
        }
    }

    /// Double click: create a POI on the background, or remove the hovered one.
    pub fn double_click(&mut self, on_surface: bool) {
        if !on_surface {
            return;
        }
        match self.interaction.hovered() {
            None if self.permissions.create => self.create_at_pointer(),
            Some(id) if self.permissions.remove => self.remove_hovered(id),
            _ => {}
        }
    }

    // ---------------- internals ----------------

    fn pointer_ray(&self) -> Ray {
        self.camera.ray_from_ndc(self.pointer.ndc())
    }

    fn pick_marker(&self, ray: &Ray) -> Option<MarkerId> {
        let points = self.registry.live().map(|(_, m)| (m.id, m.position));
        ray.intersect_points(points, self.config.point_pick_threshold)
            .first()
            .map(|hit| hit.target)
    }

    fn create_at_pointer(&mut self) {
        let ray = self.pointer_ray();
        let Some(t) = ray.intersect_sphere(Vec3::ZERO, self.config.sphere_radius) else {
            log::debug!("[dblclick] no background intersection, nothing created");
            return;
        };
        let slot = self.registry.len();
        let poi = PointOfInterest::new(slot as u32 + 1, ray.at(t));
        self.registry.create_marker(&mut self.scene, &poi, slot);
        log::info!("[dblclick] create poi {} at slot {}", poi.id, slot);
        self.events.emit(ViewerEvent::Create { poi });
    }

    fn remove_hovered(&mut self, id: MarkerId) {
        let Some(slot) = self.registry.slot_of(id) else {
            return;
        };
        if self.interaction.selected() == Some(id) {
            self.interaction.deselect();
            self.events.emit(ViewerEvent::Select { slot: None });
        }
        self.registry.remove_marker(&mut self.scene, slot, true);
        log::info!("[dblclick] remove slot {}", slot);
        self.events.emit(ViewerEvent::Remove { slot });
        self.forget_missing_markers();
    }

    /// Clear hover/selection that refers to removed markers, telling the host.
    fn forget_missing_markers(&mut self) {
        let registry = &self.registry;
        let (lost_hover, lost_selection) = self.interaction.retain(|id| registry.contains(id));
        if lost_selection {
            self.events.emit(ViewerEvent::Select { slot: None });
        }
        if lost_hover {
            self.events.emit(ViewerEvent::HoverExit);
            self.scene.set_cursor(Cursor::Default);
        }
    }

    fn restyle(&mut self, id: MarkerId) {
        let Some(slot) = self.registry.slot_of(id) else {
            return;
        };
        let state = self.interaction.state_of(id);
        self.registry.set_state(slot, state);
        self.scene
            .set_marker_size(id, self.config.marker_size(state));
    }
}
