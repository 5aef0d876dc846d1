use crate::host::DemoHost;
use glam::Vec2;
use pano_core::{
    Panorama, Permissions, Scene, SurfaceRect, Viewer, ViewerConfig, ViewerEvent, WheelInput,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A viewer wired to a `DemoHost`, driven by synthetic pointer input.
///
/// Events are queued by the subscription and handed to the host once the
/// viewer call that raised them has returned; the host's refreshes then go
/// back into the viewer from outside any callback.
pub struct Session<S: Scene> {
    viewer: Viewer<S>,
    host: DemoHost,
    inbox: Rc<RefCell<VecDeque<ViewerEvent>>>,
    pointer: Vec2,
    log: Vec<ViewerEvent>,
}

impl<S: Scene> Session<S> {
    pub fn start(
        scene: S,
        config: ViewerConfig,
        host: DemoHost,
        surface: SurfaceRect,
    ) -> anyhow::Result<Self> {
        let mut viewer = Viewer::new(scene, config)?;
        viewer.resize(surface);
        let inbox = Rc::new(RefCell::new(VecDeque::new()));
        let sink = inbox.clone();
        viewer.subscribe(move |ev| sink.borrow_mut().push_back(ev.clone()));
        viewer.init(host.panorama().clone(), Permissions::default());

        let mut session = Self {
            viewer,
            host,
            inbox,
            pointer: Vec2::new(
                surface.left + surface.width * 0.5,
                surface.top + surface.height * 0.5,
            ),
            log: Vec::new(),
        };
        session.refresh()?;
        session.pump()?;
        Ok(session)
    }

    pub fn viewer(&self) -> &Viewer<S> {
        &self.viewer
    }

    pub fn host(&self) -> &DemoHost {
        &self.host
    }

    /// Every event delivered so far, oldest first.
    pub fn events(&self) -> &[ViewerEvent] {
        &self.log
    }

    pub fn set_permissions(&mut self, permissions: Permissions) {
        self.viewer.set_permissions(permissions);
    }

    /// Turn the camera and poll hover under the pointer.
    pub fn look_at(&mut self, lat: f32, lng: f32) -> anyhow::Result<()> {
        self.viewer.camera_mut().set_orientation(lat, lng);
        self.tick()
    }

    pub fn move_pointer(&mut self, client: Vec2) -> anyhow::Result<()> {
        self.pointer = client;
        self.viewer.pointer_move(client);
        self.tick()
    }

    /// Press, move by `delta` and release; the trailing click is delivered
    /// as a browser would.
    pub fn drag(&mut self, delta: Vec2) -> anyhow::Result<()> {
        let from = self.pointer;
        self.viewer.pointer_down(from, true);
        self.move_pointer(from + delta)?;
        self.viewer.pointer_up(self.pointer);
        self.viewer.click(true);
        self.pump()
    }

    pub fn click(&mut self) -> anyhow::Result<()> {
        self.viewer.pointer_down(self.pointer, true);
        self.viewer.pointer_up(self.pointer);
        self.viewer.click(true);
        self.pump()
    }

    pub fn double_click(&mut self) -> anyhow::Result<()> {
        self.viewer.double_click(true);
        self.pump()?;
        self.tick()
    }

    pub fn wheel(&mut self, input: WheelInput) -> anyhow::Result<()> {
        self.viewer.wheel(input);
        self.tick()
    }

    pub fn next_image(&mut self) -> anyhow::Result<()> {
        let panorama = self.host.next_image().clone();
        self.show(panorama)
    }

    pub fn previous_image(&mut self) -> anyhow::Result<()> {
        let panorama = self.host.previous_image().clone();
        self.show(panorama)
    }

    fn show(&mut self, panorama: Panorama) -> anyhow::Result<()> {
        self.viewer.load_panorama(panorama);
        self.pump()?;
        self.refresh()?;
        self.tick()
    }

    fn tick(&mut self) -> anyhow::Result<()> {
        self.viewer.tick();
        self.pump()
    }

    fn refresh(&mut self) -> anyhow::Result<()> {
        let report = self
            .viewer
            .refresh_points_of_interest(self.host.points_of_interest())?;
        if !report.is_noop() {
            log::debug!("[session] refresh: {} marker ops", report.operations());
        }
        Ok(())
    }

    /// Hand queued events to the host, refreshing the viewer after each
    /// change to the POI list, until nothing is left.
    fn pump(&mut self) -> anyhow::Result<()> {
        loop {
            let Some(event) = self.inbox.borrow_mut().pop_front() else {
                break;
            };
            log::info!("[event] {}", serde_json::to_string(&event)?);
            if self.host.handle(&event) {
                self.refresh()?;
            }
            self.log.push(event);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::DESCRIPTIONS;
    use crate::log_scene::LogScene;

    fn session() -> Session<LogScene> {
        Session::start(
            LogScene::default(),
            ViewerConfig::default(),
            DemoHost::new(42),
            SurfaceRect::new(0.0, 0.0, 800.0, 600.0),
        )
        .expect("default session starts")
    }

    #[test]
    fn starts_on_the_first_panorama() {
        let s = session();
        assert_eq!(s.viewer().scene().texture(), Some("pano-images/00000-pano.jpeg"));
        assert_eq!(s.viewer().scene().marker_count(), 0);
        assert!(s.events().is_empty());
    }

    #[test]
    fn double_click_on_background_creates_and_hovers() {
        let mut s = session();
        s.look_at(0.0, 0.0).unwrap();
        s.double_click().unwrap();

        let pois = s.host().points_of_interest();
        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].id, 1);
        assert!(DESCRIPTIONS.contains(&pois[0].description.as_str()));
        assert_eq!(s.viewer().scene().marker_count(), 1);
        // The new marker sits under the pointer, so the next poll hovers it.
        assert_eq!(s.host().hovered(), Some(0));
        assert_eq!(s.host().current_poi_description(), pois[0].description);
    }

    #[test]
    fn click_selects_and_double_click_removes() {
        let mut s = session();
        s.look_at(0.0, 0.0).unwrap();
        s.double_click().unwrap();
        s.click().unwrap();
        assert_eq!(s.host().selected(), Some(0));

        s.double_click().unwrap();
        assert!(s.host().points_of_interest().is_empty());
        assert_eq!(s.host().selected(), None);
        assert_eq!(s.host().hovered(), None);
        assert_eq!(s.viewer().scene().marker_count(), 0);
    }

    #[test]
    fn selection_follows_its_poi_when_an_earlier_one_is_removed() {
        let mut s = session();
        for lng in [0.0, 60.0, 120.0] {
            s.look_at(0.0, lng).unwrap();
            s.double_click().unwrap();
        }
        s.click().unwrap();
        assert_eq!(s.host().selected(), Some(2));
        let description = s.host().current_poi_description().to_string();

        s.look_at(0.0, 0.0).unwrap();
        s.double_click().unwrap();

        assert_eq!(s.host().points_of_interest().len(), 2);
        assert_eq!(s.host().selected(), s.viewer().selected_slot());
        assert_eq!(s.host().selected(), Some(1));
        assert_eq!(s.host().current_poi_description(), description);
    }

    #[test]
    fn drag_pans_without_selecting() {
        let mut s = session();
        s.look_at(0.0, 0.0).unwrap();
        s.double_click().unwrap();
        s.drag(Vec2::new(-200.0, 0.0)).unwrap();
        assert!(s.viewer().camera().lng() > 5.0);
        assert_eq!(s.host().selected(), None);
        assert!(!s.events().iter().any(|e| matches!(e, ViewerEvent::Select { .. })));
    }

    #[test]
    fn carousel_restores_markers_per_panorama() {
        let mut s = session();
        s.look_at(0.0, 30.0).unwrap();
        s.double_click().unwrap();
        s.look_at(0.0, 90.0).unwrap();
        s.double_click().unwrap();
        assert_eq!(s.viewer().scene().marker_count(), 2);

        s.next_image().unwrap();
        assert_eq!(s.viewer().scene().texture(), Some("pano-images/00001-pano.jpeg"));
        assert_eq!(s.viewer().scene().marker_count(), 0);
        assert_eq!(s.host().hovered(), None);

        s.previous_image().unwrap();
        assert_eq!(s.viewer().registry().len(), 2);
        assert_eq!(s.viewer().scene().marker_count(), 2);
    }

    #[test]
    fn read_only_session_cannot_create() {
        let mut s = session();
        s.set_permissions(Permissions::READ_ONLY);
        s.look_at(0.0, 0.0).unwrap();
        s.double_click().unwrap();
        assert!(s.host().points_of_interest().is_empty());
        assert!(s.events().is_empty());
    }
}
