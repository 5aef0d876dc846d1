//! The host side of the viewer: owns the panoramas and their POI lists, and
//! tracks what the viewer reports as hovered and selected.

use pano_core::{Panorama, PointOfInterest, ViewerEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const PANORAMA_COUNT: usize = 6;

/// Descriptions handed out to freshly created POIs.
pub const DESCRIPTIONS: [&str; 6] = [
    "Look at me!",
    "Over here!",
    "Can you see me?",
    "What're you looking at?",
    "Why hello there!",
    "Isn't this interesting?",
];

pub fn image_source(index: usize) -> String {
    format!("pano-images/{:05}-pano.jpeg", index)
}

#[derive(Debug)]
pub struct DemoHost {
    panoramas: Vec<Panorama>,
    current: usize,
    hovered: Option<usize>,
    selected: Option<usize>,
    rng: StdRng,
}

impl DemoHost {
    /// Six panoramas with empty POI lists, showing the first.
    pub fn new(seed: u64) -> Self {
        let panoramas = (0..PANORAMA_COUNT)
            .map(|i| Panorama {
                id: i as u32 + 1,
                image_source: image_source(i),
                ..Panorama::default()
            })
            .collect();
        Self {
            panoramas,
            current: 0,
            hovered: None,
            selected: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn panorama(&self) -> &Panorama {
        &self.panoramas[self.current]
    }

    pub fn points_of_interest(&self) -> &[PointOfInterest] {
        &self.panorama().points_of_interest
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Description of the selected POI, else of the hovered one, else empty.
    pub fn current_poi_description(&self) -> &str {
        let pois = self.points_of_interest();
        self.selected
            .and_then(|i| pois.get(i))
            .or_else(|| self.hovered.and_then(|i| pois.get(i)))
            .map_or("", |poi| poi.description.as_str())
    }

    pub fn next_image(&mut self) -> &Panorama {
        self.current = (self.current + 1) % self.panoramas.len();
        self.panorama()
    }

    pub fn previous_image(&mut self) -> &Panorama {
        self.current = (self.current + self.panoramas.len() - 1) % self.panoramas.len();
        self.panorama()
    }

    /// Apply one viewer event. Returns `true` when the POI list changed and
    /// the viewer has to be refreshed.
    pub fn handle(&mut self, event: &ViewerEvent) -> bool {
        match event {
            ViewerEvent::HoverEnter { slot } => {
                self.hovered = Some(*slot);
                false
            }
            ViewerEvent::HoverExit => {
                self.hovered = None;
                false
            }
            ViewerEvent::Select { slot } => {
                self.selected = *slot;
                false
            }
            ViewerEvent::Create { poi } => {
                let mut poi = poi.clone();
                let pick = self.rng.gen_range(0..DESCRIPTIONS.len());
                poi.description = DESCRIPTIONS[pick].to_string();
                log::info!("[host] new poi {}: {:?}", poi.id, poi.description);
                self.panoramas[self.current].points_of_interest.push(poi);
                true
            }
            ViewerEvent::Remove { slot } => {
                let pois = &mut self.panoramas[self.current].points_of_interest;
                if *slot < pois.len() {
                    let poi = pois.remove(*slot);
                    log::info!("[host] removed poi {}", poi.id);
                    // Later markers moved down a slot without further events.
                    self.hovered = shift_after_removal(self.hovered, *slot);
                    self.selected = shift_after_removal(self.selected, *slot);
                    true
                } else {
                    log::warn!("[host] remove of unknown slot {}", slot);
                    false
                }
            }
        }
    }
}

fn shift_after_removal(index: Option<usize>, removed: usize) -> Option<usize> {
    match index {
        Some(i) if i == removed => None,
        Some(i) if i > removed => Some(i - 1),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn created(id: u32) -> ViewerEvent {
        ViewerEvent::Create {
            poi: PointOfInterest::new(id, Vec3::X * 20.0),
        }
    }

    #[test]
    fn carousel_wraps_both_ways() {
        let mut host = DemoHost::new(1);
        assert_eq!(host.panorama().image_source, "pano-images/00000-pano.jpeg");
        assert_eq!(host.previous_image().id, 6);
        assert_eq!(host.panorama().image_source, "pano-images/00005-pano.jpeg");
        assert_eq!(host.next_image().id, 1);
        assert_eq!(host.next_image().id, 2);
    }

    #[test]
    fn create_appends_with_a_pooled_description() {
        let mut host = DemoHost::new(7);
        assert!(host.handle(&created(1)));
        assert!(host.handle(&created(2)));
        let pois = host.points_of_interest();
        assert_eq!(pois.len(), 2);
        assert_eq!(pois[1].id, 2);
        assert!(pois.iter().all(|p| DESCRIPTIONS.contains(&p.description.as_str())));
    }

    #[test]
    fn pois_belong_to_their_panorama() {
        let mut host = DemoHost::new(3);
        host.handle(&created(1));
        host.next_image();
        assert!(host.points_of_interest().is_empty());
        host.previous_image();
        assert_eq!(host.points_of_interest().len(), 1);
    }

    #[test]
    fn remove_out_of_range_is_ignored() {
        let mut host = DemoHost::new(3);
        host.handle(&created(1));
        assert!(!host.handle(&ViewerEvent::Remove { slot: 4 }));
        assert!(host.handle(&ViewerEvent::Remove { slot: 0 }));
        assert!(host.points_of_interest().is_empty());
    }

    #[test]
    fn removal_shifts_later_indices_down() {
        let mut host = DemoHost::new(3);
        for id in 1..=3 {
            host.handle(&created(id));
        }
        host.handle(&ViewerEvent::Select { slot: Some(2) });
        host.handle(&ViewerEvent::HoverEnter { slot: 1 });
        let before = host.current_poi_description().to_string();

        host.handle(&ViewerEvent::Remove { slot: 0 });
        assert_eq!(host.selected(), Some(1));
        assert_eq!(host.hovered(), Some(0));
        assert_eq!(host.current_poi_description(), before);

        host.handle(&ViewerEvent::Remove { slot: 0 });
        assert_eq!(host.hovered(), None);
        assert_eq!(host.selected(), Some(0));
    }

    #[test]
    fn selection_wins_over_hover_for_description() {
        let mut host = DemoHost::new(3);
        host.handle(&created(1));
        host.handle(&created(2));
        host.panoramas[0].points_of_interest[0].description = "first".into();
        host.panoramas[0].points_of_interest[1].description = "second".into();

        assert_eq!(host.current_poi_description(), "");
        assert!(!host.handle(&ViewerEvent::HoverEnter { slot: 1 }));
        assert_eq!(host.current_poi_description(), "second");
        host.handle(&ViewerEvent::Select { slot: Some(0) });
        assert_eq!(host.current_poi_description(), "first");
        host.handle(&ViewerEvent::Select { slot: None });
        host.handle(&ViewerEvent::HoverExit);
        assert_eq!(host.current_poi_description(), "");
    }

    #[test]
    fn stale_indices_give_an_empty_description() {
        let mut host = DemoHost::new(3);
        host.handle(&ViewerEvent::Select { slot: Some(3) });
        assert_eq!(host.selected(), Some(3));
        assert_eq!(host.current_poi_description(), "");
    }
}
