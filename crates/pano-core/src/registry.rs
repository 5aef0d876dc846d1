//! Marker registry: the live markers, indexed by slot to match the host list.
//!
//! A slot may be `None` (a tombstone). Tombstones only exist while the
//! reconciler is mid-scan or when the host writes past the end of the list;
//! after `reconcile` returns every slot below the host length is occupied.

use crate::model::PointOfInterest;
use crate::scene::Scene;
use glam::Vec3;

/// Stable identity of a rendered marker. Slots shift, ids never do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkerState {
    #[default]
    Normal,
    Hovered,
    Selected,
}

impl MarkerState {
    #[inline]
    pub fn is_enlarged(self) -> bool {
        !matches!(self, MarkerState::Normal)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub position: Vec3,
    pub state: MarkerState,
}

#[derive(Debug)]
pub struct MarkerRegistry {
    slots: Vec<Option<Marker>>,
    next_id: u64,
    normal_size: f32,
}

impl MarkerRegistry {
    pub fn new(normal_size: f32) -> Self {
        Self {
            slots: Vec::new(),
            next_id: 1,
            normal_size,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The marker in `slot`, or `None` for tombstones and out-of-range slots.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<&Marker> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn slot_of(&self, id: MarkerId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|m| m.id == id))
    }

    pub fn contains(&self, id: MarkerId) -> bool {
        self.slot_of(id).is_some()
    }

    /// Occupied slots in order.
    pub fn live(&self) -> impl Iterator<Item = (usize, &Marker)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|m| (i, m)))
    }

    pub fn tombstones(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    pub fn set_state(&mut self, slot: usize, state: MarkerState) {
        if let Some(Some(m)) = self.slots.get_mut(slot) {
            m.state = state;
        }
    }

    /// Build a marker for `poi` and place it at `slot`, overwriting a
    /// tombstone. Writing past the end pads with tombstones so indices stay
    /// aligned with a sparse host list. An occupied slot must be removed
    /// first; the old marker would otherwise linger in the scene.
    pub fn create_marker<S: Scene>(
        &mut self,
        scene: &mut S,
        poi: &PointOfInterest,
        slot: usize,
    ) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        if slot >= self.slots.len() {
            self.slots.resize(slot + 1, None);
        }
        debug_assert!(self.slots[slot].is_none(), "slot {slot} still occupied");
        self.slots[slot] = Some(Marker {
            id,
            position: poi.position,
            state: MarkerState::Normal,
        });
        scene.add_marker(id, poi.position, self.normal_size);
        log::debug!(
            "[registry] create slot={} poi={} id={:?} pos=({:.2},{:.2},{:.2})",
            slot,
            poi.id,
            id,
            poi.position.x,
            poi.position.y,
            poi.position.z
        );
        id
    }

    /// Remove the marker in `slot` from the scene. With `shrink` the slot is
    /// spliced out and later slots move down; without it the slot becomes a
    /// tombstone. Empty and out-of-range slots are left alone.
    pub fn remove_marker<S: Scene>(
        &mut self,
        scene: &mut S,
        slot: usize,
        shrink: bool,
    ) -> Option<Marker> {
        let removed = self.slots.get_mut(slot)?.take()?;
        if shrink {
            self.slots.remove(slot);
        }
        scene.remove_marker(removed.id);
        log::debug!(
            "[registry] remove slot={} id={:?} shrink={}",
            slot,
            removed.id,
            shrink
        );
        Some(removed)
    }

    /// Remove every marker and empty the registry.
    pub fn clear_all<S: Scene>(&mut self, scene: &mut S) {
        let mut count = 0usize;
        for marker in self.slots.drain(..).flatten() {
            scene.remove_marker(marker.id);
            count += 1;
        }
        log::debug!("[registry] cleared {} markers", count);
    }

    /// Drop trailing slots. Slots past `len` must already be tombstones.
    pub(crate) fn truncate(&mut self, len: usize) {
        debug_assert!(
            self.slots.iter().skip(len).all(Option::is_none),
            "truncating live markers"
        );
        self.slots.truncate(len);
    }
}
