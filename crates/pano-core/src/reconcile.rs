//! Converge the marker registry on a host-supplied POI list.
//!
//! Matching is positional: slot `i` belongs to `pois[i]`. A marker is kept
//! while it sits at the same position as the POI in its slot; differences in
//! id, name or description go unnoticed. Inserting into the middle of the host
//! list therefore rebuilds every marker after the insertion point.

use crate::model::PointOfInterest;
use crate::registry::MarkerRegistry;
use crate::scene::Scene;

/// Slots touched by one reconciliation pass, in operation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: Vec<usize>,
    pub removed: Vec<usize>,
}

impl ReconcileReport {
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.removed.is_empty()
    }

    /// Total marker operations performed.
    #[inline]
    pub fn operations(&self) -> usize {
        self.created.len() + self.removed.len()
    }

    /// Slots that were both removed and recreated.
    pub fn rebuilt(&self) -> Vec<usize> {
        self.removed
            .iter()
            .copied()
            .filter(|slot| self.created.contains(slot))
            .collect()
    }
}

pub fn reconcile<S: Scene>(
    registry: &mut MarkerRegistry,
    scene: &mut S,
    pois: &[PointOfInterest],
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let span = registry.len().max(pois.len());

    for slot in 0..span {
        let current = registry.get(slot).map(|m| m.position);
        match (current, pois.get(slot)) {
            (None, Some(poi)) => {
                registry.create_marker(scene, poi, slot);
                report.created.push(slot);
            }
            (Some(_), None) => {
                // Tombstone only: shrinking mid-scan would shift later slots.
                registry.remove_marker(scene, slot, false);
                report.removed.push(slot);
            }
            (Some(position), Some(poi)) if position != poi.position => {
                registry.remove_marker(scene, slot, false);
                report.removed.push(slot);
                registry.create_marker(scene, poi, slot);
                report.created.push(slot);
            }
            _ => {}
        }
    }

    registry.truncate(pois.len());

    if !report.is_noop() {
        log::debug!(
            "[reconcile] len={} created={:?} removed={:?}",
            pois.len(),
            report.created,
            report.removed
        );
    }
    report
}
