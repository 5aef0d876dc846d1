//! Hover and selection state.
//!
//! Hover is re-derived every tick from whatever the pointer ray hits; a
//! selection only changes through clicks and removals and survives hover
//! changes. Markers are tracked by id so a shrinking registry cannot make the
//! state point at the wrong slot.

use crate::registry::{MarkerId, MarkerState};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTransition {
    Enter(MarkerId),
    Exit(MarkerId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// `current` became selected; `previous` lost its selection without a
    /// separate deselect.
    Selected {
        previous: Option<MarkerId>,
        current: MarkerId,
    },
    Deselected(MarkerId),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    hovered: Option<MarkerId>,
    selected: Option<MarkerId>,
}

impl InteractionState {
    #[inline]
    pub fn hovered(&self) -> Option<MarkerId> {
        self.hovered
    }

    #[inline]
    pub fn selected(&self) -> Option<MarkerId> {
        self.selected
    }

    /// Visual state a marker should be drawn in. Selection wins over hover.
    pub fn state_of(&self, id: MarkerId) -> MarkerState {
        if self.selected == Some(id) {
            MarkerState::Selected
        } else if self.hovered == Some(id) {
            MarkerState::Hovered
        } else {
            MarkerState::Normal
        }
    }

    /// Feed this tick's nearest marker hit. Leaving the hovered marker exits
    /// first, then a new hit enters in the same tick. Staying on the same
    /// marker produces nothing.
    pub fn poll(&mut self, hit: Option<MarkerId>) -> SmallVec<[HoverTransition; 2]> {
        let mut out = SmallVec::new();
        if let Some(prev) = self.hovered {
            if hit == Some(prev) {
                return out;
            }
            self.hovered = None;
            out.push(HoverTransition::Exit(prev));
        }
        if let Some(id) = hit {
            self.hovered = Some(id);
            out.push(HoverTransition::Enter(id));
        }
        out
    }

    /// Click on the hovered marker: select it, or deselect it when it is
    /// already selected. Nothing hovered means nothing changes.
    pub fn click(&mut self) -> Option<SelectOutcome> {
        let hovered = self.hovered?;
        if self.selected == Some(hovered) {
            self.selected = None;
            Some(SelectOutcome::Deselected(hovered))
        } else {
            let previous = self.selected.replace(hovered);
            Some(SelectOutcome::Selected {
                previous,
                current: hovered,
            })
        }
    }

    pub fn deselect(&mut self) -> Option<MarkerId> {
        self.selected.take()
    }

    /// Drop hover/selection for markers that no longer exist. Returns which
    /// of the two were cleared.
    pub fn retain(&mut self, mut alive: impl FnMut(MarkerId) -> bool) -> (bool, bool) {
        let lost_hover = self.hovered.is_some_and(|id| !alive(id));
        if lost_hover {
            self.hovered = None;
        }
        let lost_selection = self.selected.is_some_and(|id| !alive(id));
        if lost_selection {
            self.selected = None;
        }
        (lost_hover, lost_selection)
    }
}
