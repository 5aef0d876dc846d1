//! Semantic events pushed to the host.
//!
//! Delivery is synchronous: `emit` runs every subscriber before returning.
//! A subscriber must not call back into the viewer that emitted the event;
//! hosts that need to react with a command queue the event first.

use crate::model::PointOfInterest;
use serde::{Serialize, Serializer};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ViewerEvent {
    HoverEnter {
        slot: usize,
    },
    HoverExit,
    /// `None` deselects; it serializes as `-1`.
    Select {
        #[serde(serialize_with = "slot_or_minus_one")]
        slot: Option<usize>,
    },
    Create {
        poi: PointOfInterest,
    },
    Remove {
        slot: usize,
    },
}

impl ViewerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ViewerEvent::HoverEnter { .. } => "hover-enter",
            ViewerEvent::HoverExit => "hover-exit",
            ViewerEvent::Select { .. } => "select",
            ViewerEvent::Create { .. } => "create",
            ViewerEvent::Remove { .. } => "remove",
        }
    }
}

/// Index form used by hosts that track "no selection" as `-1`.
#[inline]
pub fn slot_index(slot: Option<usize>) -> i64 {
    slot.map_or(-1, |s| s as i64)
}

fn slot_or_minus_one<S: Serializer>(slot: &Option<usize>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_i64(slot_index(*slot))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&ViewerEvent)>;

#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, f: impl FnMut(&ViewerEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, event: ViewerEvent) {
        log::debug!("[event] {:?}", event);
        for (_, sub) in self.subscribers.iter_mut() {
            sub(&event);
        }
    }
}
