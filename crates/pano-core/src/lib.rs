pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod gesture;
pub mod hover;
pub mod model;
pub mod pointer;
pub mod ray;
pub mod reconcile;
pub mod registry;
pub mod scene;
pub mod ticker;
pub mod viewer;

pub use camera::PanoramaCamera;
pub use config::ViewerConfig;
pub use constants::*;
pub use error::{Result, ViewerError};
pub use events::{slot_index, EventBus, SubscriptionId, ViewerEvent};
pub use gesture::{DeltaMode, GestureInterpreter, WheelInput};
pub use hover::{HoverTransition, InteractionState, SelectOutcome};
pub use model::{Panorama, Permissions, PointOfInterest};
pub use pointer::{to_ndc, PointerTracker, SurfaceRect};
pub use ray::{Hit, Hits, Ray};
pub use reconcile::{reconcile, ReconcileReport};
pub use registry::{Marker, MarkerId, MarkerRegistry, MarkerState};
pub use scene::{Cursor, Scene};
pub use ticker::FrameTicker;
pub use viewer::Viewer;
