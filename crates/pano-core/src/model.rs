//! Host-facing data model.
//!
//! Field names follow the host's camelCase JSON so the same values can cross
//! the wasm boundary unchanged. Only `id` and `position` are required for a
//! point of interest; a freshly created one carries nothing else until the
//! host fills in its description.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A named, described marker anchored to a point on the panorama sphere.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub entity_id: f32,
    pub position: Vec3,
}

impl PointOfInterest {
    pub fn new(id: u32, position: Vec3) -> Self {
        Self {
            id,
            position,
            ..Self::default()
        }
    }
}

/// One panorama image together with the host's ordered POI list for it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panorama {
    pub id: u32,
    #[serde(default)]
    pub floor_id: u32,
    #[serde(alias = "dataUri")]
    pub image_source: String,
    #[serde(default)]
    pub points_of_interest: Vec<PointOfInterest>,
}

/// Which POI gestures the host allows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    pub select: bool,
    pub create: bool,
    pub remove: bool,
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            select: true,
            create: true,
            remove: true,
        }
    }
}

impl Permissions {
    pub const READ_ONLY: Permissions = Permissions {
        select: true,
        create: false,
        remove: false,
    };
}
