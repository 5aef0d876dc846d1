// Host-side tests for constants and their mathematical relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use pano_core::ViewerConfig;

#[test]
#[allow(clippy::assertions_on_constants)]
fn colors_are_normalized() {
    for c in CLEAR_COLOR {
        assert!((0.0..=1.0).contains(&c));
    }
    for c in MARKER_COLOR.iter().chain(MARKER_ACTIVE_COLOR.iter()) {
        assert!((0.0..=1.0).contains(c));
    }
    // active markers are never fainter than resting ones
    assert!(MARKER_ACTIVE_COLOR[3] >= MARKER_COLOR[3]);
    assert_eq!(PLACEHOLDER_TEXEL[3], 255);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn render_limits_are_sane() {
    assert!(MARKER_EDGE_SOFTNESS > 0.0 && MARKER_EDGE_SOFTNESS < 1.0);
    assert!(INITIAL_MARKER_CAPACITY.is_power_of_two());
    assert!(MAX_DEVICE_PIXEL_RATIO >= 1.0);
    assert!(!DEFAULT_CANVAS_ID.is_empty());
}

#[test]
fn default_viewer_config_matches_the_web_defaults() {
    let config = ViewerConfig::default();
    assert!(config.validate().is_ok());
    assert!(config.marker_size_active > config.marker_size_normal);
    assert!(config.sphere_radius < config.far_clip);
}
