// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn projection_constants_are_sane() {
    assert!(FOV_NARROW_DEG > FOV_WIDE_DEG);
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_Z_NARROW > CAMERA_Z_WIDE);
    assert!(MAX_PIXEL_RATIO >= 1.0);
    assert_eq!(NARROW_BREAKPOINT_PX, 768.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timing_constants_are_positive() {
    assert!(RESIZE_DEBOUNCE_MS > 0);
    assert!(MAX_FRAME_DELTA_SEC > 0.0 && MAX_FRAME_DELTA_SEC < 1.0);
    assert!(ENTRY_DURATION_SEC > 0.0);
    assert!(PARALLAX_SMOOTHING_PER_SEC > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn narrow_layouts_are_lighter() {
    assert!(SOURCE_CUBES.0 < SOURCE_CUBES.1);
    assert!(PIPELINE_NODES.0 < PIPELINE_NODES.1);
    assert!(ORBITERS.0 < ORBITERS.1);
    assert!(PARTICLES.0 < PARTICLES.1);
    assert!(SECTION_SPACING_NARROW < SECTION_SPACING_WIDE);
    assert!(ROTATION_SPEED_NARROW < ROTATION_SPEED_WIDE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn orbiters_clear_the_core() {
    assert!(ORBIT_RADIUS.0 > DESTINATION_CORE_RADIUS);
    assert!(ORBIT_RADIUS.1 > DESTINATION_CORE_RADIUS);
    assert!(PIPELINE_NODE_RING.0 > PIPELINE_HUB_RADIUS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn visibility_ramp_is_well_formed() {
    assert!(VISIBILITY_NEAR < VISIBILITY_FAR);
    assert!(HIDDEN_OPACITY > 0.0 && HIDDEN_OPACITY < 1.0);
    assert!(HIDDEN_SCALE > 0.0 && HIDDEN_SCALE < 1.0);
    assert!(HIDDEN_DEPTH_OFFSET < 0.0);
    assert!(PARTICLE_OPACITY > 0.0 && PARTICLE_OPACITY <= 1.0);
}

#[test]
fn shadow_markup_is_a_passive_fixed_layer() {
    assert!(SHADOW_MARKUP.contains("<canvas></canvas>"));
    assert!(SHADOW_MARKUP.contains("position: fixed"));
    assert!(SHADOW_MARKUP.contains("pointer-events: none"));
    assert!(SHADOW_MARKUP.contains("z-index: 0"));
}

#[test]
fn dom_names_match_the_page_contract() {
    assert_eq!(ELEMENT_TAG, "data-infrastructure-scene");
    assert!(THEME_OPTION_SELECTOR.starts_with('.'));
    assert!(DARK_SCHEME_QUERY.contains("prefers-color-scheme: dark"));
    assert!(REDUCED_MOTION_QUERY.contains("prefers-reduced-motion"));
    assert!(THEME_OBSERVED_ATTRIBUTES.contains(&"data-theme"));
}

#[test]
fn theme_options_wait_for_the_parsed_body() {
    // `load` would also wait for images and stylesheets.
    assert_eq!(DOM_READY_EVENT, "DOMContentLoaded");
}
