// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use carousel_core::{
    CarouselConfig, DEFAULT_ALIGNMENT, DEFAULT_PANEL_SPACING, DEFAULT_SLIDE_DURATION,
    DEFAULT_SLIDE_EASING, INITIAL_INDEX,
};
use constants::*;

#[test]
fn core_defaults_match_the_default_config() {
    let config = CarouselConfig::default();
    assert_eq!(config.slide_duration, DEFAULT_SLIDE_DURATION);
    assert_eq!(config.slide_easing, DEFAULT_SLIDE_EASING);
    assert_eq!(config.panel_spacing, DEFAULT_PANEL_SPACING);
    assert_eq!(config.alignment, DEFAULT_ALIGNMENT);
    assert_eq!(config.initial_index, INITIAL_INDEX);
    assert!(config.validate().is_ok());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn core_defaults_are_usable() {
    assert!(!DEFAULT_SLIDE_DURATION.is_zero());
    assert!(DEFAULT_PANEL_SPACING.is_finite() && DEFAULT_PANEL_SPACING != 0.0);
    assert_eq!(INITIAL_INDEX, 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_clamp_is_longer_than_a_frame() {
    assert!(MAX_FRAME_DT_SEC > 1.0 / 30.0);
    assert!(MAX_FRAME_DT_SEC < DEFAULT_SLIDE_DURATION.as_secs_f32());
}

#[test]
fn dom_hooks_are_distinct() {
    let ids = [
        CONTAINER_ID,
        MASK_ID,
        DETAIL_OVERLAY_ID,
        DETAIL_TITLE_ID,
        DETAIL_CLOSE_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(PANEL_SELECTOR.starts_with('.'));
    assert!(PANEL_TITLE_ATTR.starts_with("data-"));
}
