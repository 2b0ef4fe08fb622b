use crate::easing::Easing;
use glam::Vec2;
use std::time::Duration;

// Shared carousel tuning constants used by both web and native frontends.

// Slide timing
pub const DEFAULT_SLIDE_DURATION: Duration = Duration::from_millis(500);
pub const DEFAULT_SLIDE_EASING: Easing = Easing::EaseOutCubic;

// Layout
pub const DEFAULT_PANEL_SPACING: f32 = 1000.0; // distance between neighbouring panels
pub const DEFAULT_ALIGNMENT: Vec2 = Vec2::ZERO; // where the selected panel rests

// Selection
pub const INITIAL_INDEX: usize = 0; // selection is always reset to this on start
