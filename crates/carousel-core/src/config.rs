use crate::constants::{
    DEFAULT_ALIGNMENT, DEFAULT_PANEL_SPACING, DEFAULT_SLIDE_DURATION, DEFAULT_SLIDE_EASING,
    INITIAL_INDEX,
};
use crate::easing::Easing;
use crate::error::{CarouselError, Result};
use glam::Vec2;
use std::time::Duration;

/// Tunable carousel settings, read once at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselConfig {
    pub slide_duration: Duration,
    pub slide_easing: Easing,
    /// Horizontal distance between neighbouring panels. Negative reverses
    /// the direction panels are laid out in.
    pub panel_spacing: f32,
    /// Screen point the selected panel is kept aligned to.
    pub alignment: Vec2,
    /// Accepted for completeness; selection always starts at index 0.
    pub initial_index: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slide_duration: DEFAULT_SLIDE_DURATION,
            slide_easing: DEFAULT_SLIDE_EASING,
            panel_spacing: DEFAULT_PANEL_SPACING,
            alignment: DEFAULT_ALIGNMENT,
            initial_index: INITIAL_INDEX,
        }
    }
}

impl CarouselConfig {
    pub fn with_slide_duration(mut self, duration: Duration) -> Self {
        self.slide_duration = duration;
        self
    }

    pub fn with_slide_easing(mut self, easing: Easing) -> Self {
        self.slide_easing = easing;
        self
    }

    pub fn with_panel_spacing(mut self, spacing: f32) -> Self {
        self.panel_spacing = spacing;
        self
    }

    pub fn with_alignment(mut self, x: f32, y: f32) -> Self {
        self.alignment = Vec2::new(x, y);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.slide_duration.is_zero() {
            return Err(CarouselError::InvalidSetting {
                name: "slide_duration",
                value: format!("{:?}", self.slide_duration),
            });
        }
        if !self.panel_spacing.is_finite() {
            return Err(CarouselError::InvalidSetting {
                name: "panel_spacing",
                value: self.panel_spacing.to_string(),
            });
        }
        if !self.alignment.is_finite() {
            return Err(CarouselError::InvalidSetting {
                name: "alignment",
                value: format!("({}, {})", self.alignment.x, self.alignment.y),
            });
        }
        Ok(())
    }
}
