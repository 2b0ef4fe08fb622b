/// Easing curves available to position tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Decelerating curve used for panel slides.
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
    EaseOutQuart,
    EaseOutExpo,
}

impl Easing {
    /// Look a curve up by its kebab-case name, e.g. `"ease-out-cubic"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(Easing::Linear),
            "ease-out-cubic" => Some(Easing::EaseOutCubic),
            "ease-in-out-cubic" => Some(Easing::EaseInOutCubic),
            "ease-out-quart" => Some(Easing::EaseOutQuart),
            "ease-out-expo" => Some(Easing::EaseOutExpo),
            _ => None,
        }
    }

    /// Map linear progress `t` (clamped to 0..=1) onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
        }
    }
}
