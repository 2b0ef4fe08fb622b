use carousel_core::{CarouselConfig, Easing};
use glam::Vec2;
use std::time::Duration;

// Carousel settings read from `data-*` attributes on the panel container,
// plus the CSS strings the DOM surface writes back.

pub const ATTR_SLIDE_DURATION: &str = "data-slide-duration"; // seconds
pub const ATTR_SLIDE_EASING: &str = "data-slide-easing"; // e.g. ease-out-cubic
pub const ATTR_PANEL_SPACING: &str = "data-panel-spacing"; // px
pub const ATTR_ALIGN_X: &str = "data-align-x"; // px
pub const ATTR_ALIGN_Y: &str = "data-align-y"; // px

/// Parse one numeric attribute, falling back to `default` when it is
/// missing, unparsable or not finite.
pub fn parse_setting(name: &str, raw: Option<&str>, default: f32) -> f32 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            log::warn!("[settings] {name}={raw:?} is not a number; using {default}");
            default
        }
    }
}

/// Resolve a named easing curve, falling back to `default` when the name is
/// missing or unknown.
pub fn parse_easing(raw: Option<&str>, default: Easing) -> Easing {
    let Some(raw) = raw else {
        return default;
    };
    Easing::from_name(raw).unwrap_or_else(|| {
        log::warn!("[settings] {ATTR_SLIDE_EASING}={raw:?} is not a known curve; using {default:?}");
        default
    })
}

/// Build a carousel config from an attribute lookup (usually
/// `Element::get_attribute` on the container).
pub fn config_from_attributes(lookup: impl Fn(&str) -> Option<String>) -> CarouselConfig {
    let defaults = CarouselConfig::default();
    let read = |name: &str, default: f32| parse_setting(name, lookup(name).as_deref(), default);

    let slide_secs = read(ATTR_SLIDE_DURATION, defaults.slide_duration.as_secs_f32());
    let slide_duration = match Duration::try_from_secs_f32(slide_secs) {
        Ok(d) if !d.is_zero() => d,
        _ => {
            log::warn!("[settings] slide duration {slide_secs}s must be positive; using default");
            defaults.slide_duration
        }
    };

    CarouselConfig {
        slide_duration,
        slide_easing: parse_easing(lookup(ATTR_SLIDE_EASING).as_deref(), defaults.slide_easing),
        panel_spacing: read(ATTR_PANEL_SPACING, defaults.panel_spacing),
        alignment: Vec2::new(
            read(ATTR_ALIGN_X, defaults.alignment.x),
            read(ATTR_ALIGN_Y, defaults.alignment.y),
        ),
        ..defaults
    }
}

#[inline]
pub fn translate_css(position: Vec2) -> String {
    format!("translate({:.2}px, {:.2}px)", position.x, position.y)
}

/// `content-visibility` value for a panel's culling flag.
#[inline]
pub fn content_visibility(cull: bool) -> &'static str {
    if cull {
        "auto"
    } else {
        "visible"
    }
}
