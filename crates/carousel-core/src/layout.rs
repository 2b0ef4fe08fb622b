//! Resting positions of the panel row.
//!
//! Every function here is pure. Indices are assumed valid; the controller
//! checks them before calling in.

use glam::Vec2;

/// Anchored position of panel `index` when `current_index` is selected.
#[inline]
pub fn position_for(index: usize, current_index: usize, alignment: Vec2, spacing: f32) -> Vec2 {
    let steps = index as f32 - current_index as f32;
    Vec2::new(alignment.x + steps * spacing, alignment.y)
}

/// Uniform X shift that brings `target_index` to where `current_index` sits.
#[inline]
pub fn slide_offset(current_index: usize, target_index: usize, spacing: f32) -> f32 {
    (current_index as f32 - target_index as f32) * spacing
}

pub fn layout(count: usize, current_index: usize, alignment: Vec2, spacing: f32) -> Vec<Vec2> {
    (0..count)
        .map(|i| position_for(i, current_index, alignment, spacing))
        .collect()
}

/// Index of the panel under `point`, if any.
///
/// Panels are `panel_size` rectangles centred on their anchored position.
/// Where panels overlap the lowest index wins.
pub fn panel_at(positions: &[Vec2], panel_size: Vec2, point: Vec2) -> Option<usize> {
    let half = panel_size * 0.5;
    positions.iter().position(|p| {
        let d = (point - *p).abs();
        d.x <= half.x && d.y <= half.y
    })
}
