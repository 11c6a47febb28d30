use crate::constants::{POINTER_PARALLAX, SCROLL_PARALLAX};
use glam::{Vec2, Vec3};

/// Last-write-wins snapshot of the global pointer/scroll signals.
///
/// Event listeners overwrite the fields as samples arrive; each frame loop
/// reads the snapshot once at the top of its frame. Stale-between-frames
/// reads are acceptable, there is no queueing.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputSnapshot {
    /// Pointer position in normalized device coordinates, -1..1, +Y up.
    pub pointer_ndc: Vec2,
    /// Vertical scroll offset in CSS pixels.
    pub scroll_y: f32,
}

/// Map client (CSS px) pointer coordinates to NDC.
#[inline]
pub fn pointer_to_ndc(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new(
        (2.0 * client_x / w - 1.0).clamp(-1.0, 1.0),
        (1.0 - 2.0 * client_y / h).clamp(-1.0, 1.0),
    )
}

/// Pointer-driven world offset for a scene object; deeper indices move more.
#[inline]
pub fn pointer_offset(pointer_ndc: Vec2, index: usize) -> Vec3 {
    let depth = (index + 1) as f32;
    Vec3::new(
        pointer_ndc.x * POINTER_PARALLAX * depth,
        pointer_ndc.y * POINTER_PARALLAX * depth,
        0.0,
    )
}

/// Scroll-driven world offset, linear in the scroll position.
#[inline]
pub fn scroll_offset(scroll_y: f32) -> Vec3 {
    Vec3::new(0.0, scroll_y * SCROLL_PARALLAX, 0.0)
}
