//! Volume helpers.

/// Clamp a linear gain into `[0, 1]`.
///
/// Non-finite input (NaN, ±inf) maps to silence.
#[inline]
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
