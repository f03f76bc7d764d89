/// Saturation ceiling for the growth layer: half of the largest finite `f64`.
pub const SAFE_MAX: f64 = f64::MAX / 2.0;

/// Collapse NaN and anything above [`SAFE_MAX`] to the [`SAFE_MAX`] sentinel.
///
/// This is a hard ceiling, not a scaled clamp. Values at or below the ceiling
/// pass through untouched, including negative infinity.
#[inline]
#[must_use]
pub fn saturate(value: f64) -> f64 {
    if value.is_nan() || value > SAFE_MAX {
        tracing::trace!(value, "growth term saturated");
        SAFE_MAX
    } else {
        value
    }
}
