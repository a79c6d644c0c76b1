//! Exponential smoothing of emitted weights across frames.

/// Smoothing factor actually used: clamped into `(0, 1]`.
/// Non-positive or non-finite factors disable smoothing.
pub fn effective_factor(factor: f32) -> f32 {
    if factor.is_finite() && factor > 0.0 {
        factor.min(1.0)
    } else {
        1.0
    }
}

/// `previous + (raw - previous) * factor`, or `raw` on first sight.
pub fn smooth(previous: Option<f32>, raw: f32, factor: f32) -> f32 {
    match previous {
        Some(previous) => previous + (raw - previous) * effective_factor(factor),
        None => raw,
    }
}
