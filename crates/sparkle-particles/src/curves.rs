//! Value-over-lifetime curves for particle and trail fading

/// Remaining lifetime as a fraction of the initial lifetime, clamped to [0, 1]
pub fn normalized_age(remaining: f32, initial: f32) -> f32 {
    if initial <= 0.0 {
        0.0
    } else {
        (remaining / initial).clamp(0.0, 1.0)
    }
}

/// Cubic fade: bright start, fast falloff, long dim tail
pub fn fade_alpha(normalized_age: f32) -> f32 {
    normalized_age * normalized_age * normalized_age
}

/// Fraction of the trail curve still drawn. Full length until the particle
/// ages past `threshold`, then shrinks linearly to zero at death.
pub fn retraction_fraction(normalized_age: f32, threshold: f32) -> f32 {
    if normalized_age >= threshold {
        1.0
    } else {
        (normalized_age / threshold).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_age_endpoints() {
        assert_eq!(normalized_age(1.0, 1.0), 1.0);
        assert_eq!(normalized_age(0.5, 2.0), 0.25);
        assert_eq!(normalized_age(-0.1, 1.0), 0.0);
        assert_eq!(normalized_age(1.0, 0.0), 0.0);
    }

    #[test]
    fn fade_is_cubic() {
        assert_eq!(fade_alpha(1.0), 1.0);
        assert_eq!(fade_alpha(0.5), 0.125);
        assert_eq!(fade_alpha(0.0), 0.0);
    }

    #[test]
    fn retraction_shrinks_below_threshold() {
        assert_eq!(retraction_fraction(0.9, 0.5), 1.0);
        assert_eq!(retraction_fraction(0.5, 0.5), 1.0);
        assert!((retraction_fraction(0.25, 0.5) - 0.5).abs() < 1e-6);
        assert_eq!(retraction_fraction(0.0, 0.5), 0.0);
    }
}
