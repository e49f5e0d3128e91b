//! Pure spline math: Catmull-Rom interpolation and open-curve resampling.
//!
//! Particle trails keep a handful of recent positions; the renderer wants a
//! smooth polyline through them. `sample_open_curve` fits a uniform
//! Catmull-Rom curve through the control points and resamples it at a fixed
//! segment count, optionally covering only the leading fraction of the curve.

use crate::Vec3;

/// Catmull-Rom spline interpolation between four points.
pub fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    Vec3::new(
        catmull_rom_scalar(p0.x, p1.x, p2.x, p3.x, t),
        catmull_rom_scalar(p0.y, p1.y, p2.y, p3.y, t),
        catmull_rom_scalar(p0.z, p1.z, p2.z, p3.z, t),
    )
}

/// Catmull-Rom interpolation for a single scalar value.
pub fn catmull_rom_scalar(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Evaluate an open Catmull-Rom curve through `points` at parameter `u` in [0, 1].
///
/// Phantom endpoints are created by reflecting the first and last segments
/// outward, so the curve passes through every control point including both
/// ends. Callers guarantee `points.len() >= 2`.
fn evaluate_open(points: &[Vec3], u: f32) -> Vec3 {
    let n = points.len();
    let num_segs = n - 1;

    let scaled = u.clamp(0.0, 1.0) * num_segs as f32;
    let seg = (scaled.floor() as usize).min(num_segs - 1);
    let local_t = scaled - seg as f32;

    let p1 = points[seg];
    let p2 = points[seg + 1];
    let p0 = if seg == 0 { p1 * 2.0 - p2 } else { points[seg - 1] };
    let p3 = if seg + 2 < n { points[seg + 2] } else { p2 * 2.0 - p1 };

    catmull_rom(p0, p1, p2, p3, local_t)
}

/// Resample an open Catmull-Rom curve through `points`.
///
/// Returns `segments + 1` samples evenly spaced in curve parameter over
/// `[0, fraction]`. Fewer than two control points, or zero segments, yield
/// an empty polyline.
pub fn sample_open_curve(points: &[Vec3], segments: usize, fraction: f32) -> Vec<Vec3> {
    if points.len() < 2 || segments == 0 {
        return Vec::new();
    }
    let fraction = fraction.clamp(0.0, 1.0);

    (0..=segments)
        .map(|i| {
            let u = i as f32 / segments as f32 * fraction;
            evaluate_open(points, u)
        })
        .collect()
}

/// Total length of a polyline.
pub fn polyline_length(points: &[Vec3]) -> f32 {
    points
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).length())
        .sum()
}
