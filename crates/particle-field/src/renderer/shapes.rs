//! Outline geometry for the particle shapes.

use glam::Vec2;

use crate::api::config::ParticleShape;

/// Segments used when a disc has to be approximated by a polygon.
pub const DISC_SEGMENTS: usize = 24;
/// Points on a star.
pub const STAR_POINTS: usize = 5;
/// Inner radius of a star relative to its outer radius.
pub const STAR_INNER_RATIO: f32 = 0.5;

/// Closed outline of `shape` around `center`, rotated by `rotation` radians.
/// Returns an empty outline for a non-positive radius.
pub fn outline(shape: ParticleShape, center: Vec2, radius: f32, rotation: f32) -> Vec<Vec2> {
    if radius <= 0.0 || !radius.is_finite() {
        return Vec::new();
    }
    let local: Vec<Vec2> = match shape {
        ParticleShape::Disc => (0..DISC_SEGMENTS)
            .map(|i| {
                let angle = i as f32 / DISC_SEGMENTS as f32 * std::f32::consts::TAU;
                Vec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect(),
        ParticleShape::Square => vec![
            Vec2::new(-radius, -radius),
            Vec2::new(radius, -radius),
            Vec2::new(radius, radius),
            Vec2::new(-radius, radius),
        ],
        ParticleShape::Triangle => vec![
            Vec2::new(0.0, -radius),
            Vec2::new(-radius, radius),
            Vec2::new(radius, radius),
        ],
        ParticleShape::Star => (0..STAR_POINTS * 2)
            .map(|i| {
                let angle = i as f32 * std::f32::consts::PI / STAR_POINTS as f32;
                let r = if i % 2 == 0 { radius } else { radius * STAR_INNER_RATIO };
                Vec2::new(angle.cos(), angle.sin()) * r
            })
            .collect(),
    };
    let rot = Vec2::from_angle(rotation);
    local.into_iter().map(|p| center + rot.rotate(p)).collect()
}
