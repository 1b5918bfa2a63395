//! Drawing surface contract.
//!
//! A field draws through this trait once per frame: `clear`, then one
//! `fill_shape` per particle, then one `stroke_line` per connection.
//! Backends decide what a draw call becomes (tessellated vertices,
//! recorded commands for a Canvas 2D bridge, ...).

use glam::Vec2;

use crate::api::color::Color;
use crate::api::config::ParticleShape;
use crate::api::host::Bounds;

/// One particle's draw call. `color.a` already includes opacity and life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDraw {
    pub shape: ParticleShape,
    pub center: Vec2,
    pub radius: f32,
    pub rotation: f32,
    pub color: Color,
}

/// One connection line between two particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineDraw {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub color: Color,
}

pub trait Surface {
    /// Current pixel size.
    fn bounds(&self) -> Bounds;

    /// Resize the backing store. Contents may be discarded.
    fn set_bounds(&mut self, bounds: Bounds);

    /// Erase everything drawn since the last clear.
    fn clear(&mut self);

    fn fill_shape(&mut self, draw: &ShapeDraw);

    fn stroke_line(&mut self, draw: &LineDraw);
}
