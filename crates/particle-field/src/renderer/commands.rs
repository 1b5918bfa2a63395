//! Recording surface.
//!
//! Stores each frame's draw calls as plain commands, for hosts that replay
//! them onto a Canvas 2D context and for inspecting frames in tests.

use super::surface::{LineDraw, ShapeDraw, Surface};
use crate::api::host::Bounds;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Shape(ShapeDraw),
    Line(LineDraw),
}

/// Surface that records the current frame's commands.
#[derive(Debug, Clone)]
pub struct CommandSurface {
    bounds: Bounds,
    commands: Vec<DrawCommand>,
    clears: u32,
}

impl CommandSurface {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            commands: Vec::with_capacity(256),
            clears: 0,
        }
    }

    /// Commands recorded since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn shapes(&self) -> impl Iterator<Item = &ShapeDraw> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Shape(s) => Some(s),
            DrawCommand::Line(_) => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineDraw> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line(l) => Some(l),
            DrawCommand::Shape(_) => None,
        })
    }

    /// Number of times the surface has been cleared.
    pub fn clear_count(&self) -> u32 {
        self.clears
    }
}

impl Surface for CommandSurface {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn fill_shape(&mut self, draw: &ShapeDraw) {
        self.commands.push(DrawCommand::Shape(*draw));
    }

    fn stroke_line(&mut self, draw: &LineDraw) {
        self.commands.push(DrawCommand::Line(*draw));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::color::Color;
    use crate::api::config::ParticleShape;
    use glam::Vec2;

    fn shape() -> ShapeDraw {
        ShapeDraw {
            shape: ParticleShape::Disc,
            center: Vec2::new(1.0, 2.0),
            radius: 3.0,
            rotation: 0.0,
            color: Color::WHITE,
        }
    }

    #[test]
    fn records_and_splits_commands() {
        let mut surface = CommandSurface::new(Bounds::new(100.0, 100.0));
        surface.fill_shape(&shape());
        surface.stroke_line(&LineDraw {
            from: Vec2::ZERO,
            to: Vec2::ONE,
            width: 0.5,
            color: Color::WHITE,
        });
        assert_eq!(surface.commands().len(), 2);
        assert_eq!(surface.shapes().count(), 1);
        assert_eq!(surface.lines().count(), 1);
    }

    #[test]
    fn clear_drops_commands() {
        let mut surface = CommandSurface::new(Bounds::new(100.0, 100.0));
        surface.fill_shape(&shape());
        surface.clear();
        assert!(surface.commands().is_empty());
        assert_eq!(surface.clear_count(), 1);
    }
}
