//! Lyon-backed vertex surface.
//!
//! Builds particle shapes and connection lines on the CPU into a flat
//! triangle list that the page uploads to WebGPU (or rasterizes on a 2D
//! canvas). The buffer is rebuilt every frame.
//!
//! Shapes are drawn as a glow: a triangle fan whose center vertex carries
//! the full color and whose rim vertices are fully transparent, so the GPU's
//! color interpolation produces the radial fade. Lines go through lyon's
//! stroke tessellator.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor,
    VertexBuffers,
};

use super::shapes::outline;
use super::surface::{LineDraw, ShapeDraw, Surface};
use crate::api::color::Color;
use crate::api::host::Bounds;

/// Tessellation tolerance in pixels.
const TOLERANCE: f32 = 0.1;

/// Per-vertex data: position plus straight RGBA.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn at(x: f32, y: f32, color: Color) -> Self {
        Self { x, y, r: color.r, g: color.g, b: color.b, a: color.a }
    }
}

struct StrokeCtor {
    color: Color,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

/// Surface producing a flat `[x, y, r, g, b, a]` triangle list.
pub struct VectorSurface {
    bounds: Bounds,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
}

impl VectorSurface {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(16384 * VectorVertex::FLOATS),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn vertices(&self) -> &[f32] {
        &self.buffer
    }

    /// Raw pointer to the flat float buffer (read from JS memory).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Fan from `center` (full color) to each outline point (transparent).
    fn fill_glow(&mut self, center: Vec2, rim: &[Vec2], color: Color) {
        if rim.len() < 3 {
            return;
        }
        let edge = color.with_alpha(0.0);
        for (i, a) in rim.iter().enumerate() {
            let b = rim[(i + 1) % rim.len()];
            self.buffer.extend_from_slice(bytemuck::cast_slice(&[
                VectorVertex::at(center.x, center.y, color),
                VectorVertex::at(a.x, a.y, edge),
                VectorVertex::at(b.x, b.y, edge),
            ]));
        }
    }
}

impl Surface for VectorSurface {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.buffer.clear();
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn fill_shape(&mut self, draw: &ShapeDraw) {
        let rim = outline(draw.shape, draw.center, draw.radius, draw.rotation);
        self.fill_glow(draw.center, &rim, draw.color);
    }

    fn stroke_line(&mut self, draw: &LineDraw) {
        if draw.width <= 0.0 || draw.from == draw.to {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(draw.from.x, draw.from.y));
        builder.line_to(point(draw.to.x, draw.to.y));
        builder.end(false);
        let path = builder.build();

        let result = self.stroke_tess.tessellate_path(
            &path,
            &StrokeOptions::tolerance(TOLERANCE).with_line_width(draw.width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeCtor { color: draw.color }),
        );
        match result {
            Ok(_) => self.flush_geometry(),
            Err(e) => {
                log::debug!("stroke tessellation failed: {:?}", e);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}
