use particle_field::{Bounds, Host};

/// What a field draws into: a tessellated vertex buffer with the `vectors`
/// feature, a recorded command list for a Canvas 2D bridge without it.
#[cfg(feature = "vectors")]
pub type CanvasSurface = particle_field::VectorSurface;
#[cfg(not(feature = "vectors"))]
pub type CanvasSurface = particle_field::CommandSurface;

/// Host backed by a page container.
///
/// JS reports the container's size (on creation and on every resize) and
/// owns the actual `<canvas>`; the surface handed out here is the vertex
/// buffer that canvas is drawn from.
pub struct CanvasHost {
    bounds: Option<Bounds>,
    attached: bool,
}

impl CanvasHost {
    /// A host for a container of the given CSS pixel size.
    /// Non-finite sizes mean the container could not be measured.
    pub fn new(width: f32, height: f32) -> Self {
        let mut host = Self { bounds: None, attached: false };
        host.set_bounds(width, height);
        host
    }

    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = if width.is_finite() && height.is_finite() {
            Some(Bounds::new(width, height).sanitized())
        } else {
            None
        };
    }

    pub fn has_surface(&self) -> bool {
        self.attached
    }
}

impl Host for CanvasHost {
    type Surface = CanvasSurface;

    fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    fn attach_surface(&mut self, bounds: Bounds) -> Option<CanvasSurface> {
        if self.attached {
            return None;
        }
        self.attached = true;
        Some(CanvasSurface::new(bounds))
    }

    fn detach_surface(&mut self, _surface: CanvasSurface) {
        self.attached = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmeasurable_container_has_no_bounds() {
        assert!(CanvasHost::new(f32::NAN, 10.0).bounds().is_none());
        assert_eq!(CanvasHost::new(-5.0, 10.0).bounds(), Some(Bounds::new(0.0, 10.0)));
    }

    #[test]
    fn one_surface_at_a_time() {
        let mut host = CanvasHost::new(100.0, 100.0);
        let surface = host.attach_surface(Bounds::new(100.0, 100.0)).unwrap();
        assert!(host.has_surface());
        assert!(host.attach_surface(Bounds::new(100.0, 100.0)).is_none());
        host.detach_surface(surface);
        assert!(!host.has_surface());
    }
}
