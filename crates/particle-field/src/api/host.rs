use crate::renderer::surface::Surface;

/// Pixel size of a host container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Negative or non-finite sizes become zero.
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self::new(fix(self.width), fix(self.height))
    }
}

/// The container a field lives in.
///
/// The host reports its current bounds and lends the field a drawing surface.
/// The field hands the surface back on destroy; the host's own lifecycle is
/// not managed by the field.
pub trait Host {
    type Surface: Surface;

    /// Current pixel bounds, or `None` when the container is detached.
    fn bounds(&self) -> Option<Bounds>;

    /// Create a surface sized to `bounds` and attach it to the container.
    fn attach_surface(&mut self, bounds: Bounds) -> Option<Self::Surface>;

    /// Take back a surface previously returned by `attach_surface`.
    fn detach_surface(&mut self, surface: Self::Surface);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_sanitized() {
        assert_eq!(Bounds::new(-4.0, f32::NAN).sanitized(), Bounds::new(0.0, 0.0));
        assert_eq!(Bounds::new(640.0, 480.0).sanitized(), Bounds::new(640.0, 480.0));
    }
}
