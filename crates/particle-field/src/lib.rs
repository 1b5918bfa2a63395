//! Headless particle field renderer for decorative page backgrounds.
//!
//! A [`ParticleField`] owns a set of drifting particles, steps them once per
//! host animation frame and draws them (plus proximity lines) through a
//! [`Surface`] lent by its [`Host`]. The browser side lives in `particle-web`.

pub mod api;
pub mod core;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::color::Color;
pub use api::config::{FieldConfig, ParticleShape, Range, MAX_PARTICLES};
pub use api::host::{Bounds, Host};
pub use api::presets::Preset;
pub use core::burst::{BurstId, BURST_LIFETIME_MS, CLICK_BURST_COUNT};
pub use core::field::{connection_strength, InitError, ParticleField, RenderStats};
pub use core::particle::Particle;
pub use core::rng::Rng;
pub use core::time::{FrameClock, FrameLoop, Ticker, FRAME_MS};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::commands::{CommandSurface, DrawCommand};
pub use renderer::surface::{LineDraw, ShapeDraw, Surface};

#[cfg(feature = "vectors")]
pub use renderer::vector::{VectorSurface, VectorVertex};
