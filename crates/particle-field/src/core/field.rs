//! The particle field: owns the surface, the particles and the frame loop.

use glam::Vec2;
use thiserror::Error;

use super::burst::{radial_velocity, BurstId, BurstTracker, PendingBurst, BURST_SPEED, CLICK_BURST_COUNT};
use super::particle::{pick_color, Particle};
use super::rng::Rng;
use super::time::{FrameLoop, Ticker, FRAME_MS};
use crate::api::color::Color;
use crate::api::config::{FieldConfig, MAX_PARTICLES};
use crate::api::host::{Bounds, Host};
use crate::api::presets::{firework_palette, FIREWORK_INTERVAL_MS, FIREWORK_PARTICLES, FIREWORK_SHELLS, FIREWORK_SPREAD};
use crate::input::queue::InputEvent;
use crate::renderer::surface::{LineDraw, ShapeDraw, Surface};

/// Seed used when the configuration does not name one.
pub const DEFAULT_SEED: u64 = 42;
/// Alpha of a connection line between two coincident particles.
pub const CONNECTION_ALPHA: f32 = 0.2;
/// Connection line width in pixels.
pub const CONNECTION_WIDTH: f32 = 0.5;

/// Why a field could not be created. All of these are "missing collaborator".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("no host container")]
    MissingHost,
    #[error("host container reports no bounds")]
    NoBounds,
    #[error("host container could not supply a drawing surface")]
    SurfaceUnavailable,
}

/// What one `render` call drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub shapes: usize,
    pub lines: usize,
}

/// Connection strength for two particles `distance` apart: `1 - d / threshold`
/// below the threshold, `None` at or beyond it.
pub fn connection_strength(distance: f32, threshold: f32) -> Option<f32> {
    if threshold > 0.0 && distance < threshold {
        Some(1.0 - distance / threshold)
    } else {
        None
    }
}

/// An animated set of particles drawn onto a surface lent by a host.
pub struct ParticleField<H: Host> {
    host: H,
    surface: Option<H::Surface>,
    config: FieldConfig,
    bounds: Bounds,
    particles: Vec<Particle>,
    pointer: Option<Vec2>,
    rng: Rng,
    frame_loop: FrameLoop,
    bursts: BurstTracker,
    /// Field time, advanced by ticks only.
    elapsed_ms: f64,
    destroyed: bool,
}

impl<H: Host> ParticleField<H> {
    /// Create a running field, or log and return `None` when a collaborator is missing.
    pub fn initialize(host: Option<H>, config: FieldConfig) -> Option<Self> {
        match Self::try_initialize(host, config) {
            Ok(field) => Some(field),
            Err(e) => {
                log::warn!("particle field not created: {}", e);
                None
            }
        }
    }

    /// Like `initialize`, but reports which collaborator was missing.
    pub fn try_initialize(host: Option<H>, config: FieldConfig) -> Result<Self, InitError> {
        let mut host = host.ok_or(InitError::MissingHost)?;
        let bounds = host.bounds().ok_or(InitError::NoBounds)?.sanitized();
        let surface = host.attach_surface(bounds).ok_or(InitError::SurfaceUnavailable)?;

        let config = config.sanitized();
        let mut rng = Rng::new(config.seed.unwrap_or(DEFAULT_SEED));
        let particles: Vec<Particle> = (0..config.number_of_particles)
            .map(|_| Particle::spawn(&config, bounds, &mut rng))
            .collect();

        let mut frame_loop = FrameLoop::new();
        frame_loop.start();

        log::info!(
            "particle field: {} particles on {}x{}",
            particles.len(),
            bounds.width,
            bounds.height
        );

        Ok(Self {
            host,
            surface: Some(surface),
            config,
            bounds,
            particles,
            pointer: None,
            rng,
            frame_loop,
            bursts: BurstTracker::new(),
            elapsed_ms: 0.0,
            destroyed: false,
        })
    }

    /// Run one host animation frame: tick by the elapsed time, then render.
    /// Returns false when the field is paused or destroyed, meaning the host
    /// should stop requesting frames.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let Some(dt) = self.frame_loop.frame(now_ms) else {
            return false;
        };
        self.tick(dt);
        self.render();
        true
    }

    /// Advance the simulation by `dt` normalized units (1.0 = 16 ms).
    pub fn tick(&mut self, dt: f32) {
        if self.destroyed {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed_ms += dt as f64 * FRAME_MS;

        for pending in self.bursts.take_due(self.elapsed_ms) {
            self.spawn_burst(pending.origin, pending.count, pending.color);
        }
        let expired = self.bursts.take_expired(self.elapsed_ms);
        if !expired.is_empty() {
            self.particles
                .retain(|p| p.burst.map_or(true, |id| !expired.contains(&id)));
        }

        let config = &self.config;
        let bounds = self.bounds;
        let pointer = self.pointer;
        for particle in &mut self.particles {
            if particle.step(dt, config, pointer, bounds) {
                particle.respawn(config, bounds, &mut self.rng);
            }
        }
    }

    /// Clear the surface and draw every particle, then the connection lines.
    pub fn render(&mut self) -> RenderStats {
        let mut stats = RenderStats::default();
        let Some(surface) = self.surface.as_mut() else {
            return stats;
        };
        surface.clear();

        let shape = self.config.shape;
        for p in &self.particles {
            surface.fill_shape(&ShapeDraw {
                shape,
                center: p.position,
                radius: p.draw_radius(),
                rotation: p.rotation,
                color: p.color.with_alpha(p.color.a * p.draw_alpha()),
            });
            stats.shapes += 1;
        }

        if !self.config.connect_particles {
            return stats;
        }
        let threshold = self.config.connection_distance;
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let Some(strength) = connection_strength(a.distance_to(b), threshold) else {
                    continue;
                };
                surface.stroke_line(&LineDraw {
                    from: a.position,
                    to: b.position,
                    width: CONNECTION_WIDTH,
                    color: a.color.with_alpha(strength * CONNECTION_ALPHA),
                });
                stats.lines += 1;
            }
        }
        stats
    }

    /// Inject `count` short-lived particles radiating from (x, y).
    /// They are removed as a group two seconds of field time later.
    pub fn burst(&mut self, x: f32, y: f32, count: usize) -> Option<BurstId> {
        if self.destroyed || count == 0 || !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some(self.spawn_burst(Vec2::new(x, y), count, None))
    }

    fn spawn_burst(&mut self, origin: Vec2, count: usize, color: Option<Color>) -> BurstId {
        let count = count.min(MAX_PARTICLES);
        let id = self.bursts.register(self.elapsed_ms);
        self.particles.reserve(count);
        for i in 0..count {
            let mut p = Particle::spawn(&self.config, self.bounds, &mut self.rng);
            p.position = origin;
            p.velocity = radial_velocity(i, count, BURST_SPEED.sample(&mut self.rng));
            if let Some(color) = color {
                p.color = color;
            }
            p.burst = Some(id);
            self.particles.push(p);
        }
        log::debug!("burst {:?}: {} particles at ({}, {})", id, count, origin.x, origin.y);
        id
    }

    /// Schedule three single-colored bursts around (x, y), 200 ms apart.
    pub fn fireworks(&mut self, x: f32, y: f32) {
        if self.destroyed || !x.is_finite() || !y.is_finite() {
            return;
        }
        let palette = firework_palette();
        for shell in 0..FIREWORK_SHELLS {
            let offset = Vec2::new(self.rng.centered(), self.rng.centered()) * FIREWORK_SPREAD;
            let color = pick_color(&palette, &mut self.rng);
            self.bursts.schedule(PendingBurst {
                due_ms: self.elapsed_ms + shell as f64 * FIREWORK_INTERVAL_MS,
                origin: Vec2::new(x, y) + offset,
                count: FIREWORK_PARTICLES,
                color: Some(color),
            });
        }
    }

    /// Re-read the host's bounds and resize the surface. Particles are left
    /// where they are; the next tick's boundary policy pulls them back in.
    pub fn resize(&mut self) {
        if self.destroyed {
            return;
        }
        let Some(bounds) = self.host.bounds() else {
            log::debug!("particle field: host has no bounds, keeping {}x{}", self.bounds.width, self.bounds.height);
            return;
        };
        self.bounds = bounds.sanitized();
        if let Some(surface) = self.surface.as_mut() {
            surface.set_bounds(self.bounds);
        }
    }

    /// Stop requesting frames. Particle state is kept.
    pub fn pause(&mut self) {
        self.stop();
    }

    /// Start requesting frames again. No-op while running or after destroy.
    pub fn resume(&mut self) {
        self.start();
    }

    /// Stop the loop, hand the surface back to the host and drop all particles.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.frame_loop.stop();
        if let Some(surface) = self.surface.take() {
            self.host.detach_surface(surface);
        }
        self.particles = Vec::new();
        self.bursts.clear();
        self.pointer = None;
        self.destroyed = true;
        log::info!("particle field destroyed");
    }

    pub fn handle_input(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            match event {
                InputEvent::PointerMove { x, y } => self.set_pointer(x, y),
                InputEvent::PointerLeave => self.clear_pointer(),
                InputEvent::Click { x, y } => {
                    if self.config.respond_to_pointer {
                        self.burst(x, y, CLICK_BURST_COUNT);
                    }
                }
            }
        }
    }

    /// Last-writer-wins pointer position, read by the next tick.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        if self.destroyed || !x.is_finite() || !y.is_finite() {
            return;
        }
        self.pointer = Some(Vec2::new(x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Add one ambient particle, optionally at a given position. Returns its index.
    pub fn add_particle(&mut self, position: Option<Vec2>) -> Option<usize> {
        if self.destroyed {
            return None;
        }
        let mut p = Particle::spawn(&self.config, self.bounds, &mut self.rng);
        if let Some(position) = position {
            p.position = position;
        }
        self.particles.push(p);
        Some(self.particles.len() - 1)
    }

    /// Remove the particle at `index`; out-of-range indices are ignored.
    pub fn remove_particle(&mut self, index: usize) -> Option<Particle> {
        if index < self.particles.len() {
            Some(self.particles.remove(index))
        } else {
            None
        }
    }

    /// Replace the configuration. Existing particles keep their state and
    /// follow the new rules from the next tick.
    pub fn update_config(&mut self, config: FieldConfig) {
        self.config = config.sanitized();
    }

    /// Merge JSON overrides onto the current configuration.
    pub fn apply_overrides(&mut self, json: &str) -> Result<(), serde_json::Error> {
        self.config = self.config.with_overrides(json)?;
        Ok(())
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Current surface size.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn surface(&self) -> Option<&H::Surface> {
        self.surface.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Burst groups that have not expired yet.
    pub fn live_bursts(&self) -> usize {
        self.bursts.live_count()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl<H: Host> Ticker for ParticleField<H> {
    fn start(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.frame_loop.start()
    }

    fn stop(&mut self) -> bool {
        self.frame_loop.stop()
    }

    fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }
}

impl<H: Host> Drop for ParticleField<H> {
    fn drop(&mut self) {
        if let Some(surface) = self.surface.take() {
            self.host.detach_surface(surface);
        }
    }
}
