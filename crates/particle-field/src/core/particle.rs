//! A single particle: spawn, per-tick motion and the boundary policy.

use glam::Vec2;

use super::burst::BurstId;
use super::rng::Rng;
use crate::api::color::Color;
use crate::api::config::FieldConfig;
use crate::api::host::Bounds;

/// Life lost per update.
pub const LIFE_DECAY: f32 = 0.001;
/// Pulsation phase advance per update, radians.
pub const PULSE_SPEED: f32 = 0.02;
/// Drawn radius oscillates by this much around the base radius.
pub const PULSE_AMPLITUDE: f32 = 0.5;
/// Spin is drawn from `[-MAX_SPIN / 2, MAX_SPIN / 2)` radians per update.
pub const MAX_SPIN: f32 = 0.05;
/// Peak repulsion (at zero distance) before scaling.
pub const POINTER_STRENGTH: f32 = 2.0;
/// Scale applied to the repulsion when it is added to velocity.
pub const POINTER_SCALE: f32 = 0.1;

/// A single particle with motion and rendering state.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Pixels per normalized time unit.
    pub velocity: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub color: Color,
    /// In [0, 1]; the particle respawns when it reaches zero.
    pub life: f32,
    pub pulse: f32,
    pub rotation: f32,
    pub spin: f32,
    /// Set for particles injected by a burst.
    pub burst: Option<BurstId>,
}

impl Particle {
    /// A freshly randomized particle somewhere inside `bounds`.
    pub fn spawn(config: &FieldConfig, bounds: Bounds, rng: &mut Rng) -> Self {
        let mut p = Particle {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius: config.size_range.min,
            opacity: config.opacity_range.min,
            color: Color::WHITE,
            life: 1.0,
            pulse: 0.0,
            rotation: 0.0,
            spin: 0.0,
            burst: None,
        };
        p.randomize(config, bounds, rng);
        p
    }

    /// Re-roll every attribute in place and restore full life.
    /// The burst tag is kept so group removal still finds the particle.
    pub fn respawn(&mut self, config: &FieldConfig, bounds: Bounds, rng: &mut Rng) {
        self.randomize(config, bounds, rng);
    }

    fn randomize(&mut self, config: &FieldConfig, bounds: Bounds, rng: &mut Rng) {
        self.position = Vec2::new(rng.next_f32() * bounds.width, rng.next_f32() * bounds.height);
        let speed = config.speed_range;
        self.velocity = Vec2::new(
            rng.centered() * speed.span() + speed.min,
            rng.centered() * speed.span() + speed.min,
        );
        self.radius = config.size_range.sample(rng);
        self.opacity = config.opacity_range.sample(rng);
        self.color = pick_color(&config.color_palette, rng);
        self.life = 1.0;
        self.pulse = rng.next_f32() * std::f32::consts::TAU;
        self.rotation = 0.0;
        self.spin = rng.centered() * MAX_SPIN;
    }

    /// Advance one update of `dt` normalized units.
    /// Returns true when life ran out and the particle needs a respawn.
    pub fn step(&mut self, dt: f32, config: &FieldConfig, pointer: Option<Vec2>, bounds: Bounds) -> bool {
        self.position += self.velocity * dt;

        if config.gravity_enabled {
            self.velocity.y += config.gravity_force * dt;
        }

        if config.respond_to_pointer {
            if let Some(pointer) = pointer {
                self.repel_from(pointer, config.pointer_distance);
            }
        }

        self.velocity = self.velocity.clamp_length_max(config.max_speed);
        self.apply_bounds(bounds, config.bounce_at_edges);

        self.pulse += PULSE_SPEED;
        self.rotation += self.spin;

        self.life = (self.life - LIFE_DECAY).max(0.0);
        self.life <= 0.0
    }

    /// Push velocity away from `pointer`, stronger the closer it is.
    fn repel_from(&mut self, pointer: Vec2, reach: f32) {
        let delta = pointer - self.position;
        let distance = delta.length();
        if distance >= reach || distance <= f32::EPSILON {
            return;
        }
        let force = (1.0 - distance / reach) * POINTER_STRENGTH;
        self.velocity -= delta / distance * force * POINTER_SCALE;
    }

    /// Reflect off the edges (bounce) or teleport to the opposite edge (wrap).
    pub fn apply_bounds(&mut self, bounds: Bounds, bounce: bool) {
        let r = self.radius;
        if bounce {
            let (lo, hi) = edge_limits(r, bounds.width);
            if self.position.x < lo || self.position.x > hi {
                self.velocity.x = -self.velocity.x;
                self.position.x = self.position.x.clamp(lo, hi);
            }
            let (lo, hi) = edge_limits(r, bounds.height);
            if self.position.y < lo || self.position.y > hi {
                self.velocity.y = -self.velocity.y;
                self.position.y = self.position.y.clamp(lo, hi);
            }
        } else {
            if self.position.x < -r {
                self.position.x = bounds.width + r;
            } else if self.position.x > bounds.width + r {
                self.position.x = -r;
            }
            if self.position.y < -r {
                self.position.y = bounds.height + r;
            } else if self.position.y > bounds.height + r {
                self.position.y = -r;
            }
        }
    }

    /// Radius to draw this frame, including pulsation.
    pub fn draw_radius(&self) -> f32 {
        (self.radius + self.pulse.sin() * PULSE_AMPLITUDE).max(0.0)
    }

    /// Alpha to draw this frame: fades out with life.
    pub fn draw_alpha(&self) -> f32 {
        (self.opacity * self.life).clamp(0.0, 1.0)
    }

    pub fn distance_to(&self, other: &Particle) -> f32 {
        self.position.distance(other.position)
    }
}

/// Allowed `[lo, hi]` for a center along one axis so the particle stays
/// inside `[0, extent]`. A surface thinner than the particle pins it to the middle.
fn edge_limits(radius: f32, extent: f32) -> (f32, f32) {
    let half = extent * 0.5;
    (radius.min(half), (extent - radius).max(half))
}

pub(crate) fn pick_color(palette: &[Color], rng: &mut Rng) -> Color {
    if palette.is_empty() {
        return Color::WHITE;
    }
    palette[rng.next_int(palette.len() as u32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds::new(200.0, 100.0);

    fn still(config: &FieldConfig, position: Vec2) -> Particle {
        let mut rng = Rng::new(3);
        let mut p = Particle::spawn(config, BOUNDS, &mut rng);
        p.position = position;
        p.velocity = Vec2::ZERO;
        p.radius = 2.0;
        p
    }

    #[test]
    fn spawn_respects_ranges() {
        let config = FieldConfig::default();
        let mut rng = Rng::new(11);
        for _ in 0..200 {
            let p = Particle::spawn(&config, BOUNDS, &mut rng);
            assert!(p.position.x >= 0.0 && p.position.x <= BOUNDS.width);
            assert!(p.position.y >= 0.0 && p.position.y <= BOUNDS.height);
            assert!(p.radius >= 2.0 && p.radius <= 6.0);
            assert!(p.opacity >= 0.1 && p.opacity <= 0.5);
            assert!(config.color_palette.contains(&p.color));
            assert_eq!(p.life, 1.0);
            assert!(p.spin.abs() <= MAX_SPIN / 2.0);
        }
    }

    #[test]
    fn moves_by_velocity_times_dt() {
        let config = FieldConfig { respond_to_pointer: false, ..FieldConfig::default() };
        let mut p = still(&config, Vec2::new(50.0, 50.0));
        p.velocity = Vec2::new(1.0, -0.5);
        p.step(2.0, &config, None, BOUNDS);
        assert_eq!(p.position, Vec2::new(52.0, 49.0));
    }

    #[test]
    fn gravity_accumulates_into_vertical_velocity() {
        let config = FieldConfig { gravity_enabled: true, gravity_force: 0.1, ..FieldConfig::default() };
        let mut p = still(&config, Vec2::new(50.0, 50.0));
        p.step(1.0, &config, None, BOUNDS);
        p.step(1.0, &config, None, BOUNDS);
        assert!((p.velocity.y - 0.2).abs() < 1e-6);
        assert_eq!(p.velocity.x, 0.0);
    }

    #[test]
    fn pointer_pushes_particle_away() {
        let config = FieldConfig::default();
        let mut p = still(&config, Vec2::new(50.0, 50.0));
        p.step(1.0, &config, Some(Vec2::new(60.0, 50.0)), BOUNDS);
        // d = 10, reach 100: force = 0.9 * 2, scaled by 0.1.
        assert!((p.velocity.x + 0.18).abs() < 1e-5, "vx = {}", p.velocity.x);
        assert!(p.velocity.y.abs() < 1e-6);
    }

    #[test]
    fn pointer_out_of_reach_or_on_top_does_nothing() {
        let config = FieldConfig::default();
        let mut p = still(&config, Vec2::new(50.0, 50.0));
        p.step(1.0, &config, Some(Vec2::new(190.0, 50.0)), BOUNDS);
        assert_eq!(p.velocity, Vec2::ZERO);
        p.step(1.0, &config, Some(p.position), BOUNDS);
        assert_eq!(p.velocity, Vec2::ZERO, "zero distance must not produce NaN");
    }

    #[test]
    fn pointer_ignored_when_disabled() {
        let config = FieldConfig { respond_to_pointer: false, ..FieldConfig::default() };
        let mut p = still(&config, Vec2::new(50.0, 50.0));
        p.step(1.0, &config, Some(Vec2::new(55.0, 50.0)), BOUNDS);
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn speed_is_capped() {
        let config = FieldConfig { max_speed: 3.0, ..FieldConfig::default() };
        let mut p = still(&config, Vec2::new(100.0, 50.0));
        p.velocity = Vec2::new(30.0, 40.0);
        p.position = Vec2::new(100.0, 50.0) - p.velocity;
        p.step(1.0, &config, None, BOUNDS);
        assert!((p.velocity.length() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn bounce_reflects_and_clamps() {
        let mut p = still(&FieldConfig::default(), Vec2::new(205.0, 50.0));
        p.velocity = Vec2::new(3.0, 1.0);
        p.apply_bounds(BOUNDS, true);
        assert_eq!(p.position.x, 198.0);
        assert_eq!(p.velocity, Vec2::new(-3.0, 1.0));
    }

    #[test]
    fn bounce_on_tiny_surface_stays_inside() {
        let mut p = still(&FieldConfig::default(), Vec2::new(5.0, -5.0));
        p.radius = 6.0;
        let tiny = Bounds::new(4.0, 4.0);
        p.apply_bounds(tiny, true);
        assert_eq!(p.position, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn wrap_teleports_to_opposite_edge() {
        let mut p = still(&FieldConfig::default(), Vec2::new(-2.5, 50.0));
        p.velocity = Vec2::new(-1.0, 0.0);
        p.apply_bounds(BOUNDS, false);
        assert_eq!(p.position.x, BOUNDS.width + 2.0);
        assert_eq!(p.velocity, Vec2::new(-1.0, 0.0));

        p.position = Vec2::new(50.0, BOUNDS.height + 2.5);
        p.apply_bounds(BOUNDS, false);
        assert_eq!(p.position.y, -2.0);
    }

    #[test]
    fn life_runs_out_after_a_thousand_updates() {
        let config = FieldConfig::default();
        let mut p = still(&config, Vec2::new(50.0, 50.0));
        let mut expired_at = None;
        for i in 1..=1100 {
            if p.step(1.0, &config, None, BOUNDS) {
                expired_at = Some(i);
                break;
            }
            assert!(p.life > 0.0 && p.life <= 1.0);
        }
        let at = expired_at.expect("particle never expired");
        assert!((999..=1001).contains(&at), "expired at {at}");
        assert_eq!(p.life, 0.0);
    }

    #[test]
    fn respawn_restores_life_and_keeps_burst_tag() {
        let config = FieldConfig::default();
        let mut rng = Rng::new(5);
        let mut p = Particle::spawn(&config, BOUNDS, &mut rng);
        p.life = 0.0;
        p.burst = Some(BurstId(4));
        p.respawn(&config, BOUNDS, &mut rng);
        assert_eq!(p.life, 1.0);
        assert_eq!(p.burst, Some(BurstId(4)));
    }

    #[test]
    fn draw_radius_never_negative() {
        let mut p = still(&FieldConfig::default(), Vec2::ZERO);
        p.radius = 0.5;
        p.pulse = -std::f32::consts::FRAC_PI_2;
        assert!(p.draw_radius() >= 0.0 && p.draw_radius() < 1e-6);
        p.radius = 0.1;
        assert_eq!(p.draw_radius(), 0.0);
        p.radius = 0.5;
        p.pulse = std::f32::consts::FRAC_PI_2;
        assert!((p.draw_radius() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn draw_alpha_fades_with_life() {
        let mut p = still(&FieldConfig::default(), Vec2::ZERO);
        p.opacity = 0.4;
        p.life = 0.5;
        assert!((p.draw_alpha() - 0.2).abs() < 1e-6);
    }
}
