//! Named field presets and the fireworks palette.

use super::color::Color;
use super::config::{FieldConfig, ParticleShape, Range};

/// Particles per fireworks shell.
pub const FIREWORK_PARTICLES: usize = 30;
/// Shells fired per fireworks call.
pub const FIREWORK_SHELLS: usize = 3;
/// Delay between consecutive shells, in milliseconds.
pub const FIREWORK_INTERVAL_MS: f64 = 200.0;
/// Shells land within ±half of this around the requested point.
pub const FIREWORK_SPREAD: f32 = 100.0;

/// Built-in looks a container can ask for by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    #[default]
    Default,
    Rain,
    Snow,
    Stars,
    Bubbles,
}

impl Preset {
    pub const ALL: [Preset; 5] = [Self::Default, Self::Rain, Self::Snow, Self::Stars, Self::Bubbles];

    /// Look a preset up by name. Unknown names fall back to `Default`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Self::Default,
            "rain" => Self::Rain,
            "snow" => Self::Snow,
            "stars" => Self::Stars,
            "bubbles" => Self::Bubbles,
            other => {
                log::warn!("unknown particle preset '{}', using default", other);
                Self::Default
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Stars => "stars",
            Self::Bubbles => "bubbles",
        }
    }

    pub fn config(&self) -> FieldConfig {
        let base = FieldConfig::default();
        match self {
            Self::Default => base,
            Self::Rain => FieldConfig {
                number_of_particles: 100,
                speed_range: Range::new(2.0, 4.0),
                gravity_enabled: true,
                gravity_force: 0.1,
                bounce_at_edges: false,
                connect_particles: false,
                shape: ParticleShape::Disc,
                size_range: Range::new(1.0, 3.0),
                color_palette: palette(&["#4A90E2"]),
                ..base
            },
            Self::Snow => FieldConfig {
                number_of_particles: 80,
                speed_range: Range::new(0.5, 1.5),
                gravity_enabled: true,
                gravity_force: 0.02,
                bounce_at_edges: false,
                connect_particles: false,
                shape: ParticleShape::Disc,
                size_range: Range::new(2.0, 5.0),
                color_palette: palette(&["#FFFFFF"]),
                opacity_range: Range::new(base.opacity_range.min, 0.8),
                ..base
            },
            Self::Stars => FieldConfig {
                number_of_particles: 60,
                speed_range: Range::new(0.05, 0.2),
                connect_particles: true,
                connection_distance: 100.0,
                shape: ParticleShape::Star,
                size_range: Range::new(2.0, 4.0),
                color_palette: palette(&["#FFD700", "#FFA500"]),
                opacity_range: Range::new(base.opacity_range.min, 0.7),
                ..base
            },
            Self::Bubbles => FieldConfig {
                number_of_particles: 40,
                speed_range: Range::new(0.5, 1.0),
                gravity_enabled: true,
                gravity_force: -0.05,
                bounce_at_edges: false,
                connect_particles: false,
                shape: ParticleShape::Disc,
                size_range: Range::new(5.0, 15.0),
                color_palette: palette(&["#87CEEB", "#00BFFF"]),
                opacity_range: Range::new(base.opacity_range.min, 0.3),
                ..base
            },
        }
    }
}

/// Shell colors for fireworks; each shell uses one of these.
pub fn firework_palette() -> Vec<Color> {
    palette(&["#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF"])
}

fn palette(hex: &[&str]) -> Vec<Color> {
    hex.iter().filter_map(|h| Color::from_hex(h)).collect()
}
