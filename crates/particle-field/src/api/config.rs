//! Typed field configuration.
//!
//! Every key is optional in JSON; missing keys take the defaults below.
//! Out-of-range values are clamped rather than rejected, only malformed
//! JSON is an error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::color::Color;
use crate::core::rng::Rng;

/// Upper bound on the ambient population. Connection drawing is O(n²).
pub const MAX_PARTICLES: usize = 1000;
/// Smallest base radius a particle may have.
pub const MIN_RADIUS: f32 = 0.5;

/// Closed `[min, max]` interval, written as a two-element array in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample in `[min, max)`.
    pub fn sample(&self, rng: &mut Rng) -> f32 {
        self.min + rng.next_f32() * (self.max - self.min)
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Reorder swapped bounds, replace non-finite bounds, then clamp into `[lo, hi]`.
    fn clamped(self, lo: f32, hi: f32, fallback: Range) -> Self {
        if !self.min.is_finite() || !self.max.is_finite() {
            return fallback;
        }
        let (a, b) = if self.min <= self.max { (self.min, self.max) } else { (self.max, self.min) };
        Self::new(a.clamp(lo, hi), b.clamp(lo, hi))
    }
}

impl From<[f32; 2]> for Range {
    fn from(v: [f32; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<Range> for [f32; 2] {
    fn from(r: Range) -> Self {
        [r.min, r.max]
    }
}

/// Shape each particle is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleShape {
    #[default]
    Disc,
    Square,
    Triangle,
    Star,
}

impl ParticleShape {
    /// Parse a shape name, case-insensitively. The Spanish names used by
    /// older page markup are accepted too.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "disc" | "circle" | "circulo" | "círculo" => Some(Self::Disc),
            "square" | "cuadrado" => Some(Self::Square),
            "triangle" | "triangulo" | "triángulo" => Some(Self::Triangle),
            "star" | "estrella" => Some(Self::Star),
            _ => None,
        }
    }
}

/// Configuration for one particle field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    /// Ambient population created at initialization (default: 50).
    #[serde(deserialize_with = "clamped_count")]
    pub number_of_particles: usize,
    /// Per-axis initial speed parameters (default: 0.1 - 1).
    pub speed_range: Range,
    /// Base radius range in pixels (default: 2 - 6).
    pub size_range: Range,
    /// Opacity range, within [0, 1] (default: 0.1 - 0.5).
    pub opacity_range: Range,
    /// Colors picked uniformly per particle. Never empty after sanitizing.
    #[serde(deserialize_with = "lenient_palette")]
    pub color_palette: Vec<Color>,
    pub connect_particles: bool,
    /// Pairs closer than this get a connecting line (default: 150).
    pub connection_distance: f32,
    pub respond_to_pointer: bool,
    /// Repulsion radius around the pointer (default: 100).
    pub pointer_distance: f32,
    pub gravity_enabled: bool,
    /// Added to vertical velocity per time unit; negative floats upward.
    pub gravity_force: f32,
    /// Reflect at edges when true, wrap to the opposite edge when false.
    pub bounce_at_edges: bool,
    /// Unknown names draw discs.
    #[serde(deserialize_with = "lenient_shape")]
    pub shape: ParticleShape,
    /// Speed cap applied after gravity and pointer forces (default: 8).
    pub max_speed: f32,
    /// RNG seed. `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl FieldConfig {
    pub fn default_palette() -> Vec<Color> {
        ["#007AFF", "#5AC8FA", "#BF5AF2", "#FF9F0A"]
            .iter()
            .filter_map(|h| Color::from_hex(h))
            .collect()
    }

    /// Parse a configuration from JSON, filling missing keys with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: FieldConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Merge a JSON object of overrides key-by-key onto this configuration.
    ///
    /// An empty string means "no overrides".
    pub fn with_overrides(&self, json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(self.clone().sanitized());
        }
        let overrides: Value = serde_json::from_str(json)?;
        let Value::Object(overrides) = overrides else {
            return Err(serde::de::Error::custom("particle options must be a JSON object"));
        };
        let mut base = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut base {
            for (key, value) in overrides {
                map.insert(key, value);
            }
        }
        let merged: FieldConfig = serde_json::from_value(base)?;
        Ok(merged.sanitized())
    }

    /// Clamp every option into its valid domain.
    pub fn sanitized(mut self) -> Self {
        let defaults = FieldConfig::default();
        self.number_of_particles = self.number_of_particles.min(MAX_PARTICLES);
        self.speed_range = self.speed_range.clamped(f32::MIN, f32::MAX, defaults.speed_range);
        self.size_range = self.size_range.clamped(MIN_RADIUS, f32::MAX, defaults.size_range);
        self.opacity_range = self.opacity_range.clamped(0.0, 1.0, defaults.opacity_range);
        if self.color_palette.is_empty() {
            self.color_palette = Self::default_palette();
        }
        self.connection_distance = non_negative(self.connection_distance);
        self.pointer_distance = non_negative(self.pointer_distance);
        if !self.gravity_force.is_finite() {
            self.gravity_force = defaults.gravity_force;
        }
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            self.max_speed = defaults.max_speed;
        }
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            number_of_particles: 50,
            speed_range: Range::new(0.1, 1.0),
            size_range: Range::new(2.0, 6.0),
            opacity_range: Range::new(0.1, 0.5),
            color_palette: Self::default_palette(),
            connect_particles: true,
            connection_distance: 150.0,
            respond_to_pointer: true,
            pointer_distance: 100.0,
            gravity_enabled: false,
            gravity_force: 0.05,
            bounce_at_edges: true,
            shape: ParticleShape::Disc,
            max_speed: 8.0,
            seed: None,
        }
    }
}

fn non_negative(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Accept any JSON number; negatives become zero, fractions are truncated.
fn clamped_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let n = f64::deserialize(deserializer)?;
    if n.is_nan() || n <= 0.0 {
        Ok(0)
    } else {
        Ok((n as usize).min(MAX_PARTICLES))
    }
}

/// Skip palette entries that do not parse as colors.
fn lenient_palette<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Color>, D::Error> {
    let raw = Vec::<String>::deserialize(deserializer)?;
    let colors: Vec<Color> = raw.iter().filter_map(|s| Color::from_hex(s)).collect();
    if colors.len() < raw.len() {
        log::warn!("particle palette: ignored {} unparsable color(s)", raw.len() - colors.len());
    }
    Ok(colors)
}

/// Fall back to a disc for shape values that are not a known name.
fn lenient_shape<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ParticleShape, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    let shape = raw.as_str().and_then(ParticleShape::from_name);
    Ok(shape.unwrap_or_else(|| {
        log::warn!("particle shape {} not recognised, drawing discs", raw);
        ParticleShape::Disc
    }))
}
