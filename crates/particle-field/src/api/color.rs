use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a fully opaque color from RGB u8 values (0-255).
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            3 => {
                let nib = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Self::rgb8(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Some(Self::rgb8(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgb8(byte(0)?, byte(2)?, byte(4)?).with_alpha(byte(6)? as f32 / 255.0)),
            _ => None,
        }
    }

    /// `#RRGGBB` (alpha dropped when opaque).
    pub fn to_hex(&self) -> String {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!("#{:02X}{:02X}{:02X}", q(self.r), q(self.g), q(self.b))
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", q(self.r), q(self.g), q(self.b), q(self.a))
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        let c = Color::from_hex("#007AFF").unwrap();
        assert_eq!(c.r, 0.0);
        assert!((c.g - 122.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 1.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn parses_short_and_alpha_forms() {
        assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
        let c = Color::from_hex("FF000080").unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::from_hex("#12").is_none());
        assert!(Color::from_hex("#GGGGGG").is_none());
        assert!(Color::from_hex("").is_none());
        assert!(Color::from_hex("#ÿÿÿ").is_none());
    }

    #[test]
    fn hex_round_trip_through_serde() {
        let json = serde_json::to_string(&Color::from_hex("#BF5AF2").unwrap()).unwrap();
        assert_eq!(json, "\"#BF5AF2\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_hex(), "#BF5AF2");
    }
}
