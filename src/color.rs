use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linearly interpolate towards `other` by `t`, clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Color::new(channel(self.r, other.r), channel(self.g, other.g), channel(self.b, other.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", hex::encode([self.r, self.g, self.b]))
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        let bytes = hex::decode(digits).map_err(|_| ColorError::InvalidHex(input.to_string()))?;
        let [r, g, b] = bytes.as_slice() else {
            return Err(ColorError::InvalidHex(input.to_string()));
        };
        Ok(Color::new(*r, *g, *b))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let input = String::deserialize(deserializer)?;
        input.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Errors that can occur when parsing colors
#[derive(thiserror::Error, Debug)]
pub enum ColorError {
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
}

/// An enabled/disabled color variant pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatePair {
    pub enabled: Color,
    pub disabled: Color,
}

impl StatePair {
    /// Resolve the current color from the enable-transition progress in
    /// `[0, 1]`, where 0 is fully disabled and 1 fully enabled.
    pub fn resolve(&self, blend: f32) -> Color {
        self.disabled.lerp(self.enabled, blend)
    }
}

/// The full color set a track renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrackPalette {
    pub active: StatePair,
    pub inactive: StatePair,
    pub secondary: StatePair,
}
