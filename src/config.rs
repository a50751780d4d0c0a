//! Line configuration: colors, pattern, stroke width and reveal timing.
//!
//! [`LinesConfig`] deserializes from any serde format. Colors are written as
//! hex strings:
//!
//! ```ignore
//! let config: LinesConfig = serde_json::from_str(r##"{
//!     "colors": ["#00ff88", "#3b82f6", "#f59e0b"],
//!     "pattern": "straight"
//! }"##)?;
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Deserializer};
use slint::Color;
use std::str::FromStr;

/// Used for every line when no colors are configured at all.
pub fn fallback_color() -> Color {
    Color::from_rgb_u8(0x00, 0xff, 0x88)
}

/// Routing style for the lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinePattern {
    /// Upper lines bend up, the middle line goes straight, lower lines bend down.
    #[default]
    Fan,
    /// Every line is a smooth S-curve.
    Straight,
}

impl FromStr for LinePattern {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fan" => Ok(LinePattern::Fan),
            "straight" => Ok(LinePattern::Straight),
            _ => Err(ConfigError::UnknownPattern(s.to_string())),
        }
    }
}

/// Appearance and timing of the connector lines.
///
/// Delays and the stagger are in seconds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinesConfig {
    /// Line colors, applied by target index.
    #[serde(deserialize_with = "deserialize_colors")]
    pub colors: Vec<Color>,
    pub pattern: LinePattern,
    pub stroke_width: f32,
    /// Delay before the first line starts drawing.
    pub base_delay: f32,
    /// Extra delay per target index.
    pub stagger: f32,
}

impl Default for LinesConfig {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            pattern: LinePattern::Fan,
            stroke_width: 2.0,
            base_delay: 0.4,
            stagger: 0.3,
        }
    }
}

impl LinesConfig {
    pub fn with_colors(colors: impl IntoIterator<Item = Color>) -> Self {
        Self {
            colors: colors.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Color for the target at `index`, falling back to the first color.
    pub fn color_for(&self, index: usize) -> Color {
        self.colors
            .get(index)
            .or_else(|| self.colors.first())
            .copied()
            .unwrap_or_else(fallback_color)
    }

    /// Color of the origin marker ring.
    pub fn origin_color(&self) -> Color {
        self.color_for(0)
    }

    /// Reveal delay for the target at `index` in the full target list.
    pub fn delay_for(&self, index: usize) -> f32 {
        self.base_delay + index as f32 * self.stagger
    }
}

/// Parse a `#rgb`, `#rrggbb` or `#rrggbbaa` hex color.
pub fn parse_color(s: &str) -> Result<Color, ConfigError> {
    let invalid = || ConfigError::InvalidColor(s.to_string());
    let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |i: usize, width: usize| -> Result<u8, ConfigError> {
        let digits = hex.get(i * width..(i + 1) * width).ok_or_else(invalid)?;
        let value = u8::from_str_radix(digits, 16).map_err(|_| invalid())?;
        // #rgb doubles every digit: f -> ff
        Ok(if width == 1 { value * 17 } else { value })
    };

    match hex.len() {
        3 => Ok(Color::from_rgb_u8(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
        6 => Ok(Color::from_rgb_u8(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
        8 => Ok(Color::from_argb_u8(
            channel(3, 2)?,
            channel(0, 2)?,
            channel(1, 2)?,
            channel(2, 2)?,
        )),
        _ => Err(invalid()),
    }
}

fn deserialize_colors<'de, D>(deserializer: D) -> Result<Vec<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    raw.iter()
        .map(|s| parse_color(s).map_err(serde::de::Error::custom))
        .collect()
}
