//! Colors used by the badge sub-elements.

use serde::{Deserialize, Serialize};

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    #[serde(default = "opaque")]
    pub a: f32,
}

const fn opaque() -> f32 {
    1.0
}

impl Color {
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Tints for the consumable icon, one per nourishment warning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodPalette {
    /// Both health and stamina are far below the special value.
    pub special: Color,
    /// Stamina is far below health.
    pub health: Color,
    /// Health is far below stamina.
    pub stamina: Color,
    /// Balanced food.
    pub neutral: Color,
}

impl FoodPalette {
    /// Blue / red / yellow / white.
    pub const STANDARD: Self = Self {
        special: Color::rgb(0.6, 0.6, 1.0),
        health: Color::rgb(1.0, 0.5, 0.5),
        stamina: Color::rgb(1.0, 1.0, 0.5),
        neutral: Color::WHITE,
    };
}

impl Default for FoodPalette {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_entries_distinct() {
        let p = FoodPalette::default();
        assert_ne!(p.special, p.health);
        assert_ne!(p.health, p.stamina);
        assert_ne!(p.stamina, p.neutral);
        assert_eq!(p.neutral, Color::rgba(1.0, 1.0, 1.0, 1.0));
    }
}
