//! Snake profiles: the scoring multiplier and colors of the variant being played
//!
//! A profile is supplied once per session and is never mutated by the engine.
//! Defects such as a missing or non-positive multiplier are normalized here
//! instead of failing the session.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A two-stop gradient, start color first
pub type ColorPair = [Rgb; 2];

fn default_multiplier() -> f64 {
    1.0
}

/// Read-only description of the snake variant used for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeProfile {
    pub name: String,
    #[serde(default)]
    pub rarity: String,
    /// Points for each food are multiplied by this, then floored
    #[serde(default = "default_multiplier")]
    pub scoring_multiplier: f64,
    #[serde(default)]
    pub head_colors: Option<ColorPair>,
    #[serde(default)]
    pub body_colors: Option<ColorPair>,
}

impl Default for SnakeProfile {
    fn default() -> Self {
        Self {
            name: "Snake".to_string(),
            rarity: String::new(),
            scoring_multiplier: 1.0,
            head_colors: None,
            body_colors: None,
        }
    }
}

impl SnakeProfile {
    /// Load a profile from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snake profile from {:?}", path))?;
        let profile: SnakeProfile =
            serde_json::from_str(&json).context("Failed to deserialize snake profile")?;
        Ok(profile.normalized())
    }

    /// Replace an unusable multiplier with 1.0
    pub fn normalized(mut self) -> Self {
        if !self.scoring_multiplier.is_finite() || self.scoring_multiplier <= 0.0 {
            tracing::warn!(
                profile = %self.name,
                multiplier = self.scoring_multiplier,
                "invalid scoring multiplier, falling back to 1.0"
            );
            self.scoring_multiplier = 1.0;
        }
        self
    }

    /// Points granted for food worth `base_points`.
    /// The multiplication happens before rounding down.
    pub fn award(&self, base_points: u32) -> u32 {
        (base_points as f64 * self.scoring_multiplier).floor() as u32
    }
}

/// The purchasable snake variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakePreset {
    Rattlesnake,
    CoralSnake,
    KingCobra,
    BlackMamba,
}

impl SnakePreset {
    pub const ALL: [SnakePreset; 4] = [
        SnakePreset::Rattlesnake,
        SnakePreset::CoralSnake,
        SnakePreset::KingCobra,
        SnakePreset::BlackMamba,
    ];

    pub fn profile(&self) -> SnakeProfile {
        let (name, rarity, scoring_multiplier, head, body) = match self {
            SnakePreset::Rattlesnake => (
                "Rattlesnake",
                "Common",
                1.0,
                [Rgb(210, 170, 80), Rgb(180, 140, 60)],
                [Rgb(180, 140, 60), Rgb(140, 100, 40)],
            ),
            SnakePreset::CoralSnake => (
                "Coral Snake",
                "Rare",
                1.5,
                [Rgb(220, 60, 60), Rgb(180, 40, 40)],
                [Rgb(180, 40, 40), Rgb(100, 20, 20)],
            ),
            SnakePreset::KingCobra => (
                "King Cobra",
                "Legendary",
                2.0,
                [Rgb(230, 180, 60), Rgb(200, 150, 40)],
                [Rgb(200, 150, 40), Rgb(80, 100, 80)],
            ),
            SnakePreset::BlackMamba => (
                "Black Mamba",
                "Mythic",
                3.0,
                [Rgb(80, 100, 180), Rgb(60, 60, 140)],
                [Rgb(60, 60, 140), Rgb(40, 40, 80)],
            ),
        };

        SnakeProfile {
            name: name.to_string(),
            rarity: rarity.to_string(),
            scoring_multiplier,
            head_colors: Some(head),
            body_colors: Some(body),
        }
    }
}
