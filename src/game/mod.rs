//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine owns the board and hands out immutable [`Snapshot`]s after every tick.

pub mod config;
pub mod direction;
pub mod engine;
pub mod profile;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use config::{GameConfig, MAX_GRID_SIZE};
pub use direction::Direction;
pub use engine::GameEngine;
pub use profile::{ColorPair, Rgb, SnakePreset, SnakeProfile};
pub use snapshot::{xp_for_score, GameOutcome, Snapshot, StepInfo, StepResult};
pub use state::{
    CollisionType, Food, FoodKind, GameState, Phase, Position, PowerUp, PowerUpKind, Snake,
};
