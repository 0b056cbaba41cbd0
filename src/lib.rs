//! Snake Arcade - a grid Snake whose score feeds a progression system
//!
//! This library provides:
//! - Core game logic: a deterministic, snapshot-producing engine (game module)
//! - Keyboard mapping (input module)
//! - Backend-neutral scene drawing and a TUI backend (render module)
//! - The interactive terminal session and its tick scheduler (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
