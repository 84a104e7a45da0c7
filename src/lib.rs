//! Grid Snake - the classic single-screen Snake game for the terminal
//!
//! This library provides:
//! - Core game logic: snake movement, growth, collisions and food placement (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering with ratatui (render module)
//! - In-memory session statistics (metrics module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
