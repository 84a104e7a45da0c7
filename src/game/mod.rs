//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The presentation layer feeds it intents and ticks and draws its snapshots.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Intent};
pub use config::GameConfig;
pub use engine::{Flow, GameEngine, Snapshot, Status, TickOutcome};
pub use food::{CellPicker, Food, Placement, RandomPicker};
pub use state::{Cell, CollisionKind, Grid, Snake};
