//! Space Invader: a wave shooter for the terminal.
//!
//! - `entities`: pure entity data (ship, fighters, projectiles, effects)
//! - `compute`: per-frame entity logic and box collision
//! - `game`: the controller that owns everything and runs the frame loop
//! - `render` / `display`: abstract drawing surface and its crossterm backend
//! - `input`, `audio`, `random`, `timer`: collaborators the simulation calls into

pub mod audio;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod game;
pub mod input;
pub mod random;
pub mod render;
pub mod timer;

pub use config::GameConfig;
pub use game::{Game, Phase};
