//! Character-grid arcade shooter: a single ship defends against a
//! descending alien formation, a bonus UFO and destructible barricades.
//!
//! The library holds the whole simulation and the mode state machine; the
//! binary only owns the terminal, the input thread and frame pacing.

pub mod barricade;
pub mod collision;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod formation;
pub mod game;
pub mod grid;
pub mod highscores;
pub mod input;
pub mod logging;
pub mod menu;
pub mod round;
pub mod sprites;
pub mod ufo;
