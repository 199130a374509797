//! Ninja Star: a tiny toroidal arcade game.
//!
//! The library holds the whole simulation and is free of terminal I/O; the
//! binary in `main.rs` drives it once per frame and renders the result.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod logging;
pub mod world;

pub use error::GameError;
