//! Tranquil Run game library crate.

pub mod app;
pub mod audio;
pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod progression;
pub mod session;
pub mod store;
pub mod surface;
pub mod systems;
