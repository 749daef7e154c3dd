//! Centralized error types for Tranquil Run.
//!
//! This module defines all error types used throughout the application,
//! providing a consistent error handling approach.

use std::io;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
/// It can represent any error that can occur during game operation.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Score store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors related to the persisted best-score store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid store key: {0}")]
    InvalidKey(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
