//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules, session state and timing logic. It
//! does no I/O and knows nothing about terminals; hosts feed it elapsed time
//! and player commands, then read a [`GameSnapshot`] back.
//!
//! # Module Structure
//!
//! - [`board`]: configurable grid with collision checks and line clearing
//! - [`pieces`]: the seven shape matrices, clockwise rotation, spawn anchor
//! - [`rng`]: piece sources (seeded uniform, fixed sequence)
//! - [`scoring`]: score, level and gravity progression
//! - [`session`]: one running game driven by `update` and `apply_action`
//! - [`config`]: construction parameters and validation
//! - [`clock`]: host timestamps to update deltas
//! - [`snapshot`]: read-only view for renderers
//!
//! # Rules
//!
//! - Pieces are picked uniformly at random, one "next" piece is previewed
//! - Rotation is clockwise only and is simply rejected when blocked
//! - A piece locks as soon as a downward move fails
//! - Clearing `n` lines scores `n * 100 * level`; every 10 lines is a level
//! - Gravity starts at the configured interval and speeds up 50ms per level,
//!   never faster than 50ms
//! - A blocked spawn ends the game, which restarts immediately
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Session, SessionConfig};
//! use blockfall_core::types::GameAction;
//!
//! let mut game = Session::new(SessionConfig::default().with_seed(7)).unwrap();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // One second of gravity moves the new piece down by one row.
//! assert!(game.update(1000));
//! assert_eq!(game.active().unwrap().y, 1);
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use clock::FrameClock;
pub use config::{ConfigError, SessionConfig};
pub use pieces::{get_shape, rotate, spawn_x, Shape};
pub use rng::{PieceSource, SequencePieces, SimpleRng, UniformPieces};
pub use scoring::{calculate_level, calculate_line_score, get_drop_interval_ms, Progression, ScoreResult};
pub use session::{ActivePiece, GameEvent, Session};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
