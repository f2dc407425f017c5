//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, terminals, or I/O, making it:
//!
//! - **Deterministic**: Same seed (or scripted piece source) produces identical games
//! - **Testable**: Unit tests beside every rule
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: No allocation in the tick/drop/sweep paths
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 board with collision, merge and bottom-up row sweeping
//! - [`game_state`]: Lifecycle, gravity clock, command dispatch and locking
//! - [`pieces`]: Shape catalog, transpose+flip rotation and the kick search
//! - [`rng`]: Uniform piece generation behind an injectable source
//! - [`scoring`]: Line-clear points, level and drop interval
//! - [`snapshot`]: Read-only views for renderers
//!
//! # Game Rules
//!
//! - **Uniform pieces**: every kind is equally likely on every draw (no bag)
//! - **Rotation**: any 90° turn, kicked sideways by `0, +1, -2, +3, ...` up to the matrix width
//! - **No lock delay**: a piece locks the moment it fails to descend
//! - **Scoring**: 40/100/300/1200 points times the level for 1-4 rows
//! - **Ghost piece**: projected landing row, computed on demand
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::Command;
//!
//! // Create and start a game
//! let mut game = GameState::new(12345);
//! assert!(game.dispatch(Command::Start));
//!
//! // Apply commands
//! game.dispatch(Command::MoveRight);
//! game.dispatch(Command::RotateCw);
//! assert!(game.dispatch(Command::HardDrop));
//!
//! // One piece has been locked into the board
//! assert_eq!(game.board().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! Feed elapsed milliseconds to [`GameState::tick`](game_state::GameState::tick), or
//! a monotonic clock reading to [`GameState::tick_at`](game_state::GameState::tick_at).
//! Gravity runs one row once the accumulated time exceeds the level's drop interval.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{DropOutcome, GameState, LockReport, TickResult};
pub use pieces::{base_matrix, display_color, try_rotate, ActivePiece, DisplayColor, PieceMatrix};
pub use rng::{PieceSource, ScriptedSource, UniformGenerator};
pub use scoring::{drop_interval_ms, level_for_lines, line_clear_score, ScoreTracker};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
