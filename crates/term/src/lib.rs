//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget/layout
//! libraries and renders snapshots into a plain framebuffer that is then flushed
//! to the terminal with crossterm.
//!
//! - `core` stays free of I/O; this crate only reads [`core::GameSnapshot`]s
//! - Cells are 2 columns wide so the board keeps a roughly square aspect ratio
//! - Only changed cells are re-sent after the first frame

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, ChangedRuns, Run, TerminalRenderer};
