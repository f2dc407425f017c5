//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, the terminal front end, and tests alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Gravity
//!
//! The drop interval shrinks linearly with the level and never goes below the floor:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 920ms |
//! | 5 | 680ms |
//! | 12+ | 120ms (floor) |
//!
//! All of these values are fixed at compile time.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Drop interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// How much faster gravity gets with each level
pub const DROP_INTERVAL_STEP_MS: u32 = 80;

/// Drop interval never goes below this
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Level a fresh game starts at
pub const START_LEVEL: u32 = 1;

/// Frame budget used by the terminal runner (~60 FPS)
pub const FRAME_MS: u32 = 16;

/// Line clear scoring table, indexed by rows cleared in one sweep.
///
/// The awarded points are `LINE_SCORES[rows] * level`.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven piece kinds
///
/// Each kind maps to a base cell matrix and a display color in the shape catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Uppercase single-letter label, as shown in previews
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Direction of a 90° rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    pub fn reversed(&self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Commands accepted by the engine
///
/// The mapping from physical input (keys, buttons) to commands lives outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin a new game from idle or game over (resumes when paused)
    Start,
    /// Flip between running and paused
    PauseToggle,
    /// Reinitialize the game and start playing immediately
    Reset,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one row, locking it if it cannot descend
    SoftDrop,
    /// Drop piece to the lowest legal row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
}

impl Command {
    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("pausetoggle"), Some(Command::PauseToggle));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "pausetoggle" | "pause" => Some(Command::PauseToggle),
            "reset" => Some(Command::Reset),
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::PauseToggle => "pauseToggle",
            Command::Reset => "reset",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
        }
    }

    /// Commands that act on the falling piece (only honored while running).
    pub fn is_piece_command(&self) -> bool {
        matches!(
            self,
            Command::MoveLeft
                | Command::MoveRight
                | Command::SoftDrop
                | Command::HardDrop
                | Command::RotateCw
                | Command::RotateCcw
        )
    }
}

/// Lifecycle phase of a game
///
/// `Idle -> Running <-> Paused`, `Running -> GameOver`, and `Reset` from anywhere back to `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl Phase {
    /// Human-readable status line for the current phase.
    pub fn status_text(&self) -> &'static str {
        match self {
            Phase::Idle => "Press Start to play",
            Phase::Running => "Playing",
            Phase::Paused => "Paused",
            Phase::GameOver => "Game over. Press Reset to try again.",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;
