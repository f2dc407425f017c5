//! Game state module - the engine's single owner of all mutable game data
//!
//! This module ties together the board, pieces, piece source, and scoring.
//! It drives gravity from elapsed time, applies player commands, locks pieces,
//! sweeps rows, and walks the `Idle -> Running <-> Paused -> GameOver` lifecycle.
//!
//! Nothing here performs I/O or fails: commands that do not apply in the current
//! phase, or moves that would collide, are simply rejected and reported as `false`.

use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::pieces::{try_rotate, ActivePiece};
use crate::rng::{PieceSource, UniformGenerator};
use crate::scoring::ScoreTracker;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, Phase, PieceKind, RotationDirection};

/// What a single lock did to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LockReport {
    pub rows_cleared: u32,
    pub points: u32,
    pub level_changed: bool,
}

/// Result of one gravity step or drop command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropOutcome {
    /// The piece descended
    Moved,
    /// The piece locked and the next piece spawned
    Locked(LockReport),
    /// The piece locked and the next piece collided on spawn
    ToppedOut(LockReport),
}

impl DropOutcome {
    pub fn lock_report(&self) -> Option<LockReport> {
        match self {
            DropOutcome::Moved => None,
            DropOutcome::Locked(report) | DropOutcome::ToppedOut(report) => Some(*report),
        }
    }
}

/// Result of advancing the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickResult {
    /// Not running; time was not accumulated
    Inactive,
    /// Time accumulated without reaching the drop interval
    Accumulated,
    /// The drop interval elapsed and one gravity step ran
    Dropped(DropOutcome),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = UniformGenerator<StdRng>> {
    board: Board,
    active: Option<ActivePiece>,
    next: Option<PieceKind>,
    source: S,
    scoring: ScoreTracker,
    drop_counter_ms: u32,
    /// Previous clock reading fed to `tick_at`
    last_timestamp_ms: Option<u64>,
    /// Last lock report (consumed by observers)
    last_lock: Option<LockReport>,
    phase: Phase,
}

impl GameState {
    /// Create a new idle game whose pieces come from a seeded uniform generator
    pub fn new(seed: u64) -> Self {
        Self::with_source(UniformGenerator::from_seed(seed))
    }

    /// Create a new idle game seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_source(UniformGenerator::from_entropy())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create a new idle game drawing pieces from `source`
    pub fn with_source(source: S) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            source,
            scoring: ScoreTracker::new(),
            drop_counter_ms: 0,
            last_timestamp_ms: None,
            last_lock: None,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn lines(&self) -> u32 {
        self.scoring.lines()
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.scoring.drop_interval_ms()
    }

    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Reinitialize board and score, spawn a fresh piece and start running.
    ///
    /// The piece source keeps its position, so a reset continues the same sequence.
    pub fn reset(&mut self) {
        self.board.clear();
        self.scoring = ScoreTracker::new();
        self.drop_counter_ms = 0;
        self.last_lock = None;
        self.next = None;
        self.phase = Phase::Running;
        debug!("game reset");
        self.spawn_piece();
    }

    /// Start from idle or game over. While paused this resumes; while running it does nothing.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Idle | Phase::GameOver => {
                self.reset();
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                true
            }
            Phase::Running => false,
        }
    }

    /// Flip between running and paused
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Idle | Phase::GameOver => return false,
        };
        true
    }

    /// Promote the pending kind to the active piece and draw a new pending kind.
    ///
    /// Returns false (and enters game over) when the new piece collides where it spawns.
    /// The colliding piece stays active so it can still be drawn.
    fn spawn_piece(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.source.next_kind(),
        };
        self.next = Some(self.source.next_kind());

        let piece = ActivePiece::spawn(kind);
        self.active = Some(piece);

        if piece.collides(&self.board) {
            self.phase = Phase::GameOver;
            info!(
                score = self.score(),
                lines = self.lines(),
                level = self.level(),
                "game over"
            );
            return false;
        }

        debug!(kind = kind.as_str(), x = piece.x, y = piece.y, "spawned piece");
        true
    }

    /// Shift the active piece horizontally; all or nothing
    fn move_piece(&mut self, dx: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, 0);
        if moved.collides(&self.board) {
            return false;
        }

        self.active = Some(moved);
        true
    }

    /// Rotate the active piece, kicking it sideways if the plain rotation collides.
    /// When no kick works the piece is left exactly as it was.
    fn rotate(&mut self, direction: RotationDirection) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        match try_rotate(&active, direction, |p| p.collides(&self.board)) {
            Some((rotated, offset)) => {
                if offset != 0 {
                    trace!(kind = active.kind.as_str(), offset, "rotation kicked");
                }
                self.active = Some(rotated);
                true
            }
            None => {
                trace!(kind = active.kind.as_str(), ?direction, "rotation blocked");
                false
            }
        }
    }

    /// Descend one row, or lock if the row below is taken. Always resets the drop counter.
    fn soft_drop(&mut self) -> Option<DropOutcome> {
        let active = self.active?;
        self.drop_counter_ms = 0;

        let lowered = active.shifted(0, 1);
        if lowered.collides(&self.board) {
            return Some(self.lock_piece(active));
        }

        self.active = Some(lowered);
        Some(DropOutcome::Moved)
    }

    /// Drop to the lowest legal row and lock there
    fn hard_drop(&mut self) -> Option<DropOutcome> {
        let mut piece = self.active?;
        while !piece.shifted(0, 1).collides(&self.board) {
            piece = piece.shifted(0, 1);
        }
        Some(self.lock_piece(piece))
    }

    /// Merge `piece` into the board, sweep, score and spawn the next piece
    fn lock_piece(&mut self, piece: ActivePiece) -> DropOutcome {
        self.board.merge(&piece);
        self.active = None;
        self.drop_counter_ms = 0;

        let cleared = self.board.sweep();
        let result = self.scoring.credit(cleared.len());
        let report = LockReport {
            rows_cleared: result.rows,
            points: result.points,
            level_changed: result.level_changed,
        };

        debug!(
            kind = piece.kind.as_str(),
            x = piece.x,
            y = piece.y,
            rows = report.rows_cleared,
            points = report.points,
            "piece locked"
        );
        if report.level_changed {
            info!(
                level = self.level(),
                drop_interval_ms = self.drop_interval_ms(),
                "level up"
            );
        }

        self.last_lock = Some(report);

        if self.spawn_piece() {
            DropOutcome::Locked(report)
        } else {
            DropOutcome::ToppedOut(report)
        }
    }

    /// Take and clear the report of the most recent lock
    pub fn take_last_lock(&mut self) -> Option<LockReport> {
        self.last_lock.take()
    }

    /// Row the active piece would come to rest on if hard-dropped now
    pub fn ghost_y(&self) -> Option<i8> {
        let mut piece = self.active?;
        while !piece.shifted(0, 1).collides(&self.board) {
            piece = piece.shifted(0, 1);
        }
        Some(piece.y)
    }

    /// Advance the clock by `delta_ms`.
    ///
    /// Only a running game accumulates time. Once the counter exceeds the drop interval a
    /// single gravity step runs; a large delta never produces more than one step.
    pub fn tick(&mut self, delta_ms: u32) -> TickResult {
        if self.phase != Phase::Running {
            return TickResult::Inactive;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(delta_ms);
        if self.drop_counter_ms <= self.drop_interval_ms() {
            return TickResult::Accumulated;
        }

        match self.soft_drop() {
            Some(outcome) => TickResult::Dropped(outcome),
            None => {
                self.drop_counter_ms = 0;
                TickResult::Accumulated
            }
        }
    }

    /// Advance the clock to an absolute timestamp in milliseconds.
    ///
    /// The first call only records the baseline. Timestamps that go backwards count as no
    /// elapsed time. The baseline moves in every phase, so pausing never banks time.
    pub fn tick_at(&mut self, timestamp_ms: u64) -> TickResult {
        let delta = match self.last_timestamp_ms {
            Some(prev) => timestamp_ms.saturating_sub(prev),
            None => 0,
        };
        self.last_timestamp_ms = Some(match self.last_timestamp_ms {
            Some(prev) => prev.max(timestamp_ms),
            None => timestamp_ms,
        });

        self.tick(u32::try_from(delta).unwrap_or(u32::MAX))
    }

    /// Apply a player command. Returns true when it changed something.
    pub fn dispatch(&mut self, command: Command) -> bool {
        if command.is_piece_command() && self.phase != Phase::Running {
            return false;
        }

        match command {
            Command::Start => self.start(),
            Command::PauseToggle => self.toggle_pause(),
            Command::Reset => {
                self.reset();
                true
            }
            Command::MoveLeft => self.move_piece(-1),
            Command::MoveRight => self.move_piece(1),
            Command::SoftDrop => self.soft_drop().is_some(),
            Command::HardDrop => self.hard_drop().is_some(),
            Command::RotateCw => self.rotate(RotationDirection::Clockwise),
            Command::RotateCcw => self.rotate(RotationDirection::CounterClockwise),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.score = self.score();
        out.lines = self.lines();
        out.level = self.level();
        out.drop_interval_ms = self.drop_interval_ms();
        out.phase = self.phase;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
