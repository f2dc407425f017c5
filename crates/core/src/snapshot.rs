use crate::pieces::{ActivePiece, PieceMatrix};
use crate::types::{Cell, PieceKind, Phase, BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH, START_LEVEL};

pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub matrix: PieceMatrix,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Occupied cells in board coordinates, with the top edge moved to `y`
    pub fn cells_at(&self, y: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .occupied()
            .map(move |(dx, dy)| (self.x + dx, y + dy))
    }

    /// Occupied cells in board coordinates
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.cells_at(self.y)
    }
}

/// Read-only view of a game, refreshed after every tick/command for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Option<ActiveSnapshot>,
    /// Row the active piece would land on if hard-dropped now
    pub ghost_y: Option<i8>,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub phase: Phase,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.next = None;
        self.score = 0;
        self.lines = 0;
        self.level = START_LEVEL;
        self.drop_interval_ms = BASE_DROP_MS;
        self.phase = Phase::Idle;
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: None,
            score: 0,
            lines: 0,
            level: 0,
            drop_interval_ms: 0,
            phase: Phase::Idle,
        };
        s.clear();
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_idle_level_one() {
        let s = GameSnapshot::default();
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.level, 1);
        assert_eq!(s.drop_interval_ms, 1000);
        assert!(s.active.is_none());
        assert!(!s.playable());
    }

    #[test]
    fn active_cells_follow_ghost_row() {
        let active = ActiveSnapshot::from(ActivePiece::spawn(PieceKind::O));
        let at_spawn: Vec<_> = active.cells().collect();
        assert_eq!(at_spawn, vec![(4, 0), (5, 0), (4, 1), (5, 1)]);

        let ghost: Vec<_> = active.cells_at(18).collect();
        assert_eq!(ghost, vec![(4, 18), (5, 18), (4, 19), (5, 19)]);
    }
}
