//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::pieces::{ActivePiece, PieceMatrix};
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Upper bound on rows removed by a single sweep
pub const MAX_CLEARED_ROWS: usize = BOARD_HEIGHT as usize;

/// Row indices removed by a sweep, bottom to top, in pre-sweep coordinates
pub type ClearedRows = ArrayVec<usize, MAX_CLEARED_ROWS>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Collision test for a matrix whose top-left corner sits at (x, y).
    ///
    /// An occupied matrix cell collides when it lands outside the column range, below the
    /// last row, or on a filled cell. Cells above row 0 never collide.
    pub fn collides_at(&self, matrix: &PieceMatrix, x: i8, y: i8) -> bool {
        matrix.occupied().any(|(dx, dy)| {
            let bx = x + dx;
            let by = y + dy;
            if bx < 0 || bx >= BOARD_WIDTH as i8 || by >= BOARD_HEIGHT as i8 {
                return true;
            }
            by >= 0 && self.is_occupied(bx, by)
        })
    }

    /// Write the piece's kind into every cell it covers.
    ///
    /// Does not check for collisions; callers lock only legal placements.
    /// Cells above the top row are dropped.
    pub fn merge(&mut self, piece: &ActivePiece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove a row, shift every row above it down by one, and empty the top row.
    /// Returns false if `y` is out of range.
    pub fn remove_row(&mut self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }

        let width = BOARD_WIDTH as usize;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(None);

        true
    }

    /// Remove every full row, scanning bottom to top.
    ///
    /// After a removal the same index is checked again, since the row above has shifted into
    /// it. Returns the removed rows in their pre-sweep coordinates, bottom first.
    pub fn sweep(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = BOARD_HEIGHT as usize;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                // Rows above a removal move down one, so `row` held `row - removed` originally.
                cleared.push(row - cleared.len());
                self.remove_row(row);
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Copy the grid into a row-major 2D array
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
