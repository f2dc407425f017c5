//! Pieces module - shape catalog, piece matrices and the rotation resolver
//!
//! Every kind is a small square boolean matrix (2x2, 3x3 or 4x4). Rotation is a plain
//! transpose followed by a flip, so there are no per-kind rotation tables: the O piece
//! and other symmetric shapes come out unchanged by construction.
//!
//! When a rotated matrix collides, the resolver tries horizontal kicks
//! `0, +1, -2, +3, -4, ...` relative to the pre-rotation column, up to the matrix width.

use crate::types::{PieceKind, RotationDirection, BOARD_WIDTH};

use crate::board::Board;

/// Largest matrix side in the catalog (the I piece)
pub const MAX_PIECE_SIZE: usize = 4;

/// Square occupancy matrix of a piece, stored inline (no allocation).
///
/// Only the top-left `size x size` region is meaningful; `cells[y][x]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceMatrix {
    size: u8,
    cells: [[bool; MAX_PIECE_SIZE]; MAX_PIECE_SIZE],
}

impl PieceMatrix {
    /// Build a matrix from rows of 0/1 values. Rows must be square and at most 4 wide.
    const fn from_bits<const N: usize>(rows: [[u8; N]; N]) -> Self {
        let mut cells = [[false; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        let mut y = 0;
        while y < N {
            let mut x = 0;
            while x < N {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    /// Side length of the matrix (2, 3 or 4)
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Is the cell at column `x`, row `y` part of the piece?
    pub fn get(&self, x: u8, y: u8) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        self.cells[y as usize][x as usize]
    }

    /// Occupied cells as `(x, y)` offsets from the matrix's top-left corner.
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| self.cells[y][x].then_some((x as i8, y as i8)))
        })
    }

    /// Rotate 90° via transpose + flip.
    ///
    /// Clockwise reverses each transposed row; counter-clockwise reverses the row order.
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        let n = self.size as usize;
        let mut cells = [[false; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (y, row) in cells.iter_mut().enumerate().take(n) {
            for (x, cell) in row.iter_mut().enumerate().take(n) {
                *cell = match direction {
                    RotationDirection::Clockwise => self.cells[n - 1 - x][y],
                    RotationDirection::CounterClockwise => self.cells[x][n - 1 - y],
                };
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }
}

const I_MATRIX: PieceMatrix = PieceMatrix::from_bits([
    [0, 0, 0, 0],
    [1, 1, 1, 1],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
]);
const J_MATRIX: PieceMatrix = PieceMatrix::from_bits([[1, 0, 0], [1, 1, 1], [0, 0, 0]]);
const L_MATRIX: PieceMatrix = PieceMatrix::from_bits([[0, 0, 1], [1, 1, 1], [0, 0, 0]]);
const O_MATRIX: PieceMatrix = PieceMatrix::from_bits([[1, 1], [1, 1]]);
const S_MATRIX: PieceMatrix = PieceMatrix::from_bits([[0, 1, 1], [1, 1, 0], [0, 0, 0]]);
const T_MATRIX: PieceMatrix = PieceMatrix::from_bits([[0, 1, 0], [1, 1, 1], [0, 0, 0]]);
const Z_MATRIX: PieceMatrix = PieceMatrix::from_bits([[1, 1, 0], [0, 1, 1], [0, 0, 0]]);

/// Canonical rotation-zero matrix for a piece kind
pub fn base_matrix(kind: PieceKind) -> PieceMatrix {
    match kind {
        PieceKind::I => I_MATRIX,
        PieceKind::J => J_MATRIX,
        PieceKind::L => L_MATRIX,
        PieceKind::O => O_MATRIX,
        PieceKind::S => S_MATRIX,
        PieceKind::T => T_MATRIX,
        PieceKind::Z => Z_MATRIX,
    }
}

/// 24-bit display color, carried through for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DisplayColor {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }
}

/// Color of empty board cells
pub const EMPTY_COLOR: DisplayColor = DisplayColor::from_hex(0x0b1118);

/// Display color for a piece kind
pub fn display_color(kind: PieceKind) -> DisplayColor {
    match kind {
        PieceKind::I => DisplayColor::from_hex(0x4dd2ff),
        PieceKind::J => DisplayColor::from_hex(0x6488ff),
        PieceKind::L => DisplayColor::from_hex(0xff9f43),
        PieceKind::O => DisplayColor::from_hex(0xfeca57),
        PieceKind::S => DisplayColor::from_hex(0x1dd1a1),
        PieceKind::T => DisplayColor::from_hex(0xc56cf0),
        PieceKind::Z => DisplayColor::from_hex(0xff6b6b),
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub matrix: PieceMatrix,
    /// Board column of the matrix's left edge
    pub x: i8,
    /// Board row of the matrix's top edge
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece at its spawn position: top row, horizontally centered (ties round left).
    pub fn spawn(kind: PieceKind) -> Self {
        let matrix = base_matrix(kind);
        Self {
            kind,
            matrix,
            x: (BOARD_WIDTH / 2) as i8 - (matrix.size() / 2) as i8,
            y: 0,
        }
    }

    /// Occupied cells in board coordinates
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .occupied()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Does this piece overlap an occupied cell, a side wall, or the floor?
    pub fn collides(&self, board: &Board) -> bool {
        board.collides_at(&self.matrix, self.x, self.y)
    }

    /// Same piece shifted by `(dx, dy)`
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Horizontal kick offsets tried after a rotation: `0, +1, -2, +3, -4, ...` up to `|offset| <= limit`.
pub fn kick_offsets(limit: u8) -> impl Iterator<Item = i8> {
    (0..=limit as i8).map(|m| if m % 2 == 0 { -m } else { m })
}

/// Try to rotate a piece, kicking it sideways if needed.
///
/// `collides` is asked about each candidate placement. Returns the rotated piece and the
/// kick offset that was applied, or `None` when every offset within the matrix width
/// collides (the caller keeps the original piece untouched).
pub fn try_rotate(
    piece: &ActivePiece,
    direction: RotationDirection,
    collides: impl Fn(&ActivePiece) -> bool,
) -> Option<(ActivePiece, i8)> {
    let mut candidate = ActivePiece {
        matrix: piece.matrix.rotated(direction),
        ..*piece
    };

    for offset in kick_offsets(candidate.matrix.size()) {
        candidate.x = piece.x + offset;
        if !collides(&candidate) {
            return Some((candidate, offset));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(m: &PieceMatrix) -> Vec<String> {
        (0..m.size())
            .map(|y| {
                (0..m.size())
                    .map(|x| if m.get(x, y) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn catalog_sizes() {
        assert_eq!(base_matrix(PieceKind::I).size(), 4);
        assert_eq!(base_matrix(PieceKind::O).size(), 2);
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            assert_eq!(base_matrix(kind).size(), 3, "{:?}", kind);
        }
    }

    #[test]
    fn every_kind_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(base_matrix(kind).occupied().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn t_rotates_clockwise_to_point_right() {
        let cw = base_matrix(PieceKind::T).rotated(RotationDirection::Clockwise);
        assert_eq!(rows(&cw), vec![".#.", ".##", ".#."]);
    }

    #[test]
    fn t_rotates_counter_clockwise_to_point_left() {
        let ccw = base_matrix(PieceKind::T).rotated(RotationDirection::CounterClockwise);
        assert_eq!(rows(&ccw), vec![".#.", "##.", ".#."]);
    }

    #[test]
    fn i_rotates_to_vertical_column() {
        let cw = base_matrix(PieceKind::I).rotated(RotationDirection::Clockwise);
        assert_eq!(rows(&cw), vec!["..#.", "..#.", "..#.", "..#."]);
    }

    #[test]
    fn o_is_rotation_invariant() {
        let o = base_matrix(PieceKind::O);
        assert_eq!(o.rotated(RotationDirection::Clockwise), o);
        assert_eq!(o.rotated(RotationDirection::CounterClockwise), o);
    }

    #[test]
    fn opposite_rotations_cancel() {
        for kind in PieceKind::ALL {
            let m = base_matrix(kind);
            for dir in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
                assert_eq!(m.rotated(dir).rotated(dir.reversed()), m, "{:?}", kind);
            }
        }
    }

    #[test]
    fn spawn_is_centered_rounding_left() {
        assert_eq!(ActivePiece::spawn(PieceKind::I).x, 3);
        assert_eq!(ActivePiece::spawn(PieceKind::O).x, 4);
        assert_eq!(ActivePiece::spawn(PieceKind::T).x, 4);
        assert_eq!(ActivePiece::spawn(PieceKind::T).y, 0);
    }

    #[test]
    fn kick_offsets_alternate() {
        let offsets: Vec<i8> = kick_offsets(4).collect();
        assert_eq!(offsets, vec![0, 1, -2, 3, -4]);
        let offsets: Vec<i8> = kick_offsets(2).collect();
        assert_eq!(offsets, vec![0, 1, -2]);
    }

    #[test]
    fn try_rotate_without_obstacles_uses_no_kick() {
        let piece = ActivePiece::spawn(PieceKind::T);
        let (rotated, offset) =
            try_rotate(&piece, RotationDirection::Clockwise, |_| false).unwrap();
        assert_eq!(offset, 0);
        assert_eq!(rotated.x, piece.x);
        assert_eq!(
            rotated.matrix,
            piece.matrix.rotated(RotationDirection::Clockwise)
        );
    }

    #[test]
    fn try_rotate_takes_first_legal_offset() {
        let piece = ActivePiece::spawn(PieceKind::L);
        // Only a kick of -2 is accepted.
        let target = piece.x - 2;
        let (rotated, offset) =
            try_rotate(&piece, RotationDirection::Clockwise, |p| p.x != target).unwrap();
        assert_eq!(offset, -2);
        assert_eq!(rotated.x, target);
    }

    #[test]
    fn try_rotate_gives_up_past_matrix_width() {
        let piece = ActivePiece::spawn(PieceKind::S);
        // -4 exceeds the 3-wide matrix and must never be tried.
        let target = piece.x - 4;
        assert!(try_rotate(&piece, RotationDirection::Clockwise, |p| p.x != target).is_none());
    }

    #[test]
    fn display_colors_decode_hex() {
        assert_eq!(
            display_color(PieceKind::I),
            DisplayColor {
                r: 0x4d,
                g: 0xd2,
                b: 0xff
            }
        );
        assert_eq!(EMPTY_COLOR, DisplayColor::from_hex(0x0b1118));
    }
}
