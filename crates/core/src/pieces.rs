//! Pieces module - shape catalog and matrix rotation
//!
//! Every piece is a small rectangular matrix whose entries are either 0
//! (unoccupied) or the piece id. Rotation is a pure transpose-and-reverse that
//! returns a new matrix; there are no rotation states or kick tables.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Largest supported shape edge (the I piece is 4x4)
pub const MAX_SHAPE_DIM: usize = 4;

const MAX_SHAPE_CELLS: usize = MAX_SHAPE_DIM * MAX_SHAPE_DIM;

const I_GRID: [[u8; 4]; 4] = [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]];
const O_GRID: [[u8; 2]; 2] = [[2, 2], [2, 2]];
const T_GRID: [[u8; 3]; 3] = [[0, 3, 0], [3, 3, 3], [0, 0, 0]];
const S_GRID: [[u8; 3]; 3] = [[0, 4, 4], [4, 4, 0], [0, 0, 0]];
const Z_GRID: [[u8; 3]; 3] = [[5, 5, 0], [0, 5, 5], [0, 0, 0]];
const J_GRID: [[u8; 3]; 3] = [[6, 0, 0], [6, 6, 6], [0, 0, 0]];
const L_GRID: [[u8; 3]; 3] = [[0, 0, 7], [7, 7, 7], [0, 0, 0]];

/// Immutable R x C cell matrix, stored row-major without heap allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: ArrayVec<u8, MAX_SHAPE_CELLS>,
}

impl Shape {
    /// Build a shape from rows of cell values.
    ///
    /// Returns `None` unless the rows are non-empty, rectangular and at most
    /// `MAX_SHAPE_DIM` on each side.
    pub fn new(rows: &[&[u8]]) -> Option<Self> {
        let cols = rows.first()?.len();
        if rows.len() > MAX_SHAPE_DIM || cols == 0 || cols > MAX_SHAPE_DIM {
            return None;
        }
        if rows.iter().any(|row| row.len() != cols) {
            return None;
        }

        let mut cells = ArrayVec::new();
        for row in rows {
            cells.extend(row.iter().copied());
        }
        Some(Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            cells,
        })
    }

    fn from_grid<const R: usize, const C: usize>(grid: &[[u8; C]; R]) -> Self {
        let mut cells = ArrayVec::new();
        for row in grid {
            cells.extend(row.iter().copied());
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            cells,
        }
    }

    /// The unrotated catalog shape for a piece kind.
    pub fn base(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_grid(&I_GRID),
            PieceKind::O => Self::from_grid(&O_GRID),
            PieceKind::T => Self::from_grid(&T_GRID),
            PieceKind::S => Self::from_grid(&S_GRID),
            PieceKind::Z => Self::from_grid(&Z_GRID),
            PieceKind::J => Self::from_grid(&J_GRID),
            PieceKind::L => Self::from_grid(&L_GRID),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Cell value at (row, col), or `None` outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        Some(self.cells[row * self.cols() + col])
    }

    /// Offsets `(col, row)` of every non-zero cell, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        let cols = self.cols();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(move |(i, _)| ((i % cols) as i16, (i / cols) as i16))
    }

    /// Rotated copy (90° clockwise).
    pub fn rotated(&self) -> Self {
        rotate(self)
    }
}

/// Get the base shape for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    Shape::base(kind)
}

/// Rotate a shape 90° clockwise.
///
/// An R x C input becomes C x R with `out[col][R - 1 - row] = in[row][col]`.
pub fn rotate(shape: &Shape) -> Shape {
    let rows = shape.rows();
    let cols = shape.cols();
    let mut cells: ArrayVec<u8, MAX_SHAPE_CELLS> = ArrayVec::new();
    for _ in 0..rows * cols {
        cells.push(0);
    }

    for row in 0..rows {
        for col in 0..cols {
            cells[col * rows + (rows - 1 - row)] = shape.cells[row * cols + col];
        }
    }

    Shape {
        rows: shape.cols,
        cols: shape.rows,
        cells,
    }
}

/// Horizontal spawn anchor: the shape is centred on the board, top row 0.
pub fn spawn_x(board_width: u16, shape: &Shape) -> i16 {
    (board_width / 2) as i16 - (shape.cols() / 2) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_dimensions() {
        assert_eq!((Shape::base(PieceKind::I).rows(), Shape::base(PieceKind::I).cols()), (4, 4));
        assert_eq!((Shape::base(PieceKind::O).rows(), Shape::base(PieceKind::O).cols()), (2, 2));
        for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
            let shape = Shape::base(kind);
            assert_eq!((shape.rows(), shape.cols()), (3, 3), "{:?}", kind);
        }
    }

    #[test]
    fn test_catalog_cells_carry_piece_id() {
        for kind in PieceKind::ALL {
            let shape = Shape::base(kind);
            assert_eq!(shape.occupied().count(), 4, "{:?}", kind);
            for (col, row) in shape.occupied() {
                assert_eq!(shape.get(row as usize, col as usize), Some(kind.id()));
            }
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = rotate(&Shape::base(PieceKind::T));
        let expected = Shape::new(&[&[0, 3, 0], &[0, 3, 3], &[0, 3, 0]]).unwrap();
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_rotate_rectangular_swaps_dimensions() {
        let shape = Shape::new(&[&[1, 2, 3], &[4, 5, 6]]).unwrap();
        let rotated = rotate(&shape);
        assert_eq!((rotated.rows(), rotated.cols()), (3, 2));
        let expected = Shape::new(&[&[4, 1], &[5, 2], &[6, 3]]).unwrap();
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_rotate_i_becomes_vertical() {
        let rotated = Shape::base(PieceKind::I).rotated();
        let cells: Vec<_> = rotated.occupied().collect();
        assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_new_rejects_bad_matrices() {
        assert!(Shape::new(&[]).is_none());
        assert!(Shape::new(&[&[]]).is_none());
        assert!(Shape::new(&[&[1, 1], &[1]]).is_none());
        assert!(Shape::new(&[&[1, 1, 1, 1, 1]]).is_none());
    }

    #[test]
    fn test_spawn_x_centres_shape() {
        assert_eq!(spawn_x(10, &Shape::base(PieceKind::I)), 3);
        assert_eq!(spawn_x(10, &Shape::base(PieceKind::O)), 4);
        assert_eq!(spawn_x(10, &Shape::base(PieceKind::T)), 4);
        assert_eq!(spawn_x(7, &Shape::base(PieceKind::T)), 2);
    }
}
