//! Board module - manages the game grid
//!
//! The board is a `width x height` grid (10x20 by default) where each cell is
//! empty or holds a piece kind. Cells live in one flat row-major buffer that is
//! allocated once; dimensions never change after construction.
//!
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Pieces may overhang the top edge (y < 0) while falling, so rows above the
//! board are never treated as blocked.

use crate::pieces::Shape;
use crate::types::{cell_id, Cell, PieceKind};

/// The game board using flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// `.` is empty and a piece letter (`I`, `O`, ...) is a filled cell.
    /// Returns `None` if the rows are ragged or contain another character.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_rows(&["....", "IIII"]).unwrap();
    /// assert_eq!((board.width(), board.height()), (4, 2));
    /// assert!(board.is_row_full(1));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let width = rows.first()?.chars().count();
        let mut board = Self::new(u16::try_from(width).ok()?, u16::try_from(rows.len()).ok()?);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return None;
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    other => Some(PieceKind::from_str(other.encode_utf8(&mut [0; 4]))?),
                };
                board.cells[y * width + x] = cell;
            }
        }
        Some(board)
    }

    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get height of the board
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Collision view of a single cell.
    ///
    /// Outside the side walls or below the floor counts as blocked. Rows above
    /// the top are open regardless of column contents below them.
    pub fn is_blocked(&self, x: i16, y: i16) -> bool {
        if x < 0 || x >= self.width as i16 || y >= self.height as i16 {
            return true;
        }
        y >= 0 && self.is_occupied(x, y)
    }

    /// Check whether `shape` anchored at (x, y) fits on the board
    pub fn is_valid_position(&self, shape: &Shape, x: i16, y: i16) -> bool {
        shape
            .occupied()
            .all(|(dx, dy)| !self.is_blocked(x + dx, y + dy))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Cells of row `y`, or `None` past the bottom
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        Some(&self.cells[y * width..(y + 1) * width])
    }

    /// Write `kind` under every non-zero cell of `shape` anchored at (x, y).
    ///
    /// Cells above the top edge are dropped; so are cells outside the board,
    /// which a validated position never produces. Returns the number of cells
    /// written.
    pub fn place(&mut self, shape: &Shape, x: i16, y: i16, kind: PieceKind) -> usize {
        let mut written = 0;
        for (dx, dy) in shape.occupied() {
            let py = y + dy;
            if py >= 0 && self.set(x + dx, py, Some(kind)) {
                written += 1;
            }
        }
        written
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows are compacted bottom to top with a read/write pointer pair: each
    /// non-full row is copied down to the next free slot, full rows are
    /// skipped, and the vacated rows at the top are emptied. This matches
    /// removing each full row and re-checking the same index after the rows
    /// above shift into it.
    pub fn clear_full_lines(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Export the board as row-major cell ids (0 = empty).
    ///
    /// Reuses the allocation behind `out`.
    pub fn write_id_grid(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|&cell| cell_id(cell)));
    }
}
