use crate::pieces::Shape;
use crate::session::ActivePiece;
use crate::types::{color_for_id, PieceKind, Rgb, EMPTY_ID};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i16,
    pub y: i16,
}

impl ActiveSnapshot {
    /// Board coordinates of every occupied cell, including ones above the top.
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .occupied()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape.clone(),
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only copy of everything a renderer or score display needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    pub block_size: u16,
    /// Row-major cell ids, `width * height` entries
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub drop_timer_ms: u32,
    pub games_played: u32,
}

impl GameSnapshot {
    /// Cell id at (x, y); out of range reads as empty.
    pub fn cell(&self, x: u16, y: u16) -> u8 {
        if x >= self.width || y >= self.height {
            return EMPTY_ID;
        }
        self.board
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .unwrap_or(EMPTY_ID)
    }

    /// Color for the cell at (x, y)
    pub fn cell_color(&self, x: u16, y: u16) -> Rgb {
        color_for_id(self.cell(x, y))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            block_size: 0,
            board: Vec::new(),
            active: None,
            next: PieceKind::I,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
            drop_timer_ms: 0,
            games_played: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_reads_out_of_range_as_empty() {
        let snap = GameSnapshot {
            width: 2,
            height: 1,
            board: vec![3, 0],
            ..GameSnapshot::default()
        };
        assert_eq!(snap.cell(0, 0), 3);
        assert_eq!(snap.cell(1, 0), 0);
        assert_eq!(snap.cell(2, 0), 0);
        assert_eq!(snap.cell(0, 1), 0);
        assert_eq!(snap.cell_color(0, 0), PieceKind::T.color());
    }

    #[test]
    fn active_cells_are_in_board_coordinates() {
        let active = ActiveSnapshot {
            kind: PieceKind::O,
            shape: Shape::base(PieceKind::O),
            x: 4,
            y: -1,
        };
        let cells: Vec<_> = active.cells().collect();
        assert_eq!(cells, vec![(4, -1), (5, -1), (4, 0), (5, 0)]);
    }
}
