//! Core types module - shared data structures and constants
//!
//! This module defines the plain data shared by the engine, the input mapping
//! and the terminal renderer. Nothing here depends on I/O.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOARD_WIDTH` | 10 | Playfield columns |
//! | `BOARD_HEIGHT` | 20 | Playfield rows |
//! | `BLOCK_SIZE` | 30 | Edge of one cell in renderer units |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 50 | Interval reduction per level |
//! | `MIN_DROP_MS` | 50 | Gravity interval floor |
//! | `LINES_PER_LEVEL` | 10 | Lines needed to advance a level |
//! | `LINE_SCORE` | 100 | Points per cleared line, multiplied by level |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_id(3).unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.id(), 3);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u16 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u16 = 20;

/// Default block edge in renderer units (pixels for a canvas renderer)
pub const BLOCK_SIZE: u16 = 30;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 50;

/// Fastest gravity interval
pub const MIN_DROP_MS: u32 = 50;

/// Lines cleared per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per cleared line at level 1
pub const LINE_SCORE: u32 = 100;

/// Id stored in exported grids for an empty cell
pub const EMPTY_ID: u8 = 0;

/// The seven piece kinds
///
/// Discriminants are the ids exported in board grids and shape matrices
/// (0 is reserved for empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    I = 1,
    O = 2,
    T = 3,
    S = 4,
    Z = 5,
    J = 6,
    L = 7,
}

impl PieceKind {
    /// All kinds in id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Numeric id (1..=7)
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a kind by its numeric id
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_id(7), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_id(0), None);
    /// assert_eq!(PieceKind::from_id(8), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
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
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase letter, as shown in the side panel
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Display color for this kind
    pub fn color(self) -> Rgb {
        PALETTE[self.id() as usize]
    }
}

/// Player commands accepted by the session
///
/// One command per key press; the engine has no auto-repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Drop piece to the lowest valid row and lock it
    HardDrop,
}

impl GameAction {
    /// Parse action from its camelCase name
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Numeric id of a board cell (0 for empty)
pub fn cell_id(cell: Cell) -> u8 {
    cell.map_or(EMPTY_ID, PieceKind::id)
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Fixed cell palette, indexed by cell id (0 = empty, 1..=7 piece kinds)
pub const PALETTE: [Rgb; 8] = [
    Rgb::new(0, 0, 0),     // empty
    Rgb::new(255, 0, 0),   // I
    Rgb::new(0, 255, 0),   // O
    Rgb::new(0, 0, 255),   // T
    Rgb::new(255, 255, 0), // S
    Rgb::new(255, 0, 255), // Z
    Rgb::new(0, 255, 255), // J
    Rgb::new(255, 165, 0), // L
];

/// Palette color for a cell id; unknown ids map to the empty color.
pub fn color_for_id(id: u8) -> Rgb {
    PALETTE.get(id as usize).copied().unwrap_or(PALETTE[0])
}
