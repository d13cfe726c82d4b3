//! Session module - one running game
//!
//! A [`Session`] owns the board, the falling piece, the next piece, the piece
//! source and the score progression. It is driven from outside: the host
//! feeds elapsed time through [`Session::update`] and player commands through
//! [`Session::apply_action`], then reads a [`GameSnapshot`] to draw.
//!
//! Invalid commands are silent no-ops. A failed downward move locks the
//! piece; a freshly spawned piece that does not fit ends the game, which
//! resets the session in place and keeps going.

use std::vec::Drain;

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::config::{ConfigError, SessionConfig};
use crate::pieces::{get_shape, rotate, spawn_x, Shape};
use crate::rng::{PieceSource, UniformPieces};
use crate::scoring::Progression;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, PieceKind};

/// Active falling piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i16,
    pub y: i16,
}

impl ActivePiece {
    /// Create a piece with its base shape at the spawn anchor
    pub fn spawn(kind: PieceKind, board_width: u16) -> Self {
        let shape = get_shape(kind);
        let x = spawn_x(board_width, &shape);
        Self { kind, shape, x, y: 0 }
    }

    /// Check if the piece fits where it is
    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid_position(&self.shape, self.x, self.y)
    }
}

/// Notifications for the host, drained with [`Session::drain_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A lock cleared lines; carries the updated display values.
    StatsChanged { score: u32, level: u32, lines: u32 },
    /// The spawn was blocked; carries the values from before the reset.
    GameOver {
        final_score: u32,
        final_lines: u32,
        final_level: u32,
    },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Session<P = UniformPieces> {
    config: SessionConfig,
    board: Board,
    active: Option<ActivePiece>,
    next: PieceKind,
    pieces: P,
    progression: Progression,
    drop_timer_ms: u32,
    /// Number of automatic restarts so far.
    games_played: u32,
    events: Vec<GameEvent>,
}

impl Session<UniformPieces> {
    /// Create a new session with uniform pieces seeded from `config.seed`
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        Self::with_source(config, UniformPieces::new(config.seed))
    }
}

impl<P: PieceSource> Session<P> {
    pub fn with_source(config: SessionConfig, pieces: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.width, config.height);
        Ok(Self::assemble(config, pieces, board))
    }

    /// Start from an existing board, e.g. a puzzle position.
    pub fn with_board(config: SessionConfig, pieces: P, board: Board) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.width() != config.width || board.height() != config.height {
            return Err(ConfigError::BoardMismatch {
                width: config.width,
                height: config.height,
                actual_width: board.width(),
                actual_height: board.height(),
            });
        }
        Ok(Self::assemble(config, pieces, board))
    }

    fn assemble(config: SessionConfig, mut pieces: P, board: Board) -> Self {
        let first = pieces.next_piece();
        let next = pieces.next_piece();
        let mut session = Self {
            config,
            active: Some(ActivePiece::spawn(first, board.width())),
            board,
            next,
            pieces,
            progression: Progression::new(config.initial_drop_ms),
            drop_timer_ms: 0,
            games_played: 0,
            events: Vec::new(),
        };
        if !session.active_fits() {
            session.game_over();
        }
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn lines(&self) -> u32 {
        self.progression.lines()
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.progression.drop_interval_ms()
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Take all pending events, oldest first.
    ///
    /// Events accumulate until drained, so hosts should drain every frame.
    pub fn drain_events(&mut self) -> Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.block_size = self.config.block_size;
        self.board.write_id_grid(&mut out.board);
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.next = self.next;
        out.score = self.progression.score();
        out.level = self.progression.level();
        out.lines = self.progression.lines();
        out.drop_interval_ms = self.progression.drop_interval_ms();
        out.drop_timer_ms = self.drop_timer_ms;
        out.games_played = self.games_played;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a player command. Returns true if it changed the game.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => {
                if self.active.is_none() {
                    return false;
                }
                // Either moves one row or locks; both change the game.
                self.try_move(0, 1);
                true
            }
            GameAction::Rotate => self.try_rotate(),
            GameAction::HardDrop => self.hard_drop().is_some(),
        }
    }

    /// Advance gravity by `delta_ms`.
    ///
    /// Once the accumulated time reaches the gravity interval the piece takes
    /// exactly one step down and the accumulator restarts from zero; any
    /// overshoot is dropped. Returns true if a piece was stepped (moved or
    /// locked); with no active piece the interval elapses without a step.
    pub fn update(&mut self, delta_ms: u32) -> bool {
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(delta_ms);
        if self.drop_timer_ms < self.progression.drop_interval_ms() {
            return false;
        }
        if self.active.is_none() {
            self.drop_timer_ms = 0;
            return false;
        }

        trace!(
            waited_ms = self.drop_timer_ms,
            interval_ms = self.progression.drop_interval_ms(),
            "gravity step"
        );
        self.try_move(0, 1);
        self.drop_timer_ms = 0;
        true
    }

    /// Try to shift the active piece.
    ///
    /// Returns true if it moved. A blocked downward move locks the piece; a
    /// blocked sideways move does nothing.
    pub fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        let (x, y) = (piece.x + dx, piece.y + dy);
        if self.board.is_valid_position(&piece.shape, x, y) {
            piece.x = x;
            piece.y = y;
            return true;
        }

        if dy > 0 {
            self.lock_piece();
        }
        false
    }

    /// Try to rotate the active piece clockwise in place (no kicks)
    pub fn try_rotate(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        let rotated = rotate(&piece.shape);
        if !self.board.is_valid_position(&rotated, piece.x, piece.y) {
            return false;
        }
        piece.shape = rotated;
        true
    }

    /// Drop the active piece as far as it goes and lock it.
    ///
    /// Returns the number of rows fallen, or `None` with no active piece.
    pub fn hard_drop(&mut self) -> Option<u32> {
        let piece = self.active.as_mut()?;

        let mut rows = 0;
        while self
            .board
            .is_valid_position(&piece.shape, piece.x, piece.y + 1)
        {
            piece.y += 1;
            rows += 1;
        }

        self.lock_piece();
        Some(rows)
    }

    fn active_fits(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|piece| piece.is_valid(&self.board))
    }

    /// Write the active piece into the board, clear lines and spawn the next.
    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.place(&piece.shape, piece.x, piece.y, piece.kind);
        let cleared = self.board.clear_full_lines() as u32;
        debug!(
            kind = piece.kind.as_str(),
            x = piece.x,
            y = piece.y,
            cleared,
            "piece locked"
        );

        if let Some(result) = self.progression.apply_clear(cleared) {
            if result.leveled_up {
                info!(
                    level = result.level,
                    drop_interval_ms = result.drop_interval_ms,
                    "level up"
                );
            }
            self.events.push(GameEvent::StatsChanged {
                score: result.score,
                level: result.level,
                lines: result.lines,
            });
        }

        self.active = Some(ActivePiece::spawn(self.next, self.board.width()));
        self.next = self.pieces.next_piece();

        if !self.active_fits() {
            self.game_over();
        }
    }

    /// Report the final stats, then reset to a fresh game with new pieces.
    fn game_over(&mut self) {
        let final_score = self.progression.score();
        let final_lines = self.progression.lines();
        let final_level = self.progression.level();
        info!(final_score, final_lines, final_level, "game over");

        self.events.push(GameEvent::GameOver {
            final_score,
            final_lines,
            final_level,
        });

        self.board.clear();
        self.progression.reset();
        self.games_played = self.games_played.wrapping_add(1);

        let first = self.pieces.next_piece();
        self.active = Some(ActivePiece::spawn(first, self.board.width()));
        self.next = self.pieces.next_piece();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequencePieces;

    fn session_with(kinds: &[PieceKind]) -> Session<SequencePieces> {
        Session::with_source(SessionConfig::default(), SequencePieces::new(kinds.to_vec())).unwrap()
    }

    #[test]
    fn test_new_session() {
        let state = session_with(&[PieceKind::T, PieceKind::O]);
        let active = state.active().unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!((active.x, active.y), (4, 0));
        assert_eq!(state.next_piece(), PieceKind::O);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 1000);
        assert_eq!(state.games_played(), 0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SessionConfig {
            width: 2,
            ..SessionConfig::default()
        };
        assert!(Session::new(config).is_err());
    }

    #[test]
    fn test_with_board_rejects_mismatched_board() {
        let result = Session::with_board(
            SessionConfig::default(),
            SequencePieces::new(vec![PieceKind::I]),
            Board::new(8, 20),
        );
        assert!(matches!(result, Err(ConfigError::BoardMismatch { .. })));
    }

    #[test]
    fn test_try_move() {
        let mut state = session_with(&[PieceKind::O]);
        assert!(state.try_move(1, 0));
        assert_eq!(state.active().unwrap().x, 5);
        assert!(state.try_move(-1, 0));
        assert!(state.try_move(0, 1));
        assert_eq!(state.active().unwrap().y, 1);
    }

    #[test]
    fn test_sideways_into_wall_is_ignored() {
        let mut state = session_with(&[PieceKind::O]);
        while state.try_move(-1, 0) {}
        let before = state.active().cloned();
        assert!(!state.try_move(-1, 0));
        assert_eq!(state.active().cloned(), before);
        assert_eq!(state.board().cells().iter().filter(|c| c.is_some()).count(), 0);
    }

    #[test]
    fn test_blocked_soft_drop_locks_and_promotes_next() {
        let mut state = session_with(&[PieceKind::O, PieceKind::T, PieceKind::I]);
        while state.try_move(0, 1) {}

        // The failing step locked the O and promoted T; I is now next.
        assert_eq!(state.active().unwrap().kind, PieceKind::T);
        assert_eq!(state.next_piece(), PieceKind::I);
        assert_eq!(state.board().get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(state.board().get(5, 18), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_try_rotate() {
        let mut state = session_with(&[PieceKind::T]);
        assert!(state.try_rotate());
        let expected = Shape::new(&[&[0, 3, 0], &[0, 3, 3], &[0, 3, 0]]).unwrap();
        assert_eq!(state.active().unwrap().shape, expected);
    }

    #[test]
    fn test_rotation_against_wall_is_rejected() {
        let mut state = session_with(&[PieceKind::I]);
        state.active = Some(ActivePiece {
            kind: PieceKind::I,
            shape: Shape::base(PieceKind::I).rotated(),
            x: 7,
            y: 5,
        });

        // Vertical I in column 9; the next rotation would need columns 7..=10.
        assert!(!state.try_rotate());
        assert_eq!(state.active().unwrap().shape, Shape::base(PieceKind::I).rotated());
        assert_eq!(state.active().unwrap().x, 7);
    }

    #[test]
    fn test_hard_drop_on_empty_board() {
        let mut state = session_with(&[PieceKind::I, PieceKind::O]);
        assert_eq!(state.hard_drop(), Some(18));
        for x in 3..7 {
            assert_eq!(state.board().get(x, 19), Some(Some(PieceKind::I)));
        }
        assert_eq!(state.active().unwrap().kind, PieceKind::O);
    }

    #[test]
    fn test_commands_without_active_piece_are_noops() {
        let mut state = session_with(&[PieceKind::T]);
        state.active = None;

        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::SoftDrop));
        assert!(!state.apply_action(GameAction::Rotate));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert!(!state.update(5000));
        assert_eq!(state.drop_timer_ms(), 0);
        assert!(state.active().is_none());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_gravity_accumulates_and_drops_overshoot() {
        let mut state = session_with(&[PieceKind::T]);

        assert!(!state.update(999));
        assert_eq!(state.active().unwrap().y, 0);
        assert!(state.update(1));
        assert_eq!(state.active().unwrap().y, 1);
        assert_eq!(state.drop_timer_ms(), 0);

        // A long frame still moves one row only.
        assert!(state.update(5000));
        assert_eq!(state.active().unwrap().y, 2);
        assert_eq!(state.drop_timer_ms(), 0);
    }

    #[test]
    fn test_lock_clears_line_and_emits_stats() {
        let board = Board::from_rows(&[
            "..........", "..........", "..........", "..........", "..........",
            "..........", "..........", "..........", "..........", "..........",
            "..........", "..........", "..........", "..........", "..........",
            "..........", "..........", "..........", "..........", "OOO....OOO",
        ])
        .unwrap();
        let mut state = Session::with_board(
            SessionConfig::default(),
            SequencePieces::new(vec![PieceKind::I, PieceKind::T]),
            board,
        )
        .unwrap();

        assert!(state.apply_action(GameAction::HardDrop));
        assert_eq!(state.lines(), 1);
        assert_eq!(state.score(), 100);
        assert!(state.board().cells().iter().all(|c| c.is_none()));

        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(
            events,
            vec![GameEvent::StatsChanged {
                score: 100,
                level: 1,
                lines: 1
            }]
        );
        assert_eq!(state.drain_events().count(), 0);
    }

    #[test]
    fn test_lock_without_clear_emits_nothing() {
        let mut state = session_with(&[PieceKind::O]);
        state.hard_drop();
        assert_eq!(state.drain_events().count(), 0);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_blocked_initial_spawn_restarts_immediately() {
        let mut rows = vec![".........."; 19];
        rows.insert(0, "....SS....");
        let board = Board::from_rows(&rows).unwrap();

        let mut state = Session::with_board(
            SessionConfig::default(),
            SequencePieces::new(vec![PieceKind::O, PieceKind::T, PieceKind::J, PieceKind::L]),
            board,
        )
        .unwrap();

        assert_eq!(state.games_played(), 1);
        assert!(state.board().cells().iter().all(|c| c.is_none()));
        assert_eq!(state.active().unwrap().kind, PieceKind::J);
        assert_eq!(state.next_piece(), PieceKind::L);
        assert_eq!(
            state.drain_events().collect::<Vec<_>>(),
            vec![GameEvent::GameOver {
                final_score: 0,
                final_lines: 0,
                final_level: 1
            }]
        );
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = session_with(&[PieceKind::L, PieceKind::S]);
        state.try_move(0, 1);
        let snap = state.snapshot();

        assert_eq!((snap.width, snap.height), (10, 20));
        assert_eq!(snap.block_size, 30);
        assert_eq!(snap.board.len(), 200);
        assert_eq!(snap.next, PieceKind::S);
        let active = snap.active.as_ref().unwrap();
        assert_eq!(active.kind, PieceKind::L);
        assert_eq!((active.x, active.y), (4, 1));
        assert_eq!(snap.drop_interval_ms, 1000);
    }
}
