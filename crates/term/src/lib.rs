//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer. It avoids widget toolkits and
//! instead renders into a framebuffer that is diffed and flushed to the
//! terminal by [`TerminalRenderer`].
//!
//! Board cells are drawn 2 characters wide per row by default to compensate
//! for the glyph aspect ratio; see [`GameView::from_block_size`].

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{AnchorY, GameOverBanner, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
