//! Session configuration and its validation.

use thiserror::Error;

use crate::types::{BASE_DROP_MS, BLOCK_SIZE, BOARD_HEIGHT, BOARD_WIDTH, MIN_DROP_MS};

/// Smallest board edge; the I piece needs four cells either way.
pub const MIN_BOARD_DIM: u16 = 4;

/// Largest board edge.
pub const MAX_BOARD_DIM: u16 = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board {width}x{height} is smaller than {min}x{min}")]
    BoardTooSmall { width: u16, height: u16, min: u16 },
    #[error("board {width}x{height} is larger than {max}x{max}")]
    BoardTooLarge { width: u16, height: u16, max: u16 },
    #[error("block size must be non-zero")]
    ZeroBlockSize,
    #[error("initial interval {interval_ms}ms is below the {min_ms}ms floor")]
    IntervalTooShort { interval_ms: u32, min_ms: u32 },
    #[error("board is {actual_width}x{actual_height} but the session expects {width}x{height}")]
    BoardMismatch {
        width: u16,
        height: u16,
        actual_width: u16,
        actual_height: u16,
    },
}

/// Everything a session needs at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Board columns
    pub width: u16,
    /// Board rows
    pub height: u16,
    /// Edge of one cell in renderer units
    pub block_size: u16,
    /// Gravity interval at level 1, restored on every game over
    pub initial_drop_ms: u32,
    /// Seed for piece selection
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            block_size: BLOCK_SIZE,
            initial_drop_ms: BASE_DROP_MS,
            seed: 1,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_BOARD_DIM || self.height < MIN_BOARD_DIM {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_BOARD_DIM,
            });
        }
        if self.width > MAX_BOARD_DIM || self.height > MAX_BOARD_DIM {
            return Err(ConfigError::BoardTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_BOARD_DIM,
            });
        }
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.initial_drop_ms < MIN_DROP_MS {
            return Err(ConfigError::IntervalTooShort {
                interval_ms: self.initial_drop_ms,
                min_ms: MIN_DROP_MS,
            });
        }
        Ok(())
    }

    /// Renderer surface size in block units: (width * block, height * block).
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width as u32 * self.block_size as u32,
            self.height as u32 * self.block_size as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SessionConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.pixel_size(), (300, 600));
    }

    #[test]
    fn rejects_tiny_board() {
        let config = SessionConfig {
            width: 3,
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BoardTooSmall { width: 3, .. })
        ));
    }

    #[test]
    fn rejects_huge_board() {
        let config = SessionConfig {
            height: MAX_BOARD_DIM + 1,
            ..SessionConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::BoardTooLarge { .. })));
    }

    #[test]
    fn rejects_zero_block_and_fast_interval() {
        let zero_block = SessionConfig {
            block_size: 0,
            ..SessionConfig::default()
        };
        assert_eq!(zero_block.validate(), Err(ConfigError::ZeroBlockSize));

        let fast = SessionConfig {
            initial_drop_ms: 10,
            ..SessionConfig::default()
        };
        assert_eq!(
            fast.validate(),
            Err(ConfigError::IntervalTooShort {
                interval_ms: 10,
                min_ms: 50
            })
        );
    }

    #[test]
    fn error_messages_are_readable() {
        let err = ConfigError::BoardTooSmall {
            width: 2,
            height: 20,
            min: 4,
        };
        assert_eq!(err.to_string(), "board 2x20 is smaller than 4x4");
    }
}
