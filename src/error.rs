//! Error types for world construction and host configuration

use thiserror::Error;

use crate::consts::MIN_WORLD_WIDTH;
use crate::sim::{Direction, GameStatus};

/// Reasons a world cannot be built or restored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("world width {width} is below the minimum of {min}", min = MIN_WORLD_WIDTH)]
    WidthTooSmall { width: usize },
    #[error("world width {width} does not fit in memory")]
    WidthTooLarge { width: usize },
    #[error("spawn index {index} is outside a grid of {size} cells")]
    SpawnOutOfRange { index: usize, size: usize },
    #[error("snake has no segments")]
    EmptySnake,
    #[error("snake cell {index} is outside a grid of {size} cells")]
    CellOutOfRange { index: usize, size: usize },
    #[error("snake cell {index} is occupied twice")]
    OverlappingSnake { index: usize },
    #[error("snake cells {from} and {to} are not adjacent")]
    DetachedSegment { from: usize, to: usize },
    #[error("reward cell {index} is outside the grid or under the snake")]
    InvalidReward { index: usize },
    #[error("reward cell is missing while free cells remain")]
    MissingReward,
    #[error("snake heading {direction:?} does not lead away from its neck")]
    HeadingMismatch { direction: Direction },
    #[error("status is Won but free cells remain")]
    WonWithFreeCells,
    #[error("snake fills the grid but status is {status}")]
    FullBoardNotWon { status: GameStatus },
}

/// Failures while loading or validating [`crate::Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(#[from] WorldError),
}
