use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates {0:?} are outside the board")]
    OutOfBounds(Coord2),
    #[error("Cannot place {mines} mines on a {size}x{size} board")]
    InvalidConfiguration { size: Coord, mines: CellCount },
    #[error("Mine mask must be square and at most 255 cells wide")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
