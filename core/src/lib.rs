#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Side length of the stock board.
pub const DEFAULT_SIZE: Coord = 10;

/// Mines placed on the stock board.
pub const DEFAULT_MINES: CellCount = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// At least one cell has to stay safe, which also rules out empty boards.
    pub fn validate(&self) -> Result<()> {
        if self.mines < self.total_cells() {
            Ok(())
        } else {
            Err(GameError::InvalidConfiguration {
                size: self.size,
                mines: self.mines,
            })
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE, DEFAULT_MINES)
    }
}

/// Where the mines are on a square board.
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    size: Coord,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows != cols {
            return Err(GameError::InvalidBoardShape);
        }
        let size: Coord = rows.try_into().map_err(|_| GameError::InvalidBoardShape)?;
        // bounded by area(Coord::MAX), which fits
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Ok(Self {
            mine_mask,
            size,
            mine_count,
        })
    }

    /// Builds a layout from explicit positions; repeated positions count once.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::OutOfBounds(coords));
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size, self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size && coords.1 < self.size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most eight neighbours
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
            .collect()
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
    Won,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// Newly revealed cells, in the order the flood fill opened them.
    Revealed(Vec<Coord2>),
    Detonated(Coord2),
    Won,
}

impl RevealOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
