//! Screen geometry: where the grid and the reset button sit, and which of them a click lands on.

use sapper_core::{Coord, Coord2};

/// Terminal columns used by one grid cell.
pub const CELL_WIDTH: u16 = 3;

pub const TITLE_ROW: u16 = 0;
pub const STATUS_ROW: u16 = 1;
pub const GRID_LEFT: u16 = 2;
pub const GRID_TOP: u16 = 2;

pub const RESET_LABEL: &str = "[ Reset ]";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        (self.left..self.left + self.width).contains(&column)
            && (self.top..self.top + self.height).contains(&row)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Cell(Coord2),
    Reset,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    size: Coord,
}

impl Layout {
    pub fn new(size: Coord) -> Self {
        Self { size }
    }

    pub fn grid(&self) -> Rect {
        Rect {
            left: GRID_LEFT,
            top: GRID_TOP,
            width: u16::from(self.size) * CELL_WIDTH,
            height: u16::from(self.size),
        }
    }

    /// Top-left terminal position of a cell.
    pub fn cell_origin(&self, (x, y): Coord2) -> (u16, u16) {
        (
            GRID_LEFT + u16::from(x) * CELL_WIDTH,
            GRID_TOP + u16::from(y),
        )
    }

    pub fn banner_row(&self) -> u16 {
        GRID_TOP + u16::from(self.size) + 1
    }

    /// Centered under the grid, like the button of the original window.
    pub fn reset_button(&self) -> Rect {
        let width = RESET_LABEL.len() as u16;
        let grid = self.grid();
        Rect {
            left: grid.left + grid.width.saturating_sub(width) / 2,
            top: self.banner_row() + 1,
            width,
            height: 1,
        }
    }

    pub fn message_row(&self) -> u16 {
        self.reset_button().top + 2
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<Target> {
        if self.reset_button().contains(column, row) {
            return Some(Target::Reset);
        }

        let grid = self.grid();
        if !grid.contains(column, row) {
            return None;
        }
        let x = (column - grid.left) / CELL_WIDTH;
        let y = row - grid.top;
        // both are below `size`, which is a Coord
        Some(Target::Cell((x as Coord, y as Coord)))
    }
}
