/// Player-facing mark on a cell. A cell is never flagged and revealed at once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mark {
    Hidden,
    Flagged,
    Revealed,
}

impl Default for Mark {
    fn default() -> Self {
        Self::Hidden
    }
}

/// One square of the grid as stored by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    is_mine: bool,
    adjacent_mines: u8,
    mark: Mark,
}

impl Cell {
    pub(crate) const fn new(is_mine: bool, adjacent_mines: u8) -> Self {
        Self {
            is_mine,
            adjacent_mines,
            mark: Mark::Hidden,
        }
    }

    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    /// Mines in the clipped Moore neighbourhood. Not meaningful for mine cells.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn mark(self) -> Mark {
        self.mark
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.mark, Mark::Hidden)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.mark, Mark::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.mark, Mark::Revealed)
    }

    pub(crate) fn set_mark(&mut self, mark: Mark) {
        self.mark = mark;
    }

    pub const fn view(self) -> CellView {
        let content = match (self.mark, self.is_mine) {
            (Mark::Hidden, _) => CellContent::Hidden,
            (Mark::Flagged, _) => CellContent::Flagged,
            (Mark::Revealed, true) => CellContent::Mine,
            (Mark::Revealed, false) => CellContent::Number(self.adjacent_mines),
        };
        CellView {
            revealed: self.is_revealed(),
            flagged: self.is_flagged(),
            content,
        }
    }
}

/// What the presentation layer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellContent {
    Hidden,
    Flagged,
    Mine,
    Number(u8),
}

/// Read-only snapshot of a cell, safe to hand to a renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub revealed: bool,
    pub flagged: bool,
    pub content: CellContent,
}
