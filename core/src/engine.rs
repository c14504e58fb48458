use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use rand::Rng;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Fresh,
    Playing,
    Exploded,
    Won,
}

impl GameState {
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Exploded | Self::Won)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Fresh
    }
}

/// One game of Minesweeper: the grid with its mines, the player's marks and the game state.
#[derive(Clone, Debug, PartialEq)]
pub struct Minefield {
    config: GameConfig,
    grid: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    flagged_mines: CellCount,
    state: GameState,
    detonated: Option<Coord2>,
}

impl Minefield {
    pub fn new(mine_layout: &MineLayout) -> Result<Self> {
        let config = mine_layout.game_config();
        config.validate()?;

        let size = mine_layout.size();
        let grid = Array2::from_shape_fn((size, size).to_nd_index(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            if mine_layout.contains_mine(coords) {
                Cell::new(true, 0)
            } else {
                Cell::new(false, mine_layout.adjacent_mine_count(coords))
            }
        });

        Ok(Self {
            config,
            grid,
            revealed_count: 0,
            flagged_count: 0,
            flagged_mines: 0,
            state: Default::default(),
            detonated: None,
        })
    }

    pub fn generate<R: Rng>(config: GameConfig, rng: &mut R) -> Result<Self> {
        let mine_layout = RandomLayoutGenerator::new(rng).generate(config)?;
        Self::new(&mine_layout)
    }

    pub fn reset<R: Rng>(&mut self, config: GameConfig, rng: &mut R) -> Result<()> {
        self.reset_with(config, RandomLayoutGenerator::new(rng))
    }

    /// Replaces the whole game; on error the current game is left untouched.
    pub fn reset_with<G: MineLayoutGenerator>(
        &mut self,
        config: GameConfig,
        generator: G,
    ) -> Result<()> {
        config.validate()?;
        let mine_layout = generator.generate(config)?;
        *self = Self::new(&mine_layout)?;
        log::debug!(
            "Reset {}x{} board with {} mines",
            config.size,
            config.size,
            config.mines
        );
        Ok(())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state, GameState::Won)
    }

    pub fn is_lost(&self) -> bool {
        matches!(self.state, GameState::Exploded)
    }

    pub fn detonated(&self) -> Option<Coord2> {
        self.detonated
    }

    /// Safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Mines minus placed flags; negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flagged_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.config.size;
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.grid[coords.to_nd_index()])
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        self.cell_at(coords).map(Cell::view)
    }

    pub fn iter_views(&self) -> impl Iterator<Item = (Coord2, CellView)> + '_ {
        self.grid
            .indexed_iter()
            .map(|((x, y), cell)| ((x as Coord, y as Coord), cell.view()))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = self.grid[coords.to_nd_index()];
        let (mark, outcome) = match cell.mark() {
            Mark::Revealed => return Ok(MarkOutcome::NoChange),
            Mark::Hidden => (Mark::Flagged, MarkOutcome::Flagged),
            Mark::Flagged => (Mark::Hidden, MarkOutcome::Unflagged),
        };
        self.grid[coords.to_nd_index()].set_mark(mark);

        if mark == Mark::Flagged {
            self.flagged_count += 1;
            if cell.is_mine() {
                self.flagged_mines += 1;
            }
        } else {
            self.flagged_count -= 1;
            if cell.is_mine() {
                self.flagged_mines -= 1;
            }
        }
        log::trace!("{:?} at {:?}", outcome, coords);

        if self.check_won() {
            self.mark_won();
            Ok(MarkOutcome::Won)
        } else {
            self.mark_started();
            Ok(outcome)
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self.grid[coords.to_nd_index()];
        if self.state.is_finished() || !cell.is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if cell.is_mine() {
            self.grid[coords.to_nd_index()].set_mark(Mark::Revealed);
            self.detonated = Some(coords);
            self.state = GameState::Exploded;
            log::debug!("Mine detonated at {:?}", coords);
            return Ok(RevealOutcome::Detonated(coords));
        }

        let opened = self.flood_reveal(coords);

        if self.check_won() {
            self.mark_won();
            Ok(RevealOutcome::Won)
        } else {
            self.mark_started();
            Ok(RevealOutcome::Revealed(opened))
        }
    }

    /// Breadth-first reveal from a safe cell, expanding only through zero cells.
    fn flood_reveal(&mut self, start: Coord2) -> Vec<Coord2> {
        let size = self.config.size;
        let mut opened = Vec::new();
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.grid[visit_coords.to_nd_index()];

            // skip flagged or already opened cells
            if !cell.is_hidden() {
                continue;
            }
            debug_assert!(!cell.is_mine(), "flood fill reached a mine");

            cell.set_mark(Mark::Revealed);
            let adjacent_mines = cell.adjacent_mines();
            self.revealed_count += 1;
            opened.push(visit_coords);
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                visit_coords,
                adjacent_mines
            );

            if adjacent_mines == 0 {
                let grid = &self.grid;
                to_visit.extend(
                    NeighborIter::new(visit_coords, size)
                        .filter(|&pos| grid[pos.to_nd_index()].is_hidden()),
                );
            }
        }

        opened
    }

    /// Every mine flagged and every safe cell revealed; neither alone is enough.
    fn check_won(&self) -> bool {
        self.flagged_mines == self.config.mines
            && self.revealed_count == self.config.safe_cells()
    }

    fn mark_started(&mut self) {
        if self.state.is_fresh() {
            self.state = GameState::Playing;
        }
    }

    fn mark_won(&mut self) {
        self.state = GameState::Won;
        log::debug!(
            "Board cleared with {} cells revealed and {} mines flagged",
            self.revealed_count,
            self.flagged_mines
        );
    }
}
