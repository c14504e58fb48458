use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Places mines by sampling uniform coordinates and rejecting occupied ones.
#[derive(Debug)]
pub struct RandomLayoutGenerator<'r, R> {
    rng: &'r mut R,
}

impl<'r, R: Rng> RandomLayoutGenerator<'r, R> {
    pub fn new(rng: &'r mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MineLayoutGenerator for RandomLayoutGenerator<'_, R> {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        // mines < cells, so the loop below terminates
        config.validate()?;

        let Self { rng } = self;
        let size = config.size;
        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());
        let mut mines_placed: CellCount = 0;
        let mut draws: u32 = 0;

        while mines_placed < config.mines {
            let coords: Coord2 = (
                rng.random_range(0..size),
                rng.random_range(0..size),
            );
            draws += 1;
            let tile = &mut mine_mask[coords.to_nd_index()];
            if !*tile {
                *tile = true;
                mines_placed += 1;
            }
        }

        log::trace!(
            "Placed {} mines on {}x{} board in {} draws",
            mines_placed,
            size,
            size,
            draws
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}

/// Deterministic generation from a seed, for reproducible boards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SeededLayoutGenerator {
    seed: u64,
}

impl SeededLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineLayoutGenerator for SeededLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        RandomLayoutGenerator::new(&mut rng).generate(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count_for_every_valid_count() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for mines in 0..25 {
            let config = GameConfig::new(5, mines).unwrap();
            let layout = RandomLayoutGenerator::new(&mut rng).generate(config).unwrap();
            assert_eq!(layout.mine_count(), mines);
            assert_eq!(layout.mine_coords().len(), usize::from(mines));
        }
    }

    #[test]
    fn rejects_full_board_without_sampling() {
        let mut rng = SmallRng::seed_from_u64(1);
        let config = GameConfig::new_unchecked(3, 9);
        assert_eq!(
            RandomLayoutGenerator::new(&mut rng).generate(config),
            Err(GameError::InvalidConfiguration { size: 3, mines: 9 })
        );
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let config = GameConfig::default();
        let a = SeededLayoutGenerator::new(42).generate(config).unwrap();
        let b = SeededLayoutGenerator::new(42).generate(config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fixed_layout_must_match_config() {
        let layout = MineLayout::from_mine_coords(3, &[(2, 2)]).unwrap();
        assert!(layout.clone().generate(GameConfig::new(3, 1).unwrap()).is_ok());
        assert!(layout.generate(GameConfig::new(3, 2).unwrap()).is_err());
    }
}
