use crate::*;
pub use random::*;

mod random;

pub trait MineLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}

/// A fixed layout generates itself, as long as it fits the requested board.
impl MineLayoutGenerator for MineLayout {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        if self.game_config() == config {
            Ok(self)
        } else {
            Err(GameError::InvalidConfiguration {
                size: config.size,
                mines: config.mines,
            })
        }
    }
}
