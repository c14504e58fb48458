//! Explosion feedback, played after a mine goes off: the cell flashes, then the board shakes.
//!
//! The effect is a pure function of the time since detonation, so the event loop only has to
//! redraw often enough while it runs.

use std::time::{Duration, Instant};

use sapper_core::Coord2;

pub const FLASH_PHASE: Duration = Duration::from_millis(100);
pub const FLASHES: u32 = 3;
pub const SHAKE_STEP: Duration = Duration::from_millis(40);
pub const SHAKES: u32 = 6;
/// Columns the board moves per shake step.
pub const SHAKE_OFFSET: i16 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    /// `lit` draws the cell bright, otherwise it is blanked.
    Flash { lit: bool },
    Shake { offset: i16 },
}

pub fn frame_after(elapsed: Duration) -> Option<Frame> {
    let flash_total = FLASH_PHASE * (2 * FLASHES);
    if elapsed < flash_total {
        let phase = elapsed.as_millis() / FLASH_PHASE.as_millis();
        return Some(Frame::Flash {
            lit: phase % 2 == 0,
        });
    }

    let step = (elapsed - flash_total).as_millis() / SHAKE_STEP.as_millis();
    if step < u128::from(SHAKES) {
        let offset = if step % 2 == 0 {
            SHAKE_OFFSET
        } else {
            -SHAKE_OFFSET
        };
        return Some(Frame::Shake { offset });
    }

    None
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Explosion {
    cell: Coord2,
    started: Instant,
}

impl Explosion {
    pub fn new(cell: Coord2, started: Instant) -> Self {
        Self { cell, started }
    }

    pub fn cell(&self) -> Coord2 {
        self.cell
    }

    pub fn frame_at(&self, now: Instant) -> Option<Frame> {
        frame_after(now.saturating_duration_since(self.started))
    }
}
