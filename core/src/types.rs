/// Single coordinate axis, used for the board side and for positions on it.
pub type Coord = u8;

/// Count type used for mine counts and cell counts.
pub type CellCount = u16;

/// Board position as `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a square board with side `size`.
pub const fn area(size: Coord) -> CellCount {
    let size = size as CellCount;
    size.saturating_mul(size)
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it stays on a board of side `size`.
fn apply_delta(coords: Coord2, delta: (i8, i8), size: Coord) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= size {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= size {
        return None;
    }

    Some((next_x, next_y))
}

/// Moore neighbourhood of a cell, clipped to the board.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(next_item) = apply_delta(self.center, delta, self.size) {
                return Some(next_item);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), 10).collect();
        assert_eq!(neighbors, [(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn far_corner_is_clipped() {
        let neighbors: Vec<_> = NeighborIter::new((9, 9), 10).collect();
        assert_eq!(neighbors, [(8, 8), (9, 8), (8, 9)]);
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((4, 5), 10).count(), 8);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), 1).count(), 0);
    }

    #[test]
    fn area_of_largest_board_fits() {
        assert_eq!(area(Coord::MAX), 65025);
    }
}
