use rand::Rng;
use std::convert::From;
use std::fmt;

use crate::grid_dimensions::RectGridDimensions;
use crate::grid_iterators::RectGridCellIter;
use crate::maze_error::{MazeError, Result};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Default)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four compass directions a walk can take plus `None`, the "not walked yet" marker.
///
/// The ordinals of `North..=West` are the exact range random directions are drawn from, see
/// `Direction::LAST_VALID`.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
    None,
}

impl Direction {
    /// The highest ordinal that is a real direction.
    pub const LAST_VALID: Direction = Direction::West;

    pub const COMPASS: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    #[inline]
    pub fn ordinal(self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
            Direction::None => 4,
        }
    }

    /// Any ordinal past `LAST_VALID` maps to `Direction::None`.
    #[inline]
    pub fn from_ordinal(ordinal: u8) -> Direction {
        match ordinal {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            3 => Direction::West,
            _ => Direction::None,
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::None => Direction::None,
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Direction::None
    }

    /// Draw one of the four compass directions uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        Direction::from_ordinal(rng.gen_range(0..=Direction::LAST_VALID.ordinal()))
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::None
    }
}

/// A place in the maze that could be walked on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    position: Cartesian2DCoordinate,
    visited: bool,
    // The direction the generator last left this cell by, `None` until walked.
    last_walked: Direction,
    is_entrance: bool,
    is_exit: bool,
}

impl Cell {
    fn new(position: Cartesian2DCoordinate) -> Cell {
        Cell {
            position,
            visited: false,
            last_walked: Direction::None,
            is_entrance: false,
            is_exit: false,
        }
    }

    #[inline]
    pub fn position(&self) -> Cartesian2DCoordinate {
        self.position
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn last_walked(&self) -> Direction {
        self.last_walked
    }

    #[inline]
    pub fn is_entrance(&self) -> bool {
        self.is_entrance
    }

    #[inline]
    pub fn is_exit(&self) -> bool {
        self.is_exit
    }

    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }

    pub(crate) fn set_last_walked(&mut self, dir: Direction) {
        self.last_walked = dir;
    }

    pub(crate) fn mark_entrance(&mut self) {
        self.is_entrance = true;
    }

    pub(crate) fn mark_exit(&mut self) {
        self.is_exit = true;
    }

    fn clear(&mut self) {
        self.visited = false;
        self.last_walked = Direction::None;
        self.is_entrance = false;
        self.is_exit = false;
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Cell{}", self.position)
    }
}

/// Fixed capacity storage for every cell of the largest grid the maze will ever be.
///
/// Slots are laid out row-major with the capacity's row length as the stride, so the active
/// window is a true sub-rectangle of the arena and no cell ever changes position. Only the
/// active window is reset or queried.
#[derive(Debug, Clone)]
pub struct CellStore {
    cells: Vec<Cell>,
    capacity: RectGridDimensions,
    active: RectGridDimensions,
}

impl CellStore {
    pub fn new(capacity: RectGridDimensions) -> CellStore {
        let cells = capacity.iter().map(Cell::new).collect::<Vec<_>>();
        CellStore {
            cells,
            capacity,
            active: capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> RectGridDimensions {
        self.capacity
    }

    #[inline]
    pub fn active(&self) -> RectGridDimensions {
        self.active
    }

    /// Clear every cell of the new active window ready for a fresh generation.
    pub fn reset(&mut self, active: RectGridDimensions) -> Result<()> {
        if active.is_empty() || !active.fits_within(&self.capacity) {
            return Err(MazeError::invalid_dimensions(active, self.capacity));
        }

        self.active = active;
        for coord in active.iter() {
            let index = self.slot_index(coord);
            self.cells[index].clear();
        }
        Ok(())
    }

    pub fn get(&self, coord: Cartesian2DCoordinate) -> Result<&Cell> {
        self.check_active(coord)?;
        Ok(&self.cells[self.slot_index(coord)])
    }

    pub fn get_mut(&mut self, coord: Cartesian2DCoordinate) -> Result<&mut Cell> {
        self.check_active(coord)?;
        let index = self.slot_index(coord);
        Ok(&mut self.cells[index])
    }

    #[inline]
    pub fn iter(&self) -> RectGridCellIter {
        self.active.iter()
    }

    pub fn count_unvisited(&self) -> usize {
        self.unvisited().count()
    }

    /// The `n`th unvisited active cell in row-major order.
    pub fn nth_unvisited(&self, n: usize) -> Option<Cartesian2DCoordinate> {
        self.unvisited().nth(n)
    }

    /// Uniformly choose one of the unvisited active cells, `None` once every cell is visited.
    ///
    /// Draws exactly one random number when there is anything to choose from.
    pub fn pick_random_unvisited<R: Rng + ?Sized>(&self,
                                                  rng: &mut R)
                                                  -> Option<Cartesian2DCoordinate> {
        let count = self.count_unvisited();
        if count == 0 {
            None
        } else {
            self.nth_unvisited(rng.gen_range(0..count))
        }
    }

    fn unvisited<'a>(&'a self) -> impl Iterator<Item = Cartesian2DCoordinate> + 'a {
        self.active
            .iter()
            .filter(move |coord| !self.cells[self.slot_index(*coord)].visited)
    }

    fn check_active(&self, coord: Cartesian2DCoordinate) -> Result<()> {
        if self.active.is_valid_coordinate(coord) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                coordinate: coord,
                dimensions: self.active,
            })
        }
    }

    #[inline]
    fn slot_index(&self, coord: Cartesian2DCoordinate) -> usize {
        coord.y as usize * self.capacity.columns().0 + coord.x as usize
    }
}

#[cfg(test)]
mod tests {

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::units::{ColumnsCount, RowsCount};

    fn dims(columns: usize, rows: usize) -> RectGridDimensions {
        RectGridDimensions::new(ColumnsCount(columns), RowsCount(rows))
    }

    #[test]
    fn direction_ordinals() {
        for (ordinal, dir) in Direction::COMPASS.iter().enumerate() {
            assert_eq!(dir.ordinal() as usize, ordinal);
            assert_eq!(Direction::from_ordinal(ordinal as u8), *dir);
        }
        assert_eq!(Direction::LAST_VALID.ordinal(), 3);
        assert_eq!(Direction::from_ordinal(4), Direction::None);
        assert_eq!(Direction::from_ordinal(200), Direction::None);
    }

    #[test]
    fn direction_opposites() {
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::South.opposite(), Direction::North);
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::West.opposite(), Direction::East);
        assert_eq!(Direction::None.opposite(), Direction::None);
        for dir in &Direction::COMPASS {
            assert_eq!(dir.opposite().opposite(), *dir);
        }
    }

    #[test]
    fn random_direction_is_never_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..1000 {
            let dir = Direction::random(&mut rng);
            assert!(!dir.is_none());
            seen[dir.ordinal() as usize] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn positions_assigned_row_major() {
        let store = CellStore::new(dims(3, 2));
        let positions = store.iter()
            .map(|coord| store.get(coord).unwrap().position())
            .collect::<Vec<_>>();
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(positions,
                   vec![gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1)]);
    }

    #[test]
    fn fresh_cells_are_blank() {
        let store = CellStore::new(dims(4, 4));
        for coord in store.iter() {
            let cell = store.get(coord).unwrap();
            assert!(!cell.is_visited());
            assert!(!cell.is_entrance());
            assert!(!cell.is_exit());
            assert_eq!(cell.last_walked(), Direction::None);
        }
        assert_eq!(store.count_unvisited(), 16);
    }

    #[test]
    fn smaller_active_window_keeps_positions() {
        let mut store = CellStore::new(dims(5, 5));
        store.reset(dims(2, 3)).unwrap();
        let coord = Cartesian2DCoordinate::new(1, 2);
        assert_eq!(store.get(coord).unwrap().position(), coord);
        assert_eq!(store.count_unvisited(), 6);
    }

    #[test]
    fn access_outside_active_window_fails() {
        let mut store = CellStore::new(dims(5, 5));
        store.reset(dims(2, 2)).unwrap();
        let outside = Cartesian2DCoordinate::new(2, 0);
        assert_eq!(store.get(outside),
                   Err(MazeError::OutOfBounds {
                       coordinate: outside,
                       dimensions: dims(2, 2),
                   }));
        assert!(store.get_mut(Cartesian2DCoordinate::new(0, 2)).is_err());
        assert!(store.get(Cartesian2DCoordinate::new(u32::MAX, u32::MAX)).is_err());
    }

    #[test]
    fn reset_rejects_oversized_and_empty_windows() {
        let mut store = CellStore::new(dims(3, 3));
        assert!(store.reset(dims(4, 1)).is_err());
        assert!(store.reset(dims(1, 4)).is_err());
        assert!(store.reset(dims(0, 2)).is_err());
        assert_eq!(store.active(), dims(3, 3));
    }

    #[test]
    fn reset_clears_active_cells() {
        let mut store = CellStore::new(dims(3, 3));
        let coord = Cartesian2DCoordinate::new(2, 2);
        {
            let cell = store.get_mut(coord).unwrap();
            cell.mark_visited();
            cell.mark_exit();
            cell.set_last_walked(Direction::West);
        }
        assert_eq!(store.count_unvisited(), 8);

        store.reset(dims(3, 3)).unwrap();
        let cell = store.get(coord).unwrap();
        assert!(!cell.is_visited());
        assert!(!cell.is_exit());
        assert_eq!(cell.last_walked(), Direction::None);
    }

    #[test]
    fn nth_unvisited_skips_visited_cells() {
        let mut store = CellStore::new(dims(2, 2));
        store.get_mut(Cartesian2DCoordinate::new(0, 0)).unwrap().mark_visited();
        store.get_mut(Cartesian2DCoordinate::new(0, 1)).unwrap().mark_visited();
        assert_eq!(store.nth_unvisited(0), Some(Cartesian2DCoordinate::new(1, 0)));
        assert_eq!(store.nth_unvisited(1), Some(Cartesian2DCoordinate::new(1, 1)));
        assert_eq!(store.nth_unvisited(2), None);
    }

    #[test]
    fn random_unvisited_is_none_when_all_visited() {
        let mut store = CellStore::new(dims(2, 1));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..2 {
            let coord = store.pick_random_unvisited(&mut rng).unwrap();
            store.get_mut(coord).unwrap().mark_visited();
        }
        assert_eq!(store.pick_random_unvisited(&mut rng), None);
    }
}
