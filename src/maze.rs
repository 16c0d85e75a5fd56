use rand::Rng;
use smallvec::SmallVec;
use std::fmt;
use std::mem;

use crate::cells::{Cartesian2DCoordinate, Cell, CellStore, Direction};
use crate::edges::{Edge, EdgeStore};
use crate::generators::{self, NoRedraw, RedrawHook};
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_iterators::RectGridCellIter;
use crate::maze_error::{MazeError, Result};
use crate::units::{ColumnsCount, RowsCount};

pub const DEFAULT_MAX_COLUMNS: ColumnsCount = ColumnsCount(15);
pub const DEFAULT_MAX_ROWS: RowsCount = RowsCount(15);

pub type DirectionSmallVec = SmallVec<[Direction; 4]>;
pub type CoordinatePair = (Cartesian2DCoordinate, Cartesian2DCoordinate);

/// A maze over a grid allocated once for its largest size.
///
/// Each call to `generate` picks the active size, anything up to the capacity, and carves a
/// new perfect maze into it without reallocating.
#[derive(Clone)]
pub struct Maze {
    cells: CellStore,
    edges: EdgeStore,
    capacity: RectGridDimensions,
    dimensions: RectGridDimensions,
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Maze :: columns: {:?}, rows: {:?}, capacity: {:?}, passages: {:?}",
               self.dimensions.columns(),
               self.dimensions.rows(),
               self.capacity,
               self.passages_count())
    }
}

impl Default for Maze {
    fn default() -> Self {
        let capacity = RectGridDimensions::new(DEFAULT_MAX_COLUMNS, DEFAULT_MAX_ROWS);
        Maze::with_capacity(capacity)
    }
}

impl Maze {
    /// Allocate storage for mazes up to `max_columns` by `max_rows`.
    ///
    /// Until the first `generate` the whole capacity is active, every cell unvisited and
    /// every edge a wall.
    pub fn new(max_columns: ColumnsCount, max_rows: RowsCount) -> Result<Maze> {
        let capacity = RectGridDimensions::new(max_columns, max_rows);
        let fits_coordinates = max_columns.0 <= u32::MAX as usize &&
                               max_rows.0 <= u32::MAX as usize;
        if capacity.is_empty() || !fits_coordinates || !fits_memory(capacity) {
            return Err(MazeError::invalid_dimensions(capacity, capacity));
        }
        Ok(Maze::with_capacity(capacity))
    }

    fn with_capacity(capacity: RectGridDimensions) -> Maze {
        Maze {
            cells: CellStore::new(capacity),
            edges: EdgeStore::new(capacity),
            capacity,
            dimensions: capacity,
        }
    }

    /// Carve a new maze of `columns` by `rows`, replacing whatever was there.
    pub fn generate<R>(&mut self,
                       columns: ColumnsCount,
                       rows: RowsCount,
                       rng: &mut R)
                       -> Result<()>
        where R: Rng + ?Sized
    {
        self.generate_with_hook(columns, rows, rng, &mut NoRedraw)
    }

    /// As `generate`, notifying `hook` as cells are added so the maze can be drawn progressively.
    pub fn generate_with_hook<R, H>(&mut self,
                                    columns: ColumnsCount,
                                    rows: RowsCount,
                                    rng: &mut R,
                                    hook: &mut H)
                                    -> Result<()>
        where R: Rng + ?Sized,
              H: RedrawHook + ?Sized
    {
        let requested = RectGridDimensions::new(columns, rows);
        if requested.is_empty() || !requested.fits_within(&self.capacity) {
            return Err(MazeError::invalid_dimensions(requested, self.capacity));
        }

        self.cells.reset(requested)?;
        self.edges.reset(requested)?;
        self.dimensions = requested;
        generators::loop_erased_walk(&mut self.cells, &mut self.edges, rng, hook)
    }

    #[inline]
    pub fn dimensions(&self) -> RectGridDimensions {
        self.dimensions
    }

    #[inline]
    pub fn capacity(&self) -> RectGridDimensions {
        self.capacity
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    /// Coordinates of the active grid in row-major order.
    #[inline]
    pub fn iter(&self) -> RectGridCellIter {
        self.dimensions.iter()
    }

    /// The top left cell, where generation marks the entrance.
    ///
    /// Before the first `generate` no cell carries the entrance flag yet; check
    /// `Cell::is_entrance` when that matters.
    #[inline]
    pub fn entrance(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(0, 0)
    }

    /// The last active cell in row-major order, where generation marks the exit.
    ///
    /// Before the first `generate` this is the bottom right cell of the capacity, but no cell
    /// carries the exit flag yet; check `Cell::is_exit` to decide whether a player has won.
    #[inline]
    pub fn exit(&self) -> Cartesian2DCoordinate {
        self.dimensions.last_coordinate().unwrap_or_default()
    }

    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Result<&Cell> {
        self.cells.get(coord)
    }

    pub fn edge(&self, coord: Cartesian2DCoordinate, dir: Direction) -> Result<&Edge> {
        self.edges.get(coord, dir)
    }

    /// Can a player standing on `coord` step in `dir`?
    ///
    /// Stepping off the grid, through a wall, or in `Direction::None` is not a legal move. Only
    /// a source coordinate outside the active grid is an error.
    pub fn check_move(&self, coord: Cartesian2DCoordinate, dir: Direction) -> Result<bool> {
        if !self.dimensions.is_valid_coordinate(coord) {
            return Err(MazeError::OutOfBounds {
                coordinate: coord,
                dimensions: self.dimensions,
            });
        }
        if self.dimensions.offset_coordinate(coord, dir).is_none() {
            return Ok(false);
        }
        Ok(!self.edges.get(coord, dir)?.is_blocking())
    }

    /// The directions a player on `coord` may legally move in.
    pub fn open_directions(&self, coord: Cartesian2DCoordinate) -> Result<DirectionSmallVec> {
        let mut dirs = DirectionSmallVec::new();
        for &dir in &Direction::COMPASS {
            if self.check_move(coord, dir)? {
                dirs.push(dir);
            }
        }
        Ok(dirs)
    }

    /// The cell reached by a legal move, `None` if the move is blocked.
    pub fn neighbour_through_passage(&self,
                                     coord: Cartesian2DCoordinate,
                                     dir: Direction)
                                     -> Result<Option<Cartesian2DCoordinate>> {
        if self.check_move(coord, dir)? {
            Ok(self.dimensions.offset_coordinate(coord, dir))
        } else {
            Ok(None)
        }
    }

    /// Every open wall in the active grid as a pair of adjacent coordinates, each pair once.
    pub fn open_passages<'a>(&'a self) -> impl Iterator<Item = CoordinatePair> + 'a {
        self.iter().flat_map(move |coord| {
            [Direction::East, Direction::South]
                .iter()
                .filter_map(move |&dir| match self.neighbour_through_passage(coord, dir) {
                    Ok(Some(neighbour)) => Some((coord, neighbour)),
                    _ => None,
                })
                .collect::<SmallVec<[CoordinatePair; 2]>>()
        })
    }

    pub fn passages_count(&self) -> usize {
        self.edges.open_count()
    }
}

/// Can the cell and edge arenas for `capacity` be sized and allocated without overflowing?
fn fits_memory(capacity: RectGridDimensions) -> bool {
    let within_allocation_limit = |count: usize, item_bytes: usize| {
        count.checked_mul(item_bytes).map_or(false, |bytes| bytes <= isize::MAX as usize)
    };
    match (capacity.checked_size(), capacity.checked_edges_count()) {
        (Some(cells), Some(edges)) => {
            within_allocation_limit(cells.0, mem::size_of::<Cell>()) &&
            within_allocation_limit(edges.0, mem::size_of::<Edge>())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn small_maze(columns: usize, rows: usize, seed: u64) -> Maze {
        let mut maze = Maze::new(ColumnsCount(10), RowsCount(10)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        maze.generate(ColumnsCount(columns), RowsCount(rows), &mut rng).unwrap();
        maze
    }

    #[test]
    fn default_capacity() {
        let maze = Maze::default();
        assert_eq!(maze.capacity(),
                   RectGridDimensions::new(DEFAULT_MAX_COLUMNS, DEFAULT_MAX_ROWS));
        assert_eq!(maze.dimensions(), maze.capacity());
        assert_eq!(maze.passages_count(), 0);
    }

    #[test]
    fn zero_capacity_rejected() {
        assert!(Maze::new(ColumnsCount(0), RowsCount(4)).is_err());
        assert!(Maze::new(ColumnsCount(4), RowsCount(0)).is_err());
        assert!(Maze::new(ColumnsCount(usize::MAX), RowsCount(2)).is_err());
        let widest = ColumnsCount(u32::MAX as usize);
        assert!(Maze::new(widest, RowsCount(1 << 31)).is_err());
        assert!(Maze::new(widest, RowsCount(u32::MAX as usize)).is_err());
    }

    #[test]
    fn oversized_capacity_reports_invalid_dimensions() {
        let columns = ColumnsCount(usize::MAX);
        let rows = RowsCount(2);
        let expected = MazeError::InvalidDimensions {
            columns,
            rows,
            max_columns: columns,
            max_rows: rows,
        };
        assert_eq!(Maze::new(columns, rows).err(), Some(expected));
    }

    #[test]
    fn exit_flag_only_set_by_generation() {
        let mut maze = Maze::new(ColumnsCount(4), RowsCount(3)).unwrap();
        assert_eq!(maze.exit(), Cartesian2DCoordinate::new(3, 2));
        assert!(maze.iter().all(|c| !maze.cell(c).unwrap().is_exit()));
        assert!(maze.iter().all(|c| !maze.cell(c).unwrap().is_entrance()));

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        maze.generate(ColumnsCount(4), RowsCount(3), &mut rng).unwrap();
        assert!(maze.cell(maze.exit()).unwrap().is_exit());
        assert!(maze.cell(maze.entrance()).unwrap().is_entrance());
    }

    #[test]
    fn generate_validates_dimensions() {
        let mut maze = Maze::new(ColumnsCount(5), RowsCount(5)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let expected = MazeError::InvalidDimensions {
            columns: ColumnsCount(6),
            rows: RowsCount(2),
            max_columns: ColumnsCount(5),
            max_rows: RowsCount(5),
        };
        assert_eq!(maze.generate(ColumnsCount(6), RowsCount(2), &mut rng), Err(expected));
        assert!(maze.generate(ColumnsCount(0), RowsCount(2), &mut rng).is_err());
        assert!(maze.generate(ColumnsCount(2), RowsCount(0), &mut rng).is_err());
        assert!(maze.generate(ColumnsCount(5), RowsCount(6), &mut rng).is_err());
        assert!(maze.generate(ColumnsCount(5), RowsCount(5), &mut rng).is_ok());
    }

    #[test]
    fn two_by_one_scenario() {
        let maze = small_maze(2, 1, 17);
        let left = Cartesian2DCoordinate::new(0, 0);
        let right = Cartesian2DCoordinate::new(1, 0);
        assert_eq!(maze.passages_count(), 1);
        assert!(!maze.edge(left, Direction::East).unwrap().is_blocking());
        assert_eq!(maze.open_passages().collect::<Vec<_>>(), vec![(left, right)]);
        assert!(maze.cell(left).unwrap().is_visited());
        assert!(maze.cell(right).unwrap().is_visited());
        assert!(maze.cell(left).unwrap().is_entrance());
        assert!(maze.cell(right).unwrap().is_exit());
        assert_eq!(maze.exit(), right);
    }

    #[test]
    fn one_by_one_scenario() {
        let maze = small_maze(1, 1, 4);
        let only = maze.cell(Cartesian2DCoordinate::new(0, 0)).unwrap();
        assert!(only.is_entrance() && only.is_exit() && only.is_visited());
        assert_eq!(maze.passages_count(), 0);
        assert_eq!(maze.entrance(), maze.exit());
        assert!(maze.open_directions(Cartesian2DCoordinate::new(0, 0)).unwrap().is_empty());
    }

    #[test]
    fn check_move_blocks_leaving_the_grid() {
        let maze = small_maze(6, 4, 21);
        let d = maze.dimensions();
        for coord in maze.iter() {
            if coord.y == 0 {
                assert!(!maze.check_move(coord, Direction::North).unwrap());
            }
            if coord.x == 0 {
                assert!(!maze.check_move(coord, Direction::West).unwrap());
            }
            if coord.y as usize == d.rows().0 - 1 {
                assert!(!maze.check_move(coord, Direction::South).unwrap());
            }
            if coord.x as usize == d.columns().0 - 1 {
                assert!(!maze.check_move(coord, Direction::East).unwrap());
            }
            assert!(!maze.check_move(coord, Direction::None).unwrap());
        }
    }

    #[test]
    fn check_move_follows_walls() {
        let maze = small_maze(5, 5, 2);
        for coord in maze.iter() {
            for &dir in &Direction::COMPASS {
                let allowed = maze.check_move(coord, dir).unwrap();
                let inside = maze.dimensions().offset_coordinate(coord, dir).is_some();
                let open = !maze.edge(coord, dir).unwrap().is_blocking();
                assert_eq!(allowed, inside && open);
            }
        }
    }

    #[test]
    fn check_move_is_symmetric() {
        let maze = small_maze(7, 3, 13);
        for coord in maze.iter() {
            for &dir in &Direction::COMPASS {
                if let Some(neighbour) = maze.neighbour_through_passage(coord, dir).unwrap() {
                    assert!(maze.check_move(neighbour, dir.opposite()).unwrap());
                }
            }
        }
    }

    #[test]
    fn check_move_outside_active_grid_fails() {
        let maze = small_maze(3, 3, 1);
        let outside = Cartesian2DCoordinate::new(3, 1);
        assert_eq!(maze.check_move(outside, Direction::West),
                   Err(MazeError::OutOfBounds {
                       coordinate: outside,
                       dimensions: maze.dimensions(),
                   }));
        assert!(maze.cell(outside).is_err());
        assert!(maze.edge(outside, Direction::West).is_err());
        assert_eq!(maze.edge(Cartesian2DCoordinate::new(0, 0), Direction::None),
                   Err(MazeError::InvalidDirection));
    }

    #[test]
    fn open_directions_sorted_by_compass() {
        let maze = small_maze(4, 4, 6);
        for coord in maze.iter() {
            let dirs = maze.open_directions(coord).unwrap();
            assert!(!dirs.is_empty());
            let ordinals = dirs.iter().map(|dir| dir.ordinal()).collect::<Vec<_>>();
            assert_eq!(ordinals.clone(), ordinals.into_iter().sorted().collect::<Vec<_>>());
        }
    }

    #[test]
    fn regenerate_smaller_then_larger() {
        let mut maze = Maze::new(ColumnsCount(8), RowsCount(8)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        maze.generate(ColumnsCount(8), RowsCount(8), &mut rng).unwrap();
        maze.generate(ColumnsCount(3), RowsCount(2), &mut rng).unwrap();
        assert_eq!(maze.passages_count(), 5);
        assert_eq!(maze.exit(), Cartesian2DCoordinate::new(2, 1));
        assert!(maze.cell(Cartesian2DCoordinate::new(3, 0)).is_err());

        maze.generate(ColumnsCount(8), RowsCount(8), &mut rng).unwrap();
        assert_eq!(maze.passages_count(), 63);
        let exits = maze.iter().filter(|c| maze.cell(*c).unwrap().is_exit()).count();
        assert_eq!(exits, 1);
    }

    #[test]
    fn generate_is_reproducible() {
        let mut maze = Maze::new(ColumnsCount(9), RowsCount(9)).unwrap();
        maze.generate(ColumnsCount(9), RowsCount(7), &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        let first = maze.open_passages().collect::<Vec<_>>();
        maze.generate(ColumnsCount(9), RowsCount(7), &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        let second = maze.open_passages().collect::<Vec<_>>();
        assert_eq!(first, second);
    }
}
