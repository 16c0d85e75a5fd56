use log::{debug, trace};
use rand::Rng;

use crate::cells::{Cartesian2DCoordinate, Cell, CellStore, Direction};
use crate::edges::EdgeStore;
use crate::grid_dimensions::RectGridDimensions;
use crate::maze_error::{MazeError, Result};

/// Which sides of a cell are walls, as handed to a `RedrawHook`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellWalls {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl CellWalls {
    pub fn of(edges: &EdgeStore, coord: Cartesian2DCoordinate) -> Result<CellWalls> {
        Ok(CellWalls {
            north: edges.get(coord, Direction::North)?.is_blocking(),
            east: edges.get(coord, Direction::East)?.is_blocking(),
            south: edges.get(coord, Direction::South)?.is_blocking(),
            west: edges.get(coord, Direction::West)?.is_blocking(),
        })
    }

    pub fn is_blocking(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
            Direction::None => true,
        }
    }
}

/// Side channel for drawing a maze while it is being generated.
///
/// `redraw_cell` is called after every cell committed to the maze, for the tree cell each new
/// path joins onto, and for the entrance and exit once they are marked.
pub trait RedrawHook {
    fn redraw_cell(&mut self, cell: &Cell, walls: CellWalls);

    fn maze_generated(&mut self) {}
}

/// Ignore all redraw notifications.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoRedraw;

impl RedrawHook for NoRedraw {
    fn redraw_cell(&mut self, _: &Cell, _: CellWalls) {}
}

impl<F> RedrawHook for F
    where F: FnMut(&Cell, CellWalls)
{
    fn redraw_cell(&mut self, cell: &Cell, walls: CellWalls) {
        self(cell, walls)
    }
}

/// Carve a perfect maze into freshly reset stores using a loop erased random walk.
///
/// A random seed cell starts the tree. Then, until every cell is in the tree, a walk starts
/// from a random unvisited cell and wanders until it hits the tree. Each step records the
/// direction taken in the cell it left, overwriting whatever an earlier pass through that cell
/// left there, so replaying the recorded directions from the start follows the walk with all
/// its loops erased. Only the replayed steps open walls, which keeps the passages a spanning
/// tree.
///
/// Unlike Wilson's algorithm the walk may not step straight back to the cell it just came from,
/// unless that is the only way out of a dead end. The mazes are therefore not drawn uniformly
/// from all spanning trees.
///
/// Finally the top left cell becomes the entrance and the last cell in row-major order the exit.
pub fn loop_erased_walk<R, H>(cells: &mut CellStore,
                              edges: &mut EdgeStore,
                              rng: &mut R,
                              hook: &mut H)
                              -> Result<()>
    where R: Rng + ?Sized,
          H: RedrawHook + ?Sized
{
    let dimensions = cells.active();
    if edges.active() != dimensions || dimensions.is_empty() {
        return Err(MazeError::invalid_dimensions(edges.active(), dimensions));
    }
    debug!("generating {}x{} maze", dimensions.columns().0, dimensions.rows().0);

    let seed = cells.pick_random_unvisited(rng)
        .ok_or_else(|| MazeError::invalid_dimensions(dimensions, cells.capacity()))?;
    cells.get_mut(seed)?.mark_visited();

    let mut paths = 0;
    while let Some(path_start) = cells.pick_random_unvisited(rng) {
        let walk_length = random_walk(cells, dimensions, path_start, rng)?;
        let committed = commit_path(cells, edges, path_start, hook)?;
        paths += 1;
        debug!("path from {} walked {} steps, committed {} cells",
               path_start,
               walk_length,
               committed);
    }

    let entrance = Cartesian2DCoordinate::new(0, 0);
    let exit = dimensions.last_coordinate()
        .ok_or_else(|| MazeError::invalid_dimensions(dimensions, cells.capacity()))?;
    cells.get_mut(entrance)?.mark_entrance();
    redraw(cells, edges, entrance, hook)?;
    cells.get_mut(exit)?.mark_exit();
    redraw(cells, edges, exit, hook)?;

    debug!("maze generated from seed {} with {} paths", seed, paths);
    hook.maze_generated();
    Ok(())
}

/// Wander from `path_start` until reaching a visited cell, recording the direction left by.
/// Returns the raw number of steps taken.
fn random_walk<R>(cells: &mut CellStore,
                  dimensions: RectGridDimensions,
                  path_start: Cartesian2DCoordinate,
                  rng: &mut R)
                  -> Result<usize>
    where R: Rng + ?Sized
{
    let mut current = path_start;
    let mut back_to_last_cell = Direction::None;
    let mut steps = 0;

    while !cells.get(current)?.is_visited() {
        let dir = walk_direction(dimensions, current, back_to_last_cell, rng);
        cells.get_mut(current)?.set_last_walked(dir);
        current = step(dimensions, current, dir)?;
        back_to_last_cell = dir.opposite();
        steps += 1;
    }

    Ok(steps)
}

/// Replay the recorded directions from `path_start` to the tree, opening each wall crossed.
/// Returns the number of cells added to the tree.
fn commit_path<H>(cells: &mut CellStore,
                  edges: &mut EdgeStore,
                  path_start: Cartesian2DCoordinate,
                  hook: &mut H)
                  -> Result<usize>
    where H: RedrawHook + ?Sized
{
    let dimensions = cells.active();
    let mut current = path_start;
    let mut committed = 0;

    loop {
        let cell = cells.get_mut(current)?;
        if cell.is_visited() {
            break;
        }
        cell.mark_visited();
        let dir = cell.last_walked();

        edges.get_mut(current, dir)?.open();
        redraw(cells, edges, current, hook)?;
        current = step(dimensions, current, dir)?;
        committed += 1;
    }
    redraw(cells, edges, current, hook)?;

    Ok(committed)
}

/// Rejection sample a direction that stays on the grid and does not lead straight back to
/// the previous cell. A cell with a single neighbour may be left the way the walk came in.
fn walk_direction<R>(dimensions: RectGridDimensions,
                     from: Cartesian2DCoordinate,
                     back_to_last_cell: Direction,
                     rng: &mut R)
                     -> Direction
    where R: Rng + ?Sized
{
    let is_dead_end = dimensions.in_bounds_directions_count(from) <= 1;
    loop {
        let dir = Direction::random(rng);
        let leaves_grid = dimensions.offset_coordinate(from, dir).is_none();
        let backtracks = dir == back_to_last_cell && !is_dead_end;
        if !leaves_grid && !backtracks {
            return dir;
        }
        trace!("rejected {:?} from {}", dir, from);
    }
}

#[inline]
fn step(dimensions: RectGridDimensions,
        from: Cartesian2DCoordinate,
        dir: Direction)
        -> Result<Cartesian2DCoordinate> {
    dimensions.offset_coordinate(from, dir)
        .ok_or(MazeError::OutOfBounds {
            coordinate: from,
            dimensions,
        })
}

fn redraw<H>(cells: &CellStore,
             edges: &EdgeStore,
             coord: Cartesian2DCoordinate,
             hook: &mut H)
             -> Result<()>
    where H: RedrawHook + ?Sized
{
    hook.redraw_cell(cells.get(coord)?, CellWalls::of(edges, coord)?);
    Ok(())
}
