use crate::cells::{Cartesian2DCoordinate, Direction};
use crate::grid_dimensions::RectGridDimensions;
use crate::maze_error::{MazeError, Result};

/// The wall between two cells, or between a border cell and the outside.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Edge {
    is_blocking: bool,
}

impl Edge {
    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.is_blocking
    }

    pub(crate) fn open(&mut self) {
        self.is_blocking = false;
    }
}

impl Default for Edge {
    fn default() -> Self {
        Edge { is_blocking: true }
    }
}

/// Flat index of the edge on the `dir` side of the cell at `coord`.
///
/// All north/south edges come first, `rows + 1` edge rows of `columns` edges each, followed by
/// the east/west edges, `rows` rows of `columns + 1` edges each. Two cells sharing a wall get
/// the same index: the east edge of `(x, y)` is the west edge of `(x + 1, y)` and the south
/// edge of `(x, y)` is the north edge of `(x, y + 1)`.
pub fn edge_index(dimensions: RectGridDimensions,
                  coord: Cartesian2DCoordinate,
                  dir: Direction)
                  -> Result<usize> {
    if dir.is_none() {
        return Err(MazeError::InvalidDirection);
    }
    if !dimensions.is_valid_coordinate(coord) {
        return Err(MazeError::OutOfBounds {
            coordinate: coord,
            dimensions,
        });
    }

    let columns = dimensions.columns().0;
    let (x, y) = (coord.x as usize, coord.y as usize);
    let east_west_offset = dimensions.north_south_edges().0;
    let index = match dir {
        // N/S edges are stored first, no offset needed
        Direction::North => x + y * columns,
        Direction::South => x + (y + 1) * columns,
        Direction::West => east_west_offset + x + y * (columns + 1),
        Direction::East => east_west_offset + (x + 1) + y * (columns + 1),
        Direction::None => return Err(MazeError::InvalidDirection),
    };

    if index < dimensions.edges_count().0 {
        Ok(index)
    } else {
        Err(MazeError::OutOfBounds {
            coordinate: coord,
            dimensions,
        })
    }
}

/// Fixed capacity storage for every edge slot of the largest grid.
///
/// Indices are computed with the active dimensions, so a smaller maze packs its edges at the
/// front of the arena. The outer border slots are addressable but never opened.
#[derive(Debug, Clone)]
pub struct EdgeStore {
    edges: Vec<Edge>,
    capacity: RectGridDimensions,
    active: RectGridDimensions,
}

impl EdgeStore {
    pub fn new(capacity: RectGridDimensions) -> EdgeStore {
        EdgeStore {
            edges: vec![Edge::default(); capacity.edges_count().0],
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

    /// Turn every edge of the new active window back into a wall.
    pub fn reset(&mut self, active: RectGridDimensions) -> Result<()> {
        if active.is_empty() || !active.fits_within(&self.capacity) {
            return Err(MazeError::invalid_dimensions(active, self.capacity));
        }

        self.active = active;
        for edge in &mut self.edges[..active.edges_count().0] {
            *edge = Edge::default();
        }
        Ok(())
    }

    #[inline]
    pub fn index_of(&self, coord: Cartesian2DCoordinate, dir: Direction) -> Result<usize> {
        edge_index(self.active, coord, dir)
    }

    pub fn get(&self, coord: Cartesian2DCoordinate, dir: Direction) -> Result<&Edge> {
        let index = self.index_of(coord, dir)?;
        Ok(&self.edges[index])
    }

    pub fn get_mut(&mut self, coord: Cartesian2DCoordinate, dir: Direction) -> Result<&mut Edge> {
        let index = self.index_of(coord, dir)?;
        Ok(&mut self.edges[index])
    }

    /// The edges of the active window in storage order.
    pub fn active_edges(&self) -> &[Edge] {
        &self.edges[..self.active.edges_count().0]
    }

    pub fn open_count(&self) -> usize {
        self.active_edges().iter().filter(|edge| !edge.is_blocking()).count()
    }
}
