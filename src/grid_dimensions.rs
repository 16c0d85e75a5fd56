use crate::cells::{Cartesian2DCoordinate, Direction};
use crate::grid_iterators::RectGridCellIter;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};


/// Width and height of a rectangular grid of cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RectGridDimensions {
    columns: ColumnsCount,
    rows: RowsCount,
}

impl RectGridDimensions {
    pub fn new(columns: ColumnsCount, rows: RowsCount) -> RectGridDimensions {
        RectGridDimensions { columns, rows }
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.columns.0 * self.rows.0)
    }

    /// `size()` when `columns * rows` fits in a `usize`.
    #[inline]
    pub fn checked_size(&self) -> Option<NodesCount> {
        self.columns.0.checked_mul(self.rows.0).map(NodesCount)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.0 == 0 || self.rows.0 == 0
    }

    /// Does this grid fit inside `other` when both share the same top left corner?
    #[inline]
    pub fn fits_within(&self, other: &RectGridDimensions) -> bool {
        self.columns <= other.columns && self.rows <= other.rows
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.columns.0 && (coord.y as usize) < self.rows.0
    }

    pub fn row_major_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.columns.0 + coord.x as usize)
        } else {
            None
        }
    }

    pub fn coordinate_from_row_major_index(&self, index: usize) -> Option<Cartesian2DCoordinate> {
        if index < self.size().0 {
            let x = index % self.columns.0;
            let y = index / self.columns.0;
            Some(Cartesian2DCoordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    /// The last cell in row-major order, the bottom right corner.
    pub fn last_coordinate(&self) -> Option<Cartesian2DCoordinate> {
        self.size()
            .0
            .checked_sub(1)
            .and_then(|index| self.coordinate_from_row_major_index(index))
    }

    /// The neighbouring coordinate one step away in `dir`, if it is still inside the grid.
    pub fn offset_coordinate(&self,
                             coord: Cartesian2DCoordinate,
                             dir: Direction)
                             -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }

        let (x, y) = (coord.x, coord.y);
        let last_x = self.columns.0 as u32 - 1;
        let last_y = self.rows.0 as u32 - 1;
        match dir {
            Direction::North if y > 0 => Some(Cartesian2DCoordinate::new(x, y - 1)),
            Direction::East if x < last_x => Some(Cartesian2DCoordinate::new(x + 1, y)),
            Direction::South if y < last_y => Some(Cartesian2DCoordinate::new(x, y + 1)),
            Direction::West if x > 0 => Some(Cartesian2DCoordinate::new(x - 1, y)),
            _ => None,
        }
    }

    /// How many of the four compass directions stay inside the grid from `coord`.
    pub fn in_bounds_directions_count(&self, coord: Cartesian2DCoordinate) -> usize {
        Direction::COMPASS
            .iter()
            .filter(|dir| self.offset_coordinate(coord, **dir).is_some())
            .count()
    }

    /// Number of north/south edge slots: `rows + 1` edge rows of `columns` edges each.
    #[inline]
    pub fn north_south_edges(&self) -> EdgesCount {
        EdgesCount(self.columns.0 * (self.rows.0 + 1))
    }

    /// Number of east/west edge slots: `columns + 1` edge columns of `rows` edges each.
    #[inline]
    pub fn east_west_edges(&self) -> EdgesCount {
        EdgesCount(self.rows.0 * (self.columns.0 + 1))
    }

    #[inline]
    pub fn edges_count(&self) -> EdgesCount {
        EdgesCount(self.north_south_edges().0 + self.east_west_edges().0)
    }

    /// `edges_count()` when every intermediate product fits in a `usize`.
    pub fn checked_edges_count(&self) -> Option<EdgesCount> {
        let (columns, rows) = (self.columns.0, self.rows.0);
        let north_south = columns.checked_mul(rows.checked_add(1)?)?;
        let east_west = rows.checked_mul(columns.checked_add(1)?)?;
        north_south.checked_add(east_west).map(EdgesCount)
    }

    /// Walls strictly between two cells, the only edges a maze can open.
    pub fn interior_edges_count(&self) -> EdgesCount {
        if self.is_empty() {
            return EdgesCount(0);
        }
        EdgesCount(self.columns.0 * (self.rows.0 - 1) + self.rows.0 * (self.columns.0 - 1))
    }

    #[inline]
    pub fn iter(&self) -> RectGridCellIter {
        RectGridCellIter::new(*self)
    }
}
