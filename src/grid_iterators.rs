use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::grid_dimensions::RectGridDimensions;
use crate::units::{ColumnsCount, RowsCount};

/// Visits every coordinate of a grid in row-major order.
#[derive(Copy, Clone)]
pub struct RectGridCellIter {
    dimensions: RectGridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl RectGridCellIter {
    pub fn new(dimensions: RectGridDimensions) -> RectGridCellIter {
        RectGridCellIter {
            dimensions,
            current_cell_number: 0,
            cells_count: dimensions.size().0,
        }
    }
}

impl fmt::Debug for RectGridCellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for RectGridCellIter {} // default impl using size_hint()
impl Iterator for RectGridCellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = self.dimensions
                .coordinate_from_row_major_index(self.current_cell_number);
            self.current_cell_number += 1;
            coord
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// Yields the grid one row at a time, each row a vec of coordinates west to east.
#[derive(Debug, Copy, Clone)]
pub struct RectRowIter {
    current_index: usize,
    columns: ColumnsCount,
    rows: RowsCount,
}

impl RectRowIter {
    pub fn new(dimensions: RectGridDimensions) -> RectRowIter {
        RectRowIter {
            current_index: 0,
            columns: dimensions.columns(),
            rows: dimensions.rows(),
        }
    }
}

impl ExactSizeIterator for RectRowIter {}
impl Iterator for RectRowIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let RowsCount(count) = self.rows;
        if self.current_index < count {
            let ColumnsCount(length) = self.columns;
            let y = self.current_index as u32;
            let coords = (0..length)
                .map(|x: usize| Cartesian2DCoordinate::new(x as u32, y))
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.rows.0 - self.current_index;
        (lower_bound, Some(lower_bound))
    }
}
