use std::error;
use std::fmt;
use std::result;

use crate::cells::Cartesian2DCoordinate;
use crate::grid_dimensions::RectGridDimensions;
use crate::units::{ColumnsCount, RowsCount};

pub type Result<T> = result::Result<T, MazeError>;

/// Errors from querying or generating a maze.
///
/// All of them are local to the call that returned them, nothing is retried internally.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MazeError {
    /// A coordinate outside the active (or allocated) grid.
    OutOfBounds {
        coordinate: Cartesian2DCoordinate,
        dimensions: RectGridDimensions,
    },
    /// Requested dimensions are zero or larger than the allocated capacity.
    InvalidDimensions {
        columns: ColumnsCount,
        rows: RowsCount,
        max_columns: ColumnsCount,
        max_rows: RowsCount,
    },
    /// An edge lookup with `Direction::None`.
    InvalidDirection,
}

impl MazeError {
    pub(crate) fn invalid_dimensions(requested: RectGridDimensions,
                                     capacity: RectGridDimensions)
                                     -> MazeError {
        MazeError::InvalidDimensions {
            columns: requested.columns(),
            rows: requested.rows(),
            max_columns: capacity.columns(),
            max_rows: capacity.rows(),
        }
    }
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MazeError::OutOfBounds { coordinate, dimensions } => {
                write!(f,
                       "coordinate {} is outside the {}x{} grid",
                       coordinate,
                       dimensions.columns().0,
                       dimensions.rows().0)
            }
            MazeError::InvalidDimensions { columns, rows, max_columns, max_rows } => {
                write!(f,
                       "invalid maze dimensions {}x{}, must be between 1x1 and {}x{}",
                       columns.0,
                       rows.0,
                       max_columns.0,
                       max_rows.0)
            }
            MazeError::InvalidDirection => write!(f, "direction none has no edge"),
        }
    }
}

impl error::Error for MazeError {}
