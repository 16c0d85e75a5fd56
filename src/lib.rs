//! **walkmaze** generates perfect mazes with a loop erased random walk on a fixed capacity grid
//! and answers the queries needed to draw them and move a player through them.

pub mod cells;
pub mod edges;
pub mod generators;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod maze;
pub mod maze_error;
pub mod pathing;
pub mod units;

pub use crate::cells::{Cartesian2DCoordinate, Cell, Direction};
pub use crate::edges::Edge;
pub use crate::maze::Maze;
pub use crate::maze_error::MazeError;
pub use crate::units::{ColumnsCount, RowsCount};
