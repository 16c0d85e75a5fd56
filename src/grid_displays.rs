use fnv::FnvHashSet;
use std::fmt;

use crate::cells::{Cartesian2DCoordinate, Direction};
use crate::grid_iterators::RectRowIter;
use crate::maze::Maze;
use crate::pathing::Distances;

/// Decides what is drawn inside each cell when a maze is rendered as text.
pub trait CellDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _maze: &Maze, _coord: Cartesian2DCoordinate) -> String {
        String::from("   ")
    }
}

/// Empty cell bodies.
#[derive(Debug, Copy, Clone, Default)]
pub struct BlankDisplay;
impl CellDisplay for BlankDisplay {}

/// Marks the entrance `S` and the exit `E`.
#[derive(Debug, Copy, Clone, Default)]
pub struct StartEndPointsDisplay;
impl CellDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, maze: &Maze, coord: Cartesian2DCoordinate) -> String {
        match maze.cell(coord) {
            Ok(cell) if cell.is_entrance() => String::from(" S "),
            Ok(cell) if cell.is_exit() => String::from(" E "),
            _ => String::from("   "),
        }
    }
}

/// Dots along a path, with the entrance and exit still marked.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl CellDisplay for PathDisplay {
    fn render_cell_body(&self, maze: &Maze, coord: Cartesian2DCoordinate) -> String {
        let end_point = StartEndPointsDisplay.render_cell_body(maze, coord);
        if end_point.trim().is_empty() && self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            end_point
        }
    }
}

/// `#` for cells the generator has not reached, useful while drawing progressively.
#[derive(Debug, Copy, Clone, Default)]
pub struct VisitedDisplay;
impl CellDisplay for VisitedDisplay {
    fn render_cell_body(&self, maze: &Maze, coord: Cartesian2DCoordinate) -> String {
        match maze.cell(coord) {
            Ok(cell) if !cell.is_visited() => String::from("###"),
            _ => StartEndPointsDisplay.render_cell_body(maze, coord),
        }
    }
}

impl CellDisplay for Distances {
    fn render_cell_body(&self, _: &Maze, coord: Cartesian2DCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

/// A maze paired with the display used for its cell bodies.
pub struct MazeRender<'a> {
    maze: &'a Maze,
    display: &'a dyn CellDisplay,
}

impl<'a> MazeRender<'a> {
    pub fn new(maze: &'a Maze, display: &'a dyn CellDisplay) -> MazeRender<'a> {
        MazeRender { maze, display }
    }
}

impl<'a> fmt::Display for MazeRender<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_text(self.maze, self.display))
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", MazeRender::new(self, &StartEndPointsDisplay))
    }
}

/// Draw the maze walls with box drawing glyphs, four characters per cell horizontally and two
/// lines per row.
pub fn render_text(maze: &Maze, display: &dyn CellDisplay) -> String {
    const WALL_L: &str = "╴";
    const WALL_R: &str = "╶";
    const WALL_U: &str = "╵";
    const WALL_D: &str = "╷";
    const WALL_LR_3: &str = "───";
    const WALL_LR: &str = "─";
    const WALL_UD: &str = "│";
    const WALL_LD: &str = "┐";
    const WALL_RU: &str = "└";
    const WALL_LU: &str = "┘";
    const WALL_RD: &str = "┌";
    const WALL_LRU: &str = "┴";
    const WALL_LRD: &str = "┬";
    const WALL_LRUD: &str = "┼";
    const WALL_RUD: &str = "├";
    const WALL_LUD: &str = "┤";

    let dimensions = maze.dimensions();
    let columns_count = dimensions.columns().0;
    let rows_count = dimensions.rows().0;
    let is_open = |coord: Cartesian2DCoordinate, dir: Direction| {
        maze.check_move(coord, dir).unwrap_or(false)
    };
    let neighbour = |coord: Cartesian2DCoordinate, dir: Direction| {
        dimensions.offset_coordinate(coord, dir)
    };

    // Start by special case rendering the text for the north most boundary
    let mut output = String::from(WALL_RD);
    for x in 0..columns_count {
        let coord = Cartesian2DCoordinate::new(x as u32, 0);
        output.push_str(WALL_LR_3);
        if is_open(coord, Direction::East) {
            output.push_str(WALL_LR);
        } else if x == columns_count - 1 {
            output.push_str(WALL_LD);
        } else {
            output.push_str(WALL_LRD);
        }
    }
    output.push('\n');

    for (index_row, row) in RectRowIter::new(dimensions).enumerate() {

        let is_last_row = index_row == (rows_count - 1);

        // The west most boundary of the row, the top section of the cells is done by the
        // previous row.
        let mut row_middle_section_render = String::from(WALL_UD);
        let mut row_bottom_section_render = String::new();

        for (index_column, cell_coord) in row.into_iter().enumerate() {

            let is_first_column = index_column == 0;
            let is_last_column = index_column == (columns_count - 1);
            let east_open = is_open(cell_coord, Direction::East);
            let south_open = is_open(cell_coord, Direction::South);

            // Each cell uses the southern wall of the cell above as its northern wall, so only
            // the body, the eastern boundary and the southern boundary are drawn here.
            row_middle_section_render.push_str(&display.render_cell_body(maze, cell_coord));
            row_middle_section_render.push_str(if east_open { " " } else { WALL_UD });

            if is_first_column {
                row_bottom_section_render = if is_last_row {
                    String::from(WALL_RU)
                } else if south_open {
                    String::from(WALL_UD)
                } else {
                    String::from(WALL_RUD)
                };
            }
            row_bottom_section_render.push_str(if south_open { "   " } else { WALL_LR_3 });

            let corner = match (is_last_row, is_last_column) {
                (true, true) => WALL_LU,
                (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                (false, false) => {
                    let access_se_from_east = neighbour(cell_coord, Direction::East)
                        .map_or(false, |c| is_open(c, Direction::South));
                    let access_se_from_south = neighbour(cell_coord, Direction::South)
                        .map_or(false, |c| is_open(c, Direction::East));
                    let show_right_section = !access_se_from_east;
                    let show_down_section = !access_se_from_south;
                    let show_up_section = !east_open;
                    let show_left_section = !south_open;

                    match (show_left_section,
                           show_right_section,
                           show_up_section,
                           show_down_section) {
                        (true, true, true, true) => WALL_LRUD,
                        (true, true, true, false) => WALL_LRU,
                        (true, true, false, true) => WALL_LRD,
                        (true, false, true, true) => WALL_LUD,
                        (false, true, true, true) => WALL_RUD,
                        (true, true, false, false) => WALL_LR,
                        (false, false, true, true) => WALL_UD,
                        (false, true, true, false) => WALL_RU,
                        (true, false, false, true) => WALL_LD,
                        (true, false, true, false) => WALL_LU,
                        (false, true, false, true) => WALL_RD,
                        (true, false, false, false) => WALL_L,
                        (false, true, false, false) => WALL_R,
                        (false, false, true, false) => WALL_U,
                        (false, false, false, true) => WALL_D,
                        _ => " ",
                    }
                }
            };

            row_bottom_section_render.push_str(corner);
        }

        output.push_str(&row_middle_section_render);
        output.push('\n');
        output.push_str(&row_bottom_section_render);
        output.push('\n');
    }

    output
}
