use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::cells::Cartesian2DCoordinate;
use crate::maze::Maze;

/// Step counts from a start cell to every cell reachable through open passages.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill outwards from `start_coordinate`, `None` if it is not on the active grid.
    pub fn new(maze: &Maze, start_coordinate: Cartesian2DCoordinate) -> Option<Distances> {
        if !maze.dimensions().is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances =
            FnvHashMap::with_capacity_and_hasher(maze.size(), Default::default());
        distances.insert(start_coordinate, 0);

        // Every step costs one so the first distance recorded for a cell is its shortest; the
        // map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for dir in maze.open_directions(*cell_coord).ok()? {
                    if let Some(link) = maze.neighbour_through_passage(*cell_coord, dir).ok()? {
                        if !distances.contains_key(&link) {
                            distances.insert(link, distance_to_cell + 1);
                            new_frontier.push(link);
                        }
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// How many cells the flood fill reached, the start included.
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// The cells at `max()` steps from the start, in row-major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[Cartesian2DCoordinate; 8]>>();
        furthest.sort_by_key(|coord| (coord.y, coord.x));
        furthest
    }
}

/// Walk back from `end_point` towards the start always stepping to a cell one closer.
pub fn shortest_path(maze: &Maze,
                     distances_from_start: &Distances,
                     end_point: Cartesian2DCoordinate)
                     -> Option<Vec<Cartesian2DCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_distance > 0 {
        let mut closer = None;
        for dir in maze.open_directions(current_coord).ok()? {
            if let Some(neighbour) = maze.neighbour_through_passage(current_coord, dir).ok()? {
                if distances_from_start.distance_from_start_to(neighbour) ==
                   Some(current_distance - 1) {
                    closer = Some(neighbour);
                    break;
                }
            }
        }

        // No neighbour gets closer, the distances belong to some other maze
        current_coord = closer?;
        current_distance -= 1;
        path.push(current_coord);
    }

    path.reverse();
    Some(path)
}

/// The route a player has to take from the entrance to the exit.
pub fn entrance_to_exit_path(maze: &Maze) -> Option<Vec<Cartesian2DCoordinate>> {
    let distances = Distances::new(maze, maze.entrance())?;
    shortest_path(maze, &distances, maze.exit())
}
