use docopt::Docopt;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};
use walkmaze::{
    generators::CellWalls,
    grid_displays::{MazeRender, PathDisplay, StartEndPointsDisplay},
    pathing,
    Cell,
    ColumnsCount,
    Direction,
    Maze,
    RowsCount,
};

const USAGE: &str = "Maze Driver

Usage:
    maze_driver -h | --help
    maze_driver [--width=<w>] [--height=<h>] [--max-size=<n>] [--seed=<s>] [--show-path] [--progress] [--save-edges=<path>] [--text-out=<path>]

Options:
    -h --help              Show this screen.
    --width=<w>            Number of columns in the maze [default: 15].
    --height=<h>           Number of rows in the maze [default: 15].
    --max-size=<n>         Capacity allocated up front, the maze can be at most n * n [default: 15].
    --seed=<s>             Seed for a reproducible maze. A random seed is chosen and logged if not given.
    --show-path            Draw the route from the entrance to the exit.
    --progress             Print every cell as the generator adds it to the maze.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --text-out=<path>      Output file path for a textual rendering of the maze.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_max_size: usize,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_progress: bool,
    flag_save_edges: String,
    flag_text_out: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Maze(::walkmaze::MazeError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut maze = Maze::new(ColumnsCount(args.flag_max_size), RowsCount(args.flag_max_size))?;

    let seed = args.flag_seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("generating {}x{} maze with seed {}", args.flag_width, args.flag_height, seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let columns = ColumnsCount(args.flag_width);
    let rows = RowsCount(args.flag_height);
    if args.flag_progress {
        let mut print_cell = |cell: &Cell, walls: CellWalls| {
            println!("{} open: {}", cell, open_sides(walls));
        };
        maze.generate_with_hook(columns, rows, &mut rng, &mut print_cell)
            .chain_err(|| "Failed to generate maze")?;
    } else {
        maze.generate(columns, rows, &mut rng).chain_err(|| "Failed to generate maze")?;
    }

    let text = if args.flag_show_path {
        let path = pathing::entrance_to_exit_path(&maze)
            .ok_or("Generated maze has no route from the entrance to the exit.")?;
        MazeRender::new(&maze, &PathDisplay::new(&path)).to_string()
    } else {
        MazeRender::new(&maze, &StartEndPointsDisplay).to_string()
    };

    if args.flag_text_out.is_empty() {
        println!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    Ok(())
}

fn open_sides(walls: CellWalls) -> String {
    let names = Direction::COMPASS
        .iter()
        .filter(|dir| !walls.is_blocking(**dir))
        .map(|dir| format!("{:?}", dir))
        .collect::<Vec<_>>();
    if names.is_empty() {
        String::from("-")
    } else {
        names.join(",")
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {

    let dimensions = maze.dimensions();
    let mut graph_data = String::new();
    graph_data.push_str(maze.size().to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(maze.passages_count().to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in maze.open_passages() {
        let index_a = dimensions.row_major_index(src)
            .ok_or("Passages iter should give valid coordinate")?;
        let index_b = dimensions.row_major_index(dst)
            .ok_or("Passages iter should give valid coordinate")?;

        graph_data.push_str((index_a + 1).to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str((index_b + 1).to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
