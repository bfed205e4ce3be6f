//! Turn-penalty maze: stepping forward costs 1, turning 90 degrees costs 1000
//! The walker starts on `S` facing east and may finish on `E` in any facing

use tracing::debug;

use crate::collections::FxHashSet;
use crate::errors::PathPlannerError;
use crate::geometry::Coord;
use crate::graph::{build_maze_graph, MazeConfig, MazeGraph, DEFAULT_TURN_COST};
use crate::graph_algos::dijkstra::{dijkstra_all, shortest_distance};
use crate::grid::Grid;


fn parse_maze(input: &str) -> Result<MazeGraph, PathPlannerError> {
    let grid = Grid::parse(input)?;
    Ok(build_maze_graph(&grid, &MazeConfig::facing(DEFAULT_TURN_COST))?)
}

/// Lowest score a walker can get from start to end
pub fn lowest_score(input: &str) -> Result<u64, PathPlannerError> {
    let maze = parse_maze(input)?;
    let goals = &maze.goals;

    shortest_distance(maze.start, maze.graph.neighbor_fn(), |node| goals.contains(node))
}

/// Number of tiles that are part of at least one lowest score path
pub fn best_path_tiles(input: &str) -> Result<usize, PathPlannerError> {
    let maze = parse_maze(input)?;
    let goals = &maze.goals;

    let paths = dijkstra_all(maze.start, maze.graph.neighbor_fn(), |node| goals.contains(node))?;
    let tiles: FxHashSet<Coord> = paths
        .nodes_on_shortest_paths()?
        .into_iter()
        .map(|node| node.pos)
        .collect();

    debug!(score = ?paths.cost(), tiles = tiles.len(), "best path tiles");
    Ok(tiles.len())
}
