//! Racetrack with cheats: once per race a program may pass through walls for a few picoseconds
//! A cheat jumps between two track cells and costs their Manhattan distance

use tracing::debug;

use crate::errors::{GridError, PathPlannerError};
use crate::geometry::Coord;
use crate::graph::{build_maze_graph, GridNode, MazeConfig, WeightedGraph};
use crate::graph_algos::a_star::AStar;
use crate::graph_algos::dijkstra::{dijkstra_nodes_full, shortest_distance};
use crate::grid::Grid;


/// Longest short cheat
pub const SHORT_CHEAT: u64 = 2;
/// Longest long cheat
pub const LONG_CHEAT: u64 = 20;


/// A jump from one track cell to another
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cheat {
    pub from: Coord,
    pub to: Coord,
    pub cost: u64,
}


#[derive(Clone, Debug)]
pub struct Racetrack {
    grid: Grid,
    config: MazeConfig,
    graph: WeightedGraph<GridNode>,
    start: GridNode,
    end: GridNode,
}

impl Racetrack {

    pub fn parse(input: &str) -> Result<Self, PathPlannerError> {
        let grid = Grid::parse(input)?;
        let config = MazeConfig::default();
        let maze = build_maze_graph(&grid, &config)?;
        let end = *maze.goals.first().ok_or(GridError::MissingEnd(config.legend.end))?;

        Ok(Self { grid, config, graph: maze.graph, start: maze.start, end })
    }

    /// Picoseconds needed without cheating
    pub fn baseline(&self) -> Result<u64, PathPlannerError> {
        let end = self.end;
        let path = AStar::default().plan(
            self.start,
            self.graph.neighbor_fn(),
            |node: &GridNode| node.pos.manhattan(end.pos),
            |node| *node == end,
        )?;
        Ok(path.len() as u64 - 1)
    }

    /// Every cheat of length 2..=max_len between two track cells
    pub fn cheats(&self, max_len: u64) -> Vec<Cheat> {
        // no two cells are further apart than the width plus the height
        let span = u64::try_from(self.grid.width() + self.grid.height()).unwrap_or(u64::MAX);
        let reach = i32::try_from(max_len.min(span)).unwrap_or(i32::MAX);
        let legend = &self.config.legend;
        let mut cheats = Vec::new();

        for (from, cell) in self.grid.iter() {
            if !legend.is_passable(cell) {
                continue;
            }
            for dx in -reach..=reach {
                let spread = reach - dx.abs();
                for dy in -spread..=spread {
                    let to = Coord::new(from.x + dx, from.y + dy);
                    let cost = from.manhattan(to);
                    if cost < 2 || !self.grid.get(to).is_some_and(|c| legend.is_passable(c)) {
                        continue;
                    }
                    cheats.push(Cheat { from, to, cost });
                }
            }
        }
        cheats
    }

    /// Count cheats saving at least `min_saving` picoseconds by adding each cheat to the graph
    /// and racing again
    pub fn count_cheats_by_trial(&self, max_len: u64, min_saving: u64) -> Result<usize, PathPlannerError> {
        let baseline = self.baseline()?;
        let min_saving = min_saving.max(1);
        let end = self.end;

        // working snapshot - every trial edge is reverted before the next one
        let mut graph = self.graph.clone();
        let mut count = 0;
        for cheat in self.cheats(max_len) {
            let trial = graph.with_edge(GridNode::at(cheat.from), GridNode::at(cheat.to), cheat.cost);
            let time = shortest_distance(self.start, trial.neighbor_fn(), |node| *node == end)?;
            if baseline.saturating_sub(time) >= min_saving {
                count += 1;
            }
        }

        debug!(max_len, min_saving, count, "cheats counted by trial");
        Ok(count)
    }

    /// Count cheats saving at least `min_saving` picoseconds from the distance tables
    /// to the start and to the end
    pub fn count_cheats(&self, max_len: u64, min_saving: u64) -> Result<usize, PathPlannerError> {
        let min_saving = min_saving.max(1);

        // the track graph is undirected, distances from the end are distances to the end
        let from_start = dijkstra_nodes_full(self.start, self.graph.neighbor_fn())?;
        let to_end = dijkstra_nodes_full(self.end, self.graph.neighbor_fn())?;
        let baseline = from_start.distance(&self.end).ok_or(PathPlannerError::NoPathFound)?;

        let count = self
            .cheats(max_len)
            .into_iter()
            .filter(|cheat| {
                let (Some(before), Some(after)) = (
                    from_start.distance(&GridNode::at(cheat.from)),
                    to_end.distance(&GridNode::at(cheat.to)),
                ) else {
                    return false;
                };
                baseline.saturating_sub(before + cheat.cost + after) >= min_saving
            })
            .count();

        debug!(max_len, min_saving, baseline, count, "cheats counted");
        Ok(count)
    }
}
