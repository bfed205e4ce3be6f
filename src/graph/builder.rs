use crate::errors::GridError;
use crate::geometry::{Coord, Direction};
use crate::grid::{Grid, GridLegend};
use super::WeightedGraph;


/// Cost of a single 90 degree turn in the turn-penalty maze
pub const DEFAULT_TURN_COST: u64 = 1000;


/// Graph node - a grid position, optionally paired with a facing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridNode {
    pub pos: Coord,
    pub facing: Option<Direction>,
}

impl GridNode {

    pub const fn at(pos: Coord) -> Self {
        Self { pos, facing: None }
    }

    pub const fn facing(pos: Coord, facing: Direction) -> Self {
        Self { pos, facing: Some(facing) }
    }
}


/// How a walker moves between cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    /// One node per cell, step to any passable orthogonal neighbor
    Omnidirectional,
    /// Four nodes per cell, step forward or turn 90 degrees in place
    Facing { start_facing: Direction, turn_cost: u64 },
}


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeConfig {
    pub legend: GridLegend,
    pub movement: Movement,
    pub step_cost: u64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            legend: GridLegend::default(),
            movement: Movement::Omnidirectional,
            step_cost: 1,
        }
    }
}

impl MazeConfig {

    /// Facing-aware maze, starting towards the east
    pub fn facing(turn_cost: u64) -> Self {
        Self {
            movement: Movement::Facing { start_facing: Direction::East, turn_cost },
            ..Self::default()
        }
    }

    /// Node a walker occupies when starting at `pos`
    pub fn start_node(&self, pos: Coord) -> GridNode {
        match self.movement {
            Movement::Omnidirectional => GridNode::at(pos),
            Movement::Facing { start_facing, .. } => GridNode::facing(pos, start_facing),
        }
    }

    /// Nodes that count as having arrived at `pos` - any facing will do
    pub fn goal_nodes(&self, pos: Coord) -> Vec<GridNode> {
        match self.movement {
            Movement::Omnidirectional => vec![GridNode::at(pos)],
            Movement::Facing { .. } => Direction::ALL.into_iter().map(|dir| GridNode::facing(pos, dir)).collect(),
        }
    }
}


/// Graph built from a maze, with its start and goal nodes
#[derive(Clone, Debug)]
pub struct MazeGraph {
    pub graph: WeightedGraph<GridNode>,
    pub start: GridNode,
    pub goals: Vec<GridNode>,
}


/// Build the graph of passable cells - walls and out of bounds cells have no nodes
pub fn build_graph(grid: &Grid, config: &MazeConfig) -> WeightedGraph<GridNode> {
    let legend = &config.legend;
    let passable = |pos: Coord| grid.get(pos).is_some_and(|c| legend.is_passable(c));

    let mut graph = WeightedGraph::new();
    for (pos, cell) in grid.iter() {
        if !legend.is_passable(cell) {
            continue;
        }

        match config.movement {
            Movement::Omnidirectional => {
                let node = GridNode::at(pos);
                graph.add_node(node);
                for neighbor in pos.neighbors().filter(|&n| passable(n)) {
                    graph.insert_edge(node, GridNode::at(neighbor), config.step_cost);
                }
            }
            Movement::Facing { turn_cost, .. } => {
                for facing in Direction::ALL {
                    let node = GridNode::facing(pos, facing);
                    graph.add_node(node);

                    let ahead = pos.step(facing);
                    if passable(ahead) {
                        graph.insert_edge(node, GridNode::facing(ahead, facing), config.step_cost);
                    }
                    // a 180 degree turn is two 90 degree turns
                    for turned in facing.orthogonal() {
                        graph.insert_edge(node, GridNode::facing(pos, turned), turn_cost);
                    }
                }
            }
        }
    }
    graph
}

/// Build the graph and locate the start / end markers
pub fn build_maze_graph(grid: &Grid, config: &MazeConfig) -> Result<MazeGraph, GridError> {
    let legend = &config.legend;
    let start = grid.find(legend.start).ok_or(GridError::MissingStart(legend.start))?;
    let end = grid.find(legend.end).ok_or(GridError::MissingEnd(legend.end))?;

    Ok(MazeGraph {
        graph: build_graph(grid, config),
        start: config.start_node(start),
        goals: config.goal_nodes(end),
    })
}
