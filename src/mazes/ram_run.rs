//! Memory space with falling bytes: each byte corrupts one cell of a square grid
//! Walk from the top-left corner to the bottom-right corner around the corrupted cells

use tracing::debug;

use crate::collections::FxHashSet;
use crate::errors::{GridError, PathPlannerError};
use crate::geometry::Coord;
use crate::graph::{build_graph, GridNode, MazeConfig};
use crate::graph_algos::dijkstra::dijkstra;
use crate::grid::Grid;


/// Parse one `x,y` byte position per line
pub fn parse_bytes(input: &str) -> Result<Vec<Coord>, GridError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let invalid = || GridError::InvalidCoordinate { line: i + 1, text: line.to_string() };
            let (x, y) = line.trim().split_once(',').ok_or_else(invalid)?;
            let x = x.trim().parse().map_err(|_| invalid())?;
            let y = y.trim().parse().map_err(|_| invalid())?;
            Ok(Coord::new(x, y))
        })
        .collect()
}


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemorySpace {
    pub width: usize,
    pub height: usize,
}

impl MemorySpace {

    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    fn start(&self) -> GridNode {
        GridNode::at(Coord::new(0, 0))
    }

    fn exit(&self) -> Result<GridNode, GridError> {
        let too_large = || GridError::TooLarge { width: self.width, height: self.height };
        let x = i32::try_from(self.width.saturating_sub(1)).map_err(|_| too_large())?;
        let y = i32::try_from(self.height.saturating_sub(1)).map_err(|_| too_large())?;
        Ok(GridNode::at(Coord::new(x, y)))
    }

    /// Open space with walls at `corrupted`, rejecting bytes that fall outside it
    fn corrupted_grid(&self, corrupted: &[Coord], config: &MazeConfig) -> Result<Grid, GridError> {
        Grid::from_obstacles(self.width, self.height, corrupted.iter().copied(), &config.legend)
    }

    /// Shortest path from the top-left to the bottom-right corner with `corrupted` cells as walls
    pub fn shortest_path(&self, corrupted: &[Coord]) -> Result<Vec<Coord>, PathPlannerError> {
        let config = MazeConfig::default();
        let grid = self.corrupted_grid(corrupted, &config)?;
        let graph = build_graph(&grid, &config);

        let (start, exit) = (self.start(), self.exit()?);
        // a corrupted corner has no node, the search would still accept it as its own goal
        if !graph.contains_node(&start) || !graph.contains_node(&exit) {
            return Err(PathPlannerError::NoPathFound);
        }

        let path = dijkstra(start, graph.neighbor_fn(), |node| *node == exit)?;
        Ok(path.into_iter().map(|node| node.pos).collect())
    }

    /// Fewest steps to the exit once the first `fallen` bytes have landed
    pub fn min_steps(&self, bytes: &[Coord], fallen: usize) -> Result<usize, PathPlannerError> {
        let corrupted = &bytes[..fallen.min(bytes.len())];
        let path = self.shortest_path(corrupted)?;
        Ok(path.len() - 1)
    }

    /// First byte after which the exit can no longer be reached, None if the exit stays reachable
    /// The search only reruns when a byte lands on the current shortest path
    pub fn first_blocking_byte(&self, bytes: &[Coord]) -> Result<Option<Coord>, PathPlannerError> {
        // every byte is checked up front, not only those that force a rerun
        self.corrupted_grid(bytes, &MazeConfig::default())?;

        let mut corrupted: Vec<Coord> = Vec::with_capacity(bytes.len());
        let mut seen: FxHashSet<Coord> = FxHashSet::default();
        let mut on_path: FxHashSet<Coord> = self.shortest_path(&corrupted)?.into_iter().collect();

        for &byte in bytes {
            if !seen.insert(byte) {
                continue;
            }
            corrupted.push(byte);

            if !on_path.contains(&byte) {
                continue;
            }

            match self.shortest_path(&corrupted) {
                Ok(path) => on_path = path.into_iter().collect(),
                Err(PathPlannerError::NoPathFound) => {
                    debug!(%byte, fallen = corrupted.len(), "exit cut off");
                    return Ok(Some(byte));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }
}
