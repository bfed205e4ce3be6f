pub mod dijkstra;
pub mod a_star;
mod shortest_path;

pub use shortest_path::ShortestPaths;
use shortest_path::shortest_path;

use crate::collections::FxIndexMap;

/// Type alias for the node map used in path planning algorithms
/// N: Node - space on a graph
/// C: Cost of reaching the node from the start
/// The tuple contains (parent_indices, cost) where:
/// - parent_indices are the indices of every parent reaching the node at `cost`,
///   the first one is the parent that set the cost, later ones tie with it
/// - cost is the total cost to reach this node from the start
/// The start node has no parents
pub type GraphNodeMap<N, C> = FxIndexMap<N, (Vec<usize>, C)>;
