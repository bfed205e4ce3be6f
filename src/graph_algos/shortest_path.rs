use std::hash::Hash;

use crate::collections::FxIndexSet;
use crate::errors::PathPlannerError;
use super::GraphNodeMap;

/// Construct the shortest path from the goal node to the start node
/// Returns the ordered path as a vector of nodes from start to goal
/// node_map: GraphNodeMap<N, C> - map of nodes with their parent indices and cost
/// goal_index: usize - index of the goal node in the node_map
/// When several parents tie, the first one is followed
pub(crate) fn shortest_path<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Result<Vec<N>, PathPlannerError>
where
    N: Clone,
{

    let mut path = Vec::new();
    let mut current_index = Some(goal_index);

    // Trace back from goal to start
    while let Some(index) = current_index {
        let (node, (parents, _)) = node_map
            .get_index(index)
            .ok_or(PathPlannerError::UnknownNodeIndex(index))?;
        path.push(node.clone());
        current_index = parents.first().copied();
    }

    // The path is in reverse order, so reverse it
    path.reverse();

    if path.is_empty() {
        return Err(PathPlannerError::NoPathFound);
    }

    Ok(path)
}

/// Every node lying on at least one minimum cost path to any of the goals
/// Walks all parents backwards from the goals (the predecessor DAG)
pub(crate) fn tied_nodes<N, C>(node_map: &GraphNodeMap<N, C>, goal_indices: &[usize]) -> Result<FxIndexSet<N>, PathPlannerError>
where
    N: Eq + Hash + Clone,
{
    let mut seen: FxIndexSet<usize> = FxIndexSet::default();
    let mut stack = goal_indices.to_vec();

    while let Some(index) = stack.pop() {
        // zero cost cycles can show up as ties, the seen set stops them
        if !seen.insert(index) {
            continue;
        }
        let (_, (parents, _)) = node_map
            .get_index(index)
            .ok_or(PathPlannerError::UnknownNodeIndex(index))?;
        stack.extend(parents.iter().copied());
    }

    seen.into_iter()
        .map(|index| {
            node_map
                .get_index(index)
                .map(|(node, _)| node.clone())
                .ok_or(PathPlannerError::UnknownNodeIndex(index))
        })
        .collect()
}


/// Result of a Dijkstra search: distance and predecessor tables plus the goals
/// reached at minimum cost
#[derive(Clone, Debug)]
pub struct ShortestPaths<N, C> {
    node_map: GraphNodeMap<N, C>,
    goals: Vec<usize>,
}

impl<N, C> ShortestPaths<N, C>
where
    N: Eq + Hash + Clone,
    C: Copy,
{

    pub(crate) fn new(node_map: GraphNodeMap<N, C>, goals: Vec<usize>) -> Self {
        Self { node_map, goals }
    }

    /// Cost of reaching the goal, None if no goal was reached
    pub fn cost(&self) -> Option<C> {
        let &index = self.goals.first()?;
        self.node_map.get_index(index).map(|(_, &(_, cost))| cost)
    }

    /// Best known cost to reach a node, None stands for infinity
    /// Only nodes expanded before the search stopped are guaranteed final
    pub fn distance(&self, node: &N) -> Option<C> {
        self.node_map.get(node).map(|&(_, cost)| cost)
    }

    /// Nodes reaching `node` at its best cost
    pub fn predecessors(&self, node: &N) -> Vec<&N> {
        let Some((parents, _)) = self.node_map.get(node) else {
            return Vec::new();
        };
        parents
            .iter()
            .filter_map(|&index| self.node_map.get_index(index).map(|(n, _)| n))
            .collect()
    }

    /// First goal reached
    pub fn goal(&self) -> Option<&N> {
        self.goals.first().and_then(|&index| self.node_map.get_index(index)).map(|(n, _)| n)
    }

    /// All goals reached at the minimum cost
    pub fn goals(&self) -> impl Iterator<Item = &N> {
        self.goals.iter().filter_map(|&index| self.node_map.get_index(index)).map(|(n, _)| n)
    }

    /// One shortest path from start to the first goal
    pub fn path(&self) -> Result<Vec<N>, PathPlannerError> {
        let &goal_index = self.goals.first().ok_or(PathPlannerError::NoPathFound)?;
        shortest_path(&self.node_map, goal_index)
    }

    /// One shortest path from start to any discovered node
    pub fn path_to(&self, node: &N) -> Result<Vec<N>, PathPlannerError> {
        let index = self.node_map.get_index_of(node).ok_or(PathPlannerError::NoPathFound)?;
        shortest_path(&self.node_map, index)
    }

    /// Union of the nodes on every minimum cost path to the goals
    pub fn nodes_on_shortest_paths(&self) -> Result<FxIndexSet<N>, PathPlannerError> {
        if self.goals.is_empty() {
            return Err(PathPlannerError::NoPathFound);
        }
        tied_nodes(&self.node_map, &self.goals)
    }

    /// Discovered nodes with their best known cost
    pub fn iter(&self) -> impl Iterator<Item = (&N, C)> {
        self.node_map.iter().map(|(n, &(_, cost))| (n, cost))
    }

    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.node_map.contains_key(node)
    }

    pub fn node_map(&self) -> &GraphNodeMap<N, C> {
        &self.node_map
    }
}
