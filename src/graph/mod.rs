mod builder;

pub use builder::{
    build_graph, build_maze_graph, GridNode, MazeConfig, MazeGraph, Movement, DEFAULT_TURN_COST,
};

use std::{hash::Hash, ops::Deref};

use crate::collections::FxIndexMap;


/// Directed graph with non-negative integer edge weights
/// Each node maps to its outgoing edges (neighbor -> weight)
#[derive(Clone, Debug)]
pub struct WeightedGraph<N: Eq + Hash> {
    adjacency: FxIndexMap<N, FxIndexMap<N, u64>>,
}

impl<N: Eq + Hash> Default for WeightedGraph<N> {
    fn default() -> Self {
        Self { adjacency: FxIndexMap::default() }
    }
}

impl<N> WeightedGraph<N>
where
    N: Eq + Hash + Clone,
{

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without edges, keeps existing edges if already present
    pub fn add_node(&mut self, node: N) {
        self.adjacency.entry(node).or_default();
    }

    /// Insert (or overwrite) the edge from -> to, returning the previous weight
    pub fn insert_edge(&mut self, from: N, to: N, weight: u64) -> Option<u64> {
        self.add_node(to.clone());
        self.adjacency.entry(from).or_default().insert(to, weight)
    }

    /// Remove the edge from -> to, returning its weight
    /// Nodes are left in place
    pub fn remove_edge(&mut self, from: &N, to: &N) -> Option<u64> {
        self.adjacency.get_mut(from)?.shift_remove(to)
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn edge(&self, from: &N, to: &N) -> Option<u64> {
        self.adjacency.get(from)?.get(to).copied()
    }

    /// Outgoing edges of a node
    pub fn edges(&self, node: &N) -> Option<&FxIndexMap<N, u64>> {
        self.adjacency.get(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|edges| edges.len()).sum()
    }

    /// Neighbor function for the search algorithms
    /// Unknown nodes have no neighbors
    pub fn neighbor_fn(&self) -> impl Fn(&N) -> Vec<(N, u64)> + '_ {
        move |node: &N| {
            self.adjacency
                .get(node)
                .map(|edges| edges.iter().map(|(n, &w)| (n.clone(), w)).collect())
                .unwrap_or_default()
        }
    }

    /// Temporarily add the edge from -> to
    /// The graph is restored when the returned guard is dropped
    pub fn with_edge(&mut self, from: N, to: N, weight: u64) -> EdgeGuard<'_, N> {
        let added_from = !self.contains_node(&from);
        let added_to = !self.contains_node(&to);
        let previous = self.insert_edge(from.clone(), to.clone(), weight);
        EdgeGuard { graph: self, from, to, previous, added_from, added_to }
    }
}


/// Reverts a temporary edge on drop, on every exit path
pub struct EdgeGuard<'g, N>
where
    N: Eq + Hash + Clone,
{
    graph: &'g mut WeightedGraph<N>,
    from: N,
    to: N,
    previous: Option<u64>,
    // endpoints that were not nodes before the edge existed
    added_from: bool,
    added_to: bool,
}

impl<N> Deref for EdgeGuard<'_, N>
where
    N: Eq + Hash + Clone,
{
    type Target = WeightedGraph<N>;

    fn deref(&self) -> &Self::Target {
        self.graph
    }
}

impl<N> Drop for EdgeGuard<'_, N>
where
    N: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        match self.previous {
            Some(weight) => {
                self.graph.insert_edge(self.from.clone(), self.to.clone(), weight);
            }
            None => {
                self.graph.remove_edge(&self.from, &self.to);
            }
        }
        if self.added_from {
            self.graph.adjacency.shift_remove(&self.from);
        }
        if self.added_to {
            self.graph.adjacency.shift_remove(&self.to);
        }
    }
}
