use crate::errors::PathPlannerError;
use crate::collections::FxIndexMap;
use super::{shortest_path, GraphNodeMap, ShortestPaths};

use std::{collections::BinaryHeap, hash::Hash, cmp::Ordering, fmt::Debug};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};
use tracing::{debug, trace};




/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until node meets goal criteria
pub fn dijkstra<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Result<Vec<N>, PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    // Build the graph - terminates when the goal is met
    let (node_map, goals) = build_dijkstra_graph(start, neighbors, goal, Termination::FirstGoal)?;

    if let Some(&goal_index) = goals.first() {
        // find the path
        let path = shortest_path(&node_map, goal_index)?;
        Ok(path)
    } else {
        Err(PathPlannerError::NoPathFound)
    }
}


/// Cost of the cheapest path from start to any goal
pub fn shortest_distance<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Result<C, PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool,
    {

    let (node_map, goals) = build_dijkstra_graph(start, neighbors, goal, Termination::FirstGoal)?;

    goals.first()
        .and_then(|&index| node_map.get_index(index))
        .map(|(_, &(_, cost))| cost)
        .ok_or(PathPlannerError::NoPathFound)
}


/// Search that keeps every tied predecessor and every goal reached at the minimum cost
/// Use `ShortestPaths::nodes_on_shortest_paths` for the union of all cheapest paths
pub fn dijkstra_all<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Result<ShortestPaths<N, C>, PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool,
    {

    let (node_map, goals) = build_dijkstra_graph(start, neighbors, goal, Termination::TiedGoals)?;

    if goals.is_empty() {
        return Err(PathPlannerError::NoPathFound);
    }
    Ok(ShortestPaths::new(node_map, goals))
}


/// Return a partial map of the graph up to the goal node
/// Nodes with lower cost than the goal node will be included
pub fn dijkstra_nodes_partial<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Result<ShortestPaths<N, C>, PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool,
    {

    // Build the graph - terminates when the goal is met
    let (node_map, goals) = build_dijkstra_graph(start, neighbors, goal, Termination::FirstGoal)?;

    Ok(ShortestPaths::new(node_map, goals))
}

/// Returns a full map of the graph, includes all (reachable) nodes and costs
pub fn dijkstra_nodes_full<N, C, IT, NN>(start: N, neighbors: NN) -> Result<ShortestPaths<N, C>, PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    {

    // Build the graph - runs until the queue is empty
    let (node_map, goals) = build_dijkstra_graph(start, neighbors, |_| false, Termination::Exhaustive)?;

    Ok(ShortestPaths::new(node_map, goals))
}


/// When the search stops
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Termination {
    /// First goal popped - its cost is final and minimal among all goals
    FirstGoal,
    /// Once the queue holds nothing cheaper than or equal to the first goal
    TiedGoals,
    /// Queue empty
    Exhaustive,
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns a map of nodes with their smallest costs along with the indices of the goal nodes
/// reached at the minimum cost
fn build_dijkstra_graph<N, C, IT, NN, G>(start: N, neighbors: NN, goal_fn: G, termination: Termination) -> Result<(GraphNodeMap<N, C>, Vec<usize>), PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool // Returns true if goal is met
    {

    // Nodes to visit - binary heap sorts Biggest to Smallest
    // Dijkstra's algorithm uses a priority queue to always expand the least costly node first
    // We store the cost from the starting node
    let mut nodes_to_visit: BinaryHeap<NodeId<C>> = BinaryHeap::new();

    // usize is the index in the nodes_map
    // The tuple contains (parent_indices, cost), the start node has no parents
    let mut nodes_map: GraphNodeMap<N, C> = FxIndexMap::default();

    // Add start node to the map and queue
    let start_index = nodes_map.insert_full(start, (Vec::new(), Zero::zero())).0;
    nodes_to_visit.push(NodeId{
        index: start_index,
        cost: Zero::zero(), // This is the cost from the start node
    });

    let mut goals: Vec<usize> = Vec::new();
    let mut goal_cost: Option<C> = None;

    // Loop over each node to visit, removing the smallest node
    while let Some(NodeId {cost, index}) = nodes_to_visit.pop() {

        // fetch current best cost for node
        let (node, &(_, c)) = nodes_map
            .get_index(index)
            .ok_or(PathPlannerError::UnknownNodeIndex(index))?;

        // If cost of new node from BinaryHeap is higher than the best cost, skip it
        // This implies we've already found a better path to this node
        if cost > c {
            continue;
        }

        // Everything left is more expensive than the goals already found
        if goal_cost.is_some_and(|best| c > best) {
            break;
        }

        let node = node.clone();
        trace!(?node, cost = ?c, "expanding node");

        // Check if we've reached the goal
        if goal_fn(&node) {
            goals.push(index);
            goal_cost = Some(c);
            if termination == Termination::FirstGoal {
                break;
            }
        }

        // loop over neighbors
        for (neighbor, edge_cost) in neighbors(&node) {

            // new cost to reach this node = edge cost + node cost
            let new_cost = edge_cost + c;

            let neighbor_index = match nodes_map.entry(neighbor) {
                Vacant(e) => {
                    // This is the first time we're seeing this neighbor
                    let neighbor_index = e.index();
                    e.insert((vec![index], new_cost));
                    neighbor_index
                }
                Occupied(mut e) => {
                    let neighbor_index = e.index();
                    let (parents, best) = e.get_mut();
                    if new_cost < *best {
                        // We've found a better path to this neighbor
                        *best = new_cost;
                        *parents = vec![index];
                        neighbor_index
                    } else {
                        // A tie is another way in at the same cost - no need to visit again
                        // The start node keeps no parents
                        if new_cost == *best && neighbor_index != start_index && !parents.contains(&index) {
                            parents.push(index);
                        }
                        continue;
                    }
                }
            };

            // Only add to the queue if we've found a better path
            nodes_to_visit.push(NodeId {
                index: neighbor_index,
                cost: new_cost,
            });
        }
    }

    debug!(
        explored = nodes_map.len(),
        goals = goals.len(),
        cost = ?goal_cost,
        ?termination,
        "dijkstra search finished"
    );

    Ok((nodes_map, goals))
}


/// Node identifier
/// - for ordering we only need cost and a way to identify the node
/// - Nodes can contain additional data, but we only need to identify them
#[derive(Debug)]
struct NodeId<T> {
    index: usize,
    cost: T
}

impl<T: Ord> Ord for NodeId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
    }
}
impl<T: Ord> PartialOrd for NodeId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialEq> PartialEq for NodeId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}
impl<T: PartialEq> Eq for NodeId<T> {}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // Helper function to create a test graph
    fn create_test_graph() -> HashMap<String, Vec<(String, u32)>> {
        let mut graph = HashMap::new();

        // Diamond-shaped graph: A -> B -> D and A -> C -> D
        graph.insert("A".to_string(), vec![
            ("B".to_string(), 1),
            ("C".to_string(), 3),
        ]);

        graph.insert("B".to_string(), vec![
            ("D".to_string(), 5),
        ]);

        graph.insert("C".to_string(), vec![
            ("D".to_string(), 1),
        ]);

        graph.insert("D".to_string(), vec![]);

        graph
    }

    // Same diamond, both routes to D cost 4
    fn create_tied_graph() -> HashMap<String, Vec<(String, u32)>> {
        let mut graph = create_test_graph();
        graph.insert("B".to_string(), vec![("D".to_string(), 3)]);
        graph.insert("D".to_string(), vec![("E".to_string(), 1)]);
        graph.insert("E".to_string(), vec![]);
        graph
    }

    // Helper function to create a neighbor function from a graph
    fn create_neighbor_fn(graph: &HashMap<String, Vec<(String, u32)>>) -> impl Fn(&String) -> Vec<(String, u32)> + '_ {
        move |node: &String| {
            graph.get(node).cloned().unwrap_or_default()
        }
    }

    fn strings(nodes: &[&str]) -> Vec<String> {
        nodes.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_dijkstra_graph_simple() {
        let graph = create_test_graph();
        let neighbors = create_neighbor_fn(&graph);

        // Run Dijkstra's algorithm from node A
        let (result, goals) = build_dijkstra_graph(
            "A".to_string(),
            neighbors,
            |node| node == "D", // Goal is to reach node D
            Termination::FirstGoal,
        ).unwrap();

        // Verify costs
        let costs: HashMap<_, _> = result.iter().map(|(node, (_, cost))| (node.clone(), *cost)).collect();

        assert_eq!(costs.get("A").unwrap(), &0);
        assert_eq!(costs.get("B").unwrap(), &1);
        assert_eq!(costs.get("C").unwrap(), &3);
        assert_eq!(costs.get("D").unwrap(), &4); // Should be 4 via the A->C->D path
        assert_eq!(goals.len(), 1);
    }

    #[test]
    fn test_build_dijkstra_graph_with_cycle() {
        // Create a graph with a cycle: A -> B -> C -> A
        let mut graph = HashMap::new();

        graph.insert("A".to_string(), vec![("B".to_string(), 1)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1)]);
        graph.insert("C".to_string(), vec![("A".to_string(), 1), ("D".to_string(), 2)]);
        graph.insert("D".to_string(), vec![]);

        let neighbors = create_neighbor_fn(&graph);

        // Run Dijkstra's algorithm from node A
        let (result, _) = build_dijkstra_graph(
            "A".to_string(),
            neighbors,
            |node| node == "D",
            Termination::FirstGoal,
        ).unwrap();

        // Verify costs
        let costs: HashMap<_, _> = result.iter().map(|(node, (_, cost))| (node.clone(), *cost)).collect();

        assert_eq!(costs.get("A").unwrap(), &0);
        assert_eq!(costs.get("B").unwrap(), &1);
        assert_eq!(costs.get("C").unwrap(), &2);
        assert_eq!(costs.get("D").unwrap(), &4);

        // The cycle back to A never gives the start a parent
        assert!(result.get("A").unwrap().0.is_empty());
    }

    #[test]
    fn test_dijkstra_finds_optimal_path() {
        let graph = create_test_graph();
        let neighbors = create_neighbor_fn(&graph);

        // Run Dijkstra's algorithm from node A to node D
        let path = dijkstra(
            "A".to_string(),
            neighbors,
            |node| node == "D"
        ).unwrap();

        // The expected path is A -> C -> D (the cheapest path)
        assert_eq!(path, strings(&["A", "C", "D"]));
    }

    #[test]
    fn test_dijkstra_start_is_goal() {
        let graph = create_test_graph();
        let neighbors = create_neighbor_fn(&graph);

        let path = dijkstra("A".to_string(), &neighbors, |node| node == "A").unwrap();
        assert_eq!(path, strings(&["A"]));

        let cost = shortest_distance("A".to_string(), &neighbors, |node| node == "A").unwrap();
        assert_eq!(cost, 0);
    }

    #[test]
    fn test_dijkstra_handles_unreachable_goal() {
        // Create a graph with no path to the goal
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 1)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1)]);
        graph.insert("C".to_string(), vec![]);
        graph.insert("D".to_string(), vec![]); // D is not connected

        let neighbors = create_neighbor_fn(&graph);

        // Try to find a path from A to D (which doesn't exist)
        let result = dijkstra("A".to_string(), &neighbors, |node| node == "D");
        assert!(matches!(result, Err(PathPlannerError::NoPathFound)));

        let distance = shortest_distance("A".to_string(), &neighbors, |node| node == "D");
        assert!(matches!(distance, Err(PathPlannerError::NoPathFound)));

        let all = dijkstra_all("A".to_string(), &neighbors, |node| node == "D");
        assert!(matches!(all, Err(PathPlannerError::NoPathFound)));
    }

    #[test]
    fn test_dijkstra_nodes_partial_stops_at_cost_threshold() {
        // Create a graph where high-cost nodes won't be explored
        let mut graph = HashMap::new();

        // A -> B -> D (cost 2) is the shortest path to goal
        // A -> C -> E/F -> G/H are high-cost paths that shouldn't be explored
        graph.insert("A".to_string(), vec![
            ("B".to_string(), 1),
            ("C".to_string(), 10),
        ]);

        graph.insert("B".to_string(), vec![("D".to_string(), 1)]);
        graph.insert("C".to_string(), vec![("E".to_string(), 5), ("F".to_string(), 20)]);
        graph.insert("E".to_string(), vec![("G".to_string(), 5)]);
        graph.insert("F".to_string(), vec![("H".to_string(), 1)]);

        // Terminal nodes
        graph.insert("D".to_string(), vec![]);
        graph.insert("G".to_string(), vec![]);
        graph.insert("H".to_string(), vec![]);

        let neighbors = create_neighbor_fn(&graph);

        // Run Dijkstra's algorithm from node A with goal D
        let partial = dijkstra_nodes_partial(
            "A".to_string(),
            neighbors,
            |node| node == "D"
        ).unwrap();

        // Verify explored vs unexplored nodes
        for node in ["A", "B", "C", "D"] {
            assert!(partial.contains(&node.to_string()), "Node {node} should be explored");
        }

        for node in ["E", "F", "G", "H"] {
            assert!(!partial.contains(&node.to_string()), "Node {node} should not be explored");
        }

        assert_eq!(partial.cost(), Some(2)); // A->B->D = 1+1 = 2
    }

    #[test]
    fn test_dijkstra_nodes_full_explores_everything() {
        let graph = create_tied_graph();
        let neighbors = create_neighbor_fn(&graph);

        let full = dijkstra_nodes_full("A".to_string(), neighbors).unwrap();
        assert_eq!(full.len(), 5);
        assert_eq!(full.distance(&"E".to_string()), Some(5));
        assert_eq!(full.cost(), None);
        assert_eq!(full.path_to(&"E".to_string()).unwrap().len(), 4);
    }

    #[test]
    fn test_dijkstra_all_tracks_ties() {
        let graph = create_tied_graph();
        let neighbors = create_neighbor_fn(&graph);

        let paths = dijkstra_all("A".to_string(), neighbors, |node| node == "E").unwrap();
        assert_eq!(paths.cost(), Some(5));

        let mut preds: Vec<_> = paths.predecessors(&"D".to_string()).into_iter().cloned().collect();
        preds.sort();
        assert_eq!(preds, strings(&["B", "C"]));

        let on_paths = paths.nodes_on_shortest_paths().unwrap();
        assert_eq!(on_paths.len(), 5);

        // the single witness path is one of the two tied routes
        let path = paths.path().unwrap();
        assert_eq!(path.len(), 4);
        assert!(path.iter().all(|node| on_paths.contains(node)));
    }

    #[test]
    fn test_dijkstra_all_collects_tied_goals() {
        // Two goals at the same cost, a third one further away
        let mut graph = HashMap::new();
        graph.insert("S".to_string(), vec![("X".to_string(), 2), ("Y".to_string(), 1), ("Z".to_string(), 1)]);
        graph.insert("Y".to_string(), vec![("G2".to_string(), 1)]);
        graph.insert("X".to_string(), vec![("G1".to_string(), 0)]);
        graph.insert("Z".to_string(), vec![("G3".to_string(), 9)]);

        let neighbors = create_neighbor_fn(&graph);
        let paths = dijkstra_all("S".to_string(), neighbors, |node| node.starts_with('G')).unwrap();

        let mut goals: Vec<_> = paths.goals().cloned().collect();
        goals.sort();
        assert_eq!(goals, strings(&["G1", "G2"]));
        assert_eq!(paths.cost(), Some(2));

        let on_paths = paths.nodes_on_shortest_paths().unwrap();
        assert_eq!(on_paths.len(), 5);
        assert!(!on_paths.contains("Z"));
    }

    #[test]
    fn test_dijkstra_is_idempotent() {
        let graph = create_tied_graph();
        let neighbors = create_neighbor_fn(&graph);

        let first = dijkstra_all("A".to_string(), &neighbors, |node| node == "E").unwrap();
        let second = dijkstra_all("A".to_string(), &neighbors, |node| node == "E").unwrap();
        assert_eq!(first.node_map(), second.node_map());
    }

    #[test]
    fn test_dijkstra_complex_graph() {
        // Create a more complex graph with multiple paths
        let mut graph = HashMap::new();

        graph.insert("A".to_string(), vec![("B".to_string(), 4), ("C".to_string(), 2)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1), ("D".to_string(), 5)]);
        graph.insert("C".to_string(), vec![("D".to_string(), 8), ("E".to_string(), 10)]);
        graph.insert("D".to_string(), vec![("E".to_string(), 2), ("F".to_string(), 6)]);
        graph.insert("E".to_string(), vec![("F".to_string(), 3)]);
        graph.insert("F".to_string(), vec![]);

        let neighbors = create_neighbor_fn(&graph);

        // Run Dijkstra's algorithm from node A to node F
        let path = dijkstra("A".to_string(), &neighbors, |node| node == "F").unwrap();

        // Calculate the total cost of the path
        let mut total_cost = 0;
        for pair in path.windows(2) {
            let edge_cost = graph.get(&pair[0]).unwrap()
                .iter()
                .find(|(node, _)| node == &pair[1])
                .map(|(_, cost)| *cost)
                .unwrap();
            total_cost += edge_cost;
        }

        // The total cost should be 14 (A->B->D->E->F)
        assert_eq!(total_cost, 14);
        assert_eq!(shortest_distance("A".to_string(), &neighbors, |node| node == "F").unwrap(), 14);
    }
}
