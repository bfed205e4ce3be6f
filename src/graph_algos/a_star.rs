use crate::errors::PathPlannerError;
use crate::collections::FxIndexMap;
use super::{shortest_path, GraphNodeMap};

use std::{
    collections::BinaryHeap,
    hash::Hash,
    fmt::Debug,
    cmp::Ordering
};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};
use tracing::debug;



/// Open list entry, ordered by estimated total cost (smallest first)
#[derive(Debug)]
struct Candidate<T> {
    index: usize, // index in the closed list
    cost: T, // confirmed cost from the start
    estimate: T, // cost + heuristic
}

impl<T: Ord> Ord for Candidate<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.estimate.cmp(&self.estimate)
    }
}
impl<T: Ord> PartialOrd for Candidate<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialEq> PartialEq for Candidate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.estimate == other.estimate
    }
}
impl<T: PartialEq> Eq for Candidate<T> {}

/// A* Algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
/// Only a single witness path is tracked, use Dijkstra when ties matter
#[derive(Clone, Copy, Debug, Default)]
pub struct AStar {}

impl AStar {

    /// Cheapest path from start to the first node meeting the goal criteria
    /// The heuristic must be consistent (never overestimates, and drops by at most the
    /// edge cost along an edge) - the first goal popped is then final
    pub fn plan<N, C, IT, NN, H, G>(&self, start: N, neighbors: NN, heuristic_fn: H, goal_fn: G) -> Result<Vec<N>, PathPlannerError>
    where
        N: Eq + Hash + Clone + Debug,
        NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
        H: Fn(&N) -> C, // heuristic function
        IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
        C: Zero + Ord + Copy + Debug,
        G: Fn(&N) -> bool, // node qualifier for goal
        {

        let (closed_list, goal_index) = self.search(start, neighbors, heuristic_fn, goal_fn)?;

        let goal_index = goal_index.ok_or(PathPlannerError::NoPathFound)?;
        shortest_path(&closed_list, goal_index)
    }


    /// Expand candidates by estimated total cost until a goal is popped
    /// Returns the closed list with the index of the goal, if one was reached
    fn search<N, C, IT, NN, H, G>(&self, start: N, neighbors: NN, heuristic_fn: H, goal_fn: G) -> Result<(GraphNodeMap<N, C>, Option<usize>), PathPlannerError>
    where
        N: Eq + Hash + Clone + Debug,
        NN: Fn(&N) -> IT,
        IT: IntoIterator<Item = (N, C)>,
        C: Zero + Ord + Copy + Debug,
        H: Fn(&N) -> C,
        G: Fn(&N) -> bool
    {
        let mut open_list: BinaryHeap<Candidate<C>> = BinaryHeap::new();

        // Best known cost of every discovered node with its single parent
        let mut closed_list: GraphNodeMap<N, C> = FxIndexMap::default();

        let start_estimate = heuristic_fn(&start);
        let start_index = closed_list.insert_full(start, (Vec::new(), Zero::zero())).0;
        open_list.push(Candidate {
            index: start_index,
            cost: Zero::zero(),
            estimate: start_estimate,
        });

        while let Some(Candidate { index, cost, .. }) = open_list.pop() {

            let (node, &(_, best)) = closed_list
                .get_index(index)
                .ok_or(PathPlannerError::UnknownNodeIndex(index))?;

            // stale entry, a cheaper way in was queued later
            if cost > best {
                continue;
            }

            if goal_fn(node) {
                debug!(explored = closed_list.len(), cost = ?best, "a* reached goal");
                return Ok((closed_list, Some(index)));
            }

            let node = node.clone();
            for (neighbor, edge_cost) in neighbors(&node) {
                let new_cost = best + edge_cost;
                let estimate = new_cost + heuristic_fn(&neighbor);

                let neighbor_index = match closed_list.entry(neighbor) {
                    Vacant(e) => {
                        let neighbor_index = e.index();
                        e.insert((vec![index], new_cost));
                        neighbor_index
                    }
                    Occupied(mut e) if new_cost < e.get().1 => {
                        *e.get_mut() = (vec![index], new_cost);
                        e.index()
                    }
                    Occupied(_) => continue,
                };

                open_list.push(Candidate {
                    index: neighbor_index,
                    cost: new_cost,
                    estimate,
                });
            }
        }

        debug!(explored = closed_list.len(), "a* exhausted open list");
        Ok((closed_list, None))
    }
}
