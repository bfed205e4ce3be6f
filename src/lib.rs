//! Weighted grid graphs and shortest path search
//!
//! - [`grid`] parses character mazes
//! - [`graph`] turns a grid into a [`graph::WeightedGraph`], with or without facings
//! - [`graph_algos`] holds Dijkstra (with tie tracking) and A*
//! - [`mazes`] solves concrete maze puzzles on top of the above

pub mod collections;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod grid;
pub mod mazes;

pub use errors::{GridError, PathPlannerError};
pub use geometry::{Coord, Direction};
pub use graph::{GridNode, MazeConfig, MazeGraph, Movement, WeightedGraph};
pub use graph_algos::ShortestPaths;
pub use grid::{Grid, GridLegend};
