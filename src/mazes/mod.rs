//! Maze puzzles built on the grid graph and the search algorithms
//! Inputs are the raw puzzle text, already loaded by the caller

pub mod race;
pub mod ram_run;
pub mod reindeer;
