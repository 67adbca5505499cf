//! Shared pieces of the 2022 puzzle programs: the uniform command line, line
//! readers, a sparse coordinate graph with breadth-first search, an interval
//! reducer and a modular accumulator for long arithmetic histories.

pub mod cli;
pub mod graph;
pub mod input;
pub mod interval;
pub mod modular;
pub mod path;

pub use graph::{Coord, SparseGraph};
pub use interval::Interval;
pub use modular::{ModularValue, OpId, Operand, Operation, OperationTable, Operator};
