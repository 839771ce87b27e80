//! Action scheduling and execution.
//!
//! Given a set of actions with declared input/output identities, the
//! scheduler computes a dependency order and runs every action only after
//! all producers of its inputs have succeeded.

pub mod action;
pub mod command;
pub mod executor;
pub mod graph;

#[cfg(test)]
pub mod testing;

pub use action::{Action, Tally};
pub use command::CommandAction;
pub use executor::Scheduler;
pub use graph::ActionGraph;
