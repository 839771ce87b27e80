//! Reverse-dependency indexing over an action set.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::schedule::action::Action;

/// The dependency structure of one action set: for every action, who
/// consumes its outputs, and how many in-set producers it waits on.
#[derive(Debug)]
pub struct ActionGraph {
    /// producer index -> indices of actions consuming one of its outputs
    dependents: Vec<Vec<usize>>,
    /// initial count of unfinished in-set producers per action
    pending: Vec<usize>,
}

impl ActionGraph {
    /// Index an action set by matching input identities against output
    /// identities.
    ///
    /// Two actions claiming the same output is a malformed set and aborts
    /// the run; it is the one invariant violation the scheduler treats as
    /// fatal. An action listing one of its own outputs as an input does not
    /// depend on itself.
    pub fn build(actions: &[Box<dyn Action>]) -> Result<Self> {
        let mut producer: HashMap<&PathBuf, usize> = HashMap::new();
        for (i, action) in actions.iter().enumerate() {
            for output in action.outputs() {
                if let Some(prev) = producer.insert(output, i) {
                    if prev != i {
                        bail!(
                            "output `{}` is produced by two actions (`{}` and `{}`)",
                            output.display(),
                            actions[prev].describe(),
                            actions[i].describe()
                        );
                    }
                }
            }
        }

        let mut dependents = vec![Vec::new(); actions.len()];
        let mut pending = vec![0usize; actions.len()];
        for (i, action) in actions.iter().enumerate() {
            for input in action.inputs() {
                if let Some(&p) = producer.get(input) {
                    if p != i {
                        dependents[p].push(i);
                        pending[i] += 1;
                    }
                }
            }
        }

        Ok(ActionGraph {
            dependents,
            pending,
        })
    }

    /// Indices of actions with no in-set producer, in declaration order.
    pub fn initially_ready(&self) -> Vec<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, &n)| n == 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Actions consuming an output of `producer`.
    pub fn dependents_of(&self, producer: usize) -> &[usize] {
        &self.dependents[producer]
    }

    /// Initial pending-producer counts.
    pub fn pending_counts(&self) -> &[usize] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::testing::FakeAction;

    #[test]
    fn chain_builds_expected_edges() {
        let actions: Vec<Box<dyn Action>> = vec![
            Box::new(FakeAction::ok("a", &[], &["o1"])),
            Box::new(FakeAction::ok("b", &["o1"], &["o2"])),
            Box::new(FakeAction::ok("c", &["o2"], &[])),
        ];

        let graph = ActionGraph::build(&actions).unwrap();
        assert_eq!(graph.initially_ready(), vec![0]);
        assert_eq!(graph.dependents_of(0), &[1]);
        assert_eq!(graph.dependents_of(1), &[2]);
        assert_eq!(graph.pending_counts(), &[0, 1, 1]);
    }

    #[test]
    fn external_inputs_do_not_block() {
        let actions: Vec<Box<dyn Action>> = vec![
            Box::new(FakeAction::ok("a", &["external.h"], &["o1"])),
            Box::new(FakeAction::ok("b", &["other.h"], &["o2"])),
        ];

        let graph = ActionGraph::build(&actions).unwrap();
        assert_eq!(graph.initially_ready(), vec![0, 1]);
    }

    #[test]
    fn duplicate_output_is_fatal() {
        let actions: Vec<Box<dyn Action>> = vec![
            Box::new(FakeAction::ok("a", &[], &["same.o"])),
            Box::new(FakeAction::ok("b", &[], &["same.o"])),
        ];

        assert!(ActionGraph::build(&actions).is_err());
    }

    #[test]
    fn self_produced_input_is_ignored() {
        let actions: Vec<Box<dyn Action>> =
            vec![Box::new(FakeAction::ok("a", &["x"], &["x"]))];

        let graph = ActionGraph::build(&actions).unwrap();
        assert_eq!(graph.initially_ready(), vec![0]);
    }
}
