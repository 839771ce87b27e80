//! The topological execution scheduler.
//!
//! Actions move `blocked -> ready -> running -> {succeeded, failed}`. An
//! action is ready once every in-set producer of its inputs has succeeded.
//! A failed action never decrements its dependents' pending counts, so
//! everything transitively downstream stays blocked and is tallied as
//! skipped when the ready queue drains. That includes actions caught in a
//! dependency cycle: they never become ready, the queue empties, and the
//! run reports them skipped instead of silently succeeding.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};

use anyhow::Result;

use crate::schedule::action::{Action, Tally};
use crate::schedule::graph::ActionGraph;
use crate::util::fs::ensure_dir;

/// Runs an action set in dependency order.
pub struct Scheduler {
    jobs: usize,
}

impl Scheduler {
    /// Create a scheduler that runs actions one at a time.
    pub fn new() -> Self {
        Scheduler { jobs: 1 }
    }

    /// Set the number of worker threads.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Execute the set and report the tally.
    ///
    /// Individual action failures are normal outcomes reflected in the
    /// tally, not errors. The only fatal condition is a malformed action
    /// set (two producers for one output).
    pub fn execute(&self, actions: &[Box<dyn Action>]) -> Result<Tally> {
        let graph = ActionGraph::build(actions)?;
        prepare_output_dirs(actions)?;

        let tally = if self.jobs == 1 {
            run_serial(actions, &graph)
        } else {
            run_pool(actions, &graph, self.jobs)
        };

        // Skips without any failure mean actions never became ready at
        // all, which points at a dependency cycle in the set.
        if tally.failed == 0 && tally.skipped > 0 {
            tracing::warn!(
                count = tally.skipped,
                "actions never became ready; check for dependency cycles"
            );
        }
        Ok(tally)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Scheduler::new()
    }
}

/// Create the parent directory of every declared output, once, before any
/// action runs.
fn prepare_output_dirs(actions: &[Box<dyn Action>]) -> Result<()> {
    for action in actions {
        for output in action.outputs() {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    ensure_dir(parent)?;
                }
            }
        }
    }
    Ok(())
}

fn run_serial(actions: &[Box<dyn Action>], graph: &ActionGraph) -> Tally {
    let mut pending = graph.pending_counts().to_vec();
    let mut ready: VecDeque<usize> = graph.initially_ready().into();
    let mut tally = Tally::default();

    while let Some(idx) = ready.pop_front() {
        match actions[idx].run() {
            Ok(()) => {
                tally.succeeded += 1;
                for &dep in graph.dependents_of(idx) {
                    pending[dep] -= 1;
                    if pending[dep] == 0 {
                        ready.push_back(dep);
                    }
                }
            }
            Err(err) => {
                tally.failed += 1;
                tracing::error!(action = %actions[idx].describe(), "action failed: {:#}", err);
            }
        }
    }

    tally.skipped = actions.len() - tally.succeeded - tally.failed;
    tally
}

struct PoolState {
    queue: VecDeque<usize>,
    active: usize,
    succeeded: usize,
    failed: usize,
}

fn run_pool(actions: &[Box<dyn Action>], graph: &ActionGraph, jobs: usize) -> Tally {
    // Ready actions are independent by construction, so any number of
    // workers may pull from the queue. Pending counts are atomics; the
    // worker whose decrement reaches zero is the only one that enqueues
    // the dependent.
    let pending: Vec<AtomicUsize> = graph
        .pending_counts()
        .iter()
        .map(|&n| AtomicUsize::new(n))
        .collect();
    let state = Mutex::new(PoolState {
        queue: graph.initially_ready().into(),
        active: 0,
        succeeded: 0,
        failed: 0,
    });
    let idle = Condvar::new();

    std::thread::scope(|scope| {
        for _ in 0..jobs.min(actions.len().max(1)) {
            scope.spawn(|| loop {
                let idx = {
                    let mut st = state.lock().unwrap();
                    loop {
                        if let Some(idx) = st.queue.pop_front() {
                            st.active += 1;
                            break idx;
                        }
                        if st.active == 0 {
                            return;
                        }
                        st = idle.wait(st).unwrap();
                    }
                };

                let result = actions[idx].run();
                let mut newly_ready = Vec::new();
                if result.is_ok() {
                    for &dep in graph.dependents_of(idx) {
                        // Exactly one completion event takes the count to
                        // zero and schedules the dependent.
                        if pending[dep].fetch_sub(1, Ordering::AcqRel) == 1 {
                            newly_ready.push(dep);
                        }
                    }
                }

                let mut st = state.lock().unwrap();
                st.active -= 1;
                match result {
                    Ok(()) => {
                        st.succeeded += 1;
                        st.queue.extend(newly_ready);
                    }
                    Err(err) => {
                        st.failed += 1;
                        tracing::error!(
                            action = %actions[idx].describe(),
                            "action failed: {:#}",
                            err
                        );
                    }
                }
                drop(st);
                idle.notify_all();
            });
        }
    });

    let st = state.into_inner().unwrap();
    Tally {
        succeeded: st.succeeded,
        failed: st.failed,
        skipped: actions.len() - st.succeeded - st.failed,
    }
}
