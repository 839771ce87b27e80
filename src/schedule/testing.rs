//! Scripted actions for scheduler tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use crate::schedule::action::Action;

/// An action with scripted inputs, outputs, and outcome.
pub struct FakeAction {
    name: String,
    inputs: Vec<PathBuf>,
    outputs: Vec<PathBuf>,
    fail: bool,
    log: Option<Arc<Mutex<Vec<String>>>>,
}

impl FakeAction {
    pub fn ok(name: &str, inputs: &[&str], outputs: &[&str]) -> Self {
        FakeAction {
            name: name.to_string(),
            inputs: inputs.iter().map(PathBuf::from).collect(),
            outputs: outputs.iter().map(PathBuf::from).collect(),
            fail: false,
            log: None,
        }
    }

    pub fn failing(name: &str, inputs: &[&str], outputs: &[&str]) -> Self {
        FakeAction {
            fail: true,
            ..FakeAction::ok(name, inputs, outputs)
        }
    }

    /// Record the action's name into `log` when it runs.
    pub fn logged(mut self, log: Arc<Mutex<Vec<String>>>) -> Self {
        self.log = Some(log);
        self
    }
}

impl Action for FakeAction {
    fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }

    fn run(&self) -> Result<()> {
        if let Some(log) = &self.log {
            log.lock().unwrap().push(self.name.clone());
        }
        if self.fail {
            bail!("action `{}` scripted to fail", self.name);
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}
