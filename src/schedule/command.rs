//! Command actions: external programs with declared inputs and outputs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;

use crate::schedule::action::Action;
use crate::util::process::ProcessBuilder;

/// An action that runs an external program.
#[derive(Debug, Clone)]
pub struct CommandAction {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: BTreeMap<String, String>,
    inputs: Vec<PathBuf>,
    outputs: Vec<PathBuf>,
    label: Option<String>,
}

impl CommandAction {
    pub fn new(program: impl Into<String>) -> Self {
        CommandAction {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            label: None,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.inputs.push(path.into());
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.outputs.push(path.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn builder(&self) -> ProcessBuilder {
        let mut pb = ProcessBuilder::new(&self.program).args(&self.args);
        for (key, value) in &self.env {
            pb = pb.env(key, value);
        }
        if let Some(cwd) = &self.cwd {
            pb = pb.cwd(cwd);
        }
        pb
    }
}

impl Action for CommandAction {
    fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }

    fn run(&self) -> Result<()> {
        let pb = self.builder();
        tracing::debug!(command = %pb.display_command(), "running action");
        pb.exec_and_check()?;
        Ok(())
    }

    fn describe(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self.builder().display_command(),
        }
    }
}
