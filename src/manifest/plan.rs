//! Plan files: a flat list of command actions for the scheduler.
//!
//! Action generation from a resolved project belongs to back-end
//! generators outside this crate; a plan file is the neutral hand-off
//! format they produce and `slipway exec` consumes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::schedule::command::CommandAction;
use crate::util::fs::read_to_string;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPlan {
    #[serde(default, rename = "action")]
    actions: Vec<RawAction>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAction {
    program: String,
    #[serde(default)]
    args: Vec<String>,
    cwd: Option<PathBuf>,
    #[serde(default)]
    env: BTreeMap<String, String>,
    #[serde(default)]
    inputs: Vec<PathBuf>,
    #[serde(default)]
    outputs: Vec<PathBuf>,
    label: Option<String>,
}

impl RawAction {
    fn into_action(self) -> CommandAction {
        let mut action = CommandAction::new(self.program).args(self.args);
        if let Some(cwd) = self.cwd {
            action = action.cwd(cwd);
        }
        for (key, value) in self.env {
            action = action.env(key, value);
        }
        for input in self.inputs {
            action = action.input(input);
        }
        for output in self.outputs {
            action = action.output(output);
        }
        if let Some(label) = self.label {
            action = action.label(label);
        }
        action
    }
}

/// Parse a plan from TOML text.
pub fn parse_plan_str(path: &Path, text: &str) -> Result<Vec<CommandAction>> {
    let raw: RawPlan = toml::from_str(text)
        .with_context(|| format!("invalid plan syntax in {}", path.display()))?;
    Ok(raw.actions.into_iter().map(RawAction::into_action).collect())
}

/// Load a plan file from disk.
pub fn load_plan(path: &Path) -> Result<Vec<CommandAction>> {
    let text = read_to_string(path)?;
    parse_plan_str(path, &text)
}
