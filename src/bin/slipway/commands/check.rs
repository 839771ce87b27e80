//! `slipway check` - load, expand, resolve, and validate a project.

use anyhow::{bail, Result};

use slipway::ops::load_project;
use slipway::util::diagnostic;

use crate::cli::CheckArgs;
use crate::commands::probe_from;

pub fn execute(args: CheckArgs, color: bool) -> Result<()> {
    let probe = probe_from(&args.enable);

    match load_project(&args.document, &probe) {
        Ok(project) => {
            println!(
                "validated {} module(s) across {} document(s)",
                project.len(),
                project.documents().len()
            );
            Ok(())
        }
        Err(errors) => {
            for diag in errors.to_diagnostics() {
                diagnostic::emit(&diag, color);
            }
            bail!("{} configuration error(s)", errors.len());
        }
    }
}
