//! `slipway tree` - display the resolved module tree.

use anyhow::{bail, Result};

use slipway::core::{ModuleId, Project};
use slipway::ops::load_project;
use slipway::util::diagnostic;

use crate::cli::TreeArgs;
use crate::commands::probe_from;

pub fn execute(args: TreeArgs, color: bool) -> Result<()> {
    let probe = probe_from(&args.enable);

    let project = match load_project(&args.document, &probe) {
        Ok(project) => project,
        Err(errors) => {
            for diag in errors.to_diagnostics() {
                diagnostic::emit(&diag, color);
            }
            bail!("{} configuration error(s)", errors.len());
        }
    };

    for &root in project.roots() {
        print_module(&project, root, 0, args.requirements);
    }
    Ok(())
}

fn print_module(project: &Project, id: ModuleId, depth: usize, with_requirements: bool) {
    let module = project.module(id);
    let indent = "  ".repeat(depth);
    println!("{}{}", indent, module.label());

    if with_requirements {
        for req in module.group.all_requirements() {
            let vis = if req.public { " (public)" } else { "" };
            println!("{}  -> {}{}", indent, req.target, vis);
        }
    }
    for &child in project.children(id) {
        print_module(project, child, depth + 1, with_requirements);
    }
}
