//! Subcommand implementations.

pub mod check;
pub mod completions;
pub mod exec;
pub mod tree;

use std::collections::HashSet;

/// Build a feature-flag probe from `--enable` flags.
pub fn probe_from(enable: &[String]) -> impl Fn(&str) -> bool + Sync {
    let enabled: HashSet<String> = enable.iter().cloned().collect();
    move |flag: &str| enabled.contains(flag)
}
