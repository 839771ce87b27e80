//! `slipway exec` - run a plan file through the scheduler.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};

use slipway::manifest::load_plan;
use slipway::schedule::{Action, CommandAction, Scheduler};

use crate::cli::ExecArgs;

pub fn execute(args: ExecArgs, verbose: bool) -> Result<()> {
    let plan = load_plan(&args.plan)?;
    let start = Instant::now();

    if verbose {
        eprintln!("   Executing {} action(s)", plan.len());
    }

    let bar = if !verbose && plan.len() > 1 {
        let bar = ProgressBar::new(plan.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let actions: Vec<Box<dyn Action>> = plan
        .into_iter()
        .map(|action| match &bar {
            Some(bar) => Box::new(Tracked {
                inner: action,
                bar: bar.clone(),
            }) as Box<dyn Action>,
            None => Box::new(action) as Box<dyn Action>,
        })
        .collect();

    let jobs = args.jobs.unwrap_or(1);
    let tally = Scheduler::new().jobs(jobs).execute(&actions)?;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let elapsed = start.elapsed();
    eprintln!("    Finished {} in {:.2}s", tally, elapsed.as_secs_f64());

    if !tally.is_success() {
        bail!("plan failed: {}", tally);
    }
    Ok(())
}

/// Decorates an action with progress-bar ticks.
struct Tracked {
    inner: CommandAction,
    bar: ProgressBar,
}

impl Action for Tracked {
    fn inputs(&self) -> &[PathBuf] {
        self.inner.inputs()
    }

    fn outputs(&self) -> &[PathBuf] {
        self.inner.outputs()
    }

    fn run(&self) -> Result<()> {
        self.bar.set_message(self.inner.describe());
        let result = self.inner.run();
        self.bar.inc(1);
        result
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}
