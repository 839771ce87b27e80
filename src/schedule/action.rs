//! The Action contract consumed by the scheduler.

use std::path::PathBuf;

use anyhow::Result;

/// A schedulable unit of work with declared input and output identities.
///
/// The scheduler assumes nothing beyond this shape: an action may begin
/// once every action producing one of its inputs has succeeded.
pub trait Action: Send + Sync {
    /// File identities this action consumes.
    fn inputs(&self) -> &[PathBuf];

    /// File identities this action produces.
    fn outputs(&self) -> &[PathBuf];

    /// Perform the work. A returned error marks the action failed; every
    /// action transitively depending on it will be skipped.
    fn run(&self) -> Result<()>;

    /// Human-readable label for logs and progress output.
    fn describe(&self) -> String {
        match self.outputs().first() {
            Some(out) => out.display().to_string(),
            None => "<action>".to_string(),
        }
    }
}

/// Outcome counts of one scheduler run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Tally {
    /// Overall success: nothing failed and nothing was left unrun.
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} succeeded, {} failed, {} skipped",
            self.succeeded, self.failed, self.skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_success_requires_no_failures_and_no_skips() {
        let ok = Tally {
            succeeded: 3,
            failed: 0,
            skipped: 0,
        };
        assert!(ok.is_success());

        let failed = Tally {
            succeeded: 2,
            failed: 1,
            skipped: 0,
        };
        assert!(!failed.is_success());

        // All blocked, nothing failed: still not a success.
        let stalled = Tally {
            succeeded: 0,
            failed: 0,
            skipped: 2,
        };
        assert!(!stalled.is_success());
    }

    #[test]
    fn tally_display() {
        let t = Tally {
            succeeded: 1,
            failed: 2,
            skipped: 3,
        };
        assert_eq!(t.to_string(), "1 succeeded, 2 failed, 3 skipped");
    }
}
