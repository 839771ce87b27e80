//! Slipway - a declarative meta-build configuration engine.
//!
//! Slipway turns a declarative description of a software project (modules,
//! source groups, inter-module requirements, platform-conditional option
//! flags) into a validated, fully-resolved dependency graph, and schedules
//! the concrete build actions derived from that graph so every action runs
//! only after its prerequisites have succeeded.

pub mod core;
pub mod expand;
pub mod manifest;
pub mod ops;
pub mod resolver;
pub mod schedule;
pub mod util;

/// Test utilities and in-memory fixtures for Slipway unit tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{BuildFile, Group, Module, ModuleId, ModuleRef, Project, Requirement, Source};

pub use expand::{ExpandContext, TemplateRegistry};
pub use resolver::{ConfigError, DocumentParser, ProjectLoader, ValidationErrors};
pub use schedule::{Action, CommandAction, Scheduler, Tally};
pub use util::Symbol;
