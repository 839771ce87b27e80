//! Core data structures for Slipway.
//!
//! This module contains the foundational types of the project graph:
//! - Modules and their owned groups
//! - Requirements and module references (resolved or pending)
//! - Parsed documents (BuildFile) and the aggregated Project registry

pub mod build_file;
pub mod group;
pub mod module;
pub mod project;
pub mod reference;

pub use build_file::BuildFile;
pub use group::{Group, HeaderPath, Requirement, Source};
pub use module::Module;
pub use project::{ModuleId, NameGenerator, Project};
pub use reference::ModuleRef;
