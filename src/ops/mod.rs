//! High-level operations composing the resolver and scheduler.

pub mod project;

pub use project::{default_registry, load_project};
