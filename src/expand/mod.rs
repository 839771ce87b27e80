//! Template expansion: rewriting template-typed modules into concrete
//! subtrees.

pub mod builtin;
pub mod context;
pub mod engine;
pub mod registry;

pub use builtin::register_builtins;
pub use context::ExpandContext;
pub use engine::expand_modules;
pub use registry::{ExpandError, TemplateFn, TemplateRegistry};
