//! Reference resolution and project validation.
//!
//! The resolver turns a root document into one validated `Project`: it
//! transitively loads every referenced document, rewrites forward
//! references through default aliases, and checks the resulting graph for
//! duplicate names, undefined references, and requirement cycles. Errors
//! are batched so one pass reports everything it found.

pub mod errors;
pub mod load;
pub mod validate;

pub use errors::{ConfigError, ValidationErrors};
pub use load::{DocumentParser, ProjectLoader};
pub use validate::{resolve_references, validate};
