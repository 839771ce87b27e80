//! Shared utilities.

pub mod diagnostic;
pub mod fs;
pub mod interning;
pub mod process;

pub use interning::Symbol;
