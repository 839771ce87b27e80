//! Test utilities for Slipway unit tests.

mod fixtures;

pub use fixtures::MemoryParser;
