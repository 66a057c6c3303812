//! Shared test utilities for autoux integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Report helpers use a fixed clock and sequential ids so
//! output is reproducible byte for byte.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
