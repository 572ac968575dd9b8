//! Shared utilities for kondi.
//!
//! Cross-cutting concerns used by the other kondi crates: the unified error
//! type and filesystem helpers.

pub mod errors;
pub mod fs;
