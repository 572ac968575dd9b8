//! Dependency resolution engine for extension-based projects.
//!
//! Resolution runs in four stages over an immutable
//! [`ArtifactRegistry`](kondi_core::registry::ArtifactRegistry):
//!
//! 1. [`builder`] walks unconditional edges from the project into a seed graph.
//! 2. [`activation`] activates conditional edges whose triggers are present,
//!    round by round, until a fixed point.
//! 3. [`flags`] merges the roles every artifact plays across all paths.
//! 4. [`deployment`] collects the build-time-only subtrees of the resolved
//!    extensions.
//!
//! [`resolver::resolve`] runs all of them.

pub mod activation;
pub mod builder;
pub mod deployment;
pub mod edge;
pub mod flags;
pub mod graph;
pub mod report;
pub mod resolver;
