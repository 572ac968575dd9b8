//! Core data types for kondi.
//!
//! This crate defines the immutable inputs of a resolution: artifact
//! coordinates, declared dependencies, the per-artifact role flags, extension
//! metadata (deployment counterparts, dependency conditions, conditional
//! dependencies), the artifact registry that holds them, and the manifest and
//! configuration files they are loaded from.
//!
//! This crate is intentionally free of graph algorithms and I/O beyond
//! reading its own input files.

pub mod artifact;
pub mod config;
pub mod coords;
pub mod dependency;
pub mod flags;
pub mod manifest;
pub mod registry;
