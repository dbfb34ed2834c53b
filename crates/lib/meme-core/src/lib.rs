//! Core services for mcp4meme.
//!
//! This crate owns the tool registry and its parameter validation, the
//! `DataSource` seam with its live (Bitquery) and mock implementations, the
//! control plane that turns source snapshots into tool reports, and the static
//! configuration resources.

pub mod control;
pub mod registry;
pub mod resources;
pub mod source;
