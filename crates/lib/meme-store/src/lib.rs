//! Result models and shared constants for mcp4meme.
//!
//! This crate defines the report shapes returned by every analytics tool. Live
//! and mock data sources both produce these types, so a tool's schema never
//! depends on where its values came from.

pub mod models;
pub mod schema;

pub use models::*;
