//! Schema generation 0 of the AKS module's documents.
//!
//! Neither kind has a predecessor, so their upgrade registries are empty and
//! a document from an older series fails to upgrade.

mod config;
mod state;

pub use config::*;
pub use state::*;
