//! Core data model for work execution plans.
//!
//! A work plan is a directed graph of [`WorkNode`]s connected by three
//! categories of [`WorkEdge`]: dependency edges (valid for every node),
//! plus must-run and finalizing ordering edges (task nodes only). The
//! [`WorkGraph`] container owns the nodes and enforces the edge-kind
//! invariants on every mutation.

pub mod edge;
pub mod error;
pub mod graph;
pub mod id;
pub mod node;

// Re-export commonly used types
pub use edge::WorkEdge;
pub use error::CoreError;
pub use graph::WorkGraph;
pub use id::NodeId;
pub use node::{NodeKind, WorkNode};
