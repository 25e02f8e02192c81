//! Binary serialization for work execution plans.
//!
//! Serializes a [`WorkGraph`] to a byte stream and reconstructs it in a
//! single forward pass with no forward-reference patching. Nodes are written
//! successors-first, so every node's successors already carry a dense stream
//! id when the node itself is emitted, and every successor id is strictly
//! smaller than the id of the node referencing it.
//!
//! # Layout
//!
//! ```text
//! Stream  := NodeCount:varint  Node{NodeCount}
//! Node    := Id:varint  Payload:<codec frame>  DepEdges:EdgeSet
//!            [Task only: MustEdges:EdgeSet  FinalizeEdges:EdgeSet]
//! EdgeSet := Count:varint  SuccessorId:varint{Count}
//! ```
//!
//! The payload frame is produced by a pluggable [`NodeCodec`]; it embeds the
//! node's kind discriminant, so the task-only edge sets have no separate tag
//! in the outer record. Payload frames referenced from multiple nodes are
//! written once through a per-operation deduplication scope.
//!
//! # Modules
//!
//! - [`varint`]: LEB128 integer primitives
//! - [`scope`]: per-operation shared-value deduplication
//! - [`payload`]: the delegated node payload codec
//! - [`writer`]: graph encoding ([`write_plan`])
//! - [`reader`]: graph decoding ([`read_plan`])
//! - [`error`]: [`CodecError`] with all failure modes
//!
//! [`WorkGraph`]: workplan_core::WorkGraph

pub mod error;
pub mod payload;
pub mod reader;
pub mod scope;
mod successors;
pub mod varint;
pub mod writer;

// Re-export key types for ergonomic use.
pub use error::CodecError;
pub use payload::{JsonNodeCodec, NodeCodec};
pub use reader::{read_plan, ReadPlan};
pub use scope::{ReadScope, WriteScope};
pub use writer::write_plan;
