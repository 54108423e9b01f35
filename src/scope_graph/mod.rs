//! # Scope Graph Builder
//!
//! Merges every function's extracted frame chain into a single DAG of
//! `ScopeNode`s: one node per Scope Frame actually needed, linked
//! child-to-parent, with each consumer attached at the deepest node it
//! needs (spec §4.3). Grounded on the teacher's `analyzer::scope_builder`,
//! which performs the analogous merge of per-statement scope lookups into
//! one `ScopeTree` as it walks the AST.

pub mod builder;

use std::collections::HashMap;

use thiserror::Error;

use crate::block::{BlockId, InstantiationId};
use crate::value::ValueId;

pub use builder::ScopeGraphBuilder;

#[derive(Debug, Error)]
pub enum ScopeGraphError {
    #[error("scope node for frame (block {0}, instantiation {1}) was never allocated")]
    UnallocatedFrame(BlockId, InstantiationId),
    #[error("consumer for value {0} could not be attached to any scope node")]
    UnattachedConsumer(ValueId),
}

/// Stable identifier for one allocated `ScopeNode`.
pub type ScopeNodeId = u32;

/// One node in the scope graph: the materialized form of a single Scope
/// Frame, once it's known to be needed by at least one consumer.
#[derive(Debug, Clone)]
pub struct ScopeNode {
    pub id: ScopeNodeId,
    pub block_id: BlockId,
    pub instantiation_id: InstantiationId,
    pub parent: Option<ScopeNodeId>,
    /// Child nodes, ordered by first-encounter source position (spec §4.3
    /// "first-encounter-order determinism") — this ordering, not insertion
    /// order into a hash map, is what later stages must rely on.
    pub children: Vec<ScopeNodeId>,
    /// Union of every binding name any descendant consumer reads.
    pub needed_bindings: Vec<String>,
    /// Union of every binding name any descendant consumer writes.
    pub written_bindings: Vec<String>,
    /// The live value each binding in `needed_bindings`/`written_bindings`
    /// currently holds, as reported by the tracker. These are what the
    /// emitter serializes as a factory's call arguments when it wraps a
    /// node's body in a parameterized arrow (spec §4.5, §8 example 2).
    pub binding_values: HashMap<String, ValueId>,
    /// Consumers (function or value ids) attached directly at this node,
    /// i.e. this is the deepest node any of them needs.
    pub consumers: Vec<ValueId>,
}

/// The completed scope graph: every allocated node plus a lookup from frame
/// key to node id.
#[derive(Debug, Clone, Default)]
pub struct ScopeGraph {
    pub nodes: HashMap<ScopeNodeId, ScopeNode>,
    pub frame_to_node: HashMap<(BlockId, InstantiationId), ScopeNodeId>,
    /// Root nodes (no parent), in first-encounter order.
    pub roots: Vec<ScopeNodeId>,
}

impl ScopeGraph {
    pub fn node(&self, id: ScopeNodeId) -> Option<&ScopeNode> {
        self.nodes.get(&id)
    }

    pub fn node_for_frame(&self, block_id: BlockId, instantiation_id: InstantiationId) -> Option<&ScopeNode> {
        self.frame_to_node
            .get(&(block_id, instantiation_id))
            .and_then(|id| self.nodes.get(id))
    }
}
