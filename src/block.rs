//! # Block Catalog
//!
//! A **Block** is a lexical region in the input program with a stable
//! identifier emitted by instrumentation (spec §3, §6). The block catalog is
//! a read-only map produced once at module load and consumed by the
//! extractor and scope graph builder; it never changes during a
//! serialization run, the same way the teacher's `ScopeTree` is built once
//! up front and only read during later phases.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Stable identifier for a lexical block, assigned by instrumentation.
pub type BlockId = u32;

/// Stable identifier for one runtime instantiation of a block.
pub type InstantiationId = u32;

/// A `(block, instantiation)` pair identifying one Scope Frame.
pub type ScopeFrameKey = (BlockId, InstantiationId);

/// Read-only, load-time map of block metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockCatalog(pub HashMap<BlockId, BlockInfo>);

impl BlockCatalog {
    pub fn get(&self, block_id: BlockId) -> Option<&BlockInfo> {
        self.0.get(&block_id)
    }

    /// Walks from `block_id` up through `parent_block_id` links, innermost
    /// first, as the scope graph builder needs when linking child nodes to
    /// their enclosing frame (spec §4.3 step 2).
    pub fn ancestor_chain(&self, block_id: BlockId) -> Vec<BlockId> {
        let mut chain = Vec::new();
        let mut current = Some(block_id);
        while let Some(id) = current {
            chain.push(id);
            current = self.get(id).and_then(|info| info.parent_block_id);
        }
        chain
    }
}

/// Metadata for one block, as supplied by the instrumentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockInfo {
    pub parent_block_id: Option<BlockId>,
    pub declared_names: Vec<String>,
    pub flags: BlockFlags,
}

/// Structural flags about a block, used to decide scope shape during
/// emission (e.g. whether an intermediate currying level is needed per the
/// missing-block rule, spec §4.3 step 7).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BlockFlags {
    pub is_function_body: bool,
    pub is_catch_clause: bool,
    pub is_loop_body: bool,
    pub is_class_body: bool,
}

/// A named slot inside a block (spec §3 "Binding").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    /// Some closing function reads this binding.
    pub read: bool,
    /// Some closing function writes this binding.
    pub written: bool,
    pub is_const: bool,
    pub is_function_expression_name: bool,
    pub is_caught_error: bool,
    pub is_loop_var: bool,
    /// Multiple functions from different loop iterations each close over
    /// their own per-iteration copy of this binding.
    pub has_sibling_capture: bool,
}

impl Binding {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read: false,
            written: false,
            is_const: false,
            is_function_expression_name: false,
            is_caught_error: false,
            is_loop_var: false,
            has_sibling_capture: false,
        }
    }

    /// A binding that is only ever read can be passed by value as a factory
    /// parameter; a binding written by at least one descendant must be
    /// materialized as shared mutable state (spec §4.3 step 4).
    pub fn needs_shared_cell(&self) -> bool {
        self.written
    }
}
