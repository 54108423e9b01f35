//! Merge algorithm: allocate one `ScopeNode` per frame actually referenced,
//! link each to its parent frame's node, union-aggregate binding sets along
//! the way, and attach each consumer at the deepest node that needs it
//! (spec §4.3 steps 1-7). Structured the same way the teacher's
//! `scope_builder::analyze_scopes` threads a mutable `ScopeAnalysisContext`
//! across a sequence of functions rather than rebuilding the tree per call.

use std::collections::HashMap;

use crate::block::{BlockCatalog, BlockId, InstantiationId};
use crate::extractor::FunctionRecord;
use crate::value::ValueId;

use super::{ScopeGraph, ScopeGraphError, ScopeNode, ScopeNodeId};

#[derive(Default)]
pub struct ScopeGraphBuilder {
    graph: ScopeGraph,
    next_id: ScopeNodeId,
}

impl ScopeGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one function's extracted frame chain into the graph being
    /// built. Call once per `FunctionRecord`, in first-encounter order, to
    /// satisfy the determinism requirement (spec §4.3 "first-encounter-order
    /// determinism").
    pub fn merge(&mut self, record: &FunctionRecord, catalog: &BlockCatalog) -> Result<(), ScopeGraphError> {
        // allocate (or reuse) a node per frame, innermost first, linking
        // each to its parent as we walk outward.
        let mut child_id: Option<ScopeNodeId> = None;
        let mut deepest_needed: Option<ScopeNodeId> = None;

        for (depth, frame) in record.frame_chain.iter().enumerate() {
            let node_id = self.ensure_node(frame.block_id, frame.instantiation_id);

            if let Some(child) = child_id {
                self.link_child_to_parent(child, node_id);
            }

            self.union_bindings(node_id, &frame.read_names, &frame.written_names);
            self.union_binding_values(node_id, &frame.binding_values);

            // The placement rule: a consumer attaches at the deepest node
            // that actually needs a binding from it; depth 0 is always the
            // function's own declaring frame, so the first frame with any
            // needed binding — or depth 0 itself, per the missing-block
            // rule preserving currying levels even with nothing used — is
            // where we stop.
            if depth == 0 || !frame.read_names.is_empty() || !frame.written_names.is_empty() {
                if deepest_needed.is_none() {
                    deepest_needed = Some(node_id);
                }
            }

            child_id = Some(node_id);
        }

        let attach_at = deepest_needed
            .or(child_id)
            .ok_or(ScopeGraphError::UnattachedConsumer(record.value_id))?;

        self.graph
            .nodes
            .get_mut(&attach_at)
            .expect("node was just ensured")
            .consumers
            .push(record.value_id);

        let _ = catalog;
        Ok(())
    }

    fn ensure_node(&mut self, block_id: BlockId, instantiation_id: InstantiationId) -> ScopeNodeId {
        if let Some(&id) = self.graph.frame_to_node.get(&(block_id, instantiation_id)) {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.graph.nodes.insert(
            id,
            ScopeNode {
                id,
                block_id,
                instantiation_id,
                parent: None,
                children: Vec::new(),
                needed_bindings: Vec::new(),
                written_bindings: Vec::new(),
                binding_values: HashMap::new(),
                consumers: Vec::new(),
            },
        );
        self.graph.frame_to_node.insert((block_id, instantiation_id), id);
        self.graph.roots.push(id);
        id
    }

    fn link_child_to_parent(&mut self, child: ScopeNodeId, parent: ScopeNodeId) {
        let already_linked = self.graph.nodes.get(&child).and_then(|n| n.parent) == Some(parent);
        if already_linked {
            return;
        }

        if let Some(node) = self.graph.nodes.get_mut(&child) {
            if node.parent.is_none() {
                node.parent = Some(parent);
                // this child is no longer a root once it has a parent
                self.graph.roots.retain(|&id| id != child);
            }
        }

        if let Some(parent_node) = self.graph.nodes.get_mut(&parent) {
            if !parent_node.children.contains(&child) {
                parent_node.children.push(child);
            }
        }
    }

    fn union_bindings(&mut self, node_id: ScopeNodeId, reads: &[String], writes: &[String]) {
        if let Some(node) = self.graph.nodes.get_mut(&node_id) {
            for name in reads {
                if !node.needed_bindings.contains(name) {
                    node.needed_bindings.push(name.clone());
                }
            }
            for name in writes {
                if !node.written_bindings.contains(name) {
                    node.written_bindings.push(name.clone());
                }
            }
        }
    }

    /// Merges a frame's reported live binding values into the node's map.
    /// Later frames for the same node (e.g. a second function sharing the
    /// same outer frame) only fill in values not already recorded, since the
    /// live value of a binding at a given frame instantiation is the same
    /// regardless of which consumer is asking.
    fn union_binding_values(&mut self, node_id: ScopeNodeId, values: &HashMap<String, ValueId>) {
        if let Some(node) = self.graph.nodes.get_mut(&node_id) {
            for (name, value_id) in values {
                node.binding_values.entry(name.clone()).or_insert(*value_id);
            }
        }
    }

    pub fn finish(self) -> ScopeGraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockFlags, BlockInfo};
    use crate::extractor::FrameData;

    fn catalog() -> BlockCatalog {
        let mut map = HashMap::new();
        map.insert(0, BlockInfo { parent_block_id: None, declared_names: vec!["x".into()], flags: BlockFlags::default() });
        map.insert(1, BlockInfo { parent_block_id: Some(0), declared_names: vec![], flags: BlockFlags::default() });
        BlockCatalog(map)
    }

    #[test]
    fn single_function_single_frame_attaches_at_its_own_node() {
        let catalog = catalog();
        let record = FunctionRecord {
            value_id: 1,
            frame_chain: vec![FrameData {
                block_id: 0,
                instantiation_id: 1,
                read_names: vec!["x".into()],
                written_names: vec![],
                binding_values: HashMap::new(),
            }],
        };
        let mut builder = ScopeGraphBuilder::new();
        builder.merge(&record, &catalog).unwrap();
        let graph = builder.finish();
        let node = graph.node_for_frame(0, 1).unwrap();
        assert_eq!(node.consumers, vec![1]);
        assert_eq!(node.needed_bindings, vec!["x".to_string()]);
    }

    #[test]
    fn two_functions_sharing_outer_frame_link_as_children() {
        let catalog = catalog();
        let shared = FrameData {
            block_id: 0,
            instantiation_id: 1,
            read_names: vec!["x".into()],
            written_names: vec![],
            binding_values: HashMap::new(),
        };
        let record_a = FunctionRecord {
            value_id: 10,
            frame_chain: vec![
                FrameData { block_id: 1, instantiation_id: 1, read_names: vec![], written_names: vec![], binding_values: HashMap::new() },
                shared.clone(),
            ],
        };
        let record_b = FunctionRecord {
            value_id: 11,
            frame_chain: vec![
                FrameData { block_id: 1, instantiation_id: 2, read_names: vec![], written_names: vec![], binding_values: HashMap::new() },
                shared,
            ],
        };

        let mut builder = ScopeGraphBuilder::new();
        builder.merge(&record_a, &catalog).unwrap();
        builder.merge(&record_b, &catalog).unwrap();
        let graph = builder.finish();

        let outer = graph.node_for_frame(0, 1).unwrap();
        assert_eq!(outer.children.len(), 2);

        let child_a = graph.node_for_frame(1, 1).unwrap();
        assert_eq!(child_a.parent, Some(outer.id));
    }

    #[test]
    fn consumer_with_no_reads_or_writes_still_attaches_at_own_frame() {
        let catalog = catalog();
        let record = FunctionRecord {
            value_id: 99,
            frame_chain: vec![FrameData {
                block_id: 0,
                instantiation_id: 1,
                read_names: vec![],
                written_names: vec![],
                binding_values: HashMap::new(),
            }],
        };
        let mut builder = ScopeGraphBuilder::new();
        builder.merge(&record, &catalog).unwrap();
        let graph = builder.finish();
        let node = graph.node_for_frame(0, 1).unwrap();
        assert_eq!(node.consumers, vec![99]);
    }
}
