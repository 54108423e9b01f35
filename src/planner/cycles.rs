//! Back-edge detection and trampoline promotion. Walks the scope graph as a
//! DFS, tracking which nodes are "currently on the stack" the same way the
//! teacher's `RollbackManager` tracks which checkpoints are currently open —
//! a node revisited while still on the stack is a back edge, and the node
//! it points to is promoted to a trampoline so construction can proceed
//! without a forward reference to a value that doesn't exist yet.

use std::collections::{HashMap, HashSet};

use crate::scope_graph::{ScopeGraph, ScopeNodeId};

use super::{PlanNode, PlannerError, SetterCall};

pub struct CycleBreaker<'a> {
    graph: &'a ScopeGraph,
    on_stack: HashSet<ScopeNodeId>,
    finished: HashSet<ScopeNodeId>,
    trampolined: HashSet<ScopeNodeId>,
    setters: Vec<SetterCall>,
}

impl<'a> CycleBreaker<'a> {
    pub fn new(graph: &'a ScopeGraph) -> Self {
        Self {
            graph,
            on_stack: HashSet::new(),
            finished: HashSet::new(),
            trampolined: HashSet::new(),
            setters: Vec::new(),
        }
    }

    /// Visits `node_id` and all of its unvisited children, appending a
    /// `PlanNode` entry in post-order (parents depend on children having
    /// already been planned, matching how an outer factory's body
    /// references the inner ones it constructs).
    pub fn visit(
        &mut self,
        node_id: ScopeNodeId,
        order: &mut Vec<PlanNode>,
        visited_index: &mut HashMap<ScopeNodeId, usize>,
    ) -> Result<(), PlannerError> {
        if self.finished.contains(&node_id) {
            return Ok(());
        }

        if self.on_stack.contains(&node_id) {
            // back edge: this node is reachable from itself through a
            // child still being visited. Promote it to a trampoline so its
            // cyclic bindings are deferred to a setter call instead of
            // requiring the value to exist at construction time.
            self.trampolined.insert(node_id);
            return Ok(());
        }

        self.on_stack.insert(node_id);

        let node = self.graph.node(node_id).ok_or(PlannerError::UnplacedNode(node_id))?;
        let mut depends_on = Vec::new();

        for &child in &node.children {
            self.visit(child, order, visited_index)?;
            if let Some(&idx) = visited_index.get(&child) {
                depends_on.push(idx);
            }
        }

        self.on_stack.remove(&node_id);
        self.finished.insert(node_id);

        let plan_entry = if self.trampolined.contains(&node_id) {
            let deferred_bindings = node.written_bindings.clone();
            for binding in &deferred_bindings {
                for &consumer in &node.consumers {
                    self.setters.push(SetterCall {
                        target_node: node_id,
                        binding: binding.clone(),
                        source_value: consumer,
                    });
                }
            }
            PlanNode::Trampoline { node_id, deferred_bindings, depends_on }
        } else {
            PlanNode::Factory { node_id, depends_on }
        };

        let idx = order.len();
        order.push(plan_entry);
        visited_index.insert(node_id, idx);

        Ok(())
    }

    /// Setter calls accumulated while breaking cycles, in the stable order
    /// they were discovered (spec §4.4 "stable setter injection order").
    pub fn into_setters(self) -> Vec<SetterCall> {
        self.setters
    }
}
