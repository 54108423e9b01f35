//! # Dependency Planner & Cycle Breaker
//!
//! Walks the scope graph in DFS post-order to produce an `EmissionPlan`: the
//! order factories must be emitted in, which ones need to be split into a
//! trampoline to break a cycle, and the stable order setter calls must run
//! in afterward (spec §4.4). Grounded on the teacher's
//! `transformer::rollback::RollbackManager`, which tracks a checkpoint stack
//! to know what's "currently open" the same way this planner tracks the
//! current DFS path to detect back edges.

pub mod cycles;

use std::collections::HashMap;

use thiserror::Error;

use crate::scope_graph::{ScopeGraph, ScopeNodeId};
use crate::value::ValueId;

pub use cycles::CycleBreaker;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("scope node {0} appears in the emission plan with no resolved position")]
    UnplacedNode(ScopeNodeId),
    #[error("cycle through node {0} could not be broken by any trampoline promotion")]
    UnbreakableCycle(ScopeNodeId),
}

/// One step of the emission plan: either a plain factory materializing a
/// scope node directly, or a trampoline that defers some of its bindings to
/// a setter call once its targets exist.
#[derive(Debug, Clone)]
pub enum PlanNode {
    Factory {
        node_id: ScopeNodeId,
        /// Other plan positions (by index into `EmissionPlan::order`) this
        /// factory's construction depends on.
        depends_on: Vec<usize>,
    },
    Trampoline {
        node_id: ScopeNodeId,
        /// Bindings that can't be supplied at construction time because
        /// they close a cycle; these are filled in later via a setter call.
        deferred_bindings: Vec<String>,
        depends_on: Vec<usize>,
    },
}

/// The finished plan: a topologically valid construction order plus the
/// setter calls that must run after every factory/trampoline has been
/// constructed, in a stable order (spec §4.4 "stable setter injection
/// order").
#[derive(Debug, Clone, Default)]
pub struct EmissionPlan {
    pub order: Vec<PlanNode>,
    pub setters: Vec<SetterCall>,
}

/// A deferred assignment emitted after construction to close a cycle:
/// `<node>.<binding> = <value>`.
#[derive(Debug, Clone)]
pub struct SetterCall {
    pub target_node: ScopeNodeId,
    pub binding: String,
    pub source_value: ValueId,
}

/// Runs the DFS post-order walk over `graph`, promoting back-edges to
/// trampolines, and returns the finished plan.
pub struct Planner<'a> {
    graph: &'a ScopeGraph,
}

impl<'a> Planner<'a> {
    pub fn new(graph: &'a ScopeGraph) -> Self {
        Self { graph }
    }

    pub fn plan(&self) -> Result<EmissionPlan, PlannerError> {
        let mut breaker = CycleBreaker::new(self.graph);
        let mut visited_index: HashMap<ScopeNodeId, usize> = HashMap::new();
        let mut order = Vec::new();

        // roots are already in first-encounter order (the builder appends
        // them as it allocates nodes), which is what the determinism
        // requirement needs here.
        for root in self.graph.roots.iter() {
            breaker.visit(*root, &mut order, &mut visited_index)?;
        }

        Ok(EmissionPlan { order, setters: breaker.into_setters() })
    }
}
