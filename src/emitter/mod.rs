//! # Emitter
//!
//! Turns an `EmissionPlan` plus the original value graph into printed
//! source text. Splits across `output_ast` (the small intermediate
//! representation), `printer` (precedence-aware text generation, grounded
//! on the teacher's `generator::printer`), `body_rewrite` (free-variable and
//! own-parameter renaming inside captured function text via `oxc_parser`),
//! and `descriptors` (property/prototype restoration ordering) — the same
//! separation of concerns the teacher keeps between `generator::mod`
//! (orchestration), `generator::printer` (text), and `generator::
//! source_maps` (a distinct structural concern bolted onto the same pass).
//!
//! Two passes run over the plan: `allocate_names` walks `plan.order`
//! bottom-up assigning every synthetic identifier this run will need (a
//! function's own parameters, and the captured-binding parameters each
//! scope node introduces) through the [`NameResolver`](crate::resolver::NameResolver)
//! before any text is built; then value resolution walks each function's
//! scope-node ancestor chain, wrapping its rewritten body in one
//! `OutputExpr::FactoryCall` per ancestor that supplies captured bindings
//! (spec §4.5/§4.6).

pub mod body_rewrite;
pub mod descriptors;
pub mod output_ast;
pub mod printer;

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::block::BlockCatalog;
use crate::config::SerializerConfig;
use crate::planner::{EmissionPlan, PlanNode};
use crate::resolver::{NameResolver, ResolverError};
use crate::scope_graph::{ScopeGraph, ScopeNode, ScopeNodeId};
use crate::value::{Descriptor, ObjectValue, Prototype, PropertyKey as ValuePropertyKey, Value, ValueId, ValueKind};

use body_rewrite::{own_parameter_names, rewrite_body, Rename};
use descriptors::{build_define_properties_entries, place_properties, PlacedProperty};
use output_ast::{OutputExpr, PropertyKeyExpr};
use printer::Printer;

#[derive(Debug, Error)]
pub enum EmitterError {
    #[error("value {0} referenced by the plan was not found in the value graph")]
    MissingValue(ValueId),
    #[error(transparent)]
    BodyRewrite(#[from] body_rewrite::BodyRewriteError),
    #[error(transparent)]
    Resolver(#[from] ResolverError),
}

/// Diagnostic information about one emission run, surfaced to the caller
/// alongside the printed text (spec §6 ambient observability — mirrors the
/// teacher's `GenerationResult { code, source_map, diagnostics }`).
#[derive(Debug, Clone, Default)]
pub struct EmitDiagnostics {
    pub factories_emitted: usize,
    pub trampolines_emitted: usize,
    pub setters_emitted: usize,
}

pub struct Emitter<'a> {
    config: &'a SerializerConfig,
    values: &'a HashMap<ValueId, Value>,
    graph: &'a ScopeGraph,
    #[allow(dead_code)]
    catalog: &'a BlockCatalog,
    resolver: NameResolver,

    /// Which scope node each function value is attached to (its own
    /// declaring frame), built once per run from the scope graph.
    value_to_node: HashMap<ValueId, ScopeNodeId>,
    /// Scope nodes the planner promoted to a trampoline.
    trampoline_nodes: HashSet<ScopeNodeId>,
    /// A function value's own declared-parameter renames, allocated in
    /// `allocate_names` (spec §4.6's "own scope" half of collision-freedom).
    own_params: HashMap<ValueId, Vec<Rename>>,
    /// Per scope node, the renamed name for every binding it introduces —
    /// either as a captured-binding factory parameter (ordinary nodes) or
    /// as a trampoline's internal mutable slot (trampoline nodes).
    captured: HashMap<ScopeNodeId, Vec<(String, String)>>,

    /// Values seen more than once (by the root graph or by any scope node's
    /// captured bindings) get hoisted into a named `const` instead of being
    /// re-derived at every reference (spec §6 "defines no free identifiers
    /// except host builtins" / §8 identity preservation).
    refcounts: HashMap<ValueId, usize>,
    hoisted: HashMap<ValueId, String>,
    preamble: Vec<(String, OutputExpr)>,

    /// Per trampoline node, the name of the hoisted IIFE array holding its
    /// setter closure(s) followed by its consumer bodies, allocated the
    /// first time any of its consumers is resolved.
    trampoline_hoist: HashMap<ScopeNodeId, String>,
    /// Setter-call statements the emitter infers on its own, for a node
    /// whose locally-captured binding's live value is one of its own
    /// consumers (a direct self-reference the planner's structural DFS
    /// doesn't see, since there's no second node to form a back edge
    /// through). Run right after the owning node's preamble const.
    auto_setters: Vec<OutputExpr>,
}

impl<'a> Emitter<'a> {
    pub fn new(config: &'a SerializerConfig, values: &'a HashMap<ValueId, Value>, graph: &'a ScopeGraph, catalog: &'a BlockCatalog) -> Self {
        let reserved = js_reserved_words();
        Self {
            config,
            values,
            graph,
            catalog,
            resolver: NameResolver::new(reserved),
            value_to_node: HashMap::new(),
            trampoline_nodes: HashSet::new(),
            own_params: HashMap::new(),
            captured: HashMap::new(),
            refcounts: HashMap::new(),
            hoisted: HashMap::new(),
            preamble: Vec::new(),
            trampoline_hoist: HashMap::new(),
            auto_setters: Vec::new(),
        }
    }

    /// Emits the full program text for `plan`, returning printed source and
    /// diagnostics.
    pub fn emit(&mut self, plan: &EmissionPlan, root_value: ValueId) -> Result<(String, EmitDiagnostics), EmitterError> {
        self.value_to_node = build_value_to_node(self.graph);
        self.trampoline_nodes = plan
            .order
            .iter()
            .filter_map(|entry| match entry {
                PlanNode::Trampoline { node_id, .. } => Some(*node_id),
                PlanNode::Factory { .. } => None,
            })
            .collect();

        self.allocate_names(plan)?;

        let mut visiting = HashSet::new();
        let mut refcounts = HashMap::new();
        self.count_value_refs(root_value, &mut refcounts, &mut visiting);
        for node in self.graph.nodes.values() {
            let mut values: Vec<ValueId> = node.binding_values.values().copied().collect();
            values.sort_unstable();
            for vid in values {
                self.count_value_refs(vid, &mut refcounts, &mut visiting);
            }
        }
        self.refcounts = refcounts;

        let mut diagnostics = EmitDiagnostics::default();
        for entry in &plan.order {
            match entry {
                PlanNode::Factory { .. } => diagnostics.factories_emitted += 1,
                PlanNode::Trampoline { .. } => diagnostics.trampolines_emitted += 1,
            }
        }

        let root_expr = self.resolve_value_expr(root_value)?;

        let mut statements = Vec::new();
        for setter in &plan.setters {
            let value_expr = self.resolve_value_expr(setter.source_value)?;
            let callee = match self.trampoline_hoist.get(&setter.target_node) {
                Some(name) => OutputExpr::Raw(format!("{name}[0]")),
                None => OutputExpr::Raw(format!("/* unresolved trampoline for node {} */", setter.target_node)),
            };
            statements.push(OutputExpr::FactoryCall { factory: Box::new(callee), args: vec![value_expr] });
        }
        diagnostics.setters_emitted = plan.setters.len();

        let mut all = Vec::new();
        for (name, expr) in &self.preamble {
            let rendered = Printer::new(self.config).print(expr);
            all.push(OutputExpr::Raw(format!("const {name}={rendered}")));
        }
        all.extend(self.auto_setters.drain(..));
        all.extend(statements);
        all.push(root_expr);

        let final_expr = if all.len() == 1 { all.into_iter().next().expect("len checked") } else { OutputExpr::Statements(all) };

        let printed = Printer::new(self.config).print(&final_expr);
        let wrapped = self.wrap_for_format(printed);
        Ok((wrapped, diagnostics))
    }

    fn wrap_for_format(&self, code: String) -> String {
        use crate::config::OutputFormat;
        match self.config.format {
            OutputFormat::Script => code,
            OutputFormat::Esm => format!("export default {code};"),
            OutputFormat::Cjs => format!("module.exports = {code};"),
        }
    }

    /// First pass: walks the plan bottom-up (children before the ancestors
    /// that supply them bindings, which is exactly how `plan.order` is
    /// already built) allocating every synthetic name this run needs. This
    /// is unconditional on `SerializerConfig::mangle` — factory parameters
    /// don't exist in the original source, so there's no "human-meaningful
    /// name" to prefer for them; the resolver's alphabet walk is the only
    /// naming scheme that applies (spec §4.6).
    fn allocate_names(&mut self, plan: &EmissionPlan) -> Result<(), EmitterError> {
        for entry in &plan.order {
            let node_id = match entry {
                PlanNode::Factory { node_id, .. } => *node_id,
                PlanNode::Trampoline { node_id, .. } => *node_id,
            };
            let Some(node) = self.graph.node(node_id) else { continue };

            for &consumer in &node.consumers {
                if let Some(Value { kind: ValueKind::Function(func), .. }) = self.values.get(&consumer) {
                    let params = own_parameter_names(&func.source_text)?;
                    if params.is_empty() {
                        continue;
                    }
                    let mut renames = Vec::with_capacity(params.len());
                    for original in params {
                        let allocated = self.allocate_name(&original)?;
                        renames.push(Rename { from: original, to: allocated });
                    }
                    self.own_params.insert(consumer, renames);
                }
            }

            let mut names: Vec<String> = node.needed_bindings.clone();
            for written in &node.written_bindings {
                if !names.contains(written) {
                    names.push(written.clone());
                }
            }
            if names.is_empty() {
                continue;
            }
            let mut list = Vec::with_capacity(names.len());
            for name in names {
                let allocated = self.allocate_name(&name)?;
                list.push((name, allocated));
            }
            self.captured.insert(node_id, list);
        }
        Ok(())
    }

    /// Allocates a name for a binding with a known source-level identity.
    /// With mangling on, every name goes through the plain alphabet walk;
    /// with it off, the original name is kept verbatim when free (spec'd
    /// numeric-suffix fallback on clash), matching the contract
    /// `NameResolver::allocate_preferring` documents. Purely synthetic
    /// names with no source counterpart (setter parameters, hoisted
    /// trampoline arrays) always go through the plain walk instead.
    fn allocate_name(&mut self, preferred: &str) -> Result<String, EmitterError> {
        if self.config.mangle {
            Ok(self.resolver.allocate()?)
        } else {
            Ok(self.resolver.allocate_preferring(preferred)?)
        }
    }

    fn resolve_value_expr(&mut self, value_id: ValueId) -> Result<OutputExpr, EmitterError> {
        if let Some(name) = self.hoisted.get(&value_id) {
            return Ok(OutputExpr::Ident(name.clone()));
        }

        let needs_hoist = self.refcounts.get(&value_id).copied().unwrap_or(0) > 1;
        if needs_hoist {
            // Reserve the name and mark it hoisted *before* recursing, so a
            // value reachable from its own construction (a direct cycle)
            // resolves to this identifier instead of recursing forever.
            let name = self.resolver.allocate()?;
            self.hoisted.insert(value_id, name.clone());
            let expr = self.build_value_expr(value_id)?;
            self.preamble.push((name.clone(), expr));
            Ok(OutputExpr::Ident(name))
        } else {
            self.build_value_expr(value_id)
        }
    }

    fn build_value_expr(&mut self, value_id: ValueId) -> Result<OutputExpr, EmitterError> {
        let value = self.values.get(&value_id).ok_or(EmitterError::MissingValue(value_id))?;

        match &value.kind {
            ValueKind::Function(func) => {
                let func = func.clone();
                self.emit_function(value_id, &func)
            }
            ValueKind::Object(object) => {
                let object = object.clone();
                self.emit_object(value_id, &object)
            }
            ValueKind::Undefined => Ok(OutputExpr::Raw("undefined".into())),
            ValueKind::Null => Ok(OutputExpr::Raw("null".into())),
            ValueKind::Boolean(b) => Ok(OutputExpr::Raw(b.to_string())),
            ValueKind::Number(n) => Ok(OutputExpr::Raw(canonicalize_number(*n))),
            ValueKind::String(s) => Ok(OutputExpr::Raw(format!("\"{}\"", escape_for_literal(s)))),
            ValueKind::BigInt(digits) => Ok(OutputExpr::Raw(format!("{digits}n"))),
            _ => Ok(OutputExpr::Raw("/* unsupported value kind */".into())),
        }
    }

    fn emit_function(&mut self, value_id: ValueId, func: &crate::value::FunctionValue) -> Result<OutputExpr, EmitterError> {
        let node_id = self.value_to_node.get(&value_id).copied();

        if let Some(nid) = node_id {
            // A node with its own captured bindings is routed through the
            // shared-array construction too, even when the planner didn't
            // classify it as a formal trampoline: a consumer attaching at
            // the very node that supplies its free variables (mutual
            // recursion sharing one frame, a function closing over itself)
            // needs the same "build as a slot, then reference by index"
            // treatment — there's simply no ancestor to hand the binding
            // in as a factory argument.
            if self.trampoline_nodes.contains(&nid) || self.captured.contains_key(&nid) {
                return self.resolve_trampoline_consumer(nid, value_id);
            }
        }

        let mut renames: Vec<Rename> = self.own_params.get(&value_id).cloned().unwrap_or_default();

        let mut ancestors = Vec::new();
        let mut cursor = node_id.and_then(|id| self.graph.node(id)).and_then(|n| n.parent);
        while let Some(ancestor_id) = cursor {
            ancestors.push(ancestor_id);
            cursor = self.graph.node(ancestor_id).and_then(|n| n.parent);
        }

        for &ancestor_id in &ancestors {
            if let Some(list) = self.captured.get(&ancestor_id) {
                for (from, to) in list {
                    renames.push(Rename { from: from.clone(), to: to.clone() });
                }
            }
        }

        let rewritten = rewrite_body(&func.source_text, &renames)?;
        let mut expr = OutputExpr::Raw(rewritten);

        for &ancestor_id in &ancestors {
            let Some(list) = self.captured.get(&ancestor_id).cloned() else { continue };
            if list.is_empty() {
                continue;
            }
            let params: Vec<String> = list.iter().map(|(_, to)| to.clone()).collect();
            let binding_values = self.graph.node(ancestor_id).map(|n| n.binding_values.clone()).unwrap_or_default();
            let mut args = Vec::with_capacity(list.len());
            for (original, _) in &list {
                let arg = match binding_values.get(original) {
                    Some(&vid) => self.resolve_value_expr(vid)?,
                    None => OutputExpr::Raw("undefined".into()),
                };
                args.push(arg);
            }
            expr = OutputExpr::FactoryCall { factory: Box::new(OutputExpr::Factory { params, body: Box::new(expr) }), args };
        }

        Ok(expr)
    }

    /// Builds (once per trampoline node, cached thereafter) the shared IIFE
    /// holding that node's deferred-binding setter closures followed by its
    /// consumer bodies, matching the shape of spec §8's mutual-closure and
    /// cyclic-object examples: `(a=>[b=>a=b,()=>a,...])()`. Every consumer
    /// attached to the node resolves to an index into this one hoisted
    /// result rather than re-emitting the IIFE per reference.
    fn resolve_trampoline_consumer(&mut self, node_id: ScopeNodeId, value_id: ValueId) -> Result<OutputExpr, EmitterError> {
        if let Some(name) = self.trampoline_hoist.get(&node_id) {
            let index = self.consumer_index(node_id, value_id);
            return Ok(OutputExpr::Raw(format!("{name}[{index}]")));
        }

        let node = self.graph.node(node_id).cloned().expect("trampoline node was just looked up");
        let local_renames = self.captured.get(&node_id).cloned().unwrap_or_default();

        let mut elements = Vec::new();
        for (_, slot) in &local_renames {
            let setter_param = self.resolver.allocate()?;
            elements.push(OutputExpr::Raw(format!("{setter_param}=>{slot}={setter_param}")));
        }
        for &consumer in &node.consumers {
            if let Some(Value { kind: ValueKind::Function(func), .. }) = self.values.get(&consumer) {
                let mut renames: Vec<Rename> = self.own_params.get(&consumer).cloned().unwrap_or_default();
                for (from, to) in &local_renames {
                    renames.push(Rename { from: from.clone(), to: to.clone() });
                }
                let rewritten = rewrite_body(&func.source_text, &renames)?;
                elements.push(OutputExpr::Raw(rewritten));
            }
        }

        let params: Vec<String> = local_renames.iter().map(|(_, to)| to.clone()).collect();
        let rendered_elements = elements.iter().map(|e| Printer::new(self.config).print(e)).collect::<Vec<_>>().join(",");
        let body = OutputExpr::Raw(format!("[{rendered_elements}]"));
        let factory = OutputExpr::Factory { params, body: Box::new(body) };
        let iife = OutputExpr::FactoryCall { factory: Box::new(factory), args: Vec::new() };

        let name = self.resolver.allocate()?;
        self.trampoline_hoist.insert(node_id, name.clone());
        self.preamble.push((name.clone(), iife));

        // Every locally-captured binding is a setter-initialized slot, since
        // there's no ancestor to hand it in as a factory argument (this
        // node *is* where the binding lives). Wire each one shut right
        // after construction rather than waiting on a planner-issued
        // setter call, which only exists for cycles spanning two or more
        // scope nodes. A binding whose live value is one of this node's own
        // consumers (mutual recursion, direct self-reference) resolves by
        // index into the same array instead of recursing back through
        // `resolve_value_expr`, which would otherwise re-enter construction
        // still in progress.
        for (setter_index, (original, _)) in local_renames.iter().enumerate() {
            let Some(&target_value) = node.binding_values.get(original) else { continue };
            let rhs = match node.consumers.iter().position(|&v| v == target_value) {
                Some(consumer_position) => {
                    let target_index = local_renames.len() + consumer_position;
                    OutputExpr::Raw(format!("{name}[{target_index}]"))
                }
                None => self.resolve_value_expr(target_value)?,
            };
            self.auto_setters.push(OutputExpr::FactoryCall {
                factory: Box::new(OutputExpr::Raw(format!("{name}[{setter_index}]"))),
                args: vec![rhs],
            });
        }

        let index = self.consumer_index(node_id, value_id);
        Ok(OutputExpr::Raw(format!("{name}[{index}]")))
    }

    /// A trampoline's array holds one setter per deferred binding before
    /// its consumers, so a consumer's index in the final array is offset
    /// past those setter slots.
    fn consumer_index(&self, node_id: ScopeNodeId, value_id: ValueId) -> usize {
        let node = self.graph.node(node_id).expect("trampoline node exists");
        let setter_count = self.captured.get(&node_id).map(Vec::len).unwrap_or(0);
        let position = node.consumers.iter().position(|&v| v == value_id).unwrap_or(0);
        setter_count + position
    }

    fn emit_object(&mut self, _value_id: ValueId, object: &ObjectValue) -> Result<OutputExpr, EmitterError> {
        let placed = place_properties(object);

        let mut needed = Vec::new();
        for p in &placed {
            match p {
                PlacedProperty::Literal { value, .. } => needed.push(*value),
                PlacedProperty::Explicit { key, descriptor } => {
                    if let ValuePropertyKey::Symbol(id) = key {
                        needed.push(*id);
                    }
                    match descriptor {
                        Descriptor::Data { value, .. } => needed.push(*value),
                        Descriptor::Accessor { getter, setter, .. } => {
                            if let Some(g) = getter {
                                needed.push(*g);
                            }
                            if let Some(s) = setter {
                                needed.push(*s);
                            }
                        }
                    }
                }
            }
        }

        let mut resolved: HashMap<ValueId, OutputExpr> = HashMap::new();
        for id in needed {
            if let std::collections::hash_map::Entry::Vacant(slot) = resolved.entry(id) {
                let expr = self.resolve_value_expr(id)?;
                slot.insert(expr);
            }
        }

        let mut literal_entries = Vec::new();
        for p in &placed {
            if let PlacedProperty::Literal { key, value } = p {
                let key_expr = match key {
                    ValuePropertyKey::String(s) => PropertyKeyExpr::StringLiteral(s.clone()),
                    ValuePropertyKey::Symbol(id) => PropertyKeyExpr::SymbolRef(Box::new(
                        resolved.get(id).cloned().unwrap_or(OutputExpr::Raw("undefined".into())),
                    )),
                };
                let value_expr = resolved.get(value).cloned().unwrap_or(OutputExpr::Raw("undefined".into()));
                literal_entries.push((key_expr, value_expr));
            }
        }

        let mut rendered = String::from("{");
        for (i, (key, value)) in literal_entries.iter().enumerate() {
            if i > 0 {
                rendered.push(',');
            }
            match key {
                PropertyKeyExpr::StringLiteral(s) => rendered.push_str(&format!("\"{}\":", escape_for_literal(s))),
                PropertyKeyExpr::NumberLiteral(n) => rendered.push_str(&format!("{n}:")),
                PropertyKeyExpr::SymbolRef(_) => rendered.push_str("/* symbol key */:"),
            }
            rendered.push_str(&Printer::new(self.config).print(value));
        }
        rendered.push('}');

        let literal = OutputExpr::Raw(rendered);
        let entries = build_define_properties_entries(&placed, &|id| {
            resolved.get(&id).cloned().unwrap_or(OutputExpr::Raw("undefined".into()))
        });

        let with_prototype = match &object.prototype {
            Prototype::Explicit(proto_id) => {
                let proto_expr = self.resolve_value_expr(*proto_id)?;
                OutputExpr::SetPrototypeOf { target: Box::new(literal), prototype: Box::new(proto_expr) }
            }
            Prototype::Null => OutputExpr::SetPrototypeOf { target: Box::new(literal), prototype: Box::new(OutputExpr::Raw("null".into())) },
            Prototype::Implicit => literal,
        };

        if entries.is_empty() {
            Ok(with_prototype)
        } else {
            Ok(OutputExpr::DefineProperties { target: Box::new(with_prototype), entries })
        }
    }

    /// Counts every reachable reference to `value_id`, including the one
    /// back through itself in a cyclic graph. Recursion stops the second
    /// time a value is seen mid-descent so a cycle terminates instead of
    /// looping forever, while still recording that the cyclic reference
    /// happened (spec §8 identity/cycle preservation needs this count to
    /// decide what gets hoisted into a shared `const`).
    fn count_value_refs(&self, value_id: ValueId, counts: &mut HashMap<ValueId, usize>, visiting: &mut HashSet<ValueId>) {
        *counts.entry(value_id).or_insert(0) += 1;
        if !visiting.insert(value_id) {
            return;
        }
        if let Some(Value { kind: ValueKind::Object(object), .. }) = self.values.get(&value_id) {
            for (_, prop) in &object.indexed_properties {
                self.count_descriptor_refs(&prop.descriptor, counts, visiting);
            }
            for (key, prop) in &object.named_properties {
                if let ValuePropertyKey::Symbol(id) = key {
                    self.count_value_refs(*id, counts, visiting);
                }
                self.count_descriptor_refs(&prop.descriptor, counts, visiting);
            }
            if let Prototype::Explicit(id) = &object.prototype {
                self.count_value_refs(*id, counts, visiting);
            }
        }
        visiting.remove(&value_id);
    }

    fn count_descriptor_refs(&self, descriptor: &Descriptor, counts: &mut HashMap<ValueId, usize>, visiting: &mut HashSet<ValueId>) {
        match descriptor {
            Descriptor::Data { value, .. } => self.count_value_refs(*value, counts, visiting),
            Descriptor::Accessor { getter, setter, .. } => {
                if let Some(g) = getter {
                    self.count_value_refs(*g, counts, visiting);
                }
                if let Some(s) = setter {
                    self.count_value_refs(*s, counts, visiting);
                }
            }
        }
    }
}

fn build_value_to_node(graph: &ScopeGraph) -> HashMap<ValueId, ScopeNodeId> {
    let mut map = HashMap::new();
    for node in graph.nodes.values() {
        for &consumer in &node.consumers {
            map.insert(consumer, node.id);
        }
    }
    map
}

fn canonicalize_number(n: f64) -> String {
    if n == n.trunc() && n.is_finite() && n.abs() < 1e21 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn escape_for_literal(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn js_reserved_words() -> Vec<String> {
    [
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do", "else",
        "export", "extends", "finally", "for", "function", "if", "import", "in", "instanceof", "new", "return",
        "super", "switch", "this", "throw", "try", "typeof", "var", "void", "while", "with", "yield", "let",
        "static", "await", "async", "null", "true", "false",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_integer_floats_without_decimal_point() {
        assert_eq!(canonicalize_number(3.0), "3");
        assert_eq!(canonicalize_number(3.5), "3.5");
    }

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(escape_for_literal("a\"b\\c"), "a\\\"b\\\\c");
    }

    #[test]
    fn reserved_words_include_common_keywords() {
        let reserved = js_reserved_words();
        assert!(reserved.contains(&"function".to_string()));
        assert!(reserved.contains(&"await".to_string()));
    }
}
