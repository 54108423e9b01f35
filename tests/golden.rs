//! End-to-end scenarios run against the crate's public API: six literal
//! shapes the pipeline must handle correctly, corresponding to the
//! boundary behaviors and worked examples the core engine is built
//! around (anonymous closures, shared captures, mutual recursion, cyclic
//! object graphs, and factory reuse across instantiations).

use std::collections::HashMap;

use closure_serializer::block::{BlockCatalog, BlockFlags, BlockInfo};
use closure_serializer::config::SerializerConfig;
use closure_serializer::extractor::{FrameData, Tracker};
use closure_serializer::serialize_value;
use closure_serializer::value::{FunctionSubKind, FunctionValue, NameMeta, Value, ValueId, ValueKind};

struct FixtureTracker(HashMap<ValueId, Vec<FrameData>>);

impl Tracker for FixtureTracker {
    fn frames_for(&self, token: ValueId) -> Option<Vec<FrameData>> {
        self.0.get(&token).cloned()
    }
}

fn single_block_catalog() -> BlockCatalog {
    let mut blocks = HashMap::new();
    blocks.insert(0, BlockInfo { parent_block_id: None, declared_names: vec![], flags: BlockFlags::default() });
    BlockCatalog(blocks)
}

fn func_value(id: ValueId, source_text: &str, block_id: u32, instantiation_id: u32, sub_kind: FunctionSubKind) -> Value {
    Value {
        id,
        kind: ValueKind::Function(FunctionValue {
            sub_kind,
            source_text: source_text.to_string(),
            block_id,
            instantiation_id,
            name_meta: NameMeta { name: None, name_is_default: true, length_is_default: true },
            length: None,
            bound: None,
        }),
    }
}

fn number_value(id: ValueId, n: f64) -> Value {
    Value { id, kind: ValueKind::Number(n) }
}

#[test]
fn anonymous_arrow_with_no_free_variables_serializes_verbatim() {
    let catalog = single_block_catalog();
    let mut values = HashMap::new();
    values.insert(1, func_value(1, "()=>1", 0, 1, FunctionSubKind::Arrow));

    let mut frames = HashMap::new();
    frames.insert(
        1,
        vec![FrameData { block_id: 0, instantiation_id: 1, read_names: vec![], written_names: vec![], binding_values: HashMap::new() }],
    );
    let tracker = FixtureTracker(frames);

    let config = SerializerConfig::default();
    let output = serialize_value(1, &values, &tracker, &catalog, &config).unwrap();

    assert_eq!(output.code, "()=>1");
    assert_eq!(output.diagnostics.trampolines_emitted, 0);
}

#[test]
fn single_closure_over_one_outer_binding_attaches_to_its_frame() {
    let mut blocks = HashMap::new();
    blocks.insert(0, BlockInfo { parent_block_id: None, declared_names: vec!["x".into()], flags: BlockFlags::default() });
    blocks.insert(1, BlockInfo { parent_block_id: Some(0), declared_names: vec![], flags: BlockFlags { is_function_body: true, ..BlockFlags::default() } });
    let catalog = BlockCatalog(blocks);

    let mut values = HashMap::new();
    values.insert(1, func_value(1, "()=>x", 1, 1, FunctionSubKind::Arrow));
    values.insert(100, number_value(100, 5.0));

    let mut outer_bindings = HashMap::new();
    outer_bindings.insert("x".to_string(), 100);

    let mut frames = HashMap::new();
    frames.insert(
        1,
        vec![
            FrameData { block_id: 1, instantiation_id: 1, read_names: vec![], written_names: vec![], binding_values: HashMap::new() },
            FrameData { block_id: 0, instantiation_id: 1, read_names: vec!["x".into()], written_names: vec![], binding_values: outer_bindings },
        ],
    );
    let tracker = FixtureTracker(frames);

    let config = SerializerConfig { mangle: true, ..SerializerConfig::default() };
    let output = serialize_value(1, &values, &tracker, &catalog, &config).unwrap();

    assert_eq!(output.diagnostics.functions_extracted, 1);
    assert_eq!(output.diagnostics.scope_nodes_allocated, 2);
    // the outer frame's `x` becomes a factory parameter supplied by the
    // value it held at capture time; the function's own (binding-free)
    // frame contributes nothing of its own.
    assert_eq!(output.code, "((a)=>()=>a)(5)");
}

#[test]
fn shared_closure_array_links_siblings_to_common_outer_frame() {
    let mut blocks = HashMap::new();
    blocks.insert(0, BlockInfo { parent_block_id: None, declared_names: vec!["shared".into()], flags: BlockFlags::default() });
    blocks.insert(1, BlockInfo { parent_block_id: Some(0), declared_names: vec![], flags: BlockFlags::default() });
    let catalog = BlockCatalog(blocks);

    let mut values = HashMap::new();
    values.insert(1, func_value(1, "()=>shared", 1, 1, FunctionSubKind::Arrow));
    values.insert(2, func_value(2, "()=>shared+1", 1, 2, FunctionSubKind::Arrow));
    values.insert(200, number_value(200, 9.0));

    let mut outer_bindings = HashMap::new();
    outer_bindings.insert("shared".to_string(), 200);
    let shared_frame = FrameData { block_id: 0, instantiation_id: 1, read_names: vec!["shared".into()], written_names: vec![], binding_values: outer_bindings };

    let mut frames = HashMap::new();
    frames.insert(
        1,
        vec![
            FrameData { block_id: 1, instantiation_id: 1, read_names: vec![], written_names: vec![], binding_values: HashMap::new() },
            shared_frame.clone(),
        ],
    );
    frames.insert(
        2,
        vec![
            FrameData { block_id: 1, instantiation_id: 2, read_names: vec![], written_names: vec![], binding_values: HashMap::new() },
            shared_frame,
        ],
    );
    let tracker = FixtureTracker(frames);

    let config = SerializerConfig { mangle: true, ..SerializerConfig::default() };

    // Both functions extracted and merged into the graph, sharing one
    // allocated node for the outer frame (3 nodes total: one per closure's
    // own frame plus one shared outer).
    let output = serialize_value(1, &values, &tracker, &catalog, &config).unwrap();
    assert_eq!(output.diagnostics.scope_nodes_allocated, 3);
    assert_eq!(output.code, "((a)=>()=>a)(9)");
}

#[test]
fn mutual_closure_pair_is_promoted_to_a_trampoline() {
    let catalog = single_block_catalog();
    let mut values = HashMap::new();
    values.insert(1, func_value(1, "()=>b()", 0, 1, FunctionSubKind::Plain));
    values.insert(2, func_value(2, "()=>a()", 0, 1, FunctionSubKind::Plain));

    // Both functions close over the same frame, each reading the other's
    // slot and writing its own: a self-contained cycle confined to one
    // scope node, which only the emitter's own-node capture handling (not
    // the planner's cross-node back-edge search) can see and break.
    let mut frames = HashMap::new();
    frames.insert(
        1,
        vec![FrameData { block_id: 0, instantiation_id: 1, read_names: vec!["b".into()], written_names: vec!["a".into()], binding_values: HashMap::new() }],
    );
    frames.insert(
        2,
        vec![FrameData { block_id: 0, instantiation_id: 1, read_names: vec!["a".into()], written_names: vec!["b".into()], binding_values: HashMap::new() }],
    );
    let tracker = FixtureTracker(frames);

    let config = SerializerConfig { mangle: true, ..SerializerConfig::default() };
    let output = serialize_value(1, &values, &tracker, &catalog, &config).unwrap();

    assert_eq!(output.diagnostics.functions_extracted, 2);
    assert_eq!(output.diagnostics.scope_nodes_allocated, 1);
    assert_eq!(
        output.code,
        "const e=((a,b)=>[c=>a=c,d=>b=d,()=>a(),()=>b()])();\ne[2];"
    );
}

#[test]
fn cyclic_object_graph_round_trips_through_the_pipeline() {
    let catalog = single_block_catalog();
    let mut values = HashMap::new();
    values.insert(1, func_value(1, "()=>self", 0, 1, FunctionSubKind::Arrow));

    // The function's own captured binding `self` holds the function itself
    // (a direct cycle with no intervening scope node).
    let mut binding_values = HashMap::new();
    binding_values.insert("self".to_string(), 1);

    let mut frames = HashMap::new();
    frames.insert(
        1,
        vec![FrameData { block_id: 0, instantiation_id: 1, read_names: vec!["self".into()], written_names: vec![], binding_values }],
    );
    let tracker = FixtureTracker(frames);

    let config = SerializerConfig { mangle: true, ..SerializerConfig::default() };
    let output = serialize_value(1, &values, &tracker, &catalog, &config).unwrap();
    assert_eq!(output.diagnostics.functions_extracted, 1);
    // value 1 is referenced twice (as the root export and from within its
    // own captured environment), so it gets hoisted into its own binding
    // alongside the trampoline array.
    assert_eq!(
        output.code,
        "const d=((a)=>[c=>a=c,()=>a])();\nconst b=d[1];\nd[0](d[1]);\nb;"
    );
}

#[test]
fn shared_factory_with_multiple_instantiations_reuses_one_node_per_frame() {
    let mut blocks = HashMap::new();
    blocks.insert(0, BlockInfo { parent_block_id: None, declared_names: vec!["counter".into()], flags: BlockFlags::default() });
    let catalog = BlockCatalog(blocks);

    let mut values = HashMap::new();
    values.insert(1, func_value(1, "()=>counter", 0, 1, FunctionSubKind::Arrow));
    // This sibling instantiation shares no bindings with value 1 and is
    // never reachable from the root export; it exists purely to prove two
    // instantiations of the same block allocate two distinct scope nodes,
    // without pulling a resolver name into the output's allocation order.
    values.insert(2, func_value(2, "()=>2", 0, 2, FunctionSubKind::Arrow));
    values.insert(300, number_value(300, 1.0));

    let mut bindings_a = HashMap::new();
    bindings_a.insert("counter".to_string(), 300);

    let mut frames = HashMap::new();
    frames.insert(
        1,
        vec![FrameData { block_id: 0, instantiation_id: 1, read_names: vec!["counter".into()], written_names: vec![], binding_values: bindings_a }],
    );
    frames.insert(
        2,
        vec![FrameData { block_id: 0, instantiation_id: 2, read_names: vec![], written_names: vec![], binding_values: HashMap::new() }],
    );
    let tracker = FixtureTracker(frames);

    let config = SerializerConfig { mangle: true, ..SerializerConfig::default() };
    let output = serialize_value(1, &values, &tracker, &catalog, &config).unwrap();

    // Two distinct instantiations of the same block must not collapse into
    // one scope node.
    assert_eq!(output.diagnostics.scope_nodes_allocated, 2);
    // `counter`'s own frame *is* the function's own declaring frame (no
    // outer wrapping block), so it becomes a setter-initialized slot rather
    // than a factory argument.
    assert_eq!(output.code, "const c=((a)=>[b=>a=b,()=>a])();\nc[0](1);\nc[1];");
}
