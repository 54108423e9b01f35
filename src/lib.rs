//! # closure-serializer
//!
//! Serializes a live runtime value — including closures, prototypes, and
//! cyclic object graphs — back into re-evaluable source text. The pipeline
//! runs strictly downward through six stages (spec §2):
//!
//! 1. **Value Classifier** ([`value::classify`]) tags every function with
//!    its precise sub-kind and non-default descriptor flags.
//! 2. **Scope Extractor** ([`extractor`]) records, per function, which
//!    Scope Frame it closed over and which bindings it actually touches.
//! 3. **Scope Graph Builder** ([`scope_graph`]) merges every function's
//!    frame chain into one DAG of scope nodes.
//! 4. **Dependency Planner & Cycle Breaker** ([`planner`]) produces a
//!    construction order, promoting back edges to trampolines.
//! 5. **Emitter** ([`emitter`]) prints the plan as source text.
//! 6. **Name Resolver** ([`resolver`]) allocates short identifiers the
//!    emitter consumes along the way.
//!
//! This mirrors how the teacher's `main.rs` threads `parser` →
//! `analyzer` → `transformer` → `generator`, just with different stage
//! names and a different subject (live values instead of parsed source).

pub mod block;
pub mod config;
pub mod emitter;
pub mod error;
pub mod extractor;
pub mod planner;
pub mod resolver;
pub mod scope_graph;
pub mod value;

use std::collections::HashMap;

use block::BlockCatalog;
use config::SerializerConfig;
use emitter::{EmitDiagnostics, Emitter};
use error::{SerializeError, SerializeResult};
use extractor::{Extractor, Tracker};
use planner::Planner;
use scope_graph::ScopeGraphBuilder;
use value::classify::Classifier;
use value::{Value, ValueId, ValueKind};

/// The finished output of one `serialize_value` run.
#[derive(Debug, Clone)]
pub struct SerializedOutput {
    pub code: String,
    pub diagnostics: GenerationDiagnostics,
}

/// Aggregate diagnostics across the whole pipeline, surfaced the way the
/// teacher's `GenerationResult` carries a `diagnostics` field alongside
/// `code`.
#[derive(Debug, Clone, Default)]
pub struct GenerationDiagnostics {
    pub values_classified: usize,
    pub functions_extracted: usize,
    pub scope_nodes_allocated: usize,
    pub factories_emitted: usize,
    pub trampolines_emitted: usize,
    pub setters_emitted: usize,
}

/// Runs the full pipeline over `values`, producing re-evaluable source
/// text for `root_value`.
///
/// `tracker` supplies live scope-frame data for each function (component 2
/// input); `catalog` is the read-only block metadata produced by
/// instrumentation (spec §3/§6).
pub fn serialize_value<T: Tracker>(
    root_value: ValueId,
    values: &HashMap<ValueId, Value>,
    tracker: &T,
    catalog: &BlockCatalog,
    config: &SerializerConfig,
) -> SerializeResult<SerializedOutput> {
    let mut classifier = Classifier::new();
    classifier.classify_all(values)?;

    let mut extractor = Extractor::new(tracker, catalog);
    extractor.extract_all(values)?;

    let mut builder = ScopeGraphBuilder::new();
    for value in values.values() {
        if let ValueKind::Function(_) = &value.kind {
            if let Some(record) = extractor.get(value.id) {
                builder.merge(record, catalog)?;
            }
        }
    }
    let graph = builder.finish();

    let planner = Planner::new(&graph);
    let plan = planner.plan()?;

    let mut emitter = Emitter::new(config, values, &graph, catalog);
    let (code, emit_diagnostics) = emitter
        .emit(&plan, root_value)
        .map_err(|e| SerializeError::Emitter(e.to_string()))?;

    let diagnostics = GenerationDiagnostics {
        values_classified: values.len(),
        functions_extracted: values.values().filter(|v| matches!(v.kind, ValueKind::Function(_))).count(),
        scope_nodes_allocated: graph.nodes.len(),
        factories_emitted: emit_diagnostics.factories_emitted,
        trampolines_emitted: emit_diagnostics.trampolines_emitted,
        setters_emitted: emit_diagnostics.setters_emitted,
    };

    Ok(SerializedOutput { code, diagnostics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use block::{BlockFlags, BlockInfo};
    use extractor::FrameData;
    use value::{FunctionSubKind, FunctionValue, NameMeta};

    struct FixtureTracker(HashMap<ValueId, Vec<FrameData>>);

    impl Tracker for FixtureTracker {
        fn frames_for(&self, token: ValueId) -> Option<Vec<FrameData>> {
            self.0.get(&token).cloned()
        }
    }

    #[test]
    fn serializes_a_function_with_no_free_variables_verbatim() {
        let mut blocks = HashMap::new();
        blocks.insert(0, BlockInfo { parent_block_id: None, declared_names: vec![], flags: BlockFlags::default() });
        let catalog = BlockCatalog(blocks);

        let mut values = HashMap::new();
        values.insert(
            1,
            Value {
                id: 1,
                kind: ValueKind::Function(FunctionValue {
                    sub_kind: FunctionSubKind::Arrow,
                    source_text: "()=>42".to_string(),
                    block_id: 0,
                    instantiation_id: 1,
                    name_meta: NameMeta { name: None, name_is_default: true, length_is_default: true },
                    length: None,
                    bound: None,
                }),
            },
        );

        let mut frames = HashMap::new();
        frames.insert(
            1,
            vec![FrameData {
                block_id: 0,
                instantiation_id: 1,
                read_names: vec![],
                written_names: vec![],
                binding_values: HashMap::new(),
            }],
        );
        let tracker = FixtureTracker(frames);

        let config = SerializerConfig::default();
        let output = serialize_value(1, &values, &tracker, &catalog, &config).unwrap();
        assert_eq!(output.code, "()=>42");
        assert_eq!(output.diagnostics.functions_extracted, 1);
    }
}
