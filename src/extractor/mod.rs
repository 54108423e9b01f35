//! # Scope Extractor
//!
//! Walks every classified function value and records, for each, which Scope
//! Frame it closed over and which bindings inside that frame it actually
//! reads or writes (spec §4.2). The extractor never inspects source text
//! beyond the block catalog already supplied by instrumentation — it asks
//! the host-provided `Tracker` for the live frame chain of each function,
//! the same separation of concerns as the teacher's `scope_builder` asking
//! `ScopeAnalysisContext` rather than re-parsing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::block::{BlockCatalog, BlockId, InstantiationId};
use crate::value::{FunctionValue, Value, ValueId, ValueKind};

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("value {0} is a function but has no tracker frame data")]
    MissingFrameData(ValueId),
    #[error("block {0} referenced by a function is absent from the block catalog")]
    UnknownBlock(BlockId),
    #[error("tracker returned an inconsistent frame chain for value {0}")]
    InconsistentFrameChain(ValueId),
}

/// Host-supplied source of live scope-frame data. The extractor is generic
/// over this so tests can supply a fixture tracker without needing a real
/// instrumented runtime (spec §4.2 "failure-mode policy" assumes this
/// boundary can fail independently of the extractor's own logic).
pub trait Tracker {
    /// Returns the chain of live frames a function closed over, innermost
    /// first, or `None` if the tracker has no record of this function.
    fn frames_for(&self, token: TrackerToken) -> Option<Vec<FrameData>>;
}

/// Opaque handle the host uses to correlate a `FunctionValue` with its
/// tracker record; in this data model it is simply the function's value id.
pub type TrackerToken = ValueId;

/// One live Scope Frame as reported by the tracker: which block it
/// instantiates, which instantiation, and which bindings were actually
/// touched by the closing function (as opposed to merely in lexical scope).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameData {
    pub block_id: BlockId,
    pub instantiation_id: InstantiationId,
    pub read_names: Vec<String>,
    pub written_names: Vec<String>,
    /// The live value each touched binding currently holds in this frame,
    /// keyed by name. The emitter serializes these as the factory-call
    /// arguments supplying a scope's captured bindings (spec §4.5 "the
    /// captured-binding parameters" / §8 example 2's `{extA:1},{extB:2}`
    /// call arguments).
    #[serde(default)]
    pub binding_values: HashMap<String, ValueId>,
}

/// The extracted record for one function value: its full frame chain
/// (innermost first) plus the per-frame read/write sets, ready to be handed
/// to the Scope Graph Builder.
#[derive(Debug, Clone)]
pub struct FunctionRecord {
    pub value_id: ValueId,
    pub frame_chain: Vec<FrameData>,
}

/// Extracts scope-frame records for every function reachable from `values`.
/// Memoizes on `ValueId` the same way `Classifier` does, since shared
/// functions (e.g. a method referenced from two objects) must only be
/// walked once (spec §4.1/§4.2 "idempotence").
pub struct Extractor<'a, T: Tracker> {
    tracker: &'a T,
    catalog: &'a BlockCatalog,
    cache: HashMap<ValueId, FunctionRecord>,
}

impl<'a, T: Tracker> Extractor<'a, T> {
    pub fn new(tracker: &'a T, catalog: &'a BlockCatalog) -> Self {
        Self { tracker, catalog, cache: HashMap::new() }
    }

    pub fn extract_all(&mut self, values: &HashMap<ValueId, Value>) -> Result<(), ExtractorError> {
        for value in values.values() {
            if let ValueKind::Function(func) = &value.kind {
                self.extract_one(value.id, func)?;
            }
        }
        Ok(())
    }

    pub fn extract_one(&mut self, value_id: ValueId, func: &FunctionValue) -> Result<&FunctionRecord, ExtractorError> {
        if !self.cache.contains_key(&value_id) {
            let record = self.build_record(value_id, func)?;
            self.cache.insert(value_id, record);
        }
        Ok(self.cache.get(&value_id).expect("just inserted"))
    }

    fn build_record(&self, value_id: ValueId, func: &FunctionValue) -> Result<FunctionRecord, ExtractorError> {
        let frames = self
            .tracker
            .frames_for(value_id)
            .ok_or(ExtractorError::MissingFrameData(value_id))?;

        // The innermost frame the tracker reports must match the function's
        // own declared block, or the tracker and the block catalog disagree
        // about where this function lives.
        match frames.first() {
            Some(frame) if frame.block_id == func.block_id && frame.instantiation_id == func.instantiation_id => {}
            Some(_) => return Err(ExtractorError::InconsistentFrameChain(value_id)),
            None => return Err(ExtractorError::InconsistentFrameChain(value_id)),
        }

        for frame in &frames {
            if self.catalog.get(frame.block_id).is_none() {
                return Err(ExtractorError::UnknownBlock(frame.block_id));
            }
        }

        Ok(FunctionRecord { value_id, frame_chain: frames })
    }

    pub fn get(&self, value_id: ValueId) -> Option<&FunctionRecord> {
        self.cache.get(&value_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockFlags, BlockInfo};
    use crate::value::{FunctionSubKind, NameMeta};

    struct FixtureTracker(HashMap<ValueId, Vec<FrameData>>);

    impl Tracker for FixtureTracker {
        fn frames_for(&self, token: TrackerToken) -> Option<Vec<FrameData>> {
            self.0.get(&token).cloned()
        }
    }

    fn catalog() -> BlockCatalog {
        let mut map = HashMap::new();
        map.insert(0, BlockInfo { parent_block_id: None, declared_names: vec!["x".into()], flags: BlockFlags::default() });
        BlockCatalog(map)
    }

    fn func(block_id: BlockId, instantiation_id: InstantiationId) -> FunctionValue {
        FunctionValue {
            sub_kind: FunctionSubKind::Plain,
            source_text: "function () { return x; }".into(),
            block_id,
            instantiation_id,
            name_meta: NameMeta { name: None, name_is_default: true, length_is_default: true },
            length: None,
            bound: None,
        }
    }

    #[test]
    fn extracts_and_memoizes_frame_chain() {
        let catalog = catalog();
        let frames = vec![FrameData {
            block_id: 0,
            instantiation_id: 1,
            read_names: vec!["x".into()],
            written_names: vec![],
            binding_values: HashMap::new(),
        }];
        let mut tracker_map = HashMap::new();
        tracker_map.insert(7, frames);
        let tracker = FixtureTracker(tracker_map);

        let mut extractor = Extractor::new(&tracker, &catalog);
        let f = func(0, 1);
        let record = extractor.extract_one(7, &f).unwrap().clone();
        assert_eq!(record.frame_chain.len(), 1);

        let again = extractor.extract_one(7, &f).unwrap();
        assert_eq!(again.value_id, record.value_id);
        assert_eq!(extractor.cache.len(), 1);
    }

    #[test]
    fn missing_tracker_record_is_an_error() {
        let catalog = catalog();
        let tracker = FixtureTracker(HashMap::new());
        let mut extractor = Extractor::new(&tracker, &catalog);
        let f = func(0, 1);
        let err = extractor.extract_one(9, &f).unwrap_err();
        assert!(matches!(err, ExtractorError::MissingFrameData(9)));
    }

    #[test]
    fn inconsistent_innermost_frame_is_an_error() {
        let catalog = catalog();
        let frames = vec![FrameData {
            block_id: 0,
            instantiation_id: 2,
            read_names: vec![],
            written_names: vec![],
            binding_values: HashMap::new(),
        }];
        let mut tracker_map = HashMap::new();
        tracker_map.insert(5, frames);
        let tracker = FixtureTracker(tracker_map);
        let mut extractor = Extractor::new(&tracker, &catalog);
        let f = func(0, 1);
        let err = extractor.extract_one(5, &f).unwrap_err();
        assert!(matches!(err, ExtractorError::InconsistentFrameChain(5)));
    }
}
