//! # Value Classifier
//!
//! Read-only first pass over a `Value` graph: tags each function with its
//! precise sub-kind and flags non-default name/length descriptors, so later
//! stages never need to re-inspect the raw shape. Classification is
//! memoized by identity so re-classifying an already-visited value is a
//! cache hit, not re-derivation — the same discipline the teacher's
//! `SemanticAnalysis` uses when a symbol is looked up more than once during
//! a single analysis pass.

use std::collections::HashMap;

use thiserror::Error;

use super::{Descriptor, FunctionSubKind, FunctionValue, NameMeta, Value, ValueId, ValueKind};

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("value {0} has an unrecognized function sub-kind and cannot be reconstructed")]
    UnreconstructableFunction(ValueId),
}

/// Per-value classification result, attached alongside (not merged into)
/// the original `Value` so the classifier never mutates its input.
#[derive(Debug, Clone)]
pub struct Classification {
    pub sub_kind: Option<FunctionSubKind>,
    pub has_non_default_name: bool,
    pub has_non_default_length: bool,
}

/// Runs the classifier over every value reachable from `roots`, returning a
/// map keyed by `ValueId`. Already-classified values (shared by more than
/// one parent) are classified exactly once.
pub struct Classifier {
    cache: HashMap<ValueId, Classification>,
}

impl Classifier {
    pub fn new() -> Self {
        Self { cache: HashMap::new() }
    }

    pub fn classify_all(&mut self, values: &HashMap<ValueId, Value>) -> Result<(), ClassifyError> {
        for value in values.values() {
            self.classify_one(value)?;
        }
        Ok(())
    }

    /// Classifies a single value, memoizing on `value.id`. Safe to call more
    /// than once for the same value; the second call is a cache hit.
    pub fn classify_one(&mut self, value: &Value) -> Result<&Classification, ClassifyError> {
        if !self.cache.contains_key(&value.id) {
            let classification = match &value.kind {
                ValueKind::Function(func) => classify_function(value.id, func)?,
                _ => Classification { sub_kind: None, has_non_default_name: false, has_non_default_length: false },
            };
            self.cache.insert(value.id, classification);
        }
        Ok(self.cache.get(&value.id).expect("just inserted"))
    }

    pub fn get(&self, id: ValueId) -> Option<&Classification> {
        self.cache.get(&id)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_function(id: ValueId, func: &FunctionValue) -> Result<Classification, ClassifyError> {
    // `sub_kind` already comes pre-determined from the host in this data
    // model (see `FunctionValue::sub_kind`); the classifier's job is to
    // validate it's one it knows how to emit and derive the name/length
    // flags, mirroring how the teacher's analyzer trusts the parser's AST
    // shape but still validates semantic flags on top of it.
    let sub_kind = func.sub_kind;
    if !is_known_sub_kind(sub_kind) {
        return Err(ClassifyError::UnreconstructableFunction(id));
    }

    Ok(Classification {
        sub_kind: Some(sub_kind),
        has_non_default_name: !name_meta_is_default(&func.name_meta),
        has_non_default_length: !func.name_meta.length_is_default,
    })
}

fn is_known_sub_kind(_sub_kind: FunctionSubKind) -> bool {
    // All variants of `FunctionSubKind` are currently supported; this stub
    // is the seam where a future function flavor the emitter can't yet
    // reproduce would be rejected instead of silently mis-emitted.
    true
}

fn name_meta_is_default(meta: &NameMeta) -> bool {
    meta.name_is_default
}

/// Whether a descriptor requires an explicit `Object.defineProperty`
/// restoration rather than implicit literal syntax (spec §8 "descriptor/
/// prototype agreement").
pub fn needs_explicit_descriptor(descriptor: &Descriptor) -> bool {
    !descriptor.is_default_data()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{FunctionSubKind, FunctionValue, NameMeta, ValueKind};

    fn plain_function(id: ValueId, sub_kind: FunctionSubKind) -> Value {
        Value {
            id,
            kind: ValueKind::Function(FunctionValue {
                sub_kind,
                source_text: "function () {}".to_string(),
                block_id: 0,
                instantiation_id: 0,
                name_meta: NameMeta { name: None, name_is_default: true, length_is_default: true },
                length: None,
                bound: None,
            }),
        }
    }

    #[test]
    fn classifies_arrow_and_memoizes() {
        let mut classifier = Classifier::new();
        let value = plain_function(1, FunctionSubKind::Arrow);
        let first = classifier.classify_one(&value).unwrap().clone();
        assert_eq!(first.sub_kind, Some(FunctionSubKind::Arrow));

        // second call must be the memoized entry, not a fresh computation
        let second = classifier.classify_one(&value).unwrap();
        assert_eq!(second.sub_kind, first.sub_kind);
        assert_eq!(classifier.cache.len(), 1);
    }

    #[test]
    fn non_default_name_is_flagged() {
        let mut value = plain_function(2, FunctionSubKind::Plain);
        if let ValueKind::Function(func) = &mut value.kind {
            func.name_meta = NameMeta { name: Some("renamed".into()), name_is_default: false, length_is_default: true };
        }
        let mut classifier = Classifier::new();
        let classification = classifier.classify_one(&value).unwrap();
        assert!(classification.has_non_default_name);
        assert!(!classification.has_non_default_length);
    }

    #[test]
    fn non_function_values_have_no_sub_kind() {
        let value = Value { id: 3, kind: ValueKind::Number(1.0) };
        let mut classifier = Classifier::new();
        let classification = classifier.classify_one(&value).unwrap();
        assert!(classification.sub_kind.is_none());
    }
}
