//! # Value Data Model
//!
//! The typed representation of one live runtime value as handed to the
//! serializer, plus the classifier that annotates it (spec §4.1). Mirrors
//! the shape of the teacher's `parser::ast_types` in spirit — a plain,
//! serde-serializable tree that downstream stages consume read-only — but
//! describes runtime values rather than parsed source.

pub mod classify;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::block::{BlockId, InstantiationId};

/// Opaque identity token for a value, stable for the duration of one
/// serialization run. Two `Value`s with the same `id` are `===` in the
/// source program and must be emitted as the same reference (spec §3, §8
/// "identity preservation").
pub type ValueId = u64;

/// One live runtime value, already walked and normalized by the host, ready
/// for classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Value {
    pub id: ValueId,
    pub kind: ValueKind,
}

/// The typed shape of a value, before classifier annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ValueKind {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    BigInt(String),
    Symbol { description: Option<String> },
    Object(ObjectValue),
    Function(FunctionValue),
    RegExp { source: String, flags: String },
    Date { millis_since_epoch: f64 },
    Map { entries: Vec<(ValueId, ValueId)> },
    Set { members: Vec<ValueId> },
    ArrayBuffer { bytes: Vec<u8> },
    TypedArray { kind: TypedArrayKind, buffer: ValueId, byte_offset: usize, length: usize },
}

/// Typed-array element kind; distinguishing these is required to round-trip
/// the constructor call (`new Int32Array(buf, ...)` vs `new Float64Array`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypedArrayKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
    BigInt64,
    BigUint64,
}

/// A plain or array-like object: own properties plus a prototype pointer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectValue {
    pub is_array: bool,
    /// Integer-indexed properties are kept separate from string/symbol-keyed
    /// ones so the emitter can apply the integer-before-string ordering rule
    /// (spec §8 boundary behavior) without re-deriving it from a flat map.
    pub indexed_properties: BTreeMap<u32, Property>,
    pub named_properties: Vec<(PropertyKey, Property)>,
    pub prototype: Prototype,
    pub extensible: bool,
}

/// A property key: a string or a symbol value (by id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PropertyKey {
    String(String),
    Symbol(ValueId),
}

/// One own property, with its full descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub descriptor: Descriptor,
}

/// A property descriptor, distinguishing data properties from accessors
/// (spec §3 "Value" / §8 "descriptor/prototype agreement").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Descriptor {
    Data { value: ValueId, writable: bool, enumerable: bool, configurable: bool },
    Accessor { getter: Option<ValueId>, setter: Option<ValueId>, enumerable: bool, configurable: bool },
}

impl Descriptor {
    /// Whether this descriptor matches the implicit default a plain object
    /// literal or function property would produce (writable, enumerable,
    /// configurable data property). Non-default descriptors force the
    /// emitter into `Object.defineProperty` rather than literal syntax.
    pub fn is_default_data(&self) -> bool {
        matches!(
            self,
            Descriptor::Data { writable: true, enumerable: true, configurable: true, .. }
        )
    }
}

/// A value's prototype, or an explicit marker that it differs from the
/// language's implicit default for its kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Prototype {
    /// Prototype is exactly what the kind's intrinsic constructor would
    /// produce; no restoration call is needed.
    Implicit,
    /// `Object.setPrototypeOf` (or `Object.create`) must be emitted.
    Explicit(ValueId),
    /// `Object.create(null)`.
    Null,
}

/// A function value, with enough detail to decide how it must be emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionValue {
    pub sub_kind: FunctionSubKind,
    /// The verbatim captured source text of the function, as the host
    /// recorded it. The emitter rewrites free-variable identifiers inside
    /// this text in place (spec §4.5/§4.6); it never reconstructs syntax
    /// from scratch.
    pub source_text: String,
    pub block_id: BlockId,
    pub instantiation_id: InstantiationId,
    pub name_meta: NameMeta,
    pub length: Option<u32>,
    pub bound: Option<Box<BoundFunctionValue>>,
}

/// The JS function flavor, each with distinct emission constraints (spec
/// §4.1): arrows can't be `new`-called and have no own `this`; generators
/// and async functions need their keyword preserved in the rewritten header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionSubKind {
    Plain,
    Arrow,
    MethodShorthand,
    ClassMethod,
    Getter,
    Setter,
    Generator,
    AsyncPlain,
    AsyncArrow,
    AsyncGenerator,
}

/// Whether a function's `.name`/`.length` differ from what its declaration
/// form would imply, forcing an explicit `Object.defineProperty` restoration
/// (spec §4.1, §4.6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameMeta {
    pub name: Option<String>,
    pub name_is_default: bool,
    pub length_is_default: bool,
}

/// Metadata for a bound function (`Function.prototype.bind`), which has no
/// `source_text` of its own and must be re-synthesized as a `.bind(...)`
/// call over its target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundFunctionValue {
    pub target: ValueId,
    pub bound_this: ValueId,
    pub bound_args: Vec<ValueId>,
}

/// A `(block, instantiation)` reference, used by the extractor to identify
/// which live Scope Frame a function's free variables were captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeFrameRef {
    pub block_id: BlockId,
    pub instantiation_id: InstantiationId,
}

/// A cheap structural fingerprint used by the classifier's memoization
/// cache (spec §4.1 "idempotence of classify/extract" — classifying the
/// same value twice must be a no-op, not a re-derivation).
pub type Fingerprint = u64;
