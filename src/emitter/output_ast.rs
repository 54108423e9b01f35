//! A small output-only AST for the constructs the emitter needs to print:
//! factories, trampolines, property restoration calls, and the wrapper
//! format around the whole thing. Deliberately much smaller than a general
//! JS grammar (there's no need to represent loops, classes, or control
//! flow here) — the teacher's full `parser::ast_types` was built to
//! represent arbitrary input programs, but emitted output here is always
//! one of a closed set of shapes (spec §4.5 Non-goals: "no host-object
//! magic beyond what the core needs").

use crate::scope_graph::ScopeNodeId;

/// One emittable expression in the output program.
#[derive(Debug, Clone)]
pub enum OutputExpr {
    /// Verbatim source text, already rewritten by `body_rewrite` if it was
    /// a function body; used for primitives, literals, and leaf functions
    /// with no free variables.
    Raw(String),
    /// A parenthesized arrow factory: `(p1, p2) => <body>`.
    Factory { params: Vec<String>, body: Box<OutputExpr> },
    /// An immediately-invoked factory: `(p1, p2 => <body>)(a1, a2)`.
    FactoryCall { factory: Box<OutputExpr>, args: Vec<OutputExpr> },
    /// A trampoline: a factory that returns an object of setter closures
    /// rather than the scope's values directly, used to break a cycle.
    Trampoline { node_id: ScopeNodeId, params: Vec<String>, body: Box<OutputExpr> },
    /// `Object.defineProperty(target, key, descriptor)`.
    DefineProperty { target: Box<OutputExpr>, key: PropertyKeyExpr, descriptor: DescriptorExpr },
    /// `Object.defineProperties(target, { ...descriptors })`.
    DefineProperties { target: Box<OutputExpr>, entries: Vec<(PropertyKeyExpr, DescriptorExpr)> },
    /// `Object.setPrototypeOf(target, proto)`.
    SetPrototypeOf { target: Box<OutputExpr>, prototype: Box<OutputExpr> },
    /// A bare identifier reference into the emitted program.
    Ident(String),
    /// A sequence of statements joined with `;`, used for multi-statement
    /// (non-`inline`) output (spec §6 `SerializerConfig::inline`).
    Statements(Vec<OutputExpr>),
    /// `<target>.<binding> = <value>` — a deferred setter call.
    Assign { target: Box<OutputExpr>, binding: String, value: Box<OutputExpr> },
}

#[derive(Debug, Clone)]
pub enum PropertyKeyExpr {
    StringLiteral(String),
    NumberLiteral(u32),
    SymbolRef(OutputExprRef),
}

/// A reference to another already-planned expression, used where a
/// property key or value is itself a previously emitted value rather than
/// a literal.
pub type OutputExprRef = Box<OutputExpr>;

#[derive(Debug, Clone)]
pub enum DescriptorExpr {
    Data { value: Box<OutputExpr>, writable: bool, enumerable: bool, configurable: bool },
    Accessor { getter: Option<Box<OutputExpr>>, setter: Option<Box<OutputExpr>>, enumerable: bool, configurable: bool },
}
