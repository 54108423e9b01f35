//! # Top-Level Error Aggregation
//!
//! Each pipeline stage owns its own error enum (`ExtractorError`,
//! `ScopeGraphError`, `PlannerError`, `EmitterError`, `ResolverError`), the
//! same way the teacher keeps `AnalysisError`/`GeneratorError`/
//! `TransformError` separate per module. `SerializeError` is the single type
//! the crate's public entry point returns, composing the others via
//! `#[from]` — the role `CompilerError` plays in the teacher's `main.rs`.

use thiserror::Error;

use crate::extractor::ExtractorError;
use crate::planner::PlannerError;
use crate::resolver::ResolverError;
use crate::scope_graph::ScopeGraphError;

/// A dotted/bracketed path to the value that caused a fatal error, e.g.
/// `root.items[2].handler`.
pub type PropertyPath = String;

/// Errors that can surface from a full `serialize_value` run.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    #[error(transparent)]
    ScopeGraph(#[from] ScopeGraphError),

    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error(transparent)]
    Resolver(#[from] ResolverError),

    #[error("emitter failed: {0}")]
    Emitter(String),
}

/// Result alias for the crate's public entry point.
pub type SerializeResult<T> = Result<T, SerializeError>;
