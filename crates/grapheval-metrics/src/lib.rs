//! Graph comparison metrics for grapheval.
//!
//! This crate is the evaluation engine: given a test graph, a gold-standard
//! reference graph and (optionally) an ontology graph, it produces a nested
//! report of precision/recall/F1 metrics over several facets of the graphs,
//! with hierarchy-aware partial credit when an ontology is available.
//!
//! Layout:
//! - [`scores`] — zero-safe precision/recall/F1 and duplicate-respecting
//!   multiset overlap.
//! - [`basic`], [`property`], [`object`] — facet calculators over graph
//!   projections (subjects, triples, classes, predicates, datatypes,
//!   objects).
//! - [`query`] — the small fixed set of parametrized triple-pattern
//!   templates used for hierarchy lookups (not a query engine).
//! - [`hierarchy`] — transitive-closure construction, subject/property
//!   alignment and hierarchy-distance similarity scoring.
//! - [`domain`] — entity-ID coverage and per-predicate usage profiles.
//! - [`config`], [`cache`] — explicit configuration value with
//!   auto-completion from the ontology/reference graphs, and the injected
//!   extraction cache.
//! - [`evaluator`] — the orchestrator assembling the full report.

pub mod basic;
pub mod cache;
pub mod config;
pub mod domain;
pub mod evaluator;
pub mod hierarchy;
pub mod object;
pub mod property;
pub mod query;
pub mod scores;

pub use cache::{CacheKey, ExtractedSchema, ExtractionCache, FsExtractionCache};
pub use config::{EvalConfig, QueryTemplates};
pub use evaluator::{compute_metrics, ErrorFlags, EvalMode, EvaluationReport, GraphEvaluator};
pub use hierarchy::HierarchyScorer;
pub use scores::MetricRecord;

/// Errors surfaced by the evaluation engine.
///
/// Degenerate inputs (empty graphs, zero denominators) are never errors;
/// they resolve to report flags or `0.0` by convention.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// A hierarchy-dependent operation was invoked without an ontology.
    #[error("ontology not loaded, hierarchy scoring unavailable")]
    OntologyUnavailable,

    /// The subclass/subproperty edges contain a cycle; ancestor chains
    /// would not terminate.
    #[error("hierarchy cycle detected at {node}")]
    HierarchyCycle { node: String },

    /// A configured query template could not be parsed.
    #[error("invalid query template {template:?}: {message}")]
    Pattern { template: String, message: String },
}
