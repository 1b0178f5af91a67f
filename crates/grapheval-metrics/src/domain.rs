//! Domain metrics: expected-entity coverage and per-predicate detail
//! reports driven by the configured `ids_by_type` map.

use crate::config::EvalConfig;
use crate::hierarchy::HierarchyScorer;
use grapheval_rdf::Graph;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Coverage of the expected identifiers of one entity type.
#[derive(Debug, Clone, Serialize)]
pub struct EntityCoverage {
    pub ids_found: usize,
    pub all_ids_present: bool,
    pub ids_with_correct_type: usize,
    pub expected_count: usize,
}

/// Detailed usage report for one predicate. The hierarchy-backed fields
/// are only populated when a scorer is supplied.
#[derive(Debug, Clone, Serialize)]
pub struct PredicateDetails {
    pub predicate_used: bool,
    pub usage_count: usize,
    pub used_with_uris: usize,
    pub used_with_literals: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_usage_count: Option<usize>,
    /// The predicate's test-side usage count equals the reference count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outdegree_correct: Option<bool>,
    /// Every expected occurrence matched under the alignment substitution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy_match_correct: Option<bool>,
    /// Literal values also matched on datatype. Absent when the predicate
    /// never carries a literal in the test graph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype_correct: Option<bool>,
}

pub struct DomainMetrics<'g> {
    test_graph: &'g Graph,
    reference_graph: &'g Graph,
    config: &'g EvalConfig,
}

impl<'g> DomainMetrics<'g> {
    pub fn new(test_graph: &'g Graph, reference_graph: &'g Graph, config: &'g EvalConfig) -> Self {
        DomainMetrics {
            test_graph,
            reference_graph,
            config,
        }
    }

    fn test_subjects_under_base(&self) -> BTreeSet<String> {
        self.test_graph
            .subjects()
            .map(|s| s.as_str().to_string())
            .filter(|s| s.starts_with(&self.config.base_iri))
            .collect()
    }

    fn expected_ids(&self, entity_type: &str) -> &[String] {
        self.config
            .ids_by_type
            .get(entity_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Test subjects under the base IRI carrying any expected identifier of
    /// the given type.
    pub fn count_entity_ids_by_type(&self, entity_type: &str) -> usize {
        let ids = self.expected_ids(entity_type);
        self.test_subjects_under_base()
            .iter()
            .filter(|subject| ids.iter().any(|id| subject.contains(id.as_str())))
            .count()
    }

    /// Whether every expected identifier of the type appears in some test
    /// subject.
    pub fn check_all_entity_ids_present(&self, entity_type: &str) -> bool {
        let subjects = self.test_subjects_under_base();
        self.expected_ids(entity_type)
            .iter()
            .all(|id| subjects.iter().any(|subject| subject.contains(id.as_str())))
    }

    /// Test subjects that carry an expected identifier *and* are typed with
    /// the entity type.
    pub fn count_entity_ids_with_type(&self, entity_type: &str) -> usize {
        let ids = self.expected_ids(entity_type);
        let typed_subjects: BTreeSet<String> = self
            .test_graph
            .subjects_with(&self.config.rdf_type_iri, entity_type)
            .map(|s| s.as_str().to_string())
            .filter(|s| s.starts_with(&self.config.base_iri))
            .collect();

        typed_subjects
            .iter()
            .filter(|subject| ids.iter().any(|id| subject.contains(id.as_str())))
            .count()
    }

    /// Coverage summary over every configured entity type, keyed by the
    /// type IRI's local name.
    pub fn summarize_entity_coverage(&self) -> BTreeMap<String, EntityCoverage> {
        let mut summary = BTreeMap::new();
        for (entity_type, ids) in &self.config.ids_by_type {
            let type_name = entity_type.rsplit('/').next().unwrap_or(entity_type);
            summary.insert(
                type_name.to_string(),
                EntityCoverage {
                    ids_found: self.count_entity_ids_by_type(entity_type),
                    all_ids_present: self.check_all_entity_ids_present(entity_type),
                    ids_with_correct_type: self.count_entity_ids_with_type(entity_type),
                    expected_count: ids.len(),
                },
            );
        }
        summary
    }

    /// Usage profile of one predicate in the test graph, enriched with
    /// correctness checks when a hierarchy scorer is available.
    pub fn evaluate_predicate_details(
        &self,
        predicate: &str,
        scorer: Option<&HierarchyScorer<'_>>,
    ) -> PredicateDetails {
        let usage_count = self
            .test_graph
            .predicates()
            .filter(|p| *p == predicate)
            .count();
        let used_with_uris = self
            .test_graph
            .iter()
            .filter(|t| t.predicate == predicate && t.object.is_iri())
            .count();
        let used_with_literals = self
            .test_graph
            .iter()
            .filter(|t| t.predicate == predicate && t.object.is_literal())
            .count();

        let mut details = PredicateDetails {
            predicate_used: usage_count > 0,
            usage_count,
            used_with_uris,
            used_with_literals,
            expected_count: None,
            correct_usage_count: None,
            outdegree_correct: None,
            fuzzy_match_correct: None,
            datatype_correct: None,
        };

        if let Some(scorer) = scorer {
            let direct = scorer.evaluate_property_direct(predicate);
            let expected_count = direct.tp + direct.fn_;

            details.expected_count = Some(expected_count);
            details.correct_usage_count = Some(direct.tp);
            details.outdegree_correct = Some(usage_count == expected_count);
            details.fuzzy_match_correct = Some(direct.tp == expected_count);

            if used_with_literals > 0 {
                let with_datatype = scorer.evaluate_property_direct_with_datatype(predicate);
                details.datatype_correct = Some(with_datatype.tp == expected_count);
            }
        }

        details
    }

    /// Detail report for every predicate the reference graph uses.
    pub fn evaluate_all_predicates_detailed(
        &self,
        scorer: Option<&HierarchyScorer<'_>>,
    ) -> BTreeMap<String, PredicateDetails> {
        let predicates: BTreeSet<&str> = self.reference_graph.predicates().collect();
        predicates
            .into_iter()
            .map(|p| (p.to_string(), self.evaluate_predicate_details(p, scorer)))
            .collect()
    }
}
