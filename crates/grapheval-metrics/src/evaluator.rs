//! The evaluation orchestrator.
//!
//! [`GraphEvaluator`] wires the facet calculators, the domain metrics and
//! the hierarchy scorer together over one (test, reference) graph pair and
//! assembles the nested [`EvaluationReport`]. [`compute_metrics`] is the
//! top-level entry point that also handles degenerate inputs via error
//! flags instead of failing.

use crate::basic::{BasicMetrics, ClassesReport, SubjectsFuzzyReport, SubjectsUniqueReport};
use crate::cache::ExtractionCache;
use crate::config::EvalConfig;
use crate::domain::{DomainMetrics, EntityCoverage, PredicateDetails};
use crate::hierarchy::{
    ClassHierarchyReport, HierarchyScore, HierarchyScorer, PropertyHierarchyReport,
};
use crate::object::{ObjectLiteralsReport, ObjectMetrics, ObjectUrisReport, ObjectsReport};
use crate::property::{PredicateDatatypeReport, PropertyMetrics, PropertyObjectReport};
use crate::scores::MetricRecord;
use crate::EvalError;
use grapheval_rdf::Graph;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which slice of the report to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvalMode {
    /// Everything: common facets plus domain/hierarchy metrics.
    #[default]
    All,
    /// Only the ontology-free facet metrics.
    Common,
    /// Only the domain and hierarchy metrics.
    InDomain,
}

/// Degenerate-input flags. When either flag is set, no facet metrics are
/// computed and the rest of the report stays empty.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ErrorFlags {
    #[serde(rename = "NoTriples")]
    pub no_triples: bool,
    #[serde(rename = "NoValidMapping")]
    pub no_valid_mapping: bool,
}

/// The full nested evaluation report. Every metric key is optional so the
/// same type serializes the common-only, in-domain-only and full variants.
#[derive(Debug, Default, Serialize)]
pub struct EvaluationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triples: Option<MetricRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects_unique: Option<SubjectsUniqueReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects_fuzzy_unique: Option<SubjectsFuzzyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<ClassesReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes_unique: Option<ClassesReport>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicates: Option<MetricRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicates_unique: Option<PropertyObjectReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate_datatype_range: Option<PredicateDatatypeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate_datatype_range_unique: Option<PredicateDatatypeReport>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<ObjectsReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects_uris: Option<ObjectUrisReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects_literals: Option<ObjectLiteralsReport>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_coverage: Option<BTreeMap<String, EntityCoverage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes_with_hierarchy: Option<ClassHierarchyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicates_with_hierarchy: Option<PropertyHierarchyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_property_hierarchy_scores: Option<BTreeMap<String, HierarchyScore>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicates_direct: Option<BTreeMap<String, MetricRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicates_inverse: Option<BTreeMap<String, MetricRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate_details: Option<BTreeMap<String, PredicateDetails>>,

    pub errors: ErrorFlags,
}

/// Orchestrates all metrics over one (test, reference) graph pair.
///
/// The caller owns the graphs and the configuration; the evaluator keeps a
/// completed clone of the config (auto-filled from the ontology and the
/// reference graph) and a hierarchy scorer when an ontology graph was
/// supplied.
pub struct GraphEvaluator<'g> {
    test_graph: &'g Graph,
    reference_graph: &'g Graph,
    config: EvalConfig,
    scorer: Option<HierarchyScorer<'g>>,
}

impl<'g> GraphEvaluator<'g> {
    pub fn new(
        test_graph: &'g Graph,
        reference_graph: &'g Graph,
        ontology_graph: Option<&Graph>,
        config: &EvalConfig,
        cache: Option<&dyn ExtractionCache>,
    ) -> Result<Self, EvalError> {
        let mut config = config.clone();
        if let Some(ontology) = ontology_graph {
            config.complete_from_ontology(ontology, cache);
        }
        config.complete_ids_from_reference(reference_graph);

        let scorer = match ontology_graph {
            Some(ontology) => Some(HierarchyScorer::new(
                test_graph,
                reference_graph,
                ontology,
                &config,
            )?),
            None => None,
        };

        Ok(GraphEvaluator {
            test_graph,
            reference_graph,
            config,
            scorer,
        })
    }

    /// The completed configuration in effect for this evaluation.
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    fn basic(&self) -> BasicMetrics<'_> {
        BasicMetrics::new(self.test_graph, self.reference_graph, &self.config)
    }

    fn properties(&self) -> PropertyMetrics<'_> {
        PropertyMetrics::new(self.test_graph, self.reference_graph)
    }

    fn objects(&self) -> ObjectMetrics<'_> {
        ObjectMetrics::new(self.test_graph, self.reference_graph)
    }

    fn domain(&self) -> DomainMetrics<'_> {
        DomainMetrics::new(self.test_graph, self.reference_graph, &self.config)
    }

    fn scorer(&self) -> Result<&HierarchyScorer<'g>, EvalError> {
        self.scorer.as_ref().ok_or(EvalError::OntologyUnavailable)
    }

    // ---- basic facets ----

    pub fn evaluate_triples(&self) -> MetricRecord {
        self.basic().evaluate_triples()
    }

    pub fn evaluate_subjects_unique(&self) -> SubjectsUniqueReport {
        self.basic().evaluate_subjects_unique()
    }

    pub fn evaluate_subjects_fuzzy(&self) -> SubjectsFuzzyReport {
        self.basic().evaluate_subjects_fuzzy()
    }

    pub fn evaluate_classes(&self) -> ClassesReport {
        self.basic().evaluate_classes()
    }

    pub fn evaluate_classes_unique(&self) -> ClassesReport {
        self.basic().evaluate_classes_unique()
    }

    // ---- property facets ----

    pub fn evaluate_properties(&self) -> MetricRecord {
        self.properties().evaluate_properties()
    }

    pub fn evaluate_properties_unique(&self) -> PropertyObjectReport {
        self.properties().evaluate_properties_unique()
    }

    pub fn evaluate_predicate_datatypes(&self) -> PredicateDatatypeReport {
        self.properties().evaluate_predicate_datatypes()
    }

    pub fn evaluate_predicate_datatypes_unique(&self) -> PredicateDatatypeReport {
        self.properties().evaluate_predicate_datatypes_unique()
    }

    // ---- object facets ----

    pub fn evaluate_objects(&self) -> ObjectsReport {
        self.objects().evaluate_objects()
    }

    pub fn evaluate_object_uris(&self) -> ObjectUrisReport {
        self.objects().evaluate_object_uris()
    }

    pub fn evaluate_object_literals(&self) -> ObjectLiteralsReport {
        self.objects().evaluate_object_literals()
    }

    // ---- hierarchy metrics (require an ontology) ----

    pub fn evaluate_class_hierarchies(&self) -> Result<ClassHierarchyReport, EvalError> {
        Ok(self.scorer()?.evaluate_class_hierarchies())
    }

    pub fn evaluate_property_hierarchies(&self) -> Result<PropertyHierarchyReport, EvalError> {
        Ok(self.scorer()?.evaluate_property_hierarchies())
    }

    pub fn evaluate_properties_direct(&self) -> Result<BTreeMap<String, MetricRecord>, EvalError> {
        Ok(self.scorer()?.evaluate_all_properties_direct())
    }

    pub fn evaluate_properties_inverse(&self) -> Result<BTreeMap<String, MetricRecord>, EvalError> {
        Ok(self.scorer()?.evaluate_all_properties_inverse())
    }

    pub fn evaluate_properties_with_hierarchy(
        &self,
    ) -> Result<BTreeMap<String, HierarchyScore>, EvalError> {
        let scorer = self.scorer()?;
        let targets = scorer.predicates_to_evaluate().to_vec();
        Ok(scorer.evaluate_multiple_properties_hierarchy(&targets))
    }

    // ---- domain metrics ----

    pub fn evaluate_entity_coverage(&self) -> BTreeMap<String, EntityCoverage> {
        self.domain().summarize_entity_coverage()
    }

    pub fn evaluate_predicate_details(&self) -> BTreeMap<String, PredicateDetails> {
        self.domain().evaluate_all_predicates_detailed(self.scorer.as_ref())
    }

    // ---- report assembly ----

    /// The ontology-free facet metrics.
    pub fn evaluate_common(&self) -> EvaluationReport {
        EvaluationReport {
            triples: Some(self.evaluate_triples()),
            subjects_unique: Some(self.evaluate_subjects_unique()),
            subjects_fuzzy_unique: Some(self.evaluate_subjects_fuzzy()),
            classes: Some(self.evaluate_classes()),
            classes_unique: Some(self.evaluate_classes_unique()),
            predicates: Some(self.evaluate_properties()),
            predicates_unique: Some(self.evaluate_properties_unique()),
            predicate_datatype_range: Some(self.evaluate_predicate_datatypes()),
            predicate_datatype_range_unique: Some(self.evaluate_predicate_datatypes_unique()),
            objects: Some(self.evaluate_objects()),
            objects_uris: Some(self.evaluate_object_uris()),
            objects_literals: Some(self.evaluate_object_literals()),
            ..EvaluationReport::default()
        }
    }

    /// Entity coverage, plus the hierarchy metrics when an ontology is
    /// loaded. Without one, the hierarchy keys stay absent.
    pub fn evaluate_in_domain(&self) -> EvaluationReport {
        let mut report = EvaluationReport {
            entity_coverage: Some(self.evaluate_entity_coverage()),
            ..EvaluationReport::default()
        };

        if let Some(scorer) = &self.scorer {
            let targets = scorer.predicates_to_evaluate().to_vec();
            report.classes_with_hierarchy = Some(scorer.evaluate_class_hierarchies());
            report.predicates_with_hierarchy = Some(scorer.evaluate_property_hierarchies());
            report.single_property_hierarchy_scores =
                Some(scorer.evaluate_multiple_properties_hierarchy(&targets));
            report.predicates_direct = Some(scorer.evaluate_all_properties_direct());
            report.predicates_inverse = Some(scorer.evaluate_all_properties_inverse());
            report.predicate_details = Some(self.evaluate_predicate_details());
        }

        report
    }

    /// Everything.
    pub fn evaluate_all(&self) -> EvaluationReport {
        let mut report = self.evaluate_common();
        let in_domain = self.evaluate_in_domain();

        report.entity_coverage = in_domain.entity_coverage;
        report.classes_with_hierarchy = in_domain.classes_with_hierarchy;
        report.predicates_with_hierarchy = in_domain.predicates_with_hierarchy;
        report.single_property_hierarchy_scores = in_domain.single_property_hierarchy_scores;
        report.predicates_direct = in_domain.predicates_direct;
        report.predicates_inverse = in_domain.predicates_inverse;
        report.predicate_details = in_domain.predicate_details;
        report
    }
}

/// Top-level entry point: evaluate the predicted graph against the gold
/// graph, or emit only error flags when the prediction is degenerate.
///
/// An empty predicted graph sets `NoTriples`; `mapping_valid == false` sets
/// `NoValidMapping`. Either flag suppresses every metric key.
pub fn compute_metrics(
    gold_graph: &Graph,
    pred_graph: &Graph,
    ontology_graph: Option<&Graph>,
    config: &EvalConfig,
    cache: Option<&dyn ExtractionCache>,
    mapping_valid: bool,
    mode: EvalMode,
) -> Result<EvaluationReport, EvalError> {
    let has_triples = !pred_graph.is_empty();

    let mut report = if has_triples && mapping_valid {
        let evaluator =
            GraphEvaluator::new(pred_graph, gold_graph, ontology_graph, config, cache)?;
        match mode {
            EvalMode::All => evaluator.evaluate_all(),
            EvalMode::Common => evaluator.evaluate_common(),
            EvalMode::InDomain => evaluator.evaluate_in_domain(),
        }
    } else {
        tracing::debug!(
            has_triples,
            mapping_valid,
            "degenerate prediction, skipping metrics"
        );
        EvaluationReport::default()
    };

    report.errors = ErrorFlags {
        no_triples: !has_triples,
        no_valid_mapping: !mapping_valid,
    };
    Ok(report)
}
