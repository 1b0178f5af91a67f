//! Basic facet metrics: subjects, triples and classes.

use crate::config::EvalConfig;
use crate::scores::{multiset_overlap, MetricRecord};
use grapheval_rdf::Graph;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Serialize)]
pub struct SubjectsUniqueReport {
    pub test_subjects_unique: Vec<String>,
    pub reference_subjects_unique: Vec<String>,
    #[serde(flatten)]
    pub record: MetricRecord,
}

#[derive(Debug, Serialize)]
pub struct SubjectsFuzzyReport {
    pub test_subjects_fuzzy: Vec<String>,
    pub reference_subjects_fuzzy: Vec<String>,
    #[serde(flatten)]
    pub record: MetricRecord,
}

#[derive(Debug, Serialize)]
pub struct ClassesReport {
    pub test_classes: Vec<String>,
    pub reference_classes: Vec<String>,
    #[serde(flatten)]
    pub record: MetricRecord,
}

pub struct BasicMetrics<'g> {
    test_graph: &'g Graph,
    reference_graph: &'g Graph,
    config: &'g EvalConfig,
}

impl<'g> BasicMetrics<'g> {
    pub fn new(test_graph: &'g Graph, reference_graph: &'g Graph, config: &'g EvalConfig) -> Self {
        BasicMetrics {
            test_graph,
            reference_graph,
            config,
        }
    }

    /// Complete triples (s+p+o) with exact matching, deduplicated.
    pub fn evaluate_triples(&self) -> MetricRecord {
        let test: BTreeSet<String> = self
            .test_graph
            .iter()
            .map(|t| format!("{}{}{}", t.subject, t.predicate, t.object.value_str()))
            .collect();
        let reference: BTreeSet<String> = self
            .reference_graph
            .iter()
            .map(|t| format!("{}{}{}", t.subject, t.predicate, t.object.value_str()))
            .collect();

        let tp = test.intersection(&reference).count();
        MetricRecord::from_counts(tp, test.len() - tp, reference.len() - tp)
    }

    /// Distinct subject identifiers with exact matching.
    pub fn evaluate_subjects_unique(&self) -> SubjectsUniqueReport {
        let test: BTreeSet<String> = self
            .test_graph
            .subjects()
            .map(|s| s.as_str().to_string())
            .collect();
        let reference: BTreeSet<String> = self
            .reference_graph
            .subjects()
            .map(|s| s.as_str().to_string())
            .collect();

        let tp = test.intersection(&reference).count();
        let record = MetricRecord::from_counts(tp, test.len() - tp, reference.len() - tp);
        SubjectsUniqueReport {
            test_subjects_unique: test.into_iter().collect(),
            reference_subjects_unique: reference.into_iter().collect(),
            record,
        }
    }

    /// Subjects matched on extracted trailing-segment identifiers. Useful
    /// when the graphs mint IRIs under different prefixes for the same
    /// entities.
    pub fn evaluate_subjects_fuzzy(&self) -> SubjectsFuzzyReport {
        let test_ids = extracted_ids(self.test_graph);
        let reference_ids = extracted_ids(self.reference_graph);

        let tp = test_ids
            .iter()
            .filter(|test_id| reference_ids.iter().any(|ref_id| test_id.contains(ref_id.as_str())))
            .count();
        // Several distinct test subjects can match the same reference ID, so
        // tp may exceed the reference count; the missing count floors at zero.
        let record = MetricRecord::from_counts(
            tp,
            test_ids.len() - tp,
            reference_ids.len().saturating_sub(tp),
        );
        SubjectsFuzzyReport {
            test_subjects_fuzzy: test_ids,
            reference_subjects_fuzzy: reference_ids,
            record,
        }
    }

    /// Class usage (rdf:type objects) counting duplicate uses: a class typed
    /// on N reference subjects but M test subjects must not collapse to one
    /// match.
    pub fn evaluate_classes(&self) -> ClassesReport {
        let test: Vec<String> = self
            .test_graph
            .objects_with_predicate(&self.config.rdf_type_iri)
            .map(|o| o.value_str().to_string())
            .collect();
        let reference: Vec<String> = self
            .reference_graph
            .objects_with_predicate(&self.config.rdf_type_iri)
            .map(|o| o.value_str().to_string())
            .collect();

        let tp = multiset_overlap(&test, &reference).len();
        let record = MetricRecord::from_counts(tp, test.len() - tp, reference.len() - tp);
        ClassesReport {
            test_classes: test,
            reference_classes: reference,
            record,
        }
    }

    /// Distinct classes used in the graphs.
    pub fn evaluate_classes_unique(&self) -> ClassesReport {
        let test: BTreeSet<String> = self
            .test_graph
            .objects_with_predicate(&self.config.rdf_type_iri)
            .map(|o| o.value_str().to_string())
            .collect();
        let reference: BTreeSet<String> = self
            .reference_graph
            .objects_with_predicate(&self.config.rdf_type_iri)
            .map(|o| o.value_str().to_string())
            .collect();

        let tp = test.intersection(&reference).count();
        let record = MetricRecord::from_counts(tp, test.len() - tp, reference.len() - tp);
        ClassesReport {
            test_classes: test.into_iter().collect(),
            reference_classes: reference.into_iter().collect(),
            record,
        }
    }
}

/// Trailing path segment of every distinct subject, duplicates kept when
/// different subjects share a segment.
fn extracted_ids(graph: &Graph) -> Vec<String> {
    let subjects: BTreeSet<String> = graph.subjects().map(|s| s.as_str().to_string()).collect();
    subjects
        .into_iter()
        .map(|s| s.rsplit('/').next().unwrap_or(&s).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grapheval_rdf::{Node, Term, Triple, RDF_TYPE_IRI};

    fn typed(subject: &str, class: &str) -> Triple {
        Triple::new(Node::iri(subject), RDF_TYPE_IRI, Term::iri(class))
    }

    #[test]
    fn identical_graphs_score_perfectly() {
        let g = Graph::from_triples(vec![
            typed("http://example.org/a", "http://example.org/Person"),
            typed("http://example.org/b", "http://example.org/Person"),
        ]);
        let config = EvalConfig::default();
        let metrics = BasicMetrics::new(&g, &g, &config);

        let triples = metrics.evaluate_triples();
        assert_eq!((triples.tp, triples.fp, triples.fn_), (2, 0, 0));
        assert_eq!(triples.f1, 1.0);

        let subjects = metrics.evaluate_subjects_unique();
        assert_eq!(subjects.record.tp, 2);
        assert_eq!(subjects.record.p, 1.0);
    }

    #[test]
    fn duplicate_class_usage_is_counted_per_occurrence() {
        let test = Graph::from_triples(vec![typed(
            "http://example.org/a",
            "http://example.org/Person",
        )]);
        let reference = Graph::from_triples(vec![
            typed("http://example.org/a", "http://example.org/Person"),
            typed("http://example.org/b", "http://example.org/Person"),
        ]);
        let config = EvalConfig::default();
        let metrics = BasicMetrics::new(&test, &reference, &config);

        let classes = metrics.evaluate_classes();
        assert_eq!((classes.record.tp, classes.record.fp, classes.record.fn_), (1, 0, 1));

        // The unique variant collapses both uses of Person.
        let unique = metrics.evaluate_classes_unique();
        assert_eq!((unique.record.tp, unique.record.fp, unique.record.fn_), (1, 0, 0));
    }

    #[test]
    fn fuzzy_subjects_survive_many_matches_for_one_reference_id() {
        // Two distinct test subjects both carry the single reference ID; the
        // match count exceeds the reference universe and must not drive the
        // missing count below zero.
        let test = Graph::from_triples(vec![
            typed("http://test.example/x10", "http://example.org/Person"),
            typed("http://test.example/y10", "http://example.org/Person"),
        ]);
        let reference = Graph::from_triples(vec![typed(
            "http://example.org/10",
            "http://example.org/Person",
        )]);
        let config = EvalConfig::default();
        let metrics = BasicMetrics::new(&test, &reference, &config);

        let fuzzy = metrics.evaluate_subjects_fuzzy();
        assert_eq!((fuzzy.record.tp, fuzzy.record.fp, fuzzy.record.fn_), (2, 0, 0));
        assert!((0.0..=1.0).contains(&fuzzy.record.p));
        assert!((0.0..=1.0).contains(&fuzzy.record.r));
        assert!((0.0..=1.0).contains(&fuzzy.record.f1));
    }

    #[test]
    fn fuzzy_subjects_match_across_prefixes() {
        let test = Graph::from_triples(vec![typed(
            "http://test.example/resource/10",
            "http://example.org/Person",
        )]);
        let reference = Graph::from_triples(vec![typed(
            "http://example.org/person/10",
            "http://example.org/Person",
        )]);
        let config = EvalConfig::default();
        let metrics = BasicMetrics::new(&test, &reference, &config);

        let fuzzy = metrics.evaluate_subjects_fuzzy();
        assert_eq!(fuzzy.record.tp, 1);
        assert_eq!(fuzzy.record.f1, 1.0);
    }
}
