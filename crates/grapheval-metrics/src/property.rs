//! Property facet metrics: predicates and predicate×datatype pairs.

use crate::scores::{multiset_overlap, MetricRecord};
use grapheval_rdf::Graph;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Serialize)]
pub struct PropertyObjectReport {
    pub test_po: Vec<String>,
    pub reference_po: Vec<String>,
    #[serde(flatten)]
    pub record: MetricRecord,
}

#[derive(Debug, Serialize)]
pub struct PredicateDatatypeReport {
    pub test_p_datatype: Vec<String>,
    pub reference_p_datatype: Vec<String>,
    #[serde(flatten)]
    pub record: MetricRecord,
}

pub struct PropertyMetrics<'g> {
    test_graph: &'g Graph,
    reference_graph: &'g Graph,
}

impl<'g> PropertyMetrics<'g> {
    pub fn new(test_graph: &'g Graph, reference_graph: &'g Graph) -> Self {
        PropertyMetrics {
            test_graph,
            reference_graph,
        }
    }

    /// Predicate usage counting duplicates: a predicate used N times in the
    /// reference and M times in the test contributes `min(N, M)` matches.
    pub fn evaluate_properties(&self) -> MetricRecord {
        let test: Vec<&str> = self.test_graph.predicates().collect();
        let reference: Vec<&str> = self.reference_graph.predicates().collect();

        let tp = multiset_overlap(&test, &reference).len();
        MetricRecord::from_counts(tp, test.len() - tp, reference.len() - tp)
    }

    /// Distinct predicate+object pairs.
    pub fn evaluate_properties_unique(&self) -> PropertyObjectReport {
        let test: BTreeSet<String> = self
            .test_graph
            .iter()
            .map(|t| format!("{}{}", t.predicate, t.object.value_str()))
            .collect();
        let reference: BTreeSet<String> = self
            .reference_graph
            .iter()
            .map(|t| format!("{}{}", t.predicate, t.object.value_str()))
            .collect();

        let tp = test.intersection(&reference).count();
        let record = MetricRecord::from_counts(tp, test.len() - tp, reference.len() - tp);
        PropertyObjectReport {
            test_po: test.into_iter().collect(),
            reference_po: reference.into_iter().collect(),
            record,
        }
    }

    /// Predicate+datatype keys over literal objects, counting duplicates.
    pub fn evaluate_predicate_datatypes(&self) -> PredicateDatatypeReport {
        let test = predicate_datatype_keys(self.test_graph);
        let reference = predicate_datatype_keys(self.reference_graph);

        let tp = multiset_overlap(&test, &reference).len();
        let record = MetricRecord::from_counts(tp, test.len() - tp, reference.len() - tp);
        PredicateDatatypeReport {
            test_p_datatype: test,
            reference_p_datatype: reference,
            record,
        }
    }

    /// Distinct predicate+datatype keys over literal objects.
    pub fn evaluate_predicate_datatypes_unique(&self) -> PredicateDatatypeReport {
        let test: BTreeSet<String> = predicate_datatype_keys(self.test_graph).into_iter().collect();
        let reference: BTreeSet<String> = predicate_datatype_keys(self.reference_graph)
            .into_iter()
            .collect();

        let tp = test.intersection(&reference).count();
        let record = MetricRecord::from_counts(tp, test.len() - tp, reference.len() - tp);
        PredicateDatatypeReport {
            test_p_datatype: test.into_iter().collect(),
            reference_p_datatype: reference.into_iter().collect(),
            record,
        }
    }

    /// True when every reference predicate also appears in the test graph.
    pub fn all_reference_predicates_present(&self) -> bool {
        let test: BTreeSet<&str> = self.test_graph.predicates().collect();
        let reference: BTreeSet<&str> = self.reference_graph.predicates().collect();
        reference.iter().all(|p| test.contains(p))
    }

    /// True when the test graph uses no predicate outside the reference set.
    pub fn only_reference_predicates_present(&self) -> bool {
        let test: BTreeSet<&str> = self.test_graph.predicates().collect();
        let reference: BTreeSet<&str> = self.reference_graph.predicates().collect();
        test.iter().all(|p| reference.contains(p))
    }
}

/// `predicate + datatype` key per literal-valued triple; a missing datatype
/// renders as `"None"`.
fn predicate_datatype_keys(graph: &Graph) -> Vec<String> {
    graph
        .iter()
        .filter_map(|t| {
            t.object
                .as_literal()
                .map(|lit| format!("{}{}", t.predicate, lit.datatype_key()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grapheval_rdf::{Literal, Node, Term, Triple};

    const XSD_INT: &str = "http://www.w3.org/2001/XMLSchema#integer";

    fn with_age(datatype: Option<&str>) -> Graph {
        let literal = match datatype {
            Some(dt) => Term::Literal(Literal::typed("42", dt)),
            None => Term::literal("42"),
        };
        Graph::from_triples(vec![Triple::new(
            Node::iri("http://example.org/a"),
            "http://example.org/age",
            literal,
        )])
    }

    #[test]
    fn datatype_mismatch_is_a_false_positive() {
        let test = with_age(None);
        let reference = with_age(Some(XSD_INT));
        let metrics = PropertyMetrics::new(&test, &reference);

        let report = metrics.evaluate_predicate_datatypes();
        assert_eq!((report.record.tp, report.record.fp, report.record.fn_), (0, 1, 1));
        assert_eq!(report.test_p_datatype, vec!["http://example.org/ageNone"]);
    }

    #[test]
    fn duplicate_predicate_usage_counts_per_occurrence() {
        let mut test = with_age(Some(XSD_INT));
        test.insert(Triple::new(
            Node::iri("http://example.org/b"),
            "http://example.org/age",
            Term::Literal(Literal::typed("7", XSD_INT)),
        ));
        let reference = with_age(Some(XSD_INT));
        let metrics = PropertyMetrics::new(&test, &reference);

        let props = metrics.evaluate_properties();
        assert_eq!((props.tp, props.fp, props.fn_), (1, 1, 0));
    }

    #[test]
    fn predicate_presence_checks() {
        let test = with_age(Some(XSD_INT));
        let mut reference = with_age(Some(XSD_INT));
        reference.insert(Triple::new(
            Node::iri("http://example.org/a"),
            "http://example.org/name",
            Term::literal("Alice"),
        ));
        let metrics = PropertyMetrics::new(&test, &reference);

        assert!(!metrics.all_reference_predicates_present());
        assert!(metrics.only_reference_predicates_present());
    }
}
