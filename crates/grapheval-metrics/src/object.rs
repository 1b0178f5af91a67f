//! Object facet metrics: all objects, IRI objects, literal objects.

use crate::scores::{multiset_overlap, MetricRecord};
use grapheval_rdf::Graph;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ObjectsReport {
    pub test_objects: Vec<String>,
    pub reference_objects: Vec<String>,
    #[serde(flatten)]
    pub record: MetricRecord,
}

#[derive(Debug, Serialize)]
pub struct ObjectUrisReport {
    pub test_uris: Vec<String>,
    pub reference_uris: Vec<String>,
    #[serde(flatten)]
    pub record: MetricRecord,
}

#[derive(Debug, Serialize)]
pub struct ObjectLiteralsReport {
    pub test_literals: Vec<String>,
    pub reference_literals: Vec<String>,
    #[serde(flatten)]
    pub record: MetricRecord,
}

pub struct ObjectMetrics<'g> {
    test_graph: &'g Graph,
    reference_graph: &'g Graph,
}

impl<'g> ObjectMetrics<'g> {
    pub fn new(test_graph: &'g Graph, reference_graph: &'g Graph) -> Self {
        ObjectMetrics {
            test_graph,
            reference_graph,
        }
    }

    /// Every object value (IRIs and literal lexical forms), counting
    /// duplicates.
    pub fn evaluate_objects(&self) -> ObjectsReport {
        let test: Vec<String> = self
            .test_graph
            .objects()
            .map(|o| o.value_str().to_string())
            .collect();
        let reference: Vec<String> = self
            .reference_graph
            .objects()
            .map(|o| o.value_str().to_string())
            .collect();

        let tp = multiset_overlap(&test, &reference).len();
        let record = MetricRecord::from_counts(tp, test.len() - tp, reference.len() - tp);
        ObjectsReport {
            test_objects: test,
            reference_objects: reference,
            record,
        }
    }

    /// IRI objects only.
    pub fn evaluate_object_uris(&self) -> ObjectUrisReport {
        let test: Vec<String> = self
            .test_graph
            .objects()
            .filter(|o| o.is_iri())
            .map(|o| o.value_str().to_string())
            .collect();
        let reference: Vec<String> = self
            .reference_graph
            .objects()
            .filter(|o| o.is_iri())
            .map(|o| o.value_str().to_string())
            .collect();

        let tp = multiset_overlap(&test, &reference).len();
        let record = MetricRecord::from_counts(tp, test.len() - tp, reference.len() - tp);
        ObjectUrisReport {
            test_uris: test,
            reference_uris: reference,
            record,
        }
    }

    /// Literal objects matched on lexical form, ignoring datatypes. The
    /// datatype-aware comparison lives in the property facet.
    pub fn evaluate_object_literals(&self) -> ObjectLiteralsReport {
        let test: Vec<String> = self
            .test_graph
            .objects()
            .filter(|o| o.is_literal())
            .map(|o| o.value_str().to_string())
            .collect();
        let reference: Vec<String> = self
            .reference_graph
            .objects()
            .filter(|o| o.is_literal())
            .map(|o| o.value_str().to_string())
            .collect();

        let tp = multiset_overlap(&test, &reference).len();
        let record = MetricRecord::from_counts(tp, test.len() - tp, reference.len() - tp);
        ObjectLiteralsReport {
            test_literals: test,
            reference_literals: reference,
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grapheval_rdf::{Literal, Node, Term, Triple};

    fn graphs() -> (Graph, Graph) {
        let test = Graph::from_triples(vec![
            Triple::new(
                Node::iri("http://example.org/a"),
                "http://example.org/knows",
                Term::iri("http://example.org/b"),
            ),
            Triple::new(
                Node::iri("http://example.org/a"),
                "http://example.org/name",
                Term::literal("Alice"),
            ),
        ]);
        let reference = Graph::from_triples(vec![
            Triple::new(
                Node::iri("http://example.org/a"),
                "http://example.org/knows",
                Term::iri("http://example.org/b"),
            ),
            Triple::new(
                Node::iri("http://example.org/a"),
                "http://example.org/name",
                Term::Literal(Literal::typed(
                    "Alice",
                    "http://www.w3.org/2001/XMLSchema#string",
                )),
            ),
        ]);
        (test, reference)
    }

    #[test]
    fn splits_objects_by_kind() {
        let (test, reference) = graphs();
        let metrics = ObjectMetrics::new(&test, &reference);

        let uris = metrics.evaluate_object_uris();
        assert_eq!(uris.record.tp, 1);
        assert_eq!(uris.test_uris, vec!["http://example.org/b"]);

        // Lexical comparison ignores the reference's string datatype.
        let literals = metrics.evaluate_object_literals();
        assert_eq!(literals.record.tp, 1);
        assert_eq!(literals.record.f1, 1.0);

        let all = metrics.evaluate_objects();
        assert_eq!((all.record.tp, all.record.fp, all.record.fn_), (2, 0, 0));
    }
}
