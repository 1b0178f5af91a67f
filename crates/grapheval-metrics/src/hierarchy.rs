//! Hierarchy-aware scoring.
//!
//! The reference graph is assumed to use the most specific classes and
//! properties the ontology offers. When the test graph reaches for a broader
//! ancestor instead, these scorers grant partial credit that decays with the
//! hierarchy distance, instead of the all-or-nothing verdict of the exact
//! facet metrics.
//!
//! Scoring convention for the hierarchy evaluations (deliberately preserved
//! from the system this replaces): **precision** is the mean per-pair
//! similarity, while **recall** is the fraction of the reference universe
//! covered by a pair with a positive score. F1 is the harmonic mean of those
//! two, which does not match classic count-based precision/recall semantics.

use crate::config::EvalConfig;
use crate::query::TriplePattern;
use crate::scores::{mean, multiset_overlap, MetricRecord};
use crate::EvalError;
use grapheval_rdf::Graph;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Node → `[node, parent, grandparent, …]`, most specific first.
pub type HierarchyPaths = BTreeMap<String, Vec<String>>;

/// One aligned (reference, test) identifier pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedPair {
    pub reference: String,
    pub test: String,
}

/// A scored (reference, test) resource pair.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPair {
    pub reference: String,
    pub test: String,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct ClassHierarchyReport {
    pub f1: f64,
    pub precision: f64,
    pub recall: f64,
    pub detailed_scores: Vec<ScoredPair>,
    pub reference_subjects: Vec<String>,
    pub test_subjects: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PropertyHierarchyReport {
    pub f1: f64,
    pub precision: f64,
    pub recall: f64,
    pub subject_alignments: Vec<AlignedPair>,
    pub property_alignments: Vec<(String, String)>,
    pub detailed_scores: Vec<ScoredPair>,
    pub reference_properties: Vec<String>,
    pub test_properties: Vec<String>,
}

/// Precision/recall/F1 under the mean-similarity convention.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HierarchyScore {
    pub f1: f64,
    pub precision: f64,
    pub recall: f64,
}

// ============================================================================
// Closure construction and similarity
// ============================================================================

/// Extract child → parent edges by running `pattern` over the ontology.
/// When a child declares several parents, the last edge observed wins; the
/// earlier parent is dropped from closure construction.
pub fn extract_relations(graph: &Graph, pattern: &TriplePattern, kind: &str) -> BTreeMap<String, String> {
    let mut edges: BTreeMap<String, String> = BTreeMap::new();
    for (child, parent) in pattern.subject_object_pairs(graph) {
        if let Some(previous) = edges.insert(child.clone(), parent.clone()) {
            if previous != parent {
                tracing::warn!(
                    kind,
                    child = %child,
                    kept = %parent,
                    dropped = %previous,
                    "multiple parents declared; keeping the last one"
                );
            }
        }
    }
    edges
}

/// Build the ordered ancestor chain for every node appearing in the edge
/// map, terminating when no further parent is recorded. A cycle in the
/// edges is a construction error, not an infinite walk.
pub fn build_transitive_closure(edges: &BTreeMap<String, String>) -> Result<HierarchyPaths, EvalError> {
    let nodes: BTreeSet<&String> = edges.keys().chain(edges.values()).collect();

    let mut closure = HierarchyPaths::new();
    for node in nodes {
        let mut path = vec![node.clone()];
        let mut visited: HashSet<&str> = HashSet::from([node.as_str()]);
        let mut current = node;
        while let Some(parent) = edges.get(current) {
            if !visited.insert(parent.as_str()) {
                return Err(EvalError::HierarchyCycle {
                    node: parent.clone(),
                });
            }
            path.push(parent.clone());
            current = parent;
        }
        closure.insert(node.clone(), path);
    }
    Ok(closure)
}

/// Similarity of a test resource against the reference resource:
///
/// - `1.0` on exact match;
/// - `0.5^d` when the test resource is an ancestor of the reference at
///   1-based distance `d` (the test used a broader class/property than
///   required);
/// - `0.0` when the test resource is *more specific* than the reference —
///   that direction earns no credit;
/// - `0.0` for unrelated resources.
pub fn hierarchy_similarity(reference: &str, test: &str, paths: &HierarchyPaths) -> f64 {
    if reference == test {
        return 1.0;
    }
    if let Some(path) = paths.get(reference) {
        if let Some(distance) = path.iter().position(|node| node == test) {
            return 0.5_f64.powi(distance as i32);
        }
    }
    // Covers both "test more specific than reference" and unrelated nodes.
    0.0
}

// ============================================================================
// Subject alignment
// ============================================================================

/// Pair test subjects with reference identifiers across differing IRI
/// minting schemes.
///
/// Every test subject under `base_iri` is matched against the trailing path
/// segments of the reference subjects; the first identifier (in sorted
/// order) appearing as a substring of the test subject wins, and the pair
/// `(base_iri + id, test_subject)` is recorded. At most one pair is emitted
/// per test subject.
pub fn align_subjects(test_graph: &Graph, reference_graph: &Graph, base_iri: &str) -> Vec<AlignedPair> {
    let test_subjects: BTreeSet<String> = test_graph
        .subjects()
        .map(|s| s.as_str().to_string())
        .collect();
    let reference_subjects: BTreeSet<String> = reference_graph
        .subjects()
        .map(|s| s.as_str().to_string())
        .collect();
    let reference_ids: BTreeSet<String> = reference_subjects
        .iter()
        .map(|s| s.rsplit('/').next().unwrap_or(s).to_string())
        .collect();

    let mut alignments = Vec::new();
    for test_subject in test_subjects {
        if !test_subject.starts_with(base_iri) {
            continue;
        }
        if let Some(ref_id) = reference_ids.iter().find(|id| test_subject.contains(id.as_str())) {
            alignments.push(AlignedPair {
                reference: format!("{base_iri}{ref_id}"),
                test: test_subject,
            });
        }
    }
    alignments
}

// ============================================================================
// Scorer
// ============================================================================

/// Hierarchy engine: owns the class/property closures and the subject
/// alignment, built once per evaluation and shared by every
/// hierarchy-aware metric.
pub struct HierarchyScorer<'g> {
    test_graph: &'g Graph,
    reference_graph: &'g Graph,
    class_paths: HierarchyPaths,
    property_paths: HierarchyPaths,
    subject_alignment: Vec<AlignedPair>,
    subject_class: TriplePattern,
    predicates_to_evaluate: Vec<String>,
}

impl<'g> HierarchyScorer<'g> {
    pub fn new(
        test_graph: &'g Graph,
        reference_graph: &'g Graph,
        ontology_graph: &Graph,
        config: &EvalConfig,
    ) -> Result<Self, EvalError> {
        let subclass = TriplePattern::parse(&config.queries.subclass)?;
        let subproperty = TriplePattern::parse(&config.queries.subproperty)?;
        let subject_class = TriplePattern::parse(&config.queries.subject_class)?;

        let class_paths =
            build_transitive_closure(&extract_relations(ontology_graph, &subclass, "class"))?;
        let property_paths =
            build_transitive_closure(&extract_relations(ontology_graph, &subproperty, "property"))?;
        let subject_alignment = align_subjects(test_graph, reference_graph, &config.base_iri);

        Ok(HierarchyScorer {
            test_graph,
            reference_graph,
            class_paths,
            property_paths,
            subject_alignment,
            subject_class,
            predicates_to_evaluate: config.predicate_iris(),
        })
    }

    pub fn subject_alignment(&self) -> &[AlignedPair] {
        &self.subject_alignment
    }

    pub fn class_similarity(&self, reference: &str, test: &str) -> f64 {
        hierarchy_similarity(reference, test, &self.class_paths)
    }

    pub fn property_similarity(&self, reference: &str, test: &str) -> f64 {
        hierarchy_similarity(reference, test, &self.property_paths)
    }

    /// Test subject → canonical reference identifier substitution map.
    fn subject_map(&self) -> HashMap<&str, &str> {
        self.subject_alignment
            .iter()
            .map(|pair| (pair.test.as_str(), pair.reference.as_str()))
            .collect()
    }

    fn subject_class_of(&self, subject: &str, graph: &Graph) -> Option<String> {
        self.subject_class
            .objects_for_subject(graph, subject)
            .into_iter()
            .next()
    }

    /// Per-occurrence (reference predicate, test predicate) matches: a
    /// reference triple and a test triple pair up whenever their
    /// subject+object composite keys agree under the alignment
    /// substitution. Every matching occurrence combination is kept.
    fn align_property_occurrences(&self) -> Vec<(String, String)> {
        let map = self.subject_map();

        let mut test_by_key: HashMap<String, Vec<&str>> = HashMap::new();
        for t in self.test_graph.iter() {
            let key = substituted_key(&map, t.subject.as_str(), t.object.value_str());
            test_by_key
                .entry(key)
                .or_default()
                .push(t.predicate.as_str());
        }

        let mut occurrences = Vec::new();
        for t in self.reference_graph.iter() {
            let key = format!("{}{}", t.subject.as_str(), t.object.value_str());
            if let Some(test_predicates) = test_by_key.get(&key) {
                for test_predicate in test_predicates {
                    occurrences.push((t.predicate.clone(), test_predicate.to_string()));
                }
            }
        }
        occurrences
    }

    /// Deduplicated (reference predicate, test predicate) pairs, sorted.
    fn align_property_pairs(&self) -> Vec<(String, String)> {
        let pairs: BTreeSet<(String, String)> =
            self.align_property_occurrences().into_iter().collect();
        pairs.into_iter().collect()
    }

    // ------------------------------------------------------------------
    // Hierarchy evaluations
    // ------------------------------------------------------------------

    /// Score the declared class of every aligned subject pair against the
    /// class hierarchy.
    pub fn evaluate_class_hierarchies(&self) -> ClassHierarchyReport {
        let reference_subjects: BTreeSet<String> = self
            .reference_graph
            .subjects()
            .map(|s| s.as_str().to_string())
            .collect();
        let test_subjects: BTreeSet<String> = self
            .test_graph
            .subjects()
            .map(|s| s.as_str().to_string())
            .collect();

        let mut detailed_scores = Vec::new();
        for pair in &self.subject_alignment {
            let reference_class = self.subject_class_of(&pair.reference, self.reference_graph);
            let test_class = self.subject_class_of(&pair.test, self.test_graph);
            if let (Some(reference), Some(test)) = (reference_class, test_class) {
                let score = self.class_similarity(&reference, &test);
                detailed_scores.push(ScoredPair {
                    reference,
                    test,
                    score,
                });
            }
        }

        let (f1, precision, recall) =
            mean_similarity_scores(&detailed_scores, reference_subjects.len());
        ClassHierarchyReport {
            f1,
            precision,
            recall,
            detailed_scores,
            reference_subjects: reference_subjects.into_iter().collect(),
            test_subjects: test_subjects.into_iter().collect(),
        }
    }

    /// Score aligned predicate pairs against the property hierarchy.
    pub fn evaluate_property_hierarchies(&self) -> PropertyHierarchyReport {
        let property_alignments = self.align_property_pairs();
        let reference_properties: BTreeSet<&str> = self.reference_graph.predicates().collect();
        let test_properties: BTreeSet<&str> = self.test_graph.predicates().collect();

        let detailed_scores: Vec<ScoredPair> = property_alignments
            .iter()
            .map(|(reference, test)| ScoredPair {
                reference: reference.clone(),
                test: test.clone(),
                score: self.property_similarity(reference, test),
            })
            .collect();

        let (f1, precision, recall) =
            mean_similarity_scores(&detailed_scores, reference_properties.len());
        PropertyHierarchyReport {
            f1,
            precision,
            recall,
            subject_alignments: self.subject_alignment.clone(),
            property_alignments,
            detailed_scores,
            reference_properties: reference_properties
                .into_iter()
                .map(str::to_string)
                .collect(),
            test_properties: test_properties.into_iter().map(str::to_string).collect(),
        }
    }

    /// Hierarchy score for one target predicate, over the per-occurrence
    /// alignment restricted to that predicate. The recall universe is the
    /// predicate's occurrence count in the reference graph.
    pub fn evaluate_single_property_hierarchy(&self, target: &str) -> HierarchyScore {
        let scores: Vec<f64> = self
            .align_property_occurrences()
            .into_iter()
            .filter(|(reference, _)| reference == target)
            .map(|(reference, test)| self.property_similarity(&reference, &test))
            .collect();

        let reference_uses = self
            .reference_graph
            .predicates()
            .filter(|p| *p == target)
            .count();

        let precision = mean(&scores);
        let matched = scores.iter().filter(|s| **s > 0.0).count();
        let recall = if reference_uses > 0 {
            matched as f64 / reference_uses as f64
        } else {
            0.0
        };
        HierarchyScore {
            f1: harmonic(precision, recall),
            precision,
            recall,
        }
    }

    pub fn evaluate_multiple_properties_hierarchy(
        &self,
        targets: &[String],
    ) -> BTreeMap<String, HierarchyScore> {
        targets
            .iter()
            .map(|t| (t.clone(), self.evaluate_single_property_hierarchy(t)))
            .collect()
    }

    // ------------------------------------------------------------------
    // Direct (exact) per-predicate evaluations
    // ------------------------------------------------------------------

    /// Exact-match evaluation of one predicate via composite
    /// (subject, predicate, object) keys under the alignment substitution.
    pub fn evaluate_property_direct(&self, target: &str) -> MetricRecord {
        let map = self.subject_map();

        let reference_keys: Vec<String> = self
            .reference_graph
            .iter()
            .filter(|t| t.predicate == target)
            .map(|t| format!("{}{}{}", t.subject.as_str(), t.predicate, t.object.value_str()))
            .collect();
        let test_keys: Vec<String> = self
            .test_graph
            .iter()
            .filter(|t| t.predicate == target)
            .map(|t| {
                format!(
                    "{}{}{}",
                    substitute(&map, t.subject.as_str()),
                    t.predicate,
                    substitute(&map, t.object.value_str())
                )
            })
            .collect();

        counts_from_overlap(&test_keys, &reference_keys)
    }

    /// Like [`evaluate_property_direct`](Self::evaluate_property_direct) but
    /// restricted to literal objects, with the literal's datatype tag folded
    /// into the key.
    pub fn evaluate_property_direct_with_datatype(&self, target: &str) -> MetricRecord {
        let map = self.subject_map();

        let reference_keys: Vec<String> = self
            .reference_graph
            .iter()
            .filter(|t| t.predicate == target)
            .filter_map(|t| {
                t.object.as_literal().map(|lit| {
                    format!(
                        "{}{}{}{}",
                        t.subject.as_str(),
                        t.predicate,
                        lit.lexical,
                        lit.datatype_key()
                    )
                })
            })
            .collect();
        let test_keys: Vec<String> = self
            .test_graph
            .iter()
            .filter(|t| t.predicate == target)
            .filter_map(|t| {
                t.object.as_literal().map(|lit| {
                    format!(
                        "{}{}{}{}",
                        substitute(&map, t.subject.as_str()),
                        t.predicate,
                        lit.lexical,
                        lit.datatype_key()
                    )
                })
            })
            .collect();

        counts_from_overlap(&test_keys, &reference_keys)
    }

    /// Detect a predicate used in the reverse direction: the test side's
    /// subject and object swap roles before key comparison.
    pub fn evaluate_property_inverse(&self, target: &str) -> MetricRecord {
        let map = self.subject_map();

        let reference_keys: Vec<String> = self
            .reference_graph
            .iter()
            .filter(|t| t.predicate == target)
            .map(|t| format!("{}{}{}", t.subject.as_str(), t.predicate, t.object.value_str()))
            .collect();
        let test_keys: Vec<String> = self
            .test_graph
            .iter()
            .filter(|t| t.predicate == target)
            .map(|t| {
                format!(
                    "{}{}{}",
                    substitute(&map, t.object.value_str()),
                    t.predicate,
                    substitute(&map, t.subject.as_str())
                )
            })
            .collect();

        counts_from_overlap(&test_keys, &reference_keys)
    }

    pub fn evaluate_all_properties_direct(&self) -> BTreeMap<String, MetricRecord> {
        self.predicates_to_evaluate
            .iter()
            .map(|p| (p.clone(), self.evaluate_property_direct(p)))
            .collect()
    }

    pub fn evaluate_all_properties_inverse(&self) -> BTreeMap<String, MetricRecord> {
        self.predicates_to_evaluate
            .iter()
            .map(|p| (p.clone(), self.evaluate_property_inverse(p)))
            .collect()
    }

    pub fn predicates_to_evaluate(&self) -> &[String] {
        &self.predicates_to_evaluate
    }
}

fn substitute<'a>(map: &HashMap<&str, &'a str>, value: &'a str) -> &'a str {
    map.get(value).copied().unwrap_or(value)
}

fn substituted_key(map: &HashMap<&str, &str>, subject: &str, object: &str) -> String {
    format!("{}{}", substitute(map, subject), substitute(map, object))
}

fn counts_from_overlap(test_keys: &[String], reference_keys: &[String]) -> MetricRecord {
    let tp = multiset_overlap(test_keys, reference_keys).len();
    MetricRecord::from_counts(tp, test_keys.len() - tp, reference_keys.len() - tp)
}

fn harmonic(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

fn mean_similarity_scores(scores: &[ScoredPair], reference_universe: usize) -> (f64, f64, f64) {
    let values: Vec<f64> = scores.iter().map(|s| s.score).collect();
    let precision = mean(&values);
    let matched = values.iter().filter(|s| **s > 0.0).count();
    let recall = if reference_universe > 0 {
        matched as f64 / reference_universe as f64
    } else {
        0.0
    };
    (harmonic(precision, recall), precision, recall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use grapheval_rdf::{Node, Term, Triple, RDF_TYPE_IRI};

    const RDFS_SUBCLASS: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";

    fn edges(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(child, parent)| (child.to_string(), parent.to_string()))
            .collect()
    }

    #[test]
    fn closure_orders_ancestors_most_specific_first() {
        let closure = build_transitive_closure(&edges(&[
            ("Employee", "Person"),
            ("Person", "Agent"),
        ]))
        .expect("closure");

        assert_eq!(
            closure.get("Employee").unwrap(),
            &vec!["Employee".to_string(), "Person".to_string(), "Agent".to_string()]
        );
        assert_eq!(closure.get("Agent").unwrap(), &vec!["Agent".to_string()]);
    }

    #[test]
    fn closure_rejects_cycles() {
        let result = build_transitive_closure(&edges(&[("A", "B"), ("B", "A")]));
        assert!(matches!(result, Err(EvalError::HierarchyCycle { .. })));
    }

    #[test]
    fn last_parent_wins_on_multiple_inheritance() {
        let ontology = Graph::from_triples(vec![
            Triple::new(Node::iri("ex:Child"), RDFS_SUBCLASS, Term::iri("ex:First")),
            Triple::new(Node::iri("ex:Child"), RDFS_SUBCLASS, Term::iri("ex:Second")),
        ]);
        let pattern = TriplePattern::parse("?sub rdfs:subClassOf ?super").unwrap();
        let relations = extract_relations(&ontology, &pattern, "class");
        assert_eq!(relations.get("ex:Child").map(String::as_str), Some("ex:Second"));
    }

    #[test]
    fn similarity_decays_with_distance_and_is_asymmetric() {
        let paths = build_transitive_closure(&edges(&[
            ("Employee", "Person"),
            ("Person", "Agent"),
        ]))
        .expect("closure");

        assert_relative_eq!(hierarchy_similarity("Employee", "Employee", &paths), 1.0);
        assert_relative_eq!(hierarchy_similarity("Employee", "Person", &paths), 0.5);
        assert_relative_eq!(hierarchy_similarity("Employee", "Agent", &paths), 0.25);
        // Using a class *more specific* than the reference earns nothing.
        assert_relative_eq!(hierarchy_similarity("Person", "Employee", &paths), 0.0);
        assert_relative_eq!(hierarchy_similarity("Employee", "Unrelated", &paths), 0.0);
    }

    fn alignment_fixture() -> (Graph, Graph) {
        let reference = Graph::from_triples(vec![
            Triple::new(
                Node::iri("http://example.org/10"),
                RDF_TYPE_IRI,
                Term::iri("http://example.org/Person"),
            ),
            Triple::new(
                Node::iri("http://example.org/20"),
                RDF_TYPE_IRI,
                Term::iri("http://example.org/Person"),
            ),
        ]);
        let test = Graph::from_triples(vec![
            Triple::new(
                Node::iri("http://example.org/person_10"),
                RDF_TYPE_IRI,
                Term::iri("http://example.org/Person"),
            ),
            Triple::new(
                Node::iri("http://example.org/person_20"),
                RDF_TYPE_IRI,
                Term::iri("http://example.org/Person"),
            ),
            Triple::new(
                Node::iri("http://other.example/unrelated"),
                RDF_TYPE_IRI,
                Term::iri("http://example.org/Person"),
            ),
        ]);
        (test, reference)
    }

    #[test]
    fn alignment_emits_at_most_one_pair_per_test_subject() {
        let (test, reference) = alignment_fixture();
        let alignment = align_subjects(&test, &reference, "http://example.org/");

        assert_eq!(alignment.len(), 2);
        let test_sides: BTreeSet<&str> = alignment.iter().map(|p| p.test.as_str()).collect();
        assert_eq!(test_sides.len(), alignment.len());
        assert!(alignment.iter().any(|p| p.reference == "http://example.org/10"
            && p.test == "http://example.org/person_10"));
    }

    #[test]
    fn direct_property_evaluation_substitutes_aligned_subjects() {
        let reference = Graph::from_triples(vec![Triple::new(
            Node::iri("http://example.org/10"),
            "http://example.org/name",
            Term::literal("Alice"),
        )]);
        let test = Graph::from_triples(vec![Triple::new(
            Node::iri("http://example.org/person_10"),
            "http://example.org/name",
            Term::literal("Alice"),
        )]);
        let ontology = Graph::new();
        let config = EvalConfig {
            base_iri: "http://example.org/".to_string(),
            ..EvalConfig::default()
        };

        let scorer = HierarchyScorer::new(&test, &reference, &ontology, &config).expect("scorer");
        let record = scorer.evaluate_property_direct("http://example.org/name");
        assert_eq!((record.tp, record.fp, record.fn_), (1, 0, 0));
        assert_eq!(record.f1, 1.0);
    }

    #[test]
    fn class_hierarchy_grants_partial_credit_for_broader_class() {
        // Reference types its subject with the specific class, the test
        // graph with the broader parent.
        let ontology = Graph::from_triples(vec![Triple::new(
            Node::iri("http://example.org/Employee"),
            RDFS_SUBCLASS,
            Term::iri("http://example.org/Person"),
        )]);
        let reference = Graph::from_triples(vec![Triple::new(
            Node::iri("http://example.org/10"),
            RDF_TYPE_IRI,
            Term::iri("http://example.org/Employee"),
        )]);
        let test = Graph::from_triples(vec![Triple::new(
            Node::iri("http://example.org/person_10"),
            RDF_TYPE_IRI,
            Term::iri("http://example.org/Person"),
        )]);
        let config = EvalConfig {
            base_iri: "http://example.org/".to_string(),
            ..EvalConfig::default()
        };

        let scorer = HierarchyScorer::new(&test, &reference, &ontology, &config).expect("scorer");
        let report = scorer.evaluate_class_hierarchies();

        assert_eq!(report.detailed_scores.len(), 1);
        assert_relative_eq!(report.detailed_scores[0].score, 0.5);
        assert_relative_eq!(report.precision, 0.5);
        assert_relative_eq!(report.recall, 1.0);
    }

    #[test]
    fn inverse_property_detects_swapped_direction() {
        let reference = Graph::from_triples(vec![Triple::new(
            Node::iri("http://example.org/10"),
            "http://example.org/manages",
            Term::iri("http://example.org/20"),
        )]);
        // Test graph asserts the fact in the opposite direction.
        let test = Graph::from_triples(vec![Triple::new(
            Node::iri("http://example.org/20"),
            "http://example.org/manages",
            Term::iri("http://example.org/10"),
        )]);
        let ontology = Graph::new();
        let config = EvalConfig {
            base_iri: "http://example.org/".to_string(),
            ..EvalConfig::default()
        };

        let scorer = HierarchyScorer::new(&test, &reference, &ontology, &config).expect("scorer");
        assert_eq!(scorer.evaluate_property_direct("http://example.org/manages").tp, 0);
        assert_eq!(scorer.evaluate_property_inverse("http://example.org/manages").tp, 1);
    }

    #[test]
    fn single_property_hierarchy_scores_per_occurrence() {
        let ontology = Graph::from_triples(vec![Triple::new(
            Node::iri("http://example.org/familyName"),
            "http://www.w3.org/2000/01/rdf-schema#subPropertyOf",
            Term::iri("http://example.org/name"),
        )]);
        let reference = Graph::from_triples(vec![Triple::new(
            Node::iri("http://example.org/10"),
            "http://example.org/familyName",
            Term::literal("Doe"),
        )]);
        // Same fact asserted through the broader parent property.
        let test = Graph::from_triples(vec![Triple::new(
            Node::iri("http://example.org/person_10"),
            "http://example.org/name",
            Term::literal("Doe"),
        )]);
        let config = EvalConfig {
            base_iri: "http://example.org/".to_string(),
            ..EvalConfig::default()
        };

        let scorer = HierarchyScorer::new(&test, &reference, &ontology, &config).expect("scorer");
        let score = scorer.evaluate_single_property_hierarchy("http://example.org/familyName");
        assert_relative_eq!(score.precision, 0.5);
        assert_relative_eq!(score.recall, 1.0);
    }
}
