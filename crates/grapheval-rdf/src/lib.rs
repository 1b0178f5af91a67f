//! RDF term model and in-memory graph for grapheval.
//!
//! Graphs are plain triple collections: no storage layer, no indexes beyond
//! what the metric calculators need, and immutable for the duration of an
//! evaluation. Parsing (N-Triples, Turtle, RDF/XML via Sophia) lives in
//! [`parse`].

pub mod parse;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use parse::{detect_format, RdfError, RdfFormat};

pub const RDF_TYPE_IRI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

// ============================================================================
// Term model
// ============================================================================

/// A subject or object position node: an IRI or a blank node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Node {
    Iri(String),
    BlankNode(String),
}

impl Node {
    pub fn iri(iri: impl Into<String>) -> Self {
        Node::Iri(iri.into())
    }

    /// The identifier string used for key building and alignment: the IRI
    /// itself, or the blank node label.
    pub fn as_str(&self) -> &str {
        match self {
            Node::Iri(iri) => iri,
            Node::BlankNode(label) => label,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Node::Iri(_))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A literal value with an optional datatype tag and language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl Literal {
    pub fn plain(lexical: impl Into<String>) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// Datatype rendering used in comparison keys. A missing datatype renders
    /// as `"None"` so that untyped literals still produce a distinct,
    /// comparable key.
    pub fn datatype_key(&self) -> &str {
        self.datatype.as_deref().unwrap_or("None")
    }
}

/// An object position term: a node or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Node(Node),
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Node(Node::Iri(iri.into()))
    }

    pub fn literal(lexical: impl Into<String>) -> Self {
        Term::Literal(Literal::plain(lexical))
    }

    /// The value string used for key building: IRI, blank node label, or the
    /// literal's lexical form.
    pub fn value_str(&self) -> &str {
        match self {
            Term::Node(node) => node.as_str(),
            Term::Literal(lit) => &lit.lexical,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Node(Node::Iri(_)))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            Term::Node(_) => None,
        }
    }
}

/// A single (subject, predicate, object) statement. Predicates are always
/// IRIs; statements with non-IRI predicates are dropped at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Node,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Node, predicate: impl Into<String>, object: Term) -> Self {
        Triple {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

// ============================================================================
// Graph
// ============================================================================

/// An unordered, in-memory triple collection.
///
/// Prefix declarations seen while parsing Turtle are retained so that
/// downstream configuration auto-extraction can recover namespace mappings.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    prefixes: BTreeMap<String, String>,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    pub fn from_triples(triples: Vec<Triple>) -> Self {
        Graph {
            triples,
            prefixes: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    pub fn declare_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Prefix → namespace declarations captured at parse time.
    pub fn prefixes(&self) -> &BTreeMap<String, String> {
        &self.prefixes
    }

    /// Subject of every triple, one per occurrence.
    pub fn subjects(&self) -> impl Iterator<Item = &Node> {
        self.triples.iter().map(|t| &t.subject)
    }

    /// Predicate of every triple, one per occurrence.
    pub fn predicates(&self) -> impl Iterator<Item = &str> {
        self.triples.iter().map(|t| t.predicate.as_str())
    }

    /// Object of every triple, one per occurrence.
    pub fn objects(&self) -> impl Iterator<Item = &Term> {
        self.triples.iter().map(|t| &t.object)
    }

    /// Objects of triples whose predicate equals `predicate`, one per
    /// occurrence.
    pub fn objects_with_predicate<'g>(
        &'g self,
        predicate: &'g str,
    ) -> impl Iterator<Item = &'g Term> {
        self.triples
            .iter()
            .filter(move |t| t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Subjects of triples matching both `predicate` and the IRI `object`.
    pub fn subjects_with<'g>(
        &'g self,
        predicate: &'g str,
        object_iri: &'g str,
    ) -> impl Iterator<Item = &'g Node> {
        self.triples
            .iter()
            .filter(move |t| {
                t.predicate == predicate
                    && matches!(&t.object, Term::Node(Node::Iri(iri)) if iri == object_iri)
            })
            .map(|t| &t.subject)
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Graph::from_triples(iter.into_iter().collect())
    }
}

impl<'g> IntoIterator for &'g Graph {
    type Item = &'g Triple;
    type IntoIter = std::slice::Iter<'g, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        Graph::from_triples(vec![
            Triple::new(
                Node::iri("http://example.org/a"),
                RDF_TYPE_IRI,
                Term::iri("http://example.org/Person"),
            ),
            Triple::new(
                Node::iri("http://example.org/a"),
                "http://example.org/name",
                Term::literal("Alice"),
            ),
            Triple::new(
                Node::iri("http://example.org/b"),
                RDF_TYPE_IRI,
                Term::iri("http://example.org/Person"),
            ),
        ])
    }

    #[test]
    fn projections_preserve_occurrences() {
        let g = sample();
        assert_eq!(g.len(), 3);
        assert_eq!(g.subjects().count(), 3);
        assert_eq!(g.objects_with_predicate(RDF_TYPE_IRI).count(), 2);
    }

    #[test]
    fn subjects_with_filters_on_predicate_and_object() {
        let g = sample();
        let typed: Vec<_> = g
            .subjects_with(RDF_TYPE_IRI, "http://example.org/Person")
            .collect();
        assert_eq!(typed.len(), 2);
        assert!(typed.iter().all(|n| n.is_iri()));
    }

    #[test]
    fn literal_datatype_key_falls_back_to_none() {
        let plain = Literal::plain("42");
        let typed = Literal::typed("42", "http://www.w3.org/2001/XMLSchema#integer");
        assert_eq!(plain.datatype_key(), "None");
        assert_eq!(typed.datatype_key(), "http://www.w3.org/2001/XMLSchema#integer");
    }
}
