//! Parametrized triple-pattern templates for hierarchy lookups.
//!
//! The engine never needs general query planning: every ontology lookup is a
//! single triple pattern ("?sub rdfs:subClassOf ?super", "?s a ?class")
//! executed by a linear scan. Templates are parsed once from the
//! configuration strings and reused for the whole evaluation.

use crate::EvalError;
use grapheval_rdf::{Graph, Node, Term};

const BUILTIN_PREFIXES: &[(&str, &str)] = &[
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

/// One slot of a triple pattern: a variable or a concrete IRI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermPattern {
    Var(String),
    Iri(String),
}

impl TermPattern {
    fn matches_node(&self, node: &Node) -> bool {
        match self {
            TermPattern::Var(_) => true,
            TermPattern::Iri(iri) => matches!(node, Node::Iri(n) if n == iri),
        }
    }

    fn matches_iri(&self, iri: &str) -> bool {
        match self {
            TermPattern::Var(_) => true,
            TermPattern::Iri(expected) => expected == iri,
        }
    }

    fn matches_term(&self, term: &Term) -> bool {
        match self {
            TermPattern::Var(_) => true,
            TermPattern::Iri(iri) => matches!(term, Term::Node(Node::Iri(n)) if n == iri),
        }
    }
}

/// A single (subject, predicate, object) pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: TermPattern,
    pub predicate: TermPattern,
    pub object: TermPattern,
}

impl TriplePattern {
    /// Parse a SPARQL-style single pattern: three whitespace-separated terms,
    /// each `?var`, `<iri>`, `prefix:local` (rdf/rdfs/owl/xsd) or the `a`
    /// keyword, with an optional trailing `.`.
    pub fn parse(template: &str) -> Result<Self, EvalError> {
        let cleaned = template.trim().trim_end_matches('.').trim();
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(EvalError::Pattern {
                template: template.to_string(),
                message: format!("expected 3 terms, found {}", tokens.len()),
            });
        }

        Ok(TriplePattern {
            subject: parse_term_pattern(tokens[0], template)?,
            predicate: parse_term_pattern(tokens[1], template)?,
            object: parse_term_pattern(tokens[2], template)?,
        })
    }

    /// (subject value, object value) for every matching triple, in graph
    /// order. Used for subclass/subproperty edge extraction.
    pub fn subject_object_pairs(&self, graph: &Graph) -> Vec<(String, String)> {
        graph
            .iter()
            .filter(|t| {
                self.subject.matches_node(&t.subject)
                    && self.predicate.matches_iri(&t.predicate)
                    && self.object.matches_term(&t.object)
            })
            .map(|t| {
                (
                    t.subject.as_str().to_string(),
                    t.object.value_str().to_string(),
                )
            })
            .collect()
    }

    /// Object values of matching triples with the subject slot bound to a
    /// concrete identifier. Used for "class of subject" lookups.
    pub fn objects_for_subject(&self, graph: &Graph, subject: &str) -> Vec<String> {
        graph
            .iter()
            .filter(|t| {
                t.subject.as_str() == subject
                    && self.predicate.matches_iri(&t.predicate)
                    && self.object.matches_term(&t.object)
            })
            .map(|t| t.object.value_str().to_string())
            .collect()
    }
}

fn parse_term_pattern(token: &str, template: &str) -> Result<TermPattern, EvalError> {
    if token == "a" {
        return Ok(TermPattern::Iri(
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type".to_string(),
        ));
    }
    if let Some(var) = token.strip_prefix('?') {
        return Ok(TermPattern::Var(var.to_string()));
    }
    if let Some(iri) = token.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Ok(TermPattern::Iri(iri.to_string()));
    }
    if let Some((prefix, local)) = token.split_once(':') {
        if let Some((_, ns)) = BUILTIN_PREFIXES.iter().find(|(p, _)| *p == prefix) {
            return Ok(TermPattern::Iri(format!("{ns}{local}")));
        }
        return Err(EvalError::Pattern {
            template: template.to_string(),
            message: format!("unknown prefix: {prefix}"),
        });
    }
    Err(EvalError::Pattern {
        template: template.to_string(),
        message: format!("unrecognized term: {token}"),
    })
}
