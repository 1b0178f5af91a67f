//! Evaluation configuration.
//!
//! `EvalConfig` is a plain value constructed by the caller (typically
//! deserialized from JSON by the CLI) and passed by reference into the
//! evaluator. Fields left empty are auto-completed by inspecting the
//! ontology graph (namespaces, predicates to evaluate) and the reference
//! graph (expected entity identifiers per type), optionally through an
//! injected [`ExtractionCache`].

use crate::cache::{CacheKey, ExtractedSchema, ExtractionCache};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";

/// Prefixes never treated as domain namespaces during auto-extraction.
const RESERVED_PREFIXES: &[&str] = &["", "xml", "rdf", "rdfs", "xsd", "owl"];

use grapheval_rdf::{Graph, RDF_TYPE_IRI};

/// Triple-pattern templates for the fixed set of ontology lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryTemplates {
    /// Subclass edges: subject = subclass, object = superclass.
    pub subclass: String,
    /// Subproperty edges: subject = subproperty, object = superproperty.
    pub subproperty: String,
    /// Declared class of a subject.
    pub subject_class: String,
    /// Properties used by a subject.
    pub subject_property: String,
}

impl Default for QueryTemplates {
    fn default() -> Self {
        QueryTemplates {
            subclass: "?sub rdfs:subClassOf ?super .".to_string(),
            subproperty: "?sub rdfs:subPropertyOf ?super .".to_string(),
            subject_class: "?s a ?class .".to_string(),
            subject_property: "?s ?property ?o .".to_string(),
        }
    }
}

/// Fully-resolved evaluation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Path of the ontology source; only used to derive the extraction
    /// cache key. Loading the ontology itself is the caller's job.
    pub ontology_file: Option<PathBuf>,

    /// The typing predicate. Defaults to the standard RDF type IRI.
    pub rdf_type_iri: String,

    /// Base IRI prefix of entity subjects; used for identifier extraction
    /// and subject alignment.
    pub base_iri: String,

    /// Expected identifier strings per entity type. Auto-extracted from the
    /// reference graph when empty.
    pub ids_by_type: BTreeMap<String, Vec<String>>,

    /// Prefix → namespace IRI. Auto-extracted from the ontology when empty.
    pub namespaces: BTreeMap<String, String>,

    /// Predicates of interest, as prefix → local names. Auto-extracted from
    /// the ontology's OWL property declarations when empty.
    pub predicates_to_evaluate: BTreeMap<String, Vec<String>>,

    pub queries: QueryTemplates,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            ontology_file: None,
            rdf_type_iri: RDF_TYPE_IRI.to_string(),
            base_iri: String::new(),
            ids_by_type: BTreeMap::new(),
            namespaces: BTreeMap::new(),
            predicates_to_evaluate: BTreeMap::new(),
            queries: QueryTemplates::default(),
        }
    }
}

impl EvalConfig {
    /// Expand `predicates_to_evaluate` into full IRIs via the namespace map.
    /// Local names under a prefix with no known namespace are skipped.
    pub fn predicate_iris(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (prefix, locals) in &self.predicates_to_evaluate {
            let Some(namespace) = self.namespaces.get(prefix) else {
                continue;
            };
            for local in locals {
                out.push(format!("{namespace}{local}"));
            }
        }
        out
    }

    /// Fill empty `namespaces` / `predicates_to_evaluate` from the ontology
    /// graph, consulting the cache when one is injected and an
    /// `ontology_file` is configured. Fields already populated are left
    /// untouched.
    pub fn complete_from_ontology(
        &mut self,
        ontology: &Graph,
        cache: Option<&dyn ExtractionCache>,
    ) {
        if !self.namespaces.is_empty() && !self.predicates_to_evaluate.is_empty() {
            return;
        }

        let key = match (cache, &self.ontology_file) {
            (Some(_), Some(path)) => CacheKey::from_path(path),
            _ => None,
        };

        if let (Some(cache), Some(key)) = (cache, &key) {
            if let Some(schema) = cache.load(key) {
                self.apply_extracted(schema);
                return;
            }
        }

        let schema = extract_schema(ontology);
        self.apply_extracted(schema.clone());

        if let (Some(cache), Some(key)) = (cache, &key) {
            cache.store(key, &schema);
        }
    }

    fn apply_extracted(&mut self, schema: ExtractedSchema) {
        if self.namespaces.is_empty() {
            self.namespaces = schema.namespaces;
        }
        if self.predicates_to_evaluate.is_empty() {
            self.predicates_to_evaluate = schema.predicates_by_namespace;
        }
    }

    /// Fill an empty `ids_by_type` from the reference graph: for every typed
    /// subject under `base_iri`, record the trailing path segment as the
    /// expected identifier of its type. Handles nested paths, so
    /// `http://example.org/person/10` yields `10`.
    pub fn complete_ids_from_reference(&mut self, reference: &Graph) {
        if !self.ids_by_type.is_empty() || self.base_iri.is_empty() {
            return;
        }

        let mut ids_by_type: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for triple in reference.iter() {
            if triple.predicate != self.rdf_type_iri {
                continue;
            }
            let subject = triple.subject.as_str();
            let Some(tail) = subject.strip_prefix(self.base_iri.as_str()) else {
                continue;
            };
            let entity_id = tail.rsplit('/').next().unwrap_or(tail);
            if entity_id.is_empty() {
                continue;
            }

            let entity_type = triple.object.value_str().to_string();
            let ids = ids_by_type.entry(entity_type).or_default();
            if !ids.iter().any(|id| id == entity_id) {
                ids.push(entity_id.to_string());
            }
        }

        self.ids_by_type = ids_by_type;
    }
}

/// Inspect the ontology graph: namespaces come from the prefix declarations
/// captured at parse time (reserved prefixes dropped); evaluable predicates
/// are the OWL datatype/object property declarations, grouped under the
/// namespace that contains them.
fn extract_schema(ontology: &Graph) -> ExtractedSchema {
    let mut namespaces: BTreeMap<String, String> = BTreeMap::new();
    for (prefix, namespace) in ontology.prefixes() {
        if RESERVED_PREFIXES.contains(&prefix.as_str()) {
            continue;
        }
        namespaces.insert(prefix.clone(), namespace.clone());
    }

    let mut predicates_by_namespace: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for property_type in [OWL_DATATYPE_PROPERTY, OWL_OBJECT_PROPERTY] {
        for prop in ontology.subjects_with(RDF_TYPE_IRI, property_type) {
            let prop_iri = prop.as_str();
            for (prefix, namespace) in &namespaces {
                if let Some(local) = prop_iri.strip_prefix(namespace.as_str()) {
                    let locals = predicates_by_namespace.entry(prefix.clone()).or_default();
                    if !locals.iter().any(|l| l == local) {
                        locals.push(local.to_string());
                    }
                    break;
                }
            }
        }
    }

    ExtractedSchema {
        namespaces,
        predicates_by_namespace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FsExtractionCache;
    use grapheval_rdf::{Node, Term, Triple};

    fn ontology() -> Graph {
        let mut g = Graph::from_triples(vec![
            Triple::new(
                Node::iri("http://example.org/hasName"),
                RDF_TYPE_IRI,
                Term::iri(OWL_DATATYPE_PROPERTY),
            ),
            Triple::new(
                Node::iri("http://example.org/worksFor"),
                RDF_TYPE_IRI,
                Term::iri(OWL_OBJECT_PROPERTY),
            ),
        ]);
        g.declare_prefix("ex", "http://example.org/");
        g.declare_prefix("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
        g
    }

    #[test]
    fn extracts_namespaces_and_predicates() {
        let mut config = EvalConfig::default();
        config.complete_from_ontology(&ontology(), None);

        assert_eq!(
            config.namespaces.get("ex").map(String::as_str),
            Some("http://example.org/")
        );
        assert!(!config.namespaces.contains_key("rdf"));

        let iris = config.predicate_iris();
        assert!(iris.contains(&"http://example.org/hasName".to_string()));
        assert!(iris.contains(&"http://example.org/worksFor".to_string()));
    }

    #[test]
    fn configured_values_are_not_overridden() {
        let mut config = EvalConfig {
            namespaces: BTreeMap::from([(
                "mine".to_string(),
                "http://mine.example/".to_string(),
            )]),
            predicates_to_evaluate: BTreeMap::from([(
                "mine".to_string(),
                vec!["keeps".to_string()],
            )]),
            ..EvalConfig::default()
        };
        config.complete_from_ontology(&ontology(), None);

        assert_eq!(config.predicate_iris(), vec!["http://mine.example/keeps"]);
    }

    #[test]
    fn extracts_ids_grouped_by_type() {
        let reference = Graph::from_triples(vec![
            Triple::new(
                Node::iri("http://example.org/person/10"),
                RDF_TYPE_IRI,
                Term::iri("http://example.org/Person"),
            ),
            Triple::new(
                Node::iri("http://example.org/Venus"),
                RDF_TYPE_IRI,
                Term::iri("http://example.org/Planet"),
            ),
            // Duplicate typing statement must not duplicate the ID.
            Triple::new(
                Node::iri("http://example.org/person/10"),
                RDF_TYPE_IRI,
                Term::iri("http://example.org/Person"),
            ),
        ]);

        let mut config = EvalConfig {
            base_iri: "http://example.org/".to_string(),
            ..EvalConfig::default()
        };
        config.complete_ids_from_reference(&reference);

        assert_eq!(
            config.ids_by_type.get("http://example.org/Person"),
            Some(&vec!["10".to_string()])
        );
        assert_eq!(
            config.ids_by_type.get("http://example.org/Planet"),
            Some(&vec!["Venus".to_string()])
        );
    }

    #[test]
    fn cache_is_consulted_before_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let ontology_file = dir.path().join("onto.ttl");
        std::fs::write(&ontology_file, "# placeholder").unwrap();

        let cache = FsExtractionCache::new(dir.path().join("cache"));
        let key = CacheKey::from_path(&ontology_file).unwrap();
        let cached = ExtractedSchema {
            namespaces: BTreeMap::from([(
                "cached".to_string(),
                "http://cached.example/".to_string(),
            )]),
            predicates_by_namespace: BTreeMap::from([(
                "cached".to_string(),
                vec!["fromCache".to_string()],
            )]),
        };
        cache.store(&key, &cached);

        let mut config = EvalConfig {
            ontology_file: Some(ontology_file),
            ..EvalConfig::default()
        };
        config.complete_from_ontology(&ontology(), Some(&cache));

        assert_eq!(config.predicate_iris(), vec!["http://cached.example/fromCache"]);
    }
}
