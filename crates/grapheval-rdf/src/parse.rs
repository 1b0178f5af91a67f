//! Graph parsing via Sophia.
//!
//! Supported serializations mirror what the evaluation pipeline encounters in
//! practice: N-Triples for materialized graphs, Turtle and RDF/XML for
//! ontologies. Sophia terms are converted through their display form into the
//! crate's own term model; statements with non-IRI predicates are skipped.

use crate::{Graph, Literal, Node, Term, Triple};
use sophia::api::prelude::*;
// The explicit `Triple` struct import above shadows sophia's `Triple` trait
// from the prelude glob; the accessor methods still need the trait in scope.
use sophia::api::triple::Triple as _;
use std::path::Path;

/// RDF serialization formats the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    NTriples,
    Turtle,
    RdfXml,
}

/// Pick a format from a file extension. Unknown extensions fall back to
/// Turtle, matching the behaviour callers relied on historically.
pub fn detect_format(path: &Path) -> RdfFormat {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "nt" | "ntriples" => RdfFormat::NTriples,
        "rdf" | "owl" | "xml" => RdfFormat::RdfXml,
        "ttl" | "turtle" | "n3" => RdfFormat::Turtle,
        _ => RdfFormat::Turtle,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RdfError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse {format:?}: {message}")]
    Parse { format: RdfFormat, message: String },
    #[error("unsupported RDF term form: {0}")]
    Term(String),
}

impl Graph {
    /// Parse a graph from a string in the given format.
    pub fn parse_str(data: &str, format: RdfFormat) -> Result<Graph, RdfError> {
        let mut graph = parse_triples(data.as_bytes(), format)?;
        if matches!(format, RdfFormat::Turtle) {
            scan_turtle_prefixes(data, &mut graph);
        }
        Ok(graph)
    }

    /// Parse a graph from a file, detecting the format from the extension.
    pub fn parse_file(path: &Path) -> Result<Graph, RdfError> {
        let data = std::fs::read_to_string(path)?;
        Graph::parse_str(&data, detect_format(path))
    }
}

fn parse_triples(bytes: &[u8], format: RdfFormat) -> Result<Graph, RdfError> {
    let cursor = std::io::Cursor::new(bytes);
    let reader = std::io::BufReader::new(cursor);
    let mut graph = Graph::new();

    let collect = |graph: &mut Graph, s: String, p: String, o: String| -> Result<(), RdfError> {
        let subject = parse_node(&s)?;
        // Predicates must be IRIs; anything else is dropped.
        let Node::Iri(predicate) = parse_node(&p)? else {
            return Ok(());
        };
        let object = parse_term(&o)?;
        graph.insert(Triple::new(subject, predicate, object));
        Ok(())
    };

    match format {
        RdfFormat::NTriples => {
            sophia::turtle::parser::nt::parse_bufread(reader)
                .try_for_each_triple(|t| -> Result<(), RdfError> {
                    collect(
                        &mut graph,
                        t.s().to_string(),
                        t.p().to_string(),
                        t.o().to_string(),
                    )
                })
                .map_err(|e| RdfError::Parse {
                    format,
                    message: e.to_string(),
                })?;
        }
        RdfFormat::Turtle => {
            sophia::turtle::parser::turtle::parse_bufread(reader)
                .try_for_each_triple(|t| -> Result<(), RdfError> {
                    collect(
                        &mut graph,
                        t.s().to_string(),
                        t.p().to_string(),
                        t.o().to_string(),
                    )
                })
                .map_err(|e| RdfError::Parse {
                    format,
                    message: e.to_string(),
                })?;
        }
        RdfFormat::RdfXml => {
            sophia::xml::parser::parse_bufread(reader)
                .try_for_each_triple(|t| -> Result<(), RdfError> {
                    collect(
                        &mut graph,
                        t.s().to_string(),
                        t.p().to_string(),
                        t.o().to_string(),
                    )
                })
                .map_err(|e| RdfError::Parse {
                    format,
                    message: e.to_string(),
                })?;
        }
    }

    Ok(graph)
}

// ============================================================================
// Term display form → term model
// ============================================================================

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn parse_term(term: &str) -> Result<Term, RdfError> {
    let s = term.trim();

    if let Some(iri) = s.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Ok(Term::Node(Node::Iri(iri.to_string())));
    }

    if let Some(label) = s.strip_prefix("_:") {
        return Ok(Term::Node(Node::BlankNode(label.to_string())));
    }

    if s.starts_with('"') {
        return parse_literal(s).map(Term::Literal);
    }

    Err(RdfError::Term(s.to_string()))
}

fn parse_node(term: &str) -> Result<Node, RdfError> {
    match parse_term(term)? {
        Term::Node(node) => Ok(node),
        Term::Literal(_) => Err(RdfError::Term(term.to_string())),
    }
}

fn parse_literal(s: &str) -> Result<Literal, RdfError> {
    // N-Triples-ish display form: "lexical"@lang or "lexical"^^<datatype>.
    let mut end_quote = None;
    let mut prev_was_escape = false;
    for (i, ch) in s.char_indices().skip(1) {
        if ch == '"' && !prev_was_escape {
            end_quote = Some(i);
            break;
        }
        prev_was_escape = ch == '\\' && !prev_was_escape;
    }
    let Some(end) = end_quote else {
        return Err(RdfError::Term(s.to_string()));
    };

    let lexical = unescape(&s[1..end]);
    let rest = s[end + 1..].trim();

    let mut language = None;
    let mut datatype = None;

    if let Some(lang) = rest.strip_prefix('@') {
        language = Some(lang.to_string());
    } else if let Some(dt) = rest.strip_prefix("^^") {
        let dt = dt.trim();
        if let Some(dt_iri) = dt.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            datatype = Some(dt_iri.to_string());
        } else if !dt.is_empty() {
            datatype = Some(dt.to_string());
        }
    }

    Ok(Literal {
        lexical,
        datatype,
        language,
    })
}

// ============================================================================
// Prefix declarations
// ============================================================================

/// Record `@prefix`/`PREFIX` declarations from Turtle source. Sophia's triple
/// stream does not surface them, and configuration auto-extraction needs the
/// prefix → namespace mapping.
fn scan_turtle_prefixes(data: &str, graph: &mut Graph) {
    for line in data.lines() {
        let line = line.trim();
        let decl = if let Some(rest) = line.strip_prefix("@prefix") {
            rest
        } else if let Some(rest) = line
            .strip_prefix("PREFIX")
            .or_else(|| line.strip_prefix("prefix"))
        {
            rest
        } else {
            continue;
        };

        let decl = decl.trim().trim_end_matches('.').trim();
        let Some((prefix, iri_part)) = decl.split_once(':') else {
            continue;
        };
        let iri_part = iri_part.trim();
        if let Some(iri) = iri_part
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
        {
            graph.declare_prefix(prefix.trim(), iri);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_NT: &str = r#"
<http://example.org/a> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/Person> .
<http://example.org/a> <http://example.org/name> "Alice" .
<http://example.org/a> <http://example.org/age> "42"^^<http://www.w3.org/2001/XMLSchema#integer> .
"#;

    #[test]
    fn parses_ntriples_with_literals() {
        let g = Graph::parse_str(SAMPLE_NT, RdfFormat::NTriples).expect("parse");
        assert_eq!(g.len(), 3);

        let literals: Vec<_> = g.objects().filter_map(|o| o.as_literal()).collect();
        assert_eq!(literals.len(), 2);
        assert!(literals.iter().any(|l| l.lexical == "Alice" && l.datatype.is_none()));
        assert!(literals
            .iter()
            .any(|l| l.lexical == "42"
                && l.datatype.as_deref() == Some("http://www.w3.org/2001/XMLSchema#integer")));
    }

    #[test]
    fn parses_turtle_and_captures_prefixes() {
        let turtle = r#"
@prefix ex: <http://example.org/> .
ex:a ex:knows ex:b .
ex:a ex:label "Alice"@en .
"#;
        let g = Graph::parse_str(turtle, RdfFormat::Turtle).expect("parse");
        assert_eq!(g.len(), 2);
        assert_eq!(
            g.prefixes().get("ex").map(String::as_str),
            Some("http://example.org/")
        );

        let lang = g
            .objects()
            .filter_map(|o| o.as_literal())
            .find(|l| l.lexical == "Alice")
            .expect("language literal");
        assert_eq!(lang.language.as_deref(), Some("en"));
    }

    #[test]
    fn detects_formats_from_extension() {
        assert_eq!(detect_format(Path::new("g.nt")), RdfFormat::NTriples);
        assert_eq!(detect_format(Path::new("onto.owl")), RdfFormat::RdfXml);
        assert_eq!(detect_format(Path::new("onto.ttl")), RdfFormat::Turtle);
        assert_eq!(detect_format(Path::new("noext")), RdfFormat::Turtle);
    }
}
