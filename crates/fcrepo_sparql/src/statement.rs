//! SPARQL statement templates and their form encoding

use oxrdf::NamedNode;

use crate::TranslateError;

/// Form parameter carrying a SPARQL 1.1 Update statement.
pub const UPDATE_PARAM: &str = "update";
/// Form parameter carrying a SPARQL 1.1 Query.
pub const QUERY_PARAM: &str = "query";

/// Normalise an optional named graph.
///
/// An absent value, an empty string and a blank string all mean the default
/// graph.
pub fn graph_scope(named_graph: Option<&str>) -> Option<&str> {
    named_graph.map(str::trim).filter(|graph| !graph.is_empty())
}

/// `INSERT DATA` around already serialized N-Triples.
pub fn insert_data(ntriples: &str, named_graph: Option<&str>) -> Result<String, TranslateError> {
    let mut statement = String::from("INSERT DATA { ");
    match graph_scope(named_graph) {
        Some(graph) => {
            let graph = iri(graph)?;
            statement.push_str(&format!("GRAPH {graph} {{ "));
            statement.push_str(ntriples);
            statement.push_str("} ");
        }
        None => statement.push_str(ntriples),
    }
    statement.push('}');
    Ok(statement)
}

/// `DELETE WHERE` removing every triple about `subject`.
pub fn delete_where(subject: &str, named_graph: Option<&str>) -> Result<String, TranslateError> {
    let subject = iri(subject)?;
    let pattern = format!("{subject} ?p ?o ");
    let statement = match graph_scope(named_graph) {
        Some(graph) => {
            let graph = iri(graph)?;
            format!("DELETE WHERE {{ GRAPH {graph} {{ {pattern}}} }}")
        }
        None => format!("DELETE WHERE {{ {pattern}}}"),
    };
    Ok(statement)
}

pub fn describe(subject: &str) -> Result<String, TranslateError> {
    Ok(format!("DESCRIBE {}", iri(subject)?))
}

/// `update=<statement>` suitable as an `application/x-www-form-urlencoded` body.
pub fn update_form(statement: &str) -> String {
    form(UPDATE_PARAM, statement)
}

/// `query=<statement>` suitable as an `application/x-www-form-urlencoded` body.
pub fn query_form(statement: &str) -> String {
    form(QUERY_PARAM, statement)
}

/// Recover the statement carried by an `update=` or `query=` body.
pub fn decode_form(body: &str) -> Option<String> {
    let (param, value) = body.split_once('=')?;
    if param != UPDATE_PARAM && param != QUERY_PARAM {
        return None;
    }
    urlencoding::decode(value).ok().map(|statement| statement.into_owned())
}

fn form(param: &str, statement: &str) -> String {
    format!("{param}={}", urlencoding::encode(statement))
}

fn iri(value: &str) -> Result<NamedNode, TranslateError> {
    NamedNode::new(value).map_err(|error| TranslateError::invalid_iri(value, error))
}
