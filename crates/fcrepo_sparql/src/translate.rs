//! RDF payload to SPARQL update translation

use std::str;

use oxrdf::{Graph, Triple};
use oxrdfio::{RdfFormat, RdfParser, RdfSerializer};

use crate::media_type::rdf_format;
use crate::statement::{delete_where, insert_data, update_form};
use crate::TranslateError;

/// Build the `update=INSERT DATA { ... }` form body for an RDF payload.
///
/// `base_uri` only resolves relative references in the payload. An empty or
/// blank `named_graph` targets the default graph.
pub fn translate(
    bytes: &[u8],
    media_type: &str,
    base_uri: &str,
    named_graph: Option<&str>,
) -> Result<String, TranslateError> {
    let ntriples = to_ntriples(&parse_graph(bytes, media_type, base_uri)?)?;
    Ok(update_form(&insert_data(&ntriples, named_graph)?))
}

/// Like [`translate`], but drops whatever the store already holds about
/// `subject` in the same update request.
pub fn replace(
    bytes: &[u8],
    media_type: &str,
    subject: &str,
    named_graph: Option<&str>,
) -> Result<String, TranslateError> {
    let ntriples = to_ntriples(&parse_graph(bytes, media_type, subject)?)?;
    let statement = format!(
        "{};\n{}",
        delete_where(subject, named_graph)?,
        insert_data(&ntriples, named_graph)?
    );
    Ok(update_form(&statement))
}

/// Parse a payload into a triple set.
///
/// Quads that the source document places in named graphs are flattened into
/// the returned graph.
pub fn parse_graph(bytes: &[u8], media_type: &str, base_uri: &str) -> Result<Graph, TranslateError> {
    let format = rdf_format(media_type)?;
    str::from_utf8(bytes).map_err(TranslateError::Encoding)?;

    let mut parser = RdfParser::from_format(format);
    if !base_uri.trim().is_empty() {
        parser = parser
            .with_base_iri(base_uri.trim())
            .map_err(|error| TranslateError::invalid_iri(base_uri, error))?;
    }

    let mut graph = Graph::new();
    for quad in parser.for_reader(bytes) {
        let quad = quad.map_err(|error| TranslateError::Parse {
            media_type: format.name().to_owned(),
            message: error.to_string(),
        })?;
        graph.insert(&Triple::new(quad.subject, quad.predicate, quad.object));
    }
    Ok(graph)
}

/// Serialize a triple set as N-Triples, one statement per line.
pub fn to_ntriples(graph: &Graph) -> Result<String, TranslateError> {
    let mut serializer = RdfSerializer::from_format(RdfFormat::NTriples).for_writer(Vec::new());
    for triple in graph.iter() {
        serializer
            .serialize_triple(triple)
            .map_err(TranslateError::Serialize)?;
    }
    let bytes = serializer.finish().map_err(TranslateError::Serialize)?;
    String::from_utf8(bytes).map_err(|error| TranslateError::Encoding(error.utf8_error()))
}
