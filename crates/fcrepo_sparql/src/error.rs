use std::io;
use std::str::Utf8Error;

use thiserror::Error;

/// Failures surfaced while turning an RDF payload into a SPARQL request.
///
/// None of these are retried here. Callers map them onto protocol level
/// failures at their boundary.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("no RDF serialization is registered for media type {0:?}")]
    UnsupportedMediaType(String),
    #[error("payload is not valid {media_type}: {message}")]
    Parse { media_type: String, message: String },
    #[error("payload is not valid UTF-8")]
    Encoding(#[source] Utf8Error),
    #[error("{iri:?} is not a valid IRI: {message}")]
    InvalidIri { iri: String, message: String },
    #[error("unable to serialize graph as N-Triples")]
    Serialize(#[source] io::Error),
}

impl TranslateError {
    pub(crate) fn invalid_iri(iri: &str, message: impl ToString) -> TranslateError {
        TranslateError::InvalidIri {
            iri: iri.to_owned(),
            message: message.to_string(),
        }
    }
}
