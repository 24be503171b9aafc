//! Media type to RDF serialization mapping

use oxrdfio::{JsonLdProfileSet, RdfFormat};

use crate::TranslateError;

/// Resolve the serialization used to parse a payload of `media_type`.
///
/// Parameters such as `; charset=utf-8` are ignored and the comparison is
/// case-insensitive. Types outside the table are rejected rather than sniffed.
pub fn rdf_format(media_type: &str) -> Result<RdfFormat, TranslateError> {
    let essence = essence(media_type);
    let format = match essence.as_str() {
        "text/turtle" | "application/x-turtle" => RdfFormat::Turtle,
        "application/rdf+xml" => RdfFormat::RdfXml,
        "application/n-triples" => RdfFormat::NTriples,
        "application/ld+json" => RdfFormat::JsonLd {
            profile: JsonLdProfileSet::empty(),
        },
        "text/n3" => RdfFormat::N3,
        _ => return Err(TranslateError::UnsupportedMediaType(media_type.to_owned())),
    };
    Ok(format)
}

/// Whether a payload of this media type can be translated at all.
pub fn is_rdf(media_type: &str) -> bool {
    rdf_format(media_type).is_ok()
}

fn essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_media_types() {
        assert_eq!(rdf_format("text/turtle").ok(), Some(RdfFormat::Turtle));
        assert_eq!(
            rdf_format("application/x-turtle").ok(),
            Some(RdfFormat::Turtle)
        );
        assert_eq!(rdf_format("text/n3").ok(), Some(RdfFormat::N3));
        assert_eq!(
            rdf_format("application/rdf+xml").ok(),
            Some(RdfFormat::RdfXml)
        );
        assert_eq!(
            rdf_format("application/n-triples").ok(),
            Some(RdfFormat::NTriples)
        );
        assert!(matches!(
            rdf_format("application/ld+json"),
            Ok(RdfFormat::JsonLd { .. })
        ));
    }

    #[test]
    fn parameters_and_case_are_ignored() {
        assert_eq!(
            rdf_format("Text/Turtle; charset=UTF-8").ok(),
            Some(RdfFormat::Turtle)
        );
        assert!(is_rdf(" application/ld+json ;profile=\"http://www.w3.org/ns/json-ld#expanded\""));
    }

    #[test]
    fn unknown_media_type_fails_fast() {
        let error = rdf_format("application/octet-stream").unwrap_err();
        assert!(matches!(
            error,
            TranslateError::UnsupportedMediaType(ref media_type) if media_type == "application/octet-stream"
        ));
        assert!(!is_rdf("text/plain"));
        assert!(!is_rdf(""));
    }
}
