//! Turn repository RDF payloads into SPARQL 1.1 Update requests.
//!
//! Everything in this crate is a pure, synchronous transformation. Fetching
//! the payload and delivering the produced body belong to the caller.

mod error;
mod media_type;
mod statement;
mod translate;

pub use error::TranslateError;
pub use media_type::{is_rdf, rdf_format};
pub use statement::{
    QUERY_PARAM, UPDATE_PARAM, decode_form, delete_where, describe, graph_scope, insert_data, query_form,
    update_form,
};
pub use translate::{parse_graph, replace, to_ntriples, translate};

/// Content type of every body produced by this crate.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
