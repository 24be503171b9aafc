//! Shape SPARQL protocol requests for the triplestore

use reqwest::Method;
use sparql::{FORM_URLENCODED, TranslateError};

use crate::exchange::GraphRequest;

/// An HTTP request ready to be sent to a SPARQL endpoint.
#[derive(Clone, Debug)]
pub(crate) struct SparqlRequest {
    pub(crate) method: Method,
    pub(crate) content_type: &'static str,
    pub(crate) body: String,
}

impl SparqlRequest {
    fn form(body: String) -> SparqlRequest {
        SparqlRequest {
            method: Method::POST,
            content_type: FORM_URLENCODED,
            body,
        }
    }

    /// The decoded statement, for logging.
    pub(crate) fn statement(&self) -> String {
        sparql::decode_form(&self.body).unwrap_or_else(|| self.body.clone())
    }
}

/// `INSERT DATA` for the whole payload.
pub(crate) fn insert(request: &GraphRequest) -> Result<SparqlRequest, TranslateError> {
    let body = sparql::translate(
        &request.payload,
        &request.media_type,
        &request.base_uri,
        request.named_graph.as_deref(),
    )?;
    Ok(SparqlRequest::form(body))
}

/// Swap whatever the store holds about `subject` for the payload.
pub(crate) fn replace(subject: &str, request: &GraphRequest) -> Result<SparqlRequest, TranslateError> {
    let body = sparql::replace(
        &request.payload,
        &request.media_type,
        subject,
        request.named_graph.as_deref(),
    )?;
    Ok(SparqlRequest::form(body))
}

pub(crate) fn delete(subject: &str, named_graph: Option<&str>) -> Result<SparqlRequest, TranslateError> {
    let statement = sparql::delete_where(subject, named_graph)?;
    Ok(SparqlRequest::form(sparql::update_form(&statement)))
}

pub(crate) fn describe(subject: &str) -> Result<SparqlRequest, TranslateError> {
    let statement = sparql::describe(subject)?;
    Ok(SparqlRequest::form(sparql::query_form(&statement)))
}
