use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use sparql::FORM_URLENCODED;

/// A SPARQL protocol form body.
#[derive(Debug)]
pub(super) struct FormUrlEncoded(pub(super) String);

impl IntoResponse for FormUrlEncoded {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        if response.status() != StatusCode::INTERNAL_SERVER_ERROR {
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(FORM_URLENCODED),
            );
        }
        response
    }
}
