mod content_type;

use std::future::Future;

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use sparql::TranslateError;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::exchange::{GraphRequest, RepositoryEvent};
use crate::indexer::Indexer;
use crate::processor;

use self::content_type::FormUrlEncoded;

pub(crate) async fn serve(
    indexer: Indexer,
    http_port: u16,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let listener = TcpListener::bind(format!("0.0.0.0:{http_port}")).await?;
    info!(target: "http", addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(indexer))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

fn router(indexer: Indexer) -> Router {
    Router::new()
        .route("/events", post(post_event))
        .route("/translate", post(translate))
        .route("/describe", get(describe))
        .with_state(indexer)
}

async fn post_event(
    State(indexer): State<Indexer>,
    Json(event): Json<RepositoryEvent>,
) -> Result<StatusCode, StatusCode> {
    match indexer.handle(&event).await {
        Ok(_) => Ok(StatusCode::ACCEPTED),
        Err(error) => {
            warn!(target: "http", identifier = %event.identifier, "{error:#}");
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TranslateParams {
    base_uri: String,
    named_graph: Option<String>,
}

async fn translate(
    Query(params): Query<TranslateParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<FormUrlEncoded, StatusCode> {
    let media_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let request = GraphRequest {
        payload: body.to_vec(),
        media_type: media_type.to_string(),
        base_uri: params.base_uri,
        named_graph: params.named_graph,
    };
    let update = processor::insert(&request).map_err(|error| {
        warn!(target: "http", %error, "translation failed");
        translate_status(&error)
    })?;
    Ok(FormUrlEncoded(update.body))
}

#[derive(Deserialize)]
struct DescribeParams {
    subject: String,
}

async fn describe(
    State(indexer): State<Indexer>,
    Query(params): Query<DescribeParams>,
) -> Result<String, StatusCode> {
    let request = processor::describe(&params.subject).map_err(|error| translate_status(&error))?;
    indexer.triplestore.query(&request).await.map_err(|error| {
        warn!(target: "http", subject = %params.subject, "{error:#}");
        StatusCode::BAD_GATEWAY
    })
}

fn translate_status(error: &TranslateError) -> StatusCode {
    match error {
        TranslateError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    }
}
