use anyhow::{Result, bail};
use reqwest::{Client, header};
use tracing::debug;

use crate::config::TriplestoreConfig;
use crate::processor::SparqlRequest;
use crate::repository::APP_USER_AGENT;

/// Delivers shaped requests to the SPARQL update and query endpoints.
#[derive(Clone)]
pub(crate) struct TriplestoreClient {
    client: Client,
    update_url: String,
    query_url: String,
}

impl TriplestoreClient {
    pub(crate) fn new(config: &TriplestoreConfig) -> Result<TriplestoreClient> {
        let client = Client::builder()
            .http1_only()
            .user_agent(APP_USER_AGENT)
            .gzip(true)
            .timeout(config.timeout())
            .build()?;
        Ok(TriplestoreClient {
            client,
            update_url: config.update_url.clone(),
            query_url: config.query_url.clone(),
        })
    }

    pub(crate) async fn execute(&self, request: &SparqlRequest) -> Result<()> {
        self.send(&self.update_url, request).await?;
        Ok(())
    }

    /// Run a query and hand back the raw response body.
    pub(crate) async fn query(&self, request: &SparqlRequest) -> Result<String> {
        self.send(&self.query_url, request).await
    }

    async fn send(&self, url: &str, request: &SparqlRequest) -> Result<String> {
        debug!(target: "triplestore", url, bytes = request.body.len(), "sending sparql request");
        let response = self
            .client
            .request(request.method.clone(), url)
            .header(header::CONTENT_TYPE, request.content_type)
            .body(request.body.clone())
            .send()
            .await?;
        let code = response.status();
        let text = response.text().await?;
        if !code.is_success() {
            bail!("posting to {url} failed with error {code} {text}");
        }
        Ok(text)
    }
}
