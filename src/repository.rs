use anyhow::{Result, bail};
use reqwest::{Client, Response, StatusCode, Url, header};
use tracing::debug;

use crate::config::RepositoryConfig;
use crate::exchange::GraphRequest;

pub(crate) static APP_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Outcome of looking up a resource description.
#[derive(Debug)]
pub(crate) enum Fetched {
    Graph(GraphRequest),
    /// Deleted, tombstoned or never existed
    Gone,
    /// Not an RDF source and no description; carries the reported content type
    Binary(String),
}

/// Reads resource descriptions from the repository's REST API.
#[derive(Clone)]
pub(crate) struct RepositoryClient {
    client: Client,
    accept: String,
}

impl RepositoryClient {
    pub(crate) fn new(config: &RepositoryConfig) -> Result<RepositoryClient> {
        let client = Client::builder()
            .http1_only()
            .user_agent(APP_USER_AGENT)
            .gzip(true)
            .timeout(config.timeout())
            .build()?;
        Ok(RepositoryClient {
            client,
            accept: config.accept.clone(),
        })
    }

    /// Fetch the RDF describing `subject`.
    ///
    /// Binaries are described by a separate resource, found through the
    /// `describedby` link or the `fcr:metadata` convention. Its triples are
    /// returned with `subject` as the base so they replace the binary's own.
    pub(crate) async fn fetch(&self, subject: &str, named_graph: Option<String>) -> Result<Fetched> {
        let response = self.get(subject).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            debug!(target: "repository", subject, %status, "resource is gone");
            return Ok(Fetched::Gone);
        }
        if response.error_for_status_ref().is_err() {
            let text = response.text().await?;
            bail!("fetching {subject} failed with error {status} {text}");
        }
        let media_type = self.media_type(&response);
        if sparql::is_rdf(&media_type) {
            return self.graph(response, media_type, subject, named_graph).await;
        }

        let description = described_by(&response, subject)?;
        debug!(target: "repository", subject, %media_type, %description, "fetching binary description");
        let response = self.get(description.as_str()).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Ok(Fetched::Binary(media_type));
        }
        if response.error_for_status_ref().is_err() {
            let text = response.text().await?;
            bail!("fetching {description} failed with error {status} {text}");
        }
        let description_type = self.media_type(&response);
        if !sparql::is_rdf(&description_type) {
            return Ok(Fetched::Binary(media_type));
        }
        self.graph(response, description_type, subject, named_graph).await
    }

    async fn get(&self, url: &str) -> Result<Response> {
        Ok(self
            .client
            .get(url)
            .header(header::ACCEPT, &self.accept)
            .send()
            .await?)
    }

    fn media_type(&self, response: &Response) -> String {
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(&self.accept)
            .to_string()
    }

    async fn graph(
        &self,
        response: Response,
        media_type: String,
        subject: &str,
        named_graph: Option<String>,
    ) -> Result<Fetched> {
        let payload = response.bytes().await?.to_vec();
        Ok(Fetched::Graph(GraphRequest {
            payload,
            media_type,
            base_uri: subject.to_string(),
            named_graph,
        }))
    }
}

/// Target of the `rel="describedby"` link, else `<subject>/fcr:metadata`.
fn described_by(response: &Response, subject: &str) -> Result<Url> {
    let base = Url::parse(subject)?;
    let link = response
        .headers()
        .get_all(header::LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .find_map(describedby_target);
    match link {
        Some(target) => Ok(base.join(target)?),
        None => Ok(Url::parse(&format!("{}/fcr:metadata", subject.trim_end_matches('/')))?),
    }
}

fn describedby_target(link: &str) -> Option<&str> {
    let (target, params) = link.trim().split_once(';')?;
    let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
    params
        .split(';')
        .filter_map(|param| param.trim().strip_prefix("rel="))
        .map(|rel| rel.trim_matches('"'))
        .any(|rel| rel.split_whitespace().any(|rel| rel.eq_ignore_ascii_case("describedby")))
        .then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describedby_link_is_recognised() {
        assert_eq!(
            describedby_target(r#"<http://localhost/rest/a/file/fcr:metadata>; rel="describedby""#),
            Some("http://localhost/rest/a/file/fcr:metadata")
        );
        assert_eq!(
            describedby_target(r#" </meta>; title="x"; rel="edit describedby""#),
            Some("/meta")
        );
        assert_eq!(
            describedby_target(r#"<http://www.w3.org/ns/ldp#NonRDFSource>; rel="type""#),
            None
        );
        assert_eq!(describedby_target("garbage"), None);
    }
}
