//! Typed request data passed between the repository and triplestore sides

use anyhow::{Result, bail};
use serde::Deserialize;

use crate::config::{RepositoryConfig, TriplestoreConfig};

/// An RDF payload ready to be translated.
#[derive(Clone, Debug)]
pub(crate) struct GraphRequest {
    pub(crate) payload: Vec<u8>,
    pub(crate) media_type: String,
    /// Resolves relative references while parsing; usually the subject URI
    pub(crate) base_uri: String,
    pub(crate) named_graph: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum EventKind {
    #[serde(alias = "ResourceCreation")]
    Create,
    #[serde(alias = "ResourceModification")]
    Update,
    #[serde(alias = "ResourceDeletion")]
    Delete,
}

/// A repository change notification.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RepositoryEvent {
    pub(crate) identifier: String,
    #[serde(rename = "type")]
    pub(crate) kind: EventKind,
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    #[serde(default)]
    pub(crate) named_graph: Option<String>,
}

impl RepositoryEvent {
    pub(crate) fn subject(&self, repository: &RepositoryConfig) -> Result<String> {
        let base_url = self
            .base_url
            .as_deref()
            .filter(|base_url| !base_url.trim().is_empty())
            .unwrap_or(&repository.base_url);
        subject_uri(base_url, &self.identifier)
    }

    /// The event's own graph, falling back to the configured one.
    pub(crate) fn named_graph(&self, triplestore: &TriplestoreConfig) -> Option<String> {
        let named_graph = self
            .named_graph
            .as_deref()
            .unwrap_or(&triplestore.named_graph);
        sparql::graph_scope(Some(named_graph)).map(str::to_string)
    }
}

/// Join a repository base URL and a resource identifier.
pub(crate) fn subject_uri(base_url: &str, identifier: &str) -> Result<String> {
    let base_url = base_url.trim().trim_end_matches('/');
    if base_url.is_empty() {
        bail!("no repository base URL available for {identifier:?}");
    }
    let identifier = identifier.trim().trim_start_matches('/');
    if identifier.is_empty() {
        return Ok(base_url.to_string());
    }
    Ok(format!("{base_url}/{identifier}"))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::json;

    use super::*;

    #[test]
    fn joins_with_a_single_slash() -> Result<()> {
        let expected = "http://localhost:8080/rest/a/b";
        assert_eq!(subject_uri("http://localhost:8080/rest", "/a/b")?, expected);
        assert_eq!(subject_uri("http://localhost:8080/rest/", "/a/b")?, expected);
        assert_eq!(subject_uri("http://localhost:8080/rest", "a/b")?, expected);
        assert_eq!(
            subject_uri("http://localhost:8080/rest/", "")?,
            "http://localhost:8080/rest"
        );
        Ok(())
    }

    #[test]
    fn missing_base_url() {
        assert!(subject_uri("", "/a/b").is_err());
        assert!(subject_uri("  ", "/a/b").is_err());
    }

    #[test]
    fn event_falls_back_to_config() -> Result<()> {
        let event: RepositoryEvent = serde_json::from_value(json!({
            "identifier": "/a/b",
            "type": "ResourceModification",
        }))?;
        assert_eq!(event.kind, EventKind::Update);

        let repository = RepositoryConfig::default();
        assert_eq!(event.subject(&repository)?, "http://localhost:8080/rest/a/b");

        let mut triplestore = TriplestoreConfig::default();
        assert_eq!(event.named_graph(&triplestore), None);
        triplestore.named_graph = "http://example.org/g".to_string();
        assert_eq!(
            event.named_graph(&triplestore).as_deref(),
            Some("http://example.org/g")
        );
        Ok(())
    }

    #[test]
    fn event_overrides_config() -> Result<()> {
        let event: RepositoryEvent = serde_json::from_value(json!({
            "identifier": "c",
            "type": "delete",
            "base_url": "http://fedora.example/rest/",
            "named_graph": "",
        }))?;
        let triplestore = TriplestoreConfig {
            named_graph: "http://example.org/g".to_string(),
            ..Default::default()
        };
        assert_eq!(
            event.subject(&RepositoryConfig::default())?,
            "http://fedora.example/rest/c"
        );
        // an explicitly empty graph on the event means the default graph
        assert_eq!(event.named_graph(&triplestore), None);
        Ok(())
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        let event = serde_json::from_value::<RepositoryEvent>(json!({
            "identifier": "c",
            "type": "ResourceRelocation",
        }));
        assert!(event.is_err());
    }
}
