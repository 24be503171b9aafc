use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) server: ServerConfig,
    pub(crate) repository: RepositoryConfig,
    pub(crate) triplestore: TriplestoreConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct ServerConfig {
    pub(crate) http_port: u16,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct RepositoryConfig {
    /// Prefix joined with event identifiers to form subject URIs
    pub(crate) base_url: String,
    /// Serialization requested when fetching resource descriptions
    pub(crate) accept: String,
    pub(crate) timeout_secs: u64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct TriplestoreConfig {
    pub(crate) update_url: String,
    pub(crate) query_url: String,
    /// Graph used when an event does not name one; empty means the default graph
    pub(crate) named_graph: String,
    pub(crate) timeout_secs: u64,
}

impl Config {
    pub(crate) fn load(path: Option<&Path>) -> Result<Config> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config file {}", path.display()))
    }
}

impl RepositoryConfig {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl TriplestoreConfig {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { http_port: 9080 }
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/rest".to_string(),
            accept: "text/turtle".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for TriplestoreConfig {
    fn default() -> Self {
        Self {
            update_url: "http://localhost:3030/fuseki/update".to_string(),
            query_url: "http://localhost:3030/fuseki/query".to_string(),
            named_graph: String::new(),
            timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use anyhow::Result;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn defaults_without_file() -> Result<()> {
        let config = Config::load(None)?;
        assert_eq!(config.server.http_port, 9080);
        assert_eq!(config.repository.accept, "text/turtle");
        assert!(config.triplestore.named_graph.is_empty());
        Ok(())
    }

    #[test]
    fn partial_file_keeps_defaults() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(
            file,
            r#"
            [repository]
            base_url = "http://fedora.example/rest"

            [triplestore]
            update_url = "http://store.example/update"
            named_graph = "http://example.org/g"
            "#
        )?;
        let config = Config::load(Some(file.path()))?;
        assert_eq!(config.repository.base_url, "http://fedora.example/rest");
        assert_eq!(config.repository.timeout(), Duration::from_secs(10));
        assert_eq!(config.triplestore.update_url, "http://store.example/update");
        assert_eq!(
            config.triplestore.query_url,
            "http://localhost:3030/fuseki/query"
        );
        assert_eq!(config.triplestore.named_graph, "http://example.org/g");
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load(Some(Path::new("/nonexistent/fcrepo_indexer.toml"))).is_err());
    }
}
