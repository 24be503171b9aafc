use anyhow::{Context, Result};
use tracing::{Instrument, info, info_span, warn};

use crate::config::Config;
use crate::exchange::{EventKind, RepositoryEvent};
use crate::processor::{self, SparqlRequest};
use crate::repository::{Fetched, RepositoryClient};
use crate::triplestore::TriplestoreClient;

/// What an event did to the triplestore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Indexed,
    Removed,
    Skipped,
}

/// Keeps the triplestore in step with repository events.
#[derive(Clone)]
pub(crate) struct Indexer {
    config: Config,
    repository: RepositoryClient,
    pub(crate) triplestore: TriplestoreClient,
    dry_run: bool,
}

impl Indexer {
    pub(crate) fn new(config: Config, dry_run: bool) -> Result<Indexer> {
        let repository = RepositoryClient::new(&config.repository)?;
        let triplestore = TriplestoreClient::new(&config.triplestore)?;
        Ok(Indexer {
            config,
            repository,
            triplestore,
            dry_run,
        })
    }

    pub(crate) async fn handle(&self, event: &RepositoryEvent) -> Result<Outcome> {
        let span = info_span!(
            target: "indexer",
            "event",
            request_id = %uuid::Uuid::now_v7(),
            identifier = %event.identifier,
            kind = ?event.kind,
        );
        self.handle_event(event).instrument(span).await
    }

    async fn handle_event(&self, event: &RepositoryEvent) -> Result<Outcome> {
        let subject = event.subject(&self.config.repository)?;
        let named_graph = event.named_graph(&self.config.triplestore);
        if event.kind == EventKind::Delete {
            return self.remove(&subject, named_graph.as_deref()).await;
        }
        match self.repository.fetch(&subject, named_graph.clone()).await? {
            Fetched::Graph(graph) => {
                let request = processor::replace(&subject, &graph)
                    .with_context(|| format!("unable to translate {subject}"))?;
                self.send(&request).await?;
                info!(target: "indexer", %subject, "indexed resource");
                Ok(Outcome::Indexed)
            }
            Fetched::Gone => {
                warn!(target: "indexer", %subject, "resource vanished before indexing");
                self.remove(&subject, named_graph.as_deref()).await
            }
            Fetched::Binary(media_type) => {
                info!(target: "indexer", %subject, %media_type, "skipping binary without a description");
                Ok(Outcome::Skipped)
            }
        }
    }

    async fn remove(&self, subject: &str, named_graph: Option<&str>) -> Result<Outcome> {
        let request = processor::delete(subject, named_graph)?;
        self.send(&request).await?;
        info!(target: "indexer", subject, "removed resource");
        Ok(Outcome::Removed)
    }

    async fn send(&self, request: &SparqlRequest) -> Result<()> {
        if self.dry_run {
            info!(target: "indexer", "dry-run update\n{}", request.statement());
            return Ok(());
        }
        self.triplestore.execute(request).await
    }
}
