//! One-off bulk pre-warming of the cache.

use banis_extract::models::DocumentType;
use exn::ResultExt;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::orchestrator::{Orchestrator, Purpose};

/// Persistent "the bulk preload has already run" flag: the file exists or it
/// doesn't.
#[derive(Debug, Clone)]
pub struct PreloadMarker {
    path: PathBuf,
}
impl PreloadMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// An unreadable marker counts as unset; preloading twice is harmless.
    pub async fn is_set(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or_else(|err| {
            tracing::warn!(error = ?err, path = %self.path.display(), "Could not check preload marker");
            false
        })
    }

    pub async fn set(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.or_raise(|| ErrorKind::Marker)?;
        }
        fs::write(&self.path, b"").await.or_raise(|| ErrorKind::Marker)
    }

    /// Removes the marker so the next [`Orchestrator::preload`] runs again.
    pub async fn reset(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Err(err) if err.kind() != IoErrorKind::NotFound => Err(err).or_raise(|| ErrorKind::Marker),
            _ => Ok(()),
        }
    }
}

/// What [`Orchestrator::preload`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preload {
    /// The marker was already set, nothing was fetched.
    Skipped,
    /// This many fetches were fired. Their completions arrive through
    /// [`Orchestrator::next`] like any other.
    Started(usize),
}

impl Orchestrator {
    /// Fires one fetch per fetchable document type, without waiting on any
    /// of them, unless `marker` says this already happened.
    ///
    /// The marker is set as soon as the fetches are fired. Failed fetches are
    /// not retried by a later preload; they get fetched on first request
    /// instead. Existing cache entries are only ever replaced, never removed.
    ///
    /// # Errors
    /// Only if the marker couldn't be written, in which case the fetches are
    /// still running.
    #[instrument(skip_all, fields(marker = %marker.path().display()))]
    pub async fn preload(&mut self, marker: &PreloadMarker) -> Result<Preload> {
        if marker.is_set().await {
            tracing::info!("Documents already preloaded");
            return Ok(Preload::Skipped);
        }
        let mut started = 0;
        for doc_type in DocumentType::fetchable() {
            self.spawn_fetch(doc_type, Purpose::Preload);
            started += 1;
        }
        tracing::info!(started, "Preloading documents");
        marker.set().await?;
        Ok(Preload::Started(started))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::Event;
    use crate::orchestrator::tests::{body, orchestrator};
    use banis_extract::models::{Document, Line};

    #[tokio::test]
    async fn test_marker_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let marker = PreloadMarker::new(dir.path().join("state/preloaded"));
        assert!(!marker.is_set().await);
        marker.reset().await.unwrap();
        marker.set().await.unwrap();
        assert!(marker.is_set().await);
        marker.reset().await.unwrap();
        assert!(!marker.is_set().await);
    }

    #[tokio::test]
    async fn test_preload_persists_successes_and_keeps_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let marker = PreloadMarker::new(dir.path().join("preloaded"));
        let (mut orchestrator, fetcher) = orchestrator(&dir, false);

        // Not fetchable, so only an earlier version of the app could have cached it.
        let legacy = Document::new(0, "ਗੁਰੂ ਗ੍ਰੰਥ ਸਾਹਿਬ ਜੀ", vec![Line::new(1, "ੴ", None, None)]);
        orchestrator.cache().put(DocumentType::GuruGranthSahibJi, &legacy).await.unwrap();
        let stale = Document::new(2, "ਜਪੁਜੀ ਸਾਹਿਬ", vec![]);
        orchestrator.cache().put(DocumentType::JapjiSahib, &stale).await.unwrap();

        let fetchable: Vec<_> = DocumentType::fetchable().collect();
        for doc_type in &fetchable {
            fetcher.respond(*doc_type, body(doc_type.numeric_id().unwrap(), None)).await;
        }
        fetcher.fail(DocumentType::JapjiSahib, ErrorKind::Status(500)).await;

        assert_eq!(orchestrator.preload(&marker).await.unwrap(), Preload::Started(fetchable.len()));
        assert!(marker.is_set().await);
        let events = orchestrator.settle().await;
        assert_eq!(events.len(), fetchable.len());
        let failed: Vec<_> = events.iter().filter(|e| matches!(e, Event::Failed { .. })).map(Event::doc_type).collect();
        assert_eq!(failed, vec![DocumentType::JapjiSahib]);
        // Preloading never touches what's on display.
        assert!(events.iter().all(|e| !matches!(e, Event::Fetched { published: true, .. })));

        let cached = orchestrator.cache().load().await;
        assert_eq!(cached.len(), fetchable.len() + 1);
        assert_eq!(cached[&DocumentType::GuruGranthSahibJi], legacy);
        assert_eq!(cached[&DocumentType::JapjiSahib], stale);
        assert_eq!(cached[&DocumentType::Raagmala].id(), 38);
    }

    #[tokio::test]
    async fn test_preload_runs_once() {
        let dir = tempfile::tempdir().unwrap();
        let marker = PreloadMarker::new(dir.path().join("preloaded"));
        let (mut orchestrator, fetcher) = orchestrator(&dir, false);

        orchestrator.preload(&marker).await.unwrap();
        orchestrator.settle().await;
        let calls = fetcher.calls().await.len();
        assert_eq!(calls, DocumentType::fetchable().count());

        assert_eq!(orchestrator.preload(&marker).await.unwrap(), Preload::Skipped);
        assert_eq!(orchestrator.in_flight(), 0);
        assert_eq!(fetcher.calls().await.len(), calls);
        assert!(!fetcher.calls().await.contains(&DocumentType::SarblohGranth));
    }
}
