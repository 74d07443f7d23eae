//! Cache-or-fetch decisions and the state the presentation layer watches.
//!
//! The [`Orchestrator`] is the single owner of the published [`DisplayState`].
//! Fetches run as independent tasks in a [`JoinSet`]; nothing they produce
//! touches shared state until the owner applies it with
//! [`Orchestrator::next`]. A task that dies without an answer (it panicked)
//! still surfaces, as an [`ErrorKind::Interrupted`] failure.

use banis_cache::Cache;
use banis_extract::Decoder;
use banis_extract::models::{Document, DocumentType};
use exn::ResultExt;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::{Id as TaskId, JoinSet};
use tracing::{Instrument, instrument};

use crate::error::{Error, ErrorKind, Result};
use crate::fetch::{Fetcher, FetcherHandle};

/// What a single [`Orchestrator::request`] resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Shipped with the app, nothing to fetch or cache.
    Bundled,
    /// Neither cached nor fetchable.
    Unavailable,
    /// Served from the cache, no network involved.
    Cached,
    /// A cached copy is published, but it's stale, so a refetch is running.
    Refreshing,
    /// Nothing to show yet; a fetch is running.
    Fetching,
}
impl Outcome {
    /// Returns `true` if a completion for this request will arrive later.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Refreshing | Self::Fetching)
    }
}

/// A completed fetch, after it has been applied.
#[derive(Debug)]
pub enum Event {
    Fetched {
        doc_type: DocumentType,
        /// Whether the document replaced what's on display.
        published: bool,
        /// Whether the document made it into the cache file.
        cached: bool,
    },
    Failed {
        doc_type: DocumentType,
        error: Error,
    },
}
impl Event {
    pub fn doc_type(&self) -> DocumentType {
        match self {
            Self::Fetched { doc_type, .. } | Self::Failed { doc_type, .. } => *doc_type,
        }
    }
}

/// User preferences that affect cache decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    /// The user wants auxiliary-language-B text shown.
    pub wants_secondary: bool,
}

/// What the presentation layer renders.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    requested: Option<DocumentType>,
    current: Option<Arc<Document>>,
    is_loading: bool,
}
impl DisplayState {
    /// The document type most recently requested for display.
    pub fn requested(&self) -> Option<DocumentType> {
        self.requested
    }

    pub fn current(&self) -> Option<&Document> {
        self.current.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Purpose {
    Display,
    Preload,
}

#[derive(Debug)]
struct Completion {
    doc_type: DocumentType,
    purpose: Purpose,
    result: Result<Document>,
}

/// Decides, per request, between the cache and the network, and owns what
/// ends up on display.
pub struct Orchestrator {
    cache: Cache,
    fetcher: FetcherHandle,
    decoder: Arc<Decoder>,
    preferences: Preferences,
    state: DisplayState,
    tasks: JoinSet<Result<Document>>,
    pending: HashMap<TaskId, (DocumentType, Purpose)>,
}
impl Orchestrator {
    pub fn new(cache: Cache, fetcher: FetcherHandle, decoder: Decoder, preferences: Preferences) -> Self {
        Self {
            cache,
            fetcher,
            decoder: Arc::new(decoder),
            preferences,
            state: DisplayState::default(),
            tasks: JoinSet::new(),
            pending: HashMap::new(),
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    /// Takes effect from the next [`request`](Self::request); whatever is on
    /// display stays there.
    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
    }

    /// Number of fetches whose completions haven't been applied yet.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Requests `doc_type` for display.
    ///
    /// A cached copy is published immediately. It only counts as stale when
    /// the user wants secondary text and no line has any; then it's still
    /// published but refetched. The check is presence-only, so a document the
    /// API has no secondary text for is refetched on every request.
    #[instrument(skip(self), fields(outcome))]
    pub async fn request(&mut self, doc_type: DocumentType) -> Outcome {
        self.state.requested = Some(doc_type);
        let outcome = self.resolve(doc_type).await;
        tracing::Span::current().record("outcome", tracing::field::debug(outcome));
        outcome
    }

    async fn resolve(&mut self, doc_type: DocumentType) -> Outcome {
        if doc_type.is_bundled() {
            tracing::debug!("Bundled document, skipping fetch");
            self.state.current = None;
            self.state.is_loading = false;
            return Outcome::Bundled;
        }

        let cached = self.cache.get(doc_type).await;
        let stale = cached.as_ref().is_some_and(|document| self.needs_refetch(document));
        if let Some(document) = cached {
            self.state.current = Some(Arc::new(document));
            if !stale {
                self.state.is_loading = false;
                return Outcome::Cached;
            }
            tracing::info!("Cached document has no secondary text; refetching");
        } else {
            self.state.current = None;
        }

        if !doc_type.is_fetchable() {
            tracing::warn!("Document has no API identifier");
            self.state.is_loading = false;
            return if stale { Outcome::Cached } else { Outcome::Unavailable };
        }

        self.spawn_fetch(doc_type, Purpose::Display);
        self.state.is_loading = true;
        if stale { Outcome::Refreshing } else { Outcome::Fetching }
    }

    /// Returns `true` if a cached `document` should be fetched again under
    /// the current preferences.
    pub fn needs_refetch(&self, document: &Document) -> bool {
        self.preferences.wants_secondary && !document.has_secondary()
    }

    /// Models navigating away: nothing is requested or on display anymore.
    ///
    /// Running fetches are not cancelled; their results still get cached.
    /// Dropping the orchestrator, on the other hand, aborts them.
    pub fn dismiss(&mut self) {
        self.state = DisplayState::default();
    }

    pub(crate) fn spawn_fetch(&mut self, doc_type: DocumentType, purpose: Purpose) {
        let fetcher = Arc::clone(&self.fetcher);
        let decoder = Arc::clone(&self.decoder);
        let span = tracing::info_span!("fetch", %doc_type, ?purpose);
        let handle = self.tasks.spawn(
            async move { fetch_document(fetcher.as_ref(), &decoder, doc_type).await }.instrument(span),
        );
        self.pending.insert(handle.id(), (doc_type, purpose));
    }

    /// Waits for the next fetch to complete and applies it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            let (id, result) = match self.tasks.join_next_with_id().await? {
                Ok((id, result)) => (id, result),
                Err(err) => {
                    let id = err.id();
                    tracing::error!(error = %err, "Fetch task ended without a result");
                    (id, Err::<Document, _>(err).or_raise(|| ErrorKind::Interrupted))
                },
            };
            match self.pending.remove(&id) {
                Some((doc_type, purpose)) => {
                    let completion = Completion {
                        doc_type,
                        purpose,
                        result,
                    };
                    return Some(self.apply(completion).await);
                },
                None => tracing::error!(task = %id, "Completed fetch was never registered"),
            }
        }
    }

    /// Applies every outstanding completion, in the order they complete.
    pub async fn settle(&mut self) -> Vec<Event> {
        let mut events = Vec::with_capacity(self.tasks.len());
        while let Some(event) = self.next().await {
            events.push(event);
        }
        events
    }

    #[instrument(skip_all, fields(doc_type = %completion.doc_type, purpose = ?completion.purpose))]
    async fn apply(&mut self, completion: Completion) -> Event {
        let Completion {
            doc_type,
            purpose,
            result,
        } = completion;
        let is_displayed = purpose == Purpose::Display && self.state.requested == Some(doc_type);
        if is_displayed {
            self.state.is_loading = false;
        }

        let document = match result {
            Ok(document) => document,
            Err(error) => {
                // Whatever was published before (a stale copy or nothing) stays.
                tracing::warn!(?error, "Fetch failed");
                return Event::Failed { doc_type, error };
            },
        };

        let cached = match self.cache.put(doc_type, &document).await.or_raise(|| ErrorKind::Cache) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(?error, "Fetched document could not be cached");
                false
            },
        };
        if is_displayed {
            if self.preferences.wants_secondary && !document.has_secondary() {
                tracing::info!("API returned no secondary text for this document");
            }
            self.state.current = Some(Arc::new(document));
        }
        tracing::debug!(published = is_displayed, cached, "Fetch applied");
        Event::Fetched {
            doc_type,
            published: is_displayed,
            cached,
        }
    }
}

async fn fetch_document(fetcher: &dyn Fetcher, decoder: &Decoder, doc_type: DocumentType) -> Result<Document> {
    let body = fetcher.fetch(doc_type).await?;
    match decoder.document(&body) {
        Ok(document) => Ok(document),
        Err(err) => {
            tracing::debug!(body = %String::from_utf8_lossy(&body), "Undecodable response");
            Err(err).or_raise(|| ErrorKind::Decode)
        },
    }
}
