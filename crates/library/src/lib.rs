//! Coordinates the BaniDB API, the decoder and the local cache.
//!
//! An [`Orchestrator`] answers "show me this document" from the cache when it
//! can and fires a background fetch when it can't (or when the cached copy
//! lacks the secondary text the user wants). Fetches never block the caller;
//! their completions are applied one at a time through
//! [`Orchestrator::next`], which is also the only place the cache is written.

pub mod error;
mod fetch;
mod orchestrator;
mod preload;

#[cfg(any(test, feature = "mock"))]
pub use crate::fetch::MockFetcher;
pub use crate::fetch::{Fetcher, FetcherHandle, HttpFetcher};
pub use crate::orchestrator::{DisplayState, Event, Orchestrator, Outcome, Preferences};
pub use crate::preload::{Preload, PreloadMarker};
