use banis_cache::Cache;
use banis_config::Config;
use banis_extract::Decoder;
use banis_extract::models::{Category, Document, DocumentType};
use banis_library::{Event, FetcherHandle, HttpFetcher, Orchestrator, Outcome, Preferences, Preload, PreloadMarker};
use exn::{OptionExt, ResultExt};
use std::io::Write;
use std::sync::Arc;

use crate::error::{ErrorKind, Result};

/// The fetcher used outside of tests: plain HTTP against the configured API.
pub fn http_fetcher(config: &Config) -> Result<FetcherHandle> {
    let fetcher = HttpFetcher::new(config.api.clone()).or_raise(|| ErrorKind::Runtime)?;
    Ok(Arc::new(fetcher))
}

fn orchestrator(config: &Config, fetcher: FetcherHandle, wants_secondary: bool) -> Orchestrator {
    Orchestrator::new(
        Cache::new(&config.cache.path),
        fetcher,
        Decoder::new((&config.languages).into()),
        Preferences { wants_secondary },
    )
}

pub async fn list(config: &Config, out: &mut impl Write) -> Result<()> {
    let cached = Cache::new(&config.cache.path).cached_types().await;
    for category in Category::ALL {
        writeln!(out, "{category}").or_raise(|| ErrorKind::Output)?;
        for doc_type in category.document_types() {
            let id = doc_type.numeric_id().map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
            let marker = if doc_type.is_bundled() {
                "bundled"
            } else if cached.contains(&doc_type) {
                "cached"
            } else {
                ""
            };
            writeln!(out, "  {:<20} {id:>4}  {:<24} {marker}", doc_type.as_str(), doc_type.display_title())
                .or_raise(|| ErrorKind::Output)?;
        }
    }
    Ok(())
}

pub async fn show(
    config: &Config,
    fetcher: FetcherHandle,
    doc_type: DocumentType,
    secondary: bool,
    no_translation: bool,
    out: &mut impl Write,
) -> Result<()> {
    let wants_secondary = secondary || config.display.show_secondary;
    let show_translation = config.display.show_translation && !no_translation;
    let mut orchestrator = orchestrator(config, fetcher, wants_secondary);

    match orchestrator.request(doc_type).await {
        Outcome::Bundled => {
            writeln!(out, "{} ships as a PDF and has no text to show.", doc_type.display_title())
                .or_raise(|| ErrorKind::Output)?;
            return Ok(());
        },
        Outcome::Unavailable => exn::bail!(ErrorKind::Unavailable(doc_type)),
        Outcome::Cached => {},
        Outcome::Refreshing | Outcome::Fetching => {
            while let Some(event) = orchestrator.next().await {
                if let Event::Failed { error, .. } = &event {
                    tracing::warn!(?error, "Could not fetch {doc_type}");
                }
                if event.doc_type() == doc_type {
                    break;
                }
            }
        },
    }

    let document = orchestrator.state().current().ok_or_raise(|| ErrorKind::Unavailable(doc_type))?;
    print_document(out, document, show_translation, wants_secondary).or_raise(|| ErrorKind::Output)
}

fn print_document(
    out: &mut impl Write,
    document: &Document,
    show_translation: bool,
    show_secondary: bool,
) -> std::io::Result<()> {
    writeln!(out, "{}\n", document.title())?;
    for line in document.visible_lines() {
        writeln!(out, "{}", line.text())?;
        if show_translation && let Some(translation) = line.translation() {
            writeln!(out, "  {translation}")?;
        }
        if show_secondary && let Some(secondary) = line.secondary() {
            writeln!(out, "  {secondary}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub async fn preload(config: &Config, fetcher: FetcherHandle, force: bool, out: &mut impl Write) -> Result<()> {
    let marker = PreloadMarker::new(&config.cache.preload_marker);
    if force {
        marker.reset().await.or_raise(|| ErrorKind::Cache)?;
    }
    let mut orchestrator = orchestrator(config, fetcher, config.display.show_secondary);
    let started = match orchestrator.preload(&marker).await {
        Ok(Preload::Skipped) => {
            writeln!(out, "Already preloaded. Use --force to fetch everything again.").or_raise(|| ErrorKind::Output)?;
            return Ok(());
        },
        Ok(Preload::Started(started)) => started,
        // The fetches are running regardless, only the next preload is affected.
        Err(err) => {
            tracing::warn!(error = ?err, "Preload marker not saved");
            orchestrator.in_flight()
        },
    };

    let mut fetched = 0;
    let mut failed = Vec::new();
    for event in orchestrator.settle().await {
        match event {
            Event::Fetched { .. } => fetched += 1,
            Event::Failed { doc_type, error } => failed.push((doc_type, error)),
        }
    }
    writeln!(out, "Fetched {fetched} of {started} Banis.").or_raise(|| ErrorKind::Output)?;
    for (doc_type, error) in failed {
        writeln!(out, "  {doc_type}: {}", *error).or_raise(|| ErrorKind::Output)?;
    }
    Ok(())
}

pub async fn clear(config: &Config, out: &mut impl Write) -> Result<()> {
    Cache::new(&config.cache.path).clear().await.or_raise(|| ErrorKind::Cache)?;
    writeln!(out, "Cache cleared.").or_raise(|| ErrorKind::Output)?;
    Ok(())
}
