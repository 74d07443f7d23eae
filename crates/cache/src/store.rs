//! The cache file and its load/get/put/clear lifecycle.

use banis_extract::models::{Document, DocumentType};
use exn::ResultExt;
use std::collections::BTreeMap;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::models::{CacheRecord, CachedDocument};

/// Type-keyed persistent store of [`Document`]s, backed by a single file.
///
/// Holds nothing but the path. Every call reads the file again, every write
/// replaces it entirely.
///
/// # Examples
///
/// ```no_run
/// use banis_cache::Cache;
/// use banis_extract::models::DocumentType;
///
/// # async fn example() {
/// let cache = Cache::new("/var/cache/banis/cachedBanis.json");
/// match cache.get(DocumentType::JapjiSahib).await {
///     Some(document) => println!("{} lines cached", document.lines().len()),
///     None => println!("not cached yet"),
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Cache {
    path: PathBuf,
}
impl Cache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every cached document.
    ///
    /// Never fails: a missing file is an empty cache, and so is an unreadable
    /// or corrupt one (after logging why). Only exact keys count; anything
    /// else, including other spellings of a known key, is skipped.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> BTreeMap<DocumentType, Document> {
        let record = match self.read().await {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(error = ?err, "Cache file could not be loaded; treating as empty");
                return BTreeMap::new();
            },
        };
        let mut documents = BTreeMap::new();
        for (key, cached) in record {
            match DocumentType::from_key(&key) {
                Some(doc_type) if doc_type.is_cacheable() => {
                    documents.insert(doc_type, Document::from(cached));
                },
                _ => tracing::warn!(key, "Skipping unrecognised cache entry"),
            }
        }
        documents
    }

    /// Returns the cached document for `doc_type`, re-reading the file.
    ///
    /// The store applies no staleness rules; a document missing a field the
    /// caller wants is still returned.
    pub async fn get(&self, doc_type: DocumentType) -> Option<Document> {
        self.load().await.remove(&doc_type)
    }

    /// Returns the document types currently cached.
    pub async fn cached_types(&self) -> Vec<DocumentType> {
        self.load().await.into_keys().collect()
    }

    /// Inserts (or replaces) the document for `doc_type` and rewrites the
    /// whole file.
    ///
    /// Entries for other document types are carried over from the file as it
    /// is right now, so concurrent fetches that each `put` accumulate rather
    /// than overwrite one another.
    ///
    /// # Errors
    /// Returns [`ErrorKind::Uncacheable`] for the bundled document, and
    /// [`ErrorKind::Io`] or [`ErrorKind::InvalidData`] if the file could
    /// not be written. Nothing about the `document` itself is lost, the
    /// caller still owns it.
    #[instrument(skip(self, document), fields(path = %self.path.display(), %doc_type, lines = document.lines().len()))]
    pub async fn put(&self, doc_type: DocumentType, document: &Document) -> Result<()> {
        if !doc_type.is_cacheable() {
            exn::bail!(ErrorKind::Uncacheable(doc_type));
        }
        let mut record = self.read().await.unwrap_or_else(|err| {
            tracing::warn!(error = ?err, "Existing cache file unreadable; it will be replaced");
            CacheRecord::new()
        });
        record.insert(doc_type.as_str().to_string(), CachedDocument::from(document));
        self.write(&record).await?;
        tracing::debug!(entries = record.len(), "Cache file written");
        Ok(())
    }

    /// Deletes the cache file. A missing file is not an error.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::info!("Cache cleared");
                Ok(())
            },
            Err(err) if err.kind() == IoErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).or_raise(|| ErrorKind::Io(self.path.clone())),
        }
    }

    async fn read(&self) -> Result<CacheRecord> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == IoErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No cache file found");
                return Ok(CacheRecord::new());
            },
            Err(err) => return Err(err).or_raise(|| ErrorKind::Io(self.path.clone())),
        };
        serde_json::from_slice(&bytes).or_raise(|| ErrorKind::InvalidData("cache record"))
    }

    /// Writes the record next to the cache file, then renames it into place,
    /// so an interrupted write never leaves a truncated cache behind.
    async fn write(&self, record: &CacheRecord) -> Result<()> {
        let bytes = serde_json::to_vec(record).or_raise(|| ErrorKind::InvalidData("cache record"))?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.or_raise(|| ErrorKind::Io(parent.to_path_buf()))?;
        }
        let staging = self.staging_path();
        fs::write(&staging, bytes).await.or_raise(|| ErrorKind::Io(staging.clone()))?;
        if let Err(err) = fs::rename(&staging, &self.path).await {
            if let Err(cleanup) = fs::remove_file(&staging).await {
                tracing::debug!(error = ?cleanup, path = %staging.display(), "Staged cache file left behind");
            }
            return Err(err).or_raise(|| ErrorKind::Io(self.path.clone()));
        }
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banis_extract::models::Line;

    fn cache_in(dir: &tempfile::TempDir) -> Cache {
        Cache::new(dir.path().join("cachedBanis.json"))
    }

    fn document(id: u64, secondary: Option<&str>) -> Document {
        Document::new(
            id,
            "ਜਪੁਜੀ ਸਾਹਿਬ",
            vec![
                Line::new(1, "ੴ ਸਤਿ ਨਾਮੁ", Some("One Universal Creator".to_string()), secondary.map(str::to_string)),
                Line::new(2, "॥ ਜਪੁ ॥", None, None),
            ],
        )
    }

    #[tokio::test]
    async fn test_get_without_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        assert!(cache.get(DocumentType::JapjiSahib).await.is_none());
        assert!(cache.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let doc = document(2, Some("ੴ सति नामु"));
        cache.put(DocumentType::JapjiSahib, &doc).await.unwrap();
        assert_eq!(cache.get(DocumentType::JapjiSahib).await, Some(doc));
        assert!(cache.get(DocumentType::JaapSahib).await.is_none());
    }

    #[tokio::test]
    async fn test_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let doc = document(2, None);
        cache_in(&dir).put(DocumentType::JapjiSahib, &doc).await.unwrap();
        // A fresh instance has nothing but the file to go on.
        let reopened = cache_in(&dir);
        assert_eq!(reopened.get(DocumentType::JapjiSahib).await, Some(doc));
    }

    #[tokio::test]
    async fn test_put_keeps_other_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        cache.put(DocumentType::JapjiSahib, &document(2, None)).await.unwrap();
        cache.put(DocumentType::JaapSahib, &document(4, None)).await.unwrap();
        cache.put(DocumentType::JapjiSahib, &document(2, Some("नया"))).await.unwrap();
        let all = cache.load().await;
        assert_eq!(all.len(), 2);
        assert!(all[&DocumentType::JapjiSahib].has_secondary());
        assert_eq!(all[&DocumentType::JaapSahib].id(), 4);
        assert_eq!(cache.cached_types().await, vec![DocumentType::JapjiSahib, DocumentType::JaapSahib]);
    }

    #[tokio::test]
    async fn test_bundled_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let err = cache.put(DocumentType::SarblohGranth, &document(0, None)).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Uncacheable(DocumentType::SarblohGranth)));
        assert!(!cache.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_as_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        fs::write(cache.path(), b"{\"japjiSahib\": [truncated").await.unwrap();
        assert!(cache.load().await.is_empty());
        cache.put(DocumentType::JapjiSahib, &document(2, None)).await.unwrap();
        assert!(cache.get(DocumentType::JapjiSahib).await.is_some());
    }

    #[tokio::test]
    async fn test_unknown_keys_are_skipped_but_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let legacy = r#"{"moolMantar":{"id":1,"name":"ਮੂਲ ਮੰਤਰ","lines":[]},"sarblohGranth":{"id":0,"name":"","lines":[]}}"#;
        fs::write(cache.path(), legacy).await.unwrap();
        assert!(cache.load().await.is_empty());
        cache.put(DocumentType::JapjiSahib, &document(2, None)).await.unwrap();
        let raw = fs::read_to_string(cache.path()).await.unwrap();
        assert!(raw.contains("moolMantar"));
        assert_eq!(cache.cached_types().await, vec![DocumentType::JapjiSahib]);
    }

    #[tokio::test]
    async fn test_put_wins_over_other_spellings_of_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let legacy = r#"{"japji_sahib":{"id":2,"name":"OLD","lines":[]},"JAPJI SAHIB":{"id":2,"name":"OLDER","lines":[]}}"#;
        fs::write(cache.path(), legacy).await.unwrap();
        assert!(cache.get(DocumentType::JapjiSahib).await.is_none());

        let doc = document(2, None);
        cache.put(DocumentType::JapjiSahib, &doc).await.unwrap();
        assert_eq!(cache.get(DocumentType::JapjiSahib).await, Some(doc));
        assert_eq!(cache.load().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let doc = document(2, None);
        cache.put(DocumentType::JapjiSahib, &doc).await.unwrap();
        let before = fs::read(cache.path()).await.unwrap();

        // A directory in the staging spot makes the next write fail before
        // the cache file itself is touched.
        fs::create_dir(cache.staging_path()).await.unwrap();
        let err = cache.put(DocumentType::JaapSahib, &document(4, None)).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Io(_)));
        assert_eq!(fs::read(cache.path()).await.unwrap(), before);
        assert_eq!(cache.get(DocumentType::JapjiSahib).await, Some(doc));
    }

    #[tokio::test]
    async fn test_no_staging_file_left_after_put() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        cache.put(DocumentType::JapjiSahib, &document(2, None)).await.unwrap();
        cache.put(DocumentType::JaapSahib, &document(4, None)).await.unwrap();
        assert!(!cache.staging_path().exists());
        assert_eq!(cache.cached_types().await.len(), 2);
    }

    #[tokio::test]
    async fn test_on_disk_format() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        cache.put(DocumentType::JapjiSahib, &document(2, None)).await.unwrap();
        let raw: serde_json::Value = serde_json::from_slice(&fs::read(cache.path()).await.unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({"japjiSahib": {
                "id": 2,
                "name": "ਜਪੁਜੀ ਸਾਹਿਬ",
                "lines": [
                    {"id": 1, "line": "ੴ ਸਤਿ ਨਾਮੁ", "translation": "One Universal Creator"},
                    {"id": 2, "line": "॥ ਜਪੁ ॥"},
                ],
            }})
        );
    }

    #[tokio::test]
    async fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        // Nothing to clear yet
        cache.clear().await.unwrap();
        cache.put(DocumentType::JapjiSahib, &document(2, None)).await.unwrap();
        cache.clear().await.unwrap();
        assert!(!cache.path().exists());
        assert!(cache.get(DocumentType::JapjiSahib).await.is_none());
    }

    #[tokio::test]
    async fn test_put_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path().join("nested/deeper/cachedBanis.json"));
        cache.put(DocumentType::JapjiSahib, &document(2, None)).await.unwrap();
        assert!(cache.get(DocumentType::JapjiSahib).await.is_some());
    }
}
