mod document;

pub(crate) use self::document::CachedDocument;

use std::collections::BTreeMap;

/// The whole cache file: document type key to document.
///
/// Keys are kept as strings so that entries this build doesn't recognise
/// survive a rewrite untouched.
pub(crate) type CacheRecord = BTreeMap<String, CachedDocument>;
