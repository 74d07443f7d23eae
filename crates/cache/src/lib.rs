//! On-disk cache of normalized Bani documents.
//!
//! The cache is a single JSON file mapping each
//! [`DocumentType`](banis_extract::models::DocumentType) key to a simplified
//! projection of its [`Document`](banis_extract::models::Document). It is
//! not the source of truth, BaniDB is. If the file is deleted or corrupted,
//! it is treated as empty and rebuilt by fetching again.
//!
//! # Access model
//! There is no in-memory copy: every read goes back to the file, and every
//! write rewrites the whole file. Writers are not coordinated, so a `put`
//! racing a `clear` ends with whichever landed last. Callers are expected to
//! funnel writes through a single owner.

pub mod error;
mod models;
mod store;

pub use crate::store::Cache;
