//! Tolerant decoding of BaniDB responses.
//!
//! BaniDB's response schema is loose: a translation can be a string, an
//! object, or an array of either, nested under provider names that change
//! from verse to verse. This crate turns all of that into a small, stable
//! [`Document`](models::Document) model.
//!
//! - [`resolve`] picks a single string out of any provider value,
//! - [`Decoder`] decodes verses and whole documents, and
//! - [`encode`] writes a document back out in the envelope shape.

mod decode;
mod encode;
pub mod error;
mod keys;
pub mod models;
mod resolve;

pub use crate::decode::{Decoder, Languages};
pub use crate::encode::{encode, to_envelope};
use crate::error::Result;
use crate::models::Document;
pub use crate::resolve::{RESOLVABLE_FIELDS, resolve, resolve_providers};

/// Easy, top-level entrypoint for decoding a [`Document`] from a raw
/// response body using the default [`Languages`].
///
/// See [`Decoder::document`] for the failure cases.
pub fn decode(body: impl AsRef<[u8]>) -> Result<Document> {
    Decoder::default().document(body.as_ref())
}
