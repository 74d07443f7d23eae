//! Encoding of a [`Document`] back into the API envelope shape.
//!
//! This is the structural inverse of decoding at the document level only:
//! `id` and `title` are re-wrapped under `baniInfo`, but verses are emitted
//! as flat lines rather than the nested verse envelopes BaniDB sends.

use exn::ResultExt;
use serde_json::{Map, Value};

use crate::error::{ErrorKind, Result};
use crate::keys;
use crate::models::{Document, Line};

/// Builds the envelope for a document.
///
/// Absent translations are omitted rather than written as `null`.
pub fn to_envelope(document: &Document) -> Value {
    let mut info = Map::new();
    info.insert(keys::BANI_ID.to_string(), Value::from(document.id()));
    info.insert(keys::GURMUKHI_UNI.to_string(), Value::from(document.title()));
    let mut envelope = Map::new();
    envelope.insert(keys::BANI_INFO.to_string(), Value::Object(info));
    envelope.insert(keys::VERSES.to_string(), document.lines().iter().map(line).collect());
    Value::Object(envelope)
}

/// Serializes a document into JSON bytes.
pub fn encode(document: &Document) -> Result<Vec<u8>> {
    serde_json::to_vec(&to_envelope(document)).or_raise(|| ErrorKind::Encode)
}

fn line(line: &Line) -> Value {
    let mut map = Map::new();
    map.insert(keys::LINE_ID.to_string(), Value::from(line.id()));
    map.insert(keys::LINE_TEXT.to_string(), Value::from(line.text()));
    if let Some(translation) = line.translation() {
        map.insert(keys::LINE_TRANSLATION.to_string(), Value::from(translation));
    }
    if let Some(secondary) = line.secondary() {
        map.insert(keys::LINE_SECONDARY.to_string(), Value::from(secondary));
    }
    Value::Object(map)
}
