//! Decoding of BaniDB responses into [`Document`]s.
//!
//! Decoding is strict about structure and relaxed about content. A missing
//! `baniID`, title, `verseId` or verse text fails the whole document (and so
//! nothing gets cached), while missing or oddly-shaped translations just
//! become `None`.

mod verse;

use exn::{OptionExt, ResultExt};
use serde_json::Value;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::keys;
use crate::models::{Document, Line};

// Long enough to recognise a value in a log line, short enough to not dump a
// whole verse array into it.
const MAX_REPORTED_VALUE_CHARS: usize = 64;

/// Language sub-keys to look under for the two auxiliary languages.
///
/// BaniDB isn't consistent about naming, Hindi in particular shows up as both
/// `hi` and `hindi`. Keys are tried in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Languages {
    /// Sub-keys for auxiliary language A (the `translation` field of a line).
    pub translation: Vec<String>,
    /// Sub-keys for auxiliary language B (the `secondary` field of a line).
    pub secondary: Vec<String>,
}
impl Default for Languages {
    fn default() -> Self {
        Self {
            translation: vec!["en".to_string()],
            secondary: vec!["hi".to_string(), "hindi".to_string()],
        }
    }
}

/// Decodes BaniDB responses into [`Document`]s, looking for the auxiliary
/// texts under the configured [`Languages`].
///
/// # Examples
///
/// ```
/// use banis_extract::{Decoder, Languages};
///
/// let body = r#"{
///     "baniInfo": {"baniID": 2, "gurmukhiUni": "ਜਪੁਜੀ ਸਾਹਿਬ"},
///     "verses": [{"verse": {
///         "verseId": 1,
///         "verse": {"gurmukhi": "ੴ ਸਤਿ ਨਾਮੁ"},
///         "translation": {"en": {"bdb": "One Universal Creator"}},
///         "transliteration": "ੴ सति नामु"
///     }}]
/// }"#;
/// let document = Decoder::new(Languages::default()).document(body.as_bytes()).unwrap();
/// let line = &document.lines()[0];
/// assert_eq!(line.translation(), Some("One Universal Creator"));
/// assert_eq!(line.secondary(), Some("ੴ सति नामु"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    languages: Languages,
}
impl Decoder {
    pub fn new(languages: Languages) -> Self {
        Self { languages }
    }

    pub fn languages(&self) -> &Languages {
        &self.languages
    }

    /// Decodes a full response body.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The body is not JSON
    /// - `baniInfo.baniID` is missing or not an unsigned integer
    /// - Neither `baniInfo.gurmukhiUni` nor `baniInfo.gurmukhi` is a string
    /// - `verses` is missing, not an array, or any single verse fails to decode
    #[instrument(skip(self, body), fields(body_size = body.len(), id, lines))]
    pub fn document(&self, body: &[u8]) -> Result<Document> {
        let envelope: Value = serde_json::from_slice(body).map_err(|e| ErrorKind::MalformedJson(e.to_string()))?;
        let document = self.document_value(&envelope)?;
        tracing::Span::current().record("id", document.id()).record("lines", document.lines().len());
        Ok(document)
    }

    /// Decodes an already-parsed response.
    pub fn document_value(&self, envelope: &Value) -> Result<Document> {
        let info = envelope.get(keys::BANI_INFO).ok_or_raise(|| ErrorKind::MissingField(keys::BANI_INFO))?;
        let id = required_id(info, keys::BANI_ID)?;
        let title = self::title(info)?;
        let verses = envelope.get(keys::VERSES).ok_or_raise(|| ErrorKind::MissingField(keys::VERSES))?;
        let verses = verses.as_array().ok_or_raise(|| ErrorKind::ParseError {
            field: keys::VERSES,
            value: describe(verses),
        })?;
        let lines = verses
            .iter()
            .enumerate()
            .map(|(position, verse)| self.verse(verse).or_raise(|| ErrorKind::InvalidVerse(position)))
            .collect::<Result<Vec<Line>>>()?;
        Ok(Document::new(id, title, lines))
    }
}

/// The unicode title wins; the legacy (ASCII-font) Gurmukhi title is the
/// fallback for older entries.
fn title(info: &Value) -> Result<String> {
    info.get(keys::GURMUKHI_UNI)
        .and_then(Value::as_str)
        .or_else(|| info.get(keys::GURMUKHI).and_then(Value::as_str))
        .map(str::to_string)
        .ok_or_raise(|| ErrorKind::MissingField("title"))
}

fn required_id(container: &Value, field: &'static str) -> Result<u64> {
    let value = container.get(field).ok_or_raise(|| ErrorKind::MissingField(field))?;
    value.as_u64().ok_or_raise(|| ErrorKind::ParseError {
        field,
        value: describe(value),
    })
}

fn required_str<'a>(container: &'a Value, field: &'static str) -> Result<&'a str> {
    let value = container.get(field).ok_or_raise(|| ErrorKind::MissingField(field))?;
    value.as_str().ok_or_raise(|| ErrorKind::ParseError {
        field,
        value: describe(value),
    })
}

fn describe(value: &Value) -> String {
    let rendered = value.to_string();
    match rendered.char_indices().nth(MAX_REPORTED_VALUE_CHARS) {
        Some((cut, _)) => format!("{}...", &rendered[..cut]),
        None => rendered,
    }
}
