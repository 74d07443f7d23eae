//! Decoding of a single verse envelope into a [`Line`].

use exn::OptionExt;
use serde_json::Value;

use super::{Decoder, required_id, required_str};
use crate::error::{ErrorKind, Result};
use crate::keys;
use crate::models::Line;
use crate::resolve::resolve_providers;

impl Decoder {
    /// Decodes one entry of the `verses` array.
    ///
    /// `verseId` and the inner `verse.gurmukhi` text are required. The two
    /// auxiliary texts are best-effort and never fail the verse.
    pub fn verse(&self, envelope: &Value) -> Result<Line> {
        let verse = envelope.get(keys::VERSE).ok_or_raise(|| ErrorKind::MissingField(keys::VERSE))?;
        let id = required_id(verse, keys::VERSE_ID)?;
        let inner = verse.get(keys::VERSE).ok_or_raise(|| ErrorKind::MissingField("verse.verse"))?;
        let text = required_str(inner, keys::GURMUKHI)?;
        Ok(Line::new(id, text, self.translation(verse), self.secondary(verse)))
    }

    /// Auxiliary language A, from `translation.{lang}.{provider}`.
    fn translation(&self, verse: &Value) -> Option<String> {
        let translations = verse.get(keys::TRANSLATION)?;
        by_language(translations, &self.languages.translation).map(str::to_string)
    }

    /// Auxiliary language B. A true translation is preferred; when the API
    /// has none for the verse, the (Devanagari) transliteration stands in.
    /// Whichever is found first is used on its own, they are never combined.
    fn secondary(&self, verse: &Value) -> Option<String> {
        let languages = &self.languages.secondary;
        verse
            .get(keys::TRANSLATION)
            .and_then(|translations| by_language(translations, languages))
            .or_else(|| verse.get(keys::TRANSLITERATION).and_then(Value::as_str).filter(|s| !s.is_empty()))
            .or_else(|| verse.get(keys::TRANSLITERATIONS).and_then(|tl| by_language(tl, languages)))
            // Some entries put the per-language mapping under the singular key.
            .or_else(|| verse.get(keys::TRANSLITERATION).and_then(|tl| by_language(tl, languages)))
            .map(str::to_string)
    }
}

/// Looks under each language sub-key in turn and resolves the first
/// non-empty provider value.
fn by_language<'a>(wrapper: &'a Value, languages: &[String]) -> Option<&'a str> {
    languages.iter().filter_map(|lang| wrapper.get(lang.as_str())).find_map(resolve_providers)
}
