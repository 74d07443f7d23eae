/// One verse of a [`Document`](super::Document).
///
/// `text` is always the primary (Gurmukhi) script and is never filled in from
/// a fallback source. `translation` is auxiliary language A (English) and
/// `secondary` is auxiliary language B (Hindi), which may hold a Devanagari
/// transliteration when the API has no true translation for that verse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    id: u64,
    text: String,
    translation: Option<String>,
    secondary: Option<String>,
}
impl Line {
    pub fn new(id: u64, text: impl Into<String>, translation: Option<String>, secondary: Option<String>) -> Self {
        Self {
            id,
            text: text.into(),
            translation,
            secondary,
        }
    }

    /// Verse identifier from the API, stable across fetches of the same document.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    pub fn secondary(&self) -> Option<&str> {
        self.secondary.as_deref()
    }

    /// Returns `true` if the line carries a non-empty secondary text.
    pub fn has_secondary(&self) -> bool {
        self.secondary.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Blank lines (empty or whitespace-only text) are never displayed.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_secondary_ignores_empty_strings() {
        assert!(!Line::new(1, "ੴ", None, None).has_secondary());
        assert!(!Line::new(1, "ੴ", None, Some(String::new())).has_secondary());
        assert!(Line::new(1, "ੴ", None, Some("ੴ सतिनामु".to_string())).has_secondary());
    }

    #[test]
    fn test_is_blank() {
        assert!(Line::new(1, "", None, None).is_blank());
        assert!(Line::new(1, " \n\t", None, None).is_blank());
        assert!(!Line::new(1, "ਸਤਿ ਨਾਮੁ", None, None).is_blank());
    }
}
