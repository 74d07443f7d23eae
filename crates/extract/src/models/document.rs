use super::Line;

/// A complete Bani: identity, title, and its verses in reading order.
///
/// Documents are value objects. Once decoded (from the API) or rebuilt (from
/// the cache) they are never modified, only replaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    id: u64,
    title: String,
    lines: Vec<Line>,
}
impl Document {
    pub fn new(id: u64, title: impl Into<String>, lines: Vec<Line>) -> Self {
        Self {
            id,
            title: title.into(),
            lines,
        }
    }

    /// The API's Bani ID (matches [`DocumentType::numeric_id`](super::DocumentType::numeric_id)).
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// All lines, in source order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Lines worth displaying (blank lines skipped), in source order.
    pub fn visible_lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(|line| !line.is_blank())
    }

    /// Returns `true` if at least one line carries a secondary text.
    pub fn has_secondary(&self) -> bool {
        self.lines.iter().any(Line::has_secondary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: u64, text: &str, secondary: Option<&str>) -> Line {
        Line::new(id, text, None, secondary.map(str::to_string))
    }

    #[test]
    fn test_visible_lines_skip_blank_and_keep_order() {
        let document = Document::new(
            2,
            "ਜਪੁਜੀ ਸਾਹਿਬ",
            vec![line(3, "ਸੋਚੈ", None), line(1, "  ", None), line(2, "ਚੁਪੈ", None)],
        );
        let ids: Vec<_> = document.visible_lines().map(Line::id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(document.lines().len(), 3);
    }

    #[test]
    fn test_has_secondary() {
        let without = Document::new(2, "ਜਪੁਜੀ ਸਾਹਿਬ", vec![line(1, "ੴ", None), line(2, "ਸਤਿ", Some(""))]);
        assert!(!without.has_secondary());
        let with = Document::new(2, "ਜਪੁਜੀ ਸਾਹਿਬ", vec![line(1, "ੴ", None), line(2, "ਸਤਿ", Some("सति"))]);
        assert!(with.has_secondary());
        assert!(!Document::new(2, "ਜਪੁਜੀ ਸਾਹਿਬ", vec![]).has_secondary());
    }
}
