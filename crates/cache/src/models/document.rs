use banis_extract::models::{Document, Line};
use serde::{Deserialize, Serialize};

/// On-disk projection of a [`Document`].
///
/// Field names are fixed by the existing cache files (`name` for the title,
/// `line` for the text, `hindiTranslation` for the secondary text), so they
/// don't follow the model's naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CachedDocument {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) lines: Vec<CachedLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CachedLine {
    pub(crate) id: u64,
    pub(crate) line: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) translation: Option<String>,
    #[serde(default, rename = "hindiTranslation", skip_serializing_if = "Option::is_none")]
    pub(crate) hindi_translation: Option<String>,
}

impl From<&Document> for CachedDocument {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id(),
            name: document.title().to_string(),
            lines: document.lines().iter().map(CachedLine::from).collect(),
        }
    }
}
impl From<CachedDocument> for Document {
    fn from(cached: CachedDocument) -> Self {
        Document::new(cached.id, cached.name, cached.lines.into_iter().map(Line::from).collect())
    }
}

impl From<&Line> for CachedLine {
    fn from(line: &Line) -> Self {
        Self {
            id: line.id(),
            line: line.text().to_string(),
            translation: line.translation().map(str::to_string),
            hindi_translation: line.secondary().map(str::to_string),
        }
    }
}
impl From<CachedLine> for Line {
    fn from(cached: CachedLine) -> Self {
        Line::new(cached.id, cached.line, cached.translation, cached.hindi_translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CachedLine{id: 1, line: "ੴ".to_string(), translation: None, hindi_translation: None}, r#"{"id":1,"line":"ੴ"}"#)]
    #[case(CachedLine{id: 2, line: "ਜਪੁ".to_string(), translation: Some("Chant".to_string()), hindi_translation: None}, r#"{"id":2,"line":"ਜਪੁ","translation":"Chant"}"#)]
    #[case(CachedLine{id: 3, line: "ਜਪੁ".to_string(), translation: None, hindi_translation: Some("जपु".to_string())}, r#"{"id":3,"line":"ਜਪੁ","hindiTranslation":"जपु"}"#)]
    fn test_line_serialize(#[case] input: CachedLine, #[case] expected: &str) {
        assert_eq!(serde_json::to_string(&input).unwrap(), expected);
    }

    #[rstest]
    #[case(CachedLine{id: 1, line: "ੴ".to_string(), translation: None, hindi_translation: None}, r#"{"id":1,"line":"ੴ","translation":null}"#)]
    #[case(CachedLine{id: 3, line: "ਜਪੁ".to_string(), translation: Some(String::new()), hindi_translation: Some("जपु".to_string())}, r#"{"id":3,"line":"ਜਪੁ","translation":"","hindiTranslation":"जपु"}"#)]
    fn test_line_deserialize(#[case] expected: CachedLine, #[case] input: &str) {
        assert_eq!(serde_json::from_str::<CachedLine>(input).unwrap(), expected);
    }

    #[test]
    fn test_document_round_trip() {
        let document = Document::new(
            10,
            "ਆਨੰਦ ਸਾਹਿਬ",
            vec![
                Line::new(5, "ਅਨੰਦੁ ਭਇਆ ਮੇਰੀ ਮਾਏ", Some("I am in ecstasy, O my mother".to_string()), None),
                Line::new(4, "", None, Some(String::new())),
                Line::new(6, "ਸਤਿਗੁਰੂ ਮੈ ਪਾਇਆ", Some("Translation".to_string()), Some("सतिगुरू मै पाइआ".to_string())),
            ],
        );
        let json = serde_json::to_string(&CachedDocument::from(&document)).unwrap();
        let restored = Document::from(serde_json::from_str::<CachedDocument>(&json).unwrap());
        assert_eq!(restored, document);
    }
}
