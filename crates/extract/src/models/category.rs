use std::fmt::{Display, Formatter, Result as FmtResult};

use super::DocumentType;

/// Grouping of the catalog, as shown on the category selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Complete granths (scriptures), mostly served as bundled PDFs.
    SarvGranth,
    /// Daily prayers.
    Nitnem,
    /// Compositions from Dasam Granth.
    Dasam,
    /// Raag-based compositions from Guru Granth Sahib.
    Raag,
}
impl Category {
    pub const ALL: [Category; 4] = [Self::SarvGranth, Self::Nitnem, Self::Dasam, Self::Raag];

    /// Returns the Gurmukhi display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SarvGranth => "ਸਰਵ ਗ੍ਰੰਥ",
            Self::Nitnem => "ਨਿਤਨੇਮ",
            Self::Dasam => "ਦਸਮ ਦਰਬਾਰ",
            Self::Raag => "ਰਾਗ ਦਰਬਾਰ",
        }
    }

    /// Document types belonging to this category, in catalog order.
    pub fn document_types(self) -> impl Iterator<Item = DocumentType> {
        DocumentType::ALL.into_iter().filter(move |t| t.category() == self)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.display_name())
    }
}
