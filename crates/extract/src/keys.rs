//! Field names of the BaniDB `/banis/{id}` response, and of the flattened
//! line shape written back out by [`encode`](crate::encode).

// Document envelope
pub(crate) const BANI_INFO: &str = "baniInfo";
pub(crate) const BANI_ID: &str = "baniID";
pub(crate) const GURMUKHI_UNI: &str = "gurmukhiUni";
pub(crate) const GURMUKHI: &str = "gurmukhi";
pub(crate) const VERSES: &str = "verses";

// Verse envelope (`verse` doubles as the outer wrapper and the inner text holder)
pub(crate) const VERSE: &str = "verse";
pub(crate) const VERSE_ID: &str = "verseId";
pub(crate) const TRANSLATION: &str = "translation";
pub(crate) const TRANSLITERATION: &str = "transliteration";
pub(crate) const TRANSLITERATIONS: &str = "transliterations";

// Flattened line
pub(crate) const LINE_ID: &str = "id";
pub(crate) const LINE_TEXT: &str = "line";
pub(crate) const LINE_TRANSLATION: &str = "translation";
pub(crate) const LINE_SECONDARY: &str = "hindiTranslation";
