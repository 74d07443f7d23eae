//! The closed catalog of requestable Banis.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use exn::OptionExt;

use super::{Category, sanitize};
use crate::error::{Error, ErrorKind};

macro_rules! catalog {
    ($($variant:ident => $key:literal, $id:expr, $title:literal, $category:ident;)+) => {
        /// A named Bani that can be requested.
        ///
        /// Each type knows its BaniDB ID (if it has one), its Gurmukhi title
        /// and its [`Category`]. The string key (the camelCase name) is what
        /// identifies the type in the cache file and on the command line.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum DocumentType {
            $($variant,)+
        }
        impl DocumentType {
            /// Every document type, in catalog order.
            pub const ALL: [DocumentType; catalog!(@count $($variant)+)] = [$(Self::$variant,)+];

            /// Returns the stable string key.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            /// Returns the BaniDB ID, or `None` for types the API doesn't serve.
            pub fn numeric_id(&self) -> Option<u64> {
                match self {
                    $(Self::$variant => $id,)+
                }
            }

            /// Returns the Gurmukhi display title.
            pub fn display_title(&self) -> &'static str {
                match self {
                    $(Self::$variant => $title,)+
                }
            }

            pub fn category(&self) -> Category {
                match self {
                    $(Self::$variant => Category::$category,)+
                }
            }
        }
    };
    (@count $($variant:ident)+) => { [$(catalog!(@one $variant)),+].len() };
    (@one $variant:ident) => { () };
}

catalog! {
    JapjiSahib => "japjiSahib", Some(2), "ਜਪੁਜੀ ਸਾਹਿਬ", Nitnem;
    JaapSahib => "jaapSahib", Some(4), "ਜਾਪੁ ਸਾਹਿਬ", Nitnem;
    TavPrasadSavaiye => "tavPrasadSavaiye", Some(6), "ਤ੍ਵ ਪ੍ਰਸਾਦਿ ਸਵੱਯੇ", Nitnem;
    ChaupaiSahib => "chaupaiSahib", Some(9), "ਬੇਨਤੀ ਚੌਪਈ ਸਾਹਿਬ", Nitnem;
    AnandSahib => "anandSahib", Some(10), "ਆਨੰਦ ਸਾਹਿਬ", Nitnem;
    RehrasSahib => "rehrasSahib", Some(21), "ਰਹਰਾਸਿ ਸਾਹਿਬ", Nitnem;
    KirtanSohila => "kirtanSohila", Some(23), "ਕੀਰਤਨ ਸੋਹਿਲਾ", Nitnem;
    SukhmaniSahib => "sukhmaniSahib", Some(31), "ਸੁਖਮਨੀ ਸਾਹਿਬ", Nitnem;
    ShabadHazareP10 => "shabadHazareP10", Some(5), "ਸ਼ਬਦ ਹਜ਼ਾਰੇ ਪਾ: ੧੦", Dasam;
    SvaiyeDeenan => "svaiyeDeenan", Some(7), "ਸਵੈਯੇ ਦੀਨਨ ਕੇ", Dasam;
    ChandiDiVaar => "chandiDiVaar", Some(13), "ਚੰਡੀ ਦੀ ਵਾਰ", Dasam;
    Ardaas => "ardaas", Some(24), "ਅਰਦਾਸ", Dasam;
    Aarti => "aarti", Some(22), "ਆਰਤੀ-ਆਰਤਾ", Dasam;
    AsaDiVaar => "asaDiVaar", Some(90), "ਆਸਾ ਦੀ ਵਾਰ", Raag;
    DakhniOankar => "dakhniOankar", Some(35), "ਦਖਣੀ ਓਅੰਕਾਰ", Raag;
    SidhGosht => "sidhGosht", Some(34), "ਸਿਧ ਗੋਸਟ", Raag;
    BavanAkhree => "bavanAkhree", Some(33), "ਬਾਵਨ ਅਖਰੀ", Raag;
    JaitsreeVaar => "jaitsreeVaar", Some(96), "ਜੈਤਸਰੀ ਕੀ ਵਾਰ", Raag;
    RamkaliVaar => "ramkaliVaar", Some(100), "ਰਾਮਕਲੀ ਕੀ ਵਾਰ", Raag;
    BasantVaar => "basantVaar", Some(104), "ਬਸੰਤ ਕੀ ਵਾਰ", Raag;
    BaarehMaahaTukhari => "baarehMaahaTukhari", Some(28), "ਬਾਰਹ ਮਾਹਾ ਤੁਖਾਰੀ", Raag;
    SalokMahalla9 => "salokMahalla9", Some(30), "ਸਲੋਕ ਮਹਲਾ ੯", Raag;
    Raagmala => "raagmala", Some(38), "ਰਾਗਮਾਲਾ", Raag;
    GuruGranthSahibJi => "guruGranthSahibJi", None, "ਗੁਰੂ ਗ੍ਰੰਥ ਸਾਹਿਬ ਜੀ", SarvGranth;
    DasamGranth => "dasamGranth", None, "ਦਸਮ ਗ੍ਰੰਥ ਸਾਹਿਬ ਜੀ", SarvGranth;
    SarblohGranth => "sarblohGranth", None, "ਸਰਬਲੋਹ ਗ੍ਰੰਥ ਜੀ", SarvGranth;
}

impl DocumentType {
    /// Sarbloh Granth ships with the app as a PDF; it is never fetched or cached.
    pub fn is_bundled(&self) -> bool {
        matches!(self, Self::SarblohGranth)
    }

    /// Only bundled documents are kept out of the cache.
    pub fn is_cacheable(&self) -> bool {
        !self.is_bundled()
    }

    /// Returns `true` if the document can be requested from the API.
    pub fn is_fetchable(&self) -> bool {
        !self.is_bundled() && self.numeric_id().is_some()
    }

    /// Every document type the API can serve, in catalog order.
    pub fn fetchable() -> impl Iterator<Item = DocumentType> {
        Self::ALL.into_iter().filter(Self::is_fetchable)
    }

    /// Looks up a type by its exact string key.
    ///
    /// Unlike [`FromStr`], which forgives case and separators for user input,
    /// this only accepts the key [`as_str`](Self::as_str) produces. Stored
    /// data must use it, or two spellings could claim the same type.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == key)
    }
}

impl FromStr for DocumentType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sanitized = sanitize(s);
        Self::ALL.into_iter().find(|t| sanitize(t.as_str()) == sanitized).ok_or_raise(|| ErrorKind::ParseError {
            field: "document_type",
            value: s.to_string(),
        })
    }
}

impl Display for DocumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case("japjiSahib", DocumentType::JapjiSahib)]
    #[case("japji-sahib", DocumentType::JapjiSahib)]
    #[case("JAPJI_SAHIB", DocumentType::JapjiSahib)]
    #[case("salok mahalla 9", DocumentType::SalokMahalla9)]
    #[case(" sarblohGranth ", DocumentType::SarblohGranth)]
    fn test_parse(#[case] input: &str, #[case] expected: DocumentType) {
        assert_eq!(input.parse::<DocumentType>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "mool mantar".parse::<DocumentType>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::ParseError { field: "document_type", .. }));
    }

    #[test]
    fn test_keys_round_trip_and_are_unique() {
        let mut seen = HashSet::new();
        for doc_type in DocumentType::ALL {
            assert!(seen.insert(doc_type.as_str()));
            assert_eq!(doc_type.as_str().parse::<DocumentType>().unwrap(), doc_type);
        }
    }

    #[rstest]
    #[case("japjiSahib", Some(DocumentType::JapjiSahib))]
    #[case("salokMahalla9", Some(DocumentType::SalokMahalla9))]
    #[case("japji_sahib", None)]
    #[case("JapjiSahib", None)]
    #[case("japji sahib", None)]
    fn test_from_key_is_exact(#[case] key: &str, #[case] expected: Option<DocumentType>) {
        assert_eq!(DocumentType::from_key(key), expected);
    }

    #[test]
    fn test_numeric_ids_are_unique() {
        let ids: Vec<_> = DocumentType::ALL.iter().filter_map(DocumentType::numeric_id).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn test_bundled_document_is_neither_fetchable_nor_cacheable() {
        let bundled: Vec<_> = DocumentType::ALL.into_iter().filter(DocumentType::is_bundled).collect();
        assert_eq!(bundled, vec![DocumentType::SarblohGranth]);
        assert!(!DocumentType::SarblohGranth.is_fetchable());
        assert!(!DocumentType::SarblohGranth.is_cacheable());
        assert!(DocumentType::fetchable().all(|t| t.numeric_id().is_some()));
        assert_eq!(DocumentType::fetchable().count(), 23);
    }

    #[test]
    fn test_granths_without_ids_are_not_fetchable() {
        assert!(!DocumentType::GuruGranthSahibJi.is_fetchable());
        assert!(!DocumentType::DasamGranth.is_fetchable());
        assert!(DocumentType::GuruGranthSahibJi.is_cacheable());
    }
}
