use crate::core::config::EngineOptions;

/// Field separator inside posting keys. Never present in normalized tokens
/// or encoded weights; an id containing it is caller misuse.
pub const SEPARATOR: char = '/';

/// Upper-bound sentinel appended to a prefix to form a scan range end.
pub const RANGE_END: char = '\u{00ff}';

/// Builds and parses the four posting key families. Keys are strings of
/// alternating `label/value` segments so they stay self-describing under a
/// range scan:
///
/// 1. `text/{id}`                                        stored document
/// 2. `facet/{facet}/word/{word}/idf/{w}/id/{id}`        facet-scoped lookup
/// 3. `word/{word}/idf/{w}/id/{id}`                      facet-agnostic lookup
/// 4. `id/{id}/word/{word}/idf/{w}/facet/{facet}`        reverse index
///
/// The `idf/{w}` pair is omitted when weights are disabled, and family 4
/// drops its facet segment when faceting is disabled.
#[derive(Debug, Clone, Copy)]
pub struct KeySpaces {
    idf: bool,
    facets: bool,
}

impl KeySpaces {
    pub fn new(options: &EngineOptions) -> Self {
        KeySpaces {
            idf: options.idf,
            facets: options.facets,
        }
    }

    pub fn text(&self, id: &str) -> String {
        format!("text/{}", id)
    }

    /// Family 3. `weight` is an already order-preserving-encoded value.
    pub fn word(&self, word: &str, weight: &str, id: &str) -> String {
        if self.idf {
            format!("word/{}/idf/{}/id/{}", word, weight, id)
        } else {
            format!("word/{}/id/{}", word, id)
        }
    }

    /// Family 2. Callers must not pass an empty facet.
    pub fn facet(&self, facet: &str, word: &str, weight: &str, id: &str) -> String {
        if self.idf {
            format!("facet/{}/word/{}/idf/{}/id/{}", facet, word, weight, id)
        } else {
            format!("facet/{}/word/{}/id/{}", facet, word, id)
        }
    }

    /// Family 4, the reverse index keyed by document id.
    pub fn by_id(&self, id: &str, word: &str, weight: &str, facet: &str) -> String {
        match (self.facets, self.idf) {
            (true, true) => format!("id/{}/word/{}/idf/{}/facet/{}", id, word, weight, facet),
            (true, false) => format!("id/{}/word/{}/facet/{}", id, word, facet),
            (false, true) => format!("id/{}/word/{}/idf/{}", id, word, weight),
            (false, false) => format!("id/{}/word/{}", id, word),
        }
    }

    /// Prefix range covering every family-4 key for a document.
    pub fn by_id_range(&self, id: &str) -> (String, String) {
        let start = format!("id/{}", id);
        let end = format!("{}/{}", start, RANGE_END);
        (start, end)
    }

    /// Scan start prefix for one (facet, term) pair. Facet-agnostic when the
    /// facet is empty or faceting is disabled.
    pub fn search_prefix(&self, facet: &str, word: &str) -> String {
        if self.facets && !facet.is_empty() {
            format!("facet/{}/word/{}", facet, word)
        } else {
            format!("word/{}", word)
        }
    }
}

/// Decoded posting key. Parsing never fails on keys this crate wrote;
/// whatever labels a key carries are simply the fields that are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedKey {
    pub id: Option<String>,
    pub word: Option<String>,
    pub facet: Option<String>,
    /// Still in the order-preserving encoding; see [`ParsedKey::weight`].
    pub idf: Option<String>,
}

impl ParsedKey {
    pub fn weight(&self) -> Option<f64> {
        self.idf.as_deref().map(crate::keys::number::decode_f64)
    }
}

/// Split a key into label/value pairs, stripping any range-end sentinel.
pub fn parse_key(key: &str) -> ParsedKey {
    let mut parsed = ParsedKey::default();
    let mut segments = key.split(SEPARATOR);

    while let Some(label) = segments.next() {
        let Some(value) = segments.next() else { break };
        let value = value.replace(RANGE_END, "");
        match label {
            "id" | "text" => parsed.id = Some(value),
            "word" => parsed.word = Some(value),
            "facet" => parsed.facet = Some(value),
            "idf" => parsed.idf = Some(value),
            _ => {}
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::number::encode_f64;

    fn spaces() -> KeySpaces {
        KeySpaces::new(&EngineOptions::default())
    }

    #[test]
    fn builds_all_families() {
        let ks = spaces();
        let w = encode_f64(0.5);
        assert_eq!(ks.text("d1"), "text/d1");
        assert_eq!(ks.word("fox", &w, "d1"), format!("word/fox/idf/{}/id/d1", w));
        assert_eq!(
            ks.facet("animals", "fox", &w, "d1"),
            format!("facet/animals/word/fox/idf/{}/id/d1", w)
        );
        assert_eq!(
            ks.by_id("d1", "fox", &w, "animals"),
            format!("id/d1/word/fox/idf/{}/facet/animals", w)
        );
    }

    #[test]
    fn weight_segment_is_optional() {
        let ks = KeySpaces::new(&EngineOptions {
            idf: false,
            ..EngineOptions::default()
        });
        assert_eq!(ks.word("fox", "", "d1"), "word/fox/id/d1");
        assert_eq!(ks.by_id("d1", "fox", "", "animals"), "id/d1/word/fox/facet/animals");
    }

    #[test]
    fn parses_what_it_builds() {
        let ks = spaces();
        let w = encode_f64(1.5);
        let parsed = parse_key(&ks.by_id("d1", "fox", &w, "animals"));
        assert_eq!(parsed.id.as_deref(), Some("d1"));
        assert_eq!(parsed.word.as_deref(), Some("fox"));
        assert_eq!(parsed.facet.as_deref(), Some("animals"));
        assert_eq!(parsed.weight(), Some(1.5));
    }

    #[test]
    fn strips_range_sentinel() {
        let parsed = parse_key(&format!("word/fox{}", RANGE_END));
        assert_eq!(parsed.word.as_deref(), Some("fox"));
    }

    #[test]
    fn by_id_range_brackets_only_that_document() {
        let ks = spaces();
        let (start, end) = ks.by_id_range("d1");
        let w = encode_f64(0.0);
        let own = ks.by_id("d1", "fox", &w, "");
        let other = ks.by_id("d2", "fox", &w, "");
        assert!(own.as_str() >= start.as_str() && own.as_str() < end.as_str());
        assert!(!(other.as_str() >= start.as_str() && other.as_str() < end.as_str()));
    }
}
